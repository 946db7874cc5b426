//! ### 构造 SVN 仓库相关命令
//! 使用 svnadmin 创建仓库，svnlook 查询仓库

use std::path::Path;

use crate::core::{command::CommandLine, config::Config};

/// ### svnadmin create
/// 创建一个新的 SVN 仓库
pub fn svnadmin_create(config: &Config, repo_path: &Path) -> CommandLine {
    CommandLine::new(config.svn_binary("svnadmin"))
        .arg("create")
        .arg(repo_path)
}

fn svnlook(config: &Config, subcommand: &str, repo_path: &Path) -> CommandLine {
    CommandLine::new(config.svn_binary("svnlook"))
        .arg(subcommand)
        .arg(repo_path)
}

/// ### svnlook date
/// 最新提交的时间
pub fn svnlook_date(config: &Config, repo_path: &Path) -> CommandLine {
    svnlook(config, "date", repo_path)
}

/// ### svnlook youngest
/// 最新的版本号
pub fn svnlook_youngest(config: &Config, repo_path: &Path) -> CommandLine {
    svnlook(config, "youngest", repo_path)
}

/// ### svnlook cat
/// 读取 HEAD 中的文件内容
pub fn svnlook_cat(config: &Config, repo_path: &Path, file: &str) -> CommandLine {
    svnlook(config, "cat", repo_path).arg(file)
}

/// ### svnlook history --limit 1
/// 只要 {subpath} 有一条历史记录就成功
pub fn svnlook_history(config: &Config, repo_path: &Path, subpath: &str) -> CommandLine {
    svnlook(config, "history", repo_path).args(["--limit", "1", subpath])
}
