//! ### 构造 svn 工作副本相关命令
//!
//! 单个函数只构造一条命令，不执行

use std::path::Path;

use crate::core::{command::CommandLine, config::Config, utils::file_url};

/// ### svn checkout
/// 检出 {repos_path} 到 {dest}
pub fn svn_checkout(config: &Config, repos_path: &Path, dest: &Path) -> CommandLine {
    CommandLine::new(config.svn_binary("svn"))
        .arg("checkout")
        .arg(file_url(repos_path))
        .arg(dest)
}

/// ### svn add
/// 在工作副本 {work_copy} 中添加新路径
pub fn svn_add(config: &Config, work_copy: &Path, paths: &[&str]) -> CommandLine {
    CommandLine::new(config.svn_binary("svn"))
        .arg("add")
        .args(paths.iter().copied())
        .current_dir(work_copy)
}

/// ### svn commit
/// 提交工作副本 {work_copy} 的全部更改
pub fn svn_commit(config: &Config, work_copy: &Path, message: &str) -> CommandLine {
    CommandLine::new(config.svn_binary("svn"))
        .args(["commit", ".", "-m", message])
        .current_dir(work_copy)
}
