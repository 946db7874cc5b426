//! ### 查询已有仓库
//! 通过 svnlook 获取日期、版本号、README 和目录布局。
//! 查询失败不是错误，统一返回空值

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::core::{
    command::CommandRunner,
    config::Config,
    svn_repo::{svnlook_cat, svnlook_date, svnlook_history, svnlook_youngest},
    utils::parse_svn_date,
};

pub const README_FILE: &str = "README.txt";

pub struct RepositoryInspector<'a> {
    config: &'a Config,
    runner: &'a CommandRunner<'a>,
}

impl<'a> RepositoryInspector<'a> {
    pub fn new(config: &'a Config, runner: &'a CommandRunner<'a>) -> Self {
        RepositoryInspector { config, runner }
    }

    pub fn date(&self, repo_path: &Path) -> Option<DateTime<FixedOffset>> {
        let text = self.runner.query(&svnlook_date(self.config, repo_path))?;
        let date = parse_svn_date(&text);
        if date.is_none() {
            warn!(repo = %repo_path.display(), output = %text, "unparsable svnlook date");
        }
        date
    }

    pub fn revision(&self, repo_path: &Path) -> Option<String> {
        self.runner.query(&svnlook_youngest(self.config, repo_path))
    }

    pub fn readme(&self, repo_path: &Path) -> Option<String> {
        self.runner.query(&svnlook_cat(self.config, repo_path, README_FILE))
    }

    pub fn exists_at_subpath(&self, repo_path: &Path, subpath: &str) -> bool {
        self.runner
            .query(&svnlook_history(self.config, repo_path, subpath))
            .is_some()
    }
}
