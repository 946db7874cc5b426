//! ### 仓库列表
//! 每次调用都重新扫描根目录，不缓存结果

use std::{fs, path::Path};

use tracing::{debug, warn};

use crate::{
    core::error::AppResult,
    repos::{inspector::RepositoryInspector, repository::Repository},
};

pub struct RepositoryCatalog<'a> {
    inspector: &'a RepositoryInspector<'a>,
}

impl<'a> RepositoryCatalog<'a> {
    pub fn new(inspector: &'a RepositoryInspector<'a>) -> Self {
        RepositoryCatalog { inspector }
    }

    /// 列出 {root} 下的有效仓库，最新提交在前
    pub fn list(&self, root: &Path) -> AppResult<Vec<Repository<'a>>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            // 名称带 "." 的是隐藏目录或临时工作区
            let hidden = path
                .file_name()
                .map_or(true, |n| n.to_string_lossy().contains('.'));
            if hidden || !path.is_dir() {
                continue;
            }
            dirs.push(path);
        }
        // read_dir 的顺序不确定，按名称排序后日期相同的仓库顺序稳定
        dirs.sort();

        let mut repos: Vec<Repository<'a>> = dirs
            .into_iter()
            .filter_map(|dir| match Repository::open(&dir, self.inspector) {
                Ok(repo) => Some(repo),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping directory");
                    None
                }
            })
            .collect();

        repos.retain(|repo| {
            let valid = repo.date().is_some();
            if !valid {
                debug!(repo = repo.name(), "no commit date, not listed");
            }
            valid
        });
        // sort_by 是稳定排序
        repos.sort_by(|a, b| b.date().cmp(&a.date()));

        Ok(repos)
    }
}
