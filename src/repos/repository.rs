//! ### 仓库实体
//! 构造时只从路径推出名称，不访问文件系统；
//! 日期、版本号、README 和 trunk 路径第一次访问时查询，之后复用

use std::{
    cell::{OnceCell, RefCell},
    collections::HashMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, FixedOffset};

use crate::{
    core::error::{AppError, AppResult},
    repos::inspector::RepositoryInspector,
};

pub struct Repository<'a> {
    name: String,
    path: PathBuf,
    inspector: &'a RepositoryInspector<'a>,
    date: OnceCell<Option<DateTime<FixedOffset>>>,
    revision: OnceCell<Option<String>>,
    readme: OnceCell<Option<String>>,
    trunk_path: OnceCell<String>,
    subpaths: RefCell<HashMap<String, bool>>,
}

/// 从目录路径推出仓库名，名称中不能有空白
pub fn name_from_path(path: &Path) -> AppResult<String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation(format!("no repository name in {}", path.display())))?;

    if name.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(format!("repository name contains whitespace: {:?}", name)));
    }
    Ok(name)
}

impl<'a> Repository<'a> {
    pub fn open(path: impl Into<PathBuf>, inspector: &'a RepositoryInspector<'a>) -> AppResult<Self> {
        let path = path.into();
        let name = name_from_path(&path)?;
        Ok(Repository {
            name,
            path,
            inspector,
            date: OnceCell::new(),
            revision: OnceCell::new(),
            readme: OnceCell::new(),
            trunk_path: OnceCell::new(),
            subpaths: RefCell::new(HashMap::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 最新提交时间，`None` 表示不是完整的仓库
    pub fn date(&self) -> Option<&DateTime<FixedOffset>> {
        self.date
            .get_or_init(|| self.inspector.date(&self.path))
            .as_ref()
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision
            .get_or_init(|| self.inspector.revision(&self.path))
            .as_deref()
    }

    pub fn readme(&self) -> Option<&str> {
        self.readme
            .get_or_init(|| self.inspector.readme(&self.path))
            .as_deref()
    }

    /// 每个 subpath 只查询一次
    pub fn exists_at_subpath(&self, subpath: &str) -> bool {
        if let Some(&found) = self.subpaths.borrow().get(subpath) {
            return found;
        }
        let found = self.inspector.exists_at_subpath(&self.path, subpath);
        self.subpaths.borrow_mut().insert(subpath.to_string(), found);
        found
    }

    /// - {name}/trunk/ 如果仓库遵循 trunk/tags/branches 布局
    /// - {name}/ 其他情况
    pub fn trunk_path(&self) -> &str {
        self.trunk_path.get_or_init(|| {
            if self.exists_at_subpath("/trunk/") {
                format!("{}/trunk/", self.name)
            } else {
                format!("{}/", self.name)
            }
        })
    }
}

impl std::fmt::Debug for Repository<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("date", &self.date.get())
            .field("revision", &self.revision.get())
            .finish_non_exhaustive()
    }
}
