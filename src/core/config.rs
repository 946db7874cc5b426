//! ### 配置
//! 启动时构建一次，之后以只读引用传给各个组件
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults
//! 2. `repolist.toml` in the working directory, or the file given with `--config`
//! 3. Environment variables (`REPOLIST_*`)

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use encoding_rs::Encoding;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::AppResult;

pub const DEFAULT_CONFIG_FILE: &str = "repolist.toml";
pub const ENV_PREFIX: &str = "REPOLIST_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Unknown source encoding: {0}. Use \"auto\" or an encoding label such as EUC-JP")]
    UnknownEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 仓库根目录，每个子目录是一个仓库
    pub root: PathBuf,
    /// svn, svnadmin, svnlook 所在目录
    pub svn_binary_dir: PathBuf,
    /// 共享的 authz 文件，只追加
    pub authz_file: PathBuf,
    /// 列表中链接的 URI 前缀
    pub uri_root: String,
    pub date_format: String,
    /// 外部命令输出的编码，"auto" 表示自动检测
    pub source_encoding: String,
    /// 子进程的 LANG / LC_ALL
    pub locale: String,
    /// 临时工作区的父目录，未设置时使用 root
    pub scratch_dir: Option<PathBuf>,
    pub commit_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: PathBuf::from("/var/svn-repositories"),
            svn_binary_dir: PathBuf::from("/usr/bin"),
            authz_file: PathBuf::from("/var/www/svn/.authz"),
            uri_root: "https://localhost/svn-repos-root/".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            source_encoding: "auto".to_string(),
            locale: "C".to_string(),
            scratch_dir: None,
            commit_message: "initial commit".to_string(),
        }
    }
}

/// How captured command output is turned into text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceEncoding {
    /// UTF-8 if valid, otherwise whatever chardetng guesses.
    Auto,
    Fixed(&'static Encoding),
}

impl SourceEncoding {
    pub fn parse(label: &str) -> Result<Self, ConfigError> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("auto") {
            return Ok(SourceEncoding::Auto);
        }
        Encoding::for_label(label.as_bytes())
            .map(SourceEncoding::Fixed)
            .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
    }
}

impl Config {
    /// Load configuration with hierarchical merging.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> AppResult<Config> {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("config file not found: {}", path.display()),
                    )
                    .into());
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };

        let config: Config = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::Empty("root"));
        }
        if self.svn_binary_dir.as_os_str().is_empty() {
            return Err(ConfigError::Empty("svn_binary_dir"));
        }
        if self.authz_file.as_os_str().is_empty() {
            return Err(ConfigError::Empty("authz_file"));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Empty("date_format"));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Empty("locale"));
        }
        if self.commit_message.trim().is_empty() {
            return Err(ConfigError::Empty("commit_message"));
        }
        SourceEncoding::parse(&self.source_encoding)?;
        Ok(())
    }

    /// 已通过 validate 的配置不会走到 Auto 以外的失败分支
    pub fn source_encoding(&self) -> SourceEncoding {
        SourceEncoding::parse(&self.source_encoding).unwrap_or(SourceEncoding::Auto)
    }

    /// 获取 svn 工具的完整路径
    /// - {svn_binary_dir}/{name}
    pub fn svn_binary(&self, name: &str) -> PathBuf {
        self.svn_binary_dir.join(name)
    }

    /// 获取指定仓库的目录
    /// - {root}/{name}
    pub fn repository_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn scratch_parent(&self) -> &Path {
        self.scratch_dir.as_deref().unwrap_or(&self.root)
    }
}
