//! UI 相关的数据模型

use std::time;

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::{core::config::Config, repos::repository::Repository};

pub const NO_DATE: &str = "none";
pub const NO_README: &str = "(No /README.txt)";

/// 列表中的一行，也是 `list --json` 的输出格式
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRow {
    pub name: String,
    pub url: String,
    pub trunk_path: String,
    pub date: Option<String>,
    pub revision: Option<String>,
    pub readme: Option<String>,
}

impl RepositoryRow {
    pub fn from_repository(repo: &Repository<'_>, config: &Config) -> Self {
        let trunk_path = repo.trunk_path().to_string();
        RepositoryRow {
            name: repo.name().to_string(),
            url: format!("{}/{}", config.uri_root.trim_end_matches('/'), trunk_path),
            trunk_path,
            date: repo.date().map(|d| d.format(&config.date_format).to_string()),
            revision: repo.revision().map(str::to_owned),
            readme: repo.readme().map(str::to_owned),
        }
    }

    /// `2024-06-01 (r12)`，没有日期时为 `none (r12)`
    pub fn date_cell(&self) -> String {
        format!(
            "{} (r{})",
            self.date.as_deref().unwrap_or(NO_DATE),
            self.revision.as_deref().unwrap_or("")
        )
    }

    pub fn readme_cell(&self) -> &str {
        self.readme.as_deref().unwrap_or(NO_README)
    }
}

pub struct SpinnerInfo {
    pub pb: ProgressBar,
    _start_time: time::Instant,
}

impl SpinnerInfo {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        let frames = ["[=   ]","[==  ]","[=== ]","[ ===]","[  ==]","[   =]","[    ]","[   =]","[  ==]","[ ===]","[====]","[=== ]","[==  ]","[=   ]", "[    ]","    "];

        pb.set_style(ProgressStyle::default_spinner()
            .tick_strings(&frames)
            .template("{spinner:.blue.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()));

        pb.enable_steady_tick(time::Duration::from_millis(50));
        SpinnerInfo {
            pb,
            _start_time: time::Instant::now(),
        }
    }

    pub fn get_current_message(&self) -> String {
        format!("{} {}", "[WAIT]".cyan().bold(), self.pb.message())
    }
}
