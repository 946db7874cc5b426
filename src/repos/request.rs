//! 创建请求：已校验的名称、描述和当前用户

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::{AppError, AppResult};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("repository name pattern"));

/// 仓库名，只允许小写字母、数字和连字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName(String);

impl RepoName {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AppError::Validation("no name".to_string()));
        }
        if !NAME_PATTERN.is_match(name) {
            return Err(AppError::Validation(format!(
                "invalid name: {}. Only lowercase letters, digits and hyphens (-) are allowed.",
                name
            )));
        }
        Ok(RepoName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    name: RepoName,
    description: String,
    user: String,
}

impl CreateRequest {
    /// `user` is the authenticated identity of the caller; it is written
    /// verbatim into the access list, so it must be a single token.
    pub fn new(name: &str, description: &str, user: &str) -> AppResult<Self> {
        let name = RepoName::parse(name)?;

        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation("no desc".to_string()));
        }

        let user = user.trim();
        if user.is_empty() || user.chars().any(|c| c.is_whitespace() || matches!(c, '[' | ']' | '=')) {
            return Err(AppError::Validation(format!("invalid user: {:?}", user)));
        }

        Ok(CreateRequest {
            name,
            description: description.to_string(),
            user: user.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}
