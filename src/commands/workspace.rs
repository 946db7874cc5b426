//! ### 仓库根目录层级的指令
//!
//! 包括指令：
//!
//! - list: 按最新提交时间列出所有仓库
//! - create: 创建一个新仓库并授予当前用户读写权限
//!

use std::ffi::OsString;

use crossterm::style::Stylize;
use tracing::info;

use crate::{
    commands::utils::{decode_arg, resolve_user},
    core::{app::App, error::{AppError, AppResult}, utils::OutputDecoder},
    repos::{
        catalog::RepositoryCatalog, inspector::RepositoryInspector, provisioner::RepositoryProvisioner,
        request::CreateRequest,
    },
    ui::models::RepositoryRow,
};

/// 列出根目录中的所有仓库
pub fn handle_list(app: &App, json: bool) -> AppResult<()> {
    let rows = list_rows(app)?;
    if json {
        app.ui.show_json(&rows)
    } else {
        app.ui.show_repository_list(&rows);
        Ok(())
    }
}

/// 表格和 `--json` 共用的行数据，按最新提交时间排序
pub fn list_rows(app: &App) -> AppResult<Vec<RepositoryRow>> {
    let runner = app.runner();
    let inspector = RepositoryInspector::new(&app.config, &runner);

    app.ui.update_step("Scanning repositories");
    let repos = RepositoryCatalog::new(&inspector).list(&app.config.root)?;

    app.ui.update_step("Reading repository details");
    Ok(repos
        .iter()
        .map(|repo| RepositoryRow::from_repository(repo, &app.config))
        .collect())
}

/// 创建一个新仓库，成功时返回操作日志
pub fn handle_create(app: &App, name: &str, description: Option<&OsString>, user: Option<&str>) -> AppResult<String> {
    let user = resolve_user(user)?;

    let decoder = OutputDecoder::new(app.config.source_encoding());
    let description = match description {
        Some(raw) => decode_arg(&decoder, raw),
        None if app.interactive => app.ui.input("Description of the new repository:")?,
        None => return Err(AppError::Validation("no desc".to_string())),
    };

    let request = CreateRequest::new(name, &description, &user)?;

    let runner = app.runner();
    let provisioner = RepositoryProvisioner::new(&app.config, &runner);

    app.ui.update_step(&format!("Creating repository {}", request.name()));
    let log = provisioner.create(&request)?;
    info!(repo = request.name(), user = request.user(), "repository created");

    app.ui.success(&format!("repos {} created", request.name().yellow().bold()));
    app.ui.show_log(&log);
    Ok(log)
}

/// 打印失败信息并给出进程退出码
/// - 0: 成功
/// - 1: 请求被拒绝或用户取消
/// - 2: 命令或 I/O 失败，带上操作日志
pub fn exit_status(app: &App, result: AppResult<()>) -> u8 {
    let err = match result {
        Ok(()) => return 0,
        Err(e) => e,
    };
    match &err {
        AppError::OperationCancelled => app.ui.success("Operation cancelled by user."),
        AppError::CommandFailed { command, log, .. } => {
            app.ui.error(&format!("Command failed: {}", command));
            app.ui.show_log(log);
        }
        AppError::StepFailed { log, .. } => {
            app.ui.error(&err.to_string());
            app.ui.show_log(log);
        }
        _ => app.ui.error(&err.to_string()),
    }
    err.exit_code()
}
