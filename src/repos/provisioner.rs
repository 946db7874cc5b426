//! ### 创建仓库
//!
//! 在临时工作区里完成 svnadmin create / checkout / add / commit，
//! 然后一次 rename 发布到根目录，最后追加 authz 条目。
//! 临时工作区在任何退出路径上都会被删除

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::{
    core::{
        command::CommandRunner,
        config::Config,
        error::{AppError, AppResult},
        oplog::OperationLog,
        svn::{svn_add, svn_checkout, svn_commit},
        svn_repo::svnadmin_create,
    },
    repos::{inspector::README_FILE, repository::name_from_path, request::CreateRequest},
};

pub const LAYOUT_DIRS: [&str; 3] = ["trunk", "tags", "branches"];
const SCRATCH_PREFIX: &str = ".repolist";

pub struct RepositoryProvisioner<'a> {
    config: &'a Config,
    runner: &'a CommandRunner<'a>,
}

impl<'a> RepositoryProvisioner<'a> {
    pub fn new(config: &'a Config, runner: &'a CommandRunner<'a>) -> Self {
        RepositoryProvisioner { config, runner }
    }

    /// 在 {root}/{name} 创建仓库，返回完整的操作日志
    pub fn create(&self, request: &CreateRequest) -> AppResult<String> {
        let target = self.config.repository_path(request.name());
        self.create_at(&target, request.description(), request.user())
    }

    pub fn create_at(&self, target: &Path, description: &str, user: &str) -> AppResult<String> {
        let name = name_from_path(target)?;
        // symlink_metadata 也能发现悬空的符号链接
        if target.symlink_metadata().is_ok() {
            return Err(AppError::AlreadyExists(target.to_path_buf()));
        }

        let mut log = OperationLog::new();
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(self.config.scratch_parent())?;
        let repos = scratch.path().join("repos");
        let work_copy = scratch.path().join("working-copy");

        self.runner.run_checked(&svnadmin_create(self.config, &repos), &mut log)?;
        self.runner.run_checked(&svn_checkout(self.config, &repos, &work_copy), &mut log)?;

        populate(&work_copy, description).map_err(|e| step_failed(&mut log, "populate working copy", e))?;

        let mut paths: Vec<&str> = LAYOUT_DIRS.to_vec();
        paths.push(README_FILE);
        self.runner.run_checked(&svn_add(self.config, &work_copy, &paths), &mut log)?;
        self.runner.run_checked(&svn_commit(self.config, &work_copy, &self.config.commit_message), &mut log)?;

        // authz 在发布前打开，打不开时仓库不会出现在根目录
        let mut authz = open_access_list(&self.config.authz_file)
            .map_err(|e| step_failed(&mut log, "open authz", e))?;

        log.note(format!("mv {} {}", repos.display(), target.display()));
        match publish(&repos, target) {
            Ok(()) => {}
            Err(e) if is_name_clash(&e) => return Err(AppError::AlreadyExists(target.to_path_buf())),
            Err(e) => return Err(step_failed(&mut log, "publish", e)),
        }
        info!(repo = %name, target = %target.display(), "repository published");

        log.note("append to authz");
        write_access_stanza(&mut authz, &name, user).map_err(|e| {
            warn!(repo = %name, authz = %self.config.authz_file.display(), "published without access stanza");
            step_failed(&mut log, "append to authz (repository published, access not granted)", e)
        })?;
        info!(repo = %name, user, authz = %self.config.authz_file.display(), "access granted");

        if let Err(e) = scratch.close() {
            warn!(error = %e, "failed to remove scratch workspace");
        }
        Ok(log.render())
    }
}

/// trunk/tags/branches 和 README
fn populate(work_copy: &Path, description: &str) -> io::Result<()> {
    for dir in LAYOUT_DIRS {
        fs::create_dir(work_copy.join(dir))?;
    }
    fs::write(work_copy.join(README_FILE), description.as_bytes())
}

fn step_failed(log: &mut OperationLog, step: &str, source: io::Error) -> AppError {
    log.note(format!("{} failed: {}", step, source));
    AppError::StepFailed { step: step.to_string(), source, log: log.render() }
}

/// 单次 rename，目标路径上不会出现半成品仓库
fn publish(repos: &Path, target: &Path) -> io::Result<()> {
    fs::rename(repos, target)
}

fn is_name_clash(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::AlreadyExists | io::ErrorKind::DirectoryNotEmpty)
}

pub fn open_access_list(authz_file: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(authz_file)
}

/// 追加一段 authz 条目，已有内容不变
/// ```text
///
/// [name:/]
/// user = rw
/// ```
pub fn write_access_stanza(authz: &mut impl Write, name: &str, user: &str) -> io::Result<()> {
    let stanza = format!("\n[{}:/]\n{} = rw\n", name, user);
    // 一次写入，避免与其他进程的追加交错
    authz.write_all(stanza.as_bytes())?;
    authz.flush()
}
