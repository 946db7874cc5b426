//! Provisions and catalogs Subversion repositories on a shared server.
//!
//! The library holds the repository lifecycle: creating a repository inside a
//! disposable workspace, publishing it with one rename, granting access in the
//! shared authz file, and reading listing metadata back out with `svnlook`.

pub mod commands;
pub mod core;
pub mod repos;
pub mod ui;

pub use crate::core::{
    command::{CommandExecutor, CommandLine, CommandRunner, RawOutput, SystemExecutor},
    config::{Config, SourceEncoding},
    error::{AppError, AppResult},
    oplog::{CommandRecord, Entry, OperationLog},
    utils::OutputDecoder,
};
pub use crate::repos::{
    catalog::RepositoryCatalog,
    inspector::RepositoryInspector,
    provisioner::RepositoryProvisioner,
    repository::Repository,
    request::CreateRequest,
};
