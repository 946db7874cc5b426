//! ### 基础设施
//! 配置、错误、外部命令执行和操作日志

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod oplog;
pub mod svn;
pub mod svn_repo;
pub mod utils;
