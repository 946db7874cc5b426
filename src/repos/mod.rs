//! ### 仓库生命周期
//!
//! - inspector: 通过 svnlook 查询已有仓库
//! - repository: 仓库实体，元数据按需查询并缓存
//! - catalog: 列出根目录下的仓库
//! - provisioner: 创建并发布新仓库
//! - request: 创建请求的校验

pub mod catalog;
pub mod inspector;
pub mod provisioner;
pub mod repository;
pub mod request;

#[cfg(test)]
pub(crate) mod fake;
