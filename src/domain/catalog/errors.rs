//! Catalog Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("无效的贡献者角色: {0}")]
    InvalidRole(String),
}
