//! Catalog Context - 目录限界上下文
//!
//! 职责:
//! - 出版社、图书、贡献者实体
//! - 图书与贡献者的显式关联（带角色）
//! - ISBN-13 与署名格式化

mod entities;
mod errors;
mod value_objects;

pub use entities::{Book, BookContributor, Contributor, Publisher};
pub use errors::CatalogError;
pub use value_objects::{BookContributorId, BookId, ContributorId, ContributorRole, PublisherId};
