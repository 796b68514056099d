//! SQLite Persistence - SQLite 数据库持久化实现

mod book_repo;
mod contributor_repo;
mod database;
mod publisher_repo;
mod review_repo;

pub use book_repo::*;
pub use contributor_repo::SqliteContributorRepository;
pub use database::*;
pub use publisher_repo::*;
pub use review_repo::*;
