//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{
    Book, BookContributor, BookId, Contributor, ContributorId, Publisher, PublisherId,
};
use crate::domain::review::{Review, ReviewId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Publisher Repository
// ============================================================================

/// Publisher Repository Port
#[async_trait]
pub trait PublisherRepositoryPort: Send + Sync {
    /// 保存出版社（新建或覆盖）
    async fn save(&self, publisher: &Publisher) -> Result<(), RepositoryError>;

    /// 根据 ID 查找出版社
    async fn find_by_id(&self, id: PublisherId) -> Result<Option<Publisher>, RepositoryError>;

    /// 获取所有出版社（按名称排序）
    async fn find_all(&self) -> Result<Vec<Publisher>, RepositoryError>;

    /// 删除出版社，级联删除其图书
    async fn delete(&self, id: PublisherId) -> Result<(), RepositoryError>;
}

// ============================================================================
// Book Repository
// ============================================================================

/// 图书的一条贡献者信息
#[derive(Debug, Clone)]
pub struct BookContribution {
    pub link: BookContributor,
    pub contributor: Contributor,
}

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存图书
    async fn save(&self, book: &Book) -> Result<(), RepositoryError>;

    /// 根据 ID 查找图书
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError>;

    /// 获取所有图书（插入顺序）
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError>;

    /// 删除图书，级联删除书评和贡献者关联
    async fn delete(&self, id: BookId) -> Result<(), RepositoryError>;

    /// 标题包含给定文本（不区分大小写）
    async fn search_by_title(&self, text: &str) -> Result<Vec<Book>, RepositoryError>;

    /// 某贡献者参与的所有图书
    async fn find_by_contributor(
        &self,
        contributor_id: ContributorId,
    ) -> Result<Vec<Book>, RepositoryError>;

    /// 新增图书-贡献者关联
    async fn add_contributor(&self, link: &BookContributor) -> Result<(), RepositoryError>;

    /// 图书的所有贡献者及角色
    async fn find_contributions(
        &self,
        book_id: BookId,
    ) -> Result<Vec<BookContribution>, RepositoryError>;
}

// ============================================================================
// Contributor Repository
// ============================================================================

/// Contributor Repository Port
#[async_trait]
pub trait ContributorRepositoryPort: Send + Sync {
    /// 保存贡献者
    async fn save(&self, contributor: &Contributor) -> Result<(), RepositoryError>;

    /// 根据 ID 查找贡献者
    async fn find_by_id(&self, id: ContributorId) -> Result<Option<Contributor>, RepositoryError>;

    /// 获取所有贡献者（按姓、名排序）
    async fn find_all(&self) -> Result<Vec<Contributor>, RepositoryError>;

    /// 名或姓包含给定文本（不区分大小写）
    async fn search_by_name(&self, text: &str) -> Result<Vec<Contributor>, RepositoryError>;
}

// ============================================================================
// Review Repository
// ============================================================================

/// Review Repository Port
#[async_trait]
pub trait ReviewRepositoryPort: Send + Sync {
    /// 保存书评
    async fn save(&self, review: &Review) -> Result<(), RepositoryError>;

    /// 查找属于指定图书的书评
    async fn find_for_book(
        &self,
        book_id: BookId,
        review_id: ReviewId,
    ) -> Result<Option<Review>, RepositoryError>;

    /// 图书的所有书评（按创建时间）
    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError>;
}
