//! Catalog Queries

use crate::application::forms::SearchForm;
use crate::domain::catalog::BookId;

/// 列出所有图书（含平均评分与书评数）
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 图书详情
#[derive(Debug, Clone)]
pub struct GetBookDetail {
    pub book_id: BookId,
    /// 提示消息的会话键，详情页会取走该键下的待显示消息
    pub request_key: String,
}

/// 按标题或贡献者搜索图书
#[derive(Debug, Clone)]
pub struct SearchBooks {
    pub form: SearchForm,
}

/// 列出所有出版社
#[derive(Debug, Clone)]
pub struct ListPublishers;

/// 列出所有贡献者
#[derive(Debug, Clone)]
pub struct ListContributors;
