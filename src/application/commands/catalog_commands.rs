//! Catalog Commands - 目录管理

use crate::application::forms::{BookContributorForm, BookForm, ContributorForm};
use crate::domain::catalog::{BookId, ContributorId, PublisherId};

/// 创建贡献者命令
#[derive(Debug, Clone)]
pub struct CreateContributor {
    pub form: ContributorForm,
}

/// 创建图书命令
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub publisher_id: PublisherId,
    pub form: BookForm,
}

/// 为图书添加贡献者命令
#[derive(Debug, Clone)]
pub struct AddBookContributor {
    pub book_id: BookId,
    pub contributor_id: ContributorId,
    pub form: BookContributorForm,
}

/// 删除图书命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: BookId,
}
