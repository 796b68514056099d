//! Review Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CreatorRef, ReviewId};
use crate::domain::catalog::BookId;

/// Review 聚合根
///
/// 不变量:
/// - created_at 创建时设置，之后不可变
/// - edited_at 创建时为空，每次编辑保存时更新为当前时间
/// - 评分范围只在表单边界校验，存储层不限制
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    book_id: BookId,
    creator: CreatorRef,
    content: String,
    rating: i32,
    created_at: DateTime<Utc>,
    edited_at: Option<DateTime<Utc>>,
}

impl Review {
    /// 创建新书评
    pub fn new(book_id: BookId, creator: CreatorRef, content: String, rating: i32) -> Self {
        Self {
            id: ReviewId::new(),
            book_id,
            creator,
            content,
            rating,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    /// 从持久化数据还原
    pub fn restore(
        id: ReviewId,
        book_id: BookId,
        creator: CreatorRef,
        content: String,
        rating: i32,
        created_at: DateTime<Utc>,
        edited_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            book_id,
            creator,
            content,
            rating,
            created_at,
            edited_at,
        }
    }

    /// 编辑书评内容，并记录编辑时间
    pub fn revise(&mut self, creator: CreatorRef, content: String, rating: i32) {
        self.creator = creator;
        self.content = content;
        self.rating = rating;
        self.edited_at = Some(Utc::now());
    }

    /// 重新绑定所属图书
    pub fn bind_to(&mut self, book_id: BookId) {
        self.book_id = book_id;
    }

    // Getters
    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn creator(&self) -> &CreatorRef {
        &self.creator
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.edited_at
    }

    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review() -> Review {
        Review::new(
            BookId::new(),
            CreatorRef::new("alice"),
            "A fine read.".to_string(),
            4,
        )
    }

    #[test]
    fn test_new_review_is_not_edited() {
        let review = review();
        assert!(review.edited_at().is_none());
        assert!(!review.is_edited());
        assert!(review.created_at() <= Utc::now());
    }

    #[test]
    fn test_revise_sets_edit_timestamp_and_keeps_creation() {
        let mut review = review();
        let created_at = review.created_at();
        let book_id = review.book_id();

        review.revise(CreatorRef::new("alice"), "Even better on re-read.".to_string(), 5);

        assert!(review.edited_at().is_some());
        assert!(review.edited_at().unwrap() >= created_at);
        assert_eq!(review.created_at(), created_at);
        assert_eq!(review.book_id(), book_id);
        assert_eq!(review.rating(), 5);
    }

    #[test]
    fn test_every_revision_moves_edit_timestamp() {
        let mut review = review();
        review.revise(CreatorRef::new("alice"), "first".to_string(), 3);
        let first = review.edited_at().unwrap();
        review.revise(CreatorRef::new("alice"), "second".to_string(), 2);
        assert!(review.edited_at().unwrap() >= first);
        assert_eq!(review.content(), "second");
    }
}
