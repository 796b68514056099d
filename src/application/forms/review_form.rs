//! 书评表单
//!
//! 可编辑字段只有 content / rating / creator。
//! 所属图书与时间戳不在表单中，提交内容无法改写它们。

use serde::Deserialize;

use super::fields::{integer, required};
use super::FormErrors;
use crate::domain::review::CreatorRef;

pub const RATING_MIN: i64 = 0;
pub const RATING_MAX: i64 = 5;

/// 书评表单原始提交
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewForm {
    pub content: Option<String>,
    pub rating: Option<String>,
    pub creator: Option<String>,
}

/// 校验通过的书评字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    pub content: String,
    pub rating: i32,
    pub creator: CreatorRef,
}

impl ReviewForm {
    pub fn new(content: &str, rating: &str, creator: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            rating: Some(rating.to_string()),
            creator: Some(creator.to_string()),
        }
    }

    pub fn validate(&self) -> Result<ValidReview, FormErrors> {
        let mut errors = FormErrors::new();

        let content = required(self.content.as_deref(), "content", &mut errors);
        let rating = integer(self.rating.as_deref(), "rating", &mut errors).and_then(|rating| {
            if rating < RATING_MIN {
                errors.add(
                    "rating",
                    format!("Ensure this value is greater than or equal to {RATING_MIN}."),
                );
                None
            } else if rating > RATING_MAX {
                errors.add(
                    "rating",
                    format!("Ensure this value is less than or equal to {RATING_MAX}."),
                );
                None
            } else {
                i32::try_from(rating).ok()
            }
        });
        let creator = required(self.creator.as_deref(), "creator", &mut errors);

        match (content, rating, creator) {
            (Some(content), Some(rating), Some(creator)) if errors.is_empty() => Ok(ValidReview {
                content,
                rating,
                creator: CreatorRef::new(creator),
            }),
            _ => Err(errors),
        }
    }
}
