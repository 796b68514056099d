//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::forms::BookForm;
use crate::application::{
    BookContribution, BookDetail, BookListing, FormErrors, Notification, PublisherEditorContext,
    ReviewEditorContext, SavedPublisher, SavedReview, SearchResults,
};
use crate::domain::catalog::{Book, Contributor, Publisher};
use crate::domain::review::Review;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Catalog DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PublisherResponse {
    pub id: Uuid,
    pub name: String,
    pub website: String,
    pub email: String,
}

impl From<&Publisher> for PublisherResponse {
    fn from(publisher: &Publisher) -> Self {
        Self {
            id: publisher.id().as_uuid(),
            name: publisher.name().to_string(),
            website: publisher.website().to_string(),
            email: publisher.email().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub publication_date: String,
    pub isbn: String,
    /// 带连字符的 ISBN-13
    pub isbn13: String,
    pub publisher_id: Uuid,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id().as_uuid(),
            title: book.title().to_string(),
            publication_date: book.publication_date().format("%Y-%m-%d").to_string(),
            isbn: book.isbn().to_string(),
            isbn13: book.isbn13(),
            publisher_id: book.publisher_id().as_uuid(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContributorResponse {
    pub id: Uuid,
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub initialled_name: String,
}

impl From<&Contributor> for ContributorResponse {
    fn from(contributor: &Contributor) -> Self {
        Self {
            id: contributor.id().as_uuid(),
            first_names: contributor.first_names().to_string(),
            last_names: contributor.last_names().to_string(),
            email: contributor.email().to_string(),
            initialled_name: contributor.initialled_name(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContributionResponse {
    pub id: Uuid,
    pub role: String,
    pub role_label: String,
    pub contributor: ContributorResponse,
}

impl From<&BookContribution> for ContributionResponse {
    fn from(contribution: &BookContribution) -> Self {
        Self {
            id: contribution.link.id().as_uuid(),
            role: contribution.link.role().as_str().to_string(),
            role_label: contribution.link.role().label().to_string(),
            contributor: ContributorResponse::from(&contribution.contributor),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub creator: String,
    pub content: String,
    pub rating: i32,
    pub created_at: String,
    pub edited_at: Option<String>,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id().as_uuid(),
            book_id: review.book_id().as_uuid(),
            creator: review.creator().to_string(),
            content: review.content().to_string(),
            rating: review.rating(),
            created_at: review.created_at().to_rfc3339(),
            edited_at: review.edited_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookListingResponse {
    pub book: BookResponse,
    pub rating: Option<f64>,
    pub number_of_reviews: usize,
}

impl From<&BookListing> for BookListingResponse {
    fn from(listing: &BookListing) -> Self {
        Self {
            book: BookResponse::from(&listing.book),
            rating: listing.rating,
            number_of_reviews: listing.number_of_reviews,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookDetailResponse {
    pub book: BookResponse,
    pub publisher: Option<PublisherResponse>,
    pub contributors: Vec<ContributionResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub rating: Option<f64>,
    pub messages: Vec<Notification>,
}

impl From<BookDetail> for BookDetailResponse {
    fn from(detail: BookDetail) -> Self {
        Self {
            book: BookResponse::from(&detail.book),
            publisher: detail.publisher.as_ref().map(PublisherResponse::from),
            contributors: detail.contributions.iter().map(ContributionResponse::from).collect(),
            reviews: detail.reviews.iter().map(ReviewResponse::from).collect(),
            rating: detail.rating,
            messages: detail.messages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_text: String,
    pub books: Vec<BookResponse>,
    pub errors: FormErrors,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            books: results.books.iter().map(BookResponse::from).collect(),
            search_text: results.search_text,
            errors: results.errors,
        }
    }
}

// ============================================================================
// Editor DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReviewEditorResponse {
    pub model_type: &'static str,
    pub related_model_type: &'static str,
    pub book: BookResponse,
    pub review: Option<ReviewResponse>,
}

impl From<&ReviewEditorContext> for ReviewEditorResponse {
    fn from(context: &ReviewEditorContext) -> Self {
        Self {
            model_type: context.model_type,
            related_model_type: context.related_model_type,
            book: BookResponse::from(&context.book),
            review: context.review.as_ref().map(ReviewResponse::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublisherEditorResponse {
    pub model_type: &'static str,
    pub publisher: Option<PublisherResponse>,
    pub messages: Vec<Notification>,
}

impl From<PublisherEditorContext> for PublisherEditorResponse {
    fn from(context: PublisherEditorContext) -> Self {
        Self {
            model_type: context.model_type,
            publisher: context.publisher.as_ref().map(PublisherResponse::from),
            messages: context.messages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavedReviewResponse {
    pub review: ReviewResponse,
    pub created: bool,
    pub message: String,
    pub redirect: String,
}

impl From<SavedReview> for SavedReviewResponse {
    fn from(saved: SavedReview) -> Self {
        Self {
            review: ReviewResponse::from(&saved.review),
            created: saved.created,
            message: saved.message,
            redirect: saved.redirect,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavedPublisherResponse {
    pub publisher: PublisherResponse,
    pub created: bool,
    pub message: String,
    pub redirect: String,
}

impl From<SavedPublisher> for SavedPublisherResponse {
    fn from(saved: SavedPublisher) -> Self {
        Self {
            publisher: PublisherResponse::from(&saved.publisher),
            created: saved.created,
            message: saved.message,
            redirect: saved.redirect,
        }
    }
}

// ============================================================================
// Admin DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub publisher_id: Uuid,
    #[serde(flatten)]
    pub book: BookForm,
}

#[derive(Debug, Deserialize)]
pub struct AddBookContributorRequest {
    pub contributor_id: Uuid,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookContributorResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub contributor_id: Uuid,
    pub role: String,
}
