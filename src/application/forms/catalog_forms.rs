//! 目录管理表单（贡献者、图书、图书-贡献者关联）

use chrono::NaiveDate;
use serde::Deserialize;

use super::fields::{bounded_text, date, email, required};
use super::FormErrors;
use crate::domain::catalog::ContributorRole;

/// 贡献者表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributorForm {
    pub first_names: Option<String>,
    pub last_names: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContributor {
    pub first_names: String,
    pub last_names: String,
    pub email: String,
}

impl ContributorForm {
    pub fn validate(&self) -> Result<ValidContributor, FormErrors> {
        let mut errors = FormErrors::new();

        let first_names = bounded_text(self.first_names.as_deref(), 50, "first_names", &mut errors);
        let last_names = bounded_text(self.last_names.as_deref(), 50, "last_names", &mut errors);
        let email = email(self.email.as_deref(), "email", &mut errors);

        match (first_names, last_names, email) {
            (Some(first_names), Some(last_names), Some(email)) => Ok(ValidContributor {
                first_names,
                last_names,
                email,
            }),
            _ => Err(errors),
        }
    }
}

/// 图书表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub publication_date: Option<String>,
    pub isbn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBook {
    pub title: String,
    pub publication_date: NaiveDate,
    pub isbn: String,
}

impl BookForm {
    pub fn validate(&self) -> Result<ValidBook, FormErrors> {
        let mut errors = FormErrors::new();

        let title = bounded_text(self.title.as_deref(), 70, "title", &mut errors);
        let publication_date = date(self.publication_date.as_deref(), "publication_date", &mut errors);
        // ISBN 只限制长度，不校验格式
        let isbn = bounded_text(self.isbn.as_deref(), 20, "isbn", &mut errors);

        match (title, publication_date, isbn) {
            (Some(title), Some(publication_date), Some(isbn)) => Ok(ValidBook {
                title,
                publication_date,
                isbn,
            }),
            _ => Err(errors),
        }
    }
}

/// 图书-贡献者关联表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookContributorForm {
    pub role: Option<String>,
}

impl BookContributorForm {
    pub fn validate(&self) -> Result<ContributorRole, FormErrors> {
        let mut errors = FormErrors::new();
        let Some(role) = required(self.role.as_deref(), "role", &mut errors) else {
            return Err(errors);
        };
        ContributorRole::parse(&role).map_err(|_| {
            errors.add(
                "role",
                format!("Select a valid choice. {role} is not one of the available choices."),
            );
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_form() {
        let form = BookForm {
            title: Some("Harry Potter".to_string()),
            publication_date: Some("1997-06-26".to_string()),
            isbn: Some("9780747532699".to_string()),
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.publication_date, NaiveDate::from_ymd_opt(1997, 6, 26).unwrap());
    }

    #[test]
    fn test_book_form_accepts_odd_isbn_lengths() {
        let form = BookForm {
            title: Some("Short".to_string()),
            publication_date: Some("2000-01-01".to_string()),
            isbn: Some("12345".to_string()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_book_form_errors() {
        let form = BookForm {
            title: Some("t".repeat(71)),
            publication_date: Some("yesterday".to_string()),
            isbn: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("publication_date"));
        assert!(errors.has("isbn"));
    }

    #[test]
    fn test_contributor_form() {
        let form = ContributorForm {
            first_names: Some("Jerome David".to_string()),
            last_names: Some("Salinger".to_string()),
            email: Some("jd@example.com".to_string()),
        };
        assert!(form.validate().is_ok());
        assert!(ContributorForm::default().validate().unwrap_err().has("email"));
    }

    #[test]
    fn test_role_choice() {
        let form = BookContributorForm {
            role: Some("EDITOR".to_string()),
        };
        assert_eq!(form.validate().unwrap(), ContributorRole::Editor);

        let form = BookContributorForm {
            role: Some("ILLUSTRATOR".to_string()),
        };
        assert!(form.validate().unwrap_err().has("role"));
    }
}
