//! Catalog Context - Entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookContributorId, BookId, ContributorId, ContributorRole, PublisherId};

/// 出版社
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    id: PublisherId,
    name: String,
    website: String,
    email: String,
}

impl Publisher {
    pub fn new(name: String, website: String, email: String) -> Self {
        Self::restore(PublisherId::new(), name, website, email)
    }

    /// 从持久化数据还原
    pub fn restore(id: PublisherId, name: String, website: String, email: String) -> Self {
        Self {
            id,
            name,
            website,
            email,
        }
    }

    /// 覆盖所有可编辑字段
    pub fn update(&mut self, name: String, website: String, email: String) {
        self.name = name;
        self.website = website;
        self.email = email;
    }

    pub fn id(&self) -> PublisherId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// 图书
///
/// 不变量:
/// - 必须属于一个出版社
/// - ISBN 原样存储，不做长度校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    publication_date: NaiveDate,
    isbn: String,
    publisher_id: PublisherId,
}

impl Book {
    pub fn new(
        title: String,
        publication_date: NaiveDate,
        isbn: String,
        publisher_id: PublisherId,
    ) -> Self {
        Self::restore(BookId::new(), title, publication_date, isbn, publisher_id)
    }

    pub fn restore(
        id: BookId,
        title: String,
        publication_date: NaiveDate,
        isbn: String,
        publisher_id: PublisherId,
    ) -> Self {
        Self {
            id,
            title,
            publication_date,
            isbn,
            publisher_id,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publication_date(&self) -> NaiveDate {
        self.publication_date
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn publisher_id(&self) -> PublisherId {
        self.publisher_id
    }

    /// 带连字符的 ISBN-13：`XXX-X-XX-XXXXXX-X`
    ///
    /// 按字符位置切分 0..3, 3..4, 4..6, 6..12, 12..13。
    /// 长度不足 13 时对应段为空，超出部分被丢弃。
    pub fn isbn13(&self) -> String {
        let segment = |start: usize, end: usize| -> String {
            self.isbn.chars().skip(start).take(end - start).collect()
        };
        format!(
            "{}-{}-{}-{}-{}",
            segment(0, 3),
            segment(3, 4),
            segment(4, 6),
            segment(6, 12),
            segment(12, 13)
        )
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.isbn)
    }
}

/// 贡献者（作者、合著者、编辑）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    id: ContributorId,
    first_names: String,
    last_names: String,
    email: String,
}

impl Contributor {
    pub fn new(first_names: String, last_names: String, email: String) -> Self {
        Self::restore(ContributorId::new(), first_names, last_names, email)
    }

    pub fn restore(
        id: ContributorId,
        first_names: String,
        last_names: String,
        email: String,
    ) -> Self {
        Self {
            id,
            first_names,
            last_names,
            email,
        }
    }

    pub fn id(&self) -> ContributorId {
        self.id
    }

    pub fn first_names(&self) -> &str {
        &self.first_names
    }

    pub fn last_names(&self) -> &str {
        &self.last_names
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// 署名形式：`Doe, JA`
    pub fn initialled_name(&self) -> String {
        let initials: String = self
            .first_names
            .split_whitespace()
            .filter_map(|name| name.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        format!("{}, {}", title_case(&self.last_names), initials)
    }
}

impl std::fmt::Display for Contributor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.initialled_name())
    }
}

/// 每个单词首字母大写，其余小写（单词边界为非字母字符）
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}

/// 图书与贡献者的关联
///
/// 同一贡献者可以在同一本书中担任多个角色，不做唯一性约束。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookContributor {
    id: BookContributorId,
    book_id: BookId,
    contributor_id: ContributorId,
    role: ContributorRole,
}

impl BookContributor {
    pub fn new(book_id: BookId, contributor_id: ContributorId, role: ContributorRole) -> Self {
        Self::restore(BookContributorId::new(), book_id, contributor_id, role)
    }

    pub fn restore(
        id: BookContributorId,
        book_id: BookId,
        contributor_id: ContributorId,
        role: ContributorRole,
    ) -> Self {
        Self {
            id,
            book_id,
            contributor_id,
            role,
        }
    }

    pub fn id(&self) -> BookContributorId {
        self.id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn contributor_id(&self) -> ContributorId {
        self.contributor_id
    }

    pub fn role(&self) -> ContributorRole {
        self.role
    }

    /// 展示形式：`Doe, J AUTHOR 9780316769174`
    pub fn describe(&self, contributor: &Contributor, book: &Book) -> String {
        format!(
            "{} {} {}",
            contributor.initialled_name(),
            self.role,
            book.isbn()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_isbn(isbn: &str) -> Book {
        Book::new(
            "The Catcher in the Rye".to_string(),
            NaiveDate::from_ymd_opt(1951, 7, 16).unwrap(),
            isbn.to_string(),
            PublisherId::new(),
        )
    }

    fn contributor(first: &str, last: &str) -> Contributor {
        Contributor::new(first.to_string(), last.to_string(), "jd@example.com".to_string())
    }

    #[test]
    fn test_isbn13_formatting() {
        let book = book_with_isbn("9780316769174");
        assert_eq!(book.isbn13(), "978-0-31-676917-4");
    }

    #[test]
    fn test_isbn13_short_isbn_is_truncated_not_panicking() {
        let book = book_with_isbn("97803");
        assert_eq!(book.isbn13(), "978-0-3--");

        let empty = book_with_isbn("");
        assert_eq!(empty.isbn13(), "----");
    }

    #[test]
    fn test_isbn13_drops_extra_characters() {
        let book = book_with_isbn("9780316769174999");
        assert_eq!(book.isbn13(), "978-0-31-676917-4");
    }

    #[test]
    fn test_initialled_name() {
        assert_eq!(contributor("Jane", "Doe").initialled_name(), "Doe, J");
        assert_eq!(contributor("Jane Ann", "Doe").initialled_name(), "Doe, JA");
    }

    #[test]
    fn test_initialled_name_title_cases_last_names() {
        assert_eq!(
            contributor("jerome david", "salinger").initialled_name(),
            "Salinger, JD"
        );
        assert_eq!(
            contributor("Ann", "VAN DER BERG").initialled_name(),
            "Van Der Berg, A"
        );
        assert_eq!(contributor("sean", "o'neil").initialled_name(), "O'Neil, S");
    }

    #[test]
    fn test_display_forms() {
        let book = book_with_isbn("9780316769174");
        assert_eq!(book.to_string(), "The Catcher in the Rye (9780316769174)");

        let jd = contributor("Jerome David", "Salinger");
        let link = BookContributor::new(book.id(), jd.id(), ContributorRole::Author);
        assert_eq!(link.describe(&jd, &book), "Salinger, JD AUTHOR 9780316769174");
    }

    #[test]
    fn test_publisher_update_keeps_identity() {
        let mut publisher = Publisher::new(
            "Packt".to_string(),
            "https://www.packtpub.com".to_string(),
            "info@packtpub.com".to_string(),
        );
        let id = publisher.id();
        publisher.update(
            "Packt Publishing".to_string(),
            "https://packt.com".to_string(),
            "hello@packt.com".to_string(),
        );
        assert_eq!(publisher.id(), id);
        assert_eq!(publisher.to_string(), "Packt Publishing");
    }
}
