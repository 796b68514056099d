//! Catalog Context - Value Objects

use serde::{Deserialize, Serialize};

use super::CatalogError;

entity_id! {
    /// 出版社唯一标识
    PublisherId
}

entity_id! {
    /// 图书唯一标识
    BookId
}

entity_id! {
    /// 贡献者唯一标识
    ContributorId
}

entity_id! {
    /// 图书-贡献者关联唯一标识
    BookContributorId
}

/// 贡献者在图书中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributorRole {
    Author,
    CoAuthor,
    Editor,
}

impl ContributorRole {
    pub const ALL: [ContributorRole; 3] = [Self::Author, Self::CoAuthor, Self::Editor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "AUTHOR",
            Self::CoAuthor => "CO_AUTHOR",
            Self::Editor => "EDITOR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::CoAuthor => "Co-Author",
            Self::Editor => "Editor",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidRole(s.to_string()))
    }
}

impl std::fmt::Display for ContributorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(ContributorRole::parse("CO_AUTHOR").unwrap(), ContributorRole::CoAuthor);
        assert!(ContributorRole::parse("author").is_err());
        assert!(ContributorRole::parse("TRANSLATOR").is_err());
    }

    #[test]
    fn test_role_serde_uses_stored_names() {
        let json = serde_json::to_string(&ContributorRole::CoAuthor).unwrap();
        assert_eq!(json, "\"CO_AUTHOR\"");
        assert_eq!(ContributorRole::Editor.label(), "Editor");
    }
}
