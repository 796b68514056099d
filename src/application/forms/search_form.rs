//! 搜索表单

use serde::Deserialize;

use super::FormErrors;

pub const SEARCH_MIN_LENGTH: usize = 3;

/// 搜索范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Title,
    Contributor,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Contributor => "contributor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "title" => Some(SearchMode::Title),
            "contributor" => Some(SearchMode::Contributor),
            _ => None,
        }
    }
}

/// 搜索表单原始参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    pub search: Option<String>,
    pub search_in: Option<String>,
}

/// 校验通过的搜索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub text: String,
    pub mode: SearchMode,
}

impl SearchForm {
    pub fn new(search: &str, search_in: &str) -> Self {
        Self {
            search: Some(search.to_string()),
            search_in: Some(search_in.to_string()),
        }
    }

    /// 校验搜索参数
    ///
    /// - `Ok(None)`: 未提供搜索词（合法，但无需查询）
    /// - `Ok(Some(_))`: 可执行的搜索
    /// - `Err(_)`: 搜索词过短或范围无效
    pub fn validate(&self) -> Result<Option<SearchCriteria>, FormErrors> {
        let mut errors = FormErrors::new();

        let text = self.search.as_deref().map(str::trim).unwrap_or_default();
        let count = text.chars().count();
        if count > 0 && count < SEARCH_MIN_LENGTH {
            errors.add(
                "search",
                format!(
                    "Ensure this value has at least {SEARCH_MIN_LENGTH} characters (it has {count})."
                ),
            );
        }

        let mode = match self.search_in.as_deref().map(str::trim) {
            None | Some("") => Some(SearchMode::default()),
            Some(other) => {
                let mode = SearchMode::from_str(other);
                if mode.is_none() {
                    errors.add(
                        "search_in",
                        format!("Select a valid choice. {other} is not one of the available choices."),
                    );
                }
                mode
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(mode.filter(|_| count > 0).map(|mode| SearchCriteria {
            text: text.to_string(),
            mode,
        }))
    }
}
