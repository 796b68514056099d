//! Review Context - Value Objects

use serde::{Deserialize, Serialize};

entity_id! {
    /// 书评唯一标识
    ReviewId
}

/// 书评作者引用
///
/// 由外部身份服务提供的不透明标识，本服务只存储不解析。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatorRef(String);

impl CreatorRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CreatorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
