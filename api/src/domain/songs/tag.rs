use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub const MAX_TAG_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_tag_name(name)?,
        })
    }
}

/// Lowercased, whitespace-collapsed, capped at `MAX_TAG_LEN` chars.
pub fn normalize_tag_name(raw: &str) -> Result<String, DomainError> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let name: String = collapsed.to_lowercase().chars().take(MAX_TAG_LEN).collect();
    let name = name.trim_end().to_string();
    if name.is_empty() {
        return Err(DomainError::Empty { field: "tag name" });
    }
    Ok(name)
}
