use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Kind of training material attached to a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeKind {
    Url,
    File,
    Text,
}

impl fmt::Display for KnowledgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeKind::Url => write!(f, "url"),
            KnowledgeKind::File => write!(f, "file"),
            KnowledgeKind::Text => write!(f, "text"),
        }
    }
}

impl FromStr for KnowledgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "url" => Ok(KnowledgeKind::Url),
            "file" => Ok(KnowledgeKind::File),
            "text" => Ok(KnowledgeKind::Text),
            other => Err(format!("invalid knowledge kind: '{other}'")),
        }
    }
}

/// A knowledge item stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: KnowledgeKind,
    pub content: String,
}

/// A knowledge item as sent in `POST /bot` (the backend assigns ids).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKnowledgeItem {
    #[serde(rename = "type")]
    pub kind: KnowledgeKind,
    pub content: String,
}

/// Client-side identifier of a knowledge item that has not been submitted.
///
/// UUID v7, so ids are unique and sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalItemId(pub Uuid);

impl LocalItemId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for LocalItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A knowledge item being edited before bot creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftKnowledgeItem {
    pub id: LocalItemId,
    pub kind: KnowledgeKind,
    pub content: String,
}

impl From<&DraftKnowledgeItem> for NewKnowledgeItem {
    fn from(item: &DraftKnowledgeItem) -> Self {
        Self {
            kind: item.kind,
            content: item.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("URL".parse::<KnowledgeKind>().unwrap(), KnowledgeKind::Url);
        assert!("video".parse::<KnowledgeKind>().is_err());
    }

    #[test]
    fn test_item_uses_type_key() {
        let json = r#"{"id": "k-1", "type": "file", "content": "handbook.pdf"}"#;
        let item: KnowledgeItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, KnowledgeKind::File);
        assert_eq!(item.content, "handbook.pdf");
    }

    #[test]
    fn test_local_ids_are_distinct() {
        let a = LocalItemId::new();
        let b = LocalItemId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_draft_converts_without_id() {
        let draft = DraftKnowledgeItem {
            id: LocalItemId::new(),
            kind: KnowledgeKind::Url,
            content: "https://acme.test".to_string(),
        };
        let new: NewKnowledgeItem = (&draft).into();
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value, serde_json::json!({"type": "url", "content": "https://acme.test"}));
    }
}
