//! Client-side list of knowledge items edited before bot creation.

use chatdock_types::knowledge::{DraftKnowledgeItem, KnowledgeKind, LocalItemId, NewKnowledgeItem};

/// Knowledge items in insertion order.
///
/// Ids are generated locally and never reassigned, so removing an item
/// leaves every other item's id and content untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeList {
    items: Vec<DraftKnowledgeItem>,
}

impl KnowledgeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty item of `kind` and return its id.
    pub fn add(&mut self, kind: KnowledgeKind) -> LocalItemId {
        let id = LocalItemId::new();
        self.items.push(DraftKnowledgeItem {
            id,
            kind,
            content: String::new(),
        });
        id
    }

    /// Replace the content of the item with `id`. Returns false if no such item.
    pub fn update(&mut self, id: LocalItemId, content: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Remove the item with `id`. Returns false if no such item.
    pub fn remove(&mut self, id: LocalItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn get(&self, id: LocalItemId) -> Option<&DraftKnowledgeItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[DraftKnowledgeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items as sent in the bot creation request.
    pub fn to_request_items(&self) -> Vec<NewKnowledgeItem> {
        self.items.iter().map(NewKnowledgeItem::from).collect()
    }
}
