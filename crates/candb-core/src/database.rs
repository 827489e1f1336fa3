//! Database - the container for a loaded catalog

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A loaded message catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Messages in load order
    pub messages: Vec<Message>,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub buses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Database {
    /// Create a database holding only messages
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            nodes: Vec::new(),
            buses: Vec::new(),
            version: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Find the first message with the given name
    pub fn message_by_name(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Find the first message with the given frame id
    pub fn message_by_frame_id(&self, frame_id: u32) -> Option<&Message> {
        self.messages.iter().find(|m| m.frame_id == frame_id)
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signal;
    use pretty_assertions::assert_eq;

    fn sample() -> Database {
        Database::new(vec![
            Message::new(0x100, "Engine", 1, vec![Signal::new("Rpm", 0, 8)]),
            Message::new(0x200, "Gearbox", 1, vec![Signal::new("Gear", 0, 3)]),
            Message::new(0x100, "EngineAlt", 0, Vec::new()),
        ])
    }

    #[test]
    fn test_new_has_no_metadata() {
        let db = Database::new(Vec::new());

        assert!(db.is_empty());
        assert!(db.nodes.is_empty());
        assert!(db.buses.is_empty());
        assert_eq!(db.version, None);
    }

    #[test]
    fn test_lookups() {
        let db = sample();

        assert_eq!(db.len(), 3);
        assert_eq!(db.message_by_name("Gearbox").map(|m| m.frame_id), Some(0x200));
        // First match in load order
        assert_eq!(db.message_by_frame_id(0x100).map(|m| m.name.as_str()), Some("Engine"));
        assert!(db.message_by_name("Body").is_none());
        assert!(db.message_by_frame_id(0x300).is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let db = sample();

        let json = serde_json::to_string(&db).unwrap();
        let back: Database = serde_json::from_str(&json).unwrap();

        assert_eq!(back, db);
    }
}
