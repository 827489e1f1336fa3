//! Message definitions

use serde::{Deserialize, Serialize};

use crate::signal::Signal;

/// A CAN frame layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub frame_id: u32,

    #[serde(default)]
    pub is_extended_frame: bool,

    pub name: String,

    /// Length in bytes
    pub length: u32,

    #[serde(default)]
    pub senders: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_type: Option<String>,

    /// Cycle time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_time: Option<u32>,

    /// Signals in frame order
    pub signals: Vec<Signal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_name: Option<String>,
}

impl Message {
    /// Create a standard-frame message with no senders, send type or comment
    pub fn new(frame_id: u32, name: impl Into<String>, length: u32, signals: Vec<Signal>) -> Self {
        Self {
            frame_id,
            is_extended_frame: false,
            name: name.into(),
            length,
            senders: Vec::new(),
            send_type: None,
            cycle_time: None,
            signals,
            comment: None,
            bus_name: None,
        }
    }

    /// Find a signal by name
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Total bits covered by the signals
    pub fn bit_length(&self) -> u32 {
        self.signals.iter().map(|s| s.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_defaults() {
        let message = Message::new(0x7E0, "Request", 0, Vec::new());

        assert!(!message.is_extended_frame);
        assert!(message.senders.is_empty());
        assert_eq!(message.send_type, None);
        assert_eq!(message.cycle_time, None);
        assert_eq!(message.comment, None);
        assert_eq!(message.bus_name, None);
        assert_eq!(message.bit_length(), 0);
    }

    #[test]
    fn test_signal_lookup() {
        let message = Message::new(
            1,
            "Status",
            2,
            vec![Signal::new("A", 0, 4), Signal::new("B", 4, 12)],
        );

        assert_eq!(message.signal("B").map(|s| s.start), Some(4));
        assert!(message.signal("C").is_none());
        assert_eq!(message.bit_length(), 16);
    }
}
