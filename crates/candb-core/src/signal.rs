//! Signal definitions
//!
//! A signal is one bit field inside a CAN frame, with the linear scaling that
//! turns its raw value into a physical one.

use serde::{Deserialize, Serialize};

use crate::types::{ByteOrder, Choices};

/// A single signal within a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,

    /// Start bit within the message
    pub start: u32,

    /// Length in bits
    pub length: u32,

    /// Receiving nodes
    #[serde(default)]
    pub receivers: Vec<String>,

    #[serde(default)]
    pub byte_order: ByteOrder,

    #[serde(default)]
    pub is_signed: bool,

    /// Scale factor: physical = raw * scale + offset
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Offset: physical = raw * scale + offset
    #[serde(default)]
    pub offset: f64,

    /// Minimum raw value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,

    /// Maximum raw value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Labels for discrete raw values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Choices>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Raw value is an IEEE 754 float rather than an integer
    #[serde(default)]
    pub is_float: bool,
}

fn default_scale() -> f64 {
    1.0
}

impl Signal {
    /// Create an unscaled, unsigned little-endian signal
    pub fn new(name: impl Into<String>, start: u32, length: u32) -> Self {
        Self {
            name: name.into(),
            start,
            length,
            receivers: Vec::new(),
            byte_order: ByteOrder::LittleEndian,
            is_signed: false,
            scale: 1.0,
            offset: 0.0,
            minimum: None,
            maximum: None,
            unit: None,
            choices: None,
            comment: None,
            is_float: false,
        }
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Add scale/offset
    pub fn with_scale(mut self, scale: f64, offset: f64) -> Self {
        self.scale = scale;
        self.offset = offset;
        self
    }

    /// Add min/max raw bounds
    pub fn with_bounds(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_choices(mut self, choices: Choices) -> Self {
        self.choices = Some(choices);
        self
    }

    /// First bit after this signal
    pub fn end(&self) -> u32 {
        self.start + self.length
    }

    /// Convert a raw value to its physical value
    pub fn to_physical(&self, raw: i64) -> f64 {
        raw as f64 * self.scale + self.offset
    }

    /// Look up the label for a raw value
    pub fn choice(&self, raw: i64) -> Option<&str> {
        self.choices
            .as_ref()
            .and_then(|choices| choices.get(&raw))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signal_defaults() {
        let signal = Signal::new("Speed", 8, 16);

        assert_eq!(signal.byte_order, ByteOrder::LittleEndian);
        assert!(!signal.is_signed);
        assert!(!signal.is_float);
        assert_eq!(signal.scale, 1.0);
        assert_eq!(signal.offset, 0.0);
        assert!(signal.receivers.is_empty());
        assert_eq!(signal.choices, None);
        assert_eq!(signal.end(), 24);
    }

    #[test]
    fn test_to_physical() {
        // Coolant temperature: raw 132 → 132 - 40 = 92°C
        let signal = Signal::new("Coolant", 0, 8).with_scale(1.0, -40.0);
        assert_eq!(signal.to_physical(132), 92.0);

        let signal = Signal::new("Rpm", 0, 16).with_scale(0.25, 0.0);
        assert_eq!(signal.to_physical(7200), 1800.0);
    }

    #[test]
    fn test_choice_lookup() {
        let signal = Signal::new("Gear", 0, 3).with_choices(Choices::from([
            (0, "P".to_string()),
            (1, "R".to_string()),
            (2, "N".to_string()),
            (3, "D".to_string()),
        ]));

        assert_eq!(signal.choice(3), Some("D"));
        assert_eq!(signal.choice(7), None);
        assert_eq!(Signal::new("Plain", 0, 8).choice(0), None);
    }

    #[test]
    fn test_serde_skips_absent_fields() {
        let signal = Signal::new("Raw", 0, 8);
        let value = serde_json::to_value(&signal).unwrap();

        assert!(value.get("unit").is_none());
        assert!(value.get("choices").is_none());
        assert_eq!(value["byte_order"], "little_endian");

        let back: Signal = serde_json::from_value(value).unwrap();
        assert_eq!(back, signal);
    }
}
