//! candb-core - Canonical CAN message/signal catalog
//!
//! The common representation that format loaders (CDD, ...) produce and that
//! frame encoders/decoders consume.
//!
//! # Quick Start
//!
//! ```rust
//! use candb_core::{Database, Message, Signal};
//!
//! let rpm = Signal::new("EngineSpeed", 0, 16).with_scale(0.25, 0.0).with_unit("rpm");
//! let message = Message::new(0x100, "Engine", 2, vec![rpm]);
//! let db = Database::new(vec![message]);
//!
//! let engine = db.message_by_frame_id(0x100).unwrap();
//! assert_eq!(engine.signal("EngineSpeed").unwrap().to_physical(7200), 1800.0);
//! ```

pub mod database;
pub mod message;
pub mod signal;
pub mod types;

pub use database::Database;
pub use message::Message;
pub use signal::Signal;
pub use types::{ByteOrder, Choices};
