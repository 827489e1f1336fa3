//! candb-cdd - CDD loader for the CAN catalog
//!
//! Reads ECU diagnostic documentation (CDD XML) and produces a
//! [`candb_core::Database`]: one message per diagnostic instance, one signal
//! per data object.
//!
//! # Quick Start
//!
//! ```rust
//! let cdd = r#"<CANDELA><ECUDOC>
//!   <DATATYPES>
//!     <IDENT id="T1"><NAME><TUV>Byte</TUV></NAME>
//!       <CVALUETYPE bl="8" enc="uint" minsz="0" maxsz="255" bo="1"/></IDENT>
//!   </DATATYPES>
//!   <ECU><VAR><DIAGCLASS><DIAGINST>
//!     <QUAL>Msg1</QUAL><STATICVALUE v="256"/>
//!     <SIMPLECOMPCONT><DATAOBJ dtref="T1"><QUAL>Value</QUAL></DATAOBJ></SIMPLECOMPCONT>
//!   </DIAGINST></DIAGCLASS></VAR></ECU>
//! </ECUDOC></CANDELA>"#;
//!
//! let db = candb_cdd::load(cdd).unwrap();
//! let msg = db.message_by_name("Msg1").unwrap();
//! assert_eq!(msg.frame_id, 256);
//! assert_eq!(msg.signals[0].length, 8);
//! ```
//!
//! # Layout
//!
//! ```text
//! root
//!  └─ ECUDOC
//!      ├─ DATATYPES/{IDENT|LINCOMP|TEXTTBL}*
//!      └─ ECU[0]/VAR/DIAGCLASS*/DIAGINST*
//! ```

mod attrs;
pub mod choices;
pub mod datatype;
pub mod error;
pub mod message;
pub mod xml;

use candb_core::Database;
use tracing::debug;

pub use datatype::{DataType, DataTypeKind, TypeTable};
pub use error::{CddError, CddResult};

/// Parse a CDD document into a database
pub fn load(text: &str) -> CddResult<Database> {
    let root = xml::parse(text)?;

    let ecu_doc = attrs::required(&root, "ECUDOC", &root.name)?;
    let data_types = datatype::load_data_types(ecu_doc)?;

    let ecu = attrs::required(ecu_doc, "ECU", "ECUDOC")?;
    let var = attrs::required(ecu, "VAR", "ECUDOC/ECU[0]")?;

    let mut messages = Vec::new();
    for (class_index, diag_class) in var.children_named("DIAGCLASS").enumerate() {
        for (inst_index, diag_inst) in diag_class.children_named("DIAGINST").enumerate() {
            let path = format!(
                "ECUDOC/ECU[0]/VAR/DIAGCLASS[{}]/DIAGINST[{}]",
                class_index, inst_index
            );
            messages.push(message::load_message(diag_inst, &data_types, &path)?);
        }
    }

    debug!(messages = messages.len(), "Loaded CDD database");
    Ok(Database::new(messages))
}

/// Format a database as CDD. Not supported by this format.
pub fn dump(_database: &Database) -> CddResult<String> {
    Err(CddError::Unsupported(
        "writing CDD documents is not implemented".to_string(),
    ))
}
