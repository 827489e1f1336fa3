//! Type table: resolved data types from the DATATYPES section
//!
//! Every default a declaration may omit is resolved here, so the message
//! builder only ever sees complete [`DataType`]s.

use std::collections::HashMap;

use candb_core::{ByteOrder, Choices};
use tracing::{debug, warn};

use crate::attrs::{float_attr, int_attr, required, required_attr, required_text};
use crate::choices::load_choices;
use crate::error::{CddError, CddResult};
use crate::xml::Element;

/// Factor used when a declaration has no COMP element
pub const DEFAULT_FACTOR: f64 = 1.0;

/// Offset used when a declaration has no COMP element
pub const DEFAULT_OFFSET: f64 = 0.0;

/// Byte order for any `bo` code not listed in [`BYTE_ORDER_CODES`]
pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::BigEndian;

/// CVALUETYPE `bo` codes with a known byte order
pub const BYTE_ORDER_CODES: &[(&str, ByteOrder)] = &[("21", ByteOrder::LittleEndian)];

/// Map a `bo` attribute value to a byte order
pub fn byte_order_from_code(code: Option<&str>) -> ByteOrder {
    code.map(str::trim)
        .and_then(|code| {
            BYTE_ORDER_CODES
                .iter()
                .find(|(known, _)| *known == code)
                .map(|(_, order)| *order)
        })
        .unwrap_or(DEFAULT_BYTE_ORDER)
}

/// Declaration shape a data type was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTypeKind {
    /// Plain identical (raw = physical) type
    Ident,
    /// Linear compensation type
    LinComp,
    /// Text table (enumeration) type
    TextTbl,
}

impl DataTypeKind {
    /// Scan order of declaration shapes
    pub const ALL: [DataTypeKind; 3] = [
        DataTypeKind::Ident,
        DataTypeKind::LinComp,
        DataTypeKind::TextTbl,
    ];

    pub fn element_name(&self) -> &'static str {
        match self {
            DataTypeKind::Ident => "IDENT",
            DataTypeKind::LinComp => "LINCOMP",
            DataTypeKind::TextTbl => "TEXTTBL",
        }
    }
}

/// A resolved data type declaration
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    pub id: String,
    pub name: String,
    pub kind: DataTypeKind,
    pub bit_length: u32,
    /// Dialect encoding tag (`enc`)
    pub encoding: String,
    pub minimum: i64,
    pub maximum: i64,
    pub choices: Option<Choices>,
    pub byte_order: ByteOrder,
    pub unit: Option<String>,
    pub factor: f64,
    pub offset: f64,
}

/// Type id → data type
pub type TypeTable = HashMap<String, DataType>;

/// Build the type table from an ECUDOC element
pub fn load_data_types(ecu_doc: &Element) -> CddResult<TypeTable> {
    let mut table = TypeTable::new();

    for kind in DataTypeKind::ALL {
        let element_path = format!("DATATYPES/{}", kind.element_name());

        for (index, element) in ecu_doc.find_all(&element_path).into_iter().enumerate() {
            let path = format!("ECUDOC/{}[{}]", element_path, index);
            let data_type = load_data_type(element, kind, &path)?;

            if table.contains_key(&data_type.id) {
                warn!(
                    id = %data_type.id,
                    kind = ?data_type.kind,
                    "Duplicate data type id, keeping first declaration"
                );
                continue;
            }
            table.insert(data_type.id.clone(), data_type);
        }
    }

    debug!(count = table.len(), "Loaded data types");
    Ok(table)
}

fn load_data_type(element: &Element, kind: DataTypeKind, path: &str) -> CddResult<DataType> {
    let id = required_attr(element, "id", path)?.to_string();
    let path = format!("{}[@id={}]", path, id);
    let name = required_text(element, "NAME/TUV", &path)?;

    let ctype = required(element, "CVALUETYPE", &path)?;
    let ctype_path = format!("{}/CVALUETYPE", path);
    let bit_length: u32 = int_attr(ctype, "bl", &ctype_path)?;
    if bit_length == 0 {
        return Err(CddError::schema(&ctype_path, "bit length 'bl' must be positive"));
    }
    let encoding = required_attr(ctype, "enc", &ctype_path)?.to_string();
    let minimum: i64 = int_attr(ctype, "minsz", &ctype_path)?;
    let maximum: i64 = int_attr(ctype, "maxsz", &ctype_path)?;
    let byte_order = byte_order_from_code(ctype.attr("bo"));

    let unit = element
        .find("PVALUETYPE/UNIT")
        .and_then(Element::text)
        .map(str::to_string);

    let choices = load_choices(element, &path)?;

    let (factor, offset) = match element.child("COMP") {
        Some(comp) => {
            let comp_path = format!("{}/COMP", path);
            (
                float_attr(comp, "f", &comp_path)?,
                float_attr(comp, "o", &comp_path)?,
            )
        }
        None => (DEFAULT_FACTOR, DEFAULT_OFFSET),
    };

    Ok(DataType {
        id,
        name,
        kind,
        bit_length,
        encoding,
        minimum,
        maximum,
        choices,
        byte_order,
        unit,
        factor,
        offset,
    })
}
