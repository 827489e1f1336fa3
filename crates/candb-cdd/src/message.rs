//! Message builder: one catalog message per DIAGINST

use candb_core::{ByteOrder, Message, Signal};
use tracing::trace;

use crate::attrs::{int_attr, required, required_attr, required_text};
use crate::datatype::TypeTable;
use crate::error::{CddError, CddResult};
use crate::xml::Element;

/// Byte order of every emitted signal, whatever the data type declares
pub const SIGNAL_BYTE_ORDER: ByteOrder = ByteOrder::LittleEndian;

/// Signedness of every emitted signal, whatever the encoding tag says
pub const SIGNAL_IS_SIGNED: bool = false;

/// Data object locations below a DIAGINST, concatenated in this order
const DATA_OBJECT_PATHS: [&str; 2] = [
    "SIMPLECOMPCONT/DATAOBJ",
    "SIMPLECOMPCONT/UNION/STRUCT/DATAOBJ",
];

/// Data objects of a diagnostic instance from every supported layout
pub fn data_objects(diag_inst: &Element) -> Vec<&Element> {
    DATA_OBJECT_PATHS
        .iter()
        .flat_map(|path| diag_inst.find_all(path))
        .collect()
}

/// Build a message from a DIAGINST element
pub fn load_message(diag_inst: &Element, data_types: &TypeTable, path: &str) -> CddResult<Message> {
    let name = required_text(diag_inst, "QUAL", path)?;
    let path = format!("{}[{}]", path, name);

    let static_value = required(diag_inst, "STATICVALUE", &path)?;
    let frame_id: u32 = int_attr(static_value, "v", &format!("{}/STATICVALUE", path))?;

    let mut offset = 0u32;
    let mut signals = Vec::new();

    for (index, data_obj) in data_objects(diag_inst).into_iter().enumerate() {
        let obj_path = format!("{}/DATAOBJ[{}]", path, index);
        let signal = load_signal(data_obj, offset, data_types, &obj_path)?;
        offset = offset
            .checked_add(signal.length)
            .ok_or_else(|| CddError::schema(&obj_path, "message bit length overflows"))?;
        signals.push(signal);
    }

    let length = offset.div_ceil(8);
    trace!(name = %name, frame_id, signals = signals.len(), length, "Loaded message");

    Ok(Message::new(frame_id, name, length, signals))
}

fn load_signal(
    data_obj: &Element,
    offset: u32,
    data_types: &TypeTable,
    path: &str,
) -> CddResult<Signal> {
    let dtref = required_attr(data_obj, "dtref", path)?;
    let data_type = data_types
        .get(dtref)
        .ok_or_else(|| CddError::UnresolvedTypeReference {
            dtref: dtref.to_string(),
            path: path.to_string(),
        })?;
    let name = required_text(data_obj, "QUAL", path)?;

    let mut signal = Signal::new(name, offset, data_type.bit_length)
        .with_byte_order(SIGNAL_BYTE_ORDER)
        .with_scale(data_type.factor, data_type.offset)
        .with_bounds(data_type.minimum, data_type.maximum);
    signal.is_signed = SIGNAL_IS_SIGNED;
    signal.unit = data_type.unit.clone();
    signal.choices = data_type.choices.clone();

    Ok(signal)
}
