//! Enumeration choices from TEXTMAP entries

use candb_core::Choices;

use crate::attrs::{int_attr, required_text};
use crate::error::CddResult;
use crate::xml::Element;

/// Collect single-value TEXTMAP entries of a type declaration.
///
/// Ranges (`s != e`) are skipped. Returns `None` rather than an empty map
/// when no entry qualifies.
pub fn load_choices(data_type: &Element, path: &str) -> CddResult<Option<Choices>> {
    let mut choices = Choices::new();

    for (index, text_map) in data_type.children_named("TEXTMAP").enumerate() {
        let map_path = format!("{}/TEXTMAP[{}]", path, index);
        let start: i64 = int_attr(text_map, "s", &map_path)?;
        let end: i64 = int_attr(text_map, "e", &map_path)?;

        if start == end {
            let label = required_text(text_map, "TEXT/TUV", &map_path)?;
            choices.insert(start, label);
        }
    }

    Ok(if choices.is_empty() { None } else { Some(choices) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CddError;
    use crate::xml;
    use pretty_assertions::assert_eq;

    fn choices_of(xml_text: &str) -> CddResult<Option<Choices>> {
        let element = xml::parse(xml_text).unwrap();
        load_choices(&element, "TEXTTBL")
    }

    #[test]
    fn test_single_values_only() {
        let choices = choices_of(
            r#"<TEXTTBL>
                 <TEXTMAP s="0" e="0"><TEXT><TUV>Off</TUV><TUV>Aus</TUV></TEXT></TEXTMAP>
                 <TEXTMAP s="1" e="1"><TEXT><TUV>On</TUV></TEXT></TEXTMAP>
                 <TEXTMAP s="2" e="254"><TEXT><TUV>Reserved</TUV></TEXT></TEXTMAP>
                 <TEXTMAP s="255" e="255"><TEXT><TUV>Invalid</TUV></TEXT></TEXTMAP>
               </TEXTTBL>"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            choices,
            Choices::from([
                (0, "Off".to_string()),
                (1, "On".to_string()),
                (255, "Invalid".to_string()),
            ])
        );
    }

    #[test]
    fn test_only_ranges_gives_none() {
        let choices = choices_of(
            r#"<TEXTTBL><TEXTMAP s="0" e="9"><TEXT><TUV>Low</TUV></TEXT></TEXTMAP></TEXTTBL>"#,
        )
        .unwrap();
        assert_eq!(choices, None);
    }

    #[test]
    fn test_no_text_maps_gives_none() {
        assert_eq!(choices_of("<IDENT/>").unwrap(), None);
    }

    #[test]
    fn test_bad_bound_is_numeric_error() {
        let result = choices_of(
            r#"<TEXTTBL><TEXTMAP s="one" e="1"><TEXT><TUV>x</TUV></TEXT></TEXTMAP></TEXTTBL>"#,
        );
        assert!(matches!(result, Err(CddError::NumericParse { .. })));
    }

    #[test]
    fn test_missing_label_is_schema_violation() {
        let result = choices_of(r#"<TEXTTBL><TEXTMAP s="1" e="1"/></TEXTTBL>"#);
        assert!(matches!(result, Err(CddError::SchemaViolation { .. })));
    }
}
