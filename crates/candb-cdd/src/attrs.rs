//! Lookup helpers for required elements and typed attributes
//!
//! `path` arguments describe the element being read and only feed error
//! messages.

use std::str::FromStr;

use crate::error::{CddError, CddResult};
use crate::xml::Element;

/// Element at `child_path` below `element`, or a schema violation
pub fn required<'a>(element: &'a Element, child_path: &str, path: &str) -> CddResult<&'a Element> {
    element
        .find(child_path)
        .ok_or_else(|| CddError::missing_element(path, child_path))
}

/// Text of the element at `child_path`; an empty element yields ""
pub fn required_text(element: &Element, child_path: &str, path: &str) -> CddResult<String> {
    let found = required(element, child_path, path)?;
    Ok(found.text().unwrap_or_default().to_string())
}

pub fn required_attr<'a>(element: &'a Element, name: &str, path: &str) -> CddResult<&'a str> {
    element
        .attr(name)
        .ok_or_else(|| CddError::missing_attribute(path, name))
}

/// Parse a required attribute as a decimal integer
pub fn int_attr<T: FromStr>(element: &Element, name: &str, path: &str) -> CddResult<T> {
    let raw = required_attr(element, name, path)?;
    parse_number(raw, name, path)
}

/// Parse a required attribute as a float
pub fn float_attr(element: &Element, name: &str, path: &str) -> CddResult<f64> {
    let raw = required_attr(element, name, path)?;
    parse_number(raw, name, path)
}

fn parse_number<T: FromStr>(raw: &str, name: &str, path: &str) -> CddResult<T> {
    raw.trim().parse().map_err(|_| CddError::NumericParse {
        path: path.to_string(),
        attribute: name.to_string(),
        value: raw.to_string(),
    })
}
