// SPDX-License-Identifier: MPL-2.0

//! Tolerant filter description parser
//!
//! The description is a run of `<filter name="..." value="..."/>` elements.
//! Parsing never fails: a bad value resets that field to its default, an
//! unknown name is skipped, and a markup error stops the scan while keeping
//! whatever was read before it.

use super::FilterSpec;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

const FILTER_TAG: &[u8] = b"filter";

/// Parse a filter description into a [`FilterSpec`]
pub fn parse(xml: &str) -> FilterSpec {
    let mut spec = FilterSpec::default();

    if xml.trim().is_empty() {
        return spec;
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if element.name().as_ref() == FILTER_TAG {
                    apply_element(&mut spec, &element);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(
                    position = reader.buffer_position(),
                    error = %e,
                    "Filter markup error, keeping fields parsed so far"
                );
                break;
            }
        }
    }

    spec
}

fn apply_element(spec: &mut FilterSpec, element: &BytesStart<'_>) {
    let mut name: Option<String> = None;
    let mut value: Option<String> = None;

    for attr in element.attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(e) => {
                debug!(error = %e, "Skipping malformed filter attribute");
                continue;
            }
        };
        let Ok(text) = attr.unescape_value() else {
            continue;
        };
        match attr.key.as_ref() {
            b"name" => name = Some(text.into_owned()),
            b"value" => value = Some(text.into_owned()),
            _ => {}
        }
    }

    let Some(name) = name else {
        debug!("Filter element without a name, ignoring");
        return;
    };
    let value = value.as_deref();

    match name.as_str() {
        "brightness" => spec.brightness = parse_factor(value, "brightness"),
        "contrast" => spec.contrast = parse_factor(value, "contrast"),
        "saturation" => spec.saturation = parse_factor(value, "saturation"),
        "sepia" => spec.sepia = value == Some("true"),
        other => debug!(name = other, "Unknown filter name, ignoring"),
    }
}

/// Numeric filter factor; anything missing, non-numeric or non-finite is 1.0
fn parse_factor(value: Option<&str>, field: &str) -> f32 {
    match value.map(str::parse::<f32>) {
        Some(Ok(v)) if v.is_finite() => v,
        _ => {
            debug!(field, value = ?value, "Invalid filter value, using default");
            FilterSpec::DEFAULT_FACTOR
        }
    }
}
