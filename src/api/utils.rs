use std::collections::BTreeMap;

use crate::api::error::VCloudAPIError;

/// Attributes of a single XML element, keyed by local name
pub type AttributeMap = BTreeMap<String, String>;

/// Scalar types that can travel as an XML attribute
pub trait AttributeValue: Sized {
    /// Parse the raw (already unescaped) attribute text
    fn parse_attribute(raw: &str) -> Result<Self, String>;
    /// Render the value the way the server writes it
    fn render_attribute(&self) -> String;
}

impl AttributeValue for String {
    fn parse_attribute(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }

    fn render_attribute(&self) -> String {
        self.clone()
    }
}

impl AttributeValue for bool {
    // xsd:boolean
    fn parse_attribute(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(format!("'{}' is not a boolean", other)),
        }
    }

    fn render_attribute(&self) -> String {
        self.to_string()
    }
}

impl AttributeValue for i32 {
    fn parse_attribute(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse::<i32>()
            .map_err(|e| format!("'{}' is not an int: {}", raw, e))
    }

    fn render_attribute(&self) -> String {
        self.to_string()
    }
}

impl AttributeValue for i64 {
    fn parse_attribute(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse::<i64>()
            .map_err(|e| format!("'{}' is not a long: {}", raw, e))
    }

    fn render_attribute(&self) -> String {
        self.to_string()
    }
}

/// Read an optional attribute, failing on text that does not parse
pub fn optional_attribute<T: AttributeValue>(
    attributes: &AttributeMap,
    element: &str,
    name: &str,
) -> Result<Option<T>, VCloudAPIError> {
    match attributes.get(name) {
        None => Ok(None),
        Some(raw) => T::parse_attribute(raw)
            .map(Some)
            .map_err(|e| VCloudAPIError::Decode(format!("{}/@{}: {}", element, name, e))),
    }
}

/// Read an attribute the schema marks as required
pub fn required_attribute<T: AttributeValue>(
    attributes: &AttributeMap,
    element: &str,
    name: &str,
) -> Result<T, VCloudAPIError> {
    optional_attribute(attributes, element, name)?.ok_or_else(|| {
        VCloudAPIError::Decode(format!("{} is missing required attribute '{}'", element, name))
    })
}

/// Append `name="value"` to an attribute list when the value is present
pub fn push_attribute<T: AttributeValue>(
    out: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: &Option<T>,
) {
    if let Some(v) = value {
        out.push((name, v.render_attribute()));
    }
}

/// Strip a namespace prefix (`vcloud:VMRecord` -> `VMRecord`)
pub(crate) fn local_name(qualified: &str) -> &str {
    match qualified.rsplit_once(':') {
        Some((_, local)) => local,
        None => qualified,
    }
}
