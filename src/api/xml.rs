use std::collections::BTreeSet;
use std::io::Cursor;
use std::str;

use log::error;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::api::error::VCloudAPIError;
use crate::api::types::entity::Entity;
use crate::api::types::error::ErrorBody;
use crate::api::types::link::{Link, Reference};
use crate::api::types::record::{QueryRecord, RecordKind};
use crate::api::types::records::{QueryResultRecords, QueryResultReferences};
use crate::api::types::resource::{Container, ContainerType};
use crate::api::utils::{local_name, optional_attribute, push_attribute, AttributeMap};

/// Namespace of the vCloud 1.5 schema, written on every root element
pub const VCLOUD_NAMESPACE: &str = "http://www.vmware.com/vcloud/v1.5";

const RECORDS_ROOT: &str = "QueryResultRecords";
const REFERENCES_ROOT: &str = "QueryResultReferences";
const ERROR_ROOT: &str = "Error";
const ENTITY_ROOT: &str = "Entity";
const LINK: &str = "Link";

// Element with its attributes and element children; text is not used by the
// query schema and is dropped.
#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attributes: AttributeMap,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(e: &BytesStart) -> Result<Self, VCloudAPIError> {
        let name_bytes = e.name();
        let name = str::from_utf8(name_bytes.as_ref())
            .map_err(|_| VCloudAPIError::Decode("invalid UTF-8 in element name".to_string()))?;
        let mut attributes = AttributeMap::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref()).map_err(|_| {
                VCloudAPIError::Decode("invalid UTF-8 in attribute name".to_string())
            })?;
            // namespace declarations and schema instance hints are not data
            if key == "xmlns" || key.starts_with("xmlns:") || key.starts_with("xsi:") {
                continue;
            }
            let value = attr
                .unescape_value()
                .map_err(|e| VCloudAPIError::Decode(e.to_string()))?
                .into_owned();
            let local = local_name(key);
            if local.len() == key.len() {
                attributes.insert(key.to_string(), value);
            } else {
                // a prefixed attribute never replaces an unprefixed one
                attributes.entry(local.to_string()).or_insert(value);
            }
        }
        Ok(XmlElement {
            name: local_name(name).to_string(),
            attributes,
            children: Vec::new(),
        })
    }

    fn links(&self) -> Result<BTreeSet<Link>, VCloudAPIError> {
        self.children
            .iter()
            .filter(|c| c.name == LINK)
            .map(|c| Link::from_attributes(&c.attributes))
            .collect()
    }
}

fn parse_document(xml: &str) -> Result<XmlElement, VCloudAPIError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(XmlElement::from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = XmlElement::from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {
                        return Err(VCloudAPIError::Decode(
                            "more than one root element".to_string(),
                        ))
                    }
                }
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    VCloudAPIError::Decode("unbalanced closing tag".to_string())
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {
                        return Err(VCloudAPIError::Decode(
                            "more than one root element".to_string(),
                        ))
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(VCloudAPIError::Decode(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(VCloudAPIError::Decode("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| VCloudAPIError::Decode("empty document".to_string()))
}

fn error_body(root: &XmlElement) -> Result<ErrorBody, VCloudAPIError> {
    let a = &root.attributes;
    Ok(ErrorBody {
        major_error_code: optional_attribute(a, ERROR_ROOT, "majorErrorCode")?,
        minor_error_code: optional_attribute(a, ERROR_ROOT, "minorErrorCode")?,
        message: optional_attribute(a, ERROR_ROOT, "message")?,
        vendor_specific_error_code: optional_attribute(a, ERROR_ROOT, "vendorSpecificErrorCode")?,
        stack_trace: optional_attribute(a, ERROR_ROOT, "stackTrace")?,
    })
}

// An <Error> root becomes an API error, any other unexpected root a decode error.
fn expect_root(root: &XmlElement, expected: &str) -> Result<(), VCloudAPIError> {
    if root.name == expected {
        return Ok(());
    }
    if root.name == ERROR_ROOT {
        let body = error_body(root)?;
        let status = body
            .major_error_code
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(0);
        return Err(body.into_error(status));
    }
    Err(VCloudAPIError::Decode(format!(
        "expected <{}> but found <{}>",
        expected, root.name
    )))
}

fn container_fields(root: &XmlElement) -> Result<ContainerType, VCloudAPIError> {
    let a = &root.attributes;
    let element = root.name.as_str();
    let container = ContainerType {
        href: optional_attribute(a, element, "href")?,
        type_: optional_attribute(a, element, "type")?,
        links: root.links()?,
        name: optional_attribute(a, element, "name")?,
        page: optional_attribute(a, element, "page")?,
        page_size: optional_attribute(a, element, "pageSize")?,
        total: optional_attribute(a, element, "total")?,
    };
    container.check_pagination()?;
    Ok(container)
}

/// Decode a records-format page
///
/// With a single kind `T`, a row of any other kind is a decode error. Use
/// [`QueryResultRecord`](crate::api::types::record::QueryResultRecord) to
/// accept every kind.
pub fn decode_records<T: QueryRecord>(xml: &str) -> Result<QueryResultRecords<T>, VCloudAPIError> {
    let root = parse_document(xml)?;
    expect_root(&root, RECORDS_ROOT)?;
    let container = container_fields(&root)?;

    let mut records = Vec::new();
    for child in root.children.iter().filter(|c| c.name != LINK) {
        records.push(T::decode(&child.name, &child.attributes, child.links()?)?);
    }

    Ok(QueryResultRecords {
        href: container.href,
        type_: container.type_,
        links: container.links,
        name: container.name,
        page: container.page,
        page_size: container.page_size,
        total: container.total,
        records,
    })
}

/// Decode a references-format page
pub fn decode_references(xml: &str) -> Result<QueryResultReferences, VCloudAPIError> {
    let root = parse_document(xml)?;
    expect_root(&root, REFERENCES_ROOT)?;
    let container = container_fields(&root)?;

    let mut references = Vec::new();
    for child in root.children.iter().filter(|c| c.name != LINK) {
        if !child.name.ends_with("Reference") {
            return Err(VCloudAPIError::Decode(format!(
                "{} is not a reference element",
                child.name
            )));
        }
        references.push(Reference::from_attributes(&child.name, &child.attributes)?);
    }

    Ok(QueryResultReferences {
        href: container.href,
        type_: container.type_,
        links: container.links,
        name: container.name,
        page: container.page,
        page_size: container.page_size,
        total: container.total,
        references,
    })
}

/// Decode the answer of the entity resolver
pub fn decode_entity(xml: &str) -> Result<Entity, VCloudAPIError> {
    let root = parse_document(xml)?;
    expect_root(&root, ENTITY_ROOT)?;
    let a = &root.attributes;
    Ok(Entity {
        href: optional_attribute(a, ENTITY_ROOT, "href")?,
        type_: optional_attribute(a, ENTITY_ROOT, "type")?,
        id: optional_attribute(a, ENTITY_ROOT, "id")?,
        name: optional_attribute(a, ENTITY_ROOT, "name")?,
        links: root.links()?,
    })
}

/// Decode an `<Error>` payload
pub fn decode_error(xml: &str) -> Result<ErrorBody, VCloudAPIError> {
    let root = parse_document(xml)?;
    if root.name != ERROR_ROOT {
        return Err(VCloudAPIError::Decode(format!(
            "expected <{}> but found <{}>",
            ERROR_ROOT, root.name
        )));
    }
    error_body(&root)
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn write(writer: &mut XmlWriter, event: Event) -> Result<(), VCloudAPIError> {
    writer.write_event(event).map_err(|e| {
        error!("Unable to write XML: {}", e);
        VCloudAPIError::Encode(e.to_string())
    })
}

fn start_document(
    root: &str,
    container: &impl Container,
) -> Result<XmlWriter, VCloudAPIError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut attributes = vec![("xmlns", VCLOUD_NAMESPACE.to_string())];
    push_attribute(&mut attributes, "href", &container.href().map(str::to_string));
    push_attribute(&mut attributes, "type", &container.type_().map(str::to_string));
    push_attribute(&mut attributes, "name", &container.name().map(str::to_string));
    push_attribute(&mut attributes, "page", &container.page());
    push_attribute(&mut attributes, "pageSize", &container.page_size());
    push_attribute(&mut attributes, "total", &container.total());

    let mut start = BytesStart::new(root);
    for (key, value) in &attributes {
        start.push_attribute((*key, value.as_str()));
    }
    write(&mut writer, Event::Start(start))?;
    write_links(&mut writer, container.links())?;
    Ok(writer)
}

fn write_links(writer: &mut XmlWriter, links: &BTreeSet<Link>) -> Result<(), VCloudAPIError> {
    for link in links {
        write_element(writer, LINK, &link.attributes(), None)?;
    }
    Ok(())
}

fn write_element(
    writer: &mut XmlWriter,
    name: &str,
    attributes: &[(&'static str, String)],
    links: Option<&BTreeSet<Link>>,
) -> Result<(), VCloudAPIError> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        start.push_attribute((*key, value.as_str()));
    }
    match links {
        Some(links) if !links.is_empty() => {
            write(writer, Event::Start(start))?;
            write_links(writer, links)?;
            write(writer, Event::End(BytesEnd::new(name)))
        }
        _ => write(writer, Event::Empty(start)),
    }
}

fn finish_document(mut writer: XmlWriter, root: &str) -> Result<String, VCloudAPIError> {
    write(&mut writer, Event::End(BytesEnd::new(root)))?;
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| VCloudAPIError::Encode(e.to_string()))
}

/// Encode a page in the records format
pub fn encode_records<T: QueryRecord>(
    records: &QueryResultRecords<T>,
) -> Result<String, VCloudAPIError> {
    let mut writer = start_document(RECORDS_ROOT, records)?;
    for record in &records.records {
        write_element(
            &mut writer,
            record.element_name(),
            &record.attributes(),
            Some(record.links()),
        )?;
    }
    finish_document(writer, RECORDS_ROOT)
}

/// Encode a page in the references format
///
/// Rows are written as `<{Kind}Reference>` using the kind named by the
/// container, or a plain `<Reference>` when the kind is unknown.
pub fn encode_references(references: &QueryResultReferences) -> Result<String, VCloudAPIError> {
    let element = references
        .record_kind()
        .map(|k: RecordKind| k.reference_element())
        .unwrap_or_else(|| "Reference".to_string());
    let mut writer = start_document(REFERENCES_ROOT, references)?;
    for reference in &references.references {
        write_element(&mut writer, &element, &reference.attributes(), None)?;
    }
    finish_document(writer, REFERENCES_ROOT)
}
