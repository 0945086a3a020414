use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::api::error::VCloudAPIError;
use crate::api::utils::{optional_attribute, push_attribute, required_attribute, AttributeMap};

/// Relation names the query service puts on containers and rows
pub mod rel {
    /// Next page of the same query
    pub const NEXT_PAGE: &str = "nextPage";
    /// Previous page of the same query
    pub const PREVIOUS_PAGE: &str = "previousPage";
    /// First page of the same query
    pub const FIRST_PAGE: &str = "firstPage";
    /// Last page of the same query
    pub const LAST_PAGE: &str = "lastPage";
    /// Same query in another format
    pub const ALTERNATE: &str = "alternate";
    /// Parent resource
    pub const UP: &str = "up";
    /// Child resource
    pub const DOWN: &str = "down";
    /// Modify the resource
    pub const EDIT: &str = "edit";
    /// Delete the resource
    pub const REMOVE: &str = "remove";
}

/// Minimal representation of a remote entity
#[derive(Builder, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[builder(setter(into), build_fn(error = "VCloudAPIError"))]
pub struct Reference {
    /// Address of the entity, treated as an opaque token
    pub href: String,
    /// Entity identifier
    #[builder(default)]
    pub id: Option<String>,
    /// Media type of the entity
    #[serde(rename = "type")]
    #[builder(default)]
    pub type_: Option<String>,
    /// Display name
    #[builder(default)]
    pub name: Option<String>,
}

impl Reference {
    /// Returns an empty builder, `href` must be set before `build()`
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    /// Returns a builder pre-filled with this reference
    pub fn to_builder(&self) -> ReferenceBuilder {
        let mut builder = ReferenceBuilder::default();
        builder
            .href(self.href.clone())
            .id(self.id.clone())
            .type_(self.type_.clone())
            .name(self.name.clone());
        builder
    }

    pub(crate) fn from_attributes(
        element: &str,
        attributes: &AttributeMap,
    ) -> Result<Self, VCloudAPIError> {
        Ok(Reference {
            href: required_attribute(attributes, element, "href")?,
            id: optional_attribute(attributes, element, "id")?,
            type_: optional_attribute(attributes, element, "type")?,
            name: optional_attribute(attributes, element, "name")?,
        })
    }

    pub(crate) fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("href", self.href.clone())];
        push_attribute(&mut out, "id", &self.id);
        push_attribute(&mut out, "type", &self.type_);
        push_attribute(&mut out, "name", &self.name);
        out
    }
}

/// A named relation from a resource to another resource or action
#[derive(Builder, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[builder(setter(into), build_fn(error = "VCloudAPIError"))]
pub struct Link {
    /// Relation name, see [`rel`]
    pub rel: String,
    /// Target address
    pub href: String,
    #[allow(missing_docs)]
    #[builder(default)]
    pub id: Option<String>,
    /// Media type of the target
    #[serde(rename = "type")]
    #[builder(default)]
    pub type_: Option<String>,
    #[allow(missing_docs)]
    #[builder(default)]
    pub name: Option<String>,
}

impl Link {
    /// Shorthand for a link with only a relation and a target
    pub fn new<R: Into<String>, H: Into<String>>(rel: R, href: H) -> Self {
        Link {
            rel: rel.into(),
            href: href.into(),
            id: None,
            type_: None,
            name: None,
        }
    }

    /// Returns an empty builder, `rel` and `href` must be set before `build()`
    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }

    /// Returns a builder pre-filled with this link
    pub fn to_builder(&self) -> LinkBuilder {
        let mut builder = LinkBuilder::default();
        builder
            .rel(self.rel.clone())
            .href(self.href.clone())
            .id(self.id.clone())
            .type_(self.type_.clone())
            .name(self.name.clone());
        builder
    }

    /// The target as a [`Reference`]
    pub fn reference(&self) -> Reference {
        Reference {
            href: self.href.clone(),
            id: self.id.clone(),
            type_: self.type_.clone(),
            name: self.name.clone(),
        }
    }

    pub(crate) fn from_attributes(attributes: &AttributeMap) -> Result<Self, VCloudAPIError> {
        Ok(Link {
            rel: required_attribute(attributes, "Link", "rel")?,
            href: required_attribute(attributes, "Link", "href")?,
            id: optional_attribute(attributes, "Link", "id")?,
            type_: optional_attribute(attributes, "Link", "type")?,
            name: optional_attribute(attributes, "Link", "name")?,
        })
    }

    pub(crate) fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("rel", self.rel.clone()), ("href", self.href.clone())];
        push_attribute(&mut out, "id", &self.id);
        push_attribute(&mut out, "type", &self.type_);
        push_attribute(&mut out, "name", &self.name);
        out
    }
}
