use std::collections::BTreeSet;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;

use crate::api::error::VCloudAPIError;
use crate::api::types::link::{rel, Link};

/// Any addressable API resource
#[serde_as]
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[builder(default, setter(into), build_fn(error = "VCloudAPIError"))]
pub struct ResourceType {
    /// Address of the resource, never parsed by the client
    pub href: Option<String>,
    /// Media type of the representation
    #[serde(rename = "type")]
    pub type_: Option<String>,
    /// Relations to other resources and actions
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[builder(setter(into, each(name = "link")))]
    pub links: BTreeSet<Link>,
}

impl ResourceType {
    /// Returns a builder with every field absent
    pub fn builder() -> ResourceTypeBuilder {
        ResourceTypeBuilder::default()
    }

    /// Returns a builder pre-filled with this resource
    pub fn to_builder(&self) -> ResourceTypeBuilder {
        let mut builder = ResourceTypeBuilder::default();
        builder
            .href(self.href.clone())
            .type_(self.type_.clone())
            .links(self.links.clone());
        builder
    }
}

/// One page of a larger result set
#[serde_as]
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[builder(default, setter(into), build_fn(error = "VCloudAPIError"))]
#[serde(rename_all = "camelCase")]
pub struct ContainerType {
    #[allow(missing_docs)]
    pub href: Option<String>,
    #[allow(missing_docs)]
    #[serde(rename = "type")]
    pub type_: Option<String>,
    #[allow(missing_docs)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[builder(setter(into, each(name = "link")))]
    pub links: BTreeSet<Link>,
    /// Name of the query that produced the page
    pub name: Option<String>,
    /// 1-based page index
    pub page: Option<i32>,
    /// Requested page size
    pub page_size: Option<i32>,
    /// Records across all pages, independent of this page's length
    pub total: Option<i64>,
}

impl ContainerType {
    /// Returns a builder with every field absent
    pub fn builder() -> ContainerTypeBuilder {
        ContainerTypeBuilder::default()
    }

    /// Returns a builder pre-filled with this container
    pub fn to_builder(&self) -> ContainerTypeBuilder {
        let mut builder = ContainerTypeBuilder::default();
        builder
            .href(self.href.clone())
            .type_(self.type_.clone())
            .links(self.links.clone())
            .name(self.name.clone())
            .page(self.page)
            .page_size(self.page_size)
            .total(self.total);
        builder
    }
}

/// Common view over the paginated containers
pub trait Container {
    /// Address of the page
    fn href(&self) -> Option<&str>;
    /// Media type of the page
    fn type_(&self) -> Option<&str>;
    /// Links attached to the page
    fn links(&self) -> &BTreeSet<Link>;
    /// Name of the query
    fn name(&self) -> Option<&str>;
    /// 1-based page index
    fn page(&self) -> Option<i32>;
    /// Page size
    fn page_size(&self) -> Option<i32>;
    /// Total number of records of the query
    fn total(&self) -> Option<i64>;

    /// Whether the server paged the result
    fn is_paginated(&self) -> bool {
        self.page().is_some() || self.page_size().is_some()
    }

    /// First link with the given relation
    fn link_for(&self, relation: &str) -> Option<&Link> {
        self.links().iter().find(|l| l.rel == relation)
    }

    /// Link to the next page, absent on the last one
    fn next_page(&self) -> Option<&Link> {
        self.link_for(rel::NEXT_PAGE)
    }

    /// Pagination metadata without the rows
    fn container(&self) -> ContainerType {
        ContainerType {
            href: self.href().map(str::to_string),
            type_: self.type_().map(str::to_string),
            links: self.links().clone(),
            name: self.name().map(str::to_string),
            page: self.page(),
            page_size: self.page_size(),
            total: self.total(),
        }
    }

    /// Addressing data without pagination metadata
    fn resource(&self) -> ResourceType {
        ResourceType {
            href: self.href().map(str::to_string),
            type_: self.type_().map(str::to_string),
            links: self.links().clone(),
        }
    }

    /// Check the range of the pagination fields the server sent
    fn check_pagination(&self) -> Result<(), VCloudAPIError> {
        if let Some(page) = self.page() {
            if page < 1 {
                return Err(VCloudAPIError::Decode(format!("page must be >= 1, got {}", page)));
            }
        }
        if let Some(size) = self.page_size() {
            if size < 1 {
                return Err(VCloudAPIError::Decode(format!(
                    "pageSize must be >= 1, got {}",
                    size
                )));
            }
        }
        if let Some(total) = self.total() {
            if total < 0 {
                return Err(VCloudAPIError::Decode(format!("total must be >= 0, got {}", total)));
            }
        }
        Ok(())
    }
}

impl Container for ContainerType {
    fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    fn type_(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    fn links(&self) -> &BTreeSet<Link> {
        &self.links
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn page(&self) -> Option<i32> {
        self.page
    }

    fn page_size(&self) -> Option<i32> {
        self.page_size
    }

    fn total(&self) -> Option<i64> {
        self.total
    }
}
