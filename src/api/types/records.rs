use std::collections::BTreeSet;
use std::str::FromStr;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;

use crate::api::error::VCloudAPIError;
use crate::api::types::link::{Link, Reference};
use crate::api::types::record::{QueryResultRecord, RecordKind};
use crate::api::types::resource::Container;

/// One page of query rows in the records format
///
/// `T` is either a single record kind (`QueryResultRecords<VmRecord>`) or the
/// mixed [`QueryResultRecord`] when the query may return several kinds.
/// `total` counts the rows of the whole query and is not tied to
/// `records.len()`.
#[serde_as]
#[derive(Builder, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[builder(default, setter(into), build_fn(error = "VCloudAPIError"))]
#[serde(rename_all = "camelCase")]
pub struct QueryResultRecords<T: Clone> {
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
    /// Query type that produced the page
    pub name: Option<String>,
    #[allow(missing_docs)]
    pub page: Option<i32>,
    #[allow(missing_docs)]
    pub page_size: Option<i32>,
    #[allow(missing_docs)]
    pub total: Option<i64>,
    /// Rows of this page, in server order
    #[serde(default)]
    #[builder(setter(into, each(name = "record", into)))]
    pub records: Vec<T>,
}

/// Records of any kind, as returned by the generic query endpoint
pub type MixedRecords = QueryResultRecords<QueryResultRecord>;

impl<T: Clone> Default for QueryResultRecords<T> {
    fn default() -> Self {
        QueryResultRecords {
            href: None,
            type_: None,
            links: BTreeSet::new(),
            name: None,
            page: None,
            page_size: None,
            total: None,
            records: Vec::new(),
        }
    }
}

impl<T: Clone> QueryResultRecords<T> {
    /// Returns a builder with every field absent and no rows
    pub fn builder() -> QueryResultRecordsBuilder<T> {
        QueryResultRecordsBuilder::default()
    }

    /// Returns a builder pre-filled with this page
    pub fn to_builder(&self) -> QueryResultRecordsBuilder<T> {
        let mut builder = QueryResultRecordsBuilder::default();
        builder
            .href(self.href.clone())
            .type_(self.type_.clone())
            .links(self.links.clone())
            .name(self.name.clone())
            .page(self.page)
            .page_size(self.page_size)
            .total(self.total)
            .records(self.records.clone());
        builder
    }

    /// Number of rows on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the rows of this page
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Widen every row into the mixed representation
    pub fn into_mixed(self) -> MixedRecords
    where
        T: Into<QueryResultRecord>,
    {
        QueryResultRecords {
            href: self.href,
            type_: self.type_,
            links: self.links,
            name: self.name,
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            records: self.records.into_iter().map(Into::into).collect(),
        }
    }
}

impl MixedRecords {
    /// Narrow a mixed page to a single kind
    ///
    /// Fails with a decode error on the first row of another kind.
    pub fn narrow<U>(self) -> Result<QueryResultRecords<U>, VCloudAPIError>
    where
        U: Clone + TryFrom<QueryResultRecord, Error = VCloudAPIError>,
    {
        let records = self
            .records
            .into_iter()
            .map(U::try_from)
            .collect::<Result<Vec<U>, VCloudAPIError>>()?;
        Ok(QueryResultRecords {
            href: self.href,
            type_: self.type_,
            links: self.links,
            name: self.name,
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            records,
        })
    }

    /// Rows whose kind matches
    pub fn of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &QueryResultRecord> + '_ {
        use crate::api::types::record::QueryRecord;
        self.records.iter().filter(move |r| r.kind() == kind)
    }
}

impl<T: Clone> IntoIterator for QueryResultRecords<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a QueryResultRecords<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T: Clone> Container for QueryResultRecords<T> {
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

/// One page of query rows in the references format
#[serde_as]
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[builder(default, setter(into), build_fn(error = "VCloudAPIError"))]
#[serde(rename_all = "camelCase")]
pub struct QueryResultReferences {
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
    /// Query type that produced the page
    pub name: Option<String>,
    #[allow(missing_docs)]
    pub page: Option<i32>,
    #[allow(missing_docs)]
    pub page_size: Option<i32>,
    #[allow(missing_docs)]
    pub total: Option<i64>,
    /// References of this page, in server order
    #[serde(default)]
    #[builder(setter(into, each(name = "reference")))]
    pub references: Vec<Reference>,
}

impl QueryResultReferences {
    /// Returns a builder with every field absent and no references
    pub fn builder() -> QueryResultReferencesBuilder {
        QueryResultReferencesBuilder::default()
    }

    /// Returns a builder pre-filled with this page
    pub fn to_builder(&self) -> QueryResultReferencesBuilder {
        let mut builder = QueryResultReferencesBuilder::default();
        builder
            .href(self.href.clone())
            .type_(self.type_.clone())
            .links(self.links.clone())
            .name(self.name.clone())
            .page(self.page)
            .page_size(self.page_size)
            .total(self.total)
            .references(self.references.clone());
        builder
    }

    /// Kind named by the query, when it is a known one
    pub fn record_kind(&self) -> Option<RecordKind> {
        self.name
            .as_deref()
            .and_then(|name| RecordKind::from_str(name).ok())
    }

    /// Number of references on this page
    pub fn len(&self) -> usize {
        self.references.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Iterate over the references of this page
    pub fn iter(&self) -> std::slice::Iter<'_, Reference> {
        self.references.iter()
    }
}

impl Container for QueryResultReferences {
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
