use std::collections::BTreeSet;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;

use crate::api::error::VCloudAPIError;
use crate::api::types::link::{Link, Reference};
use crate::api::types::urn::Urn;

/// Answer of the entity resolver for a URN
#[serde_as]
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[builder(default, setter(into), build_fn(error = "VCloudAPIError"))]
pub struct Entity {
    #[allow(missing_docs)]
    pub href: Option<String>,
    #[allow(missing_docs)]
    #[serde(rename = "type")]
    pub type_: Option<String>,
    /// The URN that was resolved
    pub id: Option<String>,
    #[allow(missing_docs)]
    pub name: Option<String>,
    /// Links to the resolved entity in its various representations
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[builder(setter(into, each(name = "link")))]
    pub links: BTreeSet<Link>,
}

impl Entity {
    /// Returns a builder with every field absent
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// Returns a builder pre-filled with this entity
    pub fn to_builder(&self) -> EntityBuilder {
        let mut builder = EntityBuilder::default();
        builder
            .href(self.href.clone())
            .type_(self.type_.clone())
            .id(self.id.clone())
            .name(self.name.clone())
            .links(self.links.clone());
        builder
    }

    /// Parsed identifier, if it is a well formed URN
    pub fn urn(&self) -> Option<Urn> {
        self.id.as_deref().and_then(|id| id.parse().ok())
    }

    /// Link to the entity itself, as opposed to its alternate views
    pub fn target(&self) -> Option<Reference> {
        self.links
            .iter()
            .find(|l| l.rel == crate::api::types::link::rel::ALTERNATE)
            .map(Link::reference)
    }
}
