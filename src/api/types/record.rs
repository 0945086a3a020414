use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::error::VCloudAPIError;
use crate::api::types::catalog::CatalogRecord;
use crate::api::types::datastore::DatastoreRecord;
use crate::api::types::link::Link;
use crate::api::types::media::MediaRecord;
use crate::api::types::network::NetworkRecord;
use crate::api::types::role::{RightRecord, RoleRecord};
use crate::api::types::user::{GroupRecord, StrandedUserRecord, UserRecord};
use crate::api::types::vapp::{VAppRecord, VAppTemplateRecord};
use crate::api::types::vdc::AdminVdcRecord;
use crate::api::types::vm::VmRecord;
use crate::api::utils::AttributeMap;

/// Declares a flat query record: the struct, its builder and the
/// [`QueryRecord`] wire mapping. Every kind-specific attribute is optional.
macro_rules! query_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($builder:ident) for $kind:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident: $ty:ty => $attr:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[serde_with::serde_as]
        #[derive(
            derive_builder::Builder,
            Default,
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize
        )]
        #[builder(
            default,
            setter(into),
            build_fn(error = "crate::api::error::VCloudAPIError")
        )]
        pub struct $name {
            /// Address of the queried entity
            pub href: Option<String>,
            /// Entity identifier
            pub id: Option<String>,
            /// Media type of the queried entity
            #[serde(rename = "type")]
            pub type_: Option<String>,
            /// Links attached to the row
            #[serde_as(deserialize_as = "serde_with::DefaultOnNull")]
            #[serde(default)]
            #[builder(setter(into, each(name = "link")))]
            pub links: std::collections::BTreeSet<crate::api::types::link::Link>,
            $(
                $(#[$fmeta])*
                #[serde(rename = $attr)]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// Returns a builder with every field absent
            pub fn builder() -> $builder {
                $builder::default()
            }

            /// Returns a builder pre-filled with this record
            pub fn to_builder(&self) -> $builder {
                let mut builder = $builder::default();
                builder
                    .href(self.href.clone())
                    .id(self.id.clone())
                    .type_(self.type_.clone())
                    .links(self.links.clone())
                    $( .$field(self.$field.clone()) )*;
                builder
            }
        }

        impl crate::api::types::record::QueryRecord for $name {
            fn query_kind() -> Option<crate::api::types::record::RecordKind> {
                Some(crate::api::types::record::RecordKind::$kind)
            }

            fn decode(
                element: &str,
                attributes: &crate::api::utils::AttributeMap,
                links: std::collections::BTreeSet<crate::api::types::link::Link>,
            ) -> Result<Self, crate::api::error::VCloudAPIError> {
                let expected = crate::api::types::record::RecordKind::$kind.element();
                if element != expected {
                    return Err(crate::api::error::VCloudAPIError::Decode(format!(
                        "expected {} but found {}",
                        expected, element
                    )));
                }
                Ok($name {
                    href: crate::api::utils::optional_attribute(attributes, element, "href")?,
                    id: crate::api::utils::optional_attribute(attributes, element, "id")?,
                    type_: crate::api::utils::optional_attribute(attributes, element, "type")?,
                    links,
                    $(
                        $field: crate::api::utils::optional_attribute(attributes, element, $attr)?,
                    )*
                })
            }

            fn kind(&self) -> crate::api::types::record::RecordKind {
                crate::api::types::record::RecordKind::$kind
            }

            fn attributes(&self) -> Vec<(&'static str, String)> {
                let mut out = Vec::new();
                crate::api::utils::push_attribute(&mut out, "href", &self.href);
                crate::api::utils::push_attribute(&mut out, "id", &self.id);
                crate::api::utils::push_attribute(&mut out, "type", &self.type_);
                $( crate::api::utils::push_attribute(&mut out, $attr, &self.$field); )*
                out
            }

            fn href(&self) -> Option<&str> {
                self.href.as_deref()
            }

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn type_(&self) -> Option<&str> {
                self.type_.as_deref()
            }

            fn links(&self) -> &std::collections::BTreeSet<crate::api::types::link::Link> {
                &self.links
            }
        }

        impl From<$name> for crate::api::types::record::QueryResultRecord {
            fn from(record: $name) -> Self {
                crate::api::types::record::QueryResultRecord::$kind(record)
            }
        }

        impl TryFrom<crate::api::types::record::QueryResultRecord> for $name {
            type Error = crate::api::error::VCloudAPIError;

            fn try_from(
                record: crate::api::types::record::QueryResultRecord,
            ) -> Result<Self, Self::Error> {
                match record {
                    crate::api::types::record::QueryResultRecord::$kind(r) => Ok(r),
                    other => Err(crate::api::error::VCloudAPIError::Decode(format!(
                        "expected {} but found {}",
                        crate::api::types::record::RecordKind::$kind.element(),
                        crate::api::types::record::QueryRecord::kind(&other).element()
                    ))),
                }
            }
        }
    };
}

/// The closed set of entity kinds the query service can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    /// Catalogs
    Catalog,
    /// Virtual machines
    Vm,
    /// Organization VDCs, administrator view
    AdminVdc,
    /// Organization networks
    Network,
    /// Users
    User,
    /// Groups
    Group,
    /// Roles
    Role,
    /// Media (ISO/floppy images)
    Media,
    /// vApps
    VApp,
    /// vApp templates
    VAppTemplate,
    /// Datastores
    Datastore,
    /// Users whose LDAP group was removed
    StrandedUser,
    /// Rights
    Right,
}

impl RecordKind {
    /// All kinds, in declaration order
    pub const ALL: [RecordKind; 13] = [
        RecordKind::Catalog,
        RecordKind::Vm,
        RecordKind::AdminVdc,
        RecordKind::Network,
        RecordKind::User,
        RecordKind::Group,
        RecordKind::Role,
        RecordKind::Media,
        RecordKind::VApp,
        RecordKind::VAppTemplate,
        RecordKind::Datastore,
        RecordKind::StrandedUser,
        RecordKind::Right,
    ];

    /// Value of the `type` query parameter
    pub fn query_type(&self) -> &'static str {
        match self {
            RecordKind::Catalog => "catalog",
            RecordKind::Vm => "vm",
            RecordKind::AdminVdc => "adminOrgVdc",
            RecordKind::Network => "orgNetwork",
            RecordKind::User => "user",
            RecordKind::Group => "group",
            RecordKind::Role => "role",
            RecordKind::Media => "media",
            RecordKind::VApp => "vApp",
            RecordKind::VAppTemplate => "vAppTemplate",
            RecordKind::Datastore => "datastore",
            RecordKind::StrandedUser => "strandedUser",
            RecordKind::Right => "right",
        }
    }

    /// Element name of a row in the records format
    pub fn element(&self) -> &'static str {
        match self {
            RecordKind::Catalog => "CatalogRecord",
            RecordKind::Vm => "VMRecord",
            RecordKind::AdminVdc => "VdcRecord",
            RecordKind::Network => "OrgNetworkRecord",
            RecordKind::User => "UserRecord",
            RecordKind::Group => "GroupRecord",
            RecordKind::Role => "RoleRecord",
            RecordKind::Media => "MediaRecord",
            RecordKind::VApp => "VAppRecord",
            RecordKind::VAppTemplate => "VAppTemplateRecord",
            RecordKind::Datastore => "DatastoreRecord",
            RecordKind::StrandedUser => "StrandedUserRecord",
            RecordKind::Right => "RightRecord",
        }
    }

    /// Element name of a row in the references format
    pub fn reference_element(&self) -> String {
        let element = self.element();
        format!("{}Reference", element.trim_end_matches("Record"))
    }

    /// Kind-specific query endpoint relative to the API root
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            RecordKind::Catalog => Some("catalogs/query"),
            RecordKind::Vm => Some("vms/query"),
            RecordKind::Network => Some("orgNetworks/query"),
            RecordKind::User => Some("admin/users/query"),
            RecordKind::Group => Some("admin/groups/query"),
            RecordKind::Role => Some("admin/roles/query"),
            RecordKind::Media => Some("mediaList/query"),
            RecordKind::VApp => Some("vApps/query"),
            RecordKind::VAppTemplate => Some("vAppTemplates/query"),
            RecordKind::StrandedUser => Some("admin/strandedUsers/query"),
            RecordKind::Right => Some("admin/rights/query"),
            RecordKind::AdminVdc | RecordKind::Datastore => None,
        }
    }

    /// Kind of a records-format row element
    pub fn from_element(element: &str) -> Option<RecordKind> {
        RecordKind::ALL.into_iter().find(|k| k.element() == element)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.query_type())
    }
}

impl FromStr for RecordKind {
    type Err = VCloudAPIError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.query_type() == s)
            .ok_or(VCloudAPIError::InvalidParams)
    }
}

/// A row of a query result
pub trait QueryRecord: Clone + fmt::Debug + PartialEq + Sized {
    /// The kind requested from the server, `None` when rows may be mixed
    fn query_kind() -> Option<RecordKind>;

    /// Build a row from its element name, attributes and child links
    fn decode(
        element: &str,
        attributes: &AttributeMap,
        links: BTreeSet<Link>,
    ) -> Result<Self, VCloudAPIError>;

    /// Kind of this row
    fn kind(&self) -> RecordKind;

    /// Wire attributes in schema order, absent values omitted
    fn attributes(&self) -> Vec<(&'static str, String)>;

    /// Address of the queried entity
    fn href(&self) -> Option<&str>;

    /// Entity identifier
    fn id(&self) -> Option<&str>;

    /// Media type of the queried entity
    fn type_(&self) -> Option<&str>;

    /// Links attached to the row
    fn links(&self) -> &BTreeSet<Link>;

    /// Element name of this row
    fn element_name(&self) -> &'static str {
        self.kind().element()
    }
}

/// A row of any kind, as returned by the generic query endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "recordKind", rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum QueryResultRecord {
    Catalog(CatalogRecord),
    Vm(VmRecord),
    AdminVdc(AdminVdcRecord),
    Network(NetworkRecord),
    User(UserRecord),
    Group(GroupRecord),
    Role(RoleRecord),
    Media(MediaRecord),
    VApp(VAppRecord),
    VAppTemplate(VAppTemplateRecord),
    Datastore(DatastoreRecord),
    StrandedUser(StrandedUserRecord),
    Right(RightRecord),
}

impl QueryResultRecord {
    fn inner(&self) -> &dyn ErasedRecord {
        match self {
            QueryResultRecord::Catalog(r) => r,
            QueryResultRecord::Vm(r) => r,
            QueryResultRecord::AdminVdc(r) => r,
            QueryResultRecord::Network(r) => r,
            QueryResultRecord::User(r) => r,
            QueryResultRecord::Group(r) => r,
            QueryResultRecord::Role(r) => r,
            QueryResultRecord::Media(r) => r,
            QueryResultRecord::VApp(r) => r,
            QueryResultRecord::VAppTemplate(r) => r,
            QueryResultRecord::Datastore(r) => r,
            QueryResultRecord::StrandedUser(r) => r,
            QueryResultRecord::Right(r) => r,
        }
    }

    /// The row as a VM record, if it is one
    pub fn as_vm(&self) -> Option<&VmRecord> {
        match self {
            QueryResultRecord::Vm(r) => Some(r),
            _ => None,
        }
    }

    /// The row as a catalog record, if it is one
    pub fn as_catalog(&self) -> Option<&CatalogRecord> {
        match self {
            QueryResultRecord::Catalog(r) => Some(r),
            _ => None,
        }
    }

    /// The row as an admin VDC record, if it is one
    pub fn as_admin_vdc(&self) -> Option<&AdminVdcRecord> {
        match self {
            QueryResultRecord::AdminVdc(r) => Some(r),
            _ => None,
        }
    }

    /// The row as a datastore record, if it is one
    pub fn as_datastore(&self) -> Option<&DatastoreRecord> {
        match self {
            QueryResultRecord::Datastore(r) => Some(r),
            _ => None,
        }
    }
}

// object-safe subset of QueryRecord used for dispatch
trait ErasedRecord {
    fn kind(&self) -> RecordKind;
    fn attributes(&self) -> Vec<(&'static str, String)>;
    fn href(&self) -> Option<&str>;
    fn id(&self) -> Option<&str>;
    fn type_(&self) -> Option<&str>;
    fn links(&self) -> &BTreeSet<Link>;
}

impl<T: QueryRecord> ErasedRecord for T {
    fn kind(&self) -> RecordKind {
        QueryRecord::kind(self)
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        QueryRecord::attributes(self)
    }

    fn href(&self) -> Option<&str> {
        QueryRecord::href(self)
    }

    fn id(&self) -> Option<&str> {
        QueryRecord::id(self)
    }

    fn type_(&self) -> Option<&str> {
        QueryRecord::type_(self)
    }

    fn links(&self) -> &BTreeSet<Link> {
        QueryRecord::links(self)
    }
}

impl QueryRecord for QueryResultRecord {
    fn query_kind() -> Option<RecordKind> {
        None
    }

    fn decode(
        element: &str,
        attributes: &AttributeMap,
        links: BTreeSet<Link>,
    ) -> Result<Self, VCloudAPIError> {
        let kind = RecordKind::from_element(element).ok_or_else(|| {
            VCloudAPIError::Decode(format!("{} is not a known query record", element))
        })?;
        Ok(match kind {
            RecordKind::Catalog => CatalogRecord::decode(element, attributes, links)?.into(),
            RecordKind::Vm => VmRecord::decode(element, attributes, links)?.into(),
            RecordKind::AdminVdc => AdminVdcRecord::decode(element, attributes, links)?.into(),
            RecordKind::Network => NetworkRecord::decode(element, attributes, links)?.into(),
            RecordKind::User => UserRecord::decode(element, attributes, links)?.into(),
            RecordKind::Group => GroupRecord::decode(element, attributes, links)?.into(),
            RecordKind::Role => RoleRecord::decode(element, attributes, links)?.into(),
            RecordKind::Media => MediaRecord::decode(element, attributes, links)?.into(),
            RecordKind::VApp => VAppRecord::decode(element, attributes, links)?.into(),
            RecordKind::VAppTemplate => {
                VAppTemplateRecord::decode(element, attributes, links)?.into()
            }
            RecordKind::Datastore => DatastoreRecord::decode(element, attributes, links)?.into(),
            RecordKind::StrandedUser => {
                StrandedUserRecord::decode(element, attributes, links)?.into()
            }
            RecordKind::Right => RightRecord::decode(element, attributes, links)?.into(),
        })
    }

    fn kind(&self) -> RecordKind {
        self.inner().kind()
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        self.inner().attributes()
    }

    fn href(&self) -> Option<&str> {
        self.inner().href()
    }

    fn id(&self) -> Option<&str> {
        self.inner().id()
    }

    fn type_(&self) -> Option<&str> {
        self.inner().type_()
    }

    fn links(&self) -> &BTreeSet<Link> {
        self.inner().links()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::api::error::VCloudAPIError;
    use crate::api::types::catalog::CatalogRecord;
    use crate::api::types::record::{QueryRecord, QueryResultRecord, RecordKind};
    use crate::api::types::vm::VmRecord;

    #[test]
    fn kind_names_are_unique() {
        for (i, a) in RecordKind::ALL.iter().enumerate() {
            for b in RecordKind::ALL.iter().skip(i + 1) {
                assert_ne!(a.query_type(), b.query_type());
                assert_ne!(a.element(), b.element());
            }
        }
    }

    #[test]
    fn kind_parses_from_query_type() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_str(kind.query_type()), Ok(kind));
            assert_eq!(RecordKind::from_element(kind.element()), Some(kind));
        }
        assert_eq!(RecordKind::from_str("vms"), Err(VCloudAPIError::InvalidParams));
    }

    #[test]
    fn reference_element_names() {
        assert_eq!(RecordKind::Vm.reference_element(), "VMReference");
        assert_eq!(RecordKind::VAppTemplate.reference_element(), "VAppTemplateReference");
    }

    #[test]
    fn mixed_row_exposes_common_fields() {
        let vm = VmRecord::builder()
            .href("https://vcloud.example.com/api/vApp/vm-1".to_string())
            .name("vm1".to_string())
            .build()
            .unwrap();
        let row: QueryResultRecord = vm.clone().into();
        assert_eq!(row.kind(), RecordKind::Vm);
        assert_eq!(row.href(), Some("https://vcloud.example.com/api/vApp/vm-1"));
        assert_eq!(row.as_vm(), Some(&vm));
        assert_eq!(row.as_catalog(), None);
        assert_eq!(row.element_name(), "VMRecord");
    }

    #[test]
    fn narrowing_to_wrong_kind_fails() {
        let row: QueryResultRecord = CatalogRecord::builder().build().unwrap().into();
        let narrowed = VmRecord::try_from(row);
        assert!(matches!(narrowed, Err(VCloudAPIError::Decode(_))));
    }

    #[test]
    fn mixed_row_json_is_tagged() {
        let row: QueryResultRecord = VmRecord::builder()
            .name("vm1".to_string())
            .number_of_cpus(2)
            .build()
            .unwrap()
            .into();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["recordKind"], "vm");
        assert_eq!(json["numberOfCpus"], 2);
        let back: QueryResultRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }
}
