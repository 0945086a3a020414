/// Record kinds and the mixed record
#[macro_use]
pub mod record;

/// References and links
pub mod link;

/// Resource and container base types
pub mod resource;

/// Paginated query result containers
pub mod records;

/// Catalog records
pub mod catalog;

/// Virtual machine records
pub mod vm;

/// Organization VDC records
pub mod vdc;

/// Organization network records
pub mod network;

/// User, group and stranded user records
pub mod user;

/// Role and right records
pub mod role;

/// Media records
pub mod media;

/// vApp and vApp template records
pub mod vapp;

/// Datastore records
pub mod datastore;

/// Entity resolver answer
pub mod entity;

/// vCloud URNs
pub mod urn;

/// Server error payload
pub mod error;

/// Media types of the query service
pub mod media_type {
    /// Records format
    pub const RECORDS: &str = "application/vnd.vmware.vcloud.query.records+xml";
    /// References format
    pub const REFERENCES: &str = "application/vnd.vmware.vcloud.query.references+xml";
    /// Entity resolver answer
    pub const ENTITY: &str = "application/vnd.vmware.vcloud.entity+xml";
    /// Server error
    pub const ERROR: &str = "application/vnd.vmware.vcloud.error+xml";
}
