use chrono::{DateTime, FixedOffset};

query_record! {
    /// A catalog as returned by the `catalog` query
    pub struct CatalogRecord(CatalogRecordBuilder) for Catalog {
        /// Catalog name
        name: String => "name",
        /// Catalog description
        description: String => "description",
        /// Whether the catalog is published to other organizations
        is_published: bool => "isPublished",
        /// Whether the catalog is shared inside its organization
        is_shared: bool => "isShared",
        /// Creation timestamp as sent by the server
        creation_date: String => "creationDate",
        /// Owning organization
        org_name: String => "orgName",
        /// Owner user name
        owner_name: String => "ownerName",
        /// Number of vApp templates in the catalog
        number_of_templates: i32 => "numberOfTemplates",
        /// Number of media in the catalog
        number_of_media: i32 => "numberOfMedia",
        /// Owner user address
        owner: String => "owner",
    }
}

impl CatalogRecord {
    /// Creation timestamp, if present and valid RFC 3339
    pub fn creation_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.creation_date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
    }
}
