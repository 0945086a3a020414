use chrono::{DateTime, FixedOffset};

query_record! {
    /// An ISO or floppy image (`media` query)
    pub struct MediaRecord(MediaRecordBuilder) for Media {
        #[allow(missing_docs)]
        name: String => "name",
        /// Address of the VDC holding the image
        vdc: String => "vdc",
        #[allow(missing_docs)]
        vdc_name: String => "vdcName",
        /// Address of the owning organization
        org: String => "org",
        #[allow(missing_docs)]
        owner_name: String => "ownerName",
        #[allow(missing_docs)]
        catalog_name: String => "catalogName",
        #[allow(missing_docs)]
        is_published: bool => "isPublished",
        /// Size in bytes
        storage_b: i64 => "storageB",
        #[allow(missing_docs)]
        owner: String => "owner",
        /// Address of the catalog
        catalog: String => "catalog",
        /// Address of the catalog item wrapping the image
        catalog_item: String => "catalogItem",
        #[allow(missing_docs)]
        status: String => "status",
        #[allow(missing_docs)]
        creation_date: String => "creationDate",
        #[allow(missing_docs)]
        is_busy: bool => "isBusy",
    }
}

impl MediaRecord {
    /// Creation timestamp, if present and valid RFC 3339
    pub fn creation_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.creation_date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
    }
}
