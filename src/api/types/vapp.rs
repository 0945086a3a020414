use chrono::{DateTime, FixedOffset};

query_record! {
    /// A vApp (`vApp` query)
    pub struct VAppRecord(VAppRecordBuilder) for VApp {
        #[allow(missing_docs)]
        name: String => "name",
        #[allow(missing_docs)]
        vdc: String => "vdc",
        #[allow(missing_docs)]
        vdc_name: String => "vdcName",
        #[allow(missing_docs)]
        is_public: bool => "isPublic",
        #[allow(missing_docs)]
        is_enabled: bool => "isEnabled",
        #[allow(missing_docs)]
        is_busy: bool => "isBusy",
        #[allow(missing_docs)]
        creation_date: String => "creationDate",
        #[allow(missing_docs)]
        status: String => "status",
        #[allow(missing_docs)]
        owner_name: String => "ownerName",
        #[allow(missing_docs)]
        is_deployed: bool => "isDeployed",
        #[allow(missing_docs)]
        is_in_maintenance_mode: bool => "isInMaintenanceMode",
    }
}

query_record! {
    /// A vApp template (`vAppTemplate` query)
    pub struct VAppTemplateRecord(VAppTemplateRecordBuilder) for VAppTemplate {
        #[allow(missing_docs)]
        name: String => "name",
        #[allow(missing_docs)]
        vdc: String => "vdc",
        #[allow(missing_docs)]
        vdc_name: String => "vdcName",
        #[allow(missing_docs)]
        org: String => "org",
        #[allow(missing_docs)]
        owner_name: String => "ownerName",
        #[allow(missing_docs)]
        catalog_name: String => "catalogName",
        #[allow(missing_docs)]
        is_published: bool => "isPublished",
        #[allow(missing_docs)]
        is_enabled: bool => "isEnabled",
        /// Whether the template is marked as the catalog's gold master
        is_gold_master: bool => "isGoldMaster",
        #[allow(missing_docs)]
        is_busy: bool => "isBusy",
        #[allow(missing_docs)]
        creation_date: String => "creationDate",
        #[allow(missing_docs)]
        status: String => "status",
        #[allow(missing_docs)]
        is_deployed: bool => "isDeployed",
    }
}

impl VAppRecord {
    /// Creation timestamp, if present and valid RFC 3339
    pub fn creation_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.creation_date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
    }
}

impl VAppTemplateRecord {
    /// Creation timestamp, if present and valid RFC 3339
    pub fn creation_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.creation_date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
    }
}
