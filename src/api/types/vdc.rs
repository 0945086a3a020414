query_record! {
    /// Administrator view of an organization VDC (`adminOrgVdc` query)
    ///
    /// Capacity is reported as allocation, limit and usage triples.
    pub struct AdminVdcRecord(AdminVdcRecordBuilder) for AdminVdc {
        /// VDC name
        name: String => "name",
        #[allow(missing_docs)]
        is_enabled: bool => "isEnabled",
        /// CPU allocated to the VDC, MHz
        cpu_allocation_mhz: i64 => "cpuAllocationMhz",
        /// CPU limit, MHz
        cpu_limit_mhz: i64 => "cpuLimitMhz",
        /// CPU in use, MHz
        cpu_used_mhz: i64 => "cpuUsedMhz",
        /// Memory allocated to the VDC, MB
        memory_allocation_mb: i64 => "memoryAllocationMB",
        /// Memory limit, MB
        memory_limit_mb: i64 => "memoryLimitMB",
        /// Memory in use, MB
        memory_used_mb: i64 => "memoryUsedMB",
        /// Storage allocated to the VDC, MB
        storage_allocation_mb: i64 => "storageAllocationMB",
        /// Storage limit, MB
        storage_limit_mb: i64 => "storageLimitMB",
        /// Storage in use, MB
        storage_used_mb: i64 => "storageUsedMB",
        #[allow(missing_docs)]
        provider_vdc_name: String => "providerVdcName",
        /// Address of the backing provider VDC
        provider_vdc: String => "providerVdc",
        #[allow(missing_docs)]
        org_name: String => "orgName",
        /// Address of the owning organization
        org: String => "org",
        #[allow(missing_docs)]
        number_of_vapps: i32 => "numberOfVApps",
        #[allow(missing_docs)]
        number_of_media: i32 => "numberOfMedia",
        #[allow(missing_docs)]
        number_of_vapp_templates: i32 => "numberOfVAppTemplates",
        #[allow(missing_docs)]
        is_system_vdc: bool => "isSystemVdc",
        #[allow(missing_docs)]
        is_busy: bool => "isBusy",
        #[allow(missing_docs)]
        status: String => "status",
        /// Address of the network pool
        network_pool: String => "networkPool",
    }
}

impl AdminVdcRecord {
    /// Storage left before the limit is hit, when both values were reported
    pub fn storage_headroom_mb(&self) -> Option<i64> {
        self.storage_limit_mb?.checked_sub(self.storage_used_mb?)
    }

    /// Memory left before the limit is hit, when both values were reported
    pub fn memory_headroom_mb(&self) -> Option<i64> {
        self.memory_limit_mb?.checked_sub(self.memory_used_mb?)
    }
}
