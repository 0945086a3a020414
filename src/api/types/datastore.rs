query_record! {
    /// A datastore backing provider VDCs (`datastore` query)
    pub struct DatastoreRecord(DatastoreRecordBuilder) for Datastore {
        #[allow(missing_docs)]
        name: String => "name",
        /// e.g. `VMFS5`, `NFS`
        datastore_type: String => "datastoreType",
        #[allow(missing_docs)]
        is_enabled: bool => "isEnabled",
        #[allow(missing_docs)]
        is_deleted: bool => "isDeleted",
        #[allow(missing_docs)]
        storage_used_mb: i64 => "storageUsedMB",
        /// Capacity in MB
        storage_mb: i64 => "storageMB",
        #[allow(missing_docs)]
        provisioned_storage_mb: i64 => "provisionedStorageMB",
        #[allow(missing_docs)]
        requested_storage_mb: i64 => "requestedStorageMB",
        /// Address of the vCenter
        vc: String => "vc",
        #[allow(missing_docs)]
        vc_name: String => "vcName",
        /// vSphere managed object reference
        moref: String => "moref",
        #[allow(missing_docs)]
        number_of_provider_vdcs: i32 => "numberOfProviderVdcs",
    }
}

impl DatastoreRecord {
    /// Free capacity, when both capacity and usage were reported
    pub fn storage_free_mb(&self) -> Option<i64> {
        self.storage_mb?.checked_sub(self.storage_used_mb?)
    }
}
