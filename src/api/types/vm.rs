query_record! {
    /// A virtual machine as returned by the `vm` query
    pub struct VmRecord(VmRecordBuilder) for Vm {
        /// VM name
        name: String => "name",
        /// Name of the parent vApp or vApp template
        container_name: String => "containerName",
        /// Address of the parent vApp or vApp template
        container: String => "container",
        #[allow(missing_docs)]
        owner_name: String => "ownerName",
        #[allow(missing_docs)]
        owner: String => "owner",
        /// Address of the VDC the VM lives in
        vdc: String => "vdc",
        /// Whether the VM belongs to a template instead of a vApp
        is_vapp_template: bool => "isVAppTemplate",
        #[allow(missing_docs)]
        is_deleted: bool => "isDeleted",
        /// Guest operating system description
        guest_os: String => "guestOs",
        #[allow(missing_docs)]
        number_of_cpus: i32 => "numberOfCpus",
        /// Memory in MB
        memory_mb: i32 => "memoryMB",
        /// Power/deployment status, e.g. `POWERED_ON`
        status: String => "status",
        #[allow(missing_docs)]
        network_name: String => "networkName",
        #[allow(missing_docs)]
        ip_address: String => "ipAddress",
        /// Whether a task is running against the VM
        is_busy: bool => "isBusy",
        #[allow(missing_docs)]
        is_deployed: bool => "isDeployed",
        #[allow(missing_docs)]
        is_published: bool => "isPublished",
        #[allow(missing_docs)]
        catalog_name: String => "catalogName",
        /// Virtual hardware version
        hardware_version: i32 => "hardwareVersion",
        #[allow(missing_docs)]
        vm_tools_status: String => "vmToolsStatus",
        #[allow(missing_docs)]
        is_in_maintenance_mode: bool => "isInMaintenanceMode",
    }
}

impl VmRecord {
    /// Whether the VM is reported as powered on
    pub fn is_powered_on(&self) -> Option<bool> {
        self.status.as_deref().map(|s| s == "POWERED_ON")
    }
}

#[cfg(test)]
mod tests {
    use crate::api::types::record::{QueryRecord, RecordKind};
    use crate::api::types::vm::VmRecord;

    fn vm1() -> VmRecord {
        VmRecord::builder()
            .name("vm1".to_string())
            .number_of_cpus(2)
            .memory_mb(2048)
            .is_busy(false)
            .status("POWERED_ON".to_string())
            .build()
            .unwrap()
    }

    #[test]
    fn round_trip() {
        let vm = vm1();
        assert_eq!(vm.to_builder().build().unwrap(), vm);
        let empty = VmRecord::builder().build().unwrap();
        assert_eq!(empty.to_builder().build().unwrap(), empty);
    }

    #[test]
    fn tri_state_busy_flag() {
        let busy_unknown = VmRecord::builder().name("vm2".to_string()).build().unwrap();
        assert_eq!(busy_unknown.is_busy, None);
        assert_eq!(vm1().is_busy, Some(false));
        assert_ne!(busy_unknown.is_busy, vm1().is_busy);
    }

    #[test]
    fn attributes_use_wire_names() {
        let attributes = vm1().attributes();
        assert!(attributes.contains(&("memoryMB", "2048".to_string())));
        assert!(attributes.contains(&("isBusy", "false".to_string())));
        assert!(!attributes.iter().any(|(k, _)| *k == "guestOs"));
        assert_eq!(vm1().kind(), RecordKind::Vm);
    }

    #[test]
    fn power_state_is_tri_state() {
        assert_eq!(vm1().is_powered_on(), Some(true));
        assert_eq!(VmRecord::builder().build().unwrap().is_powered_on(), None);
    }
}
