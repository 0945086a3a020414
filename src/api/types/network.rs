query_record! {
    /// An organization network (`orgNetwork` query)
    pub struct NetworkRecord(NetworkRecordBuilder) for Network {
        #[allow(missing_docs)]
        name: String => "name",
        /// Identifier of the IP scope
        ip_scope_id: String => "ipScopeId",
        #[allow(missing_docs)]
        gateway: String => "gateway",
        #[allow(missing_docs)]
        netmask: String => "netmask",
        /// Primary DNS server
        dns1: String => "dns1",
        /// Secondary DNS server
        dns2: String => "dns2",
        #[allow(missing_docs)]
        dns_suffix: String => "dnsSuffix",
        /// 0 = direct, 1 = routed, 2 = isolated
        link_type: i32 => "linkType",
        /// Name of the network this one is connected to
        connected_to: String => "connectedTo",
        #[allow(missing_docs)]
        org_name: String => "orgName",
        #[allow(missing_docs)]
        is_busy: bool => "isBusy",
    }
}
