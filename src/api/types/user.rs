query_record! {
    /// A user of an organization (`user` query)
    pub struct UserRecord(UserRecordBuilder) for User {
        /// Login name
        name: String => "name",
        #[allow(missing_docs)]
        full_name: String => "fullName",
        #[allow(missing_docs)]
        is_enabled: bool => "isEnabled",
        /// Whether the user was imported from LDAP
        is_ldap_user: bool => "isLdapUser",
        /// Distinguished name in the LDAP directory
        ldap_dn: String => "ldapDN",
        /// Quota of running VMs, 0 means unlimited
        deployed_vm_quota: i32 => "deployedVMQuota",
        /// Quota of stored VMs, 0 means unlimited
        stored_vm_quota: i32 => "storedVMQuota",
        /// Whether the user is in sync with LDAP
        is_in_sync: bool => "isInSync",
    }
}

query_record! {
    /// A user whose LDAP group has been deleted (`strandedUser` query)
    pub struct StrandedUserRecord(StrandedUserRecordBuilder) for StrandedUser {
        #[allow(missing_docs)]
        name: String => "name",
        #[allow(missing_docs)]
        full_name: String => "fullName",
        /// LDAP object GUID
        ldap_guid: String => "ldapGuid",
        #[allow(missing_docs)]
        is_in_sync: bool => "isInSync",
    }
}

query_record! {
    /// An LDAP group imported into an organization (`group` query)
    pub struct GroupRecord(GroupRecordBuilder) for Group {
        #[allow(missing_docs)]
        name: String => "name",
        #[allow(missing_docs)]
        is_read_only: bool => "isReadOnly",
        /// Role granted to the members
        role_name: String => "roleName",
    }
}
