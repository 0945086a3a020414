query_record! {
    /// A role (`role` query)
    pub struct RoleRecord(RoleRecordBuilder) for Role {
        #[allow(missing_docs)]
        name: String => "name",
        /// Predefined roles cannot be modified
        is_read_only: bool => "isReadOnly",
    }
}

query_record! {
    /// A right that can be granted through a role (`right` query)
    pub struct RightRecord(RightRecordBuilder) for Right {
        #[allow(missing_docs)]
        name: String => "name",
        #[allow(missing_docs)]
        description: String => "description",
        /// Right category, e.g. `VAPP`
        category: String => "category",
    }
}

#[cfg(test)]
mod tests {
    use crate::api::types::role::{RightRecord, RoleRecord};

    #[test]
    fn round_trip() {
        let role = RoleRecord::builder()
            .name("vApp Author".to_string())
            .is_read_only(true)
            .build()
            .unwrap();
        assert_eq!(role.to_builder().build().unwrap(), role);

        let right = RightRecord::builder()
            .name("vApp: Create".to_string())
            .category("VAPP".to_string())
            .build()
            .unwrap();
        assert_eq!(right.to_builder().build().unwrap(), right);
        assert_eq!(right.description, None);
    }
}
