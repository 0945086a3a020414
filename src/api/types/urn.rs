use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::VCloudAPIError;

/// A vCloud identifier, `urn:vcloud:<kind>:<uuid>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Urn {
    /// Entity kind, e.g. `vm` or `catalog`
    pub kind: String,
    #[allow(missing_docs)]
    pub id: Uuid,
}

impl Urn {
    #[allow(missing_docs)]
    pub fn new<K: Into<String>>(kind: K, id: Uuid) -> Self {
        Urn {
            kind: kind.into(),
            id,
        }
    }
}

impl FromStr for Urn {
    type Err = VCloudAPIError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            ["urn", "vcloud", kind, id] if !kind.is_empty() => {
                let id = Uuid::parse_str(id).map_err(|_| VCloudAPIError::InvalidParams)?;
                Ok(Urn::new(*kind, id))
            }
            _ => Err(VCloudAPIError::InvalidParams),
        }
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "urn:vcloud:{}:{}", self.kind, self.id.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::api::error::VCloudAPIError;
    use crate::api::types::urn::Urn;

    #[test]
    fn parses_and_prints() {
        let raw = "urn:vcloud:catalog:7212e451-76e1-4631-b2de-ba1dfd8080e4";
        let urn: Urn = raw.parse().unwrap();
        assert_eq!(urn.kind, "catalog");
        assert_eq!(urn.to_string(), raw);
    }

    #[test]
    fn rejects_malformed() {
        for raw in [
            "",
            "urn:vcloud:vm",
            "urn:vcloud::7212e451-76e1-4631-b2de-ba1dfd8080e4",
            "urn:other:vm:7212e451-76e1-4631-b2de-ba1dfd8080e4",
            "urn:vcloud:vm:not-a-uuid",
            "urn:vcloud:vm:7212e451-76e1-4631-b2de-ba1dfd8080e4:extra",
        ] {
            assert_eq!(raw.parse::<Urn>(), Err(VCloudAPIError::InvalidParams), "{}", raw);
        }
    }

    #[test]
    fn new_urn_displays_lowercase() {
        let id = Uuid::new_v4();
        let urn = Urn::new("vm", id);
        assert_eq!(urn.to_string(), format!("urn:vcloud:vm:{}", id));
    }
}
