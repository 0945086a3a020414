#![warn(missing_docs)]

//! # vCloud Director query API
//!
//! Typed, paginated results of the vCloud Director query service and an
//! asynchronous client to fetch them.
//!
//! ## Current functionality
//!  - Query result containers in records and references format
//!  - One typed record per entity kind, plus a mixed record
//!  - Builders for every value type
//!  - Following `nextPage` links to fetch a whole result set
//!  - Resolving an entity by URN
//!
//! ```no_run
//! use vcloud_query::api::config::ClientConfig;
//! use vcloud_query::api::query::QueryParams;
//! use vcloud_query::VCloudDirector;
//!
//! # async fn run() -> Result<(), vcloud_query::api::error::VCloudAPIError> {
//! let vcd = VCloudDirector::new(ClientConfig::from_env()?)?;
//! let vms = vcd.vms(&QueryParams::filter("isBusy==false")).await?;
//! for vm in &vms {
//!     println!("{:?} {:?}", vm.name, vm.status);
//! }
//! # Ok(())
//! # }
//! ```

use crate::api::config::ClientConfig;
use crate::api::error::VCloudAPIError;
use crate::api::query::QueryParams;
use crate::api::transport::{ReqwestTransport, Transport};
use crate::api::types::catalog::CatalogRecord;
use crate::api::types::datastore::DatastoreRecord;
use crate::api::types::entity::Entity;
use crate::api::types::media::MediaRecord;
use crate::api::types::network::NetworkRecord;
use crate::api::types::record::{QueryRecord, RecordKind};
use crate::api::types::records::{MixedRecords, QueryResultRecords, QueryResultReferences};
use crate::api::types::role::{RightRecord, RoleRecord};
use crate::api::types::urn::Urn;
use crate::api::types::user::{GroupRecord, StrandedUserRecord, UserRecord};
use crate::api::types::vapp::{VAppRecord, VAppTemplateRecord};
use crate::api::types::vdc::AdminVdcRecord;
use crate::api::types::vm::VmRecord;
use crate::api::VCloudAPI;

/// Module for authenticated API communication
pub mod api;

/// Struct to manage the communication with the vCloud Director query service
#[derive(Debug, Clone)]
pub struct VCloudDirector<T = ReqwestTransport> {
    vcd: VCloudAPI<T>,
}

impl VCloudDirector<ReqwestTransport> {
    /// Creates a client using `reqwest`
    pub fn new(config: ClientConfig) -> Result<Self, VCloudAPIError> {
        Ok(VCloudDirector {
            vcd: VCloudAPI::new(config)?,
        })
    }
}

impl<T: Transport> VCloudDirector<T> {
    /// Creates a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, VCloudAPIError> {
        Ok(VCloudDirector {
            vcd: VCloudAPI::with_transport(config, transport)?,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.vcd.config
    }

    /// Replace the session token
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.vcd.config.auth_token = token;
    }

    /// One page of rows of any kind, from the generic query endpoint
    pub async fn query_records(
        &self,
        kind: RecordKind,
        params: &QueryParams,
    ) -> Result<MixedRecords, VCloudAPIError> {
        self.vcd.query_records(kind, params).await
    }

    /// One page of typed rows
    ///
    /// `R` must name a single kind. With `QueryResultRecord` this returns
    /// `InvalidParams`; use [`query_records`](Self::query_records) instead.
    pub async fn query<R: QueryRecord>(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<R>, VCloudAPIError> {
        self.vcd.query::<R>(params).await
    }

    /// Every row of a query, across all pages
    ///
    /// Like [`query`](Self::query), `R` must name a single kind; use
    /// [`query_all_records`](Self::query_all_records) for mixed rows.
    pub async fn query_all<R: QueryRecord>(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<R>, VCloudAPIError> {
        self.vcd.query_all::<R>(params).await
    }

    /// Every row of a query on the generic endpoint, across all pages
    pub async fn query_all_records(
        &self,
        kind: RecordKind,
        params: &QueryParams,
    ) -> Result<MixedRecords, VCloudAPIError> {
        self.vcd.query_all_records(kind, params).await
    }

    /// One page of references
    pub async fn query_references(
        &self,
        kind: RecordKind,
        params: &QueryParams,
    ) -> Result<QueryResultReferences, VCloudAPIError> {
        self.vcd.query_references(kind, params).await
    }

    /// Look up an entity by URN, `None` when it does not exist
    pub async fn resolve_entity(&self, urn: &Urn) -> Result<Option<Entity>, VCloudAPIError> {
        self.vcd.resolve_entity(urn).await
    }

    /// Returns catalogs
    pub async fn catalogs(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<CatalogRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns virtual machines
    pub async fn vms(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<VmRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns vApps
    pub async fn vapps(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<VAppRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns vApp templates
    pub async fn vapp_templates(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<VAppTemplateRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns media
    pub async fn media(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<MediaRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns users
    pub async fn users(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<UserRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns groups
    pub async fn groups(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<GroupRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns roles
    pub async fn roles(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<RoleRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns rights
    pub async fn rights(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<RightRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns organization networks
    pub async fn networks(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<NetworkRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns organization VDCs (system administrator only)
    pub async fn admin_vdcs(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<AdminVdcRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns datastores (system administrator only)
    pub async fn datastores(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<DatastoreRecord>, VCloudAPIError> {
        self.query(params).await
    }

    /// Returns users left without an LDAP group
    pub async fn stranded_users(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<StrandedUserRecord>, VCloudAPIError> {
        self.query(params).await
    }
}
