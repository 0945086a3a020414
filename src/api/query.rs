use std::collections::HashSet;

use derive_builder::Builder;
use log::{debug, warn};
use url::Url;

use crate::api::error::VCloudAPIError;
use crate::api::transport::Transport;
use crate::api::types::link::rel;
use crate::api::types::record::{QueryRecord, RecordKind};
use crate::api::types::records::{MixedRecords, QueryResultRecords, QueryResultReferences};
use crate::api::types::resource::Container;
use crate::api::xml;
use crate::api::VCloudAPI;

/// Parameters of a query request
///
/// The filter is passed to the server as is, e.g. `name==web*;isBusy==false`.
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq)]
#[builder(
    default,
    setter(into, strip_option),
    build_fn(validate = "Self::validate", error = "VCloudAPIError")
)]
pub struct QueryParams {
    /// Filter expression
    pub filter: Option<String>,
    /// 1-based page to fetch
    pub page: Option<i32>,
    /// Rows per page, the configured page size when absent
    pub page_size: Option<i32>,
    /// Attribute to sort ascending by
    pub sort_asc: Option<String>,
    /// Attribute to sort descending by
    pub sort_desc: Option<String>,
}

impl QueryParams {
    /// Returns a builder with nothing set
    pub fn builder() -> QueryParamsBuilder {
        QueryParamsBuilder::default()
    }

    /// Parameters with only a filter
    pub fn filter<F: Into<String>>(filter: F) -> Self {
        QueryParams {
            filter: Some(filter.into()),
            ..Default::default()
        }
    }
}

impl QueryParamsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(page)) = self.page {
            if page < 1 {
                return Err(format!("page must be >= 1, got {}", page));
            }
        }
        if let Some(Some(size)) = self.page_size {
            if size < 1 {
                return Err(format!("page size must be >= 1, got {}", size));
            }
        }
        if let (Some(Some(_)), Some(Some(_))) = (&self.sort_asc, &self.sort_desc) {
            return Err("sortAsc and sortDesc are mutually exclusive".to_string());
        }
        Ok(())
    }
}

/// Representation requested from the query service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Records,
    References,
}

impl Format {
    fn as_str(&self) -> &'static str {
        match self {
            Format::Records => "records",
            Format::References => "references",
        }
    }
}

impl<T: Transport> VCloudAPI<T> {
    /// Build the address of a query
    ///
    /// Dedicated endpoints already imply the kind; the generic `query`
    /// endpoint needs it as `type`.
    pub(crate) fn query_url(
        &self,
        kind: RecordKind,
        format: Format,
        params: &QueryParams,
        dedicated: bool,
    ) -> Result<Url, VCloudAPIError> {
        let endpoint = if dedicated { kind.endpoint() } else { None };
        let mut url = self.api_url(endpoint.unwrap_or("query"))?;
        {
            let mut pairs = url.query_pairs_mut();
            if endpoint.is_none() {
                pairs.append_pair("type", kind.query_type());
            }
            pairs.append_pair("format", format.as_str());
            if let Some(page) = params.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(size) = params.page_size.or(self.config.page_size) {
                pairs.append_pair("pageSize", &size.to_string());
            }
            if let Some(filter) = &params.filter {
                pairs.append_pair("filter", filter);
            }
            if let Some(field) = &params.sort_asc {
                pairs.append_pair("sortAsc", field);
            }
            if let Some(field) = &params.sort_desc {
                pairs.append_pair("sortDesc", field);
            }
        }
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<String, VCloudAPIError> {
        let response = self.authorized_get(url.clone()).await?;
        Self::successful_body(&url, response)
    }

    async fn fetch_records<R: QueryRecord>(
        &self,
        url: Url,
    ) -> Result<QueryResultRecords<R>, VCloudAPIError> {
        let body = self.fetch(url).await?;
        let page = xml::decode_records::<R>(&body)?;
        debug!(
            "{} rows (page {:?}, total {:?})",
            page.len(),
            page.page,
            page.total
        );
        Ok(page)
    }

    /// One page of rows of any kind from the generic query endpoint
    pub async fn query_records(
        &self,
        kind: RecordKind,
        params: &QueryParams,
    ) -> Result<MixedRecords, VCloudAPIError> {
        let url = self.query_url(kind, Format::Records, params, false)?;
        self.fetch_records(url).await
    }

    /// One page of typed rows from the kind's own endpoint
    pub async fn query<R: QueryRecord>(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<R>, VCloudAPIError> {
        let kind = R::query_kind().ok_or(VCloudAPIError::InvalidParams)?;
        let url = self.query_url(kind, Format::Records, params, true)?;
        self.fetch_records(url).await
    }

    /// One page of references to entities of the given kind
    pub async fn query_references(
        &self,
        kind: RecordKind,
        params: &QueryParams,
    ) -> Result<QueryResultReferences, VCloudAPIError> {
        let url = self.query_url(kind, Format::References, params, true)?;
        let body = self.fetch(url).await?;
        xml::decode_references(&body)
    }

    /// Every page of a query, following `nextPage` links
    ///
    /// The result carries no page or page size; `total` is the one reported
    /// by the last page fetched.
    pub async fn query_all<R: QueryRecord>(
        &self,
        params: &QueryParams,
    ) -> Result<QueryResultRecords<R>, VCloudAPIError> {
        let kind = R::query_kind().ok_or(VCloudAPIError::InvalidParams)?;
        let url = self.query_url(kind, Format::Records, params, true)?;
        self.collect_pages(url).await
    }

    /// Every page of a query on the generic endpoint, rows of any kind
    pub async fn query_all_records(
        &self,
        kind: RecordKind,
        params: &QueryParams,
    ) -> Result<MixedRecords, VCloudAPIError> {
        let url = self.query_url(kind, Format::Records, params, false)?;
        self.collect_pages(url).await
    }

    async fn collect_pages<R: QueryRecord>(
        &self,
        first: Url,
    ) -> Result<QueryResultRecords<R>, VCloudAPIError> {
        // the requested address and the one the server reports may differ
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(first.to_string());
        let mut result = self.fetch_records::<R>(first).await?;
        if let Some(Ok(url)) = result.href.as_deref().map(|h| self.api_url(h)) {
            seen.insert(url.to_string());
        }
        let mut next = result.next_page().map(|l| l.href.clone());

        while let Some(href) = next.take() {
            let url = self.api_url(&href)?;
            if !seen.insert(url.to_string()) {
                warn!("{} was already fetched, stopping", href);
                break;
            }
            let page = self.fetch_records::<R>(url).await?;
            next = page.next_page().map(|l| l.href.clone());
            if page.total.is_some() {
                result.total = page.total;
            }
            result.records.extend(page.records);
        }

        result.page = None;
        result.page_size = None;
        result.links.retain(|l| {
            ![
                rel::NEXT_PAGE,
                rel::PREVIOUS_PAGE,
                rel::FIRST_PAGE,
                rel::LAST_PAGE,
            ]
            .contains(&l.rel.as_str())
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use url::Url;

    use crate::api::config::ClientConfig;
    use crate::api::error::VCloudAPIError;
    use crate::api::query::{Format, QueryParams};
    use crate::api::transport::{Transport, TransportResponse};
    use crate::api::types::record::RecordKind;
    use crate::api::types::resource::Container;
    use crate::api::types::vm::VmRecord;
    use crate::api::VCloudAPI;

    // Answers from a fixed table keyed by full URL and records what was asked.
    #[derive(Default)]
    struct TableTransport {
        answers: HashMap<String, TransportResponse>,
        requested: Mutex<Vec<String>>,
    }

    impl TableTransport {
        fn answer(mut self, url: &str, status: u16, body: &str) -> Self {
            self.answers.insert(
                url.to_string(),
                TransportResponse {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }
    }

    impl Transport for TableTransport {
        async fn get(
            &self,
            url: Url,
            _headers: &[(&'static str, String)],
        ) -> Result<TransportResponse, VCloudAPIError> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.answers.get(url.as_str()).cloned().unwrap_or(TransportResponse {
                status: 404,
                body: String::new(),
            }))
        }
    }

    fn api(transport: TableTransport) -> VCloudAPI<TableTransport> {
        VCloudAPI::with_transport(ClientConfig::new("https://vcloud.example.com/api"), transport)
            .unwrap()
    }

    #[test]
    fn params_validation() {
        assert!(matches!(
            QueryParams::builder().page(0).build(),
            Err(VCloudAPIError::Validation(_))
        ));
        assert!(matches!(
            QueryParams::builder().page_size(-5).build(),
            Err(VCloudAPIError::Validation(_))
        ));
        assert!(matches!(
            QueryParams::builder().sort_asc("name").sort_desc("name").build(),
            Err(VCloudAPIError::Validation(_))
        ));
        let params = QueryParams::builder()
            .page(2)
            .page_size(10)
            .filter("name==web*")
            .build()
            .unwrap();
        assert_eq!(params.filter.as_deref(), Some("name==web*"));
    }

    #[test]
    fn generic_endpoint_sends_type() {
        let api = api(TableTransport::default());
        let params = QueryParams::builder()
            .page(2)
            .page_size(25)
            .filter("name==web*;isBusy==false")
            .sort_asc("name")
            .build()
            .unwrap();
        let url = api
            .query_url(RecordKind::Vm, Format::Records, &params, false)
            .unwrap();
        assert_eq!(url.path(), "/api/query");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("type".to_string(), "vm".to_string()),
                ("format".to_string(), "records".to_string()),
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "25".to_string()),
                ("filter".to_string(), "name==web*;isBusy==false".to_string()),
                ("sortAsc".to_string(), "name".to_string()),
            ]
        );
    }

    #[test]
    fn dedicated_endpoint_omits_type() {
        let api = api(TableTransport::default());
        let url = api
            .query_url(RecordKind::Catalog, Format::References, &QueryParams::default(), true)
            .unwrap();
        assert_eq!(url.path(), "/api/catalogs/query");
        assert_eq!(url.query(), Some("format=references"));

        let datastore = api
            .query_url(RecordKind::Datastore, Format::Records, &QueryParams::default(), true)
            .unwrap();
        assert_eq!(datastore.path(), "/api/query");
        assert_eq!(datastore.query(), Some("type=datastore&format=records"));
    }

    #[test]
    fn configured_page_size_applies() {
        let mut config = ClientConfig::new("https://vcloud.example.com/api");
        config.page_size = Some(100);
        let api = VCloudAPI::with_transport(config, TableTransport::default()).unwrap();
        let url = api
            .query_url(RecordKind::Vm, Format::Records, &QueryParams::default(), true)
            .unwrap();
        assert_eq!(url.query(), Some("format=records&pageSize=100"));
    }

    #[tokio::test]
    async fn query_all_follows_next_page() {
        let first = r#"<QueryResultRecords name="vm" page="1" pageSize="1" total="2"
                href="https://vcloud.example.com/api/vms/query?format=records">
            <Link rel="nextPage" href="https://vcloud.example.com/api/vms/query?page=2&amp;format=records"/>
            <VMRecord name="vm1"/>
        </QueryResultRecords>"#;
        let second = r#"<QueryResultRecords name="vm" page="2" pageSize="1" total="2">
            <Link rel="previousPage" href="https://vcloud.example.com/api/vms/query?format=records"/>
            <VMRecord name="vm2"/>
        </QueryResultRecords>"#;
        let transport = TableTransport::default()
            .answer("https://vcloud.example.com/api/vms/query?format=records", 200, first)
            .answer(
                "https://vcloud.example.com/api/vms/query?page=2&format=records",
                200,
                second,
            );
        let api = api(transport);
        let all = api.query_all::<VmRecord>(&QueryParams::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.total, Some(2));
        assert!(!all.is_paginated());
        assert!(all.next_page().is_none());
        assert_eq!(all.records[1].name.as_deref(), Some("vm2"));
        assert_eq!(api.transport.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn query_all_stops_on_link_cycle() {
        let looping = r#"<QueryResultRecords page="1" pageSize="1" total="5"
                href="https://vcloud.example.com/api/vms/query?format=records">
            <Link rel="nextPage" href="https://vcloud.example.com/api/vms/query?format=records"/>
            <VMRecord name="vm1"/>
        </QueryResultRecords>"#;
        let transport = TableTransport::default().answer(
            "https://vcloud.example.com/api/vms/query?format=records",
            200,
            looping,
        );
        let api = api(transport);
        let all = api.query_all::<VmRecord>(&QueryParams::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.total, Some(5));
    }

    #[tokio::test]
    async fn query_not_found_is_an_error() {
        let api = api(TableTransport::default());
        let result = api.query::<VmRecord>(&QueryParams::default()).await;
        assert!(matches!(
            result,
            Err(VCloudAPIError::APIError { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn mixed_query_uses_generic_endpoint() {
        let body = r#"<QueryResultRecords name="vm"><VMRecord name="vm1"/></QueryResultRecords>"#;
        let transport = TableTransport::default().answer(
            "https://vcloud.example.com/api/query?type=vm&format=records",
            200,
            body,
        );
        let api = api(transport);
        let page = api
            .query_records(RecordKind::Vm, &QueryParams::default())
            .await
            .unwrap();
        assert!(page.records[0].as_vm().is_some());
    }

    #[tokio::test]
    async fn query_all_never_refetches_the_requested_page() {
        // the first page reports another address, its nextPage leads back
        let first = r#"<QueryResultRecords page="1" pageSize="1" total="2"
                href="https://vcloud.example.com/api/vms/query?page=1&amp;format=records">
            <Link rel="nextPage" href="https://vcloud.example.com/api/vms/query?page=2&amp;format=records"/>
            <VMRecord name="vm1"/>
        </QueryResultRecords>"#;
        let second = r#"<QueryResultRecords page="2" pageSize="1" total="2">
            <Link rel="nextPage" href="https://vcloud.example.com/api/vms/query?format=records"/>
            <VMRecord name="vm2"/>
        </QueryResultRecords>"#;
        let transport = TableTransport::default()
            .answer("https://vcloud.example.com/api/vms/query?format=records", 200, first)
            .answer(
                "https://vcloud.example.com/api/vms/query?page=2&format=records",
                200,
                second,
            );
        let api = api(transport);
        let all = api.query_all::<VmRecord>(&QueryParams::default()).await.unwrap();
        let names: Vec<_> = all.records.iter().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["vm1", "vm2"]);
        assert_eq!(api.transport.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn query_all_records_pages_the_generic_endpoint() {
        let first = r#"<QueryResultRecords name="vm" page="1" pageSize="1" total="2">
            <Link rel="nextPage" href="https://vcloud.example.com/api/query?type=vm&amp;page=2&amp;format=records"/>
            <VMRecord name="vm1"/>
        </QueryResultRecords>"#;
        let second = r#"<QueryResultRecords name="vm" page="2" pageSize="1" total="2">
            <VMRecord name="vm2"/>
        </QueryResultRecords>"#;
        let transport = TableTransport::default()
            .answer("https://vcloud.example.com/api/query?type=vm&format=records", 200, first)
            .answer(
                "https://vcloud.example.com/api/query?type=vm&page=2&format=records",
                200,
                second,
            );
        let api = api(transport);
        let all = api
            .query_all_records(RecordKind::Vm, &QueryParams::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.records.iter().all(|r| r.as_vm().is_some()));
        assert!(all.next_page().is_none());
    }

    #[tokio::test]
    async fn mixed_record_type_needs_a_kind() {
        use crate::api::types::record::QueryResultRecord;

        let api = api(TableTransport::default());
        assert!(matches!(
            api.query_all::<QueryResultRecord>(&QueryParams::default()).await,
            Err(VCloudAPIError::InvalidParams)
        ));
        assert!(api.transport.requested.lock().unwrap().is_empty());
    }
}
