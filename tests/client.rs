//! HTTP level tests of the query client against a mock vCloud Director.

use std::time::Duration;

use vcloud_query::api::config::ClientConfig;
use vcloud_query::api::error::VCloudAPIError;
use vcloud_query::api::query::QueryParams;
use vcloud_query::api::types::record::{QueryRecord, RecordKind};
use vcloud_query::api::types::resource::Container;
use vcloud_query::api::types::urn::Urn;
use vcloud_query::api::types::vm::VmRecord;
use vcloud_query::VCloudDirector;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const URN: &str = "urn:vcloud:vm:7212e451-76e1-4631-b2de-ba1dfd8080e4";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn client(server: &MockServer) -> VCloudDirector {
    let mut config = ClientConfig::new(format!("{}/api", server.uri()));
    config.auth_token = Some("session-token".to_string());
    config.timeout_secs = 1;
    VCloudDirector::new(config).unwrap()
}

fn vm_page(server: &MockServer, page: i32, rows: &[&str], next: Option<i32>) -> String {
    let link = next
        .map(|n| {
            format!(
                r#"<Link rel="nextPage" type="application/vnd.vmware.vcloud.query.records+xml" href="{}/api/vms/query?page={}&amp;format=records"/>"#,
                server.uri(),
                n
            )
        })
        .unwrap_or_default();
    let records: String = rows
        .iter()
        .map(|name| format!(r#"<VMRecord name="{}" numberOfCpus="2" isBusy="false"/>"#, name))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<QueryResultRecords xmlns="http://www.vmware.com/vcloud/v1.5" name="vm" page="{}" pageSize="2" total="3">{}{}</QueryResultRecords>"#,
        page, link, records
    )
}

#[tokio::test]
async fn typed_query_sends_headers_and_decodes() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vms/query"))
        .and(query_param("format", "records"))
        .and(query_param("filter", "isBusy==false"))
        .and(header("x-vcloud-authorization", "session-token"))
        .and(header("Accept", "application/*+xml;version=1.5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(vm_page(
            &server,
            1,
            &["vm1", "vm2"],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let vms = client(&server)
        .vms(&QueryParams::filter("isBusy==false"))
        .await
        .unwrap();
    assert_eq!(vms.len(), 2);
    assert_eq!(vms.total, Some(3));
    assert_eq!(vms.records[0].number_of_cpus, Some(2));
    assert_eq!(vms.records[1].is_busy, Some(false));
}

#[tokio::test]
async fn generic_query_sends_type() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("type", "datastore"))
        .and(query_param("format", "records"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<QueryResultRecords name="datastore" total="1"><DatastoreRecord name="ds-01" storageMB="2048"/></QueryResultRecords>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let datastores = client(&server)
        .datastores(&QueryParams::default())
        .await
        .unwrap();
    assert_eq!(datastores.records[0].storage_mb, Some(2048));
    assert_eq!(datastores.records[0].is_enabled, None);
}

#[tokio::test]
async fn mixed_query_keeps_row_kinds() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("type", "vm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(vm_page(
            &server,
            1,
            &["vm1"],
            None,
        )))
        .mount(&server)
        .await;

    let page = client(&server)
        .query_records(RecordKind::Vm, &QueryParams::default())
        .await
        .unwrap();
    assert_eq!(page.records[0].kind(), RecordKind::Vm);
    let typed = page.narrow::<VmRecord>().unwrap();
    assert_eq!(typed.records[0].name.as_deref(), Some("vm1"));
}

#[tokio::test]
async fn query_all_follows_next_page() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vms/query"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(vm_page(
            &server,
            2,
            &["vm3"],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vms/query"))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(vm_page(
            &server,
            1,
            &["vm1", "vm2"],
            Some(2),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let params = QueryParams::builder().page_size(2).build().unwrap();
    let all = client(&server).query_all::<VmRecord>(&params).await.unwrap();
    let names: Vec<_> = all.iter().filter_map(|vm| vm.name.clone()).collect();
    assert_eq!(names, vec!["vm1", "vm2", "vm3"]);
    assert_eq!(all.total, Some(3));
    assert!(all.next_page().is_none());
    assert!(!all.is_paginated());
}

#[tokio::test]
async fn references_query() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalogs/query"))
        .and(query_param("format", "references"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<QueryResultReferences name="catalog" page="1" pageSize="25" total="1">
                <CatalogReference href="https://vcloud.example.com/api/catalog/1" name="public"/>
            </QueryResultReferences>"#,
        ))
        .mount(&server)
        .await;

    let references = client(&server)
        .query_references(RecordKind::Catalog, &QueryParams::default())
        .await
        .unwrap();
    assert_eq!(references.record_kind(), Some(RecordKind::Catalog));
    assert_eq!(references.references[0].name.as_deref(), Some("public"));
}

#[tokio::test]
async fn server_error_body_becomes_api_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vms/query"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"<Error xmlns="http://www.vmware.com/vcloud/v1.5" majorErrorCode="400" minorErrorCode="BAD_REQUEST" message="Bad filter"/>"#,
        ))
        .mount(&server)
        .await;

    let result = client(&server)
        .vms(&QueryParams::filter("name=="))
        .await;
    match result {
        Err(VCloudAPIError::APIError {
            status,
            major_error_code,
            message,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(major_error_code, Some(400));
            assert!(message.contains("Bad filter"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn unauthorized_is_invalid_credentials() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client(&server).catalogs(&QueryParams::default()).await;
    assert_eq!(result, Err(VCloudAPIError::InvalidCredentials));
}

#[tokio::test]
async fn entity_lookup() {
    init_logging();
    let server = MockServer::start().await;
    let urn: Urn = URN.parse().unwrap();
    Mock::given(method("GET"))
        .and(path(format!("/api/entity/{}", URN)))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<Entity id="{}" name="vm1" type="application/vnd.vmware.vcloud.entity+xml"/>"#,
            URN
        )))
        .mount(&server)
        .await;

    let entity = client(&server).resolve_entity(&urn).await.unwrap().unwrap();
    assert_eq!(entity.name.as_deref(), Some("vm1"));
}

#[tokio::test]
async fn entity_lookup_not_found_is_none() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let urn: Urn = URN.parse().unwrap();
    assert_eq!(client(&server).resolve_entity(&urn).await, Ok(None));
}

#[tokio::test]
async fn slow_server_times_out() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(vm_page(&server, 1, &[], None))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = client(&server).vms(&QueryParams::default()).await;
    assert_eq!(result, Err(VCloudAPIError::Timeout));
}
