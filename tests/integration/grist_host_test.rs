//! GristRestHost against a mock Grist document API

use gristfetch::shared::SyncError;
use gristfetch::widget::{GristRestHost, HostBinding, RecordUpdate, WidgetOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

#[tokio::test]
async fn test_ready_finds_required_columns() {
    let server = MockServer::start().await;
    mount_columns(&server, &["URL", "Content", "Notes"]).await;

    let host = crate::assert_ok!(GristRestHost::new(host_config(&server)));
    crate::assert_ok!(host.ready(&WidgetOptions::default()).await);
}

#[tokio::test]
async fn test_ready_reports_missing_column() {
    let server = MockServer::start().await;
    mount_columns(&server, &["URL"]).await;

    let host = crate::assert_ok!(GristRestHost::new(host_config(&server)));
    let err = host.ready(&WidgetOptions::default()).await.unwrap_err();

    crate::assert_contains!(err.display_message(), "Content");
    assert_eq!(err, SyncError::host("column Content not found in table Pages"));
}

#[tokio::test]
async fn test_ready_checks_mapped_columns() {
    let server = MockServer::start().await;
    mount_columns(&server, &["Link", "Body"]).await;

    let mut config = host_config(&server);
    config.columns.insert("URL".into(), "Link".into());
    config.columns.insert("Content".into(), "Body".into());

    let host = crate::assert_ok!(GristRestHost::new(config));
    crate::assert_ok!(host.ready(&WidgetOptions::default()).await);
}

#[tokio::test]
async fn test_list_records_flattens_fields() {
    let server = MockServer::start().await;
    mount_records(
        &server,
        json!([
            {"id": 1, "fields": {"URL": "https://a.example", "Content": ""}},
            {"id": 2, "fields": {"URL": null, "Content": "<p>old</p>"}}
        ]),
    )
    .await;

    let host = crate::assert_ok!(GristRestHost::new(host_config(&server)));
    let records = crate::assert_ok!(host.list_records().await);

    assert_eq!(
        records,
        vec![
            json!({"id": 1, "URL": "https://a.example", "Content": ""}),
            json!({"id": 2, "URL": null, "Content": "<p>old</p>"}),
        ]
    );
}

#[tokio::test]
async fn test_update_record_sends_patch_with_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(records_path()))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_json(json!({
            "records": [{"id": 7, "fields": {"Content": "<p>new</p>"}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let host = crate::assert_ok!(GristRestHost::new(host_config(&server)));
    let update = RecordUpdate::single(7, "Content", json!("<p>new</p>"));

    crate::assert_ok!(host.update_record(TABLE_ID, update).await);
}

#[tokio::test]
async fn test_rejected_update_is_host_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(records_path()))
        .respond_with(ResponseTemplate::new(403).set_body_string("no write access"))
        .mount(&server)
        .await;

    let host = crate::assert_ok!(GristRestHost::new(host_config(&server)));
    let result = host
        .update_record(TABLE_ID, RecordUpdate::single(7, "Content", json!("x")))
        .await;

    crate::assert_err!(result, SyncError::Host(_));
    let message = host
        .update_record(TABLE_ID, RecordUpdate::single(7, "Content", json!("x")))
        .await
        .unwrap_err()
        .display_message();
    assert_eq!(message, "403 Forbidden: no write access");
}
