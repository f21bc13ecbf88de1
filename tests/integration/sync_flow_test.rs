//! Record selection to document update, end to end over HTTP

use std::sync::Arc;
use std::time::Duration;

use gristfetch::shared::{event, AppConfig, WidgetEvent};
use gristfetch::widget::{
    runtime, ControllerOptions, GristRestHost, HostBinding, HtmlSanitizer, ReqwestTransport,
    StateReader, SyncController, SyncPhase, SyncState,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

struct Widget {
    host: Arc<GristRestHost>,
    events: event::EventSender,
    reader: StateReader,
    handle: tokio::task::JoinHandle<()>,
}

fn start(config: AppConfig) -> Widget {
    let host = Arc::new(GristRestHost::new(config.clone()).expect("valid host"));
    let controller = Arc::new(SyncController::new(
        Arc::clone(&host),
        ReqwestTransport::default(),
        HtmlSanitizer::new(),
        ControllerOptions::from_config(&config),
    ));
    let (events, rx) = event::channel();
    host.on_record_change(events.clone());
    let reader = controller.subscribe();
    let handle = tokio::spawn(runtime::run(controller, rx));
    Widget {
        host,
        events,
        reader,
        handle,
    }
}

impl Widget {
    async fn settle(&mut self) -> SyncState {
        tokio::time::timeout(
            Duration::from_secs(5),
            self.reader.wait_for(|state| state.phase.is_terminal()),
        )
        .await
        .expect("sequence finished in time")
        .expect("controller alive")
    }

    async fn stop(self) {
        self.events.send(WidgetEvent::Shutdown).unwrap();
        self.handle.await.unwrap();
    }
}

async fn expect_patch(server: &MockServer, id: i64, content: &str, times: u64) {
    Mock::given(method("PATCH"))
        .and(path(records_path()))
        .and(body_json(json!({
            "records": [{"id": id, "fields": {"Content": content}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_writes_sanitized_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/article", 200, "<script>alert(1)</script><p>Hello</p>").await;
    expect_patch(&server, 7, "<p>Hello</p>", 1).await;

    let mut widget = start(host_config(&server));
    let url = format!("{}/article", server.uri());
    widget.host.select(json!({"id": 7, "URL": url, "Content": ""}));
    widget.events.send(WidgetEvent::FetchRequested).unwrap();

    let state = widget.settle().await;
    assert_eq!(state.phase, SyncPhase::Done);
    assert_eq!(state.status, "Content updated successfully.");
    assert_eq!(state.active_url.as_deref(), Some(url.as_str()));
    assert_eq!(state.last_fetched_content.as_deref(), Some("<p>Hello</p>"));
    widget.stop().await;
}

#[tokio::test]
async fn test_http_error_leaves_document_alone() {
    let server = MockServer::start().await;
    mount_page(&server, "/missing", 404, "not here").await;
    expect_patch(&server, 7, "not here", 0).await;

    let mut widget = start(host_config(&server));
    widget
        .host
        .select(json!({"id": 7, "URL": format!("{}/missing", server.uri())}));
    widget.events.send(WidgetEvent::FetchRequested).unwrap();

    let state = widget.settle().await;
    assert_eq!(state.phase, SyncPhase::Error);
    assert_eq!(state.status, "Error fetching content: Not Found");
    assert_eq!(state.last_fetched_content, None);
    widget.stop().await;
}

#[tokio::test]
async fn test_record_without_url_never_fetches() {
    let server = MockServer::start().await;
    expect_patch(&server, 3, "", 0).await;

    let mut widget = start(host_config(&server));
    widget.host.select(json!({"id": 3, "URL": ""}));

    let state = widget.settle().await;
    assert_eq!(state.phase, SyncPhase::NoUrl);
    assert_eq!(state.status, "No URL provided.");

    widget.events.send(WidgetEvent::FetchRequested).unwrap();
    widget.stop().await;
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn test_auto_fetch_uses_mapped_columns() {
    let server = MockServer::start().await;
    mount_page(&server, "/mapped", 200, "<em>mapped</em>").await;
    Mock::given(method("PATCH"))
        .and(path(records_path()))
        .and(body_json(json!({
            "records": [{"id": 9, "fields": {"Body": "<em>mapped</em>"}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = host_config(&server);
    config.auto_fetch = true;
    config.columns.insert("URL".into(), "Link".into());
    config.columns.insert("Content".into(), "Body".into());

    let mut widget = start(config);
    widget
        .host
        .select(json!({"id": 9, "Link": format!("{}/mapped", server.uri()), "Body": ""}));

    let state = widget.settle().await;
    assert_eq!(state.phase, SyncPhase::Done);
    assert_eq!(state.active_record_id, Some(9));
    assert_eq!(state.active_table_id.as_deref(), Some(TABLE_ID));
    widget.stop().await;
}
