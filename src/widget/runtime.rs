//! Event loop feeding [`WidgetEvent`]s to a [`SyncController`].
//!
//! Record changes are handled inline. Fetches run on their own tasks so the
//! loop keeps taking record changes while a page is downloading; the
//! controller's in-flight guard rejects a second fetch.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::shared::event::{EventReceiver, WidgetEvent};
use crate::widget::controller::{FetchOutcome, SyncController};
use crate::widget::host::HostBinding;
use crate::widget::sanitize::Sanitizer;
use crate::widget::transport::Transport;

/// Consume events until `Shutdown` or until every sender is dropped, then wait
/// for running fetches to finish.
pub async fn run<H, T, S>(controller: Arc<SyncController<H, T, S>>, mut events: EventReceiver)
where
    H: HostBinding + ?Sized + 'static,
    T: Transport + 'static,
    S: Sanitizer + 'static,
{
    let mut fetches: JoinSet<FetchOutcome> = JoinSet::new();
    tracing::debug!("Sync event loop started");

    while let Some(event) = events.recv().await {
        tracing::trace!("event: {}", event.kind());
        match event {
            WidgetEvent::RecordChanged { record, mapping } => {
                if let Some(target) = controller.on_active_record_changed(&record, mapping.as_ref()) {
                    let controller = Arc::clone(&controller);
                    fetches.spawn(async move { controller.fetch_and_update(&target).await });
                }
            }
            WidgetEvent::FetchRequested => {
                let controller = Arc::clone(&controller);
                fetches.spawn(async move { controller.on_fetch_requested().await });
            }
            WidgetEvent::Shutdown => break,
        }

        while let Some(finished) = fetches.try_join_next() {
            log_finished(finished);
        }
    }

    while let Some(finished) = fetches.join_next().await {
        log_finished(finished);
    }
    tracing::debug!("Sync event loop stopped");
}

fn log_finished(finished: Result<FetchOutcome, tokio::task::JoinError>) {
    match finished {
        Ok(outcome) => tracing::debug!("fetch finished: {:?}", outcome),
        Err(err) => tracing::error!("fetch task failed: {}", err),
    }
}
