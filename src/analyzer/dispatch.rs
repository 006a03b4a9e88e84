//! Fire-and-report request dispatch
//!
//! Each triggered analysis runs in its own tokio task and reports back once
//! with `AnalysisEvent::Settled`. Nothing is cancelled: overlapping requests
//! all run to completion and settle in whatever order the server answers.

use super::{analyze_once, AnalysisRequest};
use crate::client::SentimentClient;
use crate::events::AnalysisEvent;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<SentimentClient>,
    strict_schema: bool,
    events: mpsc::Sender<AnalysisEvent>,
}

impl Dispatcher {
    pub fn new(
        client: Arc<SentimentClient>,
        strict_schema: bool,
        events: mpsc::Sender<AnalysisEvent>,
    ) -> Self {
        Self {
            client,
            strict_schema,
            events,
        }
    }

    /// Send `request` in the background
    pub fn dispatch(&self, request: AnalysisRequest) -> JoinHandle<()> {
        let client = self.client.clone();
        let strict_schema = self.strict_schema;
        let events = self.events.clone();

        tracing::debug!("Dispatching request #{}", request.generation);

        tokio::spawn(async move {
            let started = Instant::now();
            let result = analyze_once(&client, &request.text, strict_schema).await;

            let event = AnalysisEvent::Settled {
                generation: request.generation,
                result,
                elapsed: started.elapsed(),
            };

            // The UI may already have quit
            if events.send(event).await.is_err() {
                tracing::debug!("Request #{} settled after UI shutdown", request.generation);
            }
        })
    }
}
