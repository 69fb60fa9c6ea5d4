//! Inbound side: classify frames and hand responses to the broker.

use crate::adapters::pending::CorrelationBroker;
use crate::domain::correlation::CorrelationId;
use crate::domain::envelope::{extract_echo, ECHO_FIELD};
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// What an inbound frame is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Reply to an API request
    Response,
    /// Unsolicited event pushed by the host
    Event,
    /// Neither
    Unrecognized,
}

/// Events carry `post_type`; responses carry `echo`.
pub fn classify(frame: &Value) -> FrameKind {
    if frame.get("post_type").is_some() {
        FrameKind::Event
    } else if frame.get(ECHO_FIELD).is_some() {
        FrameKind::Response
    } else {
        FrameKind::Unrecognized
    }
}

/// Forwards response frames to the broker. No business logic.
pub struct ResponseDispatcher {
    broker: Arc<CorrelationBroker>,
}

impl ResponseDispatcher {
    pub fn new(broker: Arc<CorrelationBroker>) -> Self {
        Self { broker }
    }

    /// Entry point for a frame already known to answer `correlation_id`.
    pub fn on_response_frame(&self, correlation_id: CorrelationId, payload: Value) -> bool {
        self.broker.resolve(correlation_id, payload)
    }

    /// Read the correlation field of a response frame and forward it.
    pub fn dispatch(&self, frame: Value) -> bool {
        match extract_echo(&frame) {
            Some(correlation_id) => self.on_response_frame(correlation_id, frame),
            None => {
                self.broker
                    .stats()
                    .total_unmatched
                    .fetch_add(1, Ordering::Relaxed);
                debug!(echo = %frame[ECHO_FIELD], "Response without a usable correlation ID");
                false
            }
        }
    }
}

/// Drives a stream of raw inbound text frames
pub struct ResponseListener {
    dispatcher: Arc<ResponseDispatcher>,
    inbound: mpsc::Receiver<String>,
    events: Option<mpsc::Sender<Value>>,
}

impl ResponseListener {
    pub fn new(dispatcher: Arc<ResponseDispatcher>, inbound: mpsc::Receiver<String>) -> Self {
        Self {
            dispatcher,
            inbound,
            events: None,
        }
    }

    /// Forward event frames to `events` instead of dropping them
    pub fn with_event_sink(mut self, events: mpsc::Sender<Value>) -> Self {
        self.events = Some(events);
        self
    }

    /// Run the listener loop until the inbound channel closes
    pub async fn run(mut self) {
        while let Some(text) = self.inbound.recv().await {
            self.handle_frame(&text);
        }
        warn!("Inbound channel closed, stopping response listener");
    }

    fn handle_frame(&self, text: &str) {
        let frame: Value = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Dropping unparseable inbound frame");
                return;
            }
        };

        match classify(&frame) {
            FrameKind::Response => {
                self.dispatcher.dispatch(frame);
            }
            FrameKind::Event => match &self.events {
                // Never stall response dispatch behind a slow event consumer
                Some(events) => {
                    if let Err(e) = events.try_send(frame) {
                        warn!(error = %e, "Event sink unavailable, dropping event");
                    }
                }
                None => debug!("Dropping event frame, no event sink"),
            },
            FrameKind::Unrecognized => debug!("Dropping unrecognized inbound frame"),
        }
    }
}
