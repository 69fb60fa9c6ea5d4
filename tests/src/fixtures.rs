//! Loopback harness: one channel connection to a reference host, with the
//! response listener running and a typed API on top.

use std::sync::Arc;
use std::time::Duration;

use onebot_api::OneBotApi;
use onebot_core::{
    channel_transport, spawn_reference_peer, ApiCaller, ConnectionId, CorrelationBroker,
    InMemoryConnectionRegistry, PeerReply, RequestEnvelope, ResponseDispatcher, ResponseListener,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const CHANNEL_CAPACITY: usize = 256;

pub struct Harness {
    pub broker: Arc<CorrelationBroker>,
    pub registry: Arc<InMemoryConnectionRegistry>,
    pub caller: Arc<ApiCaller>,
    pub api: OneBotApi,
    pub connection: ConnectionId,
    /// Injects raw frames as if the host had sent them
    pub inbound: mpsc::Sender<String>,
    /// Unsolicited event frames seen by the listener
    pub events: mpsc::Receiver<Value>,
    pub host: JoinHandle<()>,
    pub listener: JoinHandle<()>,
}

impl Harness {
    /// Start a harness whose host answers with `handler`
    pub fn start<F>(timeout: Duration, handler: F) -> Self
    where
        F: Fn(&RequestEnvelope) -> Option<PeerReply> + Send + 'static,
    {
        let broker = Arc::new(CorrelationBroker::new(timeout));
        let registry = Arc::new(InMemoryConnectionRegistry::new());

        let (transport, outbound) = channel_transport(CHANNEL_CAPACITY);
        let (inbound_tx, inbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (events_tx, events) = mpsc::channel(CHANNEL_CAPACITY);
        let connection = registry.connect(transport);

        let host = spawn_reference_peer(outbound, inbound_tx.clone(), handler);
        let dispatcher = Arc::new(ResponseDispatcher::new(Arc::clone(&broker)));
        let listener = tokio::spawn(
            ResponseListener::new(dispatcher, inbound_rx)
                .with_event_sink(events_tx)
                .run(),
        );

        let caller = Arc::new(ApiCaller::new(Arc::clone(&broker), Arc::clone(&registry) as _));
        let api = OneBotApi::new(Arc::clone(&caller));

        Self {
            broker,
            registry,
            caller,
            api,
            connection,
            inbound: inbound_tx,
            events,
            host,
            listener,
        }
    }

    /// Host that echoes the request params back as `data`
    pub fn echoing(timeout: Duration) -> Self {
        Self::start(timeout, |request| Some(PeerReply::ok(request.params.clone())))
    }

    /// Drop the connection and wait for the host and listener to stop
    pub async fn shutdown(self) {
        self.registry.remove(&self.connection);
        drop(self.api);
        drop(self.caller);
        drop(self.inbound);
        let _ = self.host.await;
        let _ = self.listener.await;
    }
}
