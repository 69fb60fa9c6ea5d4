//! # OneBot Runtime
//!
//! Wires the correlation core to an in-process host and runs a short
//! scripted session over a single connection.
//!
//! ## Startup Sequence
//!
//! 1. Load telemetry and broker configuration from the environment
//! 2. Install logging and register metrics
//! 3. Register a channel connection and spawn the simulated host
//! 4. Start the response listener and the sweeper
//! 5. Run the session, publish broker statistics and print the metrics

mod host;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};

use onebot_api::{MessageSegment, OneBotApi};
use onebot_core::{
    channel_transport, spawn_reference_peer, sweep_task, ApiCaller, BrokerConfig,
    ConnectionId, CorrelationBroker, InMemoryConnectionRegistry, ResponseDispatcher,
    ResponseListener, StatsSnapshot,
};
use onebot_telemetry::{
    encode_metrics, init_telemetry, HistogramTimer, TelemetryConfig, CALLS_ABANDONED,
    CALLS_REGISTERED, CALLS_RESOLVED, CALLS_TIMED_OUT, CALL_DURATION, PENDING_CALLS,
    RESPONSES_UNMATCHED,
};

const CHANNEL_CAPACITY: usize = 64;
const LOOPBACK_GROUP: i64 = 100;

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(&TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;

    let config = BrokerConfig::from_env();
    config.validate().context("Invalid broker configuration")?;
    info!(
        api_timeout_ms = config.api_timeout_ms,
        sweep_interval_ms = config.sweep_interval_ms,
        "Starting OneBot runtime"
    );

    let broker = Arc::new(CorrelationBroker::from_config(&config));
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    let (transport, outbound) = channel_transport(CHANNEL_CAPACITY);
    let (inbound_tx, inbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let connection = registry.connect(transport);
    let host = spawn_reference_peer(outbound, inbound_tx, host::simulated_host);

    let dispatcher = Arc::new(ResponseDispatcher::new(Arc::clone(&broker)));
    let listener = tokio::spawn(ResponseListener::new(dispatcher, inbound_rx).run());
    let sweeper = tokio::spawn(sweep_task(
        Arc::clone(&broker),
        config.sweep_interval(),
        config.api_timeout(),
    ));

    let caller = Arc::new(ApiCaller::new(Arc::clone(&broker), Arc::clone(&registry) as _));
    let api = OneBotApi::new(caller);

    run_session(&api, connection).await?;

    publish_stats(&broker.snapshot());
    info!(stats = ?broker.snapshot(), "Session finished");
    info!("Metrics:\n{}", encode_metrics().context("Failed to encode metrics")?);

    // Closing the connection lets the host and the listener drain and stop
    sweeper.abort();
    registry.remove(&connection);
    drop(api);
    host.await.context("Simulated host panicked")?;
    listener.await.context("Response listener panicked")?;

    Ok(())
}

/// A few calls sharing the one connection, one of them concurrent with the rest
async fn run_session(api: &OneBotApi, connection: ConnectionId) -> Result<()> {
    let (login, version, status) = tokio::join!(
        timed(api.get_login_info(connection)),
        timed(api.get_version_info(connection)),
        timed(api.get_status(connection)),
    );

    match login.data {
        Some(login) => info!(user_id = login.user_id, nickname = %login.nickname, "Logged in"),
        None => warn!(retcode = login.retcode, "get_login_info failed"),
    }
    if let Some(version) = version.data {
        info!(client = ?version.client, version = %version.version, "Host version");
    }
    if let Some(status) = status.data {
        info!(online = status.online, good = status.good, "Host status");
    }

    let sent = timed(api.send_group_message(
        connection,
        LOOPBACK_GROUP,
        vec![MessageSegment::text("hello from onebot-link")],
    ))
    .await
    .context("send_group_message rejected its arguments")?;
    info!(retcode = sent.retcode, message_id = ?sent.data, "Group message sent");

    if let Some(message_id) = sent.data {
        api.delete_message(connection, message_id)
            .await
            .context("delete_message failed to encode")?;
    }

    // Unknown connections fail fast without registering anything
    let missing = api.get_login_info(ConnectionId::new()).await;
    info!(
        retcode = missing.retcode,
        status = %missing.status,
        "Call against a missing connection"
    );

    Ok(())
}

/// Record one call-duration sample for `call`
async fn timed<T>(call: impl Future<Output = T>) -> T {
    let _timer = HistogramTimer::new(&CALL_DURATION);
    call.await
}

fn publish_stats(stats: &StatsSnapshot) {
    PENDING_CALLS.set(stats.pending as f64);
    CALLS_REGISTERED.set(stats.registered as f64);
    CALLS_RESOLVED.set(stats.resolved as f64);
    CALLS_TIMED_OUT.set(stats.timeouts as f64);
    CALLS_ABANDONED.set(stats.abandoned as f64);
    RESPONSES_UNMATCHED.set(stats.unmatched as f64);
}
