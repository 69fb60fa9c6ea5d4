//! # Correlation Broker Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | register + resolve | map insert, remove and oneshot handoff |
//! | loopback call | full round trip through caller, channel host and listener |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use onebot_core::{
    channel_transport, spawn_reference_peer, ApiCaller, CorrelationBroker,
    InMemoryConnectionRegistry, PeerReply, RequestEnvelope, ResponseDispatcher, ResponseListener,
};

fn bench_register_resolve(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("broker");

    for size in [1usize, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("register_resolve", size),
            &size,
            |b, &size| {
                let broker = CorrelationBroker::new(Duration::from_secs(5));
                b.iter(|| {
                    rt.block_on(async {
                        let replies: Vec<_> =
                            (0..size).map(|_| broker.register("bench")).collect();
                        for reply in &replies {
                            broker.resolve(reply.correlation_id(), json!(1));
                        }
                        for reply in replies {
                            black_box(
                                broker
                                    .await_reply(reply, Duration::from_secs(1))
                                    .await
                                    .is_ok(),
                            );
                        }
                    })
                })
            },
        );
    }

    group.finish();
}

fn bench_loopback_call(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let (caller, connection) = rt.block_on(async {
        let broker = Arc::new(CorrelationBroker::new(Duration::from_secs(5)));
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (transport, outbound) = channel_transport(1024);
        let (inbound_tx, inbound_rx) = mpsc::channel(1024);
        let connection = registry.connect(transport);
        spawn_reference_peer(outbound, inbound_tx, |request| {
            Some(PeerReply::ok(request.params.clone()))
        });
        let dispatcher = Arc::new(ResponseDispatcher::new(Arc::clone(&broker)));
        tokio::spawn(ResponseListener::new(dispatcher, inbound_rx).run());
        (ApiCaller::new(broker, registry), connection)
    });

    c.bench_function("loopback_call", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(
                    caller
                        .call(connection, RequestEnvelope::new("echo", json!({"n": 1})))
                        .await
                        .is_ok(),
                )
            })
        })
    });
}

criterion_group!(benches, bench_register_resolve, bench_loopback_call);
criterion_main!(benches);
