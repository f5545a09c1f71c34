//! # Admission Benchmarks
//!
//! Cost of the PodReady decision path through a registry-built chain.
//!
//! Run with: `cargo bench -p podready-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use podready_core::{
    Attributes, FeatureGates, GroupVersionResource, MutatingChain, ObjectMeta, Operation,
    PLUGIN_NAME, Plugins, Pod, PodReadinessGate,
};
use std::collections::BTreeMap;
use std::hint::black_box;
use std::sync::Arc;

fn build_chain(enabled: bool) -> MutatingChain {
    let mut gates = FeatureGates::with_defaults();
    gates
        .set(if enabled {
            "PodReadinessGates=true"
        } else {
            "PodReadinessGates=false"
        })
        .expect("set");

    let mut plugins = Plugins::new();
    podready_core::plugin::register_all(&mut plugins, Arc::new(gates)).expect("register");
    plugins
        .new_from_plugins(&[PLUGIN_NAME.to_string()], &BTreeMap::new())
        .expect("chain")
}

/// A pod-create request carrying `existing` readiness gates.
fn pod_request(existing: usize) -> Attributes {
    let mut pod = Pod::new(ObjectMeta::namespaced("default", "bench"));
    pod.spec.readiness_gates = (0..existing)
        .map(|i| PodReadinessGate::new(format!("example.com/gate-{}", i)))
        .collect();
    Attributes::new(
        Operation::Create,
        GroupVersionResource::new("", "v1", "pods"),
        Some(pod.into()),
    )
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_admit_pod(c: &mut Criterion) {
    let mut group = c.benchmark_group("admit_pod");

    for enabled in [false, true] {
        let chain = build_chain(enabled);
        for existing in [0usize, 8, 64] {
            let id = format!("enabled={}/gates={}", enabled, existing);
            group.bench_with_input(BenchmarkId::from_parameter(id), &existing, |b, &existing| {
                b.iter_batched(
                    || pod_request(existing),
                    |mut attrs| {
                        let _ = chain.admit(&mut attrs);
                        black_box(attrs)
                    },
                    criterion::BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

fn bench_pass_through(c: &mut Criterion) {
    let chain = build_chain(true);
    c.bench_function("pass_through_nodes", |b| {
        b.iter_batched(
            || {
                Attributes::new(
                    Operation::Create,
                    GroupVersionResource::new("", "v1", "nodes"),
                    Some(podready_core::Node::new(ObjectMeta::namespaced("", "worker")).into()),
                )
            },
            |mut attrs| {
                let _ = chain.admit(&mut attrs);
                black_box(attrs)
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_admit_pod, bench_pass_through);
criterion_main!(benches);
