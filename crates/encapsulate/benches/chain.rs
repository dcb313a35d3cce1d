// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "Benchmarks don't require documentation")]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use encapsulate::layer::{Stack, layer};
use encapsulate::{Callback, Execute, Params, Passthrough, create, encapsulator_fn};

fn entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");

    let callback = Execute::new(|params: Params<u64>| params.unwrap_or(0));
    group.bench_function("plain", |b| b.iter(|| callback.call(black_box(Params::Present(1)))));

    let chain = create(callback.clone(), Vec::<Passthrough>::new()).unwrap();
    group.bench_function("chain-empty", |b| b.iter(|| chain.call(black_box(Params::Present(1)))));

    let chain = create(callback.clone(), [Passthrough; 8]).unwrap();
    group.bench_function("chain-passthrough-8", |b| b.iter(|| chain.call(black_box(Params::Present(1)))));

    let increment = encapsulator_fn(|callback: &dyn Callback<u64, Out = u64>, params: Params<u64>| callback.call(params.map(|v| v + 1)));
    let chain = create(callback.clone(), [increment.clone(), increment.clone(), increment.clone(), increment.clone()]).unwrap();
    group.bench_function("chain-modify-4", |b| b.iter(|| chain.call(black_box(Params::Present(1)))));

    let stacked = (
        layer(increment.clone()),
        layer(increment.clone()),
        layer(increment.clone()),
        layer(increment),
        callback.clone(),
    )
        .build();
    group.bench_function("stack-modify-4", |b| b.iter(|| stacked.call(black_box(Params::Present(1)))));

    group.bench_function("create-8", |b| b.iter(|| create(callback.clone(), [Passthrough; 8]).unwrap()));

    group.finish();
}

criterion_group!(benches, entry);
criterion_main!(benches);
