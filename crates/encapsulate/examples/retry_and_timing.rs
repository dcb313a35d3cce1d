// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Retry and timing encapsulators.
//!
//! Wraps a flaky operation with a retrying layer and a timing layer around it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use encapsulate::{Callback, DynEncapsulator, Execute, Params, encapsulator_fn, run};

type Out = Result<String, String>;

fn main() {
    let attempts = Arc::new(AtomicU32::new(0));

    // Fails twice before succeeding.
    let flaky = Execute::new(move |params: Params<String>| {
        let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
        if attempt < 3 {
            Err(format!("attempt {attempt} failed"))
        } else {
            Ok(format!("fetched {}", params.unwrap_or_else(|| "nothing".to_string())))
        }
    });

    let retry = encapsulator_fn(|callback: &dyn Callback<String, Out = Out>, params: Params<String>| {
        let mut last = callback.call(params.clone());
        for _ in 0..3 {
            match &last {
                Ok(_) => break,
                Err(error) => println!("retrying after: {error}"),
            }
            last = callback.call(params.clone());
        }
        last
    });

    let timing = encapsulator_fn(|callback: &dyn Callback<String, Out = Out>, params| {
        let started = Instant::now();
        let result = callback.call(params);
        println!("took {:?}", started.elapsed());
        result
    });

    // `timing` is listed last, so it wraps `retry`, which wraps the flaky callback.
    let encapsulators: [DynEncapsulator<String, Out>; 2] = [Box::new(retry), Box::new(timing)];

    match run(flaky, encapsulators, Params::Present("report".to_string())) {
        Ok(Ok(value)) => println!("{value}"),
        Ok(Err(error)) => println!("gave up: {error}"),
        Err(error) => println!("malformed chain: {error}"),
    }
}
