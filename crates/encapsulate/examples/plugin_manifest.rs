// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Late-bound encapsulators.
//!
//! Encapsulators assembled at run time declare their own parameters. The chain refuses to build
//! when a declaration does not match, before anything runs.

use encapsulate::signature::ENCAPSULATOR_SIGNATURE;
use encapsulate::{Chain, Declared, Execute, Parameter, ParameterKind, Params};

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let audit = Declared::<u32, u32>::new("audit", ENCAPSULATOR_SIGNATURE.to_vec(), |callback, params: Params<u32>| {
        println!("audit: payload present = {}", params.is_present());
        callback.call(params)
    });

    // Declares a positional parameter where a named `callback` is required.
    let outdated = Declared::<u32, u32>::new(
        "outdated",
        [Parameter::new(ParameterKind::Required, "callback")],
        |callback, params: Params<u32>| callback.call(params),
    );

    let callback = || Execute::new(|params: Params<u32>| params.unwrap_or(0) * 10);

    match Chain::builder(callback()).name("plugins").encapsulate(audit.clone()).build() {
        Ok(chain) => println!("result: {}", encapsulate::invoke(&chain, Params::Present(4))),
        Err(error) => println!("rejected: {error}"),
    }

    match Chain::builder(callback()).name("plugins").encapsulate(audit).encapsulate(outdated).build() {
        Ok(chain) => println!("result: {}", encapsulate::invoke(&chain, Params::Present(4))),
        Err(error) => println!("rejected: {error}"),
    }
}
