// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Encapsulate
//!
//! Wrap a callback with an ordered chain of encapsulating middleware functions.
//!
//! An *encapsulator* is one layer around a terminal operation, the *callback*. Given a
//! callback and an ordered list of encapsulators, this crate builds a single callable in
//! which each encapsulator wraps everything before it, the way decorators or middleware
//! nest. Cross-cutting behavior such as timing, retries, error translation or auth checks
//! can then be layered without any layer knowing about the others.
//!
//! ## Quick Start
//!
//! A [`Callback`] is anything taking an optional payload, [`Params`]. Use [`Execute`] to turn a
//! closure into one, and [`encapsulator_fn`] to turn a closure into an [`Encapsulator`]:
//!
//! ```
//! use encapsulate::{Callback, DynEncapsulator, Execute, Params, encapsulator_fn, run};
//!
//! let callback = Execute::new(|params: Params<u32>| params.unwrap_or(0) + 1);
//!
//! let doubled = encapsulator_fn(|callback: &dyn Callback<u32, Out = u32>, params| callback.call(params) * 2);
//! let clamped = encapsulator_fn(|callback: &dyn Callback<u32, Out = u32>, params: Params<u32>| {
//!     callback.call(params.map(|v| v.min(10)))
//! });
//!
//! // `clamped` is listed last, so it is the outermost layer and runs first.
//! let encapsulators: [DynEncapsulator<u32, u32>; 2] = [Box::new(doubled), Box::new(clamped)];
//! assert_eq!(run(callback, encapsulators, Params::Present(50))?, 22);
//! # Ok::<(), encapsulate::SignatureError>(())
//! ```
//!
//! ## Key Concepts
//!
//! - **Callback**: the terminal operation, a type implementing [`Callback`]. It is called with
//!   [`Params::Absent`] when there is no payload and with [`Params::Present`] otherwise.
//! - **Encapsulator**: one layer, a type implementing [`Encapsulator`]. It receives the callable
//!   it wraps and the payload, and decides whether and how to call the wrapped callable.
//! - **Chain**: the composed callable returned by [`create`]. It implements [`Callback`] itself,
//!   so every layer sees the same calling convention whether it wraps the raw callback or
//!   another layer.
//!
//! ## Ordering
//!
//! Encapsulators are folded around the callback in list order, so the first one sits closest
//! to the callback and the last one is the outermost layer:
//!
//! ```text
//! create(callback, [e1, e2, e3])  =>  e3( e2( e1( callback ) ) )
//! ```
//!
//! Calling the chain runs `e3` first. `e2` only runs if `e3` calls its callback.
//!
//! ## Signatures
//!
//! Every encapsulator must declare a required named `callback` parameter followed by an
//! optional named `params` parameter ([`ENCAPSULATOR_SIGNATURE`][signature::ENCAPSULATOR_SIGNATURE]).
//! Closures passed to [`encapsulator_fn`] have that shape by construction. Late-bound
//! encapsulators created with [`Declared`] describe their parameters at run time, so [`create`]
//! validates every encapsulator before building anything and fails with a [`SignatureError`]
//! on the first mismatch.
//!
//! ## Failures
//!
//! Nothing raised inside a layer is caught by the chain. Choose a `Result` output type and
//! let an outer encapsulator translate failures of the layers it wraps:
//!
//! ```
//! use encapsulate::{Callback, DynEncapsulator, Execute, Params, encapsulator_fn, run};
//!
//! type Out = Result<&'static str, String>;
//!
//! let faulty = encapsulator_fn(|_callback: &dyn Callback<(), Out = Out>, _params| Err("error occurred".to_string()));
//! let recovering = encapsulator_fn(|callback: &dyn Callback<(), Out = Out>, params| {
//!     callback.call(params).or(Ok("recovered"))
//! });
//!
//! let callback = Execute::new(|_: Params<()>| Ok("done"));
//! let encapsulators: [DynEncapsulator<(), Out>; 2] = [Box::new(faulty), Box::new(recovering)];
//! assert_eq!(run(callback, encapsulators, Params::Absent)?, Ok("recovered"));
//! # Ok::<(), encapsulate::SignatureError>(())
//! ```
//!
//! ## Static composition
//!
//! When the encapsulators are known at compile time, the [`layer`] module stacks them without
//! type erasure using tuples, see [`layer::Stack`].
//!
//! ## Features
//!
//! - **`logs`**: Emits `tracing` events when chains are built or encapsulators are rejected.

mod params;
pub use params::Params;

mod callback;
pub use callback::{Callback, invoke};

mod execute;
pub use execute::Execute;

mod error;
pub use error::SignatureError;

pub mod signature;
#[doc(inline)]
pub use signature::{Introspect, Parameter, ParameterKind};

mod encapsulator;
pub use encapsulator::{Declared, DynEncapsulator, Encapsulator, FromFn, Passthrough, encapsulator_fn};

mod chain;
pub use chain::{Chain, ChainBuilder, Link, create, run};

pub mod layer;

pub mod prelude;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
pub(crate) mod testing;
