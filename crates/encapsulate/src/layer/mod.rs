// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compile-time composition of encapsulators.
//!
//! When the set of encapsulators is known statically there is no need for a type-erased
//! [`Chain`][crate::Chain]: wrap each encapsulator with [`layer`] and stack the layers in a tuple
//! ending with the callback. Tuples read outer to inner, so
//! `(layer(second), layer(first), callback).build()` behaves like
//! `create(callback, [first, second])`.
//!
//! ```
//! use encapsulate::layer::{Stack, layer};
//! use encapsulate::{Callback, Execute, Params, encapsulator_fn};
//!
//! let add = |n: i32| {
//!     encapsulator_fn(move |callback: &dyn Callback<i32, Out = i32>, params: Params<i32>| {
//!         callback.call(params.map(|v| v + n))
//!     })
//! };
//! let double = encapsulator_fn(|callback: &dyn Callback<i32, Out = i32>, params: Params<i32>| {
//!     callback.call(params.map(|v| v * 2))
//! });
//!
//! // `add(1)` runs first, then `double`, then the callback.
//! let stacked = (layer(add(1)), layer(double), Execute::new(|params: Params<i32>| params.unwrap_or(0))).build();
//!
//! assert_eq!(stacked.call(Params::Present(20)), 42);
//! ```

mod stack;
mod tuples;

use std::sync::Arc;

#[doc(inline)]
pub use stack::Stack;
/// Decorates a callable with an encapsulator. Re-exported from [`tower_layer`](https://docs.rs/tower-layer).
pub use tower_layer::Layer;

use crate::SignatureError;
use crate::chain::Link;
use crate::signature::{self, ENCAPSULATOR_SIGNATURE, Introspect};

/// A [`Layer`] that wraps a callable with one encapsulator.
///
/// The produced service is a chain link, which implements [`Callback`][crate::Callback] when the
/// encapsulator and the wrapped callable agree on the payload and output types.
#[derive(Debug)]
pub struct EncapsulateLayer<E> {
    encapsulator: Arc<E>,
}

impl<E> Clone for EncapsulateLayer<E> {
    fn clone(&self) -> Self {
        Self {
            encapsulator: Arc::clone(&self.encapsulator),
        }
    }
}

impl<S, E> Layer<S> for EncapsulateLayer<E> {
    type Service = Link<Arc<E>, S>;

    fn layer(&self, inner: S) -> Self::Service {
        Link::new(Arc::clone(&self.encapsulator), inner)
    }
}

/// Creates a layer from a statically typed encapsulator.
///
/// No signature validation happens here; use [`try_layer`] for late-bound encapsulators.
#[must_use]
pub fn layer<E>(encapsulator: E) -> EncapsulateLayer<E> {
    EncapsulateLayer {
        encapsulator: Arc::new(encapsulator),
    }
}

/// Creates a layer after checking the encapsulator's declared signature.
///
/// # Errors
///
/// Returns a [`SignatureError`] if `encapsulator` does not declare [`ENCAPSULATOR_SIGNATURE`].
pub fn try_layer<E>(encapsulator: E) -> Result<EncapsulateLayer<E>, SignatureError>
where
    E: Introspect,
{
    signature::assert_valid(&encapsulator, ENCAPSULATOR_SIGNATURE)?;
    Ok(layer(encapsulator))
}
