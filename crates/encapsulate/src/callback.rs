// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::Params;

/// A synchronous operation `Params<P> → Out`.
///
/// This is the calling convention shared by the terminal callback, every chain link and the
/// fully composed [`Chain`][crate::Chain]. Implement it directly for custom callbacks, or use
/// [`Execute`][crate::Execute] to wrap closures.
///
/// See the [crate documentation][crate] for how callbacks are wrapped with encapsulators.
pub trait Callback<P>: Send + Sync {
    /// The output type returned by this callback.
    type Out;

    /// Invokes the callback.
    ///
    /// [`Params::Absent`] stands for a call without a payload, [`Params::Present`] for a
    /// call with exactly one payload value.
    ///
    /// # Examples
    ///
    /// ```
    /// use encapsulate::{Callback, Params};
    ///
    /// struct Greeter;
    ///
    /// impl Callback<String> for Greeter {
    ///     type Out = String;
    ///
    ///     fn call(&self, params: Params<String>) -> Self::Out {
    ///         format!("Hello, {}!", params.unwrap_or_else(|| "World".to_string()))
    ///     }
    /// }
    ///
    /// assert_eq!(Greeter.call(Params::Absent), "Hello, World!");
    /// ```
    fn call(&self, params: Params<P>) -> Self::Out;
}

impl<S, P> Callback<P> for Box<S>
where
    S: Callback<P> + ?Sized,
{
    type Out = S::Out;

    fn call(&self, params: Params<P>) -> Self::Out {
        (**self).call(params)
    }
}

impl<S, P> Callback<P> for std::sync::Arc<S>
where
    S: Callback<P> + ?Sized,
{
    type Out = S::Out;

    fn call(&self, params: Params<P>) -> Self::Out {
        (**self).call(params)
    }
}

/// Invokes `callable` with an optional payload and returns whatever it returns.
///
/// Works uniformly on a raw callback, a single chain link or a full chain. Nothing raised
/// inside the callable is caught.
///
/// # Examples
///
/// ```
/// use encapsulate::{Execute, Params, invoke};
///
/// let double = Execute::new(|params: Params<i32>| params.unwrap_or(0) * 2);
///
/// assert_eq!(invoke(&double, Params::Present(21)), 42);
/// assert_eq!(invoke(&double, Params::Absent), 0);
/// ```
pub fn invoke<P, C>(callable: &C, params: Params<P>) -> C::Out
where
    C: Callback<P> + ?Sized,
{
    callable.call(params)
}
