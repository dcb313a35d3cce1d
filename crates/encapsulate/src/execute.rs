// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{Debug, Formatter};

use crate::{Callback, Params};

/// A callback implementation that wraps a function for ad-hoc callback creation.
///
/// `Execute` turns any closure taking a [`Params`] into a [`Callback`], which is the usual way
/// to supply the terminal operation of a chain.
///
/// # Examples
///
/// ```rust
/// # use encapsulate::{Callback, Execute, Params};
/// let echo = Execute::new(|params: Params<String>| params.unwrap_or_default());
///
/// assert_eq!(echo.call(Params::Present("test".to_string())), "test");
/// assert_eq!(echo.call(Params::Absent), "");
/// ```
#[derive(Clone)]
pub struct Execute<E>(E);

impl<E> Execute<E> {
    /// Creates a new `Execute` callback from a function or closure.
    ///
    /// The provided function `e` must:
    /// - Take a [`Params<P>`]
    /// - Return an output of type `Out`
    /// - Be `Send + Sync` so the resulting chain can be shared across threads
    #[must_use]
    pub fn new<P, Out>(e: E) -> Self
    where
        E: Fn(Params<P>) -> Out + Send + Sync,
    {
        Self(e)
    }
}

impl<E, P, Out> Callback<P> for Execute<E>
where
    E: Fn(Params<P>) -> Out + Send + Sync,
{
    type Out = Out;

    fn call(&self, params: Params<P>) -> Self::Out {
        self.0(params)
    }
}

impl<E> Debug for Execute<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Execute").finish_non_exhaustive()
    }
}
