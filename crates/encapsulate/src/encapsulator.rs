// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::signature::{ENCAPSULATOR_SIGNATURE, Introspect, Parameter};
use crate::{Callback, Params};

/// One layer of a chain.
///
/// An encapsulator receives the callable it wraps (`callback`) and the payload (`params`) and
/// decides what happens: it may do work before or after calling `callback`, call it several
/// times, pass on a different payload, replace the result, or not call it at all.
///
/// Use [`encapsulator_fn`] to turn a closure into an encapsulator, [`Declared`] for
/// encapsulators whose parameter list is only known at run time, or implement the trait
/// directly.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
///
/// use encapsulate::signature::{ENCAPSULATOR_SIGNATURE, Introspect, Parameter};
/// use encapsulate::{Callback, Encapsulator, Execute, Params, run};
///
/// struct Double;
///
/// impl Introspect for Double {
///     fn parameters(&self) -> Cow<'_, [Parameter]> {
///         Cow::Borrowed(ENCAPSULATOR_SIGNATURE)
///     }
/// }
///
/// impl Encapsulator<i32, i32> for Double {
///     fn encapsulate(&self, callback: &dyn Callback<i32, Out = i32>, params: Params<i32>) -> i32 {
///         callback.call(params) * 2
///     }
/// }
///
/// let callback = Execute::new(|params: Params<i32>| params.unwrap_or(1));
/// assert_eq!(run(callback, [Double], Params::Present(21))?, 42);
/// # Ok::<(), encapsulate::SignatureError>(())
/// ```
pub trait Encapsulator<P, Out>: Introspect + Send + Sync {
    /// Runs this layer around `callback`.
    fn encapsulate(&self, callback: &dyn Callback<P, Out = Out>, params: Params<P>) -> Out;
}

/// A type-erased encapsulator, for lists mixing different encapsulator types.
pub type DynEncapsulator<P, Out> = Box<dyn Encapsulator<P, Out>>;

impl<E, P, Out> Encapsulator<P, Out> for Box<E>
where
    E: Encapsulator<P, Out> + ?Sized,
{
    fn encapsulate(&self, callback: &dyn Callback<P, Out = Out>, params: Params<P>) -> Out {
        (**self).encapsulate(callback, params)
    }
}

impl<E, P, Out> Encapsulator<P, Out> for Arc<E>
where
    E: Encapsulator<P, Out> + ?Sized,
{
    fn encapsulate(&self, callback: &dyn Callback<P, Out = Out>, params: Params<P>) -> Out {
        (**self).encapsulate(callback, params)
    }
}

/// Creates an encapsulator from a closure taking `(callback, params)`.
///
/// The closure's shape is checked by the compiler, so the result always passes signature
/// validation.
///
/// # Examples
///
/// ```
/// use encapsulate::{Callback, Execute, Params, encapsulator_fn, run};
///
/// let add_one = encapsulator_fn(|callback: &dyn Callback<i32, Out = i32>, params: Params<i32>| {
///     callback.call(params.map(|v| v + 1))
/// });
/// let callback = Execute::new(|params: Params<i32>| params.unwrap_or(0) * 2);
///
/// assert_eq!(run(callback, [add_one], Params::Present(20))?, 42);
/// # Ok::<(), encapsulate::SignatureError>(())
/// ```
#[must_use]
pub fn encapsulator_fn<P, Out, F>(f: F) -> FromFn<F>
where
    F: Fn(&dyn Callback<P, Out = Out>, Params<P>) -> Out + Send + Sync,
{
    FromFn { f, name: None }
}

/// An encapsulator backed by a closure. Created by [`encapsulator_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
    name: Option<Cow<'static, str>>,
}

impl<F> FromFn<F> {
    /// Attaches a display name reported by signature errors and logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<F> Introspect for FromFn<F> {
    fn parameters(&self) -> Cow<'_, [Parameter]> {
        Cow::Borrowed(ENCAPSULATOR_SIGNATURE)
    }

    fn name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Borrowed(std::any::type_name::<F>()),
        }
    }
}

impl<F, P, Out> Encapsulator<P, Out> for FromFn<F>
where
    F: Fn(&dyn Callback<P, Out = Out>, Params<P>) -> Out + Send + Sync,
{
    fn encapsulate(&self, callback: &dyn Callback<P, Out = Out>, params: Params<P>) -> Out {
        (self.f)(callback, params)
    }
}

impl<F> Debug for FromFn<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").field("name", &self.name).finish_non_exhaustive()
    }
}

type Body<P, Out> = dyn Fn(&dyn Callback<P, Out = Out>, Params<P>) -> Out + Send + Sync;

/// A late-bound encapsulator that describes its own parameters.
///
/// Use this for encapsulators assembled at run time, for example from a plugin manifest,
/// where the declared parameter list comes from outside the program. Chains validate the
/// declaration against [`ENCAPSULATOR_SIGNATURE`] and refuse to build if it does not match;
/// the body is never called in that case.
///
/// # Examples
///
/// ```
/// use encapsulate::signature::ENCAPSULATOR_SIGNATURE;
/// use encapsulate::{Declared, Execute, Params, run};
///
/// let audited = Declared::<&str, &str>::new("audited", ENCAPSULATOR_SIGNATURE.to_vec(), |callback, params| {
///     println!("entering");
///     callback.call(params)
/// });
///
/// let callback = Execute::new(|params: Params<&str>| params.unwrap_or("none"));
/// assert_eq!(run(callback, [audited], Params::Present("payload"))?, "payload");
/// # Ok::<(), encapsulate::SignatureError>(())
/// ```
pub struct Declared<P, Out> {
    name: Cow<'static, str>,
    parameters: Vec<Parameter>,
    body: Arc<Body<P, Out>>,
}

impl<P, Out> Declared<P, Out> {
    /// Creates a late-bound encapsulator from its name, declared parameters and body.
    #[must_use]
    pub fn new<F>(name: impl Into<Cow<'static, str>>, parameters: impl IntoIterator<Item = Parameter>, body: F) -> Self
    where
        F: Fn(&dyn Callback<P, Out = Out>, Params<P>) -> Out + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
            body: Arc::new(body),
        }
    }
}

impl<P, Out> Introspect for Declared<P, Out> {
    fn parameters(&self) -> Cow<'_, [Parameter]> {
        Cow::Borrowed(&self.parameters)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl<P, Out> Encapsulator<P, Out> for Declared<P, Out> {
    fn encapsulate(&self, callback: &dyn Callback<P, Out = Out>, params: Params<P>) -> Out {
        (self.body)(callback, params)
    }
}

impl<P, Out> Clone for Declared<P, Out> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

impl<P, Out> Debug for Declared<P, Out> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Declared")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Calls its callback with the payload unchanged and returns the result.
///
/// A chain made only of `Passthrough` layers behaves exactly like its callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl Introspect for Passthrough {
    fn parameters(&self) -> Cow<'_, [Parameter]> {
        Cow::Borrowed(ENCAPSULATOR_SIGNATURE)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("passthrough")
    }
}

impl<P, Out> Encapsulator<P, Out> for Passthrough {
    fn encapsulate(&self, callback: &dyn Callback<P, Out = Out>, params: Params<P>) -> Out {
        callback.call(params)
    }
}
