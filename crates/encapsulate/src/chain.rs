// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::signature::{self, ENCAPSULATOR_SIGNATURE, Introspect};
use crate::{Callback, DynEncapsulator, Encapsulator, Params, SignatureError};

const DEFAULT_NAME: &str = "chain";

type DynCallback<P, Out> = Box<dyn Callback<P, Out = Out>>;

/// One encapsulator closed over the callable it wraps.
///
/// A link is itself a [`Callback`]; calling it runs the encapsulator with the wrapped callable
/// as its `callback`.
#[derive(Clone, Debug)]
pub struct Link<E, C> {
    encapsulator: E,
    inner: C,
}

impl<E, C> Link<E, C> {
    pub(crate) const fn new(encapsulator: E, inner: C) -> Self {
        Self { encapsulator, inner }
    }
}

impl<E, C, P, Out> Callback<P> for Link<E, C>
where
    E: Encapsulator<P, Out>,
    C: Callback<P, Out = Out>,
{
    type Out = Out;

    fn call(&self, params: Params<P>) -> Self::Out {
        self.encapsulator.encapsulate(&self.inner, params)
    }
}

/// A callback wrapped with an ordered sequence of encapsulators.
///
/// Created by [`create`] or [`Chain::builder`]. Calling the chain runs the last encapsulator of
/// the list first; each one receives the previous encapsulator's link as its `callback`, and
/// the first encapsulator receives the original callback.
///
/// Chains are cheap to clone and may be called any number of times.
///
/// # Examples
///
/// ```
/// use encapsulate::{Callback, Chain, Execute, Params, encapsulator_fn};
///
/// let chain = Chain::builder(Execute::new(|params: Params<String>| params.unwrap_or_default()))
///     .name("greeting")
///     .encapsulate(encapsulator_fn(|callback: &dyn Callback<String, Out = String>, params: Params<String>| {
///         format!("Hello, {}!", callback.call(params))
///     }))
///     .build()?;
///
/// assert_eq!(chain.call(Params::Present("World".to_string())), "Hello, World!");
/// assert_eq!(chain.links(), 1);
/// # Ok::<(), encapsulate::SignatureError>(())
/// ```
pub struct Chain<P, Out> {
    outermost: Arc<dyn Callback<P, Out = Out>>,
    name: Cow<'static, str>,
    links: usize,
}

impl<P: 'static, Out: 'static> Chain<P, Out> {
    /// Starts building a chain around `callback`.
    #[must_use]
    pub fn builder<C>(callback: C) -> ChainBuilder<P, Out>
    where
        C: Callback<P, Out = Out> + 'static,
    {
        ChainBuilder {
            name: Cow::Borrowed(DEFAULT_NAME),
            callback: Box::new(callback),
            encapsulators: Vec::new(),
        }
    }
}

impl<P, Out> Chain<P, Out> {
    /// The name this chain was built with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of links in this chain, one per encapsulator.
    #[must_use]
    pub const fn links(&self) -> usize {
        self.links
    }
}

impl<P, Out> Callback<P> for Chain<P, Out> {
    type Out = Out;

    fn call(&self, params: Params<P>) -> Self::Out {
        self.outermost.call(params)
    }
}

impl<P, Out> Clone for Chain<P, Out> {
    fn clone(&self) -> Self {
        Self {
            outermost: Arc::clone(&self.outermost),
            name: self.name.clone(),
            links: self.links,
        }
    }
}

impl<P, Out> Debug for Chain<P, Out> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Chain`]. Create with [`Chain::builder`].
///
/// Encapsulators are added innermost first: the last one added becomes the outermost layer.
pub struct ChainBuilder<P, Out> {
    name: Cow<'static, str>,
    callback: DynCallback<P, Out>,
    encapsulators: Vec<DynEncapsulator<P, Out>>,
}

impl<P: 'static, Out: 'static> ChainBuilder<P, Out> {
    /// Names the chain. The name shows up in log events and in `Debug` output.
    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an encapsulator around everything added so far.
    #[must_use]
    pub fn encapsulate<E>(mut self, encapsulator: E) -> Self
    where
        E: Encapsulator<P, Out> + 'static,
    {
        self.encapsulators.push(Box::new(encapsulator));
        self
    }

    /// Adds each encapsulator in iteration order, as if by repeated [`encapsulate`][Self::encapsulate].
    #[must_use]
    pub fn encapsulate_all<I>(self, encapsulators: I) -> Self
    where
        I: IntoIterator,
        I::Item: Encapsulator<P, Out> + 'static,
    {
        encapsulators.into_iter().fold(self, Self::encapsulate)
    }

    /// Validates every encapsulator and folds them around the callback.
    ///
    /// Nothing is invoked while building.
    ///
    /// # Errors
    ///
    /// Returns the [`SignatureError`] of the first encapsulator that does not declare
    /// [`ENCAPSULATOR_SIGNATURE`]; no chain is built in that case.
    pub fn build(self) -> Result<Chain<P, Out>, SignatureError> {
        for encapsulator in &self.encapsulators {
            if let Err(error) = signature::assert_valid(encapsulator, ENCAPSULATOR_SIGNATURE) {
                emit_rejected(&self.name, encapsulator, &error);
                return Err(error);
            }
        }

        let links = self.encapsulators.len();
        let outermost = self
            .encapsulators
            .into_iter()
            .fold(self.callback, |inner, encapsulator| -> DynCallback<P, Out> {
                Box::new(Link::new(encapsulator, inner))
            });

        emit_built(&self.name, links);

        Ok(Chain {
            outermost: Arc::from(outermost),
            name: self.name,
            links,
        })
    }
}

impl<P, Out> Debug for ChainBuilder<P, Out> {
    #[cfg_attr(test, mutants::skip)] // Diagnostic output only.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("name", &self.name)
            .field("encapsulators", &self.encapsulators.len())
            .finish_non_exhaustive()
    }
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
fn emit_built(name: &str, links: usize) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "encapsulate.chain.built",
        tracing::Level::DEBUG,
        chain.name = %name,
        chain.links = links,
    );
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
fn emit_rejected<E>(name: &str, encapsulator: &E, error: &SignatureError)
where
    E: Introspect + ?Sized,
{
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "encapsulate.signature.rejected",
        tracing::Level::WARN,
        chain.name = %name,
        encapsulator.name = %encapsulator.name(),
        parameter.index = error.index(),
        parameter.expected = %error.expected(),
    );
}

/// Wraps `callback` with `encapsulators` and returns the composed chain.
///
/// The first encapsulator sits closest to the callback and the last one is the outermost
/// layer, so calling the chain runs the encapsulators in reverse list order. An empty list
/// yields a chain that calls the callback directly.
///
/// # Errors
///
/// Returns a [`SignatureError`] if any encapsulator does not declare
/// [`ENCAPSULATOR_SIGNATURE`]. Nothing is built or invoked in that case.
///
/// # Examples
///
/// ```
/// use encapsulate::{Callback, Execute, Params, create, encapsulator_fn};
///
/// type Trail = Vec<&'static str>;
///
/// let trace = |tag: &'static str| {
///     encapsulator_fn(move |callback: &dyn Callback<Trail, Out = Trail>, params: Params<Trail>| {
///         callback.call(params.map(|mut trail| {
///             trail.push(tag);
///             trail
///         }))
///     })
/// };
///
/// let chain = create(Execute::new(|params: Params<Trail>| params.unwrap_or_default()), [trace("first"), trace("second")])?;
///
/// assert_eq!(chain.call(Params::Present(Vec::new())), ["second", "first"]);
/// # Ok::<(), encapsulate::SignatureError>(())
/// ```
pub fn create<P, Out, C, I>(callback: C, encapsulators: I) -> Result<Chain<P, Out>, SignatureError>
where
    P: 'static,
    Out: 'static,
    C: Callback<P, Out = Out> + 'static,
    I: IntoIterator,
    I::Item: Encapsulator<P, Out> + 'static,
{
    Chain::builder(callback).encapsulate_all(encapsulators).build()
}

/// Builds a chain with [`create`] and invokes it once with `params`.
///
/// # Errors
///
/// Returns a [`SignatureError`] if any encapsulator is malformed; the callback and the
/// encapsulators are not invoked in that case. Failures raised while the chain runs are
/// not intercepted and reach the caller unchanged.
///
/// # Examples
///
/// ```
/// use encapsulate::{Execute, Params, Passthrough, run};
///
/// let callback = Execute::new(|params: Params<&str>| params.unwrap_or("hi"));
///
/// assert_eq!(run(callback.clone(), [Passthrough], Params::Absent)?, "hi");
/// assert_eq!(run(callback, [Passthrough], Params::Present("there"))?, "there");
/// # Ok::<(), encapsulate::SignatureError>(())
/// ```
pub fn run<P, Out, C, I>(callback: C, encapsulators: I, params: Params<P>) -> Result<Out, SignatureError>
where
    P: 'static,
    Out: 'static,
    C: Callback<P, Out = Out> + 'static,
    I: IntoIterator,
    I::Item: Encapsulator<P, Out> + 'static,
{
    let chain = create(callback, encapsulators)?;
    Ok(crate::invoke(&chain, params))
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::{Recorder, recorded};
    use crate::{Declared, Execute, Parameter, ParameterKind, Passthrough, encapsulator_fn};

    #[test]
    fn assert_types() {
        static_assertions::assert_impl_all!(Chain<String, String>: Debug, Clone, Send, Sync);
        static_assertions::assert_impl_all!(ChainBuilder<String, String>: Debug, Send, Sync);
    }

    #[test]
    fn one_link_per_encapsulator() {
        let chain = create(Execute::new(|_: Params<()>| ()), [Passthrough, Passthrough, Passthrough]).unwrap();

        assert_eq!(chain.links(), 3);
        assert_eq!(chain.name(), "chain");
    }

    #[test]
    fn nests_in_reverse_list_order() {
        let recorder = Recorder::default();
        let chain = create(
            recorder.callback(),
            [recorder.layer("first"), recorder.layer("second"), recorder.layer("third")],
        )
        .unwrap();

        chain.call(Params::Absent);

        assert_eq!(
            recorder.entries(),
            recorded(&[
                "enter third",
                "enter second",
                "enter first",
                "callback",
                "exit first",
                "exit second",
                "exit third"
            ])
        );
    }

    #[test]
    fn building_invokes_nothing() {
        let recorder = Recorder::default();
        let chain = create(recorder.callback(), [recorder.layer("only")]).unwrap();

        assert!(recorder.entries().is_empty());
        chain.call(Params::Absent);
        assert_eq!(recorder.entries().len(), 3);
    }

    #[test]
    fn chain_is_reusable() {
        let recorder = Recorder::default();
        let chain = create(recorder.callback(), [recorder.layer("only")]).unwrap();
        let clone = chain.clone();

        chain.call(Params::Absent);
        clone.call(Params::Absent);

        assert_eq!(recorder.calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn rejects_before_building() {
        let recorder = Recorder::default();
        let malformed = Declared::<(), ()>::new(
            "malformed",
            [Parameter::new(ParameterKind::KeyRequired, "something_else")],
            |callback, params| callback.call(params),
        );

        let error = Chain::builder(recorder.callback())
            .encapsulate(Declared::<(), ()>::new("valid", ENCAPSULATOR_SIGNATURE.to_vec(), |callback, params| {
                callback.call(params)
            }))
            .encapsulate(malformed)
            .build()
            .unwrap_err();

        assert_eq!(error.function(), "malformed");
        assert_eq!(error.index(), 0);
        assert_eq!(recorder.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn debug_output_includes_name() {
        let builder = Chain::builder(Execute::new(|_: Params<()>| ())).name("checkout");
        assert!(format!("{builder:?}").contains("checkout"));

        let chain = builder.encapsulate(Passthrough).build().unwrap();
        let debug = format!("{chain:?}");
        assert!(debug.contains("checkout"));
        assert!(debug.contains("links: 1"));
    }

    #[test]
    fn link_is_a_callback() {
        let link = Link::new(
            encapsulator_fn(|callback: &dyn Callback<i32, Out = i32>, params| callback.call(params) + 1),
            Execute::new(|params: Params<i32>| params.unwrap_or(0)),
        );

        assert_eq!(crate::invoke(&link, Params::Present(1)), 2);
    }

    #[tracing_test::traced_test]
    #[test]
    fn logs_built_chain() {
        let _chain = Chain::builder(Execute::new(|_: Params<()>| ()))
            .name("logged")
            .encapsulate(Passthrough)
            .encapsulate(Passthrough)
            .build()
            .unwrap();

        assert!(logs_contain("chain.name=logged"));
        assert!(logs_contain("chain.links=2"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn logs_rejected_encapsulator() {
        let malformed = Declared::<(), ()>::new("malformed", Vec::new(), |callback, params| callback.call(params));
        let _error = Chain::builder(Execute::new(|_: Params<()>| ()))
            .encapsulate(malformed)
            .build()
            .unwrap_err();

        assert!(logs_contain("encapsulator.name=malformed"));
        assert!(logs_contain("parameter.index=0"));
    }
}
