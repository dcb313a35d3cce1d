// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Parameter descriptors and signature validation for encapsulators.
//!
//! Statically typed encapsulators always have the right shape, the compiler sees to that.
//! Late-bound encapsulators such as [`Declared`][crate::Declared] only describe their
//! parameters at run time, so every chain checks each encapsulator against
//! [`ENCAPSULATOR_SIGNATURE`] before it is built.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::SignatureError;

/// How a declared parameter is bound when a function is called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParameterKind {
    /// A positional parameter that must be supplied.
    Required,

    /// A positional parameter with a default value.
    Optional,

    /// Collects any remaining positional arguments.
    Rest,

    /// A named parameter that must be supplied.
    KeyRequired,

    /// A named parameter with a default value.
    KeyOptional,

    /// Collects any remaining named arguments.
    KeyRest,
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Required => "required positional",
            Self::Optional => "optional positional",
            Self::Rest => "rest positional",
            Self::KeyRequired => "required named",
            Self::KeyOptional => "optional named",
            Self::KeyRest => "rest named",
        })
    }
}

/// A single declared formal parameter: its kind and its name.
///
/// # Examples
///
/// ```
/// use encapsulate::{Parameter, ParameterKind};
///
/// let parameter = Parameter::new(ParameterKind::KeyRequired, "callback");
///
/// assert_eq!(parameter.name(), "callback");
/// assert_eq!(parameter.to_string(), "required named parameter `callback`");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    kind: ParameterKind,
    name: Cow<'static, str>,
}

impl Parameter {
    /// Creates a parameter descriptor.
    #[must_use]
    pub fn new(kind: ParameterKind, name: impl Into<Cow<'static, str>>) -> Self {
        Self { kind, name: name.into() }
    }

    /// Creates a parameter descriptor from a static name, usable in constants.
    #[must_use]
    pub const fn from_static(kind: ParameterKind, name: &'static str) -> Self {
        Self {
            kind,
            name: Cow::Borrowed(name),
        }
    }

    /// The parameter kind.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} parameter `{}`", self.kind, self.name)
    }
}

/// The parameters every encapsulator must declare, in this order.
///
/// Index 0 is the required named `callback`, index 1 the optional named `params`.
pub const ENCAPSULATOR_SIGNATURE: &[Parameter] = &[
    Parameter::from_static(ParameterKind::KeyRequired, "callback"),
    Parameter::from_static(ParameterKind::KeyOptional, "params"),
];

/// Reports the declared formal parameters of a function.
///
/// This is the introspection facility signature validation relies on. Statically typed
/// encapsulators report [`ENCAPSULATOR_SIGNATURE`]; late-bound ones report whatever their
/// description declares.
pub trait Introspect {
    /// The declared parameters, in declaration order.
    fn parameters(&self) -> Cow<'_, [Parameter]>;

    /// A human-readable name used in error messages and logs.
    ///
    /// Defaults to the Rust type name.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

impl<T> Introspect for Box<T>
where
    T: Introspect + ?Sized,
{
    fn parameters(&self) -> Cow<'_, [Parameter]> {
        (**self).parameters()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

impl<T> Introspect for std::sync::Arc<T>
where
    T: Introspect + ?Sized,
{
    fn parameters(&self) -> Cow<'_, [Parameter]> {
        (**self).parameters()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

/// Returns `true` if `function` declares each `expected` parameter at the same position.
///
/// Parameters are compared by kind and name. Parameters declared after the expected ones are
/// not inspected.
///
/// # Examples
///
/// ```
/// use encapsulate::signature::{ENCAPSULATOR_SIGNATURE, validate};
/// use encapsulate::{Declared, Parameter, ParameterKind};
///
/// let positional = Declared::<(), ()>::new(
///     "positional",
///     [Parameter::new(ParameterKind::Required, "callback")],
///     |callback, params| callback.call(params),
/// );
///
/// assert!(!validate(&positional, ENCAPSULATOR_SIGNATURE));
/// ```
#[must_use]
pub fn validate<F>(function: &F, expected: &[Parameter]) -> bool
where
    F: Introspect + ?Sized,
{
    first_mismatch(&function.parameters(), expected).is_none()
}

/// Like [`validate`], but reports the first mismatch as a [`SignatureError`].
///
/// # Errors
///
/// Returns an error naming the expected parameter, its index, the parameter declared there
/// and the display name of `function`.
pub fn assert_valid<F>(function: &F, expected: &[Parameter]) -> Result<(), SignatureError>
where
    F: Introspect + ?Sized,
{
    let declared = function.parameters();

    match first_mismatch(&declared, expected) {
        None => Ok(()),
        Some(index) => Err(SignatureError::new(
            expected[index].clone(),
            index,
            declared.get(index).cloned(),
            function.name().into_owned(),
        )),
    }
}

fn first_mismatch(declared: &[Parameter], expected: &[Parameter]) -> Option<usize> {
    expected
        .iter()
        .enumerate()
        .position(|(index, parameter)| declared.get(index) != Some(parameter))
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    struct Signature(Vec<Parameter>);

    impl Introspect for Signature {
        fn parameters(&self) -> Cow<'_, [Parameter]> {
            Cow::Borrowed(&self.0)
        }

        fn name(&self) -> Cow<'_, str> {
            Cow::Borrowed("signature")
        }
    }

    fn key_required(name: &'static str) -> Parameter {
        Parameter::from_static(ParameterKind::KeyRequired, name)
    }

    fn key_optional(name: &'static str) -> Parameter {
        Parameter::from_static(ParameterKind::KeyOptional, name)
    }

    #[test]
    fn expected_shape_passes() {
        let function = Signature(vec![key_required("callback"), key_optional("params")]);

        assert!(validate(&function, ENCAPSULATOR_SIGNATURE));
        assert_valid(&function, ENCAPSULATOR_SIGNATURE).unwrap();
    }

    #[test]
    fn trailing_parameters_are_ignored() {
        let function = Signature(vec![
            key_required("callback"),
            key_optional("params"),
            Parameter::new(ParameterKind::KeyRest, "options"),
        ]);

        assert!(validate(&function, ENCAPSULATOR_SIGNATURE));
    }

    #[test]
    fn renamed_parameter_fails() {
        let function = Signature(vec![key_required("something_else")]);
        let error = assert_valid(&function, ENCAPSULATOR_SIGNATURE).unwrap_err();

        assert_eq!(error.index(), 0);
        assert_eq!(error.expected(), &key_required("callback"));
        assert_eq!(error.found(), Some(&key_required("something_else")));
        assert_eq!(error.function(), "signature");
    }

    #[test]
    fn wrong_kind_fails() {
        let function = Signature(vec![key_required("callback"), key_required("params")]);
        let error = assert_valid(&function, ENCAPSULATOR_SIGNATURE).unwrap_err();

        assert_eq!(error.index(), 1);
        assert_eq!(error.found().map(Parameter::kind), Some(ParameterKind::KeyRequired));
    }

    #[test]
    fn missing_parameter_fails() {
        let function = Signature(vec![key_required("callback")]);
        let error = assert_valid(&function, ENCAPSULATOR_SIGNATURE).unwrap_err();

        assert_eq!(error.index(), 1);
        assert_eq!(error.found(), None);
    }

    #[test]
    fn swapped_parameters_fail_at_first_slot() {
        let function = Signature(vec![key_optional("params"), key_required("callback")]);
        let error = assert_valid(&function, ENCAPSULATOR_SIGNATURE).unwrap_err();

        assert_eq!(error.index(), 0);
    }

    #[test]
    fn default_name_is_type_name() {
        struct Unnamed;

        impl Introspect for Unnamed {
            fn parameters(&self) -> Cow<'_, [Parameter]> {
                Cow::Borrowed(&[])
            }
        }

        assert!(Unnamed.name().ends_with("Unnamed"));
        assert!(!validate(&Unnamed, ENCAPSULATOR_SIGNATURE));
        assert!(validate(&Unnamed, &[]));
    }

    #[test]
    fn boxed_introspection_forwards() {
        let function: Box<dyn Introspect> = Box::new(Signature(vec![key_required("callback"), key_optional("params")]));

        assert!(validate(&function, ENCAPSULATOR_SIGNATURE));
        assert_eq!(function.name(), "signature");
    }
}
