// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::signature::Parameter;

/// An encapsulator does not declare the parameters every encapsulator must accept.
///
/// Returned when a chain is constructed, before anything is invoked. The error identifies the
/// offending encapsulator by its display name together with the parameter that was expected
/// at `index` and the one actually declared there, if any.
///
/// # Examples
///
/// ```
/// use encapsulate::{Declared, Execute, Params, Parameter, ParameterKind, create};
///
/// let malformed = Declared::<(), ()>::new(
///     "malformed",
///     [Parameter::new(ParameterKind::KeyRequired, "something_else")],
///     |callback, params| callback.call(params),
/// );
///
/// let error = create(Execute::new(|_: Params<()>| ()), [malformed]).unwrap_err();
///
/// assert_eq!(error.index(), 0);
/// assert_eq!(error.function(), "malformed");
/// assert_eq!(error.expected().name(), "callback");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{expected} not found for `{function}` at index {index} ({})", describe_found(.found.as_ref()))]
pub struct SignatureError {
    expected: Parameter,
    index: usize,
    found: Option<Parameter>,
    function: String,
}

impl SignatureError {
    pub(crate) const fn new(expected: Parameter, index: usize, found: Option<Parameter>, function: String) -> Self {
        Self {
            expected,
            index,
            found,
            function,
        }
    }

    /// The parameter the encapsulator was required to declare.
    #[must_use]
    pub const fn expected(&self) -> &Parameter {
        &self.expected
    }

    /// Position of the mismatching parameter.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The parameter declared at [`index`][Self::index], or `None` if the encapsulator
    /// declares fewer parameters.
    #[must_use]
    pub const fn found(&self) -> Option<&Parameter> {
        self.found.as_ref()
    }

    /// Display name of the malformed encapsulator.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }
}

fn describe_found(found: Option<&Parameter>) -> String {
    found.map_or_else(|| "nothing declared".to_string(), |parameter| format!("declared {parameter}"))
}
