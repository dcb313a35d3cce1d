// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The optional payload threaded through a chain.
///
/// Every callable in a chain (the raw callback, each link and the composed chain) is called
/// with a `Params`. [`Params::Absent`] means "called with no payload", [`Params::Present`]
/// carries exactly one payload value. A layer cannot tell from the calling convention alone
/// whether its callback is the terminal operation or another layer.
///
/// # Examples
///
/// ```
/// use encapsulate::Params;
///
/// let absent: Params<i32> = Params::Absent;
/// let present = Params::Present(21);
///
/// assert!(absent.is_absent());
/// assert_eq!(present.map(|v| v * 2), Params::Present(42));
/// assert_eq!(Params::from(None::<i32>), Params::Absent);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Params<T> {
    /// No payload was supplied.
    Absent,

    /// A single payload value.
    Present(T),
}

impl<T> Params<T> {
    /// Returns `true` if a payload is present.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if no payload was supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrows the payload, if any.
    #[must_use]
    pub const fn as_ref(&self) -> Params<&T> {
        match self {
            Self::Absent => Params::Absent,
            Self::Present(value) => Params::Present(value),
        }
    }

    /// Mutably borrows the payload, if any.
    #[must_use]
    pub fn as_mut(&mut self) -> Params<&mut T> {
        match self {
            Self::Absent => Params::Absent,
            Self::Present(value) => Params::Present(value),
        }
    }

    /// Transforms the payload, leaving an absent payload absent.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Params<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Absent => Params::Absent,
            Self::Present(value) => Params::Present(f(value)),
        }
    }

    /// Returns the payload or `default` when absent.
    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Absent => default,
            Self::Present(value) => value,
        }
    }

    /// Returns the payload or the type's default value when absent.
    #[must_use]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    /// Returns the payload or computes one when absent.
    #[must_use]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Absent => f(),
            Self::Present(value) => value,
        }
    }

    /// Converts into an [`Option`].
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> Default for Params<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Params<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<T> From<Params<T>> for Option<T> {
    fn from(value: Params<T>) -> Self {
        match value {
            Params::Absent => None,
            Params::Present(value) => Some(value),
        }
    }
}
