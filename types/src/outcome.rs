//! The success-or-failure container and its transformation algebra.

use std::fmt;

use crate::fault::{ErrorCapability, Fault};

/// Result of a finished unit of work: a value, or a [`Fault`].
///
/// # Invariants
///
/// - Exactly one variant is populated; there is no "both" or "neither".
/// - Combinators consume `self` and build a new outcome. Nothing mutates in place.
/// - The branch a combinator does not target is carried forward untouched,
///   and the transform is never called for it.
///
/// Transforms that panic are not caught. A panic inside `map` means the
/// transform is broken, which is a different thing from the wrapped
/// computation failing, so it unwinds to the caller instead of becoming a
/// `Failure`.
///
/// ```
/// use outcome_types::{Fault, Outcome};
///
/// let doubled = Outcome::from_value(10).map(|x| x * 2);
/// assert_eq!(doubled.success_value(), Some(20));
///
/// let recovered: Outcome<i32> = Outcome::from_error(Fault::msg("offline"))
///     .flat_map_error(|_| Outcome::from_value(99));
/// assert_eq!(recovered.success_value(), Some(99));
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Fault),
}

impl<T> Outcome<T> {
    pub fn from_value(value: T) -> Self {
        Self::Success(value)
    }

    pub fn from_error(error: impl ErrorCapability) -> Self {
        Self::Failure(error.into_fault())
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    #[must_use]
    pub fn success_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure_value(self) -> Option<Fault> {
        match self {
            Self::Success(_) => None,
            Self::Failure(fault) => Some(fault),
        }
    }

    #[must_use]
    pub const fn success_ref(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub const fn failure_ref(&self) -> Option<&Fault> {
        match self {
            Self::Success(_) => None,
            Self::Failure(fault) => Some(fault),
        }
    }

    pub fn map<U, F>(self, transform: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        self.flat_map(|value| Outcome::Success(transform(value)))
    }

    /// Chain a step that can itself fail.
    pub fn flat_map<U, F>(self, transform: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Success(value) => transform(value),
            Self::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Rewrite the fault. Any [`ErrorCapability`] may come out of `transform`;
    /// it is folded back into a [`Fault`].
    pub fn map_error<E, F>(self, transform: F) -> Self
    where
        E: ErrorCapability,
        F: FnOnce(Fault) -> E,
    {
        self.flat_map_error(|fault| Self::Failure(transform(fault).into_fault()))
    }

    /// Recover from, or replace, a fault.
    pub fn flat_map_error<F>(self, transform: F) -> Self
    where
        F: FnOnce(Fault) -> Self,
    {
        match self {
            Self::Success(value) => Self::Success(value),
            Self::Failure(fault) => transform(fault),
        }
    }

    pub fn inspect<F>(self, observe: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Success(value) = &self {
            observe(value);
        }
        self
    }

    pub fn inspect_error<F>(self, observe: F) -> Self
    where
        F: FnOnce(&Fault),
    {
        if let Self::Failure(fault) = &self {
            observe(fault);
        }
        self
    }

    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default,
        }
    }

    #[must_use]
    pub fn unwrap_or_else<F>(self, recover: F) -> T
    where
        F: FnOnce(Fault) -> T,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(fault) => recover(fault),
        }
    }

    pub fn into_result(self) -> Result<T, Fault> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(fault) => Err(fault),
        }
    }
}

impl<T: fmt::Display> Outcome<T> {
    /// Diagnostic rendering: the value on success, the fault on failure.
    ///
    /// No stability guarantee; do not parse it.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl<T> Outcome<Outcome<T>> {
    pub fn flatten(self) -> Outcome<T> {
        self.flat_map(|inner| inner)
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => fmt::Display::fmt(value, f),
            Self::Failure(fault) => fmt::Display::fmt(fault, f),
        }
    }
}

impl<T, E: ErrorCapability> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::from_error(error),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Fault> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Collects successes; the first failure wins and the rest are not consumed.
impl<A, V> FromIterator<Outcome<A>> for Outcome<V>
where
    V: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<A>>>(iter: I) -> Self {
        iter.into_iter()
            .map(Outcome::into_result)
            .collect::<Result<V, Fault>>()
            .into()
    }
}
