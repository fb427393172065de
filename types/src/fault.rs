//! The uniform error capability carried by every failed [`Outcome`](crate::Outcome).
//!
//! A [`Fault`] is deliberately not generic: every outcome in the system fails
//! with the same type, so combinators can be chained across unrelated
//! producers without juggling error parameters. External error types join in
//! through [`ErrorCapability`].

use std::error::Error;
use std::fmt;
use std::io;
use std::iter;
use std::num::{ParseFloatError, ParseIntError};
use std::sync::Arc;

type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Discriminator for a [`Fault`].
///
/// Kinds are open-ended: producers define their own with [`FaultKind::new`].
/// The empty string is rejected at compile time when used in a `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaultKind(&'static str);

impl FaultKind {
    /// No discriminator was supplied.
    pub const UNSPECIFIED: Self = Self::new("unspecified");
    /// Captured from an arbitrary `std::error::Error`.
    pub const EXTERNAL: Self = Self::new("external");
    pub const IO: Self = Self::new("io");
    pub const PARSE: Self = Self::new("parse");

    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        assert!(!name.is_empty(), "FaultKind must not be empty");
        Self(name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Contract every error must satisfy to populate a failed outcome.
///
/// Implementing it is usually a one-liner:
///
/// ```
/// use outcome_types::{ErrorCapability, FaultKind, Outcome};
///
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("deadline elapsed")
///     }
/// }
///
/// impl std::error::Error for Timeout {}
///
/// impl ErrorCapability for Timeout {
///     fn kind(&self) -> FaultKind {
///         FaultKind::new("timeout")
///     }
/// }
///
/// let outcome: Outcome<u32> = Outcome::from_error(Timeout);
/// let fault = outcome.failure_value().unwrap();
/// assert_eq!(fault.kind().as_str(), "timeout");
/// assert!(fault.downcast_ref::<Timeout>().is_some());
/// ```
pub trait ErrorCapability: Error + Send + Sync + 'static {
    fn kind(&self) -> FaultKind {
        FaultKind::UNSPECIFIED
    }

    /// Convert into the uniform carrier. The default keeps `self` as the
    /// fault's origin so callers can downcast back to it.
    fn into_fault(self) -> Fault
    where
        Self: Sized,
    {
        let kind = self.kind();
        Fault::from_origin(kind, self)
    }
}

/// Uniform failure payload: a kind, a message, and an optional cause chain.
///
/// Cheap to clone; causes are shared.
#[derive(Clone)]
pub struct Fault {
    kind: FaultKind,
    message: String,
    cause: Option<SharedError>,
    origin: Option<SharedError>,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            origin: None,
        }
    }

    /// A fault with no particular kind.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(FaultKind::UNSPECIFIED, message)
    }

    /// Wrap any error that does not implement [`ErrorCapability`].
    pub fn capture<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from_origin(FaultKind::EXTERNAL, error)
    }

    fn from_origin<E>(kind: FaultKind, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: error.to_string(),
            cause: None,
            origin: Some(Arc::new(error)),
        }
    }

    /// Attach an underlying cause. Replaces any cause inherited from the origin.
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    #[must_use]
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    #[must_use]
    pub fn is_kind(&self, kind: FaultKind) -> bool {
        self.kind == kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rendered causes, nearest first. The fault itself is not included.
    pub fn causes(&self) -> impl Iterator<Item = String> + '_ {
        let mut next = self.source();
        iter::from_fn(move || {
            let current = next?;
            next = current.source();
            Some(current.to_string())
        })
    }

    /// The typed error this fault was captured from, if it was `E`.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        let origin: &(dyn Error + 'static) = self.origin.as_deref()?;
        origin.downcast_ref::<E>()
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let causes: Vec<String> = self.causes().collect();
        f.debug_struct("Fault")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("causes", &causes)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Some(cause) = &self.cause {
            let cause: &(dyn Error + 'static) = &**cause;
            return Some(cause);
        }
        self.origin.as_deref().and_then(|origin| origin.source())
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.causes().eq(other.causes())
    }
}

impl Eq for Fault {}

impl ErrorCapability for Fault {
    fn kind(&self) -> FaultKind {
        self.kind
    }

    fn into_fault(self) -> Fault {
        self
    }
}

impl ErrorCapability for io::Error {
    fn kind(&self) -> FaultKind {
        FaultKind::IO
    }
}

impl ErrorCapability for ParseIntError {
    fn kind(&self) -> FaultKind {
        FaultKind::PARSE
    }
}

impl ErrorCapability for ParseFloatError {
    fn kind(&self) -> FaultKind {
        FaultKind::PARSE
    }
}

impl ErrorCapability for fmt::Error {}

// Faults cross thread boundaries inside outcomes.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Fault>();
};
