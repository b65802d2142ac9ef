//! Layered error taxonomy.
//!
//! Every layer declares a closed set of kinds and reports failures as
//! [`Error<K>`]: a kind plus an optional underlying cause. A fresh value is
//! built for every failure, so nothing is shared between requests.
//!
//! Classification goes by kind only. The cause is kept for logging and is
//! reachable through [`std::error::Error::source`], which lets callers ask
//! "is this a K?" across any number of wrapping layers.

use std::error::Error as StdError;
use std::fmt;

/// Boxed cause carried by an error.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A closed enumeration of error kinds for one layer.
///
/// `Display` gives the kind's short description.
pub trait ErrorKind: fmt::Debug + fmt::Display + Copy + Eq + Send + Sync + 'static {}

/// A classified failure: kind plus optional cause.
#[derive(thiserror::Error)]
#[error("{kind}")]
pub struct Error<K: ErrorKind> {
    kind: K,
    #[source]
    cause: Option<BoxError>,
}

impl<K: ErrorKind> Error<K> {
    pub fn new(kind: K) -> Self {
        Self { kind, cause: None }
    }

    /// Attach the underlying cause.
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    /// Whether this error is of `kind`. Causes are not inspected.
    pub fn is(&self, kind: K) -> bool {
        self.kind == kind
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Display text of the direct cause, if any.
    pub fn cause_message(&self) -> Option<String> {
        self.cause.as_ref().map(|c| c.to_string())
    }
}

impl<K: ErrorKind> From<K> for Error<K> {
    fn from(kind: K) -> Self {
        Self::new(kind)
    }
}

impl<K: ErrorKind> PartialEq for Error<K> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl<K: ErrorKind> PartialEq<K> for Error<K> {
    fn eq(&self, other: &K) -> bool {
        self.kind == *other
    }
}

impl<K: ErrorKind> fmt::Debug for Error<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Error");
        out.field("kind", &self.kind);
        if let Some(cause) = &self.cause {
            out.field("cause", cause);
        }
        out.finish()
    }
}

/// Iterate `err` and every cause below it.
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |e| (*e).source())
}

/// First kind of taxonomy `K` found in the chain.
pub fn find_kind<K: ErrorKind>(err: &(dyn StdError + 'static)) -> Option<K> {
    chain(err).find_map(|e| e.downcast_ref::<Error<K>>().map(Error::kind))
}

/// Whether any error in the chain is of `kind`.
pub fn has_kind<K: ErrorKind>(err: &(dyn StdError + 'static), kind: K) -> bool {
    chain(err).any(|e| {
        e.downcast_ref::<Error<K>>()
            .map(|found| found.is(kind))
            .unwrap_or(false)
    })
}

/// First error of concrete type `E` in the chain.
pub fn find_cause<'a, E: StdError + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a E> {
    chain(err).find_map(|e| e.downcast_ref::<E>())
}

/// Whole chain rendered as `outer: inner: root` for logs.
pub fn report(err: &(dyn StdError + 'static)) -> String {
    chain(err)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
