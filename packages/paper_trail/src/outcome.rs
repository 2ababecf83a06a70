//! Tagged synchronous/asynchronous operation results.

use std::future::Future;

use futures::future;

/// The result of an operation that may complete either synchronously or
/// asynchronously.
///
/// Instrumented operations return this from the closure passed to
/// [`Tracker::track_timing`][crate::Tracker::track_timing], making the
/// synchronous and asynchronous paths explicit and exhaustively matched
/// instead of detected at runtime. The same type is the wrapper's return
/// value, carrying the original result unchanged.
///
/// For operations that never go asynchronous, the [`SyncOutcome`] alias pins
/// the future parameter so type inference has nothing left to guess:
///
/// ```
/// use std::convert::Infallible;
///
/// use paper_trail::SyncOutcome;
///
/// let outcome = SyncOutcome::<_, Infallible>::ready(42);
/// assert_eq!(outcome.into_immediate(), Some(Ok(42)));
/// ```
#[derive(Debug)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the two variants are the whole point; callers construct and match them directly"
)]
pub enum Outcome<T, E, F> {
    /// The operation completed synchronously with this result.
    Immediate(Result<T, E>),

    /// The operation is still running and completes when this future settles.
    Pending(F),
}

/// An [`Outcome`] for operations that always complete synchronously.
pub type SyncOutcome<T, E> = Outcome<T, E, future::Ready<Result<T, E>>>;

impl<T, E, F> Outcome<T, E, F> {
    /// A synchronous success carrying the given value.
    #[must_use]
    pub fn ready(value: T) -> Self {
        Self::Immediate(Ok(value))
    }

    /// A synchronous failure carrying the given error.
    #[must_use]
    pub fn error(error: E) -> Self {
        Self::Immediate(Err(error))
    }

    /// An asynchronous completion settled by the given future.
    #[must_use]
    pub fn pending(future: F) -> Self {
        Self::Pending(future)
    }

    /// Whether this outcome is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the synchronous result, or `None` for a pending outcome.
    #[must_use]
    pub fn into_immediate(self) -> Option<Result<T, E>> {
        match self {
            Self::Immediate(result) => Some(result),
            Self::Pending(_) => None,
        }
    }
}

impl<T, E, F> Outcome<T, E, F>
where
    F: Future<Output = Result<T, E>>,
{
    /// Resolves the outcome to its final result, awaiting the pending future
    /// if there is one.
    ///
    /// ```
    /// use futures::executor::block_on;
    ///
    /// use paper_trail::Outcome;
    ///
    /// let outcome = Outcome::pending(async { Ok::<_, String>(7) });
    /// assert_eq!(block_on(outcome.finish()), Ok(7));
    /// ```
    pub async fn finish(self) -> Result<T, E> {
        match self {
            Self::Immediate(result) => result,
            Self::Pending(future) => future.await,
        }
    }
}
