//! The async-lifecycle resource shared by every server-backed slice.
//!
//! Any state that mirrors a remote collection or record goes through the
//! same lifecycle: `idle → pending → fulfilled | rejected`, with refetch
//! (`fulfilled | rejected → pending`) always legal. The lifecycle is
//! modelled as explicit tagged phases with transition methods rather than
//! being tied to any particular concurrency primitive.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No fetch has been attempted yet
    #[default]
    Idle,
    /// A fetch is in flight
    Pending,
    /// The last fetch settled successfully
    Fulfilled,
    /// The last fetch settled with an error
    Rejected,
}

/// A server-backed value together with its fetch lifecycle.
///
/// # Invariants
///
/// - A pending resource never carries an error: [`RemoteData::begin`]
///   clears any prior error before the fetch resolves.
/// - On rejection the previous payload is preserved. A failed refresh
///   keeps showing stale data rather than wiping it.
/// - A rejected resource always carries an error message: when the
///   underlying failure has none, the caller-supplied fallback is used.
///
/// # Example
///
/// ```
/// use stellar_core::RemoteData;
///
/// let mut catalog: RemoteData<Vec<String>> = RemoteData::new();
/// catalog.begin();
/// assert!(catalog.is_loading());
///
/// catalog.resolve(vec!["bun".to_string()]);
/// assert_eq!(catalog.data().map(Vec::len), Some(1));
///
/// catalog.begin();
/// catalog.fail(None, "failed to load catalog");
/// assert_eq!(catalog.error(), Some("failed to load catalog"));
/// assert_eq!(catalog.data().map(Vec::len), Some(1)); // stale data kept
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteData<T> {
    data: Option<T>,
    phase: Phase,
    error: Option<String>,
}

impl<T> Default for RemoteData<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RemoteData<T> {
    /// An idle resource with no data and no error.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: None,
            phase: Phase::Idle,
            error: None,
        }
    }

    /// Enter `pending`: a fetch has been issued.
    ///
    /// Clears any prior error. The payload is left in place so consumers
    /// can keep rendering the previous value while the refetch runs.
    pub fn begin(&mut self) {
        self.phase = Phase::Pending;
        self.error = None;
    }

    /// Enter `fulfilled` with a fresh payload.
    pub fn resolve(&mut self, value: T) {
        self.phase = Phase::Fulfilled;
        self.data = Some(value);
        self.error = None;
    }

    /// Enter `rejected`.
    ///
    /// Records `message` if the failure carried one, otherwise the
    /// resource-specific `fallback`. The payload is untouched.
    pub fn fail(&mut self, message: Option<String>, fallback: &str) {
        self.phase = Phase::Rejected;
        self.error = Some(message.unwrap_or_else(|| fallback.to_owned()));
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    /// The last successfully fetched payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Mutable access to the payload, if any.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Mutable access to the payload, inserting a default when absent.
    pub fn data_or_default(&mut self) -> &mut T
    where
        T: Default,
    {
        self.data.get_or_insert_with(T::default)
    }

    /// The error recorded by the last rejected fetch, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Discard the payload and error, returning to `idle`.
    pub fn reset(&mut self) {
        self.data = None;
        self.phase = Phase::Idle;
        self.error = None;
    }
}
