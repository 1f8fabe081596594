//! Generic lifecycle of one remote fetch.

use std::fmt;

/// Lifecycle state of an [`AsyncResource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl ResourceStatus {
    /// Returns true for `Succeeded` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// State machine wrapping the outcome of one remote resource.
///
/// Transitions: `begin` → `Loading`, `succeed` → `Succeeded`,
/// `fail` → `Failed`, `reset` → `Idle`. None of them is fatal and a failed
/// resource recovers through another `begin`.
///
/// # Invariants
///
/// - `Succeeded` ⇒ `data` is present and `error` is absent
/// - `Failed` ⇒ `error` is present and `data` is absent
///
/// `begin` keeps the previous `data`, so a reload can keep showing the last
/// value while the new one is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncResource<T> {
    status: ResourceStatus,
    data: Option<T>,
    error: Option<String>,
}

impl<T> Default for AsyncResource<T> {
    fn default() -> Self {
        Self {
            status: ResourceStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> AsyncResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new attempt as in flight.
    ///
    /// Re-entrant: calling it while already loading simply restarts the
    /// logical attempt. Overlapping loads are not serialized; the last
    /// resolution applied wins.
    pub fn begin(&mut self) {
        self.status = ResourceStatus::Loading;
        self.error = None;
    }

    pub fn succeed(&mut self, value: T) {
        self.status = ResourceStatus::Succeeded;
        self.data = Some(value);
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = ResourceStatus::Failed;
        self.data = None;
        self.error = Some(message.into());
    }

    /// Returns to `Idle`, dropping data and error (teardown of the owner).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Mutable access to the current value without changing status.
    pub(crate) fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.status == ResourceStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == ResourceStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let r: AsyncResource<u32> = AsyncResource::new();
        assert_eq!(r.status(), ResourceStatus::Idle);
        assert!(r.data().is_none());
        assert!(r.error().is_none());
    }

    #[test]
    fn test_succeed_stores_value_and_clears_error() {
        let mut r = AsyncResource::new();
        r.begin();
        r.fail("boom");
        r.begin();
        r.succeed(42);

        assert_eq!(r.status(), ResourceStatus::Succeeded);
        assert_eq!(r.data(), Some(&42));
        assert!(r.error().is_none());
    }

    #[test]
    fn test_fail_clears_data() {
        let mut r = AsyncResource::new();
        r.begin();
        r.succeed("old");
        r.begin();
        r.fail("Could not load links.");

        assert_eq!(r.status(), ResourceStatus::Failed);
        assert!(r.data().is_none());
        assert_eq!(r.error(), Some("Could not load links."));
    }

    #[test]
    fn test_begin_is_reentrant_and_keeps_data() {
        let mut r = AsyncResource::new();
        r.succeed(1);
        r.begin();
        r.begin();

        assert!(r.is_loading());
        assert_eq!(r.data(), Some(&1));
    }

    #[test]
    fn test_last_resolution_wins() {
        let mut r = AsyncResource::new();
        r.begin();
        r.begin();
        r.succeed(1);
        r.succeed(2);
        assert_eq!(r.data(), Some(&2));
    }

    #[test]
    fn test_reset() {
        let mut r = AsyncResource::new();
        r.succeed(1);
        r.reset();
        assert!(r.is_idle());
        assert!(r.data().is_none());
        assert!(!ResourceStatus::Idle.is_terminal());
        assert!(ResourceStatus::Failed.is_terminal());
    }
}
