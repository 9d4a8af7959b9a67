//! Observer Identity

use std::fmt;
use uuid::Uuid;

/// Stable identity used to find an observer's registrations again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(Uuid);

impl ObserverId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can receive notification callbacks
pub trait Observer: Send + Sync + 'static {
    /// Identity of this observer (must be stable for its lifetime)
    fn observer_id(&self) -> ObserverId;

    /// Name used in log output
    fn observer_name(&self) -> String {
        self.observer_id().to_string()
    }
}
