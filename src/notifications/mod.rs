//! Typed Notification System
//!
//! Typed notification names layered over a shared, string-keyed
//! notification center.
//!
//! # Architecture
//!
//! - **NotificationKind**: a closed enum of cases with stable string names
//! - **Notifier**: a type that owns a vocabulary and a key namespace
//! - **NotificationCenter**: the shared registry that matches keys to callbacks
//! - **Notification**: one broadcast, with optional origin and typed payload
//!
//! # Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use typed_notify::notification_kind;
//! use typed_notify::notifications::{
//!     Notification, NotificationCenter, Notifier, Observer, ObserverId,
//! };
//!
//! notification_kind! {
//!     pub enum KettleNotification {
//!         Boiled => "boiled",
//!     }
//! }
//!
//! struct Kettle;
//!
//! impl Notifier for Kettle {
//!     type Notification = KettleNotification;
//!     const NAMESPACE: &'static str = "Kettle";
//! }
//!
//! struct Guest {
//!     id: ObserverId,
//! }
//!
//! impl Observer for Guest {
//!     fn observer_id(&self) -> ObserverId {
//!         self.id
//!     }
//! }
//!
//! impl Guest {
//!     fn pour(&self, _notification: &Notification) {}
//! }
//!
//! let center = NotificationCenter::new();
//! let guest = Arc::new(Guest { id: ObserverId::new() });
//!
//! Kettle::add_observer(&center, &guest, Guest::pour, KettleNotification::Boiled);
//! Kettle::post_notification(&center, KettleNotification::Boiled, None, None);
//! Kettle::remove_observer(&center, &*guest, Some(KettleNotification::Boiled));
//! ```

pub mod center;
pub mod error;
pub mod key;
pub mod kind;
pub mod notifier;
pub mod observer;
pub mod payload;


pub use center::{CenterConfig, NotificationCenter};
pub use error::{NotificationError, NotificationResult};
pub use key::{NotificationKey, KEY_SEPARATOR};
pub use kind::{validate_namespace, validate_vocabulary, NotificationKind};
pub use notifier::Notifier;
pub use observer::{Observer, ObserverId};
pub use payload::{Notification, Origin, PayloadValue, UserInfo};

include!(concat!(env!("OUT_DIR"), "/version_api.rs"));

/// Module metadata
pub const MODULE_NAME: &str = "Typed Notification System";

/// Get notification system information
pub fn get_system_info() -> String {
    format!(
        "{} v{} (api {})",
        MODULE_NAME,
        env!("CARGO_PKG_VERSION"),
        BASE_API_VERSION
    )
}
