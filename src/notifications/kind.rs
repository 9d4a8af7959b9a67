//! Notification Vocabularies
//!
//! A vocabulary is a closed enum of notification cases, each with a stable
//! string name. The [`notification_kind!`](crate::notification_kind) macro
//! declares one without hand-writing the name table.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use crate::notifications::error::{NotificationError, NotificationResult};
use crate::notifications::key::KEY_SEPARATOR;

/// Closed set of notification cases with stable string names
pub trait NotificationKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every case of the vocabulary
    const ALL: &'static [Self];

    /// Stable string name of this case
    fn name(&self) -> &'static str;

    /// Look up a case by its string name
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Check that a namespace is usable as the prefix of a notification key
pub fn validate_namespace(namespace: &str) -> NotificationResult<()> {
    if namespace.is_empty() {
        return Err(NotificationError::EmptyNamespace);
    }
    if namespace.contains(KEY_SEPARATOR) {
        return Err(NotificationError::InvalidNamespace(namespace.to_string()));
    }
    Ok(())
}

/// Check that every case name is non-empty, separator-free and unique
pub fn validate_vocabulary<K: NotificationKind>(namespace: &str) -> NotificationResult<()> {
    validate_namespace(namespace)?;

    let mut seen = HashSet::with_capacity(K::ALL.len());
    for kind in K::ALL {
        let name = kind.name();
        if name.is_empty() {
            return Err(NotificationError::EmptyCaseName {
                namespace: namespace.to_string(),
            });
        }
        if name.contains(KEY_SEPARATOR) {
            return Err(NotificationError::InvalidCaseName {
                namespace: namespace.to_string(),
                case: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(NotificationError::duplicate_case(namespace, name));
        }
    }
    Ok(())
}

/// Declare a notification vocabulary enum.
///
/// ```
/// use typed_notify::notification_kind;
/// use typed_notify::notifications::NotificationKind;
///
/// notification_kind! {
///     pub enum OvenNotification {
///         Preheated => "preheated",
///         TimerExpired => "timerExpired",
///     }
/// }
///
/// assert_eq!(OvenNotification::Preheated.name(), "preheated");
/// assert_eq!(OvenNotification::from_name("timerExpired"), Some(OvenNotification::TimerExpired));
/// ```
#[macro_export]
macro_rules! notification_kind {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $raw:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::notifications::NotificationKind for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $raw ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::notifications::NotificationKind::name(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::notifications::NotificationError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::notifications::NotificationKind>::from_name(s)
                    .ok_or_else(|| $crate::notifications::NotificationError::unknown_case(stringify!($name), s))
            }
        }
    };
}
