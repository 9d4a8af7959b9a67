//! Notification Keys
//!
//! A key is the string the notification center matches registrations on.
//! It is always `<namespace>.<case>`, so equal case names declared by
//! different notifiers never collide.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::notifications::error::{NotificationError, NotificationResult};

/// Separator between the namespace and the case name
pub const KEY_SEPARATOR: char = '.';

/// Derived lookup key for the notification center
///
/// Serialized as a plain string; deserializing goes through
/// [`NotificationKey::parse`], so malformed keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationKey(String);

impl NotificationKey {
    /// Derive the key for a case name declared under `namespace`
    pub fn derive(namespace: &str, case: &str) -> Self {
        let mut key = String::with_capacity(namespace.len() + case.len() + 1);
        key.push_str(namespace);
        key.push(KEY_SEPARATOR);
        key.push_str(case);
        Self(key)
    }

    /// Parse a key string produced by [`NotificationKey::derive`]
    pub fn parse(raw: &str) -> NotificationResult<Self> {
        Self::try_from(raw.to_string())
    }

    /// Split into `(namespace, case)` at the last separator
    pub fn split(&self) -> (&str, &str) {
        self.0
            .rsplit_once(KEY_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }

    /// Namespace part of the key
    pub fn namespace(&self) -> &str {
        self.split().0
    }

    /// Case part of the key
    pub fn case(&self) -> &str {
        self.split().1
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NotificationKey {
    type Error = NotificationError;

    fn try_from(raw: String) -> NotificationResult<Self> {
        let well_formed = raw
            .rsplit_once(KEY_SEPARATOR)
            .is_some_and(|(namespace, case)| !namespace.is_empty() && !case.is_empty());
        if well_formed {
            Ok(Self(raw))
        } else {
            Err(NotificationError::malformed_key(raw))
        }
    }
}

impl From<NotificationKey> for String {
    fn from(key: NotificationKey) -> Self {
        key.0
    }
}

impl AsRef<str> for NotificationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_derivation() {
        let key = NotificationKey::derive("Barista", "makeCoffee");
        assert_eq!(key.as_str(), "Barista.makeCoffee");
        assert_eq!(key.to_string(), "Barista.makeCoffee");
        assert_eq!(key.namespace(), "Barista");
        assert_eq!(key.case(), "makeCoffee");
    }

    #[test]
    fn test_key_parsing() {
        let key = NotificationKey::parse("Barista.makeCoffee").unwrap();
        assert_eq!(key, NotificationKey::derive("Barista", "makeCoffee"));

        assert!(NotificationKey::parse("makeCoffee").is_err());
        assert!(NotificationKey::parse(".makeCoffee").is_err());
        assert!(NotificationKey::parse("Barista.").is_err());
    }

    #[test]
    fn test_key_serializes_as_plain_string() {
        let key = NotificationKey::derive("Barista", "makeCoffee");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#""Barista.makeCoffee""#);
    }

    #[test]
    fn test_key_deserialization_rejects_malformed_keys() {
        let key: NotificationKey = serde_json::from_str(r#""Barista.makeCoffee""#).unwrap();
        assert_eq!(key, NotificationKey::derive("Barista", "makeCoffee"));

        assert!(serde_json::from_str::<NotificationKey>(r#""nodot""#).is_err());
        assert!(serde_json::from_str::<NotificationKey>(r#"".makeCoffee""#).is_err());
        assert!(serde_json::from_str::<NotificationKey>(r#""Barista.""#).is_err());
    }

    proptest! {
        #[test]
        fn prop_derivation_is_deterministic(ns in "[A-Za-z][A-Za-z0-9_]{0,15}", case in "[a-z][A-Za-z0-9_]{0,15}") {
            prop_assert_eq!(NotificationKey::derive(&ns, &case), NotificationKey::derive(&ns, &case));
        }

        #[test]
        fn prop_namespaces_separate_equal_cases(
            ns1 in "[A-Za-z][A-Za-z0-9_]{0,15}",
            ns2 in "[A-Za-z][A-Za-z0-9_]{0,15}",
            case in "[a-z][A-Za-z0-9_]{0,15}",
        ) {
            prop_assume!(ns1 != ns2);
            prop_assert_ne!(NotificationKey::derive(&ns1, &case), NotificationKey::derive(&ns2, &case));
        }

        #[test]
        fn prop_split_recovers_parts(ns in "[A-Za-z][A-Za-z0-9_]{0,15}", case in "[a-z][A-Za-z0-9_]{0,15}") {
            let key = NotificationKey::derive(&ns, &case);
            prop_assert_eq!(key.split(), (ns.as_str(), case.as_str()));
        }
    }
}
