//! Broadcast Events and Payloads
//!
//! A [`Notification`] is built for a single post, handed to every matching
//! callback by reference, and dropped once delivery returns.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::notifications::key::NotificationKey;

/// Payload attached to a notification, keyed by name
pub type UserInfo = BTreeMap<String, PayloadValue>;

/// Tagged payload value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<PayloadValue>),
    Map(BTreeMap<String, PayloadValue>),
}

impl PayloadValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PayloadValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PayloadValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PayloadValue::Float(f) => Some(*f),
            PayloadValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PayloadValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a command-line style value: booleans, integers, finite floats, else text
    pub fn infer(raw: &str) -> Self {
        match raw {
            "true" => return PayloadValue::Bool(true),
            "false" => return PayloadValue::Bool(false),
            "null" => return PayloadValue::Null,
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return PayloadValue::Integer(i);
        }
        // NaN and infinities have no JSON form; keep them as written
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return PayloadValue::Float(f);
            }
        }
        PayloadValue::Text(raw.to_string())
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadValue::Text(s) => f.write_str(s),
            other => match serde_json::to_string(other) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{:?}", other),
            },
        }
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Bool(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Integer(value)
    }
}

impl From<i32> for PayloadValue {
    fn from(value: i32) -> Self {
        PayloadValue::Integer(value as i64)
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        PayloadValue::Float(value)
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl<T: Into<PayloadValue>> From<Vec<T>> for PayloadValue {
    fn from(values: Vec<T>) -> Self {
        PayloadValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Object a notification was posted on behalf of
#[derive(Clone)]
pub struct Origin(Arc<dyn Any + Send + Sync>);

impl Origin {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wrap an object that is already shared
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self(value)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Whether both origins refer to the same object
    pub fn ptr_eq(&self, other: &Origin) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Origin").field(&Arc::as_ptr(&self.0)).finish()
    }
}

/// A single broadcast
#[derive(Debug, Clone)]
pub struct Notification {
    key: NotificationKey,
    origin: Option<Origin>,
    user_info: UserInfo,
}

impl Notification {
    pub fn new(key: NotificationKey, origin: Option<Origin>, user_info: Option<UserInfo>) -> Self {
        Self {
            key,
            origin,
            user_info: user_info.unwrap_or_default(),
        }
    }

    pub fn key(&self) -> &NotificationKey {
        &self.key
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    /// Payload value by name
    pub fn get(&self, name: &str) -> Option<&PayloadValue> {
        self.user_info.get(name)
    }
}
