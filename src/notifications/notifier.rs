//! Typed Notifier
//!
//! Adopting [`Notifier`] gives a type add/post/remove operations over its own
//! notification vocabulary. Every operation derives the key
//! `<NAMESPACE>.<case>` and hands it to a [`NotificationCenter`]; the trait
//! keeps no state of its own and adds no synchronisation.

use std::sync::Arc;

use crate::notifications::center::NotificationCenter;
use crate::notifications::error::NotificationResult;
use crate::notifications::key::NotificationKey;
use crate::notifications::kind::{validate_vocabulary, NotificationKind};
use crate::notifications::observer::Observer;
use crate::notifications::payload::{Notification, Origin, UserInfo};

/// A type that publishes a closed vocabulary of notifications
pub trait Notifier {
    /// The notification cases this type can post
    type Notification: NotificationKind;

    /// Prefix of every key this type derives
    const NAMESPACE: &'static str;

    /// Key under which `notification` is registered and posted
    fn notification_key(notification: Self::Notification) -> NotificationKey {
        NotificationKey::derive(Self::NAMESPACE, notification.name())
    }

    /// Check the namespace and the vocabulary's case names
    fn validate() -> NotificationResult<()> {
        validate_vocabulary::<Self::Notification>(Self::NAMESPACE)
    }

    /// Call `callback` on `observer` whenever `notification` is posted.
    ///
    /// Adding the same observer and callback twice delivers twice.
    fn add_observer<O, F>(
        center: &NotificationCenter,
        observer: &Arc<O>,
        callback: F,
        notification: Self::Notification,
    ) where
        O: Observer,
        F: Fn(&O, &Notification) + Send + Sync + 'static,
    {
        center.register(Self::notification_key(notification), observer, callback);
    }

    /// Synchronously deliver `notification` to every registered observer
    fn post_notification(
        center: &NotificationCenter,
        notification: Self::Notification,
        origin: Option<Origin>,
        user_info: Option<UserInfo>,
    ) {
        center.deliver(&Self::notification_key(notification), origin, user_info);
    }

    /// Instance-level form of [`Notifier::post_notification`]
    fn post(
        &self,
        center: &NotificationCenter,
        notification: Self::Notification,
        origin: Option<Origin>,
        user_info: Option<UserInfo>,
    ) {
        Self::post_notification(center, notification, origin, user_info);
    }

    /// Stop delivering to `observer`.
    ///
    /// With a notification, only that key is removed. Without one, every
    /// registration of the observer is removed, whichever notifier made it.
    fn remove_observer<O>(center: &NotificationCenter, observer: &O, notification: Option<Self::Notification>)
    where
        O: Observer + ?Sized,
    {
        let key = notification.map(Self::notification_key);
        center.unregister(observer.observer_id(), key.as_ref());
    }
}
