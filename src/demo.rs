//! Coffee Shop Demo
//!
//! A `Barista` posts `makeCoffee`; every subscribed `Customer` drinks.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use log::{debug, info};
use serde::Serialize;

use crate::notifications::{
    Notification, NotificationCenter, Notifier, Observer, ObserverId, PayloadValue, UserInfo,
};

crate::notification_kind! {
    /// Notifications a barista can post
    pub enum BaristaNotification {
        MakeCoffee => "makeCoffee",
    }
}

/// Publishes [`BaristaNotification`]s
#[derive(Debug, Default)]
pub struct Barista;

impl Notifier for Barista {
    type Notification = BaristaNotification;
    const NAMESPACE: &'static str = "Barista";
}

/// Observer that drinks whenever coffee is made
pub struct Customer {
    id: ObserverId,
    name: String,
    cups: AtomicUsize,
    last_order: parking_lot::Mutex<Option<UserInfo>>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: ObserverId::new(),
            name: name.into(),
            cups: AtomicUsize::new(0),
            last_order: parking_lot::Mutex::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Callback for [`BaristaNotification::MakeCoffee`]
    pub fn drink(&self, notification: &Notification) {
        let cups = self.cups.fetch_add(1, Ordering::SeqCst) + 1;
        if notification.user_info().is_empty() {
            info!("{}: Mmm... Coffee", self.name);
        } else {
            let order = notification
                .user_info()
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join(", ");
            info!("{}: Mmm... Coffee ({})", self.name, order);
        }
        debug!("{} has had {} cup(s)", self.name, cups);
        *self.last_order.lock() = Some(notification.user_info().clone());
    }

    pub fn cups(&self) -> usize {
        self.cups.load(Ordering::SeqCst)
    }

    /// Payload of the most recent coffee, if any was delivered
    pub fn last_order(&self) -> Option<UserInfo> {
        self.last_order.lock().clone()
    }
}

impl Observer for Customer {
    fn observer_id(&self) -> ObserverId {
        self.id
    }

    fn observer_name(&self) -> String {
        format!("Customer({})", self.name)
    }
}

/// Demo parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub customers: usize,
    pub orders: usize,
    pub stay_subscribed: bool,
    pub user_info: UserInfo,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            customers: 1,
            orders: 1,
            stay_subscribed: false,
            user_info: UserInfo::new(),
        }
    }
}

/// Outcome of a demo run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    pub orders_posted: usize,
    pub cups_per_customer: Vec<(String, usize)>,
    pub registrations_left: usize,
}

impl DemoReport {
    pub fn total_cups(&self) -> usize {
        self.cups_per_customer.iter().map(|(_, cups)| cups).sum()
    }
}

/// Subscribe customers, post the orders, then unsubscribe unless asked not to
pub fn run_demo(center: &NotificationCenter, config: &DemoConfig) -> DemoReport {
    let barista = Barista;
    let customers: Vec<_> = (1..=config.customers)
        .map(|n| Customer::new(format!("customer-{}", n)))
        .collect();

    for customer in &customers {
        Barista::add_observer(center, customer, Customer::drink, BaristaNotification::MakeCoffee);
    }
    info!("{} customer(s) waiting for coffee", customers.len());

    let user_info = if config.user_info.is_empty() {
        None
    } else {
        Some(config.user_info.clone())
    };

    for order in 1..=config.orders {
        debug!("Posting order {} of {}", order, config.orders);
        barista.post(center, BaristaNotification::MakeCoffee, None, user_info.clone());
    }

    if !config.stay_subscribed {
        for customer in &customers {
            Barista::remove_observer(center, &**customer, Some(BaristaNotification::MakeCoffee));
        }
        // Nobody is listening any more
        Barista::post_notification(center, BaristaNotification::MakeCoffee, None, None);
    }

    DemoReport {
        orders_posted: config.orders,
        cups_per_customer: customers
            .iter()
            .map(|customer| (customer.name().to_string(), customer.cups()))
            .collect(),
        registrations_left: center.live_registration_count(&Barista::notification_key(BaristaNotification::MakeCoffee)),
    }
}

/// Parse a `KEY=VALUE` pair into a payload entry
pub fn parse_payload_entry(raw: &str) -> Option<(String, PayloadValue)> {
    let (key, value) = raw.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), PayloadValue::infer(value.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_coffee_key() {
        assert_eq!(
            Barista::notification_key(BaristaNotification::MakeCoffee).as_str(),
            "Barista.makeCoffee"
        );
        assert!(Barista::validate().is_ok());
    }

    #[test]
    fn test_demo_unsubscribes_by_default() {
        let center = NotificationCenter::new();
        let report = run_demo(&center, &DemoConfig { customers: 2, orders: 3, ..DemoConfig::default() });

        assert_eq!(report.orders_posted, 3);
        assert_eq!(report.total_cups(), 6);
        assert!(report.cups_per_customer.iter().all(|(_, cups)| *cups == 3));
        assert_eq!(report.registrations_left, 0);
    }

    #[test]
    fn test_demo_can_stay_subscribed() {
        let center = NotificationCenter::new();
        let report = run_demo(&center, &DemoConfig { stay_subscribed: true, ..DemoConfig::default() });

        assert_eq!(report.total_cups(), 1);
        assert_eq!(report.registrations_left, 1);
    }

    #[test]
    fn test_customer_records_order_payload() {
        let center = NotificationCenter::new();
        let customer = Customer::new("ada");
        let mut order = UserInfo::new();
        order.insert("size".to_string(), "large".into());

        Barista::add_observer(&center, &customer, Customer::drink, BaristaNotification::MakeCoffee);
        Barista::post_notification(&center, BaristaNotification::MakeCoffee, None, Some(order.clone()));

        assert_eq!(customer.cups(), 1);
        assert_eq!(customer.last_order(), Some(order));
    }

    #[test]
    fn test_parse_payload_entry() {
        assert_eq!(
            parse_payload_entry("size=large"),
            Some(("size".to_string(), PayloadValue::Text("large".to_string())))
        );
        assert_eq!(parse_payload_entry("shots = 2"), Some(("shots".to_string(), PayloadValue::Integer(2))));
        assert_eq!(parse_payload_entry("=2"), None);
        assert_eq!(parse_payload_entry("no-equals"), None);
    }
}
