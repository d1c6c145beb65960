//! Notification handlers.
//!
//! Processes "checkout session completed" notifications, the second,
//! independent activation path of a checkout.

mod handle_payment_notification;

pub use handle_payment_notification::{
    HandlePaymentNotificationCommand, HandlePaymentNotificationHandler, NotificationAck,
    CHECKOUT_SESSION_COMPLETED, DEFAULT_NOTIFICATION_DELAY,
};
