//! Notification Adapters
//!
//! Implementations of the `NotificationDispatcher` port.
//!
//! - **InProcessNotificationDispatcher** - Spawns the notification handler (default)
//! - **HttpNotificationDispatcher** - Posts to a confirmation endpoint

mod http_dispatcher;
mod in_process_dispatcher;

pub use http_dispatcher::{HttpNotificationDispatcher, DEFAULT_DISPATCH_TIMEOUT};
pub use in_process_dispatcher::InProcessNotificationDispatcher;
