//! Service Module
//!
//! Long-lived collaborators injected into the server state:
//! - [`notifier`]: outbound notification queue and its worker
//! - [`shipping`]: shipping rate lookup seam

pub mod notifier;
pub mod shipping;

pub use notifier::{LogSink, Notification, NotificationSink, Notifier, NotifierService};
pub use shipping::{NoRates, ShippingRates, StaticRates};
