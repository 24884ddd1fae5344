//! Channel abstraction for message I/O.

pub mod carrier;
pub mod channel;
pub mod mail;
pub mod webhook;

pub use carrier::{CarrierChannel, CarrierConfig};
pub use channel::{Channel, InboundItem};
pub use mail::{MailChannel, MailConfig};
pub use webhook::{WebhookChannel, WebhookConfig};
