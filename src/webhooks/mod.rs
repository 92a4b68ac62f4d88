//! Admission webhooks for Kong configuration resources.
//!
//! The server module hosts the TLS endpoint; the policies module holds the
//! tiered validation rules it enforces.

pub mod policies;
pub mod server;

pub use policies::{ValidationContext, ValidationResult, validate_all};
pub use server::{
    WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, WebhookState,
    create_webhook_router, run_webhook_server,
};
