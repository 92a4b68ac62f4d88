//! Custom Resource Definitions and shared resource shapes.
//!
//! - Discriminated control plane references (`refs`)
//! - Status conditions and the derived lifecycle state (`conditions`)
//! - Plugin binding scope and targets (`bindings`)
//! - `KongReferenceGrant` for cross-namespace authorization (`reference_grant`)
//! - The engine-facing `ResourceDocument` view (`document`)

mod bindings;
mod conditions;
mod document;
mod reference_grant;
mod refs;

pub use bindings::*;
pub use conditions::*;
pub use document::*;
pub use reference_grant::*;
pub use refs::*;
