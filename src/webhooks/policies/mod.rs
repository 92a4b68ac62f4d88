//! Validation policies for Kong configuration admission webhooks.
//!
//! Policies are organized into tiers:
//! - Tier 1 (Shape): always enforced — reference union shape, namespace
//!   scoping against reference grants, tag bounds, binding target cardinality
//! - Tier 2 (Update): only enforced on UPDATE operations — immutability of
//!   Programmed-locked fields
//!
//! Policies run in a fixed order and the first failure wins; a rejected call
//! carries exactly one message with the field path it addresses. Shape
//! failures, immutability failures, and missing-grant denials are all
//! reported the same way.

mod field_path;
pub mod grants;
pub mod immutability;
pub mod namespace;
pub mod reference;
pub mod ruleset;
pub mod tags;
pub mod targets;

pub use field_path::FieldPath;
pub use grants::{GrantSource, GrantTarget, ReferenceGrantIndex, validate_grant};
pub use ruleset::{ImmutableField, KindRules, rules_for};

use crate::crd::ResourceDocument;

/// Result of a validation check
#[derive(Debug)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub allowed: bool,
    /// Path of the field the failure addresses (if not allowed)
    pub field_path: Option<FieldPath>,
    /// Detailed message (if not allowed)
    pub message: Option<String>,
}

impl ValidationResult {
    /// Create an allowed result
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            field_path: None,
            message: None,
        }
    }

    /// Create a denied result
    pub fn denied(field_path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            field_path: Some(field_path),
            message: Some(message.into()),
        }
    }
}

/// Context for validation
pub struct ValidationContext<'a> {
    /// The resource being validated
    pub resource: &'a ResourceDocument,
    /// The old resource (for UPDATE operations)
    pub old_resource: Option<&'a ResourceDocument>,
    /// Reference grant snapshot, read-consistent within this call
    pub grants: &'a ReferenceGrantIndex,
    /// Whether this is a dry-run request
    pub dry_run: bool,
}

impl<'a> ValidationContext<'a> {
    /// Check if this is an UPDATE operation
    pub fn is_update(&self) -> bool {
        self.old_resource.is_some()
    }
}

/// Run all validation policies for the resource's kind
pub fn validate_all(ctx: &ValidationContext<'_>) -> ValidationResult {
    // Tier 1: shape validations (always enforced)
    let result = reference::validate(ctx);
    if !result.allowed {
        return result;
    }

    let result = namespace::validate(ctx);
    if !result.allowed {
        return result;
    }

    let result = tags::validate(ctx);
    if !result.allowed {
        return result;
    }

    let result = targets::validate(ctx);
    if !result.allowed {
        return result;
    }

    // Tier 2: update validations (only for UPDATE operations)
    if ctx.is_update() {
        let result = immutability::validate(ctx);
        if !result.allowed {
            return result;
        }
    }

    ValidationResult::allowed()
}
