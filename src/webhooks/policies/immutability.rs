//! Immutability validation policy.
//!
//! Tier 2 (Update): only enforced on UPDATE operations.
//!
//! Once the old state carries a `Programmed=True` condition the resource is
//! Locked and its declared frozen fields may no longer change. A reference
//! that was never set may still be assigned while Locked, but a reference
//! that has ever been set may not be cleared. When several frozen fields
//! change in one update, the first declared field wins and produces the
//! single reported message.

use crate::crd::{LifecycleState, ResourceDocument};

use super::ruleset::{ImmutableField, rules_for};
use super::{ValidationContext, ValidationResult};

/// Validate immutability constraints on UPDATE operations.
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let Some(old) = ctx.old_resource else {
        return ValidationResult::allowed(); // Not an UPDATE
    };

    if !LifecycleState::from_conditions(&old.conditions).is_locked() {
        return ValidationResult::allowed();
    }

    let rules = rules_for(ctx.resource.kind);
    for field in rules.immutable_fields {
        let result = check_field(*field, old, ctx.resource);
        if !result.allowed {
            return result;
        }
    }

    ValidationResult::allowed()
}

fn check_field(
    field: ImmutableField,
    old: &ResourceDocument,
    new: &ResourceDocument,
) -> ValidationResult {
    match field {
        ImmutableField::ControlPlaneRef => {
            let old_ref = old.spec.control_plane_ref.as_ref().filter(|r| r.is_set());
            let new_ref = new.spec.control_plane_ref.as_ref().filter(|r| r.is_set());

            match (old_ref, new_ref) {
                // A reference never set may be assigned while Locked.
                (None, _) => ValidationResult::allowed(),
                // The is-set bit itself is immutable: set may not become unset.
                (Some(_), None) => {
                    ValidationResult::denied(field.path(), "controlPlaneRef is required once set")
                }
                (Some(old_ref), Some(new_ref)) if old_ref != new_ref => frozen(field),
                _ => ValidationResult::allowed(),
            }
        }
        ImmutableField::Scope => {
            if old.spec.scope.unwrap_or_default() != new.spec.scope.unwrap_or_default() {
                frozen(field)
            } else {
                ValidationResult::allowed()
            }
        }
    }
}

fn frozen(field: ImmutableField) -> ValidationResult {
    let path = field.path();
    let message = format!("{path} is immutable when an entity is already Programmed");
    ValidationResult::denied(path, message)
}
