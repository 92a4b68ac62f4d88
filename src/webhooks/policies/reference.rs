//! Control plane reference shape validation.
//!
//! Tier 1 (Shape): always enforced.
//!
//! Enforces the discriminated union contract: exactly the companion field
//! matching `type` may be set, `kic` is only legal for kinds that declare
//! KIC support, and kinds that require a reference reject an unset one.

use crate::crd::{ControlPlaneRef, ControlPlaneRefType};

use super::ruleset::rules_for;
use super::{FieldPath, ValidationContext, ValidationResult};

/// Validate the control plane reference of the proposed resource.
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let rules = rules_for(ctx.resource.kind);
    let path = FieldPath::spec().child("controlPlaneRef");

    let Some(cp_ref) = &ctx.resource.spec.control_plane_ref else {
        if rules.control_plane_ref_required {
            return ValidationResult::denied(path, "controlPlaneRef is required");
        }
        return ValidationResult::allowed();
    };

    validate_shape(cp_ref, rules.supports_kic, rules.control_plane_ref_required, path)
}

/// Validate one reference value against its declared type tag.
fn validate_shape(
    cp_ref: &ControlPlaneRef,
    supports_kic: bool,
    required: bool,
    path: FieldPath,
) -> ValidationResult {
    match cp_ref.ref_type {
        ControlPlaneRefType::KonnectNamespacedRef => {
            let named = cp_ref
                .konnect_namespaced_ref
                .as_ref()
                .is_some_and(|r| !r.name.is_empty());
            if !named {
                return ValidationResult::denied(
                    path,
                    "when type is konnectNamespacedRef, konnectNamespacedRef must be set",
                );
            }
            if cp_ref.konnect_id.is_some() {
                return ValidationResult::denied(
                    path,
                    "when type is konnectNamespacedRef, konnectID must not be set",
                );
            }
        }
        ControlPlaneRefType::KonnectId => {
            if !cp_ref.konnect_id.as_ref().is_some_and(|id| !id.is_empty()) {
                return ValidationResult::denied(path, "when type is konnectID, konnectID must be set");
            }
            if cp_ref.konnect_namespaced_ref.is_some() {
                return ValidationResult::denied(
                    path,
                    "when type is konnectID, konnectNamespacedRef must not be set",
                );
            }
        }
        ControlPlaneRefType::Kic => {
            if !supports_kic {
                return ValidationResult::denied(path, "KIC is not supported as control plane");
            }
            if cp_ref.konnect_id.is_some() {
                return ValidationResult::denied(path, "when type is kic, konnectID must not be set");
            }
            if cp_ref.konnect_namespaced_ref.is_some() {
                return ValidationResult::denied(
                    path,
                    "when type is kic, konnectNamespacedRef must not be set",
                );
            }
        }
        ControlPlaneRefType::Unset => {
            if cp_ref.konnect_id.is_some() {
                return ValidationResult::denied(
                    path,
                    "when type is not set, konnectID must not be set",
                );
            }
            if cp_ref.konnect_namespaced_ref.is_some() {
                return ValidationResult::denied(
                    path,
                    "when type is not set, konnectNamespacedRef must not be set",
                );
            }
            if required {
                return ValidationResult::denied(path, "controlPlaneRef is required");
            }
        }
    }

    ValidationResult::allowed()
}
