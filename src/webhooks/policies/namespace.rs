//! Cross-namespace reference scope validation.
//!
//! Tier 1 (Shape): always enforced.
//!
//! A namespaced sub-reference may only name a foreign namespace when a
//! reference grant in that namespace authorizes it. Fail-closed: no matching
//! grant rejects the reference.

use crate::crd::{GROUP_KONNECT, KIND_KONNECT_CONTROL_PLANE, Kind, ResolvedControlPlaneRef};

use super::grants::{GrantSource, GrantTarget};
use super::{FieldPath, ValidationContext, ValidationResult};

/// Validate namespace scoping of every namespaced sub-reference.
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let resource = ctx.resource;

    // Control plane references by name may carry a namespace.
    if let Some(ResolvedControlPlaneRef::KonnectNamespacedRef(nref)) = resource
        .spec
        .control_plane_ref
        .as_ref()
        .and_then(|r| r.resolve())
    {
        // The contract message names the reference field; the structured path
        // still points at the nested ref that carried the namespace.
        let field = FieldPath::spec().child("controlPlaneRef");
        let path = field.clone().child("konnectNamespacedRef");
        let result = check_reference(
            ctx,
            path,
            field,
            nref.namespace.as_deref(),
            &nref.name,
            KIND_KONNECT_CONTROL_PLANE,
            GROUP_KONNECT,
        );
        if !result.allowed {
            return result;
        }
    }

    // Route-to-service references (KongRoute).
    if let Some(service_ref) = &resource.spec.service_ref {
        let path = FieldPath::spec().child("serviceRef");
        let result = check_reference(
            ctx,
            path.clone(),
            path,
            service_ref.namespace.as_deref(),
            &service_ref.name,
            Kind::KongService.as_str(),
            Kind::KongService.group(),
        );
        if !result.allowed {
            return result;
        }
    }

    ValidationResult::allowed()
}

/// Check one namespaced sub-reference against the grant snapshot.
fn check_reference(
    ctx: &ValidationContext<'_>,
    path: FieldPath,
    message_field: FieldPath,
    ref_namespace: Option<&str>,
    ref_name: &str,
    target_kind: &str,
    target_group: &str,
) -> ValidationResult {
    let Some(target_namespace) = ref_namespace else {
        return ValidationResult::allowed();
    };

    // An explicit namespace equal to the resource's own is not cross-namespace.
    if ctx.resource.namespace.as_deref() == Some(target_namespace) {
        return ValidationResult::allowed();
    }

    let from = GrantSource {
        namespace: ctx.resource.namespace.clone().unwrap_or_default(),
        kind: ctx.resource.kind.as_str().to_string(),
        group: ctx.resource.kind.group().to_string(),
    };
    let to = GrantTarget {
        namespace: target_namespace.to_string(),
        kind: target_kind.to_string(),
        group: target_group.to_string(),
        name: ref_name.to_string(),
    };

    if ctx.grants.authorized(&from, &to) {
        return ValidationResult::allowed();
    }

    let message = format!("{message_field} cannot specify namespace for namespaced resource");
    ValidationResult::denied(path, message)
}
