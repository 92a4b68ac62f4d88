//! Plugin binding target cardinality validation.
//!
//! Tier 1 (Shape): always enforced, KongPluginBinding only.
//!
//! Enforces the scope/target contract: a global binding carries no targets,
//! a targeted binding carries at least one, consumer and consumer group are
//! mutually exclusive, and route/service pairings must be declared
//! compatible.

use crate::crd::{Kind, PluginBindingScope, TargetRef};

use super::ruleset::rules_for;
use super::{FieldPath, ValidationContext, ValidationResult};

/// Validate the target set of a plugin binding.
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    if ctx.resource.kind != Kind::KongPluginBinding {
        return ValidationResult::allowed();
    }

    let rules = rules_for(ctx.resource.kind);
    let scope = ctx.resource.spec.scope.unwrap_or_default();
    let targets = ctx.resource.spec.targets.as_ref();
    let path = FieldPath::spec().child("targets");

    match scope {
        PluginBindingScope::GlobalInControlPlane => {
            if targets.is_some_and(|t| !t.is_empty()) {
                return ValidationResult::denied(
                    path,
                    "No targets must be set when scope is 'GlobalInControlPlane'",
                );
            }
        }
        PluginBindingScope::OnlyTargets => {
            let Some(targets) = targets.filter(|t| !t.is_empty()) else {
                return ValidationResult::denied(
                    path,
                    "At least one target reference must be set when scope is 'OnlyTargets'",
                );
            };

            if targets.consumer_ref.is_some() && targets.consumer_group_ref.is_some() {
                return ValidationResult::denied(
                    path,
                    "Cannot set Consumer and ConsumerGroup at the same time",
                );
            }

            if let (Some(route), Some(service)) = (&targets.route_ref, &targets.service_ref) {
                let route_kind = target_kind(route, "KongRoute");
                let service_kind = target_kind(service, "KongService");
                let compatible = rules
                    .route_service_pairs
                    .iter()
                    .any(|(r, s)| *r == route_kind && *s == service_kind);
                if !compatible {
                    return ValidationResult::denied(
                        path,
                        format!(
                            "routeRef of kind {} cannot be combined with serviceRef of kind {}",
                            route_kind, service_kind
                        ),
                    );
                }
            }
        }
    }

    ValidationResult::allowed()
}

fn target_kind<'a>(target: &'a TargetRef, default: &'a str) -> &'a str {
    target.kind.as_deref().unwrap_or(default)
}
