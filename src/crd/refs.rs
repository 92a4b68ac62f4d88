//! Discriminated control plane reference types shared across Kong CRDs.
//!
//! On the wire a control plane reference is a type tag plus optional sibling
//! fields; exactly the companion matching the tag may be set. Shape validation
//! happens once at the admission boundary and produces the strict
//! [`ResolvedControlPlaneRef`] sum type for everything downstream.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Discriminator tag for a control plane reference.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum ControlPlaneRefType {
    /// No reference mechanism selected.
    #[default]
    #[serde(rename = "")]
    Unset,
    /// Direct Konnect control plane ID.
    #[serde(rename = "konnectID")]
    KonnectId,
    /// Reference to a KonnectGatewayControlPlane by Kubernetes name.
    #[serde(rename = "konnectNamespacedRef")]
    KonnectNamespacedRef,
    /// Managed by the Kubernetes Ingress Controller.
    #[serde(rename = "kic")]
    Kic,
}

impl std::fmt::Display for ControlPlaneRefType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlPlaneRefType::Unset => write!(f, "<unset>"),
            ControlPlaneRefType::KonnectId => write!(f, "konnectID"),
            ControlPlaneRefType::KonnectNamespacedRef => write!(f, "konnectNamespacedRef"),
            ControlPlaneRefType::Kic => write!(f, "kic"),
        }
    }
}

/// Reference to a KonnectGatewayControlPlane by name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KonnectNamespacedRef {
    /// Name of the KonnectGatewayControlPlane.
    pub name: String,

    /// Namespace of the KonnectGatewayControlPlane. May only differ from the
    /// referencing resource's namespace when a reference grant permits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Control plane reference as it appears on the wire.
///
/// At most one companion field may be non-empty, and it must match `type`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneRef {
    /// Which reference mechanism is in use.
    #[serde(default, rename = "type")]
    pub ref_type: ControlPlaneRefType,

    /// Konnect control plane ID, set iff `type` is `konnectID`.
    #[serde(default, rename = "konnectID", skip_serializing_if = "Option::is_none")]
    pub konnect_id: Option<String>,

    /// Named reference, set iff `type` is `konnectNamespacedRef`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub konnect_namespaced_ref: Option<KonnectNamespacedRef>,
}

impl ControlPlaneRef {
    /// Whether any reference mechanism has been selected.
    pub fn is_set(&self) -> bool {
        self.ref_type != ControlPlaneRefType::Unset
    }

    /// Resolve into the strict sum type.
    ///
    /// Returns `None` when the wire shape is inconsistent with `type`; callers
    /// run shape validation first, so a `None` here means validation was
    /// skipped or failed.
    pub fn resolve(&self) -> Option<ResolvedControlPlaneRef> {
        match self.ref_type {
            ControlPlaneRefType::Unset => None,
            ControlPlaneRefType::KonnectId => match (&self.konnect_id, &self.konnect_namespaced_ref)
            {
                (Some(id), None) if !id.is_empty() => {
                    Some(ResolvedControlPlaneRef::KonnectId(id.clone()))
                }
                _ => None,
            },
            ControlPlaneRefType::KonnectNamespacedRef => {
                match (&self.konnect_id, &self.konnect_namespaced_ref) {
                    (None, Some(nref)) if !nref.name.is_empty() => {
                        Some(ResolvedControlPlaneRef::KonnectNamespacedRef(nref.clone()))
                    }
                    _ => None,
                }
            }
            ControlPlaneRefType::Kic => {
                if self.konnect_id.is_none() && self.konnect_namespaced_ref.is_none() {
                    Some(ResolvedControlPlaneRef::Kic)
                } else {
                    None
                }
            }
        }
    }
}

/// A control plane reference after shape validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolvedControlPlaneRef {
    /// Direct Konnect control plane ID.
    KonnectId(String),
    /// Named KonnectGatewayControlPlane.
    KonnectNamespacedRef(KonnectNamespacedRef),
    /// Managed by the Kubernetes Ingress Controller.
    Kic,
}

/// Reference from a KongRoute to a KongService.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRef {
    /// Name of the KongService.
    pub name: String,

    /// Namespace of the KongService. May only differ from the route's own
    /// namespace when a reference grant permits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
