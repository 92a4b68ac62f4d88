//! Engine-facing view of a proposed resource state.
//!
//! The admission endpoint receives `DynamicObject` payloads for many kinds;
//! [`ResourceDocument`] extracts the handful of fields the validation rules
//! inspect. The engine never mutates a document.

use kube::core::DynamicObject;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crd::bindings::{PluginBindingScope, PluginBindingTargets};
use crate::crd::conditions::Condition;
use crate::crd::refs::{ControlPlaneRef, ServiceRef};

/// API group of the validated configuration kinds.
pub const GROUP_CONFIGURATION: &str = "configuration.konghq.com";

/// API group of the KonnectGatewayControlPlane target kind.
pub const GROUP_KONNECT: &str = "konnect.konghq.com";

/// Kind of the control plane object a `konnectNamespacedRef` points at.
pub const KIND_KONNECT_CONTROL_PLANE: &str = "KonnectGatewayControlPlane";

/// Resource kinds validated by the admission engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Kind {
    KongService,
    KongRoute,
    KongUpstream,
    KongTarget,
    KongConsumer,
    KongConsumerGroup,
    KongPluginBinding,
    KongVault,
    KongKey,
    KongKeySet,
    KongCertificate,
    KongCACertificate,
    KongSNI,
    KongCredentialBasicAuth,
    KongCredentialAPIKey,
    KongDataPlaneClientCertificate,
}

impl Kind {
    /// All validated kinds, in declared order.
    pub const ALL: [Kind; 16] = [
        Kind::KongService,
        Kind::KongRoute,
        Kind::KongUpstream,
        Kind::KongTarget,
        Kind::KongConsumer,
        Kind::KongConsumerGroup,
        Kind::KongPluginBinding,
        Kind::KongVault,
        Kind::KongKey,
        Kind::KongKeySet,
        Kind::KongCertificate,
        Kind::KongCACertificate,
        Kind::KongSNI,
        Kind::KongCredentialBasicAuth,
        Kind::KongCredentialAPIKey,
        Kind::KongDataPlaneClientCertificate,
    ];

    /// Kind name as it appears in the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::KongService => "KongService",
            Kind::KongRoute => "KongRoute",
            Kind::KongUpstream => "KongUpstream",
            Kind::KongTarget => "KongTarget",
            Kind::KongConsumer => "KongConsumer",
            Kind::KongConsumerGroup => "KongConsumerGroup",
            Kind::KongPluginBinding => "KongPluginBinding",
            Kind::KongVault => "KongVault",
            Kind::KongKey => "KongKey",
            Kind::KongKeySet => "KongKeySet",
            Kind::KongCertificate => "KongCertificate",
            Kind::KongCACertificate => "KongCACertificate",
            Kind::KongSNI => "KongSNI",
            Kind::KongCredentialBasicAuth => "KongCredentialBasicAuth",
            Kind::KongCredentialAPIKey => "KongCredentialAPIKey",
            Kind::KongDataPlaneClientCertificate => "KongDataPlaneClientCertificate",
        }
    }

    /// API group of this kind.
    pub fn group(self) -> &'static str {
        GROUP_CONFIGURATION
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Kind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DocumentError::UnknownKind(s.to_string()))
    }
}

/// Errors decoding an admission payload into a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The kind is not one the engine validates.
    #[error("unknown kind: {0}")]
    UnknownKind(String),

    /// The payload could not be decoded into the validated shape.
    #[error("failed to decode resource: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The subset of spec fields the validation rules inspect.
///
/// Unknown fields are ignored; kinds without a given field simply leave it
/// absent.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Control plane reference, where the kind carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_ref: Option<ControlPlaneRef>,

    /// User-assigned tags, bounded in count and entry length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Route-to-service reference (KongRoute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ref: Option<ServiceRef>,

    /// Binding scope (KongPluginBinding).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<PluginBindingScope>,

    /// Binding targets (KongPluginBinding).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<PluginBindingTargets>,
}

/// A proposed resource state as seen by the admission engine.
#[derive(Clone, Debug)]
pub struct ResourceDocument {
    /// Kind of the resource, selecting the rule set.
    pub kind: Kind,
    /// Name of the resource.
    pub name: String,
    /// Namespace of the resource; `None` for cluster-scoped kinds.
    pub namespace: Option<String>,
    /// Spec fields inspected by validation.
    pub spec: ResourceSpec,
    /// Status conditions of the (old) resource state.
    pub conditions: Vec<Condition>,
}

impl ResourceDocument {
    /// Build a document from an admission payload.
    pub fn from_dynamic(kind: Kind, obj: &DynamicObject) -> Result<Self, DocumentError> {
        let spec = match obj.data.get("spec") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => ResourceSpec::default(),
        };
        let conditions = match obj.data.get("status").and_then(|s| s.get("conditions")) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Vec::new(),
        };
        Ok(Self {
            kind,
            name: obj.metadata.name.clone().unwrap_or_default(),
            namespace: obj.metadata.namespace.clone(),
            spec,
            conditions,
        })
    }
}
