//! KongReferenceGrant Custom Resource Definition.
//!
//! A reference grant authorizes cross-namespace references from one resource
//! kind to another. Grants live in the namespace of the "to" side and are
//! additive only: absence of a matching grant denies the reference.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// KongReferenceGrant permits references from resources in another namespace.
///
/// Example:
/// ```yaml
/// apiVersion: configuration.konghq.com/v1alpha1
/// kind: KongReferenceGrant
/// metadata:
///   name: allow-routes-from-a
///   namespace: b
/// spec:
///   from:
///     namespace: a
///     kind: KongRoute
///     group: configuration.konghq.com
///   to:
///     kind: KongService
///     group: configuration.konghq.com
/// ```
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "configuration.konghq.com",
    version = "v1alpha1",
    kind = "KongReferenceGrant",
    plural = "kongreferencegrants",
    shortname = "krg",
    namespaced,
    printcolumn = r#"{"name":"From Kind", "type":"string", "jsonPath":".spec.from.kind"}"#,
    printcolumn = r#"{"name":"From Namespace", "type":"string", "jsonPath":".spec.from.namespace"}"#,
    printcolumn = r#"{"name":"To Kind", "type":"string", "jsonPath":".spec.to.kind"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct KongReferenceGrantSpec {
    /// The referencing side the grant authorizes. Matched exactly.
    pub from: GrantFrom,

    /// The referenced side the grant authorizes.
    pub to: GrantTo,
}

/// The referencing side of a grant.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantFrom {
    /// Namespace of the referencing resource. Must be empty for KongVault
    /// (cluster-scoped) and non-empty for every other kind.
    #[serde(default)]
    pub namespace: String,

    /// Kind of the referencing resource.
    pub kind: String,

    /// API group of the referencing resource.
    pub group: String,
}

/// The referenced side of a grant.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantTo {
    /// Kind of the referenced resource.
    pub kind: String,

    /// API group of the referenced resource.
    pub group: String,

    /// Name of the referenced resource. Absent authorizes any name in the
    /// grant's namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
