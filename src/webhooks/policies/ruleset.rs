//! Per-kind validation configuration.
//!
//! Every validated kind shares the same rule code; what varies is captured in
//! a small [`KindRules`] record instead of duplicated rule tables.

use crate::crd::Kind;

use super::field_path::FieldPath;

/// A field frozen once a resource is Programmed.
///
/// Declared order is the tie-break order: when several frozen fields change in
/// one update, the first declared field produces the single reported message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImmutableField {
    /// The control plane reference, including its is-set bit.
    ControlPlaneRef,
    /// The plugin binding scope.
    Scope,
}

impl ImmutableField {
    /// Path of the frozen field.
    pub fn path(self) -> FieldPath {
        match self {
            ImmutableField::ControlPlaneRef => FieldPath::spec().child("controlPlaneRef"),
            ImmutableField::Scope => FieldPath::spec().child("scope"),
        }
    }
}

/// Route/service target kind pairs a plugin binding may combine.
pub const ROUTE_SERVICE_PAIRS: &[(&str, &str)] =
    &[("KongRoute", "KongService"), ("HTTPRoute", "Service")];

const CP_REF_ONLY: &[ImmutableField] = &[ImmutableField::ControlPlaneRef];
const BINDING_FIELDS: &[ImmutableField] = &[ImmutableField::ControlPlaneRef, ImmutableField::Scope];

/// Validation configuration for one resource kind.
#[derive(Clone, Copy, Debug)]
pub struct KindRules {
    /// The kind this configuration applies to.
    pub kind: Kind,
    /// Whether the kind has no namespace of its own.
    pub cluster_scoped: bool,
    /// Whether an unset control plane reference is rejected.
    pub control_plane_ref_required: bool,
    /// Whether `type: kic` is a legal control plane reference.
    pub supports_kic: bool,
    /// Whether grants authorizing this kind must carry an empty `from.namespace`.
    pub grant_from_namespace_must_be_empty: bool,
    /// Fields frozen while Programmed, in tie-break order.
    pub immutable_fields: &'static [ImmutableField],
    /// Legal (route kind, service kind) target pairings; empty for kinds
    /// without binding targets.
    pub route_service_pairs: &'static [(&'static str, &'static str)],
}

const fn konnect_entity(kind: Kind) -> KindRules {
    KindRules {
        kind,
        cluster_scoped: false,
        control_plane_ref_required: true,
        supports_kic: false,
        grant_from_namespace_must_be_empty: false,
        immutable_fields: CP_REF_ONLY,
        route_service_pairs: &[],
    }
}

/// Look up the validation configuration for a kind.
pub fn rules_for(kind: Kind) -> KindRules {
    match kind {
        Kind::KongService | Kind::KongRoute => KindRules {
            supports_kic: true,
            ..konnect_entity(kind)
        },
        Kind::KongConsumer | Kind::KongConsumerGroup => KindRules {
            control_plane_ref_required: false,
            supports_kic: true,
            ..konnect_entity(kind)
        },
        Kind::KongPluginBinding => KindRules {
            supports_kic: true,
            immutable_fields: BINDING_FIELDS,
            route_service_pairs: ROUTE_SERVICE_PAIRS,
            ..konnect_entity(kind)
        },
        Kind::KongVault => KindRules {
            cluster_scoped: true,
            control_plane_ref_required: false,
            supports_kic: true,
            grant_from_namespace_must_be_empty: true,
            ..konnect_entity(kind)
        },
        Kind::KongKeySet => KindRules {
            control_plane_ref_required: false,
            ..konnect_entity(kind)
        },
        Kind::KongUpstream
        | Kind::KongTarget
        | Kind::KongKey
        | Kind::KongCertificate
        | Kind::KongCACertificate
        | Kind::KongSNI
        | Kind::KongCredentialBasicAuth
        | Kind::KongCredentialAPIKey
        | Kind::KongDataPlaneClientCertificate => konnect_entity(kind),
    }
}
