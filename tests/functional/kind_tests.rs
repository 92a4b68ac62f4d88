//! Per-kind rule coverage through the full policy chain.

use konnect_operator::crd::{ControlPlaneRef, ControlPlaneRefType, Kind};
use konnect_operator::webhooks::policies::ReferenceGrantIndex;

use crate::common::{ResourceDocumentBuilder, konnect_id_ref, validate_create};

fn kic_ref() -> ControlPlaneRef {
    ControlPlaneRef {
        ref_type: ControlPlaneRefType::Kic,
        konnect_id: None,
        konnect_namespaced_ref: None,
    }
}

#[test]
fn test_reference_required_kinds_reject_missing_ref() {
    let grants = ReferenceGrantIndex::new();
    for kind in [
        Kind::KongService,
        Kind::KongRoute,
        Kind::KongUpstream,
        Kind::KongTarget,
        Kind::KongKey,
        Kind::KongCertificate,
        Kind::KongCACertificate,
        Kind::KongSNI,
        Kind::KongCredentialBasicAuth,
        Kind::KongCredentialAPIKey,
        Kind::KongDataPlaneClientCertificate,
        Kind::KongPluginBinding,
    ] {
        let doc = ResourceDocumentBuilder::new(kind, "test").build();
        let result = validate_create(&doc, &grants);
        assert!(!result.allowed, "{kind} should require a control plane ref");
        assert_eq!(result.message.unwrap(), "controlPlaneRef is required");
    }
}

#[test]
fn test_reference_optional_kinds_accept_missing_ref() {
    let grants = ReferenceGrantIndex::new();
    for kind in [Kind::KongConsumer, Kind::KongConsumerGroup, Kind::KongKeySet] {
        let doc = ResourceDocumentBuilder::new(kind, "test").build();
        assert!(
            validate_create(&doc, &grants).allowed,
            "{kind} should accept a missing control plane ref"
        );
    }

    let vault = ResourceDocumentBuilder::new(Kind::KongVault, "vault-1")
        .cluster_scoped()
        .build();
    assert!(validate_create(&vault, &grants).allowed);
}

#[test]
fn test_kic_support_matrix() {
    let grants = ReferenceGrantIndex::new();

    for kind in [
        Kind::KongService,
        Kind::KongRoute,
        Kind::KongConsumer,
        Kind::KongConsumerGroup,
    ] {
        let doc = ResourceDocumentBuilder::new(kind, "test")
            .control_plane_ref(kic_ref())
            .build();
        assert!(
            validate_create(&doc, &grants).allowed,
            "{kind} should accept a KIC control plane"
        );
    }

    for kind in [Kind::KongUpstream, Kind::KongKey, Kind::KongSNI, Kind::KongKeySet] {
        let doc = ResourceDocumentBuilder::new(kind, "test")
            .control_plane_ref(kic_ref())
            .build();
        let result = validate_create(&doc, &grants);
        assert!(!result.allowed, "{kind} should reject a KIC control plane");
        assert_eq!(result.message.unwrap(), "KIC is not supported as control plane");
    }
}

#[test]
fn test_cluster_scoped_vault_with_kic() {
    let grants = ReferenceGrantIndex::new();
    let vault = ResourceDocumentBuilder::new(Kind::KongVault, "vault-1")
        .cluster_scoped()
        .control_plane_ref(kic_ref())
        .build();
    assert!(validate_create(&vault, &grants).allowed);
}

#[test]
fn test_konnect_id_accepted_everywhere() {
    use konnect_operator::crd::PluginBindingTargets;

    use crate::common::target;

    let grants = ReferenceGrantIndex::new();
    for kind in Kind::ALL {
        let mut builder =
            ResourceDocumentBuilder::new(kind, "test").control_plane_ref(konnect_id_ref("cp-123"));
        if kind == Kind::KongPluginBinding {
            builder = builder.targets(PluginBindingTargets {
                route_ref: Some(target("route-1")),
                ..Default::default()
            });
        }
        assert!(
            validate_create(&builder.build(), &grants).allowed,
            "{kind} should accept a konnectID control plane ref"
        );
    }
}
