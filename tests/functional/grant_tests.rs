//! Reference grant matrix behavior through the full policy chain.

use konnect_operator::crd::{
    GROUP_CONFIGURATION, GROUP_KONNECT, KIND_KONNECT_CONTROL_PLANE, Kind,
};
use konnect_operator::webhooks::policies::{ReferenceGrantIndex, validate_grant};

use crate::common::{GrantBuilder, ResourceDocumentBuilder, namespaced_ref, validate_create};

#[test]
fn test_adding_and_removing_a_grant_flips_the_decision() {
    let route = ResourceDocumentBuilder::new(Kind::KongRoute, "route-1")
        .namespace("a")
        .control_plane_name("cp-1")
        .service_ref("svc-1", Some("b"))
        .build();

    assert!(!validate_create(&route, &ReferenceGrantIndex::new()).allowed);

    let grant = GrantBuilder::new("b")
        .from("a", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .build();
    let with_grant = ReferenceGrantIndex::from_grants([&grant]);
    assert!(validate_create(&route, &with_grant).allowed);

    // A fresh snapshot without the grant denies again.
    assert!(!validate_create(&route, &ReferenceGrantIndex::new()).allowed);
}

#[test]
fn test_grant_must_live_in_the_referenced_namespace() {
    let route = ResourceDocumentBuilder::new(Kind::KongRoute, "route-1")
        .namespace("a")
        .control_plane_name("cp-1")
        .service_ref("svc-1", Some("b"))
        .build();

    // Same grant content but living in the referencing namespace: no effect.
    let misplaced = GrantBuilder::new("a")
        .from("a", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .build();
    let grants = ReferenceGrantIndex::from_grants([&misplaced]);
    assert!(!validate_create(&route, &grants).allowed);
}

#[test]
fn test_grant_source_kind_is_matched_exactly() {
    let route = ResourceDocumentBuilder::new(Kind::KongRoute, "route-1")
        .namespace("a")
        .control_plane_name("cp-1")
        .service_ref("svc-1", Some("b"))
        .build();

    let for_consumers = GrantBuilder::new("b")
        .from("a", "KongConsumer", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .build();
    let grants = ReferenceGrantIndex::from_grants([&for_consumers]);
    assert!(!validate_create(&route, &grants).allowed);
}

#[test]
fn test_control_plane_grant_for_cluster_scoped_vault() {
    let vault = ResourceDocumentBuilder::new(Kind::KongVault, "vault-1")
        .cluster_scoped()
        .control_plane_ref(namespaced_ref("cp-1", Some("b")))
        .build();

    assert!(!validate_create(&vault, &ReferenceGrantIndex::new()).allowed);

    // Cluster-scoped referents carry an empty from.namespace.
    let grant = GrantBuilder::new("b")
        .from("", "KongVault", GROUP_CONFIGURATION)
        .to(KIND_KONNECT_CONTROL_PLANE, GROUP_KONNECT)
        .build();
    let grants = ReferenceGrantIndex::from_grants([&grant]);
    assert!(validate_create(&vault, &grants).allowed);
}

#[test]
fn test_multiple_grants_any_match_authorizes() {
    let route = ResourceDocumentBuilder::new(Kind::KongRoute, "route-1")
        .namespace("a")
        .control_plane_name("cp-1")
        .service_ref("svc-1", Some("b"))
        .build();

    let unrelated = GrantBuilder::new("b")
        .from("c", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .build();
    let named_other = GrantBuilder::new("b")
        .from("a", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .to_name("svc-9")
        .build();
    let matching = GrantBuilder::new("b")
        .from("a", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .to_name("svc-1")
        .build();

    let grants = ReferenceGrantIndex::from_grants([&unrelated, &named_other, &matching]);
    assert_eq!(grants.len(), 3);
    assert!(validate_create(&route, &grants).allowed);
}

#[test]
fn test_grant_shape_rules() {
    let valid = GrantBuilder::new("b")
        .from("a", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .build();
    assert!(validate_grant(&valid.spec).allowed);

    let missing_from_kind = GrantBuilder::new("b")
        .from("a", "", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .build();
    let result = validate_grant(&missing_from_kind.spec);
    assert!(!result.allowed);
    assert_eq!(result.field_path.unwrap().to_string(), "spec.from.kind");

    let vault_with_namespace = GrantBuilder::new("b")
        .from("a", "KongVault", GROUP_CONFIGURATION)
        .to(KIND_KONNECT_CONTROL_PLANE, GROUP_KONNECT)
        .build();
    let result = validate_grant(&vault_with_namespace.spec);
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "namespace must be empty for KongVault and non-empty for other kinds"
    );
}
