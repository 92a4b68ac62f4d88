//! End-to-end validation scenarios through the full policy chain.

use konnect_operator::crd::{
    ControlPlaneRef, ControlPlaneRefType, GROUP_CONFIGURATION, Kind, PluginBindingScope,
    PluginBindingTargets,
};
use konnect_operator::webhooks::policies::ReferenceGrantIndex;

use crate::common::{
    GrantBuilder, ResourceDocumentBuilder, namespaced_ref, target, validate_create,
    validate_update,
};

#[test]
fn test_namespaced_ref_type_without_companion_rejected() {
    let doc = ResourceDocumentBuilder::new(Kind::KongService, "svc-1")
        .control_plane_ref(ControlPlaneRef {
            ref_type: ControlPlaneRefType::KonnectNamespacedRef,
            konnect_id: None,
            konnect_namespaced_ref: None,
        })
        .build();

    let result = validate_create(&doc, &ReferenceGrantIndex::new());
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "when type is konnectNamespacedRef, konnectNamespacedRef must be set"
    );
    assert_eq!(result.field_path.unwrap().to_string(), "spec.controlPlaneRef");
}

#[test]
fn test_programmed_reference_is_frozen() {
    let old = ResourceDocumentBuilder::new(Kind::KongService, "svc-1")
        .control_plane_name("cp-1")
        .programmed()
        .build();
    let new = ResourceDocumentBuilder::new(Kind::KongService, "svc-1")
        .control_plane_name("cp-2")
        .build();

    let grants = ReferenceGrantIndex::new();
    let result = validate_update(&old, &new, &grants);
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "spec.controlPlaneRef is immutable when an entity is already Programmed"
    );

    // The same change is fine while the resource has never been Programmed.
    let mutable_old = ResourceDocumentBuilder::new(Kind::KongService, "svc-1")
        .control_plane_name("cp-1")
        .build();
    assert!(validate_update(&mutable_old, &new, &grants).allowed);
}

#[test]
fn test_tag_bounds() {
    let grants = ReferenceGrantIndex::new();
    let base = ResourceDocumentBuilder::new(Kind::KongService, "svc-1").control_plane_name("cp-1");

    let too_many: Vec<String> = (0..21).map(|i| format!("tag-{i:04}")).collect();
    let result = validate_create(&base.clone().tags(too_many).build(), &grants);
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "Too many: 21: must have at most 20 items"
    );

    let mut one_long: Vec<String> = (0..19).map(|i| format!("tag-{i}")).collect();
    one_long.push("x".repeat(129));
    let result = validate_create(&base.clone().tags(one_long).build(), &grants);
    assert!(!result.allowed);
    assert!(result.message.unwrap().contains("must not be longer than 128 characters"));

    let in_bounds: Vec<String> = (0..20).map(|_| "x".repeat(128)).collect();
    assert!(validate_create(&base.tags(in_bounds).build(), &grants).allowed);
}

#[test]
fn test_binding_target_cardinality() {
    let grants = ReferenceGrantIndex::new();
    let base = ResourceDocumentBuilder::new(Kind::KongPluginBinding, "binding")
        .control_plane_name("cp-1")
        .scope(PluginBindingScope::OnlyTargets);

    let result = validate_create(&base.clone().build(), &grants);
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "At least one target reference must be set when scope is 'OnlyTargets'"
    );

    let route_only = PluginBindingTargets {
        route_ref: Some(target("route-1")),
        ..Default::default()
    };
    assert!(validate_create(&base.clone().targets(route_only).build(), &grants).allowed);

    let both_consumers = PluginBindingTargets {
        consumer_ref: Some(target("alice")),
        consumer_group_ref: Some(target("admins")),
        ..Default::default()
    };
    let result = validate_create(&base.targets(both_consumers).build(), &grants);
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "Cannot set Consumer and ConsumerGroup at the same time"
    );
}

#[test]
fn test_cross_namespace_service_reference_needs_grant() {
    let route = ResourceDocumentBuilder::new(Kind::KongRoute, "route-1")
        .namespace("a")
        .control_plane_name("cp-1")
        .service_ref("svc-1", Some("b"))
        .build();

    // No grant: fail-closed.
    let result = validate_create(&route, &ReferenceGrantIndex::new());
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "spec.serviceRef cannot specify namespace for namespaced resource"
    );

    // A wildcard grant in the target namespace authorizes any service name.
    let wildcard = GrantBuilder::new("b")
        .from("a", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .build();
    let grants = ReferenceGrantIndex::from_grants([&wildcard]);
    assert!(validate_create(&route, &grants).allowed);

    let other_route = ResourceDocumentBuilder::new(Kind::KongRoute, "route-2")
        .namespace("a")
        .control_plane_name("cp-1")
        .service_ref("svc-2", Some("b"))
        .build();
    assert!(validate_create(&other_route, &grants).allowed);

    // A named grant scopes authorization to exactly that service.
    let named = GrantBuilder::new("b")
        .from("a", "KongRoute", GROUP_CONFIGURATION)
        .to("KongService", GROUP_CONFIGURATION)
        .to_name("svc-1")
        .build();
    let grants = ReferenceGrantIndex::from_grants([&named]);
    assert!(validate_create(&route, &grants).allowed);
    assert!(!validate_create(&other_route, &grants).allowed);
}

#[test]
fn test_cross_namespace_control_plane_ref_message_names_the_field() {
    let doc = ResourceDocumentBuilder::new(Kind::KongService, "svc-1")
        .namespace("a")
        .control_plane_ref(namespaced_ref("cp-1", Some("other")))
        .build();

    let result = validate_create(&doc, &ReferenceGrantIndex::new());
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "spec.controlPlaneRef cannot specify namespace for namespaced resource"
    );
}

#[test]
fn test_shape_failures_win_over_immutability() {
    // The update both breaks the union shape and touches a frozen field; the
    // shape rule reports first.
    let old = ResourceDocumentBuilder::new(Kind::KongService, "svc-1")
        .control_plane_name("cp-1")
        .programmed()
        .build();
    let new = ResourceDocumentBuilder::new(Kind::KongService, "svc-1")
        .control_plane_ref(ControlPlaneRef {
            ref_type: ControlPlaneRefType::KonnectId,
            konnect_id: None,
            konnect_namespaced_ref: None,
        })
        .build();

    let result = validate_update(&old, &new, &ReferenceGrantIndex::new());
    assert!(!result.allowed);
    assert_eq!(
        result.message.unwrap(),
        "when type is konnectID, konnectID must be set"
    );
}
