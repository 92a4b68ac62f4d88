//! Reference grant index and grant shape validation.
//!
//! Grants authorize cross-namespace references and are additive only:
//! absence of a matching grant is the only denial condition. The index is a
//! read-only snapshot, consistent within one admission call.

use std::collections::HashMap;

use kube::ResourceExt;

use crate::crd::{Kind, KongReferenceGrant, KongReferenceGrantSpec};

use super::ruleset::rules_for;
use super::{FieldPath, ValidationResult};

/// Identity of the referencing side of a grant query.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GrantSource {
    /// Namespace of the referencing resource; empty for cluster-scoped kinds.
    pub namespace: String,
    /// Kind of the referencing resource.
    pub kind: String,
    /// API group of the referencing resource.
    pub group: String,
}

/// Identity of the referenced object in a grant query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantTarget {
    /// Namespace the reference points into. Grants live in this namespace.
    pub namespace: String,
    /// Kind of the referenced object.
    pub kind: String,
    /// API group of the referenced object.
    pub group: String,
    /// Name of the referenced object.
    pub name: String,
}

/// Target name on a stored grant.
///
/// Wildcard is an explicit variant rather than an empty-string sentinel, so a
/// resource literally named `""` can never match accidentally.
#[derive(Clone, Debug, Eq, PartialEq)]
enum TargetName {
    Any,
    Named(String),
}

#[derive(Clone, Debug)]
struct GrantEntry {
    source: GrantSource,
    grant_namespace: String,
    target_name: TargetName,
}

/// Read-only snapshot of the reference grants visible to one admission call.
///
/// Indexed by `(to.kind, to.group)`; a grant matches when its `from` equals
/// the query source exactly, it lives in the target's namespace, and its
/// target name is the wildcard or the exact queried name.
#[derive(Clone, Debug, Default)]
pub struct ReferenceGrantIndex {
    entries: HashMap<(String, String), Vec<GrantEntry>>,
    len: usize,
}

impl ReferenceGrantIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from grant objects.
    pub fn from_grants<'a>(grants: impl IntoIterator<Item = &'a KongReferenceGrant>) -> Self {
        let mut index = Self::new();
        for grant in grants {
            index.insert(grant);
        }
        index
    }

    /// Add one grant to the snapshot.
    pub fn insert(&mut self, grant: &KongReferenceGrant) {
        let spec = &grant.spec;
        let entry = GrantEntry {
            source: GrantSource {
                namespace: spec.from.namespace.clone(),
                kind: spec.from.kind.clone(),
                group: spec.from.group.clone(),
            },
            grant_namespace: grant.namespace().unwrap_or_default(),
            target_name: match &spec.to.name {
                Some(name) => TargetName::Named(name.clone()),
                None => TargetName::Any,
            },
        };
        self.entries
            .entry((spec.to.kind.clone(), spec.to.group.clone()))
            .or_default()
            .push(entry);
        self.len += 1;
    }

    /// Whether a reference from `from` to `to` is authorized. Fail-closed:
    /// no matching grant denies.
    pub fn authorized(&self, from: &GrantSource, to: &GrantTarget) -> bool {
        let Some(entries) = self.entries.get(&(to.kind.clone(), to.group.clone())) else {
            return false;
        };
        entries.iter().any(|entry| {
            entry.source == *from
                && entry.grant_namespace == to.namespace
                && match &entry.target_name {
                    TargetName::Any => true,
                    TargetName::Named(name) => *name == to.name,
                }
        })
    }

    /// Number of grants in the snapshot.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the snapshot holds no grants.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Validate the shape of a grant object itself, on grant admission.
///
/// The `from.namespace` emptiness rule mirrors the scope of the referencing
/// kind: empty for cluster-scoped KongVault, non-empty for every other kind.
pub fn validate_grant(spec: &KongReferenceGrantSpec) -> ValidationResult {
    let from_path = FieldPath::spec().child("from");
    if spec.from.kind.is_empty() {
        return ValidationResult::denied(from_path.child("kind"), "kind is required");
    }
    if spec.from.group.is_empty() {
        return ValidationResult::denied(from_path.child("group"), "group is required");
    }

    let wants_empty = spec
        .from
        .kind
        .parse::<Kind>()
        .map(|k| rules_for(k).grant_from_namespace_must_be_empty)
        .unwrap_or(false);
    if wants_empty != spec.from.namespace.is_empty() {
        return ValidationResult::denied(
            from_path.child("namespace"),
            "namespace must be empty for KongVault and non-empty for other kinds",
        );
    }

    let to_path = FieldPath::spec().child("to");
    if spec.to.kind.is_empty() {
        return ValidationResult::denied(to_path.child("kind"), "kind is required");
    }
    if spec.to.group.is_empty() {
        return ValidationResult::denied(to_path.child("group"), "group is required");
    }

    ValidationResult::allowed()
}
