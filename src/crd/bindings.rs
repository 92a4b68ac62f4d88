//! Plugin binding scope and target set types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scope of a KongPluginBinding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum PluginBindingScope {
    /// The plugin applies only to the referenced targets.
    #[default]
    OnlyTargets,
    /// The plugin applies to every entity in the control plane; no targets
    /// may be referenced.
    GlobalInControlPlane,
}

impl std::fmt::Display for PluginBindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginBindingScope::OnlyTargets => write!(f, "OnlyTargets"),
            PluginBindingScope::GlobalInControlPlane => write!(f, "GlobalInControlPlane"),
        }
    }
}

/// A single plugin binding target.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetRef {
    /// Name of the target object.
    pub name: String,

    /// Kind of the target object. Defaults per target slot when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// API group of the target object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Optional target sub-references of a plugin binding.
///
/// `consumerRef` and `consumerGroupRef` are mutually exclusive; route/service
/// pairings are restricted by per-kind compatibility tables.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginBindingTargets {
    /// Consumer the plugin attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_ref: Option<TargetRef>,

    /// Consumer group the plugin attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_group_ref: Option<TargetRef>,

    /// Route the plugin attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_ref: Option<TargetRef>,

    /// Service the plugin attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ref: Option<TargetRef>,
}

impl PluginBindingTargets {
    /// Whether no target sub-reference is set.
    pub fn is_empty(&self) -> bool {
        self.consumer_ref.is_none()
            && self.consumer_group_ref.is_none()
            && self.route_ref.is_none()
            && self.service_ref.is_none()
    }
}
