//! Status conditions and the lifecycle state derived from them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition type marking a resource as applied to the Konnect control plane.
pub const CONDITION_TYPE_PROGRAMMED: &str = "Programmed";

/// Condition describes the state of a resource at a certain point.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition.
    pub r#type: String,
    /// Status of the condition ("True", "False", "Unknown").
    pub status: String,
    /// Machine-readable reason for the condition's last transition.
    pub reason: String,
    /// Human-readable message indicating details about last transition.
    #[serde(default)]
    pub message: String,
    /// Last time the condition transitioned from one status to another.
    pub last_transition_time: String,
    /// The generation of the resource this condition was observed for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    /// Create a new condition.
    pub fn new(
        condition_type: &str,
        status: bool,
        reason: &str,
        message: &str,
        generation: Option<i64>,
    ) -> Self {
        Self {
            r#type: condition_type.to_string(),
            status: if status {
                "True".to_string()
            } else {
                "False".to_string()
            },
            reason: reason.to_string(),
            message: message.to_string(),
            last_transition_time: jiff::Timestamp::now().to_string(),
            observed_generation: generation,
        }
    }

    /// Create a "Programmed" condition.
    pub fn programmed(programmed: bool, reason: &str, message: &str, generation: Option<i64>) -> Self {
        Self::new(CONDITION_TYPE_PROGRAMMED, programmed, reason, message, generation)
    }
}

/// Mutability of a resource as derived from its condition list.
///
/// Computed once per admission call rather than re-scanning conditions inside
/// every field rule. The reconciler owns the transition to `Locked`; the
/// admission engine only reads it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LifecycleState {
    /// The Programmed condition is absent or not "True".
    #[default]
    Mutable,
    /// The Programmed condition is "True"; frozen fields may not change.
    Locked,
}

impl LifecycleState {
    /// Derive the lifecycle state from a condition list.
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        let programmed = conditions
            .iter()
            .any(|c| c.r#type == CONDITION_TYPE_PROGRAMMED && c.status == "True");
        if programmed {
            LifecycleState::Locked
        } else {
            LifecycleState::Mutable
        }
    }

    /// Whether frozen fields may no longer change.
    pub fn is_locked(self) -> bool {
        self == LifecycleState::Locked
    }
}
