//! Tag list bounds validation.
//!
//! Tier 1 (Shape): always enforced.
//!
//! The count bound is checked before per-entry length.

use super::{FieldPath, ValidationContext, ValidationResult};

/// Maximum number of tags on a resource.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag, in characters.
pub const MAX_TAG_LENGTH: usize = 128;

/// Validate tag count and per-entry length.
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let Some(tags) = &ctx.resource.spec.tags else {
        return ValidationResult::allowed();
    };

    let path = FieldPath::spec().child("tags");
    if tags.len() > MAX_TAGS {
        return ValidationResult::denied(
            path,
            format!("Too many: {}: must have at most {} items", tags.len(), MAX_TAGS),
        );
    }

    for (i, tag) in tags.iter().enumerate() {
        if tag.chars().count() > MAX_TAG_LENGTH {
            return ValidationResult::denied(
                path.clone().index(i),
                format!("tags entries must not be longer than {} characters", MAX_TAG_LENGTH),
            );
        }
    }

    ValidationResult::allowed()
}
