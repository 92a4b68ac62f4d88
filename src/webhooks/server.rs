//! Admission webhook server.
//!
//! Provides the HTTP endpoint for Kubernetes admission webhooks.
//!
//! One `/validate` endpoint serves every validated kind: requests arrive as
//! `AdmissionReview<DynamicObject>` and are dispatched on the request's kind.
//! KongReferenceGrant objects get their own shape validation; every other
//! known kind runs the tiered policy set against the reference grant snapshot.
//!
//! To enable webhooks:
//! 1. Deploy cert-manager for TLS certificates
//! 2. Create a ValidatingWebhookConfiguration covering the Kong kinds
//! 3. Mount the TLS certificate secret to the operator pod at /etc/webhook/certs/

use std::sync::Arc;
use std::time::Instant;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use kube::runtime::reflector;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::crd::{Kind, KongReferenceGrant, KongReferenceGrantSpec, ResourceDocument};
use crate::health::HealthState;
use crate::webhooks::policies::{
    ReferenceGrantIndex, ValidationContext, validate_all, validate_grant,
};

/// Default path to webhook TLS certificate
pub const WEBHOOK_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";
/// Default path to webhook TLS private key
pub const WEBHOOK_KEY_PATH: &str = "/etc/webhook/certs/tls.key";
/// Default webhook server port
pub const WEBHOOK_PORT: u16 = 9443;

/// Shared state for webhook handlers
pub struct WebhookState {
    /// Reflector-backed cache of reference grants; snapshotted per request.
    pub grants: reflector::Store<KongReferenceGrant>,
    /// Health state for admission metrics, when running inside the operator.
    pub health: Option<Arc<HealthState>>,
}

impl WebhookState {
    pub fn new(grants: reflector::Store<KongReferenceGrant>, health: Option<Arc<HealthState>>) -> Self {
        Self { grants, health }
    }

    /// Build the read-consistent grant snapshot for one admission call.
    fn grant_snapshot(&self) -> ReferenceGrantIndex {
        let grants = self.grants.state();
        ReferenceGrantIndex::from_grants(grants.iter().map(|g| g.as_ref()))
    }
}

/// Create a denial response with the field path embedded in the message.
/// kube-rs deny() only sets status.message, so we format as "[fieldPath] message"
fn deny_at(request: &AdmissionRequest<DynamicObject>, field_path: &str, message: &str) -> AdmissionResponse {
    AdmissionResponse::from(request).deny(format!("[{}] {}", field_path, message))
}

/// Create the webhook router
pub fn create_webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/validate", post(validate_handler))
        .with_state(state)
}

/// Decide one admission request against a grant snapshot.
///
/// Pure with respect to cluster state; the snapshot is the only input beyond
/// the request itself.
pub fn review_request(
    request: &AdmissionRequest<DynamicObject>,
    grants: &ReferenceGrantIndex,
) -> AdmissionResponse {
    // DELETE operations are always allowed; finalization is the
    // reconciler's concern.
    if request.operation == Operation::Delete {
        return AdmissionResponse::from(request);
    }

    let Some(object) = &request.object else {
        return deny_at(request, "object", "Missing object in request");
    };

    let kind_name = request.kind.kind.as_str();

    // Reference grants are validated for their own shape.
    if kind_name == "KongReferenceGrant" {
        return review_grant(request, object);
    }

    let Ok(kind) = kind_name.parse::<Kind>() else {
        // The ValidatingWebhookConfiguration scopes what reaches us; failing
        // closed on a config mismatch would brick unrelated resources.
        warn!(kind = %kind_name, "Admission request for unvalidated kind, allowing");
        return AdmissionResponse::from(request);
    };

    let resource = match ResourceDocument::from_dynamic(kind, object) {
        Ok(doc) => doc,
        Err(e) => return deny_at(request, "spec", &e.to_string()),
    };
    let old_resource = match &request.old_object {
        Some(old) => match ResourceDocument::from_dynamic(kind, old) {
            Ok(doc) => Some(doc),
            Err(e) => return deny_at(request, "spec", &e.to_string()),
        },
        None => None,
    };

    let ctx = ValidationContext {
        resource: &resource,
        old_resource: old_resource.as_ref(),
        grants,
        dry_run: request.dry_run,
    };

    let result = validate_all(&ctx);
    if !result.allowed {
        let field_path = result
            .field_path
            .map(|p| p.to_string())
            .unwrap_or_else(|| "spec".to_string());
        let message = result
            .message
            .unwrap_or_else(|| "Validation failed".to_string());
        return deny_at(request, &field_path, &message);
    }

    AdmissionResponse::from(request)
}

fn review_grant(
    request: &AdmissionRequest<DynamicObject>,
    object: &DynamicObject,
) -> AdmissionResponse {
    let spec: KongReferenceGrantSpec = match object.data.get("spec") {
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(spec) => spec,
            Err(e) => return deny_at(request, "spec", &format!("failed to decode resource: {}", e)),
        },
        None => return deny_at(request, "spec", "spec is required"),
    };

    let result = validate_grant(&spec);
    if !result.allowed {
        let field_path = result
            .field_path
            .map(|p| p.to_string())
            .unwrap_or_else(|| "spec".to_string());
        let message = result
            .message
            .unwrap_or_else(|| "Validation failed".to_string());
        return deny_at(request, &field_path, &message);
    }

    AdmissionResponse::from(request)
}

/// Admission webhook handler for all validated kinds
async fn validate_handler(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> impl IntoResponse {
    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to extract admission request");
            return (
                StatusCode::BAD_REQUEST,
                Json(
                    AdmissionResponse::invalid(format!("Invalid AdmissionReview: {}", e))
                        .into_review(),
                ),
            );
        }
    };

    let started = Instant::now();
    let uid = request.uid.clone();
    let kind = request.kind.kind.clone();
    debug!(
        uid = %uid,
        kind = %kind,
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = ?request.name,
        "Processing admission request"
    );

    let grants = state.grant_snapshot();
    let response = review_request(&request, &grants);

    if let Some(health) = &state.health {
        health.metrics.record_admission(
            &kind,
            &format!("{:?}", request.operation),
            response.allowed,
            started.elapsed().as_secs_f64(),
        );
        health.mark_admission();
    }

    if response.allowed {
        info!(uid = %uid, kind = %kind, "Admission request allowed");
    } else {
        let message = response
            .result
            .message
            .clone();
        warn!(uid = %uid, kind = %kind, message = %message, "Admission request denied");
    }

    (StatusCode::OK, Json(response.into_review()))
}

/// Errors that can occur when running the webhook server
#[derive(Debug, Error)]
pub enum WebhookError {
    /// TLS configuration error
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    /// Server error
    #[error("Webhook server error: {0}")]
    Server(String),
}

/// Run the webhook server with TLS
///
/// Binds to 0.0.0.0:9443 and serves the /validate endpoint.
/// TLS certificates are loaded from the paths specified.
///
/// # Arguments
/// * `state` - Shared webhook state (grant cache + health)
/// * `cert_path` - Path to TLS certificate file (PEM format)
/// * `key_path` - Path to TLS private key file (PEM format)
pub async fn run_webhook_server(
    state: Arc<WebhookState>,
    cert_path: &str,
    key_path: &str,
) -> Result<(), WebhookError> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let app = create_webhook_router(state);

    let config = RustlsConfig::from_pem_file(PathBuf::from(cert_path), PathBuf::from(key_path))
        .await
        .map_err(|e| WebhookError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], WEBHOOK_PORT));
    info!(port = WEBHOOK_PORT, "Webhook server listening with TLS");

    axum_server::bind_rustls(addr, config)
        .serve(app.into_make_service())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()))?;

    Ok(())
}
