//! konnect-operator library crate
//!
//! This module exports the CRD definitions, admission webhook server, and
//! the reference grant cache plumbing.

pub mod crd;
pub mod health;
pub mod webhooks;

pub use health::HealthState;
pub use webhooks::{
    WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, WebhookState,
    run_webhook_server,
};

use std::sync::Arc;

use futures::{Stream, StreamExt};
use kube::runtime::watcher::Config as WatcherConfig;
use kube::runtime::{WatchStreamExt, predicates, reflector, watcher};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crd::KongReferenceGrant;

/// Create namespaced or cluster-wide API based on scope
pub fn scoped_api<T>(client: Client, namespace: Option<&str>) -> Api<T>
where
    T: Resource<Scope = k8s_openapi::NamespaceResourceScope>,
    <T as Resource>::DynamicType: Default,
    T: Clone + DeserializeOwned + std::fmt::Debug,
{
    match namespace {
        Some(ns) => Api::namespaced(client, ns),
        None => Api::all(client),
    }
}

/// Create the default watcher configuration.
///
/// - `any_semantic()`: More reliable resource discovery in test environments
fn default_watcher_config() -> WatcherConfig {
    WatcherConfig::default().any_semantic()
}

/// Create a filtered stream for a resource type with standard optimizations.
///
/// This creates a reflector-backed stream that:
/// - Maintains an in-memory cache via reflector
/// - Uses automatic retry with exponential backoff on errors
/// - Converts watch events to objects (Added/Modified only)
/// - Filters out status-only updates via generation predicate
///
/// Returns the reflector store (for cache lookups) and the filtered stream.
fn create_filtered_stream<K>(
    api: Api<K>,
    watcher_config: WatcherConfig,
) -> (
    reflector::Store<K>,
    impl Stream<Item = Result<K, watcher::Error>>,
)
where
    K: Resource + Clone + DeserializeOwned + std::fmt::Debug + Send + 'static,
    K::DynamicType: Default + Eq + std::hash::Hash + Clone,
{
    let (reader, writer) = reflector::store();
    let stream = reflector(writer, watcher(api, watcher_config))
        .default_backoff()
        .applied_objects()
        .predicate_filter(predicates::generation);
    (reader, stream)
}

/// Run the reference grant reflector (cluster-wide).
///
/// Starts a background watch on KongReferenceGrant resources and returns the
/// store that backs each admission call's grant snapshot. Waits for the
/// initial list to land before returning so the webhook never decides against
/// an empty cache on startup.
pub async fn run_grant_reflector(
    client: Client,
    health_state: Option<Arc<HealthState>>,
) -> reflector::Store<KongReferenceGrant> {
    run_grant_reflector_scoped(client, health_state, None).await
}

/// Run the reference grant reflector with optional namespace scoping.
///
/// When `namespace` is `Some(ns)`, only watches grants in that namespace.
/// Use the scoped version for integration tests to enable parallel test
/// execution.
pub async fn run_grant_reflector_scoped(
    client: Client,
    health_state: Option<Arc<HealthState>>,
    namespace: Option<&str>,
) -> reflector::Store<KongReferenceGrant> {
    let scope_msg = namespace.unwrap_or("cluster-wide");
    info!("Starting KongReferenceGrant reflector (scope: {})", scope_msg);

    let grants: Api<KongReferenceGrant> = scoped_api(client, namespace);
    let (reader, stream) = create_filtered_stream(grants, default_watcher_config());

    let store = reader.clone();
    tokio::spawn(async move {
        stream
            .for_each(|result| {
                let reader = reader.clone();
                let health_state = health_state.clone();
                async move {
                    match result {
                        Ok(grant) => {
                            debug!(
                                name = %grant.metadata.name.as_deref().unwrap_or_default(),
                                namespace = %grant.metadata.namespace.as_deref().unwrap_or_default(),
                                "Reference grant cached"
                            );
                        }
                        Err(e) => {
                            warn!(error = %e, "Reference grant watch error, retrying");
                        }
                    }
                    if let Some(state) = &health_state {
                        let count = i64::try_from(reader.state().len()).unwrap_or(i64::MAX);
                        state.metrics.set_reference_grants(count);
                    }
                }
            })
            .await;
        // This should never complete in normal operation
        warn!("Reference grant watch stream ended unexpectedly");
    });

    store.wait_until_ready().await.ok();
    info!(grants = store.state().len(), "Reference grant cache synced");
    store
}
