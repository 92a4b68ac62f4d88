//! konnect-operator - Admission webhooks for Kong Konnect configuration resources.
//!
//! This is the main entry point that:
//! - Initializes structured logging
//! - Creates the Kubernetes client
//! - Starts the reference grant reflector, health server, and webhook server

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use kube::Client;
use tokio::signal;
use tracing::{error, info};

use konnect_operator::health::{HealthState, run_health_server};
use konnect_operator::webhooks::WebhookState;
use konnect_operator::{
    WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, run_grant_reflector, run_webhook_server,
};

/// Grace period for in-flight admission reviews to complete during shutdown
const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("konnect_operator=info".parse()?)
                .add_directive("kube=info".parse()?),
        )
        .json()
        .init();

    info!("Starting konnect-operator");

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Webhooks cannot serve without TLS; fail fast rather than run a
    // control plane the API server cannot reach.
    if !Path::new(WEBHOOK_CERT_PATH).exists() || !Path::new(WEBHOOK_KEY_PATH).exists() {
        return Err(format!(
            "TLS certificates not found at {} / {}",
            WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH
        )
        .into());
    }

    // Create shared health state
    let health_state = Arc::new(HealthState::new());

    // Start health server immediately (probes should work before the cache syncs)
    let health_handle = {
        let health_state = health_state.clone();
        tokio::spawn(async move {
            if let Err(e) = run_health_server(health_state).await {
                error!("Health server error: {}", e);
            }
        })
    };

    // Sync the reference grant cache before admitting anything
    let grants = run_grant_reflector(client, Some(health_state.clone())).await;

    let webhook_state = Arc::new(WebhookState::new(grants, Some(health_state.clone())));
    let webhook_handle = {
        let webhook_state = webhook_state.clone();
        tokio::spawn(async move {
            if let Err(e) =
                run_webhook_server(webhook_state, WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH).await
            {
                error!("Webhook server error: {}", e);
            }
        })
    };

    health_state.set_ready(true).await;
    info!("Operator ready, serving admission reviews");

    // Wait for any task to complete (or fail), or shutdown signal
    tokio::select! {
        result = webhook_handle => {
            if let Err(e) = result {
                error!("Webhook server task panicked: {}", e);
            }
        }
        result = health_handle => {
            if let Err(e) = result {
                error!("Health server task panicked: {}", e);
            }
        }
        // Handle graceful shutdown on SIGTERM or SIGINT
        _ = shutdown_signal() => {
            info!("Received shutdown signal, initiating graceful shutdown...");

            // Mark as not ready to stop receiving new work
            health_state.set_ready(false).await;
            info!("Marked operator as not ready");

            // Give in-flight admission reviews time to complete
            info!(
                "Waiting {}s for in-flight admission reviews to complete...",
                SHUTDOWN_GRACE_PERIOD_SECS
            );
            tokio::time::sleep(Duration::from_secs(SHUTDOWN_GRACE_PERIOD_SECS)).await;

            info!("Grace period complete, shutting down");
        }
    }

    info!("Operator stopped");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
///
/// Note: Signal handler setup failures are fatal - the operator cannot shut down
/// gracefully without them. Using expect() here is intentional.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
