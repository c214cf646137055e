//! HTTP exporter for pipeline metrics and frame status.
//!
//! Routes:
//! - `/metrics`: Prometheus text format
//! - `/health`: 200 once at least one frame has been drawn, 503 before
//! - `/status`: plain-text summary of the latest frame

use crate::metrics::{MetricsRegistry, MetricsSnapshot};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::fmt::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

/// Errors raised while serving metrics.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen socket could not be bound.
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),
    /// The server stopped with an error.
    #[error("server error: {0}")]
    Server(String),
}

/// Where the exporter listens.
#[derive(Debug, Clone)]
pub struct MetricsServerConfig {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
}

impl Default for MetricsServerConfig {
    fn default() -> Self {
        Self::with_port(9090)
    }
}

impl MetricsServerConfig {
    /// Listens on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
        }
    }
}

/// Registry plus the latest pipeline snapshot, shared with the frame loop.
pub struct MetricsState {
    registry: MetricsRegistry,
    latest: MetricsSnapshot,
}

impl MetricsState {
    /// Publishes a new pipeline snapshot.
    pub fn update(&mut self, snapshot: &MetricsSnapshot) {
        self.registry.update(snapshot);
        self.latest = snapshot.clone();
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> &MetricsSnapshot {
        &self.latest
    }

    fn health(&self) -> (StatusCode, &'static str) {
        if self.latest.frames == 0 {
            (StatusCode::SERVICE_UNAVAILABLE, "waiting for first frame")
        } else {
            (StatusCode::OK, "OK")
        }
    }

    fn status(&self) -> String {
        let s = &self.latest;
        let mut out = String::new();
        let _ = writeln!(out, "frames {}", s.frames);
        let _ = writeln!(
            out,
            "last_frame redrew {} of {} cells",
            s.last_frame_emitted, s.last_frame_cells
        );
        let _ = writeln!(out, "cells_emitted {}", s.cells_emitted);
        let _ = writeln!(out, "cells_suppressed {}", s.cells_suppressed);
        let _ = writeln!(out, "memory_resets {}", s.memory_resets);
        out
    }
}

/// HTTP exporter for the frame loop's metrics.
pub struct MetricsServer {
    config: MetricsServerConfig,
    state: Arc<RwLock<MetricsState>>,
}

impl MetricsServer {
    /// Creates a server around `registry`; nothing is bound until [`run`](Self::run).
    pub fn new(config: MetricsServerConfig, registry: MetricsRegistry) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(MetricsState {
                registry,
                latest: MetricsSnapshot::default(),
            })),
        }
    }

    /// Shared state handle. The frame loop is synchronous, so it publishes
    /// through `blocking_write` from outside the runtime.
    pub fn state(&self) -> Arc<RwLock<MetricsState>> {
        Arc::clone(&self.state)
    }

    /// Serves until the runtime shuts down.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .route("/status", get(status_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Metrics server listening");

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(e.to_string()))
    }
}

async fn metrics_handler(State(state): State<Arc<RwLock<MetricsState>>>) -> impl IntoResponse {
    let state = state.read().await;

    match state.registry.encode() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

async fn health_handler(State(state): State<Arc<RwLock<MetricsState>>>) -> impl IntoResponse {
    state.read().await.health()
}

async fn status_handler(State(state): State<Arc<RwLock<MetricsState>>>) -> impl IntoResponse {
    state.read().await.status()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FrameStats, PipelineTotals};

    fn server() -> MetricsServer {
        MetricsServer::new(MetricsServerConfig::default(), MetricsRegistry::new().unwrap())
    }

    #[test]
    fn test_config_ports() {
        assert_eq!(MetricsServerConfig::default().bind_addr.port(), 9090);
        assert_eq!(MetricsServerConfig::with_port(8080).bind_addr.port(), 8080);
    }

    #[test]
    fn test_unhealthy_until_first_frame() {
        let state = server().state();
        assert_eq!(state.blocking_read().health().0, StatusCode::SERVICE_UNAVAILABLE);

        let totals = PipelineTotals {
            frames: 1,
            cells_emitted: 64,
            ..Default::default()
        };
        let last = FrameStats {
            sequence: 1,
            cells: 64,
            emitted: 64,
            ..Default::default()
        };
        state
            .blocking_write()
            .update(&MetricsSnapshot::from_pipeline(totals, &last));

        assert_eq!(state.blocking_read().health().0, StatusCode::OK);
    }

    #[test]
    fn test_status_reports_latest_frame() {
        let state = server().state();
        state.blocking_write().update(&MetricsSnapshot {
            frames: 7,
            cells_emitted: 100,
            cells_suppressed: 348,
            memory_resets: 1,
            last_frame_cells: 64,
            last_frame_emitted: 3,
        });

        let guard = state.blocking_read();
        let status = guard.status();
        assert!(status.contains("frames 7"));
        assert!(status.contains("last_frame redrew 3 of 64 cells"));
        assert!(status.contains("memory_resets 1"));
        assert_eq!(guard.latest().cells_suppressed, 348);
        assert!(guard
            .registry
            .encode()
            .unwrap()
            .contains("live_mosaic_frames_total 7"));
    }
}
