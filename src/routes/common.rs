//! Operational routes: liveness and build version.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct LivenessBody {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
}

/// Process is up. Storage reachability is reported by `health.v1.Health/Check`.
async fn liveness() -> Json<LivenessBody> {
    Json(LivenessBody { status: "ok" })
}

async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/version", get(version))
}
