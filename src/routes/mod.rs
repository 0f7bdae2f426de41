//! HTTP surface: RPC routes plus operational endpoints.

mod common;
mod rpc;

pub use common::common_routes;
pub use rpc::{rpc_routes, MAX_BODY_BYTES};

use crate::state::AppState;
use axum::Router;

/// The full application router.
pub fn app(state: AppState) -> Router {
    rpc_routes(state).merge(common_routes())
}
