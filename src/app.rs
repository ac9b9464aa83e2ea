use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, FilterConfig};
use crate::database::MeasurementStore;
use crate::handlers::{measurements, public};
use crate::middleware::api_key_middleware;

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MeasurementStore>,
    pub api_key: Arc<str>,
    pub filter: FilterConfig,
    pub enable_cors: bool,
    pub enable_request_logging: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn MeasurementStore>, config: &AppConfig) -> Self {
        Self {
            store,
            api_key: Arc::from(config.security.api_key.as_str()),
            filter: config.filter.clone(),
            enable_cors: config.security.enable_cors,
            enable_request_logging: config.api.enable_request_logging,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Gated
        .merge(measurement_routes(state.clone()));

    if state.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if state.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn measurement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/measurements", get(measurements::list).post(measurements::create))
        .route("/measurements/", get(measurements::list).post(measurements::create))
        .route(
            "/measurements/:id",
            get(measurements::get)
                .put(measurements::update)
                .delete(measurements::delete),
        )
        // Applied with `layer` rather than `route_layer` so unsupported
        // methods are gated too
        .layer(middleware::from_fn_with_state(state, api_key_middleware))
}
