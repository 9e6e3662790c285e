use axum::{routing::get, routing::post, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use shamiri_hub_api::database::manager::DatabaseManager;
use shamiri_hub_api::handlers::{protected, trigger};
use shamiri_hub_api::middleware::{jwt_auth_middleware, trigger_auth_middleware};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, secrets, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = shamiri_hub_api::config::config();
    tracing::info!("Starting Shamiri Hub API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("SHAMIRI_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Shamiri Hub API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Scheduler trigger surface (shared-secret bearer)
        .merge(trigger_routes())
        // Session-authenticated reads
        .merge(report_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn trigger_routes() -> Router {
    Router::new()
        .route("/api/payouts", post(trigger::payout::run_all))
        .route("/api/payouts/:implementer_id", post(trigger::payout::run_one))
        .route(
            "/api/repayments/:implementer_id",
            post(trigger::repayment::run_one),
        )
        .layer(axum::middleware::from_fn(trigger_auth_middleware))
}

fn report_routes() -> Router {
    Router::new()
        .route("/api/auth/whoami", get(protected::whoami::whoami))
        .route("/api/reports/payouts", get(protected::reports::payout_report))
        .layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Shamiri Hub API",
            "version": version,
            "description": "Attendance-driven fellow payout aggregation for the Shamiri program",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "payouts": "POST /api/payouts[?day=M|R], POST /api/payouts/:implementer_id?day=M|R (trigger secret)",
                "repayments": "POST /api/repayments/:implementer_id (trigger secret)",
                "reports": "GET /api/reports/payouts?day=M|R (session auth)",
                "auth": "GET /api/auth/whoami (session auth)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
