//! Mindbody Web Server
//!
//! Axum-based REST API serving stored wellness records and the insights
//! computed from them.
//!
//! Security features:
//! - API key / trusted network authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Security response headers
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use mindbody_core::db::Database;
use mindbody_core::InsightEngine;

mod handlers;

/// Maximum number of records a list endpoint returns
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    pub api_keys: Vec<String>,
    /// Trusted networks that bypass authentication (e.g., "192.168.1.0/24", "10.0.0.5")
    pub trusted_networks: Vec<ipnet::IpNet>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
            trusted_networks: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub engine: InsightEngine,
    pub config: ServerConfig,
}

/// Authentication middleware - validates API keys or trusted networks
///
/// # Security Notes
///
/// **Trusted networks**: Requests from IPs in `trusted_networks` bypass authentication.
/// The client IP is taken from the TCP peer address only; forwarding headers are ignored.
///
/// **API keys**: Compared using constant-time comparison to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    connect_info: Option<axum::extract::ConnectInfo<std::net::SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    if !state.config.trusted_networks.is_empty() {
        let peer_ip = connect_info.as_ref().map(|ci| ci.0.ip());
        debug!(?peer_ip, path = %request.uri().path(), "Checking trusted network auth");

        if let Some(ip) = peer_ip {
            if is_ip_trusted(&ip, &state.config.trusted_networks) {
                info!(ip = %ip, path = %request.uri().path(), "Authenticated via trusted network");
                return next.run(request).await;
            }
        }
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        info!(user = "api-key", path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys using constant-time comparison
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

/// Check if an IP address is within any of the trusted networks
fn is_ip_trusted(ip: &std::net::IpAddr, trusted_networks: &[ipnet::IpNet]) -> bool {
    trusted_networks.iter().any(|network| network.contains(ip))
}

/// Parse a comma-separated list of IP addresses and CIDR networks
///
/// Examples:
/// - "192.168.1.0/24" - entire subnet
/// - "10.0.0.5" - single IP (parsed as /32 for IPv4 or /128 for IPv6)
/// - "192.168.1.0/24,10.0.0.0/8" - multiple networks
pub fn parse_trusted_networks(input: &str) -> Vec<ipnet::IpNet> {
    input
        .split(',')
        .filter_map(|s| {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(net) = s.parse::<ipnet::IpNet>() {
                return Some(net);
            }
            if let Ok(ip) = s.parse::<std::net::IpAddr>() {
                return Some(ipnet::IpNet::from(ip));
            }
            warn!(input = s, "Failed to parse trusted network entry");
            None
        })
        .collect()
}

/// Split a comma-separated environment value into trimmed, non-empty items
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    create_router_with_engine(db, InsightEngine::new(), config)
}

/// Create the application router with a specific insight engine (for testing)
pub fn create_router_with_engine(
    db: Database,
    engine: InsightEngine,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState {
        db,
        engine,
        config: config.clone(),
    });

    let api_routes = Router::new()
        .route("/metrics", get(handlers::list_metrics))
        .route("/sleep", get(handlers::list_sleep))
        .route("/journal", get(handlers::list_journal))
        .route("/insights", get(handlers::get_insights))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        // Liveness stays reachable without credentials
        .route("/health", get(handlers::health));

    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() && config.trusted_networks.is_empty() {
        warn!("⚠️  No API keys or trusted networks configured - every API request will be rejected");
    }

    let counts = db.record_counts()?;
    info!(
        metrics = counts.metrics,
        sleep = counts.sleep,
        journal = counts.journal,
        "Database ready"
    );

    let app = create_router(db, config)
        .into_make_service_with_connect_info::<std::net::SocketAddr>();
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    /// JSON key the message is reported under
    field: &'static str,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            field: "error",
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Not-found responses carry a `message` rather than an `error`
    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            field: "message",
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            self.field: self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            field: "error",
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
