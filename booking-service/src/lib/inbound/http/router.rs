use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::Request;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use axum::ServiceExt;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login;
use super::handlers::auth::me;
use super::handlers::auth::register;
use super::handlers::auth::update_profile;
use super::handlers::bookings::create_booking;
use super::handlers::bookings::delete_booking;
use super::handlers::bookings::get_booking;
use super::handlers::bookings::list_bookings;
use super::handlers::bookings::update_booking;
use super::handlers::logs::create_log;
use super::handlers::logs::list_logs;
use super::handlers::payments::create_payment;
use super::handlers::payments::delete_payment;
use super::handlers::payments::get_payment;
use super::handlers::payments::list_payments;
use super::handlers::payments::update_payment;
use super::handlers::ping::ping;
use super::handlers::spaces::create_space;
use super::handlers::spaces::delete_space;
use super::handlers::spaces::get_space;
use super::handlers::spaces::list_spaces;
use super::handlers::spaces::update_space;
use super::handlers::users::create_user;
use super::handlers::users::delete_user;
use super::handlers::users::get_user;
use super::handlers::users::list_users;
use super::handlers::users::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::config::RouteAccess;
use crate::domain::activity::ports::ActivityLogServicePort;
use crate::domain::booking::ports::BookingServicePort;
use crate::domain::payment::ports::PaymentServicePort;
use crate::domain::space::ports::SpaceServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub space_service: Arc<dyn SpaceServicePort>,
    pub booking_service: Arc<dyn BookingServicePort>,
    pub payment_service: Arc<dyn PaymentServicePort>,
    pub activity_service: Arc<dyn ActivityLogServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Settings for the HTTP surface that come from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub logs_access: RouteAccess,
    pub allowed_origins: Vec<String>,
}

pub fn create_router(state: AppState, options: &RouterOptions) -> Router {
    let public_routes = Router::new()
        .route("/api/ping", get(ping))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/update-profile", put(update_profile))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/spaces", get(list_spaces).post(create_space))
        .route(
            "/api/spaces/:id",
            get(get_space).put(update_space).delete(delete_space),
        )
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route(
            "/api/bookings/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/api/payments", get(list_payments).post(create_payment))
        .route(
            "/api/payments/:id",
            get(get_payment).put(update_payment).delete(delete_payment),
        );

    let log_routes = Router::new().route("/api/logs", get(list_logs).post(create_log));

    let (public_routes, protected_routes) = match options.logs_access {
        RouteAccess::Public => (public_routes.merge(log_routes), protected_routes),
        RouteAccess::Protected => (public_routes, protected_routes.merge(log_routes)),
    };

    let protected_routes = protected_routes.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer(&options.allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
}

/// Serve `router` on `listener`, accepting paths with a trailing slash.
///
/// Path normalisation must run before routing, so it wraps the router
/// instead of being added as a router layer.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await
}
