//! # Server Configuration
//!
//! This module contains the router setup and serve loop for the Auditions
//! API. Administrative routes sit behind the operator-auth middleware; the
//! claim and public view routes are open to unauthenticated callers.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth;
use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

/// Build an AppState for tests without going through the config loader.
pub fn create_test_app_state(config: AppConfig, db: DatabaseConnection) -> AppState {
    AppState {
        db,
        config: Arc::new(config),
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/windows", post(handlers::windows::create_window))
        .route(
            "/api/v1/windows/{window_id}",
            get(handlers::windows::get_window).delete(handlers::windows::delete_window),
        )
        .route(
            "/api/v1/slots/{slot_id}/status",
            patch(handlers::slots::set_status),
        )
        .route(
            "/api/v1/slots/{slot_id}/notes",
            put(handlers::slots::set_notes),
        )
        .route("/api/v1/tenants", post(handlers::tenants::create_tenant))
        .route(
            "/api/v1/tenants/{tenant_id}",
            get(handlers::tenants::get_tenant),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.config),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/public/v1/windows/{window_id}",
            get(handlers::windows::public_view),
        )
        .route(
            "/public/v1/slots/{slot_id}/claim",
            post(handlers::slots::claim_slot),
        )
        .merge(admin_routes)
        .layer(middleware::from_fn(telemetry::trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let profile = config.profile.clone();

    let state = AppState {
        db,
        config: Arc::new(config),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Auditions API listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::windows::create_window,
        crate::handlers::windows::get_window,
        crate::handlers::windows::delete_window,
        crate::handlers::windows::public_view,
        crate::handlers::slots::claim_slot,
        crate::handlers::slots::set_status,
        crate::handlers::slots::set_notes,
        crate::handlers::tenants::create_tenant,
        crate::handlers::tenants::get_tenant,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::SlotStatus,
            crate::handlers::types::SlotDto,
            crate::handlers::types::IdentitySummaryDto,
            crate::handlers::windows::CreateWindowRequestDto,
            crate::handlers::windows::AdminWindowDto,
            crate::handlers::windows::WindowSlotDto,
            crate::handlers::windows::PublicWindowDto,
            crate::handlers::windows::PublicSlotDto,
            crate::handlers::slots::ClaimSlotRequestDto,
            crate::handlers::slots::ClaimSlotResponseDto,
            crate::handlers::slots::SetStatusRequestDto,
            crate::handlers::slots::SetNotesRequestDto,
            crate::handlers::tenants::CreateTenantRequestDto,
            crate::handlers::tenants::TenantResponseDto,
        )
    ),
    info(
        title = "Callboard Auditions API",
        description = "Audition scheduling and slot reservation",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
