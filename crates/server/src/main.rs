use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{User, UserId},
    error::{ApiError, ErrorCode},
    protocol::{healthz_route, users_route, UserPayload},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::{load_settings, parse_bind_addr};

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let api = if settings.seed_demo_users {
        ApiContext::with_users(api::demo_users())
    } else {
        ApiContext::new()
    };
    let app = build_router(Arc::new(AppState { api }));

    let addr = parse_bind_addr(&settings.server_bind)?;
    info!(%addr, seeded = settings.seed_demo_users, "users server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let item_route = format!("{}/:user_id", users_route());
    Router::new()
        .route(healthz_route(), get(healthz))
        .route(users_route(), get(http_list_users).post(http_create_user))
        .route(
            &item_route,
            get(http_get_user)
                .put(http_update_user)
                .delete(http_delete_user),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(api::list_users(&state.api).await)
}

async fn http_get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<User>> {
    api::get_user(&state.api, UserId(user_id))
        .await
        .map(Json)
        .map_err(into_response_error)
}

async fn http_create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = api::create_user(&state.api, payload)
        .await
        .map_err(into_response_error)?;
    info!(user_id = user.id.0, "created user");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn http_update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<User>> {
    let user = api::update_user(&state.api, UserId(user_id), payload)
        .await
        .map_err(into_response_error)?;
    info!(user_id, "updated user");
    Ok(Json(user))
}

async fn http_delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    api::delete_user(&state.api, UserId(user_id))
        .await
        .map_err(into_response_error)?;
    info!(user_id, "deleted user");
    Ok(Json(serde_json::json!({})))
}

fn into_response_error(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    };
    warn!(%status, "{}", err.message);
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
