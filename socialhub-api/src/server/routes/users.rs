use crate::server::{Result, ServerError, ServerRouter, json::Json};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use socialhub_common::model::user::Username;
use socialhub_feed::feed::Feed;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_post(register).typed_post(login)
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
struct UserResponse {
    username: Username,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/register", rejection(ServerError))]
struct RegisterPath();

async fn register(
    RegisterPath(): RegisterPath,
    State(feed): State<Arc<Mutex<Feed>>>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = feed
        .lock()
        .await
        .register(credentials.username, credentials.password)?;

    let response = UserResponse {
        username: user.username.clone(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/login", rejection(ServerError))]
struct LoginPath();

async fn login(
    LoginPath(): LoginPath,
    State(feed): State<Arc<Mutex<Feed>>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<UserResponse>> {
    let user = feed
        .lock()
        .await
        .login(&credentials.username, &credentials.password)?;

    let response = UserResponse {
        username: user.username.clone(),
    };
    Ok(Json(response))
}
