use crate::server::{Result, ServerError, ServerRouter, json::Json};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use socialhub_common::model::{post::MessageContent, user::Username};
use socialhub_feed::feed::Feed;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(create_post)
        .typed_post(add_comment)
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct CreateMessage {
    content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
struct MessageResponse {
    author: Username,
    content: MessageContent,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/create", rejection(ServerError))]
struct CreatePostPath();

async fn create_post(
    CreatePostPath(): CreatePostPath,
    State(feed): State<Arc<Mutex<Feed>>>,
    Json(message): Json<CreateMessage>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let mut feed = feed.lock().await;
    let post = feed.create_post(message.content)?;

    let response = MessageResponse {
        author: post.author.username.clone(),
        content: post.content.clone(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/comments/create", rejection(ServerError))]
struct AddCommentPath();

/// Comments always land on the most recent post; there is no way to pick
/// another target.
async fn add_comment(
    AddCommentPath(): AddCommentPath,
    State(feed): State<Arc<Mutex<Feed>>>,
    Json(message): Json<CreateMessage>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let mut feed = feed.lock().await;
    let comment = feed.add_comment(message.content)?;

    let response = MessageResponse {
        author: comment.author.username.clone(),
        content: comment.content.clone(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}
