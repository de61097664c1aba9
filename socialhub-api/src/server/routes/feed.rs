use crate::server::{ServerError, ServerRouter};
use axum::extract::State;
use axum_extra::{
    TypedHeader,
    routing::{RouterExt, TypedPath},
};
use headers::ContentType;
use serde::Deserialize;
use socialhub_feed::feed::Feed;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(get_feed)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/feed", rejection(ServerError))]
struct GetFeedPath();

async fn get_feed(
    GetFeedPath(): GetFeedPath,
    State(feed): State<Arc<Mutex<Feed>>>,
) -> (TypedHeader<ContentType>, String) {
    let rendered = feed.lock().await.render_feed();

    (TypedHeader(ContentType::text_utf8()), rendered)
}
