use crate::server::ServerRouter;
use axum::Router;

mod feed;
mod posts;
mod users;

pub fn routes() -> ServerRouter {
    Router::new()
        .merge(users::routes())
        .merge(posts::routes())
        .merge(feed::routes())
}
