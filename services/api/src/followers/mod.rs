pub mod handlers;
pub mod responses;
pub mod service;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

// Path parameters share names across routes so that the router can tell
// `/followers/{user_id}/profile` from `/followers/{user_id}/{other_id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/followers/{user_id}/profile", get(handlers::get_profile))
        .route("/followers/{user_id}/followers", get(handlers::get_followers))
        .route("/followers/{user_id}/following", get(handlers::get_following))
        .route("/followers/{user_id}/recommended", get(handlers::get_recommended))
        .route(
            "/followers/{user_id}/{other_id}/isFollowing",
            get(handlers::is_following),
        )
        .route(
            "/followers/{user_id}/{other_id}",
            post(handlers::follow).delete(handlers::unfollow),
        )
}
