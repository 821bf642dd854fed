use axum::extract::{Path, State};
use axum::Json;
use followers_db::follows::models::{FollowerList, Person};

use crate::error::ApiError;
use crate::followers::responses::{IsFollowingResponse, StatusResponse};
use crate::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    let person = state.followers.get_profile(&user_id).await?;
    Ok(Json(person))
}

pub async fn get_followers(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<FollowerList>, ApiError> {
    let followers = state.followers.get_followers(&user_id).await?;
    Ok(Json(followers.into()))
}

pub async fn get_following(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<FollowerList>, ApiError> {
    let following = state.followers.get_following(&user_id).await?;
    Ok(Json(following.into()))
}

pub async fn get_recommended(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<FollowerList>, ApiError> {
    let recommended = state.followers.get_recommended(&user_id).await?;
    Ok(Json(recommended.into()))
}

pub async fn is_following(
    State(state): State<AppState>,
    Path((user_id, following_user_id)): Path<(String, String)>,
) -> Result<Json<IsFollowingResponse>, ApiError> {
    let following = state
        .followers
        .is_following(&user_id, &following_user_id)
        .await?;
    Ok(Json(IsFollowingResponse {
        following,
        message: format!("Following status: {following}"),
    }))
}

/// `POST /followers/{toFollow}/{follower}`
pub async fn follow(
    State(state): State<AppState>,
    Path((to_follow, follower)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.followers.follow(&to_follow, &follower).await?;
    Ok(Json(StatusResponse::ok("Following successful")))
}

/// `DELETE /followers/{toUnFollow}/{follower}`
pub async fn unfollow(
    State(state): State<AppState>,
    Path((to_unfollow, follower)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.followers.unfollow(&to_unfollow, &follower).await?;
    Ok(Json(StatusResponse::ok("Unfollowing successful")))
}
