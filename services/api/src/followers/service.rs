use std::sync::Arc;

use followers_common::error::FollowersResult;
use followers_db::follows::models::{Follower, Person};
use followers_db::follows::repositories::FollowsRepository;

/// Application-level entry point for follow operations. Forwards to the
/// repository and leaves errors untouched.
#[derive(Clone)]
pub struct FollowersService {
    repo: Arc<dyn FollowsRepository>,
}

impl FollowersService {
    pub fn new(repo: Arc<dyn FollowsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_profile(&self, user_id: &str) -> FollowersResult<Person> {
        tracing::debug!(user_id, "get profile");
        self.repo.get_profile(user_id).await
    }

    pub async fn get_followers(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        tracing::debug!(user_id, "get followers");
        self.repo.get_followers(user_id).await
    }

    pub async fn get_following(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        tracing::debug!(user_id, "get following");
        self.repo.get_following(user_id).await
    }

    pub async fn get_recommended(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        tracing::debug!(user_id, "get recommended");
        self.repo.get_recommended(user_id).await
    }

    /// Whether `user_id` follows `following_user_id`.
    pub async fn is_following(&self, user_id: &str, following_user_id: &str) -> FollowersResult<bool> {
        self.repo.is_following(user_id, following_user_id).await
    }

    /// `follower` starts following `to_follow`.
    pub async fn follow(&self, to_follow: &str, follower: &str) -> FollowersResult<()> {
        tracing::debug!(to_follow, follower, "follow");
        self.repo.follow(to_follow, follower).await
    }

    /// `follower` stops following `to_unfollow`.
    pub async fn unfollow(&self, to_unfollow: &str, follower: &str) -> FollowersResult<()> {
        tracing::debug!(to_unfollow, follower, "unfollow");
        self.repo.unfollow(to_unfollow, follower).await
    }

    pub async fn check_store(&self) -> FollowersResult<()> {
        self.repo.verify_connectivity().await
    }
}
