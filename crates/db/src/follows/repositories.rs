use async_trait::async_trait;

use crate::follows::models::{Follower, Person};
use followers_common::error::FollowersResult;

/// Access to the follow graph.
///
/// Identifiers arrive as raw strings and are parsed by the implementation, so
/// a malformed id surfaces as `FollowersError::Validation` before any store
/// round-trip.
#[async_trait]
pub trait FollowsRepository: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> FollowersResult<Person>;

    /// People with an edge pointing at `user_id`.
    async fn get_followers(&self, user_id: &str) -> FollowersResult<Vec<Follower>>;

    /// People `user_id` has an edge to.
    async fn get_following(&self, user_id: &str) -> FollowersResult<Vec<Follower>>;

    /// People two hops out from `user_id` who are neither `user_id` nor
    /// already followed by it.
    async fn get_recommended(&self, user_id: &str) -> FollowersResult<Vec<Follower>>;

    /// Record that `follower_id` follows `followee_id`. Idempotent.
    async fn follow(&self, followee_id: &str, follower_id: &str) -> FollowersResult<()>;

    /// Remove the edge `follower_id -> followee_id`; a missing edge is not an error.
    async fn unfollow(&self, followee_id: &str, follower_id: &str) -> FollowersResult<()>;

    /// Whether `user_id` follows `other_id`.
    async fn is_following(&self, user_id: &str, other_id: &str) -> FollowersResult<bool>;

    async fn verify_connectivity(&self) -> FollowersResult<()>;
}
