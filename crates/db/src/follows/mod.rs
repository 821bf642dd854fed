pub mod memory_repository;
pub mod models;
pub mod neo4j_repository;
pub mod repositories;

use followers_common::error::{FollowersError, FollowersResult};

/// Parse a path or request identifier into the store's numeric user id.
pub fn parse_user_id(raw: &str) -> FollowersResult<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FollowersError::Validation("user id is required".to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| FollowersError::Validation(format!("invalid user id: {raw}")))
}

/// Parse both ends of a follows-edge. Self-edges are rejected.
pub(crate) fn parse_edge(followee_id: &str, follower_id: &str) -> FollowersResult<(i64, i64)> {
    let followee = parse_user_id(followee_id)?;
    let follower = parse_user_id(follower_id)?;
    if followee == follower {
        return Err(FollowersError::Validation(format!(
            "user {follower} cannot follow themselves"
        )));
    }
    Ok((followee, follower))
}

/// Date stamped on a follows-edge when it is first created.
pub(crate) fn follow_date() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
