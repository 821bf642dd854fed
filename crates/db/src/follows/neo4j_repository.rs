use async_trait::async_trait;
use neo4rs::{query, Graph, Query, Row};

use crate::follows::models::{Follower, Person};
use crate::follows::repositories::FollowsRepository;
use crate::follows::{follow_date, parse_edge, parse_user_id};
use followers_common::error::{FollowersError, FollowersResult};

const GET_PROFILE: &str = "\
    MATCH (p:Person {userId: $userId}) \
    RETURN p.id AS id, p.userId AS userId, p.name AS name, p.surname AS surname, \
           p.picture AS picture, p.bio AS bio, p.quote AS quote, p.email AS email \
    LIMIT 1";

const GET_FOLLOWERS: &str = "\
    MATCH (f:Person)-[:IS_FOLLOWING]->(:Person {userId: $userId}) \
    RETURN f.userId AS userId, f.name AS name, f.surname AS surname, \
           f.quote AS quote, f.email AS email \
    ORDER BY userId";

const GET_FOLLOWING: &str = "\
    MATCH (:Person {userId: $userId})-[:IS_FOLLOWING]->(p:Person) \
    RETURN p.userId AS userId, p.name AS name, p.surname AS surname, \
           p.quote AS quote, p.email AS email \
    ORDER BY userId";

const GET_RECOMMENDED: &str = "\
    MATCH (user:Person {userId: $userId})-[:IS_FOLLOWING]->(:Person)-[:IS_FOLLOWING]->(f:Person) \
    WHERE f <> user AND NOT (user)-[:IS_FOLLOWING]->(f) \
    RETURN DISTINCT f.userId AS userId, f.name AS name, f.surname AS surname, \
           f.quote AS quote, f.email AS email \
    ORDER BY userId";

const FOLLOW: &str = "\
    MATCH (p:Person {userId: $followerId}), (p1:Person {userId: $toFollowId}) \
    MERGE (p)-[r:IS_FOLLOWING]->(p1) \
    ON CREATE SET r.since = $date \
    RETURN r.since AS since";

const UNFOLLOW: &str = "\
    MATCH (:Person {userId: $followerId})-[r:IS_FOLLOWING]->(:Person {userId: $toUnFollowId}) \
    DELETE r \
    RETURN count(*) AS removed";

const IS_FOLLOWING: &str = "\
    OPTIONAL MATCH (:Person {userId: $userId})-[r:IS_FOLLOWING]->(:Person {userId: $followingUserId}) \
    RETURN r IS NOT NULL AS following \
    LIMIT 1";

/// `FollowsRepository` backed by a Neo4j database.
///
/// Each call runs a single auto-commit statement on a connection borrowed
/// from the driver's pool.
#[derive(Clone)]
pub struct Neo4jFollowsRepository {
    graph: Graph,
}

impl Neo4jFollowsRepository {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn string_column(row: &Row, key: &str) -> FollowersResult<String> {
        row.get::<Option<String>>(key)
            .map(Option::unwrap_or_default)
            .map_err(|e| FollowersError::Internal(format!("unexpected value for {key}: {e}")))
    }

    fn int_column(row: &Row, key: &str) -> FollowersResult<i64> {
        row.get::<Option<i64>>(key)
            .map(Option::unwrap_or_default)
            .map_err(|e| FollowersError::Internal(format!("unexpected value for {key}: {e}")))
    }

    fn map_person_row(row: &Row) -> FollowersResult<Person> {
        Ok(Person {
            id: Self::int_column(row, "id")?,
            user_id: Self::int_column(row, "userId")?,
            name: Self::string_column(row, "name")?,
            surname: Self::string_column(row, "surname")?,
            picture: Self::string_column(row, "picture")?,
            bio: Self::string_column(row, "bio")?,
            quote: Self::string_column(row, "quote")?,
            email: Self::string_column(row, "email")?,
        })
    }

    fn map_follower_row(row: &Row) -> FollowersResult<Follower> {
        Ok(Follower {
            user_id: Self::int_column(row, "userId")?,
            name: Self::string_column(row, "name")?,
            surname: Self::string_column(row, "surname")?,
            quote: Self::string_column(row, "quote")?,
            email: Self::string_column(row, "email")?,
        })
    }

    /// Run `q` and return its first row, if any.
    async fn fetch_optional(&self, q: Query) -> FollowersResult<Option<Row>> {
        let mut stream = self
            .graph
            .execute(q)
            .await
            .map_err(FollowersError::database)?;

        stream
            .next()
            .await
            .map_err(FollowersError::database)
    }

    async fn fetch_followers(&self, statement: &str, user_id: i64) -> FollowersResult<Vec<Follower>> {
        let mut stream = self
            .graph
            .execute(query(statement).param("userId", user_id))
            .await
            .map_err(FollowersError::database)?;

        let mut followers = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(FollowersError::database)?
        {
            followers.push(Self::map_follower_row(&row)?);
        }
        Ok(followers)
    }
}

#[async_trait]
impl FollowsRepository for Neo4jFollowsRepository {
    async fn get_profile(&self, user_id: &str) -> FollowersResult<Person> {
        let id = parse_user_id(user_id)?;
        let row = self
            .fetch_optional(query(GET_PROFILE).param("userId", id))
            .await
            .inspect_err(|e| tracing::error!(user_id = id, error = %e, "error querying person"))?;

        match row {
            Some(row) => Self::map_person_row(&row),
            None => Err(FollowersError::NotFound(format!("person not found: {id}"))),
        }
    }

    async fn get_followers(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        let id = parse_user_id(user_id)?;
        self.fetch_followers(GET_FOLLOWERS, id)
            .await
            .inspect_err(|e| tracing::error!(user_id = id, error = %e, "error querying followers"))
    }

    async fn get_following(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        let id = parse_user_id(user_id)?;
        self.fetch_followers(GET_FOLLOWING, id)
            .await
            .inspect_err(|e| tracing::error!(user_id = id, error = %e, "error querying following"))
    }

    async fn get_recommended(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        let id = parse_user_id(user_id)?;
        self.fetch_followers(GET_RECOMMENDED, id)
            .await
            .inspect_err(|e| {
                tracing::error!(user_id = id, error = %e, "error querying recommendations")
            })
    }

    async fn follow(&self, followee_id: &str, follower_id: &str) -> FollowersResult<()> {
        let (followee, follower) = parse_edge(followee_id, follower_id)?;
        let q = query(FOLLOW)
            .param("followerId", follower)
            .param("toFollowId", followee)
            .param("date", follow_date());

        let row = self.fetch_optional(q).await.inspect_err(|e| {
            tracing::error!(follower_id = follower, followee_id = followee, error = %e, "error inserting relationship")
        })?;

        if row.is_none() {
            return Err(FollowersError::NotFound(format!(
                "person not found: {follower} or {followee}"
            )));
        }

        tracing::info!(follower_id = follower, followee_id = followee, "relationship created");
        Ok(())
    }

    async fn unfollow(&self, followee_id: &str, follower_id: &str) -> FollowersResult<()> {
        let followee = parse_user_id(followee_id)?;
        let follower = parse_user_id(follower_id)?;
        let q = query(UNFOLLOW)
            .param("followerId", follower)
            .param("toUnFollowId", followee);

        let row = self.fetch_optional(q).await.inspect_err(|e| {
            tracing::error!(follower_id = follower, followee_id = followee, error = %e, "error unfollowing")
        })?;

        let removed = match row {
            Some(row) => Self::int_column(&row, "removed")?,
            None => 0,
        };
        tracing::info!(follower_id = follower, followee_id = followee, removed, "relationship deleted");
        Ok(())
    }

    async fn is_following(&self, user_id: &str, other_id: &str) -> FollowersResult<bool> {
        let follower = parse_user_id(user_id)?;
        let followee = parse_user_id(other_id)?;
        let q = query(IS_FOLLOWING)
            .param("userId", follower)
            .param("followingUserId", followee);

        let row = self.fetch_optional(q).await.inspect_err(|e| {
            tracing::error!(follower_id = follower, followee_id = followee, error = %e, "error querying relationship")
        })?;

        match row {
            Some(row) => row
                .get::<bool>("following")
                .map_err(|e| FollowersError::Internal(format!("unexpected value for following: {e}"))),
            None => Ok(false),
        }
    }

    async fn verify_connectivity(&self) -> FollowersResult<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(FollowersError::database)
    }
}
