use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::follows::models::{Follower, Person};
use crate::follows::repositories::FollowsRepository;
use crate::follows::{follow_date, parse_edge, parse_user_id};
use followers_common::error::{FollowersError, FollowersResult};

#[derive(Debug, Default)]
struct GraphState {
    people: BTreeMap<i64, Person>,
    /// follower -> followee -> date the edge was created
    edges: BTreeMap<i64, BTreeMap<i64, String>>,
}

impl GraphState {
    fn project(&self, ids: impl IntoIterator<Item = i64>) -> Vec<Follower> {
        ids.into_iter()
            .filter_map(|id| self.people.get(&id))
            .map(Follower::from)
            .collect()
    }

    fn followees(&self, follower: i64) -> impl Iterator<Item = i64> + '_ {
        self.edges
            .get(&follower)
            .into_iter()
            .flat_map(|followees| followees.keys().copied())
    }
}

/// In-process `FollowsRepository` with the same semantics as the Cypher
/// statements in `Neo4jFollowsRepository`.
#[derive(Debug, Default)]
pub struct InMemoryFollowsRepository {
    state: RwLock<GraphState>,
}

impl InMemoryFollowsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `people`. Every person must validate.
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> FollowersResult<Self> {
        let mut state = GraphState::default();
        for person in people {
            person.validate()?;
            state.people.insert(person.user_id, person);
        }
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Insert or replace a person node.
    pub async fn insert_person(&self, person: Person) -> FollowersResult<()> {
        person.validate()?;
        self.state.write().await.people.insert(person.user_id, person);
        Ok(())
    }
}

#[async_trait]
impl FollowsRepository for InMemoryFollowsRepository {
    async fn get_profile(&self, user_id: &str) -> FollowersResult<Person> {
        let id = parse_user_id(user_id)?;
        self.state
            .read()
            .await
            .people
            .get(&id)
            .cloned()
            .ok_or_else(|| FollowersError::NotFound(format!("person not found: {id}")))
    }

    async fn get_followers(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        let id = parse_user_id(user_id)?;
        let state = self.state.read().await;
        let followers = state
            .edges
            .iter()
            .filter(|(_, followees)| followees.contains_key(&id))
            .map(|(follower, _)| *follower);
        Ok(state.project(followers))
    }

    async fn get_following(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        let id = parse_user_id(user_id)?;
        let state = self.state.read().await;
        Ok(state.project(state.followees(id)))
    }

    async fn get_recommended(&self, user_id: &str) -> FollowersResult<Vec<Follower>> {
        let id = parse_user_id(user_id)?;
        let state = self.state.read().await;
        let direct: BTreeSet<i64> = state.followees(id).collect();
        let recommended: BTreeSet<i64> = direct
            .iter()
            .flat_map(|&hop| state.followees(hop))
            .filter(|candidate| *candidate != id && !direct.contains(candidate))
            .collect();
        Ok(state.project(recommended))
    }

    async fn follow(&self, followee_id: &str, follower_id: &str) -> FollowersResult<()> {
        let (followee, follower) = parse_edge(followee_id, follower_id)?;
        let mut state = self.state.write().await;
        if !state.people.contains_key(&follower) || !state.people.contains_key(&followee) {
            return Err(FollowersError::NotFound(format!(
                "person not found: {follower} or {followee}"
            )));
        }
        state
            .edges
            .entry(follower)
            .or_default()
            .entry(followee)
            .or_insert_with(follow_date);
        tracing::info!(follower_id = follower, followee_id = followee, "relationship created");
        Ok(())
    }

    async fn unfollow(&self, followee_id: &str, follower_id: &str) -> FollowersResult<()> {
        let followee = parse_user_id(followee_id)?;
        let follower = parse_user_id(follower_id)?;
        let mut state = self.state.write().await;
        let removed = state
            .edges
            .get_mut(&follower)
            .and_then(|followees| followees.remove(&followee))
            .is_some();
        tracing::info!(follower_id = follower, followee_id = followee, removed, "relationship deleted");
        Ok(())
    }

    async fn is_following(&self, user_id: &str, other_id: &str) -> FollowersResult<bool> {
        let follower = parse_user_id(user_id)?;
        let followee = parse_user_id(other_id)?;
        Ok(self
            .state
            .read()
            .await
            .edges
            .get(&follower)
            .is_some_and(|followees| followees.contains_key(&followee)))
    }

    async fn verify_connectivity(&self) -> FollowersResult<()> {
        Ok(())
    }
}
