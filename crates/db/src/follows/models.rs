use followers_common::error::{FollowersError, FollowersResult};
use serde::{Deserialize, Serialize};

/// A user profile node as stored in the graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub quote: String,
    pub email: String,
}

impl Person {
    pub fn validate(&self) -> FollowersResult<()> {
        if self.name.is_empty() {
            return Err(FollowersError::Validation("invalid name".to_string()));
        }
        if self.surname.is_empty() {
            return Err(FollowersError::Validation("invalid surname".to_string()));
        }
        if self.email.is_empty() {
            return Err(FollowersError::Validation("invalid email".to_string()));
        }
        Ok(())
    }
}

/// The slice of a person returned in follower, following and recommendation lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Follower {
    pub user_id: i64,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub quote: String,
    pub email: String,
}

impl From<&Person> for Follower {
    fn from(person: &Person) -> Self {
        Self {
            user_id: person.user_id,
            name: person.name.clone(),
            surname: person.surname.clone(),
            quote: person.quote.clone(),
            email: person.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowerList {
    pub followers: Vec<Follower>,
    pub count: usize,
}

impl From<Vec<Follower>> for FollowerList {
    fn from(followers: Vec<Follower>) -> Self {
        let count = followers.len();
        Self { followers, count }
    }
}
