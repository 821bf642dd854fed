pub mod follows;

use followers_common::error::{FollowersError, FollowersResult};
use followers_config::AppConfig;
use neo4rs::{ConfigBuilder, Graph};

/// Open a Neo4j driver from the store settings in `config`.
///
/// The driver keeps its own connection pool; callers clone the returned
/// `Graph` freely.
pub async fn connect_graph(config: &AppConfig) -> FollowersResult<Graph> {
    tracing::info!(uri = %config.neo4j_uri, database = %config.neo4j_database, "connecting to graph store");
    let driver_config = ConfigBuilder::default()
        .uri(config.neo4j_uri.as_str())
        .user(config.neo4j_username.as_str())
        .password(config.neo4j_password.as_str())
        .db(config.neo4j_database.as_str())
        .build()
        .map_err(|e| FollowersError::Config(e.to_string()))?;

    Graph::connect(driver_config)
        .await
        .map_err(FollowersError::database)
}
