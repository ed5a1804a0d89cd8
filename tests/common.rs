// ABOUTME: Common setup for integration tests
// ABOUTME: In-memory database, server resources and token helpers

use std::sync::Arc;

use axum::Router;

use fittrackee_server::config::environment::ServerConfig;
use fittrackee_server::database::Database;
use fittrackee_server::models::User;
use fittrackee_server::routes::{self, ServerResources};

/// A router plus the resources behind it
pub struct TestApp {
    pub router: Router,
    pub resources: Arc<ServerResources>,
}

impl TestApp {
    /// Fresh app over an in-memory database
    pub async fn new() -> Self {
        let config = ServerConfig::for_tests();
        let database = Database::new(&config.database_url)
            .await
            .expect("Failed to create test database");
        let resources = Arc::new(ServerResources::new(database, config));
        let router = routes::router(resources.clone());
        Self { router, resources }
    }

    /// Issue a valid bearer token for a user
    pub fn token_for(&self, user: &User) -> String {
        self.resources
            .auth
            .generate_token(user)
            .expect("Failed to generate token")
    }
}
