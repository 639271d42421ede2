use tubely_api::auth::issue_access_token;
use uuid::Uuid;

/// HS256 secret shared by the test server and the tokens minted here.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

pub fn token_for(user_id: Uuid) -> String {
    issue_access_token(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1))
        .expect("Failed to issue test token")
}

pub fn bearer(user_id: Uuid) -> String {
    format!("Bearer {}", token_for(user_id))
}
