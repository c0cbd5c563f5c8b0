use chrono::Duration;
use tubely_api::auth::make_jwt;
use uuid::Uuid;

/// Signing secret shared with `create_test_config`.
pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";

/// Test user with a valid bearer token.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn new() -> Self {
        let user_id = Uuid::new_v4();
        let token = make_jwt(user_id, TEST_JWT_SECRET, Duration::hours(1))
            .expect("Failed to sign test token");
        Self { user_id, token }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Token for `user_id` that expired a minute ago.
pub fn expired_token(user_id: Uuid) -> String {
    make_jwt(user_id, TEST_JWT_SECRET, Duration::minutes(-1)).expect("Failed to sign test token")
}

/// Token signed with a secret the server does not know.
pub fn foreign_token(user_id: Uuid) -> String {
    make_jwt(
        user_id,
        "some-other-secret-that-is-also-32-chars-long",
        Duration::hours(1),
    )
    .expect("Failed to sign test token")
}
