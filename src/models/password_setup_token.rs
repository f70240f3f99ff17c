use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-use credential for the emailed password setup link.
/// State machine: issued -> (used | expired). Expired rows stay in storage
/// as an audit trail.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PasswordSetupToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PasswordSetupToken {
    /// Valid iff never used and still inside the expiry window.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(used: bool, expires_in: Duration) -> PasswordSetupToken {
        let now = Utc::now();
        PasswordSetupToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "hash".to_string(),
            used,
            expires_at: now + expires_in,
            created_at: now,
        }
    }

    #[test]
    fn fresh_token_is_valid() {
        let t = token(false, Duration::hours(24));
        assert!(t.is_valid(Utc::now()));
    }

    #[test]
    fn used_token_is_invalid_even_inside_window() {
        let t = token(true, Duration::hours(24));
        assert!(!t.is_valid(Utc::now()));
    }

    #[test]
    fn expired_token_is_invalid() {
        let t = token(false, Duration::hours(-1));
        assert!(!t.is_valid(Utc::now()));
    }

    #[test]
    fn validity_flips_exactly_at_expiry() {
        let t = token(false, Duration::hours(24));
        assert!(!t.is_valid(t.expires_at));
        assert!(t.is_valid(t.expires_at - Duration::seconds(1)));
    }
}
