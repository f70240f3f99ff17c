use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub user_id: Uuid,
    pub member_id: String,
    pub scheme_id: Option<Uuid>,
    pub joined_at: DateTime<Utc>,
}

/// A member joined with its login identity and (optional) scheme. This is the
/// shape most handlers work with; `member_id` is the external identifier
/// operators type into forms.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MemberAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub member_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub joined_at: DateTime<Utc>,
    pub scheme_id: Option<Uuid>,
    pub scheme_name: Option<String>,
    pub monthly_charge: Option<i64>,
    pub monthly_reward_text: Option<String>,
}

impl MemberAccount {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn has_scheme(&self) -> bool {
        self.scheme_id.is_some()
    }
}

/// External member identifier: "USR" plus six uppercase hex characters.
/// Immutable after creation.
pub fn generate_member_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("USR{}", hex[..6].to_uppercase())
}
