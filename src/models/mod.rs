mod charge;
mod member;
mod password_setup_token;
mod reward;
mod scheme;
mod user;

pub use charge::{Charge, LedgerRow};
pub use member::{generate_member_id, Member, MemberAccount};
pub use password_setup_token::PasswordSetupToken;
pub use reward::{Reward, RewardLedgerRow};
pub use scheme::Scheme;
pub use user::User;
