pub mod charges;
pub mod members;
pub mod password_setup_tokens;
pub mod reports;
pub mod rewards;
pub mod schemes;
pub mod users;
