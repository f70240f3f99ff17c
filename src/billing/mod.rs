pub mod generator;
pub mod month;
pub mod payment;

pub use generator::{generate_charges, GenerateOutcome};
pub use month::BillingMonth;
pub use payment::{settle, settle_batch, PaymentOutcome, SettlementOutcome};
