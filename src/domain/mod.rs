//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
mod credential;
mod transfer;
pub mod result;

pub use account::Account;
pub use credential::Credential;
pub use transfer::{TransferReceipt, TransferRequest};
