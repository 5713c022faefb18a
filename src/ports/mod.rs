//! Trait definitions for external dependencies

mod credential_slot;
mod gateway;

pub use credential_slot::CredentialSlot;
pub use gateway::BankGateway;
