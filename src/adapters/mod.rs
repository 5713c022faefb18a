//! Concrete implementations of the ports

pub mod rest;
pub mod store;

pub use rest::RestBankGateway;
pub use store::{FileCredentialSlot, MemoryCredentialSlot};
