//! Service layer - the three orchestration components
//!
//! Services coordinate domain logic and port interactions: the session
//! service owns the credential, the account service owns the account
//! collection, and the transfer service composes both.

mod accounts;
mod session;
mod transfer;

pub use accounts::AccountService;
pub use session::{SessionService, SessionSnapshot};
pub use transfer::TransferService;
