//! Persistence layer
//!
//! Provides the embedded card store:
//! - Card records keyed by server-assigned id
//! - Rebuildable secondary index on card titles
//! - Substring search in title order

pub mod card_store;

pub use card_store::{CardStore, TITLE_INDEX};
