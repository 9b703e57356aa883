//! # Anna Bingo Library
//!
//! Backend for a small bingo site: serves randomly shuffled 4×4 bingo cards,
//! persists user-submitted cards in an embedded SQLite store and finds them
//! again by id or by a substring of their title.
//!
//! ## Features
//!
//! - **Cards**: the `Card` record, its fixed 4×4 grid and the nested Fisher–Yates shuffle
//! - **Storage**: transactional card store with a rebuildable title index
//! - **Service**: create / fetch / search / statistics orchestration
//! - **Server**: axum HTTP adapter, static UI files, CORS and request logging
//!
//! ## Usage
//!
//! ```no_run
//! use annabingo::{services::BingoService, storage::CardStore};
//!
//! let store = CardStore::open("db/annabingo.db")?;
//! let service = BingoService::new(store);
//! let card = service.get_shuffled_template();
//! assert_eq!(card.fields.len(), 4);
//! # Ok::<(), annabingo::BingoError>(())
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Card model, grid shuffle and default template
pub mod card;

/// Embedded card persistence and title index
pub mod storage;

/// Orchestration of store and shuffle for the HTTP boundary
pub mod services;

/// HTTP server components
pub mod servers;

/// Logger setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use card::{default_template, shuffle_grid, Card, Grid, RandomIndex};
pub use logging::Environment;
pub use servers::{WebUiConfig, WebUiServer};
pub use services::{BingoService, Statistics};
pub use storage::CardStore;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Failure of the embedded storage engine itself
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

/// Main error type for the Anna Bingo library
#[derive(Debug, thiserror::Error)]
pub enum BingoError {
    #[error("Card not found: {id}")]
    NotFound { id: String },

    #[error("Stored card {key} could not be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid card: {0}")]
    Validation(String),
}

impl From<rusqlite::Error> for BingoError {
    fn from(err: rusqlite::Error) -> Self {
        BingoError::Storage(StorageError::Sqlite(err))
    }
}

impl From<r2d2::Error> for BingoError {
    fn from(err: r2d2::Error) -> Self {
        BingoError::Storage(StorageError::Pool(err))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BingoError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
