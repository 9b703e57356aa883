//! SQLite card store
//!
//! Cards are kept as plain key/value pairs: table `cards` holds one row per
//! card, keyed by the card id, with the JSON encoding of the whole card as
//! value. The title index is an expression index over the JSON `title`
//! attribute. It is derived data and can be dropped and recreated at any time.
//!
//! Uses an r2d2 connection pool in WAL mode, so readers run concurrently and
//! writers are serialized by SQLite itself.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, TransactionBehavior};
use std::path::Path;
use uuid::Uuid;

use crate::card::Card;
use crate::{BingoError, Result};

/// Name of the secondary index over card titles
pub const TITLE_INDEX: &str = "idx_cards_title";

/// Indexed expression; queries must use it verbatim for SQLite to pick the index.
/// Values that are not JSON sort as NULL instead of failing the statement.
const TITLE_EXPR: &str =
    "(CASE WHEN json_valid(value) THEN json_extract(value, '$.title') END) COLLATE NOCASE";

/// Thread-safe card store handle, cheap to clone
#[derive(Clone)]
pub struct CardStore {
    pool: Pool<SqliteConnectionManager>,
}

impl CardStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch(
                "
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
            ",
            )?;
            Ok(())
        });

        let pool = Pool::builder().max_size(8).build(manager)?;

        let store = Self { pool };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        // In-memory needs a single connection that is never recycled to keep its data
        let pool = Pool::builder()
            .max_size(1)
            .max_lifetime(None)
            .idle_timeout(None)
            .build(SqliteConnectionManager::memory())?;

        let store = Self { pool };
        store.init_tables()?;
        Ok(store)
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    fn init_tables(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cards (
                id TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    // ==================== Card Operations ====================

    /// Store a new card under a freshly generated id and return that id.
    ///
    /// Any id carried by `card` is replaced. Once the write is committed the
    /// title index is ensured; failing to do so only degrades search and is
    /// logged, the write still counts as successful.
    pub fn put(&self, mut card: Card) -> Result<String> {
        card.id = Uuid::new_v4().to_string();
        let payload = serde_json::to_string(&card).map_err(|source| BingoError::Decode {
            key: card.id.clone(),
            source,
        })?;

        {
            let mut conn = self.conn()?;
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            tx.execute(
                "INSERT INTO cards (id, value) VALUES (?1, ?2)",
                params![card.id, payload],
            )?;
            tx.commit()?;
        }

        if let Err(e) = self.ensure_title_index() {
            log::warn!("index on field title not created: {}", e);
        }

        log::info!("saved card {}: {}", card.id, payload);
        Ok(card.id)
    }

    /// Load the card stored under `id`
    pub fn get(&self, id: &str) -> Result<Card> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
        let value: Option<String> = tx
            .query_row(
                "SELECT value FROM cards WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        tx.commit()?;

        let value = value.ok_or_else(|| BingoError::NotFound { id: id.to_string() })?;
        let card = decode(id, &value)?;
        log::info!("card found: {}", id);
        Ok(card)
    }

    /// Cards whose stored JSON text contains `query`, in ascending title order.
    ///
    /// The match is a case-sensitive substring test on the whole encoded
    /// record, so text in the cells matches as well as text in the title.
    /// Records that fail to decode are skipped.
    pub fn search_by_title(&self, query: &str) -> Result<Vec<Card>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;

        let mut cards = Vec::new();
        {
            let mut stmt = tx.prepare(&format!(
                "SELECT id, value FROM cards ORDER BY {}, id",
                TITLE_EXPR
            ))?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let value: String = row.get(1)?;
                if !value.contains(query) {
                    continue;
                }

                let key: String = row.get(0)?;
                match decode(&key, &value) {
                    Ok(card) => cards.push(card),
                    Err(e) => log::warn!("skipping card during search for {:?}: {}", query, e),
                }
            }
        }
        tx.commit()?;

        Ok(cards)
    }

    /// Number of stored cards. Index entries are not rows and never counted.
    pub fn count(&self) -> Result<u64> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
        let count: i64 = tx.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        tx.commit()?;
        Ok(count.max(0) as u64)
    }

    // ==================== Index Operations ====================

    /// Create the title index if it does not exist yet
    pub fn ensure_title_index(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(&format!(
            "CREATE INDEX IF NOT EXISTS {} ON cards ({});",
            TITLE_INDEX, TITLE_EXPR
        ))?;
        Ok(())
    }

    /// Remove the title index; search keeps working without it
    pub fn drop_title_index(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(&format!("DROP INDEX IF EXISTS {};", TITLE_INDEX))?;
        Ok(())
    }

    pub fn has_title_index(&self) -> Result<bool> {
        let conn = self.conn()?;
        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?1",
            params![TITLE_INDEX],
            |row| row.get(0),
        )?;
        Ok(found > 0)
    }

    /// Write a raw value under `key`, bypassing encoding
    #[cfg(test)]
    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO cards (id, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn decode(key: &str, value: &str) -> Result<Card> {
    serde_json::from_str(value).map_err(|source| BingoError::Decode {
        key: key.to_string(),
        source,
    })
}
