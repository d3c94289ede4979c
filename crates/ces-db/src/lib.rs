//! # ces-db
//!
//! libSQL persistence for the CES pipeline.
//!
//! Stores one row per campaign (upserted on its deterministic id) plus the
//! metric and cultural-insight rows extracted from it. Writes go through the
//! [`CampaignSink`] contract: one transaction per document group, one
//! savepoint per document. The read side serves campaign lookups and the
//! store summary shown by `ces stats`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod sink;

pub use error::DatabaseError;
pub use repos::summary::{BrandScore, CategoryImpact, StoreSummary};
pub use sink::CampaignSink;

use libsql::Builder;
use tracing::debug;

/// Database handle for the CES store.
pub struct CesDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CesDb {
    /// Open a local database at `path` (`:memory:` for an in-memory store).
    ///
    /// Runs migrations on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unavailable` if the database cannot be opened
    /// and `DatabaseError::Migration` if the schema cannot be applied.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Unavailable(format!("{path}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Unavailable(format!("{path}: {e}")))?;

        // Foreign keys are per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let ces_db = Self { db, conn };
        ces_db.run_migrations().await?;
        debug!(path, "opened CES store");
        Ok(ces_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
