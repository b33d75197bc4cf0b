//! Database abstraction layer.
//!
//! [`NoteStore`] defines the interface for persisting notes.  The default
//! implementation is [`SqliteStore`].  To swap to another database, implement
//! [`NoteStore`] for your new type and change the concrete type in
//! [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.

pub mod dao;
pub mod note;

pub use dao::NoteRecord;
pub use note::NoteStore;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// SQLite-backed note store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://memo.db"`
    /// or `"sqlite::memory:"` for tests.  In-memory databases are pinned to a
    /// single long-lived connection, since every SQLite connection to
    /// `:memory:` opens its own empty database.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_options.connect_with(options).await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Close every pooled connection.  Later queries fail with
    /// [`sqlx::Error::PoolClosed`].
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
