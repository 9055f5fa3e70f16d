//! PostgreSQL implementation of the stores, backed by diesel and an r2d2
//! connection pool.

use std::fmt::Debug;

use diesel::prelude::*;
use diesel::r2d2::{Builder as PoolBuilder, ConnectionManager, Pool, PooledConnection};
use tokio::task::block_in_place;

use crate::mapping::{default_model, Constrained, Model};
use crate::Error;

pub mod models;
pub mod schema;

mod clients;
mod device_codes;
mod grants;
mod identity;
mod maintenance;
mod resources;

pub use maintenance::{CleanupReport, SchemaMismatch};

embed_migrations!("migrations");

pub const DEFAULT_POOL_SIZE: u32 = 10;

type Manager = ConnectionManager<PgConnection>;

pub struct DbStore {
    pool: Pool<Manager>,
    model: Model,
}

impl DbStore {
    pub fn acquire(uri: &str) -> Result<Self, Error> {
        Self::acquire_with_size(uri, DEFAULT_POOL_SIZE)
    }

    pub fn acquire_with_size(uri: &str, max_size: u32) -> Result<Self, Error> {
        let model = default_model();
        model.validate()?;

        let pool = PoolBuilder::new()
            .max_size(max_size)
            .build(ConnectionManager::new(uri))?;
        tracing::debug!(max_size, "Connection pool ready");

        Ok(Self { pool, model })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    fn conn(&self) -> Result<PooledConnection<Manager>, Error> {
        Ok(self.pool.get()?)
    }

    /// Runs `f` on a pooled connection without stalling the async runtime.
    fn run<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&PgConnection) -> Result<T, Error>,
    {
        block_in_place(|| {
            let conn = self.conn()?;
            f(&conn)
        })
    }

    fn transaction<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&PgConnection) -> Result<T, Error>,
    {
        self.run(|conn| conn.transaction::<T, Error, _>(|| f(conn)))
    }

    fn check<T: Constrained>(&self, row: &T) -> Result<(), Error> {
        Ok(self.model.check(row)?)
    }

    fn check_values(&self, entity: &str, column: &str, values: &[String]) -> Result<(), Error> {
        Ok(self.model.check_values(entity, column, values)?)
    }

    pub fn migrate(&self) -> Result<(), Error> {
        let output = self.run(|conn| {
            let mut output = Vec::new();
            embedded_migrations::run_with_output(conn, &mut output)?;
            Ok(output)
        })?;

        for line in String::from_utf8_lossy(&output).lines() {
            tracing::info!("{}", line.trim());
        }
        tracing::info!("Ran migrations");
        Ok(())
    }
}

impl Debug for DbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbStore")
            .field("max_size", &self.pool.max_size())
            .finish()
    }
}
