#![allow(dead_code)]

use std::sync::Once;

use diesel::{Connection, PgConnection};
use identity_data::db::DbStore;
use identity_data::util::random::random_string;

pub const DATABASE_URL_VAR: &str = "IDENTITY_DATA_TEST_DATABASE_URL";

static MIGRATE: Once = Once::new();

fn database_url() -> Option<String> {
    std::env::var(DATABASE_URL_VAR).ok()
}

/// A migrated store, or `None` when no test database is configured.
pub fn store() -> Option<DbStore> {
    let url = match database_url() {
        Some(url) => url,
        None => {
            eprintln!("{} is not set, skipping database test", DATABASE_URL_VAR);
            return None;
        }
    };

    let store = DbStore::acquire_with_size(&url, 4).expect("test database should be reachable");
    MIGRATE.call_once(|| store.migrate().expect("migrations should apply"));
    Some(store)
}

/// A connection outside the store, for statements the store never issues.
pub fn raw_connection() -> PgConnection {
    let url = database_url().expect("test database should be configured");
    PgConnection::establish(&url).expect("test database should be reachable")
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, random_string(12))
}
