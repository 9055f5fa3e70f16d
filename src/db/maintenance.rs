use std::fmt;

use diesel::prelude::*;
use diesel::sql_types::{Bool, Integer, Nullable, Text};

use crate::core::models::now;
use crate::mapping::ColumnType;
use crate::Error;

use super::schema;
use super::DbStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub grants: usize,
    pub device_codes: usize,
}

/// A difference between the live database and the mapped model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaMismatch {
    MissingTable {
        table: String,
    },
    MissingColumn {
        table: String,
        column: String,
    },
    Nullability {
        table: String,
        column: String,
        expected_nullable: bool,
    },
    Length {
        table: String,
        column: String,
        expected: Option<usize>,
        actual: Option<usize>,
    },
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn length(l: &Option<usize>) -> String {
            l.map(|l| l.to_string())
                .unwrap_or_else(|| "unbounded".to_string())
        }

        match self {
            SchemaMismatch::MissingTable { table } => write!(f, "table {} is missing", table),
            SchemaMismatch::MissingColumn { table, column } => {
                write!(f, "column {}.{} is missing", table, column)
            }
            SchemaMismatch::Nullability {
                table,
                column,
                expected_nullable,
            } => write!(
                f,
                "column {}.{} should be {}",
                table,
                column,
                if *expected_nullable { "nullable" } else { "NOT NULL" }
            ),
            SchemaMismatch::Length {
                table,
                column,
                expected,
                actual,
            } => write!(
                f,
                "column {}.{} has length {}, expected {}",
                table,
                column,
                length(actual),
                length(expected)
            ),
        }
    }
}

#[derive(Debug, QueryableByName)]
struct LiveColumn {
    #[sql_type = "Text"]
    table_name: String,
    #[sql_type = "Text"]
    column_name: String,
    #[sql_type = "Bool"]
    is_nullable: bool,
    #[sql_type = "Nullable<Integer>"]
    max_length: Option<i32>,
}

const LIVE_COLUMNS: &str = "SELECT table_name::text AS table_name, \
     column_name::text AS column_name, \
     (is_nullable = 'YES') AS is_nullable, \
     character_maximum_length::integer AS max_length \
     FROM information_schema.columns \
     WHERE table_schema = current_schema()";

impl DbStore {
    /// Deletes expired persisted grants and device codes, `batch_size` rows
    /// at a time in key order.
    #[tracing::instrument(skip(self))]
    pub fn remove_expired(&self, batch_size: u32) -> Result<CleanupReport, Error> {
        let limit = i64::from(batch_size.max(1));
        let cutoff = now();

        let grants = self.run(|conn| {
            use schema::persisted_grants::dsl::{self, persisted_grants};

            let mut removed = 0;
            loop {
                let keys = persisted_grants
                    .filter(dsl::expiration.lt(cutoff))
                    .order(dsl::key)
                    .select(dsl::key)
                    .limit(limit)
                    .load::<String>(conn)?;
                if keys.is_empty() {
                    break;
                }
                removed += diesel::delete(persisted_grants.filter(dsl::key.eq_any(&keys)))
                    .execute(conn)?;
                tracing::debug!(batch = keys.len(), "Removed expired grants");
                if (keys.len() as i64) < limit {
                    break;
                }
            }
            Ok(removed)
        })?;

        let device_codes = self.run(|conn| {
            use schema::device_flow_codes::dsl::{self, device_flow_codes};

            let mut removed = 0;
            loop {
                let codes = device_flow_codes
                    .filter(dsl::expiration.lt(cutoff))
                    .order(dsl::user_code)
                    .select(dsl::user_code)
                    .limit(limit)
                    .load::<String>(conn)?;
                if codes.is_empty() {
                    break;
                }
                removed +=
                    diesel::delete(device_flow_codes.filter(dsl::user_code.eq_any(&codes)))
                        .execute(conn)?;
                tracing::debug!(batch = codes.len(), "Removed expired device codes");
                if (codes.len() as i64) < limit {
                    break;
                }
            }
            Ok(removed)
        })?;

        let report = CleanupReport {
            grants,
            device_codes,
        };
        tracing::info!(
            grants = report.grants,
            device_codes = report.device_codes,
            "Removed expired entries"
        );
        Ok(report)
    }

    /// Compares the tables in the connected schema with the mapped model.
    /// An empty result means every mapped table and column is present with
    /// the expected nullability and length.
    pub fn verify_schema(&self) -> Result<Vec<SchemaMismatch>, Error> {
        let live = self.run(|conn| Ok(diesel::sql_query(LIVE_COLUMNS).load::<LiveColumn>(conn)?))?;

        let mut mismatches = Vec::new();
        for entity in self.model.entities() {
            let table = entity.table();
            let columns: Vec<&LiveColumn> = live.iter().filter(|c| c.table_name == table).collect();

            if columns.is_empty() {
                mismatches.push(SchemaMismatch::MissingTable {
                    table: table.to_string(),
                });
                continue;
            }

            for column in entity.columns() {
                let found = match columns.iter().find(|c| c.column_name == column.name) {
                    Some(found) => found,
                    None => {
                        mismatches.push(SchemaMismatch::MissingColumn {
                            table: table.to_string(),
                            column: column.name.clone(),
                        });
                        continue;
                    }
                };

                let expected_nullable = !entity.is_required(column);
                if found.is_nullable != expected_nullable {
                    mismatches.push(SchemaMismatch::Nullability {
                        table: table.to_string(),
                        column: column.name.clone(),
                        expected_nullable,
                    });
                }

                if column.column_type == ColumnType::Text {
                    let actual = found.max_length.map(|l| l as usize);
                    if actual != column.max_length {
                        mismatches.push(SchemaMismatch::Length {
                            table: table.to_string(),
                            column: column.name.clone(),
                            expected: column.max_length,
                            actual,
                        });
                    }
                }
            }
        }

        for mismatch in &mismatches {
            tracing::warn!("{}", mismatch);
        }
        Ok(mismatches)
    }
}

#[cfg(test)]
mod tests {
    use super::SchemaMismatch;

    #[test]
    fn mismatches_describe_themselves() {
        let missing = SchemaMismatch::MissingColumn {
            table: "Clients".to_string(),
            column: "ClientId".to_string(),
        };
        assert_eq!(missing.to_string(), "column Clients.ClientId is missing");

        let length = SchemaMismatch::Length {
            table: "PersistedGrants".to_string(),
            column: "Data".to_string(),
            expected: Some(50_000),
            actual: None,
        };
        assert_eq!(
            length.to_string(),
            "column PersistedGrants.Data has length unbounded, expected 50000"
        );
    }
}
