use super::{ColumnType, Entity, Model};

/// A row whose text columns can be checked against the mapping before it is
/// written.
pub trait Constrained {
    const ENTITY: &'static str;

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintViolation {
    #[error("{table}.{column} is required")]
    Required { table: String, column: String },
    #[error("{table}.{column} is limited to {max_length} characters, got {length}")]
    TooLong {
        table: String,
        column: String,
        max_length: usize,
        length: usize,
    },
    #[error("{entity} is not mapped")]
    UnmappedEntity { entity: String },
    #[error("{entity}.{column} is not a mapped text column")]
    UnmappedColumn { entity: String, column: String },
}

impl Entity {
    /// Lengths are counted in characters, as `character varying(n)` does.
    pub fn check_text(&self, column: &str, value: Option<&str>) -> Result<(), ConstraintViolation> {
        let mapped = self
            .column(column)
            .filter(|c| c.column_type == ColumnType::Text)
            .ok_or_else(|| ConstraintViolation::UnmappedColumn {
                entity: self.name().to_string(),
                column: column.to_string(),
            })?;

        let value = match value {
            Some(value) => value,
            None if self.is_required(mapped) => {
                return Err(ConstraintViolation::Required {
                    table: self.table().to_string(),
                    column: column.to_string(),
                })
            }
            None => return Ok(()),
        };

        if let Some(max_length) = mapped.max_length {
            let length = value.chars().count();
            if length > max_length {
                return Err(ConstraintViolation::TooLong {
                    table: self.table().to_string(),
                    column: column.to_string(),
                    max_length,
                    length,
                });
            }
        }

        Ok(())
    }
}

impl Model {
    pub fn check<T: Constrained>(&self, row: &T) -> Result<(), ConstraintViolation> {
        let entity = self.mapped(T::ENTITY)?;
        for (column, value) in row.text_values() {
            entity.check_text(column, value)?;
        }
        Ok(())
    }

    pub fn check_value(
        &self,
        entity: &str,
        column: &str,
        value: Option<&str>,
    ) -> Result<(), ConstraintViolation> {
        self.mapped(entity)?.check_text(column, value)
    }

    pub fn check_values<'v, I>(&self, entity: &str, column: &str, values: I) -> Result<(), ConstraintViolation>
    where
        I: IntoIterator<Item = &'v String>,
    {
        let entity = self.mapped(entity)?;
        values
            .into_iter()
            .try_for_each(|value| entity.check_text(column, Some(value)))
    }

    fn mapped(&self, entity: &str) -> Result<&Entity, ConstraintViolation> {
        self.entity_named(entity)
            .ok_or_else(|| ConstraintViolation::UnmappedEntity {
                entity: entity.to_string(),
            })
    }
}
