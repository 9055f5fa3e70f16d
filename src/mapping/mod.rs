//! Declarative mapping of entity shapes onto relational tables.
//!
//! A [`Model`] is assembled once at startup. Every entity is registered with
//! [`Model::entity`], which hands out an [`EntityBuilder`] used to name the
//! table, declare columns and their constraints, the primary key, indexes and
//! one-to-many relationships.
//!
//! [`build`] registers the identity tables (generic over the key type and the
//! user/role shapes), the configuration tables (clients, resources, scopes)
//! and the operational tables (persisted grants, device codes).

pub mod check;
pub mod ddl;

mod configuration;
mod identity;
mod operational;

pub use check::{Constrained, ConstraintViolation};
pub use identity::{IdentityKey, RoleShape, UserShape};
pub use operational::DATA_LENGTH;

use crate::core::models::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Boolean,
    Integer,
    BigInt,
    Timestamp,
    TimestampTz,
}

impl ColumnType {
    // Value types cannot hold null unless declared optional.
    fn required_by_default(self) -> bool {
        !matches!(self, ColumnType::Text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueGenerated {
    Never,
    OnAdd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub max_length: Option<usize>,
    pub required: bool,
    pub generated: ValueGenerated,
}

impl Column {
    fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            max_length: None,
            required: column_type.required_by_default(),
            generated: ValueGenerated::Never,
        }
    }

    pub fn max_length(&mut self, length: usize) -> &mut Self {
        self.max_length = Some(length);
        self
    }

    pub fn required(&mut self) -> &mut Self {
        self.required = true;
        self
    }

    pub fn optional(&mut self) -> &mut Self {
        self.required = false;
        self
    }

    pub fn value_generated(&mut self, generated: ValueGenerated) -> &mut Self {
        self.generated = generated;
        self
    }

    pub fn value_generated_never(&mut self) -> &mut Self {
        self.value_generated(ValueGenerated::Never)
    }

    pub fn value_generated_on_add(&mut self) -> &mut Self {
        self.value_generated(ValueGenerated::OnAdd)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    columns: Vec<String>,
    unique: bool,
    name: Option<String>,
}

impl Index {
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    pub fn named(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    NoAction,
    Restrict,
    SetNull,
    Cascade,
}

impl OnDelete {
    pub fn as_sql(self) -> &'static str {
        match self {
            OnDelete::NoAction => "NO ACTION",
            OnDelete::Restrict => "RESTRICT",
            OnDelete::SetNull => "SET NULL",
            OnDelete::Cascade => "CASCADE",
        }
    }
}

/// One principal row owning many dependent rows through `foreign_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub principal: String,
    pub dependent: String,
    pub foreign_key: Vec<String>,
    pub required: bool,
    pub on_delete: OnDelete,
}

impl Relationship {
    pub fn with_foreign_key(&mut self, columns: &[&str]) -> &mut Self {
        self.foreign_key = columns.iter().map(ToString::to_string).collect();
        self
    }

    pub fn required(&mut self) -> &mut Self {
        self.required = true;
        self
    }

    pub fn on_delete(&mut self, on_delete: OnDelete) -> &mut Self {
        self.on_delete = on_delete;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    table: String,
    columns: Vec<Column>,
    key: Vec<String>,
    indexes: Vec<Index>,
}

impl Entity {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            table: name.to_string(),
            columns: Vec::new(),
            key: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn key(&self) -> &[String] {
        &self.key
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_key_column(&self, name: &str) -> bool {
        self.key.iter().any(|k| k == name)
    }

    /// Key columns are never nullable, whatever the column says.
    pub fn is_required(&self, column: &Column) -> bool {
        column.required || self.is_key_column(&column.name)
    }

    pub fn key_name(&self) -> String {
        format!("PK_{}", self.table)
    }

    pub fn index_name(&self, index: &Index) -> String {
        match &index.name {
            Some(name) => name.clone(),
            None => format!("IX_{}_{}", self.table, index.columns.join("_")),
        }
    }

    // True when `columns` is a leading prefix of the key or of an index.
    fn is_covered(&self, columns: &[String]) -> bool {
        let prefix_of = |candidate: &[String]| candidate.starts_with(columns);
        prefix_of(&self.key) || self.indexes.iter().any(|i| prefix_of(&i.columns))
    }
}

pub struct EntityBuilder<'a> {
    entity: &'a mut Entity,
    relationships: &'a mut Vec<Relationship>,
}

impl<'a> EntityBuilder<'a> {
    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn to_table(&mut self, table: &str) -> &mut Self {
        self.entity.table = table.to_string();
        self
    }

    /// Declares a column, or returns the existing one with its type replaced.
    pub fn property(&mut self, name: &str, column_type: ColumnType) -> &mut Column {
        let columns = &mut self.entity.columns;
        let position = match columns.iter().position(|c| c.name == name) {
            Some(position) => {
                columns[position].column_type = column_type;
                position
            }
            None => {
                columns.push(Column::new(name, column_type));
                columns.len() - 1
            }
        };
        &mut columns[position]
    }

    pub fn has_key(&mut self, columns: &[&str]) -> &mut Self {
        self.entity.key = columns.iter().map(ToString::to_string).collect();
        self
    }

    pub fn has_index(&mut self, columns: &[&str]) -> &mut Index {
        let columns: Vec<String> = columns.iter().map(ToString::to_string).collect();
        let indexes = &mut self.entity.indexes;
        let position = match indexes.iter().position(|i| i.columns == columns) {
            Some(position) => position,
            None => {
                indexes.push(Index {
                    columns,
                    unique: false,
                    name: None,
                });
                indexes.len() - 1
            }
        };
        &mut indexes[position]
    }

    pub fn has_many(&mut self, dependent: &str) -> &mut Relationship {
        let principal = self.entity.name.clone();
        let relationships = &mut *self.relationships;
        let position = match relationships
            .iter()
            .position(|r| r.principal == principal && r.dependent == dependent)
        {
            Some(position) => position,
            None => {
                relationships.push(Relationship {
                    principal,
                    dependent: dependent.to_string(),
                    foreign_key: Vec::new(),
                    required: false,
                    on_delete: OnDelete::NoAction,
                });
                relationships.len() - 1
            }
        };
        &mut relationships[position]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("entity {entity} has no primary key")]
    MissingKey { entity: String },
    #[error("entity {entity} refers to undeclared column {column}")]
    UnknownColumn { entity: String, column: String },
    #[error("relationship refers to unknown entity {entity}")]
    UnknownEntity { entity: String },
    #[error("foreign key of {dependent} does not match the key of {principal}")]
    ForeignKeyArity { principal: String, dependent: String },
    #[error("table {table} is mapped more than once")]
    DuplicateTable { table: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, or reopens it when it is already registered.
    pub fn entity<F>(&mut self, name: &str, configure: F) -> &mut Self
    where
        F: FnOnce(&mut EntityBuilder<'_>),
    {
        let position = match self.entities.iter().position(|e| e.name == name) {
            Some(position) => position,
            None => {
                self.entities.push(Entity::new(name));
                self.entities.len() - 1
            }
        };

        let mut builder = EntityBuilder {
            entity: &mut self.entities[position],
            relationships: &mut self.relationships,
        };
        configure(&mut builder);
        self
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn entity_named(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn table(&self, table: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.table == table)
    }

    pub fn relationships_from<'m>(
        &'m self,
        principal: &'m str,
    ) -> impl Iterator<Item = &'m Relationship> + 'm {
        self.relationships
            .iter()
            .filter(move |r| r.principal == principal)
    }

    pub fn relationships_to<'m>(
        &'m self,
        dependent: &'m str,
    ) -> impl Iterator<Item = &'m Relationship> + 'm {
        self.relationships
            .iter()
            .filter(move |r| r.dependent == dependent)
    }

    pub fn validate(&self) -> Result<(), MappingError> {
        for (i, entity) in self.entities.iter().enumerate() {
            if self.entities[..i].iter().any(|e| e.table == entity.table) {
                return Err(MappingError::DuplicateTable {
                    table: entity.table.clone(),
                });
            }

            if entity.key.is_empty() {
                return Err(MappingError::MissingKey {
                    entity: entity.name.clone(),
                });
            }

            let referenced = entity
                .key
                .iter()
                .chain(entity.indexes.iter().flat_map(|i| i.columns.iter()));
            for column in referenced {
                require_column(entity, column)?;
            }
        }

        for relationship in &self.relationships {
            let principal = self.entity_named(&relationship.principal).ok_or_else(|| {
                MappingError::UnknownEntity {
                    entity: relationship.principal.clone(),
                }
            })?;
            let dependent = self.entity_named(&relationship.dependent).ok_or_else(|| {
                MappingError::UnknownEntity {
                    entity: relationship.dependent.clone(),
                }
            })?;

            if relationship.foreign_key.len() != principal.key.len() {
                return Err(MappingError::ForeignKeyArity {
                    principal: principal.name.clone(),
                    dependent: dependent.name.clone(),
                });
            }

            for column in &relationship.foreign_key {
                require_column(dependent, column)?;
            }
        }

        Ok(())
    }
}

fn require_column(entity: &Entity, column: &str) -> Result<(), MappingError> {
    match entity.column(column) {
        Some(_) => Ok(()),
        None => Err(MappingError::UnknownColumn {
            entity: entity.name.clone(),
            column: column.to_string(),
        }),
    }
}

/// Registers every identity, configuration and operational entity.
pub fn build<K, U, R>() -> Model
where
    K: IdentityKey,
    U: UserShape,
    R: RoleShape,
{
    let mut model = Model::new();
    identity::register::<K, U, R>(&mut model);
    configuration::register(&mut model);
    operational::register(&mut model);
    model
}

/// The model implemented by the bundled migrations: text identity keys and
/// the stock user/role shapes.
pub fn default_model() -> Model {
    build::<String, User, Role>()
}
