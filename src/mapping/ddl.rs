//! PostgreSQL rendering of a [`Model`].

use std::fmt::Write;

use super::{Column, ColumnType, Entity, Index, Model, ValueGenerated};

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn quote_all(identifiers: &[String]) -> String {
    identifiers
        .iter()
        .map(|i| quote(i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn sql_type(column: &Column) -> String {
    match column.column_type {
        ColumnType::Text => match column.max_length {
            Some(length) => format!("character varying({})", length),
            None => "text".to_string(),
        },
        ColumnType::Boolean => "boolean".to_string(),
        ColumnType::Integer => "integer".to_string(),
        ColumnType::BigInt => "bigint".to_string(),
        ColumnType::Timestamp => "timestamp without time zone".to_string(),
        ColumnType::TimestampTz => "timestamp with time zone".to_string(),
    }
}

fn is_identity(column: &Column) -> bool {
    column.generated == ValueGenerated::OnAdd
        && matches!(column.column_type, ColumnType::Integer | ColumnType::BigInt)
}

fn column_definition(entity: &Entity, column: &Column) -> String {
    let mut definition = format!("{} {}", quote(&column.name), sql_type(column));
    if entity.is_required(column) {
        definition.push_str(" NOT NULL");
    }
    if is_identity(column) {
        definition.push_str(" GENERATED BY DEFAULT AS IDENTITY");
    }
    definition
}

fn create_index(entity: &Entity, name: &str, columns: &[String], unique: bool) -> String {
    format!(
        "CREATE {}INDEX {} ON {} ({});\n",
        if unique { "UNIQUE " } else { "" },
        quote(name),
        quote(entity.table()),
        quote_all(columns)
    )
}

impl Model {
    /// Entities ordered so that every principal precedes its dependents.
    /// Cycles, which the stock registrations never produce, keep
    /// registration order.
    pub fn creation_order(&self) -> Vec<&Entity> {
        let mut ordered: Vec<&Entity> = Vec::with_capacity(self.entities.len());
        let mut pending: Vec<&Entity> = self.entities.iter().collect();

        while !pending.is_empty() {
            let ready = pending.iter().position(|entity| {
                self.relationships_to(entity.name()).all(|r| {
                    r.principal == entity.name()
                        || ordered.iter().any(|done| done.name() == r.principal)
                })
            });
            let next = pending.remove(ready.unwrap_or(0));
            ordered.push(next);
        }

        ordered
    }

    /// Indexes the store should carry for `entity`: declared ones first, then
    /// one per foreign key not already served by the key or an index prefix.
    pub fn effective_indexes(&self, entity: &Entity) -> Vec<(String, Index)> {
        let mut indexes: Vec<(String, Index)> = entity
            .indexes()
            .iter()
            .map(|i| (entity.index_name(i), i.clone()))
            .collect();

        for relationship in self.relationships_to(entity.name()) {
            if entity.is_covered(&relationship.foreign_key) {
                continue;
            }
            let index = Index {
                columns: relationship.foreign_key.clone(),
                unique: false,
                name: None,
            };
            if indexes.iter().any(|(_, i)| i.columns == index.columns) {
                continue;
            }
            indexes.push((entity.index_name(&index), index));
        }

        indexes
    }

    pub fn render_table(&self, entity: &Entity) -> String {
        let mut lines: Vec<String> = entity
            .columns()
            .iter()
            .map(|c| column_definition(entity, c))
            .collect();

        if !entity.key().is_empty() {
            lines.push(format!(
                "CONSTRAINT {} PRIMARY KEY ({})",
                quote(&entity.key_name()),
                quote_all(entity.key())
            ));
        }

        for relationship in self.relationships_to(entity.name()) {
            let principal = match self.entity_named(&relationship.principal) {
                Some(principal) => principal,
                None => continue,
            };
            lines.push(format!(
                "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
                quote(&format!(
                    "FK_{}_{}_{}",
                    entity.table(),
                    principal.table(),
                    relationship.foreign_key.join("_")
                )),
                quote_all(&relationship.foreign_key),
                quote(principal.table()),
                quote_all(principal.key()),
                relationship.on_delete.as_sql()
            ));
        }

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "CREATE TABLE {} (", quote(entity.table()));
        let _ = writeln!(out, "    {}", lines.join(",\n    "));
        let _ = writeln!(out, ");");
        out
    }

    /// `CREATE TABLE` statements for every entity followed by their indexes.
    pub fn render_ddl(&self) -> String {
        let order = self.creation_order();
        let mut out = String::new();

        for entity in &order {
            out.push_str(&self.render_table(entity));
            out.push('\n');
        }

        for entity in &order {
            for (name, index) in self.effective_indexes(entity) {
                out.push_str(&create_index(
                    entity,
                    &name,
                    index.columns(),
                    index.is_unique(),
                ));
            }
        }

        out
    }

    pub fn render_drop(&self) -> String {
        self.creation_order()
            .iter()
            .rev()
            .map(|entity| format!("DROP TABLE IF EXISTS {};\n", quote(entity.table())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::models::{Role, User};
    use crate::mapping::{build, default_model};

    fn position(ddl: &str, needle: &str) -> usize {
        ddl.find(needle)
            .unwrap_or_else(|| panic!("{} not rendered", needle))
    }

    #[test]
    fn renders_columns_with_lengths_and_nullability() {
        let ddl = default_model().render_ddl();
        assert!(ddl.contains("\"ClientId\" character varying(200) NOT NULL,"));
        assert!(ddl.contains("\"ClientName\" character varying(200),"));
        assert!(ddl.contains("\"Data\" character varying(50000) NOT NULL,"));
        assert!(ddl.contains("\"Expiration\" timestamp without time zone,"));
        assert!(ddl.contains("\"LockoutEnd\" timestamp with time zone,"));
        assert!(ddl.contains("\"Id\" integer NOT NULL GENERATED BY DEFAULT AS IDENTITY,"));
        assert!(ddl.contains("\"Key\" character varying(200) NOT NULL,"));
    }

    #[test]
    fn renders_keys_and_cascading_foreign_keys() {
        let ddl = default_model().render_ddl();
        assert!(ddl.contains("CONSTRAINT \"PK_DeviceFlowCodes\" PRIMARY KEY (\"UserCode\")"));
        assert!(ddl.contains("CONSTRAINT \"PK_UserRoles\" PRIMARY KEY (\"UserId\", \"RoleId\")"));
        assert!(ddl.contains(
            "CONSTRAINT \"FK_ClientGrantTypes_Clients_ClientId\" FOREIGN KEY (\"ClientId\") \
             REFERENCES \"Clients\" (\"Id\") ON DELETE CASCADE"
        ));
        assert!(ddl.contains(
            "CONSTRAINT \"FK_ApiScopeClaims_ApiScopes_ApiScopeId\" FOREIGN KEY (\"ApiScopeId\") \
             REFERENCES \"ApiScopes\" (\"Id\") ON DELETE CASCADE"
        ));
    }

    #[test]
    fn renders_declared_and_foreign_key_indexes() {
        let ddl = default_model().render_ddl();
        assert!(ddl.contains("CREATE UNIQUE INDEX \"IX_Clients_ClientId\" ON \"Clients\" (\"ClientId\");"));
        assert!(ddl.contains("CREATE UNIQUE INDEX \"UserNameIndex\" ON \"Users\" (\"NormalizedUserName\");"));
        assert!(ddl.contains("CREATE INDEX \"EmailIndex\" ON \"Users\" (\"NormalizedEmail\");"));
        assert!(ddl.contains(
            "CREATE UNIQUE INDEX \"IX_DeviceFlowCodes_DeviceCode\" ON \"DeviceFlowCodes\" (\"DeviceCode\");"
        ));
        assert!(ddl.contains(
            "CREATE INDEX \"IX_PersistedGrants_SubjectId_ClientId_Type\" ON \"PersistedGrants\" \
             (\"SubjectId\", \"ClientId\", \"Type\");"
        ));
        assert!(ddl.contains("CREATE INDEX \"IX_ClientScopes_ClientId\" ON \"ClientScopes\" (\"ClientId\");"));
        assert!(ddl.contains("CREATE INDEX \"IX_UserRoles_RoleId\" ON \"UserRoles\" (\"RoleId\");"));
        // Served by the leading key column.
        assert!(!ddl.contains("\"IX_UserRoles_UserId\""));
        assert!(!ddl.contains("\"IX_UserTokens_UserId\""));
    }

    #[test]
    fn principals_are_created_before_dependents() {
        let ddl = default_model().render_ddl();
        assert!(position(&ddl, "CREATE TABLE \"Clients\"") < position(&ddl, "CREATE TABLE \"ClientSecrets\""));
        assert!(position(&ddl, "CREATE TABLE \"ApiResources\"") < position(&ddl, "CREATE TABLE \"ApiScopes\""));
        assert!(position(&ddl, "CREATE TABLE \"ApiScopes\"") < position(&ddl, "CREATE TABLE \"ApiScopeClaims\""));
        assert!(position(&ddl, "CREATE TABLE \"Roles\"") < position(&ddl, "CREATE TABLE \"UserRoles\""));
    }

    #[test]
    fn drop_reverses_creation_order() {
        let drop = default_model().render_drop();
        assert!(position(&drop, "\"ClientSecrets\"") < position(&drop, "\"Clients\";"));
        assert!(position(&drop, "\"UserRoles\"") < position(&drop, "\"Users\";"));
        assert_eq!(drop.lines().count(), default_model().entities().len());
    }

    #[test]
    fn integer_identity_keys_are_generated() {
        let ddl = build::<i32, User, Role>().render_ddl();
        assert!(ddl.contains("CREATE TABLE \"Users\" (\n    \"Id\" integer NOT NULL GENERATED BY DEFAULT AS IDENTITY,"));
        assert!(ddl.contains("\"UserId\" integer NOT NULL,"));

        let ddl = default_model().render_ddl();
        assert!(ddl.contains("CREATE TABLE \"Users\" (\n    \"Id\" text NOT NULL,"));
    }
}
