use identity_data::core::models::{Role, User};
use identity_data::mapping::{self, default_model, ColumnType, Entity};

const MIGRATIONS: &[&str] = &[
    include_str!("../migrations/2020-11-01-000000_identity/up.sql"),
    include_str!("../migrations/2020-11-01-000001_configuration/up.sql"),
    include_str!("../migrations/2020-11-01-000002_operational/up.sql"),
];

const DOWN_MIGRATIONS: &[&str] = &[
    include_str!("../migrations/2020-11-01-000000_identity/down.sql"),
    include_str!("../migrations/2020-11-01-000001_configuration/down.sql"),
    include_str!("../migrations/2020-11-01-000002_operational/down.sql"),
];

fn migrated_table(table: &str) -> Option<&'static str> {
    let header = format!("CREATE TABLE \"{}\" (", table);
    MIGRATIONS.iter().find_map(|sql| {
        let start = sql.find(&header)?;
        let body = &sql[start..];
        let end = body.find("\n);")?;
        Some(&body[..end])
    })
}

fn expected_definition(entity: &Entity, name: &str) -> String {
    let column = entity.column(name).expect("column should be mapped");
    let sql_type = match (column.column_type, column.max_length) {
        (ColumnType::Text, Some(length)) => format!("character varying({})", length),
        (ColumnType::Text, None) => "text".to_string(),
        (ColumnType::Boolean, _) => "boolean".to_string(),
        (ColumnType::Integer, _) => "integer".to_string(),
        (ColumnType::BigInt, _) => "bigint".to_string(),
        (ColumnType::Timestamp, _) => "timestamp without time zone".to_string(),
        (ColumnType::TimestampTz, _) => "timestamp with time zone".to_string(),
    };
    format!("\"{}\" {}", name, sql_type)
}

#[test]
fn bundled_migrations_create_every_mapped_column() {
    let model = default_model();

    for entity in model.entities() {
        let table = migrated_table(entity.table())
            .unwrap_or_else(|| panic!("{} has no migration", entity.table()));

        for column in entity.columns() {
            let definition = expected_definition(entity, &column.name);
            let line = table
                .lines()
                .map(str::trim)
                .find(|line| line.starts_with(&format!("\"{}\" ", column.name)))
                .unwrap_or_else(|| panic!("{}.{} is not migrated", entity.table(), column.name));

            assert!(
                line.starts_with(&definition),
                "{}.{}: expected {}, migrated {}",
                entity.table(),
                column.name,
                definition,
                line
            );
            assert_eq!(
                line.contains("NOT NULL"),
                entity.is_required(column),
                "{}.{} nullability",
                entity.table(),
                column.name
            );
        }
    }
}

#[test]
fn bundled_down_migrations_drop_every_table() {
    let model = default_model();
    let down = DOWN_MIGRATIONS.concat();

    for entity in model.entities() {
        assert!(
            down.contains(&format!("DROP TABLE IF EXISTS \"{}\";", entity.table())),
            "{} is never dropped",
            entity.table()
        );
    }
}

#[test]
fn contract_tables_are_all_mapped() {
    let model = default_model();
    let tables = [
        "Users",
        "Roles",
        "UserRoles",
        "UserClaims",
        "UserLogins",
        "UserTokens",
        "RoleClaims",
        "Clients",
        "ClientGrantTypes",
        "ClientRedirectUris",
        "ClientPostLogoutRedirectUris",
        "ClientScopes",
        "ClientSecrets",
        "ClientClaims",
        "ClientIdPRestrictions",
        "ClientCorsOrigins",
        "ClientProperties",
        "IdentityResources",
        "IdentityClaims",
        "IdentityResourceProperties",
        "ApiResources",
        "ApiSecrets",
        "ApiResourceClaims",
        "ApiScopes",
        "ApiScopeClaims",
        "ApiResourceProperties",
        "PersistedGrants",
        "DeviceFlowCodes",
    ];

    for table in &tables {
        assert!(model.table(table).is_some(), "{} is not mapped", table);
    }
    assert_eq!(model.entities().len(), tables.len());
}

#[test]
fn generated_ddl_creates_tables_before_indexes() {
    let ddl = mapping::build::<i64, User, Role>().render_ddl();

    let last_table = ddl.rfind("CREATE TABLE").expect("tables are rendered");
    let first_index = ddl.find("CREATE INDEX").expect("indexes are rendered");
    assert!(last_table < first_index);
    assert!(ddl.contains("\"Id\" bigint NOT NULL GENERATED BY DEFAULT AS IDENTITY"));
    assert!(ddl.contains("\"UserId\" bigint NOT NULL"));
}
