use super::{ColumnType, EntityBuilder, Model, OnDelete, ValueGenerated};

/// Column representation of the identifier shared by users and roles.
pub trait IdentityKey {
    const COLUMN_TYPE: ColumnType;
    const GENERATED: ValueGenerated;
}

impl IdentityKey for String {
    const COLUMN_TYPE: ColumnType = ColumnType::Text;
    const GENERATED: ValueGenerated = ValueGenerated::Never;
}

impl IdentityKey for i32 {
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;
    const GENERATED: ValueGenerated = ValueGenerated::OnAdd;
}

impl IdentityKey for i64 {
    const COLUMN_TYPE: ColumnType = ColumnType::BigInt;
    const GENERATED: ValueGenerated = ValueGenerated::OnAdd;
}

/// Hook for applications whose user type carries more than the stock columns.
/// Runs after the base `Users` registration.
pub trait UserShape {
    fn configure(_user: &mut EntityBuilder<'_>) {}
}

/// Same as [`UserShape`], for `Roles`.
pub trait RoleShape {
    fn configure(_role: &mut EntityBuilder<'_>) {}
}

impl UserShape for crate::core::models::User {}

impl RoleShape for crate::core::models::Role {}

const NAME_LENGTH: usize = 256;
const PROVIDER_KEY_LENGTH: usize = 128;

fn key_property<K: IdentityKey>(entity: &mut EntityBuilder<'_>, name: &str) {
    entity
        .property(name, K::COLUMN_TYPE)
        .required()
        .value_generated(K::GENERATED);
}

fn foreign_key_property<K: IdentityKey>(entity: &mut EntityBuilder<'_>, name: &str) {
    entity.property(name, K::COLUMN_TYPE).required();
}

fn claim_columns(entity: &mut EntityBuilder<'_>) {
    entity
        .property("Id", ColumnType::Integer)
        .value_generated_on_add();
    entity.property("ClaimType", ColumnType::Text);
    entity.property("ClaimValue", ColumnType::Text);
    entity.has_key(&["Id"]);
}

pub(super) fn register<K, U, R>(model: &mut Model)
where
    K: IdentityKey,
    U: UserShape,
    R: RoleShape,
{
    use ColumnType::*;

    model.entity("User", |user| {
        user.to_table("Users");

        key_property::<K>(user, "Id");
        user.property("UserName", Text).max_length(NAME_LENGTH);
        user.property("NormalizedUserName", Text).max_length(NAME_LENGTH);
        user.property("Email", Text).max_length(NAME_LENGTH);
        user.property("NormalizedEmail", Text).max_length(NAME_LENGTH);
        user.property("EmailConfirmed", Boolean);
        user.property("PasswordHash", Text);
        user.property("SecurityStamp", Text);
        user.property("ConcurrencyStamp", Text);
        user.property("PhoneNumber", Text);
        user.property("PhoneNumberConfirmed", Boolean);
        user.property("TwoFactorEnabled", Boolean);
        user.property("LockoutEnd", TimestampTz).optional();
        user.property("LockoutEnabled", Boolean);
        user.property("AccessFailedCount", Integer);

        user.has_key(&["Id"]);

        user.has_index(&["NormalizedUserName"])
            .named("UserNameIndex")
            .unique();
        user.has_index(&["NormalizedEmail"]).named("EmailIndex");

        for dependent in &["UserClaim", "UserLogin", "UserToken", "UserRole"] {
            user.has_many(dependent)
                .with_foreign_key(&["UserId"])
                .required()
                .on_delete(OnDelete::Cascade);
        }

        U::configure(user);
    });

    model.entity("Role", |role| {
        role.to_table("Roles");

        key_property::<K>(role, "Id");
        role.property("Name", Text).max_length(NAME_LENGTH);
        role.property("NormalizedName", Text).max_length(NAME_LENGTH);
        role.property("ConcurrencyStamp", Text);

        role.has_key(&["Id"]);

        role.has_index(&["NormalizedName"])
            .named("RoleNameIndex")
            .unique();

        for dependent in &["UserRole", "RoleClaim"] {
            role.has_many(dependent)
                .with_foreign_key(&["RoleId"])
                .required()
                .on_delete(OnDelete::Cascade);
        }

        R::configure(role);
    });

    model.entity("UserRole", |user_role| {
        user_role.to_table("UserRoles");

        foreign_key_property::<K>(user_role, "UserId");
        foreign_key_property::<K>(user_role, "RoleId");

        user_role.has_key(&["UserId", "RoleId"]);
    });

    model.entity("UserClaim", |claim| {
        claim.to_table("UserClaims");

        claim_columns(claim);
        foreign_key_property::<K>(claim, "UserId");
    });

    model.entity("UserLogin", |login| {
        login.to_table("UserLogins");

        login
            .property("LoginProvider", Text)
            .max_length(PROVIDER_KEY_LENGTH)
            .required();
        login
            .property("ProviderKey", Text)
            .max_length(PROVIDER_KEY_LENGTH)
            .required();
        login.property("ProviderDisplayName", Text);
        foreign_key_property::<K>(login, "UserId");

        login.has_key(&["LoginProvider", "ProviderKey"]);
    });

    model.entity("UserToken", |token| {
        token.to_table("UserTokens");

        foreign_key_property::<K>(token, "UserId");
        token
            .property("LoginProvider", Text)
            .max_length(PROVIDER_KEY_LENGTH)
            .required();
        token
            .property("Name", Text)
            .max_length(PROVIDER_KEY_LENGTH)
            .required();
        token.property("Value", Text);

        token.has_key(&["UserId", "LoginProvider", "Name"]);
    });

    model.entity("RoleClaim", |claim| {
        claim.to_table("RoleClaims");

        claim_columns(claim);
        foreign_key_property::<K>(claim, "RoleId");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Role, User};
    use crate::mapping::build;

    struct StaffUser;

    impl UserShape for StaffUser {
        fn configure(user: &mut EntityBuilder<'_>) {
            user.property("Department", ColumnType::Text).max_length(100);
        }
    }

    #[test]
    fn key_type_follows_identifier() {
        let text = build::<String, User, Role>();
        let users = text.table("Users").expect("users");
        let id = users.column("Id").expect("id");
        assert_eq!(id.column_type, ColumnType::Text);
        assert_eq!(id.generated, ValueGenerated::Never);

        let wide = build::<i64, User, Role>();
        let roles = wide.table("Roles").expect("roles");
        let id = roles.column("Id").expect("id");
        assert_eq!(id.column_type, ColumnType::BigInt);
        assert_eq!(id.generated, ValueGenerated::OnAdd);

        let user_roles = wide.table("UserRoles").expect("user roles");
        let role_id = user_roles.column("RoleId").expect("role id");
        assert_eq!(role_id.column_type, ColumnType::BigInt);
        assert_eq!(role_id.generated, ValueGenerated::Never);
    }

    #[test]
    fn user_shape_adds_columns() {
        let model = build::<String, StaffUser, Role>();
        let users = model.table("Users").expect("users");
        assert_eq!(
            users.column("Department").and_then(|c| c.max_length),
            Some(100)
        );
        assert_eq!(model.validate(), Ok(()));
    }

    #[test]
    fn user_children_cascade() {
        let model = build::<String, User, Role>();
        let dependents: Vec<&str> = model
            .relationships_from("User")
            .inspect(|r| assert_eq!(r.on_delete, OnDelete::Cascade))
            .map(|r| r.dependent.as_str())
            .collect();
        assert_eq!(dependents, ["UserClaim", "UserLogin", "UserToken", "UserRole"]);
    }
}
