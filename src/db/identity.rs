use diesel::prelude::*;

use crate::core::models::{normalize, Claim, Role, User, UserLogin};
use crate::Error;

use super::models::{
    NewRoleClaim, NewUserClaim, NewUserLogin, RoleRow, UserRow, UserTokenRecord,
};
use super::schema;
use super::DbStore;

fn into_claims(rows: Vec<(Option<String>, Option<String>)>) -> Vec<Claim> {
    rows.into_iter()
        .map(|(claim_type, value)| Claim {
            claim_type: claim_type.unwrap_or_default(),
            value: value.unwrap_or_default(),
        })
        .collect()
}

/// User and role management over the identity tables.
impl DbStore {
    pub fn create_user(&self, user: &User) -> Result<(), Error> {
        use schema::users::dsl::users;

        let row = UserRow::from(user);
        self.check(&row)?;

        self.run(|conn| {
            diesel::insert_into(users).values(&row).execute(conn)?;
            Ok(())
        })?;

        tracing::info!(user_id = %user.id, "Created user");
        Ok(())
    }

    pub fn find_user_by_id(&self, id: &str) -> Result<Option<User>, Error> {
        use schema::users::dsl::users;

        let row = self.run(|conn| Ok(users.find(id).first::<UserRow>(conn).optional()?))?;
        Ok(row.map(User::from))
    }

    /// Looks the user up by normalized name, so any casing of the name
    /// matches.
    pub fn find_user_by_name(&self, user_name: &str) -> Result<Option<User>, Error> {
        use schema::users::dsl::{self, users};

        let normalized = normalize(user_name);
        let row = self.run(|conn| {
            Ok(users
                .filter(dsl::normalized_user_name.eq(&normalized))
                .first::<UserRow>(conn)
                .optional()?)
        })?;
        Ok(row.map(User::from))
    }

    pub fn update_user(&self, user: &User) -> Result<(), Error> {
        use schema::users::dsl::users;

        let row = UserRow::from(user);
        self.check(&row)?;

        let updated = self.run(|conn| {
            Ok(diesel::update(users.find(&row.id))
                .set(&row)
                .execute(conn)?)
        })?;

        if updated == 0 {
            return Err(Error::NotFound("user"));
        }
        Ok(())
    }

    /// Claims, logins, tokens and role memberships go with the user.
    pub fn delete_user(&self, id: &str) -> Result<(), Error> {
        use schema::users::dsl::users;

        let deleted = self.run(|conn| Ok(diesel::delete(users.find(id)).execute(conn)?))?;
        if deleted == 0 {
            return Err(Error::NotFound("user"));
        }

        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }

    pub fn create_role(&self, role: &Role) -> Result<(), Error> {
        use schema::roles::dsl::roles;

        let row = RoleRow::from(role);
        self.check(&row)?;

        self.run(|conn| {
            diesel::insert_into(roles).values(&row).execute(conn)?;
            Ok(())
        })
    }

    pub fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, Error> {
        use schema::roles::dsl::{self, roles};

        let normalized = normalize(name);
        let row = self.run(|conn| {
            Ok(roles
                .filter(dsl::normalized_name.eq(&normalized))
                .first::<RoleRow>(conn)
                .optional()?)
        })?;
        Ok(row.map(Role::from))
    }

    pub fn delete_role(&self, id: &str) -> Result<(), Error> {
        use schema::roles::dsl::roles;

        let deleted = self.run(|conn| Ok(diesel::delete(roles.find(id)).execute(conn)?))?;
        if deleted == 0 {
            return Err(Error::NotFound("role"));
        }
        Ok(())
    }

    pub fn add_to_role(&self, user_id: &str, role_id: &str) -> Result<(), Error> {
        use schema::user_roles::dsl::{self, user_roles};

        self.run(|conn| {
            diesel::insert_into(user_roles)
                .values((dsl::user_id.eq(user_id), dsl::role_id.eq(role_id)))
                .on_conflict_do_nothing()
                .execute(conn)?;
            Ok(())
        })
    }

    pub fn remove_from_role(&self, user_id: &str, role_id: &str) -> Result<(), Error> {
        use schema::user_roles::dsl::user_roles;

        self.run(|conn| {
            diesel::delete(user_roles.find((user_id, role_id))).execute(conn)?;
            Ok(())
        })
    }

    pub fn roles_of_user(&self, user_id: &str) -> Result<Vec<Role>, Error> {
        use schema::roles;
        use schema::user_roles;

        let rows = self.run(|conn| {
            Ok(user_roles::table
                .inner_join(roles::table)
                .filter(user_roles::user_id.eq(user_id))
                .order(roles::normalized_name)
                .select(roles::all_columns)
                .load::<RoleRow>(conn)?)
        })?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    pub fn add_user_claim(&self, user_id: &str, claim: &Claim) -> Result<(), Error> {
        use schema::user_claims::dsl::user_claims;

        self.run(|conn| {
            diesel::insert_into(user_claims)
                .values(&NewUserClaim {
                    claim_type: Some(&claim.claim_type),
                    claim_value: Some(&claim.value),
                    user_id,
                })
                .execute(conn)?;
            Ok(())
        })
    }

    pub fn user_claims(&self, user_id: &str) -> Result<Vec<Claim>, Error> {
        use schema::user_claims::dsl::{self, user_claims};

        let rows = self.run(|conn| {
            Ok(user_claims
                .filter(dsl::user_id.eq(user_id))
                .order(dsl::id)
                .select((dsl::claim_type, dsl::claim_value))
                .load::<(Option<String>, Option<String>)>(conn)?)
        })?;
        Ok(into_claims(rows))
    }

    pub fn add_role_claim(&self, role_id: &str, claim: &Claim) -> Result<(), Error> {
        use schema::role_claims::dsl::role_claims;

        self.run(|conn| {
            diesel::insert_into(role_claims)
                .values(&NewRoleClaim {
                    claim_type: Some(&claim.claim_type),
                    claim_value: Some(&claim.value),
                    role_id,
                })
                .execute(conn)?;
            Ok(())
        })
    }

    pub fn role_claims(&self, role_id: &str) -> Result<Vec<Claim>, Error> {
        use schema::role_claims::dsl::{self, role_claims};

        let rows = self.run(|conn| {
            Ok(role_claims
                .filter(dsl::role_id.eq(role_id))
                .order(dsl::id)
                .select((dsl::claim_type, dsl::claim_value))
                .load::<(Option<String>, Option<String>)>(conn)?)
        })?;
        Ok(into_claims(rows))
    }

    pub fn add_user_login(&self, user_id: &str, login: &UserLogin) -> Result<(), Error> {
        use schema::user_logins::dsl::user_logins;

        let row = NewUserLogin::new(login, user_id);
        self.check(&row)?;

        self.run(|conn| {
            diesel::insert_into(user_logins).values(&row).execute(conn)?;
            Ok(())
        })
    }

    pub fn find_user_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
    ) -> Result<Option<User>, Error> {
        use schema::user_logins;
        use schema::users;

        let row = self.run(|conn| {
            Ok(user_logins::table
                .inner_join(users::table)
                .filter(user_logins::login_provider.eq(login_provider))
                .filter(user_logins::provider_key.eq(provider_key))
                .select(users::all_columns)
                .first::<UserRow>(conn)
                .optional()?)
        })?;
        Ok(row.map(User::from))
    }

    /// Inserts or replaces the token stored under `(user, provider, name)`.
    pub fn set_user_token(
        &self,
        user_id: &str,
        login_provider: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), Error> {
        use schema::user_tokens::dsl::user_tokens;

        let record = UserTokenRecord {
            user_id,
            login_provider,
            name,
            value,
        };
        self.check(&record)?;

        self.transaction(|conn| {
            diesel::delete(user_tokens.find((user_id, login_provider, name))).execute(conn)?;
            diesel::insert_into(user_tokens).values(&record).execute(conn)?;
            Ok(())
        })
    }

    pub fn get_user_token(
        &self,
        user_id: &str,
        login_provider: &str,
        name: &str,
    ) -> Result<Option<String>, Error> {
        use schema::user_tokens::dsl::{self, user_tokens};

        let value = self.run(|conn| {
            Ok(user_tokens
                .find((user_id, login_provider, name))
                .select(dsl::value)
                .first::<Option<String>>(conn)
                .optional()?)
        })?;
        Ok(value.flatten())
    }
}
