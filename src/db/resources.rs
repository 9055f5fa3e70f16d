use std::collections::BTreeMap;

use diesel::prelude::*;

use crate::core::models::{ApiResource, ApiScope, IdentityResource, Resources, Secret};
use crate::store::ResourceStore;
use crate::Error;

use super::models::{
    self, ApiResourceRecord, ApiResourceRow, ApiScopeRecord, ApiScopeRow,
    IdentityResourceRecord, IdentityResourceRow,
};
use super::schema;
use super::DbStore;

fn load_identity_resource(
    conn: &PgConnection,
    row: IdentityResourceRow,
) -> Result<IdentityResource, Error> {
    let mut resource = row.into_resource();
    let id = resource.id;

    resource.user_claims = {
        use schema::identity_claims::dsl::{self, identity_claims};
        identity_claims
            .filter(dsl::identity_resource_id.eq(id))
            .order(dsl::id)
            .select(dsl::type_)
            .load(conn)?
    };

    resource.properties = {
        use schema::identity_resource_properties::dsl::{self, identity_resource_properties};
        identity_resource_properties
            .filter(dsl::identity_resource_id.eq(id))
            .select((dsl::key, dsl::value))
            .load::<(String, String)>(conn)?
            .into_iter()
            .collect::<BTreeMap<_, _>>()
    };

    Ok(resource)
}

fn load_api_scope(conn: &PgConnection, row: ApiScopeRow) -> Result<ApiScope, Error> {
    use schema::api_scope_claims::dsl::{self, api_scope_claims};

    let mut scope = row.into_scope();
    scope.user_claims = api_scope_claims
        .filter(dsl::api_scope_id.eq(scope.id))
        .order(dsl::id)
        .select(dsl::type_)
        .load(conn)?;
    Ok(scope)
}

fn load_api_resource(conn: &PgConnection, row: ApiResourceRow) -> Result<ApiResource, Error> {
    let mut resource = row.into_resource();
    let id = resource.id;

    resource.secrets = {
        use schema::api_secrets::dsl::{self, api_secrets};
        api_secrets
            .filter(dsl::api_resource_id.eq(id))
            .order(dsl::id)
            .select((
                dsl::description,
                dsl::value,
                dsl::expiration,
                dsl::type_,
                dsl::created,
            ))
            .load::<models::SecretRow>(conn)?
            .into_iter()
            .map(Secret::from)
            .collect()
    };

    resource.scopes = {
        use schema::api_scopes::dsl::{self, api_scopes};
        api_scopes
            .filter(dsl::api_resource_id.eq(id))
            .order(dsl::id)
            .load::<ApiScopeRow>(conn)?
            .into_iter()
            .map(|row| load_api_scope(conn, row))
            .collect::<Result<Vec<_>, _>>()?
    };

    resource.user_claims = {
        use schema::api_resource_claims::dsl::{self, api_resource_claims};
        api_resource_claims
            .filter(dsl::api_resource_id.eq(id))
            .order(dsl::id)
            .select(dsl::type_)
            .load(conn)?
    };

    resource.properties = {
        use schema::api_resource_properties::dsl::{self, api_resource_properties};
        api_resource_properties
            .filter(dsl::api_resource_id.eq(id))
            .select((dsl::key, dsl::value))
            .load::<(String, String)>(conn)?
            .into_iter()
            .collect::<BTreeMap<_, _>>()
    };

    Ok(resource)
}

fn load_api_resources(conn: &PgConnection, rows: Vec<ApiResourceRow>) -> Result<Vec<ApiResource>, Error> {
    rows.into_iter()
        .map(|row| load_api_resource(conn, row))
        .collect()
}

fn load_identity_resources(
    conn: &PgConnection,
    rows: Vec<IdentityResourceRow>,
) -> Result<Vec<IdentityResource>, Error> {
    rows.into_iter()
        .map(|row| load_identity_resource(conn, row))
        .collect()
}

fn insert_api_scope(conn: &PgConnection, scope: &ApiScope, api_resource_id: i32) -> Result<(), Error> {
    use schema::api_scopes::dsl::{self, api_scopes};

    let scope_id = diesel::insert_into(api_scopes)
        .values(&ApiScopeRecord::new(scope, api_resource_id))
        .returning(dsl::id)
        .get_result::<i32>(conn)?;

    if !scope.user_claims.is_empty() {
        let rows: Vec<_> = scope
            .user_claims
            .iter()
            .map(|type_| models::NewApiScopeClaim {
                type_,
                api_scope_id: scope_id,
            })
            .collect();
        diesel::insert_into(schema::api_scope_claims::table)
            .values(&rows)
            .execute(conn)?;
    }

    Ok(())
}

impl DbStore {
    fn check_identity_resource(&self, resource: &IdentityResource) -> Result<(), Error> {
        self.check(&IdentityResourceRecord::from(resource))?;
        self.check_values("IdentityClaim", "Type", &resource.user_claims)?;
        for (key, value) in &resource.properties {
            self.check(&models::NewIdentityResourceProperty {
                key,
                value,
                identity_resource_id: resource.id,
            })?;
        }
        Ok(())
    }

    fn check_api_resource(&self, resource: &ApiResource) -> Result<(), Error> {
        self.check(&ApiResourceRecord::from(resource))?;
        self.check_values("ApiResourceClaim", "Type", &resource.user_claims)?;
        for secret in &resource.secrets {
            self.check(&models::NewApiSecret::new(secret, resource.id))?;
        }
        for scope in &resource.scopes {
            self.check(&ApiScopeRecord::new(scope, resource.id))?;
            self.check_values("ApiScopeClaim", "Type", &scope.user_claims)?;
        }
        for (key, value) in &resource.properties {
            self.check(&models::NewApiResourceProperty {
                key,
                value,
                api_resource_id: resource.id,
            })?;
        }
        Ok(())
    }
}

impl ResourceStore for DbStore {
    fn find_identity_resources_by_scope_name(
        &self,
        scope_names: &[String],
    ) -> Result<Vec<IdentityResource>, Error> {
        use schema::identity_resources::dsl::{self, identity_resources};

        self.run(|conn| {
            let rows = identity_resources
                .filter(dsl::name.eq_any(scope_names))
                .order(dsl::name)
                .load::<IdentityResourceRow>(conn)?;
            load_identity_resources(conn, rows)
        })
    }

    fn find_api_scopes_by_name(&self, scope_names: &[String]) -> Result<Vec<ApiScope>, Error> {
        use schema::api_scopes::dsl::{self, api_scopes};

        self.run(|conn| {
            api_scopes
                .filter(dsl::name.eq_any(scope_names))
                .order(dsl::name)
                .load::<ApiScopeRow>(conn)?
                .into_iter()
                .map(|row| load_api_scope(conn, row))
                .collect()
        })
    }

    fn find_api_resources_by_scope_name(
        &self,
        scope_names: &[String],
    ) -> Result<Vec<ApiResource>, Error> {
        use schema::api_resources::dsl::{self, api_resources};
        use schema::api_scopes::dsl as scopes;

        self.run(|conn| {
            let ids = scopes::api_scopes
                .filter(scopes::name.eq_any(scope_names))
                .select(scopes::api_resource_id)
                .distinct()
                .load::<i32>(conn)?;

            let rows = api_resources
                .filter(dsl::id.eq_any(ids))
                .order(dsl::name)
                .load::<ApiResourceRow>(conn)?;
            load_api_resources(conn, rows)
        })
    }

    fn find_api_resource_by_name(&self, name: &str) -> Result<Option<ApiResource>, Error> {
        use schema::api_resources::dsl::{self, api_resources};

        self.run(|conn| {
            let row = api_resources
                .filter(dsl::name.eq(name))
                .first::<ApiResourceRow>(conn)
                .optional()?;
            row.map(|row| load_api_resource(conn, row)).transpose()
        })
    }

    fn get_all_resources(&self) -> Result<Resources, Error> {
        use schema::api_resources::dsl as api;
        use schema::identity_resources::dsl as identity;

        self.run(|conn| {
            let identity_rows = identity::identity_resources
                .order(identity::name)
                .load::<IdentityResourceRow>(conn)?;
            let api_rows = api::api_resources
                .order(api::name)
                .load::<ApiResourceRow>(conn)?;

            Ok(Resources {
                identity_resources: load_identity_resources(conn, identity_rows)?,
                api_resources: load_api_resources(conn, api_rows)?,
            })
        })
    }

    fn put_identity_resource(&self, resource: &IdentityResource) -> Result<IdentityResource, Error> {
        use schema::identity_resources::dsl::{self, identity_resources};

        self.check_identity_resource(resource)?;

        let stored = self.transaction(|conn| {
            let id = diesel::insert_into(identity_resources)
                .values(&IdentityResourceRecord::from(resource))
                .returning(dsl::id)
                .get_result::<i32>(conn)?;

            if !resource.user_claims.is_empty() {
                let rows: Vec<_> = resource
                    .user_claims
                    .iter()
                    .map(|type_| models::NewIdentityClaim {
                        type_,
                        identity_resource_id: id,
                    })
                    .collect();
                diesel::insert_into(schema::identity_claims::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            if !resource.properties.is_empty() {
                let rows: Vec<_> = resource
                    .properties
                    .iter()
                    .map(|(key, value)| models::NewIdentityResourceProperty {
                        key,
                        value,
                        identity_resource_id: id,
                    })
                    .collect();
                diesel::insert_into(schema::identity_resource_properties::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            let row = identity_resources
                .find(id)
                .first::<IdentityResourceRow>(conn)?;
            load_identity_resource(conn, row)
        })?;

        tracing::info!(name = %stored.name, "Stored identity resource");
        Ok(stored)
    }

    fn put_api_resource(&self, resource: &ApiResource) -> Result<ApiResource, Error> {
        use schema::api_resources::dsl::{self, api_resources};

        self.check_api_resource(resource)?;

        let stored = self.transaction(|conn| {
            let id = diesel::insert_into(api_resources)
                .values(&ApiResourceRecord::from(resource))
                .returning(dsl::id)
                .get_result::<i32>(conn)?;

            if !resource.secrets.is_empty() {
                let rows: Vec<_> = resource
                    .secrets
                    .iter()
                    .map(|secret| models::NewApiSecret::new(secret, id))
                    .collect();
                diesel::insert_into(schema::api_secrets::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            for scope in &resource.scopes {
                insert_api_scope(conn, scope, id)?;
            }

            if !resource.user_claims.is_empty() {
                let rows: Vec<_> = resource
                    .user_claims
                    .iter()
                    .map(|type_| models::NewApiResourceClaim {
                        type_,
                        api_resource_id: id,
                    })
                    .collect();
                diesel::insert_into(schema::api_resource_claims::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            if !resource.properties.is_empty() {
                let rows: Vec<_> = resource
                    .properties
                    .iter()
                    .map(|(key, value)| models::NewApiResourceProperty {
                        key,
                        value,
                        api_resource_id: id,
                    })
                    .collect();
                diesel::insert_into(schema::api_resource_properties::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            let row = api_resources.find(id).first::<ApiResourceRow>(conn)?;
            load_api_resource(conn, row)
        })?;

        tracing::info!(name = %stored.name, scopes = stored.scopes.len(), "Stored API resource");
        Ok(stored)
    }

    fn delete_identity_resource(&self, name: &str) -> Result<(), Error> {
        use schema::identity_resources::dsl::{self, identity_resources};

        let deleted = self.run(|conn| {
            Ok(diesel::delete(identity_resources.filter(dsl::name.eq(name))).execute(conn)?)
        })?;

        if deleted == 0 {
            return Err(Error::NotFound("identity resource"));
        }
        tracing::info!(name, "Deleted identity resource");
        Ok(())
    }

    fn delete_api_resource(&self, name: &str) -> Result<(), Error> {
        use schema::api_resources::dsl::{self, api_resources};

        let deleted = self.run(|conn| {
            Ok(diesel::delete(api_resources.filter(dsl::name.eq(name))).execute(conn)?)
        })?;

        if deleted == 0 {
            return Err(Error::NotFound("API resource"));
        }
        tracing::info!(name, "Deleted API resource");
        Ok(())
    }
}
