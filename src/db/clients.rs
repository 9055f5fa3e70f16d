use std::collections::BTreeMap;

use diesel::dsl::exists;
use diesel::prelude::*;

use crate::core::models::{now, Claim, Client, ClientSummary, Secret};
use crate::core::types::ClientId;
use crate::store::ClientStore;
use crate::Error;

use super::models::{self, ClientRecord, ClientRow};
use super::schema;
use super::DbStore;

sql_function!(fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text);

fn load_client(conn: &PgConnection, row: ClientRow) -> Result<Client, Error> {
    let mut client = row.into_client();
    let id = client.id;

    client.allowed_grant_types = {
        use schema::client_grant_types::dsl::{self, client_grant_types};
        client_grant_types
            .filter(dsl::client_id.eq(id))
            .order(dsl::id)
            .select(dsl::grant_type)
            .load(conn)?
    };

    client.redirect_uris = {
        use schema::client_redirect_uris::dsl::{self, client_redirect_uris};
        client_redirect_uris
            .filter(dsl::client_id.eq(id))
            .order(dsl::id)
            .select(dsl::redirect_uri)
            .load(conn)?
    };

    client.post_logout_redirect_uris = {
        use schema::client_post_logout_redirect_uris::dsl::{self, client_post_logout_redirect_uris};
        client_post_logout_redirect_uris
            .filter(dsl::client_id.eq(id))
            .order(dsl::id)
            .select(dsl::post_logout_redirect_uri)
            .load(conn)?
    };

    client.allowed_scopes = {
        use schema::client_scopes::dsl::{self, client_scopes};
        client_scopes
            .filter(dsl::client_id.eq(id))
            .order(dsl::id)
            .select(dsl::scope)
            .load(conn)?
    };

    client.client_secrets = {
        use schema::client_secrets::dsl::{self, client_secrets};
        client_secrets
            .filter(dsl::client_id.eq(id))
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

    client.claims = {
        use schema::client_claims::dsl::{self, client_claims};
        client_claims
            .filter(dsl::client_id.eq(id))
            .order(dsl::id)
            .select((dsl::type_, dsl::value))
            .load::<(String, String)>(conn)?
            .into_iter()
            .map(|(claim_type, value)| Claim { claim_type, value })
            .collect()
    };

    client.identity_provider_restrictions = {
        use schema::client_idp_restrictions::dsl::{self, client_idp_restrictions};
        client_idp_restrictions
            .filter(dsl::client_id.eq(id))
            .order(dsl::id)
            .select(dsl::provider)
            .load(conn)?
    };

    client.allowed_cors_origins = {
        use schema::client_cors_origins::dsl::{self, client_cors_origins};
        client_cors_origins
            .filter(dsl::client_id.eq(id))
            .order(dsl::id)
            .select(dsl::origin)
            .load(conn)?
    };

    client.properties = {
        use schema::client_properties::dsl::{self, client_properties};
        client_properties
            .filter(dsl::client_id.eq(id))
            .select((dsl::key, dsl::value))
            .load::<(String, String)>(conn)?
            .into_iter()
            .collect::<BTreeMap<_, _>>()
    };

    Ok(client)
}

fn find_row(conn: &PgConnection, client_id: &ClientId) -> Result<Option<ClientRow>, Error> {
    use schema::clients::dsl::{self, clients};

    Ok(clients
        .filter(dsl::client_id.eq(&client_id.0))
        .first::<ClientRow>(conn)
        .optional()?)
}

fn insert_collections(conn: &PgConnection, id: i32, client: &Client) -> Result<(), Error> {
    if !client.allowed_grant_types.is_empty() {
        let rows: Vec<_> = client
            .allowed_grant_types
            .iter()
            .map(|grant_type| models::NewClientGrantType {
                grant_type,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_grant_types::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.redirect_uris.is_empty() {
        let rows: Vec<_> = client
            .redirect_uris
            .iter()
            .map(|redirect_uri| models::NewClientRedirectUri {
                redirect_uri,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_redirect_uris::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.post_logout_redirect_uris.is_empty() {
        let rows: Vec<_> = client
            .post_logout_redirect_uris
            .iter()
            .map(|post_logout_redirect_uri| models::NewClientPostLogoutRedirectUri {
                post_logout_redirect_uri,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_post_logout_redirect_uris::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.allowed_scopes.is_empty() {
        let rows: Vec<_> = client
            .allowed_scopes
            .iter()
            .map(|scope| models::NewClientScope {
                scope,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_scopes::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.client_secrets.is_empty() {
        let rows: Vec<_> = client
            .client_secrets
            .iter()
            .map(|secret| models::NewClientSecret::new(secret, id))
            .collect();
        diesel::insert_into(schema::client_secrets::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.claims.is_empty() {
        let rows: Vec<_> = client
            .claims
            .iter()
            .map(|claim| models::NewClientClaim {
                type_: &claim.claim_type,
                value: &claim.value,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_claims::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.identity_provider_restrictions.is_empty() {
        let rows: Vec<_> = client
            .identity_provider_restrictions
            .iter()
            .map(|provider| models::NewClientIdPRestriction {
                provider,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_idp_restrictions::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.allowed_cors_origins.is_empty() {
        let rows: Vec<_> = client
            .allowed_cors_origins
            .iter()
            .map(|origin| models::NewClientCorsOrigin {
                origin,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_cors_origins::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !client.properties.is_empty() {
        let rows: Vec<_> = client
            .properties
            .iter()
            .map(|(key, value)| models::NewClientProperty {
                key,
                value,
                client_id: id,
            })
            .collect();
        diesel::insert_into(schema::client_properties::table)
            .values(&rows)
            .execute(conn)?;
    }

    Ok(())
}

fn delete_collections(conn: &PgConnection, id: i32) -> Result<(), Error> {
    {
        use schema::client_grant_types::dsl::{self, client_grant_types};
        diesel::delete(client_grant_types.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    {
        use schema::client_redirect_uris::dsl::{self, client_redirect_uris};
        diesel::delete(client_redirect_uris.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    {
        use schema::client_post_logout_redirect_uris::dsl::{self, client_post_logout_redirect_uris};
        diesel::delete(client_post_logout_redirect_uris.filter(dsl::client_id.eq(id)))
            .execute(conn)?;
    }
    {
        use schema::client_scopes::dsl::{self, client_scopes};
        diesel::delete(client_scopes.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    {
        use schema::client_secrets::dsl::{self, client_secrets};
        diesel::delete(client_secrets.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    {
        use schema::client_claims::dsl::{self, client_claims};
        diesel::delete(client_claims.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    {
        use schema::client_idp_restrictions::dsl::{self, client_idp_restrictions};
        diesel::delete(client_idp_restrictions.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    {
        use schema::client_cors_origins::dsl::{self, client_cors_origins};
        diesel::delete(client_cors_origins.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    {
        use schema::client_properties::dsl::{self, client_properties};
        diesel::delete(client_properties.filter(dsl::client_id.eq(id))).execute(conn)?;
    }
    Ok(())
}

impl DbStore {
    fn check_client(&self, client: &Client) -> Result<(), Error> {
        self.check(&ClientRecord::from(client))?;
        self.check_values("ClientGrantType", "GrantType", &client.allowed_grant_types)?;
        self.check_values("ClientRedirectUri", "RedirectUri", &client.redirect_uris)?;
        self.check_values(
            "ClientPostLogoutRedirectUri",
            "PostLogoutRedirectUri",
            &client.post_logout_redirect_uris,
        )?;
        self.check_values("ClientScope", "Scope", &client.allowed_scopes)?;
        self.check_values(
            "ClientIdPRestriction",
            "Provider",
            &client.identity_provider_restrictions,
        )?;
        self.check_values("ClientCorsOrigin", "Origin", &client.allowed_cors_origins)?;

        for secret in &client.client_secrets {
            self.check(&models::NewClientSecret::new(secret, client.id))?;
        }
        for claim in &client.claims {
            self.check(&models::NewClientClaim {
                type_: &claim.claim_type,
                value: &claim.value,
                client_id: client.id,
            })?;
        }
        for (key, value) in &client.properties {
            self.check(&models::NewClientProperty {
                key,
                value,
                client_id: client.id,
            })?;
        }
        Ok(())
    }
}

impl ClientStore for DbStore {
    fn find_client_by_id(&self, client_id: &ClientId) -> Result<Option<Client>, Error> {
        self.run(|conn| match find_row(conn, client_id)? {
            Some(row) => Ok(Some(load_client(conn, row)?)),
            None => Ok(None),
        })
    }

    #[tracing::instrument(skip_all, fields(client_id = %client.client_id.0))]
    fn put_client(&self, client: &Client) -> Result<Client, Error> {
        use schema::clients::dsl::{self, clients};

        self.check_client(client)?;

        let stored = self.transaction(|conn| {
            let id = diesel::insert_into(clients)
                .values(&ClientRecord::from(client))
                .returning(dsl::id)
                .get_result::<i32>(conn)?;

            insert_collections(conn, id, client)?;

            let row = clients.find(id).first::<ClientRow>(conn)?;
            load_client(conn, row)
        })?;

        tracing::info!(client_id = %stored.client_id.0, id = stored.id, "Stored client");
        Ok(stored)
    }

    #[tracing::instrument(skip_all, fields(client_id = %client.client_id.0))]
    fn update_client(&self, client: &Client) -> Result<Client, Error> {
        use schema::clients::dsl::clients;

        let mut client = client.clone();
        client.updated = Some(now());
        self.check_client(&client)?;

        let updated = self.transaction(|conn| {
            let id = find_row(conn, &client.client_id)?
                .ok_or(Error::NotFound("client"))?
                .id;

            diesel::update(clients.find(id))
                .set(&ClientRecord::from(&client))
                .execute(conn)?;

            delete_collections(conn, id)?;
            insert_collections(conn, id, &client)?;

            let row = clients.find(id).first::<ClientRow>(conn)?;
            load_client(conn, row)
        })?;

        tracing::info!(client_id = %updated.client_id.0, "Updated client");
        Ok(updated)
    }

    #[tracing::instrument(skip_all, fields(client_id = %client_id.0))]
    fn delete_client(&self, client_id: &ClientId) -> Result<(), Error> {
        use schema::clients::dsl::{self, clients};

        let deleted = self.run(|conn| {
            Ok(diesel::delete(clients.filter(dsl::client_id.eq(&client_id.0))).execute(conn)?)
        })?;

        if deleted == 0 {
            return Err(Error::NotFound("client"));
        }

        tracing::info!(client_id = %client_id.0, "Deleted client");
        Ok(())
    }

    fn list_clients(&self) -> Result<Vec<ClientSummary>, Error> {
        use schema::clients::dsl::{self, clients};

        let rows = self.run(|conn| {
            Ok(clients
                .order(dsl::client_id)
                .select((dsl::client_id, dsl::client_name, dsl::enabled))
                .load::<(String, Option<String>, bool)>(conn)?)
        })?;

        Ok(rows
            .into_iter()
            .map(|(client_id, client_name, enabled)| ClientSummary {
                client_id: ClientId(client_id),
                client_name,
                enabled,
            })
            .collect())
    }

    fn is_origin_allowed(&self, origin: &str) -> Result<bool, Error> {
        use schema::client_cors_origins::dsl::{self, client_cors_origins};

        let origin = origin.to_lowercase();
        self.run(|conn| {
            Ok(diesel::select(exists(
                client_cors_origins.filter(lower(dsl::origin).eq(&origin)),
            ))
            .get_result::<bool>(conn)?)
        })
    }
}
