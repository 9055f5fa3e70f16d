use diesel::pg::Pg;
use diesel::prelude::*;

use crate::core::models::{GrantFilter, PersistedGrant};
use crate::core::types::GrantKey;
use crate::store::PersistedGrantStore;
use crate::Error;

use super::models::PersistedGrantRow;
use super::schema;
use super::DbStore;

type FilteredGrants<'a> = schema::persisted_grants::BoxedQuery<'a, Pg>;

fn filtered(filter: &GrantFilter) -> Result<FilteredGrants<'_>, Error> {
    use schema::persisted_grants::dsl;

    if filter.is_empty() {
        return Err(Error::EmptyFilter);
    }

    let mut query = dsl::persisted_grants.into_boxed();
    if let Some(subject_id) = &filter.subject_id {
        query = query.filter(dsl::subject_id.eq(subject_id));
    }
    if let Some(client_id) = &filter.client_id {
        query = query.filter(dsl::client_id.eq(&client_id.0));
    }
    if let Some(grant_type) = &filter.grant_type {
        query = query.filter(dsl::type_.eq(grant_type));
    }
    Ok(query)
}

impl PersistedGrantStore for DbStore {
    fn store(&self, grant: &PersistedGrant) -> Result<(), Error> {
        use schema::persisted_grants::dsl::{self, persisted_grants};

        let row = PersistedGrantRow::from(grant);
        self.check(&row)?;

        self.run(|conn| {
            diesel::insert_into(persisted_grants)
                .values(&row)
                .on_conflict(dsl::key)
                .do_update()
                .set(&row)
                .execute(conn)?;
            Ok(())
        })?;

        tracing::debug!(grant_type = %grant.grant_type, client_id = %grant.client_id.0, "Stored grant");
        Ok(())
    }

    fn get(&self, key: &GrantKey) -> Result<Option<PersistedGrant>, Error> {
        use schema::persisted_grants::dsl::persisted_grants;

        let row = self.run(|conn| {
            Ok(persisted_grants
                .find(&key.0)
                .first::<PersistedGrantRow>(conn)
                .optional()?)
        })?;

        Ok(row.map(PersistedGrant::from))
    }

    fn get_all(&self, filter: &GrantFilter) -> Result<Vec<PersistedGrant>, Error> {
        use schema::persisted_grants::dsl;

        let query = filtered(filter)?;
        let rows = self.run(|conn| {
            Ok(query
                .order(dsl::creation_time)
                .load::<PersistedGrantRow>(conn)?)
        })?;

        Ok(rows.into_iter().map(PersistedGrant::from).collect())
    }

    fn remove(&self, key: &GrantKey) -> Result<(), Error> {
        use schema::persisted_grants::dsl::persisted_grants;

        self.run(|conn| {
            diesel::delete(persisted_grants.find(&key.0)).execute(conn)?;
            Ok(())
        })
    }

    #[tracing::instrument(skip(self))]
    fn remove_all(&self, filter: &GrantFilter) -> Result<usize, Error> {
        use schema::persisted_grants::dsl::{self, persisted_grants};

        let query = filtered(filter)?;
        let removed = self.transaction(|conn| {
            let keys = query.select(dsl::key).load::<String>(conn)?;
            if keys.is_empty() {
                return Ok(0);
            }
            Ok(diesel::delete(persisted_grants.filter(dsl::key.eq_any(&keys))).execute(conn)?)
        })?;

        tracing::debug!(removed, "Removed grants");
        Ok(removed)
    }
}
