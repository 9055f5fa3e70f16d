use diesel::prelude::*;

use crate::core::models::DeviceAuthorization;
use crate::core::types::{DeviceCode, UserCode};
use crate::store::DeviceFlowStore;
use crate::Error;

use super::models::DeviceFlowCodeRow;
use super::schema;
use super::DbStore;

fn into_authorization(row: DeviceFlowCodeRow) -> Result<DeviceAuthorization, Error> {
    Ok(serde_json::from_str(&row.data)?)
}

impl DeviceFlowStore for DbStore {
    fn store_device_authorization(
        &self,
        device_code: &DeviceCode,
        user_code: &UserCode,
        authorization: &DeviceAuthorization,
    ) -> Result<(), Error> {
        use schema::device_flow_codes::dsl::device_flow_codes;

        let row = DeviceFlowCodeRow {
            device_code: device_code.0.clone(),
            user_code: user_code.0.clone(),
            subject_id: authorization.subject_id.clone(),
            client_id: authorization.client_id.0.clone(),
            creation_time: authorization.creation_time,
            expiration: authorization
                .expiration()
                .ok_or(Error::InvalidLifetime(authorization.lifetime))?,
            data: serde_json::to_string(authorization)?,
        };
        self.check(&row)?;

        self.run(|conn| {
            diesel::insert_into(device_flow_codes)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })?;

        tracing::debug!(client_id = %row.client_id, "Stored device authorization");
        Ok(())
    }

    fn find_by_user_code(&self, user_code: &UserCode) -> Result<Option<DeviceAuthorization>, Error> {
        use schema::device_flow_codes::dsl::device_flow_codes;

        let row = self.run(|conn| {
            Ok(device_flow_codes
                .find(&user_code.0)
                .first::<DeviceFlowCodeRow>(conn)
                .optional()?)
        })?;

        row.map(into_authorization).transpose()
    }

    fn find_by_device_code(
        &self,
        device_code: &DeviceCode,
    ) -> Result<Option<DeviceAuthorization>, Error> {
        use schema::device_flow_codes::dsl::{self, device_flow_codes};

        let row = self.run(|conn| {
            Ok(device_flow_codes
                .filter(dsl::device_code.eq(&device_code.0))
                .first::<DeviceFlowCodeRow>(conn)
                .optional()?)
        })?;

        row.map(into_authorization).transpose()
    }

    /// Records the outcome of the user's decision. Only the subject and the
    /// payload change; the codes and lifetimes are fixed at issue.
    #[tracing::instrument(skip_all, fields(client_id = %authorization.client_id.0))]
    fn update_by_user_code(
        &self,
        user_code: &UserCode,
        authorization: &DeviceAuthorization,
    ) -> Result<(), Error> {
        use schema::device_flow_codes::dsl::{self, device_flow_codes};

        let data = serde_json::to_string(authorization)?;
        self.model.check_value("DeviceFlowCodes", "Data", Some(&data))?;
        self.model.check_value(
            "DeviceFlowCodes",
            "SubjectId",
            authorization.subject_id.as_deref(),
        )?;

        let updated = self.run(|conn| {
            Ok(diesel::update(device_flow_codes.find(&user_code.0))
                .set((
                    dsl::subject_id.eq(&authorization.subject_id),
                    dsl::data.eq(&data),
                ))
                .execute(conn)?)
        })?;

        if updated == 0 {
            return Err(Error::NotFound("device code"));
        }
        tracing::debug!(authorized = authorization.is_authorized, "Updated device authorization");
        Ok(())
    }

    fn remove_by_device_code(&self, device_code: &DeviceCode) -> Result<(), Error> {
        use schema::device_flow_codes::dsl::{self, device_flow_codes};

        self.run(|conn| {
            diesel::delete(device_flow_codes.filter(dsl::device_code.eq(&device_code.0)))
                .execute(conn)?;
            Ok(())
        })
    }
}
