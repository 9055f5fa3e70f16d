use super::{ColumnType::*, Model};

// Explicit so payloads are not truncated, yet rows stay below the ~65K row
// size limit of the smallest supported backends.
pub const DATA_LENGTH: usize = 50_000;

pub(super) fn register(model: &mut Model) {
    model.entity("PersistedGrant", |grant| {
        grant.to_table("PersistedGrants");

        grant
            .property("Key", Text)
            .max_length(200)
            .value_generated_never();
        grant.property("Type", Text).max_length(50).required();
        grant.property("SubjectId", Text).max_length(200);
        grant.property("ClientId", Text).max_length(200).required();
        grant.property("CreationTime", Timestamp).required();
        grant.property("Expiration", Timestamp).optional();
        grant
            .property("Data", Text)
            .max_length(DATA_LENGTH)
            .required();

        grant.has_key(&["Key"]);

        grant.has_index(&["SubjectId", "ClientId", "Type"]);
    });

    model.entity("DeviceFlowCodes", |codes| {
        codes.to_table("DeviceFlowCodes");

        codes.property("DeviceCode", Text).max_length(200).required();
        codes.property("UserCode", Text).max_length(200).required();
        codes.property("SubjectId", Text).max_length(200);
        codes.property("ClientId", Text).max_length(200).required();
        codes.property("CreationTime", Timestamp).required();
        codes.property("Expiration", Timestamp).required();
        codes
            .property("Data", Text)
            .max_length(DATA_LENGTH)
            .required();

        codes.has_key(&["UserCode"]);

        codes.has_index(&["DeviceCode"]).unique();
    });
}

#[cfg(test)]
mod tests {
    use super::DATA_LENGTH;
    use crate::mapping::{default_model, ValueGenerated};

    #[test]
    fn grants_are_keyed_by_caller_supplied_key() {
        let model = default_model();
        let grants = model.table("PersistedGrants").expect("grants");
        let key = grants.column("Key").expect("key");
        assert_eq!(grants.key(), ["Key".to_string()]);
        assert_eq!(key.generated, ValueGenerated::Never);
        assert_eq!(key.max_length, Some(200));
        assert!(grants.is_required(key));
        assert_eq!(
            grants.index_name(&grants.indexes()[0]),
            "IX_PersistedGrants_SubjectId_ClientId_Type"
        );
    }

    #[test]
    fn device_codes_are_keyed_by_user_code() {
        let model = default_model();
        let codes = model.table("DeviceFlowCodes").expect("device codes");
        assert_eq!(codes.key(), ["UserCode".to_string()]);
        let index = &codes.indexes()[0];
        assert!(index.is_unique());
        assert_eq!(index.columns(), ["DeviceCode".to_string()]);
        assert!(codes.column("Expiration").expect("expiration").required);
    }

    #[test]
    fn payloads_share_the_same_cap() {
        let model = default_model();
        for table in &["PersistedGrants", "DeviceFlowCodes"] {
            let data = model
                .table(table)
                .and_then(|t| t.column("Data"))
                .expect("data column");
            assert_eq!(data.max_length, Some(DATA_LENGTH));
            assert!(data.required);
        }
    }
}
