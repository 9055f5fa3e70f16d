mod common;

use chrono::Duration;
use diesel::prelude::*;
use diesel::PgConnection;
use identity_data::core::models::{
    now, ApiResource, Claim, Client, DeviceAuthorization, GrantFilter, IdentityResource,
    PersistedGrant, Role, Secret, User, UserLogin,
};
use identity_data::core::types::{ClientId, DeviceCode, GrantKey, HashedClientSecret, Scope, UserCode};
use identity_data::db::schema;
use identity_data::mapping::{
    default_model, ColumnType, ConstraintViolation, ValueGenerated, DATA_LENGTH,
};
use identity_data::store::{ClientStore, DeviceFlowStore, PersistedGrantStore, ResourceStore};
use identity_data::util::random::FromRandom;
use identity_data::Error;

fn grant(subject: &str, client_id: &ClientId, grant_type: &str) -> PersistedGrant {
    PersistedGrant {
        key: GrantKey::from_random(),
        grant_type: grant_type.to_string(),
        subject_id: Some(subject.to_string()),
        client_id: client_id.clone(),
        creation_time: now(),
        expiration: Some(now() + Duration::hours(1)),
        data: "{}".to_string(),
    }
}

fn full_client(client_id: &ClientId) -> Client {
    let mut client = Client::new(client_id.clone());
    client.client_name = Some("Web".to_string());
    client.allowed_grant_types = vec!["authorization_code".to_string()];
    client.redirect_uris = vec!["https://web.example.com/callback".to_string()];
    client.post_logout_redirect_uris = vec!["https://web.example.com/".to_string()];
    client.allowed_scopes = vec!["openid".to_string(), "profile".to_string()];
    client.client_secrets = vec![Secret::shared(HashedClientSecret("c2VjcmV0".to_string()))];
    client.claims = vec![Claim {
        claim_type: "tier".to_string(),
        value: "gold".to_string(),
    }];
    client.identity_provider_restrictions = vec!["Google".to_string()];
    client.allowed_cors_origins = vec!["https://web.example.com".to_string()];
    client.properties.insert("team".to_string(), "identity".to_string());
    client
}

#[test]
fn client_round_trips_with_collections() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("web"));
    let stored = store.put_client(&full_client(&client_id)).expect("client should store");
    assert!(stored.id > 0);

    let found = store
        .find_client_by_id(&client_id)
        .expect("lookup should succeed")
        .expect("client should exist");
    let mut scopes = found.allowed_scopes.clone();
    scopes.sort();
    assert_eq!(scopes, ["openid", "profile"]);
    assert_eq!(found.redirect_uris, ["https://web.example.com/callback"]);
    assert_eq!(found.client_secrets.len(), 1);
    assert_eq!(found.client_secrets[0].value, "c2VjcmV0");
    assert_eq!(found.claims[0].value, "gold");
    assert_eq!(found.properties.get("team").map(String::as_str), Some("identity"));

    let summaries = store.list_clients().expect("listing should succeed");
    assert!(summaries.iter().any(|s| s.client_id == client_id));

    store.delete_client(&client_id).expect("client should delete");
}

#[test]
fn duplicate_client_id_is_rejected() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("dup"));
    store
        .put_client(&Client::new(client_id.clone()))
        .expect("first client should store");

    let err = store
        .put_client(&Client::new(client_id.clone()))
        .expect_err("second client should be rejected");
    assert!(err.is_unique_violation(), "unexpected error: {}", err);

    store.delete_client(&client_id).expect("client should delete");
}

macro_rules! child_rows {
    ($conn:expr, $id:expr, $($table:ident),+) => {
        vec![$(
            (
                stringify!($table),
                schema::$table::table
                    .filter(schema::$table::client_id.eq($id))
                    .count()
                    .get_result::<i64>($conn)
                    .expect("count should succeed"),
            )
        ),+]
    };
}

fn client_child_rows(conn: &PgConnection, id: i32) -> Vec<(&'static str, i64)> {
    child_rows!(
        conn,
        id,
        client_grant_types,
        client_redirect_uris,
        client_post_logout_redirect_uris,
        client_scopes,
        client_secrets,
        client_claims,
        client_idp_restrictions,
        client_cors_origins,
        client_properties
    )
}

#[test]
fn deleting_a_client_removes_its_rows() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("cascade"));
    let stored = store.put_client(&full_client(&client_id)).expect("client should store");

    let conn = common::raw_connection();
    let before = client_child_rows(&conn, stored.id);
    assert_eq!(before.len(), 9);
    for (table, count) in &before {
        assert!(*count > 0, "{} has no rows for the client", table);
    }

    store.delete_client(&client_id).expect("client should delete");

    for (table, count) in client_child_rows(&conn, stored.id) {
        assert_eq!(count, 0, "{} kept rows of a deleted client", table);
    }

    assert!(store
        .find_client_by_id(&client_id)
        .expect("lookup should succeed")
        .is_none());
    assert!(store.delete_client(&client_id).unwrap_err().is_not_found());
}

#[test]
fn updating_a_client_replaces_its_collections() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("update"));
    let mut client = store.put_client(&full_client(&client_id)).expect("client should store");
    client.allowed_scopes = vec!["api".to_string()];
    client.redirect_uris.clear();

    let updated = store.update_client(&client).expect("client should update");
    assert_eq!(updated.allowed_scopes, ["api"]);
    assert!(updated.redirect_uris.is_empty());
    assert!(updated.updated.is_some());

    store.delete_client(&client_id).expect("client should delete");
}

#[test]
fn cors_origins_match_without_case() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("spa"));
    let origin = format!("https://{}.example.com", client_id.0);
    let mut client = Client::new(client_id.clone());
    client.allowed_cors_origins = vec![origin.to_uppercase()];
    store.put_client(&client).expect("client should store");

    assert!(store.is_origin_allowed(&origin).expect("check should succeed"));
    assert!(!store
        .is_origin_allowed("https://unknown.example.org")
        .expect("check should succeed"));

    store.delete_client(&client_id).expect("client should delete");
}

#[test]
fn duplicate_resource_name_is_rejected() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let name = common::unique("profile");
    let resource = IdentityResource::new(&name, &["name", "family_name"]);
    store
        .put_identity_resource(&resource)
        .expect("first resource should store");

    let err = store
        .put_identity_resource(&resource)
        .expect_err("second resource should be rejected");
    assert!(err.is_unique_violation(), "unexpected error: {}", err);

    store
        .delete_identity_resource(&name)
        .expect("resource should delete");
}

#[test]
fn resources_are_found_by_scope_name() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let identity_name = common::unique("email");
    store
        .put_identity_resource(&IdentityResource::new(&identity_name, &["email"]))
        .expect("identity resource should store");

    let api_name = common::unique("orders");
    let mut api = ApiResource::new(&api_name);
    api.user_claims = vec!["role".to_string()];
    store.put_api_resource(&api).expect("API resource should store");

    let identity = store
        .find_identity_resources_by_scope_name(&[identity_name.clone()])
        .expect("lookup should succeed");
    assert_eq!(identity.len(), 1);
    assert_eq!(identity[0].user_claims, ["email"]);

    let apis = store
        .find_api_resources_by_scope_name(&[api_name.clone()])
        .expect("lookup should succeed");
    assert_eq!(apis.len(), 1);
    assert_eq!(apis[0].name, api_name);

    let scopes = store
        .find_api_scopes_by_name(&[api_name.clone()])
        .expect("lookup should succeed");
    assert_eq!(scopes.len(), 1);

    let by_name = store
        .find_api_resource_by_name(&api_name)
        .expect("lookup should succeed")
        .expect("resource should exist");
    assert_eq!(by_name.user_claims, ["role"]);

    store
        .delete_identity_resource(&identity_name)
        .expect("identity resource should delete");
    store
        .delete_api_resource(&api_name)
        .expect("API resource should delete");
    assert!(store
        .find_api_resource_by_name(&api_name)
        .expect("lookup should succeed")
        .is_none());
}

#[test]
fn grant_payload_is_capped() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("cap"));
    let mut at_cap = grant("alice", &client_id, "refresh_token");
    at_cap.data = "x".repeat(DATA_LENGTH);
    store.store(&at_cap).expect("payload at the cap should store");
    let stored = store
        .get(&at_cap.key)
        .expect("lookup should succeed")
        .expect("grant should exist");
    assert_eq!(stored.data.len(), DATA_LENGTH);

    let mut over_cap = grant("alice", &client_id, "refresh_token");
    over_cap.data = "x".repeat(DATA_LENGTH + 1);
    match store.store(&over_cap) {
        Err(Error::Constraint(ConstraintViolation::TooLong { max_length, .. })) => {
            assert_eq!(max_length, DATA_LENGTH)
        }
        other => panic!("expected a length violation, got {:?}", other),
    }

    store.remove(&at_cap.key).expect("grant should remove");
}

/// An insert into `Clients` that fills every required column, except that
/// `null_column` is set to NULL.
fn client_insert(client_id: &str, null_column: Option<&str>) -> String {
    let model = default_model();
    let clients = model.table("Clients").expect("clients should be mapped");

    let mut columns = Vec::new();
    let mut values = Vec::new();
    for column in clients.columns() {
        if column.generated == ValueGenerated::OnAdd || !clients.is_required(column) {
            continue;
        }
        let value = if Some(column.name.as_str()) == null_column {
            "NULL".to_string()
        } else if column.name == "ClientId" {
            format!("'{}'", client_id)
        } else {
            match column.column_type {
                ColumnType::Text => "'x'".to_string(),
                ColumnType::Boolean => "true".to_string(),
                ColumnType::Integer | ColumnType::BigInt => "0".to_string(),
                ColumnType::Timestamp | ColumnType::TimestampTz => "now()".to_string(),
            }
        };
        columns.push(format!("\"{}\"", column.name));
        values.push(value);
    }

    format!(
        "INSERT INTO \"Clients\" ({}) VALUES ({})",
        columns.join(", "),
        values.join(", ")
    )
}

fn grant_insert(data: &str) -> String {
    format!(
        "INSERT INTO \"PersistedGrants\" (\"Key\", \"Type\", \"ClientId\", \"CreationTime\", \"Data\") \
         VALUES ('{}', 'code', 'web', now(), {})",
        common::unique("raw"),
        data
    )
}

fn device_code_insert(user_code: &str, data: &str) -> String {
    format!(
        "INSERT INTO \"DeviceFlowCodes\" (\"DeviceCode\", \"UserCode\", \"ClientId\", \"CreationTime\", \"Expiration\", \"Data\") \
         VALUES ('{}', '{}', 'tv', now(), now(), {})",
        common::unique("raw"),
        user_code,
        data
    )
}

#[test]
fn clients_reject_null_required_columns() {
    if common::store().is_none() {
        return;
    }
    let conn = common::raw_connection();

    let client_id = common::unique("raw");
    diesel::sql_query(client_insert(&client_id, None))
        .execute(&conn)
        .expect("a complete client row should insert");
    diesel::sql_query(format!(
        "DELETE FROM \"Clients\" WHERE \"ClientId\" = '{}'",
        client_id
    ))
    .execute(&conn)
    .expect("client row should delete");

    for column in &["ProtocolType", "ClientId"] {
        let err = diesel::sql_query(client_insert(&common::unique("raw"), Some(column)))
            .execute(&conn)
            .expect_err("a NULL required column should be rejected");
        assert!(
            err.to_string().contains(&format!("\"{}\"", column)),
            "unexpected error for {}: {}",
            column,
            err
        );
    }
}

#[test]
fn grant_payload_column_is_enforced() {
    if common::store().is_none() {
        return;
    }
    let conn = common::raw_connection();

    let at_cap = grant_insert(&format!("'{}'", "x".repeat(DATA_LENGTH)));
    diesel::sql_query(at_cap)
        .execute(&conn)
        .expect("payload at the cap should insert");

    let over_cap = grant_insert(&format!("'{}'", "x".repeat(DATA_LENGTH + 1)));
    assert!(diesel::sql_query(over_cap).execute(&conn).is_err());

    let err = diesel::sql_query(grant_insert("NULL"))
        .execute(&conn)
        .expect_err("NULL payload should be rejected");
    assert!(err.to_string().contains("\"Data\""), "unexpected error: {}", err);

    diesel::sql_query("DELETE FROM \"PersistedGrants\" WHERE \"ClientId\" = 'web' AND \"Key\" LIKE 'raw-%'")
        .execute(&conn)
        .expect("raw grants should delete");
}

#[test]
fn device_code_payload_column_is_enforced() {
    if common::store().is_none() {
        return;
    }
    let conn = common::raw_connection();

    let user_code = common::unique("raw");
    let at_cap = device_code_insert(&user_code, &format!("'{}'", "x".repeat(DATA_LENGTH)));
    diesel::sql_query(at_cap)
        .execute(&conn)
        .expect("payload at the cap should insert");

    let over_cap = device_code_insert(
        &common::unique("raw"),
        &format!("'{}'", "x".repeat(DATA_LENGTH + 1)),
    );
    assert!(diesel::sql_query(over_cap).execute(&conn).is_err());

    let err = diesel::sql_query(device_code_insert(&common::unique("raw"), "NULL"))
        .execute(&conn)
        .expect_err("NULL payload should be rejected");
    assert!(err.to_string().contains("\"Data\""), "unexpected error: {}", err);

    diesel::sql_query(format!(
        "DELETE FROM \"DeviceFlowCodes\" WHERE \"UserCode\" = '{}'",
        user_code
    ))
    .execute(&conn)
    .expect("raw device code should delete");
}

#[test]
fn out_of_range_device_lifetime_is_rejected() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let authorization = DeviceAuthorization::new(
        ClientId(common::unique("tv")),
        Scope::from_delimited_parts("api"),
        i64::MAX,
    );
    let user_code = UserCode(common::unique("code"));
    match store.store_device_authorization(&DeviceCode::from_random(), &user_code, &authorization) {
        Err(Error::InvalidLifetime(lifetime)) => assert_eq!(lifetime, i64::MAX),
        other => panic!("expected an invalid lifetime, got {:?}", other),
    }
    assert!(store
        .find_by_user_code(&user_code)
        .expect("lookup should succeed")
        .is_none());
}

#[test]
fn unknown_role_membership_is_a_foreign_key_violation() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let user_id = common::unique("user");
    store
        .create_user(&User::new(&user_id, &common::unique("dave")))
        .expect("user should store");

    let err = store
        .add_to_role(&user_id, &common::unique("no-such-role"))
        .expect_err("membership of an unknown role should be rejected");
    assert!(err.is_foreign_key_violation(), "unexpected error: {}", err);
    assert!(!err.is_unique_violation());

    store.delete_user(&user_id).expect("user should delete");
}

#[test]
fn grants_are_selected_by_filter() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let subject = common::unique("subject");
    let web = ClientId(common::unique("web"));
    let mobile = ClientId(common::unique("mobile"));
    let grants = vec![
        grant(&subject, &web, "refresh_token"),
        grant(&subject, &web, "user_consent"),
        grant(&subject, &mobile, "refresh_token"),
    ];
    for g in &grants {
        store.store(g).expect("grant should store");
    }

    let all = store
        .get_all(&GrantFilter::subject(&subject))
        .expect("lookup should succeed");
    assert_eq!(all.len(), 3);

    let web_grants = store
        .get_all(&GrantFilter::subject(&subject).client(&web))
        .expect("lookup should succeed");
    assert_eq!(web_grants.len(), 2);

    let refresh = store
        .get_all(&GrantFilter::subject(&subject).grant_type("refresh_token"))
        .expect("lookup should succeed");
    assert_eq!(refresh.len(), 2);

    assert!(matches!(
        store.get_all(&GrantFilter::default()),
        Err(Error::EmptyFilter)
    ));
    assert!(matches!(
        store.remove_all(&GrantFilter::default()),
        Err(Error::EmptyFilter)
    ));

    let removed = store
        .remove_all(&GrantFilter::subject(&subject).client(&web))
        .expect("removal should succeed");
    assert_eq!(removed, 2);
    assert!(store
        .get(&grants[0].key)
        .expect("lookup should succeed")
        .is_none());
    assert!(store
        .get(&grants[2].key)
        .expect("lookup should succeed")
        .is_some());

    store.remove(&grants[2].key).expect("grant should remove");
}

#[test]
fn storing_a_grant_twice_overwrites_it() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let mut g = grant("bob", &ClientId(common::unique("web")), "refresh_token");
    store.store(&g).expect("grant should store");
    g.data = "{\"rotated\":true}".to_string();
    store.store(&g).expect("grant should overwrite");

    let stored = store
        .get(&g.key)
        .expect("lookup should succeed")
        .expect("grant should exist");
    assert_eq!(stored.data, g.data);

    store.remove(&g.key).expect("grant should remove");
}

#[test]
fn expired_entries_are_cleaned_up() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("expiry"));
    let mut expired = grant("carol", &client_id, "authorization_code");
    expired.expiration = Some(now() - Duration::minutes(5));
    let live = grant("carol", &client_id, "authorization_code");
    store.store(&expired).expect("grant should store");
    store.store(&live).expect("grant should store");

    let mut stale = DeviceAuthorization::new(client_id.clone(), Scope::from_delimited_parts("api"), 60);
    stale.creation_time = now() - Duration::minutes(10);
    let device_code = DeviceCode::from_random();
    store
        .store_device_authorization(&device_code, &UserCode::from_random(), &stale)
        .expect("authorization should store");

    let report = store.remove_expired(1).expect("cleanup should succeed");
    assert!(report.grants >= 1);
    assert!(report.device_codes >= 1);

    assert!(store.get(&expired.key).expect("lookup should succeed").is_none());
    assert!(store.get(&live.key).expect("lookup should succeed").is_some());
    assert!(store
        .find_by_device_code(&device_code)
        .expect("lookup should succeed")
        .is_none());

    store.remove(&live.key).expect("grant should remove");
}

#[test]
fn device_authorization_round_trips() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let client_id = ClientId(common::unique("tv"));
    let device_code = DeviceCode::from_random();
    let user_code = UserCode(common::unique("code"));
    let mut authorization =
        DeviceAuthorization::new(client_id, Scope::from_delimited_parts("openid api"), 300);
    store
        .store_device_authorization(&device_code, &user_code, &authorization)
        .expect("authorization should store");

    let by_user = store
        .find_by_user_code(&user_code)
        .expect("lookup should succeed")
        .expect("authorization should exist");
    assert_eq!(by_user, authorization);

    authorization.is_authorized = true;
    authorization.subject_id = Some("alice".to_string());
    authorization.authorized_scopes = Some(Scope::from_delimited_parts("openid"));
    store
        .update_by_user_code(&user_code, &authorization)
        .expect("authorization should update");

    let by_device = store
        .find_by_device_code(&device_code)
        .expect("lookup should succeed")
        .expect("authorization should exist");
    assert_eq!(by_device, authorization);

    let missing = UserCode(common::unique("missing"));
    assert!(store
        .update_by_user_code(&missing, &authorization)
        .unwrap_err()
        .is_not_found());

    store
        .remove_by_device_code(&device_code)
        .expect("authorization should remove");
    assert!(store
        .find_by_user_code(&user_code)
        .expect("lookup should succeed")
        .is_none());
}

#[test]
fn duplicate_device_code_is_rejected() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let device_code = DeviceCode::from_random();
    let authorization = DeviceAuthorization::new(
        ClientId(common::unique("tv")),
        Scope::from_delimited_parts("api"),
        300,
    );
    store
        .store_device_authorization(&device_code, &UserCode(common::unique("first")), &authorization)
        .expect("first authorization should store");

    let err = store
        .store_device_authorization(&device_code, &UserCode(common::unique("second")), &authorization)
        .expect_err("second authorization should be rejected");
    assert!(err.is_unique_violation(), "unexpected error: {}", err);

    store
        .remove_by_device_code(&device_code)
        .expect("authorization should remove");
}

#[test]
fn deleting_a_user_removes_dependent_rows() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let user_id = common::unique("user");
    let user_name = common::unique("alice");
    let user = User::new(&user_id, &user_name).with_email("alice@example.com");
    store.create_user(&user).expect("user should store");

    let role = Role::new(&common::unique("role"), &common::unique("admin"));
    store.create_role(&role).expect("role should store");
    store.add_to_role(&user_id, &role.id).expect("membership should store");
    store.add_to_role(&user_id, &role.id).expect("membership is idempotent");

    store
        .add_user_claim(
            &user_id,
            &Claim {
                claim_type: "department".to_string(),
                value: "ops".to_string(),
            },
        )
        .expect("claim should store");
    let provider_key = common::unique("key");
    store
        .add_user_login(
            &user_id,
            &UserLogin {
                login_provider: "Google".to_string(),
                provider_key: provider_key.clone(),
                provider_display_name: None,
            },
        )
        .expect("login should store");
    store
        .set_user_token(&user_id, "Google", "refresh", Some("first"))
        .expect("token should store");
    store
        .set_user_token(&user_id, "Google", "refresh", Some("second"))
        .expect("token should be replaced");

    let found = store
        .find_user_by_name(&user_name.to_lowercase())
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(found.id, user_id);
    assert_eq!(store.roles_of_user(&user_id).expect("roles").len(), 1);
    assert_eq!(
        store
            .get_user_token(&user_id, "Google", "refresh")
            .expect("token lookup"),
        Some("second".to_string())
    );
    assert_eq!(
        store
            .find_user_by_login("Google", &provider_key)
            .expect("login lookup")
            .map(|u| u.id),
        Some(user_id.clone())
    );

    store.delete_user(&user_id).expect("user should delete");

    assert!(store.user_claims(&user_id).expect("claims").is_empty());
    assert!(store.roles_of_user(&user_id).expect("roles").is_empty());
    assert!(store
        .find_user_by_login("Google", &provider_key)
        .expect("login lookup")
        .is_none());
    assert!(store
        .get_user_token(&user_id, "Google", "refresh")
        .expect("token lookup")
        .is_none());
    assert!(store
        .find_role_by_name(role.name.as_deref().unwrap_or_default())
        .expect("role lookup")
        .is_some());

    store.delete_role(&role.id).expect("role should delete");
}

#[test]
fn migrated_schema_matches_the_model() {
    let store = match common::store() {
        Some(store) => store,
        None => return,
    };

    let mismatches = store.verify_schema().expect("schema should be readable");
    assert!(mismatches.is_empty(), "schema drift: {:?}", mismatches);
}
