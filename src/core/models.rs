use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    pub description: Option<String>,
    pub value: String,
    pub expiration: Option<NaiveDateTime>,
    #[serde(rename = "type")]
    pub secret_type: String,
    pub created: NaiveDateTime,
}

impl Secret {
    pub const SHARED_SECRET: &'static str = "SharedSecret";

    pub fn shared(hashed: HashedClientSecret) -> Self {
        Self {
            description: None,
            value: hashed.0,
            expiration: None,
            secret_type: Self::SHARED_SECRET.to_string(),
            created: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub enabled: bool,
    pub client_id: ClientId,
    pub protocol_type: String,
    pub require_client_secret: bool,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub client_uri: Option<String>,
    pub logo_uri: Option<String>,
    pub require_consent: bool,
    pub allow_remember_consent: bool,
    pub always_include_user_claims_in_id_token: bool,
    pub require_pkce: bool,
    pub allow_plain_text_pkce: bool,
    pub allow_access_tokens_via_browser: bool,
    pub front_channel_logout_uri: Option<String>,
    pub front_channel_logout_session_required: bool,
    pub back_channel_logout_uri: Option<String>,
    pub back_channel_logout_session_required: bool,
    pub allow_offline_access: bool,
    pub identity_token_lifetime: i32,
    pub access_token_lifetime: i32,
    pub authorization_code_lifetime: i32,
    pub consent_lifetime: Option<i32>,
    pub absolute_refresh_token_lifetime: i32,
    pub sliding_refresh_token_lifetime: i32,
    pub refresh_token_usage: i32,
    pub update_access_token_claims_on_refresh: bool,
    pub refresh_token_expiration: i32,
    pub access_token_type: i32,
    pub enable_local_login: bool,
    pub include_jwt_id: bool,
    pub always_send_client_claims: bool,
    pub client_claims_prefix: Option<String>,
    pub pair_wise_subject_salt: Option<String>,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub last_accessed: Option<NaiveDateTime>,
    pub user_sso_lifetime: Option<i32>,
    pub user_code_type: Option<String>,
    pub device_code_lifetime: i32,
    pub non_editable: bool,

    pub allowed_grant_types: Vec<String>,
    pub redirect_uris: Vec<String>,
    pub post_logout_redirect_uris: Vec<String>,
    pub allowed_scopes: Vec<String>,
    pub client_secrets: Vec<Secret>,
    pub claims: Vec<Claim>,
    pub identity_provider_restrictions: Vec<String>,
    pub allowed_cors_origins: Vec<String>,
    pub properties: BTreeMap<String, String>,
}

impl Client {
    pub const PROTOCOL_OIDC: &'static str = "oidc";

    /// A registration with the token server's defaults. `id` stays 0 until
    /// the client is stored.
    pub fn new(client_id: ClientId) -> Self {
        Self {
            id: 0,
            enabled: true,
            client_id,
            protocol_type: Self::PROTOCOL_OIDC.to_string(),
            require_client_secret: true,
            client_name: None,
            description: None,
            client_uri: None,
            logo_uri: None,
            require_consent: true,
            allow_remember_consent: true,
            always_include_user_claims_in_id_token: false,
            require_pkce: false,
            allow_plain_text_pkce: false,
            allow_access_tokens_via_browser: false,
            front_channel_logout_uri: None,
            front_channel_logout_session_required: true,
            back_channel_logout_uri: None,
            back_channel_logout_session_required: true,
            allow_offline_access: false,
            identity_token_lifetime: 300,
            access_token_lifetime: 3600,
            authorization_code_lifetime: 300,
            consent_lifetime: None,
            absolute_refresh_token_lifetime: 2_592_000,
            sliding_refresh_token_lifetime: 1_296_000,
            refresh_token_usage: 1,
            update_access_token_claims_on_refresh: false,
            refresh_token_expiration: 1,
            access_token_type: 0,
            enable_local_login: true,
            include_jwt_id: false,
            always_send_client_claims: false,
            client_claims_prefix: Some("client_".to_string()),
            pair_wise_subject_salt: None,
            created: now(),
            updated: None,
            last_accessed: None,
            user_sso_lifetime: None,
            user_code_type: None,
            device_code_lifetime: 300,
            non_editable: false,
            allowed_grant_types: Vec::new(),
            redirect_uris: Vec::new(),
            post_logout_redirect_uris: Vec::new(),
            allowed_scopes: Vec::new(),
            client_secrets: Vec::new(),
            claims: Vec::new(),
            identity_provider_restrictions: Vec::new(),
            allowed_cors_origins: Vec::new(),
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub client_id: ClientId,
    pub client_name: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityResource {
    pub id: i32,
    pub enabled: bool,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub emphasize: bool,
    pub show_in_discovery_document: bool,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub non_editable: bool,
    pub user_claims: Vec<String>,
    pub properties: BTreeMap<String, String>,
}

impl IdentityResource {
    pub fn new(name: &str, user_claims: &[&str]) -> Self {
        Self {
            id: 0,
            enabled: true,
            name: name.to_string(),
            display_name: None,
            description: None,
            required: false,
            emphasize: false,
            show_in_discovery_document: true,
            created: now(),
            updated: None,
            non_editable: false,
            user_claims: user_claims.iter().map(ToString::to_string).collect(),
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiScope {
    pub id: i32,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub emphasize: bool,
    pub show_in_discovery_document: bool,
    pub user_claims: Vec<String>,
}

impl ApiScope {
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            display_name: None,
            description: None,
            required: false,
            emphasize: false,
            show_in_discovery_document: true,
            user_claims: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResource {
    pub id: i32,
    pub enabled: bool,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub last_accessed: Option<NaiveDateTime>,
    pub non_editable: bool,
    pub secrets: Vec<Secret>,
    pub scopes: Vec<ApiScope>,
    pub user_claims: Vec<String>,
    pub properties: BTreeMap<String, String>,
}

impl ApiResource {
    /// A resource exposing a single scope of the same name.
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            enabled: true,
            name: name.to_string(),
            display_name: None,
            description: None,
            created: now(),
            updated: None,
            last_accessed: None,
            non_editable: false,
            secrets: Vec::new(),
            scopes: vec![ApiScope::new(name)],
            user_claims: Vec::new(),
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub identity_resources: Vec<IdentityResource>,
    pub api_resources: Vec<ApiResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedGrant {
    pub key: GrantKey,
    #[serde(rename = "type")]
    pub grant_type: String,
    pub subject_id: Option<String>,
    pub client_id: ClientId,
    pub creation_time: NaiveDateTime,
    pub expiration: Option<NaiveDateTime>,
    pub data: String,
}

/// Selects persisted grants. At least one criterion must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantFilter {
    pub subject_id: Option<String>,
    pub client_id: Option<ClientId>,
    pub grant_type: Option<String>,
}

impl GrantFilter {
    pub fn subject(subject_id: &str) -> Self {
        Self {
            subject_id: Some(subject_id.to_string()),
            ..Self::default()
        }
    }

    pub fn client(mut self, client_id: &ClientId) -> Self {
        self.client_id = Some(client_id.clone());
        self
    }

    pub fn grant_type(mut self, grant_type: &str) -> Self {
        self.grant_type = Some(grant_type.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.subject_id.is_none() && self.client_id.is_none() && self.grant_type.is_none()
    }
}

/// The pending device authorization kept in `DeviceFlowCodes.Data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceAuthorization {
    pub creation_time: NaiveDateTime,
    pub lifetime: i64,
    pub client_id: ClientId,
    pub is_open_id: bool,
    pub is_authorized: bool,
    pub requested_scopes: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_scopes: Option<Scope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl DeviceAuthorization {
    pub fn new(client_id: ClientId, requested_scopes: Scope, lifetime: i64) -> Self {
        Self {
            creation_time: now(),
            lifetime,
            client_id,
            is_open_id: requested_scopes.contains("openid"),
            is_authorized: false,
            requested_scopes,
            authorized_scopes: None,
            subject_id: None,
            session_id: None,
        }
    }

    /// `None` when the lifetime does not fit a timestamp.
    pub fn expiration(&self) -> Option<NaiveDateTime> {
        Duration::try_seconds(self.lifetime)
            .and_then(|lifetime| self.creation_time.checked_add_signed(lifetime))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub user_name: Option<String>,
    pub normalized_user_name: Option<String>,
    pub email: Option<String>,
    pub normalized_email: Option<String>,
    pub email_confirmed: bool,
    pub password_hash: Option<String>,
    pub security_stamp: Option<String>,
    pub concurrency_stamp: Option<String>,
    pub phone_number: Option<String>,
    pub phone_number_confirmed: bool,
    pub two_factor_enabled: bool,
    pub lockout_end: Option<DateTime<Utc>>,
    pub lockout_enabled: bool,
    pub access_failed_count: i32,
}

pub fn normalize(name: &str) -> String {
    name.to_uppercase()
}

impl User {
    pub fn new(id: &str, user_name: &str) -> Self {
        Self {
            id: id.to_string(),
            user_name: Some(user_name.to_string()),
            normalized_user_name: Some(normalize(user_name)),
            email: None,
            normalized_email: None,
            email_confirmed: false,
            password_hash: None,
            security_stamp: None,
            concurrency_stamp: None,
            phone_number: None,
            phone_number_confirmed: false,
            two_factor_enabled: false,
            lockout_end: None,
            lockout_enabled: true,
            access_failed_count: 0,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self.normalized_email = Some(normalize(email));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: Option<String>,
    pub normalized_name: Option<String>,
    pub concurrency_stamp: Option<String>,
}

impl Role {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            normalized_name: Some(normalize(name)),
            concurrency_stamp: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLogin {
    pub login_provider: String,
    pub provider_key: String,
    pub provider_display_name: Option<String>,
}
