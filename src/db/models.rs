use chrono::{DateTime, NaiveDateTime, Utc};

use crate::core::models::{
    ApiResource, ApiScope, Client, IdentityResource, PersistedGrant, Role, Secret, User,
    UserLogin,
};
use crate::core::types::{ClientId, GrantKey};
use crate::mapping::Constrained;

use super::schema::*;

#[derive(Debug, Queryable)]
pub struct ClientRow {
    pub id: i32,
    pub enabled: bool,
    pub client_id: String,
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
}

impl ClientRow {
    /// Scalar columns only; collections are loaded separately.
    pub fn into_client(self) -> Client {
        let mut client = Client::new(ClientId(self.client_id));
        client.id = self.id;
        client.enabled = self.enabled;
        client.protocol_type = self.protocol_type;
        client.require_client_secret = self.require_client_secret;
        client.client_name = self.client_name;
        client.description = self.description;
        client.client_uri = self.client_uri;
        client.logo_uri = self.logo_uri;
        client.require_consent = self.require_consent;
        client.allow_remember_consent = self.allow_remember_consent;
        client.always_include_user_claims_in_id_token = self.always_include_user_claims_in_id_token;
        client.require_pkce = self.require_pkce;
        client.allow_plain_text_pkce = self.allow_plain_text_pkce;
        client.allow_access_tokens_via_browser = self.allow_access_tokens_via_browser;
        client.front_channel_logout_uri = self.front_channel_logout_uri;
        client.front_channel_logout_session_required = self.front_channel_logout_session_required;
        client.back_channel_logout_uri = self.back_channel_logout_uri;
        client.back_channel_logout_session_required = self.back_channel_logout_session_required;
        client.allow_offline_access = self.allow_offline_access;
        client.identity_token_lifetime = self.identity_token_lifetime;
        client.access_token_lifetime = self.access_token_lifetime;
        client.authorization_code_lifetime = self.authorization_code_lifetime;
        client.consent_lifetime = self.consent_lifetime;
        client.absolute_refresh_token_lifetime = self.absolute_refresh_token_lifetime;
        client.sliding_refresh_token_lifetime = self.sliding_refresh_token_lifetime;
        client.refresh_token_usage = self.refresh_token_usage;
        client.update_access_token_claims_on_refresh = self.update_access_token_claims_on_refresh;
        client.refresh_token_expiration = self.refresh_token_expiration;
        client.access_token_type = self.access_token_type;
        client.enable_local_login = self.enable_local_login;
        client.include_jwt_id = self.include_jwt_id;
        client.always_send_client_claims = self.always_send_client_claims;
        client.client_claims_prefix = self.client_claims_prefix;
        client.pair_wise_subject_salt = self.pair_wise_subject_salt;
        client.created = self.created;
        client.updated = self.updated;
        client.last_accessed = self.last_accessed;
        client.user_sso_lifetime = self.user_sso_lifetime;
        client.user_code_type = self.user_code_type;
        client.device_code_lifetime = self.device_code_lifetime;
        client.non_editable = self.non_editable;
        client
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[table_name = "clients"]
#[changeset_options(treat_none_as_null = "true")]
pub struct ClientRecord<'a> {
    pub enabled: bool,
    pub client_id: &'a str,
    pub protocol_type: &'a str,
    pub require_client_secret: bool,
    pub client_name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub client_uri: Option<&'a str>,
    pub logo_uri: Option<&'a str>,
    pub require_consent: bool,
    pub allow_remember_consent: bool,
    pub always_include_user_claims_in_id_token: bool,
    pub require_pkce: bool,
    pub allow_plain_text_pkce: bool,
    pub allow_access_tokens_via_browser: bool,
    pub front_channel_logout_uri: Option<&'a str>,
    pub front_channel_logout_session_required: bool,
    pub back_channel_logout_uri: Option<&'a str>,
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
    pub client_claims_prefix: Option<&'a str>,
    pub pair_wise_subject_salt: Option<&'a str>,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub last_accessed: Option<NaiveDateTime>,
    pub user_sso_lifetime: Option<i32>,
    pub user_code_type: Option<&'a str>,
    pub device_code_lifetime: i32,
    pub non_editable: bool,
}

impl<'a> From<&'a Client> for ClientRecord<'a> {
    fn from(c: &'a Client) -> Self {
        Self {
            enabled: c.enabled,
            client_id: &c.client_id.0,
            protocol_type: &c.protocol_type,
            require_client_secret: c.require_client_secret,
            client_name: c.client_name.as_deref(),
            description: c.description.as_deref(),
            client_uri: c.client_uri.as_deref(),
            logo_uri: c.logo_uri.as_deref(),
            require_consent: c.require_consent,
            allow_remember_consent: c.allow_remember_consent,
            always_include_user_claims_in_id_token: c.always_include_user_claims_in_id_token,
            require_pkce: c.require_pkce,
            allow_plain_text_pkce: c.allow_plain_text_pkce,
            allow_access_tokens_via_browser: c.allow_access_tokens_via_browser,
            front_channel_logout_uri: c.front_channel_logout_uri.as_deref(),
            front_channel_logout_session_required: c.front_channel_logout_session_required,
            back_channel_logout_uri: c.back_channel_logout_uri.as_deref(),
            back_channel_logout_session_required: c.back_channel_logout_session_required,
            allow_offline_access: c.allow_offline_access,
            identity_token_lifetime: c.identity_token_lifetime,
            access_token_lifetime: c.access_token_lifetime,
            authorization_code_lifetime: c.authorization_code_lifetime,
            consent_lifetime: c.consent_lifetime,
            absolute_refresh_token_lifetime: c.absolute_refresh_token_lifetime,
            sliding_refresh_token_lifetime: c.sliding_refresh_token_lifetime,
            refresh_token_usage: c.refresh_token_usage,
            update_access_token_claims_on_refresh: c.update_access_token_claims_on_refresh,
            refresh_token_expiration: c.refresh_token_expiration,
            access_token_type: c.access_token_type,
            enable_local_login: c.enable_local_login,
            include_jwt_id: c.include_jwt_id,
            always_send_client_claims: c.always_send_client_claims,
            client_claims_prefix: c.client_claims_prefix.as_deref(),
            pair_wise_subject_salt: c.pair_wise_subject_salt.as_deref(),
            created: c.created,
            updated: c.updated,
            last_accessed: c.last_accessed,
            user_sso_lifetime: c.user_sso_lifetime,
            user_code_type: c.user_code_type.as_deref(),
            device_code_lifetime: c.device_code_lifetime,
            non_editable: c.non_editable,
        }
    }
}

impl<'a> Constrained for ClientRecord<'a> {
    const ENTITY: &'static str = "Client";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("ClientId", Some(self.client_id)),
            ("ProtocolType", Some(self.protocol_type)),
            ("ClientName", self.client_name),
            ("Description", self.description),
            ("ClientUri", self.client_uri),
            ("LogoUri", self.logo_uri),
            ("FrontChannelLogoutUri", self.front_channel_logout_uri),
            ("BackChannelLogoutUri", self.back_channel_logout_uri),
            ("ClientClaimsPrefix", self.client_claims_prefix),
            ("PairWiseSubjectSalt", self.pair_wise_subject_salt),
            ("UserCodeType", self.user_code_type),
        ]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "client_grant_types"]
pub struct NewClientGrantType<'a> {
    pub grant_type: &'a str,
    pub client_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "client_redirect_uris"]
pub struct NewClientRedirectUri<'a> {
    pub redirect_uri: &'a str,
    pub client_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "client_post_logout_redirect_uris"]
pub struct NewClientPostLogoutRedirectUri<'a> {
    pub post_logout_redirect_uri: &'a str,
    pub client_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "client_scopes"]
pub struct NewClientScope<'a> {
    pub scope: &'a str,
    pub client_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "client_idp_restrictions"]
pub struct NewClientIdPRestriction<'a> {
    pub provider: &'a str,
    pub client_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "client_cors_origins"]
pub struct NewClientCorsOrigin<'a> {
    pub origin: &'a str,
    pub client_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "client_claims"]
pub struct NewClientClaim<'a> {
    pub type_: &'a str,
    pub value: &'a str,
    pub client_id: i32,
}

impl<'a> Constrained for NewClientClaim<'a> {
    const ENTITY: &'static str = "ClientClaim";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("Type", Some(self.type_)), ("Value", Some(self.value))]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "client_properties"]
pub struct NewClientProperty<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub client_id: i32,
}

impl<'a> Constrained for NewClientProperty<'a> {
    const ENTITY: &'static str = "ClientProperty";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("Key", Some(self.key)), ("Value", Some(self.value))]
    }
}

/// Shared shape of `ClientSecrets` and `ApiSecrets`.
#[derive(Debug, Queryable)]
pub struct SecretRow {
    pub description: Option<String>,
    pub value: String,
    pub expiration: Option<NaiveDateTime>,
    pub type_: String,
    pub created: NaiveDateTime,
}

impl From<SecretRow> for Secret {
    fn from(row: SecretRow) -> Self {
        Self {
            description: row.description,
            value: row.value,
            expiration: row.expiration,
            secret_type: row.type_,
            created: row.created,
        }
    }
}

#[derive(Debug, Insertable)]
#[table_name = "client_secrets"]
pub struct NewClientSecret<'a> {
    pub description: Option<&'a str>,
    pub value: &'a str,
    pub expiration: Option<NaiveDateTime>,
    pub type_: &'a str,
    pub created: NaiveDateTime,
    pub client_id: i32,
}

impl<'a> NewClientSecret<'a> {
    pub fn new(secret: &'a Secret, client_id: i32) -> Self {
        Self {
            description: secret.description.as_deref(),
            value: &secret.value,
            expiration: secret.expiration,
            type_: &secret.secret_type,
            created: secret.created,
            client_id,
        }
    }
}

impl<'a> Constrained for NewClientSecret<'a> {
    const ENTITY: &'static str = "ClientSecret";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Description", self.description),
            ("Value", Some(self.value)),
            ("Type", Some(self.type_)),
        ]
    }
}

#[derive(Debug, Queryable)]
pub struct IdentityResourceRow {
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
}

impl IdentityResourceRow {
    pub fn into_resource(self) -> IdentityResource {
        let mut resource = IdentityResource::new(&self.name, &[]);
        resource.id = self.id;
        resource.enabled = self.enabled;
        resource.display_name = self.display_name;
        resource.description = self.description;
        resource.required = self.required;
        resource.emphasize = self.emphasize;
        resource.show_in_discovery_document = self.show_in_discovery_document;
        resource.created = self.created;
        resource.updated = self.updated;
        resource.non_editable = self.non_editable;
        resource
    }
}

#[derive(Debug, Insertable)]
#[table_name = "identity_resources"]
pub struct IdentityResourceRecord<'a> {
    pub enabled: bool,
    pub name: &'a str,
    pub display_name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub required: bool,
    pub emphasize: bool,
    pub show_in_discovery_document: bool,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub non_editable: bool,
}

impl<'a> From<&'a IdentityResource> for IdentityResourceRecord<'a> {
    fn from(r: &'a IdentityResource) -> Self {
        Self {
            enabled: r.enabled,
            name: &r.name,
            display_name: r.display_name.as_deref(),
            description: r.description.as_deref(),
            required: r.required,
            emphasize: r.emphasize,
            show_in_discovery_document: r.show_in_discovery_document,
            created: r.created,
            updated: r.updated,
            non_editable: r.non_editable,
        }
    }
}

impl<'a> Constrained for IdentityResourceRecord<'a> {
    const ENTITY: &'static str = "IdentityResource";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Name", Some(self.name)),
            ("DisplayName", self.display_name),
            ("Description", self.description),
        ]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "identity_claims"]
pub struct NewIdentityClaim<'a> {
    pub type_: &'a str,
    pub identity_resource_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "identity_resource_properties"]
pub struct NewIdentityResourceProperty<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub identity_resource_id: i32,
}

impl<'a> Constrained for NewIdentityResourceProperty<'a> {
    const ENTITY: &'static str = "IdentityResourceProperty";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("Key", Some(self.key)), ("Value", Some(self.value))]
    }
}

#[derive(Debug, Queryable)]
pub struct ApiResourceRow {
    pub id: i32,
    pub enabled: bool,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub last_accessed: Option<NaiveDateTime>,
    pub non_editable: bool,
}

impl ApiResourceRow {
    pub fn into_resource(self) -> ApiResource {
        let mut resource = ApiResource::new(&self.name);
        resource.id = self.id;
        resource.enabled = self.enabled;
        resource.display_name = self.display_name;
        resource.description = self.description;
        resource.created = self.created;
        resource.updated = self.updated;
        resource.last_accessed = self.last_accessed;
        resource.non_editable = self.non_editable;
        resource.scopes.clear();
        resource
    }
}

#[derive(Debug, Insertable)]
#[table_name = "api_resources"]
pub struct ApiResourceRecord<'a> {
    pub enabled: bool,
    pub name: &'a str,
    pub display_name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub last_accessed: Option<NaiveDateTime>,
    pub non_editable: bool,
}

impl<'a> From<&'a ApiResource> for ApiResourceRecord<'a> {
    fn from(r: &'a ApiResource) -> Self {
        Self {
            enabled: r.enabled,
            name: &r.name,
            display_name: r.display_name.as_deref(),
            description: r.description.as_deref(),
            created: r.created,
            updated: r.updated,
            last_accessed: r.last_accessed,
            non_editable: r.non_editable,
        }
    }
}

impl<'a> Constrained for ApiResourceRecord<'a> {
    const ENTITY: &'static str = "ApiResource";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Name", Some(self.name)),
            ("DisplayName", self.display_name),
            ("Description", self.description),
        ]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "api_secrets"]
pub struct NewApiSecret<'a> {
    pub description: Option<&'a str>,
    pub value: &'a str,
    pub expiration: Option<NaiveDateTime>,
    pub type_: &'a str,
    pub created: NaiveDateTime,
    pub api_resource_id: i32,
}

impl<'a> NewApiSecret<'a> {
    pub fn new(secret: &'a Secret, api_resource_id: i32) -> Self {
        Self {
            description: secret.description.as_deref(),
            value: &secret.value,
            expiration: secret.expiration,
            type_: &secret.secret_type,
            created: secret.created,
            api_resource_id,
        }
    }
}

impl<'a> Constrained for NewApiSecret<'a> {
    const ENTITY: &'static str = "ApiSecret";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Description", self.description),
            ("Value", Some(self.value)),
            ("Type", Some(self.type_)),
        ]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "api_resource_claims"]
pub struct NewApiResourceClaim<'a> {
    pub type_: &'a str,
    pub api_resource_id: i32,
}

#[derive(Debug, Insertable)]
#[table_name = "api_resource_properties"]
pub struct NewApiResourceProperty<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub api_resource_id: i32,
}

impl<'a> Constrained for NewApiResourceProperty<'a> {
    const ENTITY: &'static str = "ApiResourceProperty";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("Key", Some(self.key)), ("Value", Some(self.value))]
    }
}

#[derive(Debug, Queryable)]
pub struct ApiScopeRow {
    pub id: i32,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub emphasize: bool,
    pub show_in_discovery_document: bool,
    pub api_resource_id: i32,
}

impl ApiScopeRow {
    pub fn into_scope(self) -> ApiScope {
        ApiScope {
            id: self.id,
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            required: self.required,
            emphasize: self.emphasize,
            show_in_discovery_document: self.show_in_discovery_document,
            user_claims: Vec::new(),
        }
    }
}

#[derive(Debug, Insertable)]
#[table_name = "api_scopes"]
pub struct ApiScopeRecord<'a> {
    pub name: &'a str,
    pub display_name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub required: bool,
    pub emphasize: bool,
    pub show_in_discovery_document: bool,
    pub api_resource_id: i32,
}

impl<'a> ApiScopeRecord<'a> {
    pub fn new(scope: &'a ApiScope, api_resource_id: i32) -> Self {
        Self {
            name: &scope.name,
            display_name: scope.display_name.as_deref(),
            description: scope.description.as_deref(),
            required: scope.required,
            emphasize: scope.emphasize,
            show_in_discovery_document: scope.show_in_discovery_document,
            api_resource_id,
        }
    }
}

impl<'a> Constrained for ApiScopeRecord<'a> {
    const ENTITY: &'static str = "ApiScope";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Name", Some(self.name)),
            ("DisplayName", self.display_name),
            ("Description", self.description),
        ]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "api_scope_claims"]
pub struct NewApiScopeClaim<'a> {
    pub type_: &'a str,
    pub api_scope_id: i32,
}

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[table_name = "persisted_grants"]
#[primary_key(key)]
#[changeset_options(treat_none_as_null = "true")]
pub struct PersistedGrantRow {
    pub key: String,
    pub type_: String,
    pub subject_id: Option<String>,
    pub client_id: String,
    pub creation_time: NaiveDateTime,
    pub expiration: Option<NaiveDateTime>,
    pub data: String,
}

impl From<&PersistedGrant> for PersistedGrantRow {
    fn from(grant: &PersistedGrant) -> Self {
        Self {
            key: grant.key.0.clone(),
            type_: grant.grant_type.clone(),
            subject_id: grant.subject_id.clone(),
            client_id: grant.client_id.0.clone(),
            creation_time: grant.creation_time,
            expiration: grant.expiration,
            data: grant.data.clone(),
        }
    }
}

impl From<PersistedGrantRow> for PersistedGrant {
    fn from(row: PersistedGrantRow) -> Self {
        Self {
            key: GrantKey(row.key),
            grant_type: row.type_,
            subject_id: row.subject_id,
            client_id: ClientId(row.client_id),
            creation_time: row.creation_time,
            expiration: row.expiration,
            data: row.data,
        }
    }
}

impl Constrained for PersistedGrantRow {
    const ENTITY: &'static str = "PersistedGrant";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Key", Some(&self.key)),
            ("Type", Some(&self.type_)),
            ("SubjectId", self.subject_id.as_deref()),
            ("ClientId", Some(&self.client_id)),
            ("Data", Some(&self.data)),
        ]
    }
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[table_name = "device_flow_codes"]
pub struct DeviceFlowCodeRow {
    pub device_code: String,
    pub user_code: String,
    pub subject_id: Option<String>,
    pub client_id: String,
    pub creation_time: NaiveDateTime,
    pub expiration: NaiveDateTime,
    pub data: String,
}

impl Constrained for DeviceFlowCodeRow {
    const ENTITY: &'static str = "DeviceFlowCodes";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("DeviceCode", Some(&self.device_code)),
            ("UserCode", Some(&self.user_code)),
            ("SubjectId", self.subject_id.as_deref()),
            ("ClientId", Some(&self.client_id)),
            ("Data", Some(&self.data)),
        ]
    }
}

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[table_name = "users"]
#[changeset_options(treat_none_as_null = "true")]
pub struct UserRow {
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

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let user = user.clone();
        Self {
            id: user.id,
            user_name: user.user_name,
            normalized_user_name: user.normalized_user_name,
            email: user.email,
            normalized_email: user.normalized_email,
            email_confirmed: user.email_confirmed,
            password_hash: user.password_hash,
            security_stamp: user.security_stamp,
            concurrency_stamp: user.concurrency_stamp,
            phone_number: user.phone_number,
            phone_number_confirmed: user.phone_number_confirmed,
            two_factor_enabled: user.two_factor_enabled,
            lockout_end: user.lockout_end,
            lockout_enabled: user.lockout_enabled,
            access_failed_count: user.access_failed_count,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            normalized_user_name: row.normalized_user_name,
            email: row.email,
            normalized_email: row.normalized_email,
            email_confirmed: row.email_confirmed,
            password_hash: row.password_hash,
            security_stamp: row.security_stamp,
            concurrency_stamp: row.concurrency_stamp,
            phone_number: row.phone_number,
            phone_number_confirmed: row.phone_number_confirmed,
            two_factor_enabled: row.two_factor_enabled,
            lockout_end: row.lockout_end,
            lockout_enabled: row.lockout_enabled,
            access_failed_count: row.access_failed_count,
        }
    }
}

impl Constrained for UserRow {
    const ENTITY: &'static str = "User";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Id", Some(&self.id)),
            ("UserName", self.user_name.as_deref()),
            ("NormalizedUserName", self.normalized_user_name.as_deref()),
            ("Email", self.email.as_deref()),
            ("NormalizedEmail", self.normalized_email.as_deref()),
            ("PasswordHash", self.password_hash.as_deref()),
            ("SecurityStamp", self.security_stamp.as_deref()),
            ("ConcurrencyStamp", self.concurrency_stamp.as_deref()),
            ("PhoneNumber", self.phone_number.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[table_name = "roles"]
pub struct RoleRow {
    pub id: String,
    pub name: Option<String>,
    pub normalized_name: Option<String>,
    pub concurrency_stamp: Option<String>,
}

impl From<&Role> for RoleRow {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.clone(),
            name: role.name.clone(),
            normalized_name: role.normalized_name.clone(),
            concurrency_stamp: role.concurrency_stamp.clone(),
        }
    }
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            normalized_name: row.normalized_name,
            concurrency_stamp: row.concurrency_stamp,
        }
    }
}

impl Constrained for RoleRow {
    const ENTITY: &'static str = "Role";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Id", Some(&self.id)),
            ("Name", self.name.as_deref()),
            ("NormalizedName", self.normalized_name.as_deref()),
            ("ConcurrencyStamp", self.concurrency_stamp.as_deref()),
        ]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "user_claims"]
pub struct NewUserClaim<'a> {
    pub claim_type: Option<&'a str>,
    pub claim_value: Option<&'a str>,
    pub user_id: &'a str,
}

#[derive(Debug, Insertable)]
#[table_name = "role_claims"]
pub struct NewRoleClaim<'a> {
    pub claim_type: Option<&'a str>,
    pub claim_value: Option<&'a str>,
    pub role_id: &'a str,
}

#[derive(Debug, Insertable)]
#[table_name = "user_logins"]
pub struct NewUserLogin<'a> {
    pub login_provider: &'a str,
    pub provider_key: &'a str,
    pub provider_display_name: Option<&'a str>,
    pub user_id: &'a str,
}

impl<'a> NewUserLogin<'a> {
    pub fn new(login: &'a UserLogin, user_id: &'a str) -> Self {
        Self {
            login_provider: &login.login_provider,
            provider_key: &login.provider_key,
            provider_display_name: login.provider_display_name.as_deref(),
            user_id,
        }
    }
}

impl<'a> Constrained for NewUserLogin<'a> {
    const ENTITY: &'static str = "UserLogin";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("LoginProvider", Some(self.login_provider)),
            ("ProviderKey", Some(self.provider_key)),
            ("ProviderDisplayName", self.provider_display_name),
        ]
    }
}

#[derive(Debug, Insertable)]
#[table_name = "user_tokens"]
pub struct UserTokenRecord<'a> {
    pub user_id: &'a str,
    pub login_provider: &'a str,
    pub name: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> Constrained for UserTokenRecord<'a> {
    const ENTITY: &'static str = "UserToken";

    fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("UserId", Some(self.user_id)),
            ("LoginProvider", Some(self.login_provider)),
            ("Name", Some(self.name)),
            ("Value", self.value),
        ]
    }
}
