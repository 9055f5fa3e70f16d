table! {
    #[sql_name = "Users"]
    users (id) {
        #[sql_name = "Id"]
        id -> Text,
        #[sql_name = "UserName"]
        user_name -> Nullable<Varchar>,
        #[sql_name = "NormalizedUserName"]
        normalized_user_name -> Nullable<Varchar>,
        #[sql_name = "Email"]
        email -> Nullable<Varchar>,
        #[sql_name = "NormalizedEmail"]
        normalized_email -> Nullable<Varchar>,
        #[sql_name = "EmailConfirmed"]
        email_confirmed -> Bool,
        #[sql_name = "PasswordHash"]
        password_hash -> Nullable<Text>,
        #[sql_name = "SecurityStamp"]
        security_stamp -> Nullable<Text>,
        #[sql_name = "ConcurrencyStamp"]
        concurrency_stamp -> Nullable<Text>,
        #[sql_name = "PhoneNumber"]
        phone_number -> Nullable<Text>,
        #[sql_name = "PhoneNumberConfirmed"]
        phone_number_confirmed -> Bool,
        #[sql_name = "TwoFactorEnabled"]
        two_factor_enabled -> Bool,
        #[sql_name = "LockoutEnd"]
        lockout_end -> Nullable<Timestamptz>,
        #[sql_name = "LockoutEnabled"]
        lockout_enabled -> Bool,
        #[sql_name = "AccessFailedCount"]
        access_failed_count -> Int4,
    }
}

table! {
    #[sql_name = "Roles"]
    roles (id) {
        #[sql_name = "Id"]
        id -> Text,
        #[sql_name = "Name"]
        name -> Nullable<Varchar>,
        #[sql_name = "NormalizedName"]
        normalized_name -> Nullable<Varchar>,
        #[sql_name = "ConcurrencyStamp"]
        concurrency_stamp -> Nullable<Text>,
    }
}

table! {
    #[sql_name = "UserRoles"]
    user_roles (user_id, role_id) {
        #[sql_name = "UserId"]
        user_id -> Text,
        #[sql_name = "RoleId"]
        role_id -> Text,
    }
}

table! {
    #[sql_name = "UserClaims"]
    user_claims (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "ClaimType"]
        claim_type -> Nullable<Text>,
        #[sql_name = "ClaimValue"]
        claim_value -> Nullable<Text>,
        #[sql_name = "UserId"]
        user_id -> Text,
    }
}

table! {
    #[sql_name = "UserLogins"]
    user_logins (login_provider, provider_key) {
        #[sql_name = "LoginProvider"]
        login_provider -> Varchar,
        #[sql_name = "ProviderKey"]
        provider_key -> Varchar,
        #[sql_name = "ProviderDisplayName"]
        provider_display_name -> Nullable<Text>,
        #[sql_name = "UserId"]
        user_id -> Text,
    }
}

table! {
    #[sql_name = "UserTokens"]
    user_tokens (user_id, login_provider, name) {
        #[sql_name = "UserId"]
        user_id -> Text,
        #[sql_name = "LoginProvider"]
        login_provider -> Varchar,
        #[sql_name = "Name"]
        name -> Varchar,
        #[sql_name = "Value"]
        value -> Nullable<Text>,
    }
}

table! {
    #[sql_name = "RoleClaims"]
    role_claims (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "ClaimType"]
        claim_type -> Nullable<Text>,
        #[sql_name = "ClaimValue"]
        claim_value -> Nullable<Text>,
        #[sql_name = "RoleId"]
        role_id -> Text,
    }
}

table! {
    #[sql_name = "Clients"]
    clients (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Enabled"]
        enabled -> Bool,
        #[sql_name = "ClientId"]
        client_id -> Varchar,
        #[sql_name = "ProtocolType"]
        protocol_type -> Varchar,
        #[sql_name = "RequireClientSecret"]
        require_client_secret -> Bool,
        #[sql_name = "ClientName"]
        client_name -> Nullable<Varchar>,
        #[sql_name = "Description"]
        description -> Nullable<Varchar>,
        #[sql_name = "ClientUri"]
        client_uri -> Nullable<Varchar>,
        #[sql_name = "LogoUri"]
        logo_uri -> Nullable<Varchar>,
        #[sql_name = "RequireConsent"]
        require_consent -> Bool,
        #[sql_name = "AllowRememberConsent"]
        allow_remember_consent -> Bool,
        #[sql_name = "AlwaysIncludeUserClaimsInIdToken"]
        always_include_user_claims_in_id_token -> Bool,
        #[sql_name = "RequirePkce"]
        require_pkce -> Bool,
        #[sql_name = "AllowPlainTextPkce"]
        allow_plain_text_pkce -> Bool,
        #[sql_name = "AllowAccessTokensViaBrowser"]
        allow_access_tokens_via_browser -> Bool,
        #[sql_name = "FrontChannelLogoutUri"]
        front_channel_logout_uri -> Nullable<Varchar>,
        #[sql_name = "FrontChannelLogoutSessionRequired"]
        front_channel_logout_session_required -> Bool,
        #[sql_name = "BackChannelLogoutUri"]
        back_channel_logout_uri -> Nullable<Varchar>,
        #[sql_name = "BackChannelLogoutSessionRequired"]
        back_channel_logout_session_required -> Bool,
        #[sql_name = "AllowOfflineAccess"]
        allow_offline_access -> Bool,
        #[sql_name = "IdentityTokenLifetime"]
        identity_token_lifetime -> Int4,
        #[sql_name = "AccessTokenLifetime"]
        access_token_lifetime -> Int4,
        #[sql_name = "AuthorizationCodeLifetime"]
        authorization_code_lifetime -> Int4,
        #[sql_name = "ConsentLifetime"]
        consent_lifetime -> Nullable<Int4>,
        #[sql_name = "AbsoluteRefreshTokenLifetime"]
        absolute_refresh_token_lifetime -> Int4,
        #[sql_name = "SlidingRefreshTokenLifetime"]
        sliding_refresh_token_lifetime -> Int4,
        #[sql_name = "RefreshTokenUsage"]
        refresh_token_usage -> Int4,
        #[sql_name = "UpdateAccessTokenClaimsOnRefresh"]
        update_access_token_claims_on_refresh -> Bool,
        #[sql_name = "RefreshTokenExpiration"]
        refresh_token_expiration -> Int4,
        #[sql_name = "AccessTokenType"]
        access_token_type -> Int4,
        #[sql_name = "EnableLocalLogin"]
        enable_local_login -> Bool,
        #[sql_name = "IncludeJwtId"]
        include_jwt_id -> Bool,
        #[sql_name = "AlwaysSendClientClaims"]
        always_send_client_claims -> Bool,
        #[sql_name = "ClientClaimsPrefix"]
        client_claims_prefix -> Nullable<Varchar>,
        #[sql_name = "PairWiseSubjectSalt"]
        pair_wise_subject_salt -> Nullable<Varchar>,
        #[sql_name = "Created"]
        created -> Timestamp,
        #[sql_name = "Updated"]
        updated -> Nullable<Timestamp>,
        #[sql_name = "LastAccessed"]
        last_accessed -> Nullable<Timestamp>,
        #[sql_name = "UserSsoLifetime"]
        user_sso_lifetime -> Nullable<Int4>,
        #[sql_name = "UserCodeType"]
        user_code_type -> Nullable<Varchar>,
        #[sql_name = "DeviceCodeLifetime"]
        device_code_lifetime -> Int4,
        #[sql_name = "NonEditable"]
        non_editable -> Bool,
    }
}

table! {
    #[sql_name = "ClientGrantTypes"]
    client_grant_types (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "GrantType"]
        grant_type -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientRedirectUris"]
    client_redirect_uris (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "RedirectUri"]
        redirect_uri -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientPostLogoutRedirectUris"]
    client_post_logout_redirect_uris (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "PostLogoutRedirectUri"]
        post_logout_redirect_uri -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientScopes"]
    client_scopes (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Scope"]
        scope -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientSecrets"]
    client_secrets (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Description"]
        description -> Nullable<Varchar>,
        #[sql_name = "Value"]
        value -> Varchar,
        #[sql_name = "Expiration"]
        expiration -> Nullable<Timestamp>,
        #[sql_name = "Type"]
        type_ -> Varchar,
        #[sql_name = "Created"]
        created -> Timestamp,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientClaims"]
    client_claims (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Type"]
        type_ -> Varchar,
        #[sql_name = "Value"]
        value -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientIdPRestrictions"]
    client_idp_restrictions (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Provider"]
        provider -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientCorsOrigins"]
    client_cors_origins (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Origin"]
        origin -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "ClientProperties"]
    client_properties (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Key"]
        key -> Varchar,
        #[sql_name = "Value"]
        value -> Varchar,
        #[sql_name = "ClientId"]
        client_id -> Int4,
    }
}

table! {
    #[sql_name = "IdentityResources"]
    identity_resources (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Enabled"]
        enabled -> Bool,
        #[sql_name = "Name"]
        name -> Varchar,
        #[sql_name = "DisplayName"]
        display_name -> Nullable<Varchar>,
        #[sql_name = "Description"]
        description -> Nullable<Varchar>,
        #[sql_name = "Required"]
        required -> Bool,
        #[sql_name = "Emphasize"]
        emphasize -> Bool,
        #[sql_name = "ShowInDiscoveryDocument"]
        show_in_discovery_document -> Bool,
        #[sql_name = "Created"]
        created -> Timestamp,
        #[sql_name = "Updated"]
        updated -> Nullable<Timestamp>,
        #[sql_name = "NonEditable"]
        non_editable -> Bool,
    }
}

table! {
    #[sql_name = "IdentityClaims"]
    identity_claims (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Type"]
        type_ -> Varchar,
        #[sql_name = "IdentityResourceId"]
        identity_resource_id -> Int4,
    }
}

table! {
    #[sql_name = "IdentityResourceProperties"]
    identity_resource_properties (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Key"]
        key -> Varchar,
        #[sql_name = "Value"]
        value -> Varchar,
        #[sql_name = "IdentityResourceId"]
        identity_resource_id -> Int4,
    }
}

table! {
    #[sql_name = "ApiResources"]
    api_resources (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Enabled"]
        enabled -> Bool,
        #[sql_name = "Name"]
        name -> Varchar,
        #[sql_name = "DisplayName"]
        display_name -> Nullable<Varchar>,
        #[sql_name = "Description"]
        description -> Nullable<Varchar>,
        #[sql_name = "Created"]
        created -> Timestamp,
        #[sql_name = "Updated"]
        updated -> Nullable<Timestamp>,
        #[sql_name = "LastAccessed"]
        last_accessed -> Nullable<Timestamp>,
        #[sql_name = "NonEditable"]
        non_editable -> Bool,
    }
}

table! {
    #[sql_name = "ApiSecrets"]
    api_secrets (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Description"]
        description -> Nullable<Varchar>,
        #[sql_name = "Value"]
        value -> Varchar,
        #[sql_name = "Expiration"]
        expiration -> Nullable<Timestamp>,
        #[sql_name = "Type"]
        type_ -> Varchar,
        #[sql_name = "Created"]
        created -> Timestamp,
        #[sql_name = "ApiResourceId"]
        api_resource_id -> Int4,
    }
}

table! {
    #[sql_name = "ApiResourceClaims"]
    api_resource_claims (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Type"]
        type_ -> Varchar,
        #[sql_name = "ApiResourceId"]
        api_resource_id -> Int4,
    }
}

table! {
    #[sql_name = "ApiScopes"]
    api_scopes (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Name"]
        name -> Varchar,
        #[sql_name = "DisplayName"]
        display_name -> Nullable<Varchar>,
        #[sql_name = "Description"]
        description -> Nullable<Varchar>,
        #[sql_name = "Required"]
        required -> Bool,
        #[sql_name = "Emphasize"]
        emphasize -> Bool,
        #[sql_name = "ShowInDiscoveryDocument"]
        show_in_discovery_document -> Bool,
        #[sql_name = "ApiResourceId"]
        api_resource_id -> Int4,
    }
}

table! {
    #[sql_name = "ApiScopeClaims"]
    api_scope_claims (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Type"]
        type_ -> Varchar,
        #[sql_name = "ApiScopeId"]
        api_scope_id -> Int4,
    }
}

table! {
    #[sql_name = "ApiResourceProperties"]
    api_resource_properties (id) {
        #[sql_name = "Id"]
        id -> Int4,
        #[sql_name = "Key"]
        key -> Varchar,
        #[sql_name = "Value"]
        value -> Varchar,
        #[sql_name = "ApiResourceId"]
        api_resource_id -> Int4,
    }
}

table! {
    #[sql_name = "PersistedGrants"]
    persisted_grants (key) {
        #[sql_name = "Key"]
        key -> Varchar,
        #[sql_name = "Type"]
        type_ -> Varchar,
        #[sql_name = "SubjectId"]
        subject_id -> Nullable<Varchar>,
        #[sql_name = "ClientId"]
        client_id -> Varchar,
        #[sql_name = "CreationTime"]
        creation_time -> Timestamp,
        #[sql_name = "Expiration"]
        expiration -> Nullable<Timestamp>,
        #[sql_name = "Data"]
        data -> Varchar,
    }
}

table! {
    #[sql_name = "DeviceFlowCodes"]
    device_flow_codes (user_code) {
        #[sql_name = "DeviceCode"]
        device_code -> Varchar,
        #[sql_name = "UserCode"]
        user_code -> Varchar,
        #[sql_name = "SubjectId"]
        subject_id -> Nullable<Varchar>,
        #[sql_name = "ClientId"]
        client_id -> Varchar,
        #[sql_name = "CreationTime"]
        creation_time -> Timestamp,
        #[sql_name = "Expiration"]
        expiration -> Timestamp,
        #[sql_name = "Data"]
        data -> Varchar,
    }
}

joinable!(user_claims -> users (user_id));
joinable!(user_logins -> users (user_id));
joinable!(user_tokens -> users (user_id));
joinable!(user_roles -> users (user_id));
joinable!(user_roles -> roles (role_id));
joinable!(role_claims -> roles (role_id));

joinable!(client_grant_types -> clients (client_id));
joinable!(client_redirect_uris -> clients (client_id));
joinable!(client_post_logout_redirect_uris -> clients (client_id));
joinable!(client_scopes -> clients (client_id));
joinable!(client_secrets -> clients (client_id));
joinable!(client_claims -> clients (client_id));
joinable!(client_idp_restrictions -> clients (client_id));
joinable!(client_cors_origins -> clients (client_id));
joinable!(client_properties -> clients (client_id));

joinable!(identity_claims -> identity_resources (identity_resource_id));
joinable!(identity_resource_properties -> identity_resources (identity_resource_id));

joinable!(api_secrets -> api_resources (api_resource_id));
joinable!(api_resource_claims -> api_resources (api_resource_id));
joinable!(api_scopes -> api_resources (api_resource_id));
joinable!(api_resource_properties -> api_resources (api_resource_id));
joinable!(api_scope_claims -> api_scopes (api_scope_id));

allow_tables_to_appear_in_same_query!(
    users,
    roles,
    user_roles,
    user_claims,
    user_logins,
    user_tokens,
    role_claims,
    clients,
    client_grant_types,
    client_redirect_uris,
    client_post_logout_redirect_uris,
    client_scopes,
    client_secrets,
    client_claims,
    client_idp_restrictions,
    client_cors_origins,
    client_properties,
    identity_resources,
    identity_claims,
    identity_resource_properties,
    api_resources,
    api_secrets,
    api_resource_claims,
    api_scopes,
    api_scope_claims,
    api_resource_properties,
    persisted_grants,
    device_flow_codes,
);
