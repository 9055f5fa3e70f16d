use super::{ColumnType, EntityBuilder, Model, OnDelete};

use ColumnType::*;

fn id_key(entity: &mut EntityBuilder<'_>) {
    entity.property("Id", Integer).value_generated_on_add();
    entity.has_key(&["Id"]);
}

fn owned_by(entity: &mut EntityBuilder<'_>, foreign_key: &str) {
    entity.property(foreign_key, Integer);
}

fn cascade(entity: &mut EntityBuilder<'_>, dependent: &str, foreign_key: &str) {
    entity
        .has_many(dependent)
        .with_foreign_key(&[foreign_key])
        .required()
        .on_delete(OnDelete::Cascade);
}

fn key_value(entity: &mut EntityBuilder<'_>) {
    entity.property("Key", Text).max_length(250).required();
    entity.property("Value", Text).max_length(2000).required();
}

pub(super) fn register(model: &mut Model) {
    register_clients(model);
    register_identity_resources(model);
    register_api_resources(model);
}

fn register_clients(model: &mut Model) {
    model.entity("Client", |client| {
        client.to_table("Clients");

        id_key(client);

        client.property("Enabled", Boolean);
        client.property("ClientId", Text).max_length(200).required();
        client.property("ProtocolType", Text).max_length(200).required();
        client.property("RequireClientSecret", Boolean);
        client.property("ClientName", Text).max_length(200);
        client.property("Description", Text).max_length(1000);
        client.property("ClientUri", Text).max_length(2000);
        client.property("LogoUri", Text).max_length(2000);
        client.property("RequireConsent", Boolean);
        client.property("AllowRememberConsent", Boolean);
        client.property("AlwaysIncludeUserClaimsInIdToken", Boolean);
        client.property("RequirePkce", Boolean);
        client.property("AllowPlainTextPkce", Boolean);
        client.property("AllowAccessTokensViaBrowser", Boolean);
        client.property("FrontChannelLogoutUri", Text).max_length(2000);
        client.property("FrontChannelLogoutSessionRequired", Boolean);
        client.property("BackChannelLogoutUri", Text).max_length(2000);
        client.property("BackChannelLogoutSessionRequired", Boolean);
        client.property("AllowOfflineAccess", Boolean);
        client.property("IdentityTokenLifetime", Integer);
        client.property("AccessTokenLifetime", Integer);
        client.property("AuthorizationCodeLifetime", Integer);
        client.property("ConsentLifetime", Integer).optional();
        client.property("AbsoluteRefreshTokenLifetime", Integer);
        client.property("SlidingRefreshTokenLifetime", Integer);
        client.property("RefreshTokenUsage", Integer);
        client.property("UpdateAccessTokenClaimsOnRefresh", Boolean);
        client.property("RefreshTokenExpiration", Integer);
        client.property("AccessTokenType", Integer);
        client.property("EnableLocalLogin", Boolean);
        client.property("IncludeJwtId", Boolean);
        client.property("AlwaysSendClientClaims", Boolean);
        client.property("ClientClaimsPrefix", Text).max_length(200);
        client.property("PairWiseSubjectSalt", Text).max_length(200);
        client.property("Created", Timestamp);
        client.property("Updated", Timestamp).optional();
        client.property("LastAccessed", Timestamp).optional();
        client.property("UserSsoLifetime", Integer).optional();
        client.property("UserCodeType", Text).max_length(100);
        client.property("DeviceCodeLifetime", Integer);
        client.property("NonEditable", Boolean);

        client.has_index(&["ClientId"]).unique();

        for dependent in &[
            "ClientGrantType",
            "ClientRedirectUri",
            "ClientPostLogoutRedirectUri",
            "ClientScope",
            "ClientSecret",
            "ClientClaim",
            "ClientIdPRestriction",
            "ClientCorsOrigin",
            "ClientProperty",
        ] {
            cascade(client, dependent, "ClientId");
        }
    });

    model.entity("ClientGrantType", |grant_type| {
        grant_type.to_table("ClientGrantTypes");
        id_key(grant_type);
        grant_type.property("GrantType", Text).max_length(250).required();
        owned_by(grant_type, "ClientId");
    });

    model.entity("ClientRedirectUri", |redirect_uri| {
        redirect_uri.to_table("ClientRedirectUris");
        id_key(redirect_uri);
        redirect_uri
            .property("RedirectUri", Text)
            .max_length(2000)
            .required();
        owned_by(redirect_uri, "ClientId");
    });

    model.entity("ClientPostLogoutRedirectUri", |post_logout_redirect_uri| {
        post_logout_redirect_uri.to_table("ClientPostLogoutRedirectUris");
        id_key(post_logout_redirect_uri);
        post_logout_redirect_uri
            .property("PostLogoutRedirectUri", Text)
            .max_length(2000)
            .required();
        owned_by(post_logout_redirect_uri, "ClientId");
    });

    model.entity("ClientScope", |scope| {
        scope.to_table("ClientScopes");
        id_key(scope);
        scope.property("Scope", Text).max_length(200).required();
        owned_by(scope, "ClientId");
    });

    model.entity("ClientSecret", |secret| {
        secret.to_table("ClientSecrets");
        id_key(secret);
        secret.property("Description", Text).max_length(2000);
        secret.property("Value", Text).max_length(4000).required();
        secret.property("Expiration", Timestamp).optional();
        secret.property("Type", Text).max_length(250).required();
        secret.property("Created", Timestamp);
        owned_by(secret, "ClientId");
    });

    model.entity("ClientClaim", |claim| {
        claim.to_table("ClientClaims");
        id_key(claim);
        claim.property("Type", Text).max_length(250).required();
        claim.property("Value", Text).max_length(250).required();
        owned_by(claim, "ClientId");
    });

    model.entity("ClientIdPRestriction", |restriction| {
        restriction.to_table("ClientIdPRestrictions");
        id_key(restriction);
        restriction.property("Provider", Text).max_length(200).required();
        owned_by(restriction, "ClientId");
    });

    model.entity("ClientCorsOrigin", |cors_origin| {
        cors_origin.to_table("ClientCorsOrigins");
        id_key(cors_origin);
        cors_origin.property("Origin", Text).max_length(150).required();
        owned_by(cors_origin, "ClientId");
    });

    model.entity("ClientProperty", |property| {
        property.to_table("ClientProperties");
        id_key(property);
        key_value(property);
        owned_by(property, "ClientId");
    });
}

fn register_identity_resources(model: &mut Model) {
    model.entity("IdentityResource", |identity_resource| {
        identity_resource.to_table("IdentityResources");

        id_key(identity_resource);

        identity_resource.property("Enabled", Boolean);
        identity_resource
            .property("Name", Text)
            .max_length(200)
            .required();
        identity_resource.property("DisplayName", Text).max_length(200);
        identity_resource.property("Description", Text).max_length(1000);
        identity_resource.property("Required", Boolean);
        identity_resource.property("Emphasize", Boolean);
        identity_resource.property("ShowInDiscoveryDocument", Boolean);
        identity_resource.property("Created", Timestamp);
        identity_resource.property("Updated", Timestamp).optional();
        identity_resource.property("NonEditable", Boolean);

        identity_resource.has_index(&["Name"]).unique();

        cascade(identity_resource, "IdentityClaim", "IdentityResourceId");
        cascade(
            identity_resource,
            "IdentityResourceProperty",
            "IdentityResourceId",
        );
    });

    model.entity("IdentityClaim", |claim| {
        claim.to_table("IdentityClaims");
        id_key(claim);
        claim.property("Type", Text).max_length(200).required();
        owned_by(claim, "IdentityResourceId");
    });

    model.entity("IdentityResourceProperty", |property| {
        property.to_table("IdentityResourceProperties");
        id_key(property);
        key_value(property);
        owned_by(property, "IdentityResourceId");
    });
}

fn register_api_resources(model: &mut Model) {
    model.entity("ApiResource", |api_resource| {
        api_resource.to_table("ApiResources");

        id_key(api_resource);

        api_resource.property("Enabled", Boolean);
        api_resource.property("Name", Text).max_length(200).required();
        api_resource.property("DisplayName", Text).max_length(200);
        api_resource.property("Description", Text).max_length(1000);
        api_resource.property("Created", Timestamp);
        api_resource.property("Updated", Timestamp).optional();
        api_resource.property("LastAccessed", Timestamp).optional();
        api_resource.property("NonEditable", Boolean);

        api_resource.has_index(&["Name"]).unique();

        for dependent in &[
            "ApiSecret",
            "ApiScope",
            "ApiResourceClaim",
            "ApiResourceProperty",
        ] {
            cascade(api_resource, dependent, "ApiResourceId");
        }
    });

    model.entity("ApiSecret", |api_secret| {
        api_secret.to_table("ApiSecrets");
        id_key(api_secret);
        api_secret.property("Description", Text).max_length(1000);
        api_secret.property("Value", Text).max_length(4000).required();
        api_secret.property("Expiration", Timestamp).optional();
        api_secret.property("Type", Text).max_length(250).required();
        api_secret.property("Created", Timestamp);
        owned_by(api_secret, "ApiResourceId");
    });

    model.entity("ApiResourceClaim", |api_claim| {
        api_claim.to_table("ApiResourceClaims");
        id_key(api_claim);
        api_claim.property("Type", Text).max_length(200).required();
        owned_by(api_claim, "ApiResourceId");
    });

    model.entity("ApiScope", |api_scope| {
        api_scope.to_table("ApiScopes");

        id_key(api_scope);

        api_scope.property("Name", Text).max_length(200).required();
        api_scope.property("DisplayName", Text).max_length(200);
        api_scope.property("Description", Text).max_length(1000);
        api_scope.property("Required", Boolean);
        api_scope.property("Emphasize", Boolean);
        api_scope.property("ShowInDiscoveryDocument", Boolean);
        owned_by(api_scope, "ApiResourceId");

        api_scope.has_index(&["Name"]).unique();

        cascade(api_scope, "ApiScopeClaim", "ApiScopeId");
    });

    model.entity("ApiScopeClaim", |api_scope_claim| {
        api_scope_claim.to_table("ApiScopeClaims");
        id_key(api_scope_claim);
        api_scope_claim.property("Type", Text).max_length(200).required();
        owned_by(api_scope_claim, "ApiScopeId");
    });

    model.entity("ApiResourceProperty", |property| {
        property.to_table("ApiResourceProperties");
        id_key(property);
        key_value(property);
        owned_by(property, "ApiResourceId");
    });
}
