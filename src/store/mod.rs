//! Store interfaces for the configuration and operational data.

use crate::core::models::{
    ApiResource, ApiScope, Client, ClientSummary, DeviceAuthorization, GrantFilter,
    IdentityResource, PersistedGrant, Resources,
};
use crate::core::types::{ClientId, DeviceCode, GrantKey, UserCode};
use crate::Error;

pub trait ClientStore {
    fn find_client_by_id(&self, client_id: &ClientId) -> Result<Option<Client>, Error>;
    /// Stores the client with all of its collections and returns it as read
    /// back, with its generated id.
    fn put_client(&self, client: &Client) -> Result<Client, Error>;
    /// Replaces every column and collection of an existing client.
    fn update_client(&self, client: &Client) -> Result<Client, Error>;
    fn delete_client(&self, client_id: &ClientId) -> Result<(), Error>;
    fn list_clients(&self) -> Result<Vec<ClientSummary>, Error>;
    fn is_origin_allowed(&self, origin: &str) -> Result<bool, Error>;
}

pub trait ResourceStore {
    fn find_identity_resources_by_scope_name(
        &self,
        scope_names: &[String],
    ) -> Result<Vec<IdentityResource>, Error>;
    fn find_api_scopes_by_name(&self, scope_names: &[String]) -> Result<Vec<ApiScope>, Error>;
    fn find_api_resources_by_scope_name(
        &self,
        scope_names: &[String],
    ) -> Result<Vec<ApiResource>, Error>;
    fn find_api_resource_by_name(&self, name: &str) -> Result<Option<ApiResource>, Error>;
    fn get_all_resources(&self) -> Result<Resources, Error>;
    fn put_identity_resource(&self, resource: &IdentityResource) -> Result<IdentityResource, Error>;
    fn put_api_resource(&self, resource: &ApiResource) -> Result<ApiResource, Error>;
    fn delete_identity_resource(&self, name: &str) -> Result<(), Error>;
    fn delete_api_resource(&self, name: &str) -> Result<(), Error>;
}

pub trait PersistedGrantStore {
    /// Inserts the grant, or overwrites the grant stored under the same key.
    fn store(&self, grant: &PersistedGrant) -> Result<(), Error>;
    fn get(&self, key: &GrantKey) -> Result<Option<PersistedGrant>, Error>;
    fn get_all(&self, filter: &GrantFilter) -> Result<Vec<PersistedGrant>, Error>;
    fn remove(&self, key: &GrantKey) -> Result<(), Error>;
    /// Returns the number of grants removed.
    fn remove_all(&self, filter: &GrantFilter) -> Result<usize, Error>;
}

pub trait DeviceFlowStore {
    fn store_device_authorization(
        &self,
        device_code: &DeviceCode,
        user_code: &UserCode,
        authorization: &DeviceAuthorization,
    ) -> Result<(), Error>;
    fn find_by_user_code(&self, user_code: &UserCode) -> Result<Option<DeviceAuthorization>, Error>;
    fn find_by_device_code(
        &self,
        device_code: &DeviceCode,
    ) -> Result<Option<DeviceAuthorization>, Error>;
    fn update_by_user_code(
        &self,
        user_code: &UserCode,
        authorization: &DeviceAuthorization,
    ) -> Result<(), Error>;
    fn remove_by_device_code(&self, device_code: &DeviceCode) -> Result<(), Error>;
}
