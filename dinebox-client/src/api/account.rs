use super::DineboxApi;
use crate::ClientResult;
use crate::http::HttpClient;
use shared::models::Profile;

impl<C: HttpClient> DineboxApi<C> {
    /// Profile of the token's owner, including roles
    pub async fn profile(&self) -> ClientResult<Profile> {
        self.get_data("/api/Account/Profile").await
    }
}
