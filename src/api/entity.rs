use log::debug;

use crate::api::error::VCloudAPIError;
use crate::api::transport::Transport;
use crate::api::types::entity::Entity;
use crate::api::types::urn::Urn;
use crate::api::xml;
use crate::api::VCloudAPI;

impl<T: Transport> VCloudAPI<T> {
    /// Look up an entity by URN, `None` when the server does not know it
    pub async fn resolve_entity(&self, urn: &Urn) -> Result<Option<Entity>, VCloudAPIError> {
        let url = self.api_url(&format!("entity/{}", urn))?;
        let response = self.authorized_get(url.clone()).await?;
        if response.status == 404 {
            debug!("{} not found", urn);
            return Ok(None);
        }
        let body = Self::successful_body(&url, response)?;
        xml::decode_entity(&body).map(Some)
    }
}
