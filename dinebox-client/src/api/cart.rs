use super::DineboxApi;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};
use shared::models::{AddToCartRequest, MenuItem};

impl<C: HttpClient> DineboxApi<C> {
    /// Add a line to the viewer's cart
    ///
    /// A `MissingRequiredOptions` rejection comes back as
    /// [`ClientError::MissingOptions`].
    pub async fn add_to_cart(&self, request: &AddToCartRequest) -> ClientResult<()> {
        if request.quantity == 0 {
            return Err(ClientError::Validation("quantity must be at least 1".into()));
        }
        self.post_unit("/api/Cart/AddToCart", request).await
    }

    /// [`Self::add_to_cart`] after checking `item`'s required option types locally
    pub async fn add_item_to_cart(&self, item: &MenuItem, request: &AddToCartRequest) -> ClientResult<()> {
        let missing = request.missing_required_options(item);
        if !missing.is_empty() {
            return Err(ClientError::MissingOptions(missing));
        }
        self.add_to_cart(request).await
    }
}
