use super::{DineboxApi, open_envelope};
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};
use shared::models::{Order, OrderStatusUpdate};
use shared::order::OrderStatus;
use shared::query::PaginationRequest;
use shared::response::{ApiResponse, PagedResult};

impl<C: HttpClient> DineboxApi<C> {
    /// The viewer's own orders, unpaginated
    pub async fn personal_orders(&self) -> ClientResult<Vec<Order>> {
        self.get_list("/api/Orders/GetAllForUser").await
    }

    /// Paginated search over all orders
    pub async fn search_orders(&self, request: &PaginationRequest) -> ClientResult<PagedResult<Order>> {
        self.post_data("/api/Orders/GetAllWithPagination", request)
            .await
    }

    pub async fn order_by_id(&self, id: i64) -> ClientResult<Order> {
        self.require_token()?;
        let path = format!("/api/Orders/GetById/{}", id);
        let envelope: Option<ApiResponse<Order>> = self.http.get(&path).await?;
        open_envelope(envelope)?.ok_or_else(|| ClientError::NotFound(format!("order {}", id)))
    }

    /// Ask the Order Service to move an order to `status`
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> ClientResult<()> {
        let path = format!("/api/Orders/UpdateStatus/{}", id);
        self.put_unit(&path, &OrderStatusUpdate { order_status: status })
            .await
    }

    /// Send the order's receipt to the printer again
    pub async fn reprint(&self, id: i64) -> ClientResult<()> {
        self.get_unit(&format!("/api/Orders/ReprintOrder/{}", id))
            .await
    }
}
