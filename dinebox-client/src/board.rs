//! Order board - the order management view
//!
//! Holds the current list, filters, viewer capabilities and the open detail
//! order. All state lives behind one lock that is never held across a
//! request; whichever response lands last is what the board shows.
//!
//! ```text
//! set_filters / set_page ──┐
//! poll tick (detail closed)├──→ refresh ──→ Global: POST GetAllWithPagination
//! close_detail ────────────┘              └→ Personal: GET GetAllForUser + status filter
//! ```

use chrono::{DateTime, Utc};
use shared::access::{Capabilities, ListSource, derive_capabilities};
use shared::models::{Order, Profile};
use shared::order::{
    OrderActions, OrderStatus, PricingBreakdown, StatusDisplay, available_actions, is_cancelable,
    reconcile,
};
use shared::query::{OrderFilters, PaginationRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::DineboxApi;
use crate::http::HttpClient;
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::{ClientError, ClientResult};

/// Paging info of the current list (personal lists are a single page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

/// One line of the order table
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: i64,
    pub number: String,
    pub status: OrderStatus,
    pub badge: StatusDisplay,
    pub customer: Option<String>,
    pub branch: Option<String>,
    pub placed_at: Option<DateTime<Utc>>,
    pub is_pickup: bool,
    pub total_with_fee: f64,
    pub actions: OrderActions,
}

/// Result of a cancel request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// The viewer declined the confirmation; nothing was sent
    Declined,
}

#[derive(Debug)]
struct BoardState {
    capabilities: Capabilities,
    profile: Option<Profile>,
    filters: OrderFilters,
    page_number: u32,
    orders: Vec<Order>,
    total_count: u64,
    total_pages: u32,
    detail: Option<Order>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::default(),
            profile: None,
            filters: OrderFilters::default(),
            page_number: 1,
            orders: Vec::new(),
            total_count: 0,
            total_pages: 0,
            detail: None,
        }
    }
}

impl BoardState {
    fn find(&self, id: i64) -> Option<&Order> {
        self.detail
            .as_ref()
            .filter(|o| o.id == id)
            .or_else(|| self.orders.iter().find(|o| o.id == id))
    }

    fn patch_status(&mut self, id: i64, status: OrderStatus) {
        let now = Utc::now();
        for order in self
            .orders
            .iter_mut()
            .chain(self.detail.iter_mut())
            .filter(|o| o.id == id)
        {
            order.status = status;
            order.updated_at = Some(now);
            if status == OrderStatus::Delivered {
                order.delivered_at = Some(now);
            }
        }
    }

    /// Filters as sent: branch staff are pinned to their branch, and the
    /// user filter only applies to viewers allowed to use it
    fn effective_filters(&self) -> OrderFilters {
        let mut filters = self.filters.clone();
        if !self.capabilities.can_filter_by_user {
            filters.user_id = None;
        }
        if !self.capabilities.can_see_all_branches {
            if let Some(branch_id) = self.profile.as_ref().and_then(|p| p.branch_id) {
                filters.branch_id = Some(branch_id);
            }
        }
        filters
    }
}

/// Order management view
pub struct OrderBoard<C, N = TracingNotifier> {
    api: DineboxApi<C>,
    notifier: N,
    page_size: u32,
    state: RwLock<BoardState>,
    detail_open: watch::Sender<bool>,
}

impl<C: HttpClient, N: Notifier> OrderBoard<C, N> {
    pub fn new(api: DineboxApi<C>, notifier: N, page_size: u32) -> Self {
        let (detail_open, _) = watch::channel(false);
        Self {
            api,
            notifier,
            page_size: page_size.max(1),
            state: RwLock::new(BoardState::default()),
            detail_open,
        }
    }

    pub fn api(&self) -> &DineboxApi<C> {
        &self.api
    }

    /// Fetch the profile and derive what the viewer may do
    ///
    /// Without a token, or when the profile call fails, the viewer gets no
    /// capabilities and the personal list.
    pub async fn load_capabilities(&self) -> Capabilities {
        let profile = if self.api.is_authenticated() {
            match self.api.profile().await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!(error = %e, "profile fetch failed, falling back to personal view");
                    None
                }
            }
        } else {
            tracing::debug!("no session token, skipping profile fetch");
            None
        };

        let capabilities = profile
            .as_ref()
            .map(|p| derive_capabilities(&p.roles))
            .unwrap_or_default();
        tracing::info!(?capabilities, source = ?capabilities.list_source(), "viewer capabilities");

        let mut state = self.state.write().await;
        state.capabilities = capabilities;
        state.profile = profile;
        capabilities
    }

    pub async fn capabilities(&self) -> Capabilities {
        self.state.read().await.capabilities
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.state.read().await.profile.clone()
    }

    pub async fn filters(&self) -> OrderFilters {
        self.state.read().await.filters.clone()
    }

    /// Replace the filters, go back to the first page and reload
    pub async fn set_filters(&self, filters: OrderFilters) -> ClientResult<()> {
        {
            let mut state = self.state.write().await;
            state.filters = filters;
            state.page_number = 1;
        }
        self.refresh().await
    }

    /// Jump to a page of the global list
    pub async fn set_page(&self, page_number: u32) -> ClientResult<()> {
        self.state.write().await.page_number = page_number.max(1);
        self.refresh().await
    }

    /// Reload the list from the source the capabilities select
    ///
    /// On failure the previous list stays in place and the viewer is told.
    pub async fn refresh(&self) -> ClientResult<()> {
        if !self.api.is_authenticated() {
            let mut state = self.state.write().await;
            state.orders.clear();
            state.total_count = 0;
            state.total_pages = 0;
            return Ok(());
        }

        let (source, filters, page_number) = {
            let state = self.state.read().await;
            (
                state.capabilities.list_source(),
                state.effective_filters(),
                state.page_number,
            )
        };

        let fetched = match source {
            ListSource::Global => {
                let request = PaginationRequest::new(page_number, self.page_size)
                    .with_filters(filters.to_criteria());
                self.api.search_orders(&request).await.map(|page| {
                    let pages = page.page_count();
                    (page.items, page.total_count, page.page_number, pages)
                })
            }
            ListSource::Personal => self.api.personal_orders().await.map(|orders| {
                let orders = filters.apply_personal(orders);
                let count = orders.len() as u64;
                (orders, count, 1, u32::from(count > 0))
            }),
        };

        match fetched {
            Ok((orders, total_count, page_number, total_pages)) => {
                tracing::debug!(?source, count = orders.len(), total_count, "orders refreshed");
                let mut state = self.state.write().await;
                state.orders = orders;
                state.total_count = total_count;
                state.page_number = page_number.max(1);
                state.total_pages = total_pages;
                Ok(())
            }
            Err(e) => {
                if e.code().category().is_access_problem() {
                    tracing::warn!(?source, error = %e, "orders rejected for this viewer");
                } else {
                    tracing::error!(?source, error = %e, "failed to load orders");
                }
                self.notifier.notify(Notice::error(e.user_message())).await;
                Err(e)
            }
        }
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.state.read().await.orders.clone()
    }

    pub async fn page_info(&self) -> PageInfo {
        let state = self.state.read().await;
        PageInfo {
            page_number: state.page_number,
            page_size: self.page_size,
            total_count: state.total_count,
            total_pages: state.total_pages,
        }
    }

    /// Table rows for the current list
    pub async fn rows(&self) -> Vec<OrderRow> {
        let state = self.state.read().await;
        let capabilities = state.capabilities;
        state
            .orders
            .iter()
            .map(|order| OrderRow {
                id: order.id,
                number: order.display_number(),
                status: order.status,
                badge: order.status.display(),
                customer: order.user_name.clone(),
                branch: order.branch_name.clone(),
                placed_at: order.created_at,
                is_pickup: order.is_pickup(),
                total_with_fee: reconcile(order).total_with_fee,
                actions: available_actions(order.status, &capabilities),
            })
            .collect()
    }

    /// Move an order to `status`
    ///
    /// The local copy changes only after the Order Service accepts.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> ClientResult<()> {
        let result = self.try_update_status(id, status).await;
        match &result {
            Ok(()) => {
                tracing::info!(order_id = id, %status, "order status updated");
                self.notifier
                    .notify(Notice::success(format!("Order status changed to {}", status.display().label)))
                    .await;
            }
            Err(e) => {
                tracing::warn!(order_id = id, %status, error = %e, "status update failed");
                self.notifier.notify(Notice::error(e.user_message())).await;
            }
        }
        result
    }

    async fn try_update_status(&self, id: i64, status: OrderStatus) -> ClientResult<()> {
        {
            let state = self.state.read().await;
            if status != OrderStatus::Cancelled && !state.capabilities.can_mutate_status {
                return Err(ClientError::Forbidden("changing order status".into()));
            }
            if let Some(current) = state.find(id).map(|o| o.status) {
                if !current.can_transition_to(status) {
                    return Err(ClientError::InvalidTransition {
                        from: current,
                        to: status,
                    });
                }
            }
        }

        self.api.update_status(id, status).await?;
        self.state.write().await.patch_status(id, status);
        Ok(())
    }

    /// Move an order one step along the forward path
    pub async fn advance(&self, id: i64) -> ClientResult<OrderStatus> {
        let current = self.status_of(id).await?;
        let next = current.next().ok_or(ClientError::InvalidTransition {
            from: current,
            to: current,
        })?;
        self.update_status(id, next).await?;
        Ok(next)
    }

    /// Cancel after the viewer confirms
    ///
    /// `confirm` sees the order and decides; a `false` sends nothing. A
    /// delivered or already cancelled order is refused before asking.
    pub async fn cancel_order<F>(&self, id: i64, confirm: F) -> ClientResult<CancelOutcome>
    where
        F: FnOnce(&Order) -> bool,
    {
        let order = self.order(id).await?;
        if !is_cancelable(order.status) {
            let err = ClientError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            };
            self.notifier.notify(Notice::error(err.user_message())).await;
            return Err(err);
        }
        if !confirm(&order) {
            tracing::debug!(order_id = id, "cancel declined");
            return Ok(CancelOutcome::Declined);
        }
        self.update_status(id, OrderStatus::Cancelled).await?;
        Ok(CancelOutcome::Cancelled)
    }

    /// Reprint an order's receipt (staff only)
    pub async fn reprint(&self, id: i64) -> ClientResult<()> {
        let result = if self.capabilities().await.can_reprint {
            self.api.reprint(id).await
        } else {
            Err(ClientError::Forbidden("reprinting orders".into()))
        };

        match &result {
            Ok(()) => {
                tracing::info!(order_id = id, "reprint requested");
                self.notifier.notify(Notice::success("Order sent to the printer")).await;
            }
            Err(e) => {
                tracing::warn!(order_id = id, error = %e, "reprint failed");
                self.notifier.notify(Notice::error(e.user_message())).await;
            }
        }
        result
    }

    /// Load an order into the detail view and pause polling
    pub async fn open_detail(&self, id: i64) -> ClientResult<Order> {
        match self.api.order_by_id(id).await {
            Ok(order) => {
                self.state.write().await.detail = Some(order.clone());
                self.set_detail_open(true);
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(order_id = id, error = %e, "failed to open order detail");
                self.notifier.notify(Notice::error(e.user_message())).await;
                Err(e)
            }
        }
    }

    /// Close the detail view; a running poller refreshes at once
    ///
    /// Closing when nothing is open leaves the poller alone.
    pub async fn close_detail(&self) {
        self.state.write().await.detail = None;
        self.set_detail_open(false);
    }

    /// Wakes the poller only on an actual open/closed change
    fn set_detail_open(&self, open: bool) {
        self.detail_open.send_if_modified(|current| {
            let changed = *current != open;
            *current = open;
            changed
        });
    }

    pub async fn detail(&self) -> Option<Order> {
        self.state.read().await.detail.clone()
    }

    pub fn is_detail_open(&self) -> bool {
        *self.detail_open.borrow()
    }

    /// Price breakdown of the order in the detail view
    pub async fn detail_breakdown(&self) -> Option<PricingBreakdown> {
        self.state.read().await.detail.as_ref().map(reconcile)
    }

    async fn status_of(&self, id: i64) -> ClientResult<OrderStatus> {
        Ok(self.order(id).await?.status)
    }

    /// Local copy when the board has one, otherwise fetched
    async fn order(&self, id: i64) -> ClientResult<Order> {
        if let Some(order) = self.state.read().await.find(id).cloned() {
            return Ok(order);
        }
        self.api.order_by_id(id).await
    }
}

impl<C, N> OrderBoard<C, N>
where
    C: HttpClient + 'static,
    N: Notifier + 'static,
{
    /// Refresh every `period` until `cancel` fires
    ///
    /// Ticks are skipped while a detail view is open; closing it triggers an
    /// immediate refresh and restarts the period.
    pub fn spawn_poller(self: &Arc<Self>, period: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        let board = Arc::clone(self);
        let mut detail_rx = self.detail_open.subscribe();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(?period, "order poller started");

            loop {
                let paused = *detail_rx.borrow();
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = detail_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let open = *detail_rx.borrow_and_update();
                        if !open {
                            board.poll_once().await;
                            ticker.reset();
                        }
                    }
                    _ = ticker.tick(), if !paused => board.poll_once().await,
                }
            }

            tracing::debug!("order poller stopped");
        })
    }

    async fn poll_once(&self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!(error = %e, "poll refresh failed");
        }
    }
}
