//! Dinebox Client - order console over the Order and Catalog services
//!
//! - [`http`]: transport seam ([`HttpClient`]) with a reqwest implementation
//! - [`http_oneshot`]: in-memory transport over an axum router
//! - [`api`]: typed endpoint wrappers ([`DineboxApi`])
//! - [`board`]: the order management view ([`OrderBoard`])

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod http;
pub mod http_oneshot;
pub mod notify;
pub mod session;

pub use api::DineboxApi;
pub use board::{CancelOutcome, OrderBoard, OrderRow, PageInfo};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use http_oneshot::OneshotHttpClient;
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use session::{Session, SessionStore, StoredSession};

// Re-export shared types for convenience
pub use shared::access::{Capabilities, ListSource};
pub use shared::models::{Order, Profile};
pub use shared::order::{OrderStatus, PricingBreakdown};
pub use shared::query::OrderFilters;

/// Network-backed console wired from configuration
///
/// The token comes from the config when set, otherwise from the session file.
pub fn connect(config: &ClientConfig) -> ClientResult<OrderBoard<NetworkHttpClient>> {
    let store = SessionStore::new(&config.session_path);
    let session = Session::resolve(config.token.clone(), &store);
    let http = NetworkHttpClient::new(config)?.with_token(session.token().map(str::to_string));
    Ok(OrderBoard::new(DineboxApi::new(http), TracingNotifier, config.page_size))
}
