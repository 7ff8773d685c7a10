//! Typed wrappers over the Order and Catalog service endpoints
//!
//! Every endpoint answers with the `{isSuccess, message, data, errors}`
//! envelope. [`DineboxApi`] unwraps it, turning `isSuccess = false` into a
//! [`ClientError`] the same way a non-2xx status is.

mod account;
mod cart;
mod catalog;
mod orders;

use crate::http::{HttpClient, error_from_envelope};
use crate::{ClientError, ClientResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::ApiResponse;

/// Typed API client over any [`HttpClient`]
#[derive(Debug, Clone)]
pub struct DineboxApi<C> {
    http: C,
}

impl<C: HttpClient> DineboxApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token().is_some_and(|t| !t.trim().is_empty())
    }

    /// Requests without a token are never sent
    fn require_token(&self) -> ClientResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::Unauthorized)
        }
    }

    /// GET and return `data`, which must be present
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.require_token()?;
        let envelope: Option<ApiResponse<T>> = self.http.get(path).await?;
        require_data(path, envelope)
    }

    /// GET a list; an absent `data` is an empty list
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        self.require_token()?;
        let envelope: Option<ApiResponse<Vec<T>>> = self.http.get(path).await?;
        Ok(open_envelope(envelope)?.unwrap_or_default())
    }

    async fn post_data<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.require_token()?;
        let envelope: Option<ApiResponse<T>> = self.http.post(path, body).await?;
        require_data(path, envelope)
    }

    /// Calls whose payload the console ignores; only success matters
    async fn get_unit(&self, path: &str) -> ClientResult<()> {
        self.require_token()?;
        let envelope: Option<ApiResponse<serde_json::Value>> = self.http.get(path).await?;
        open_envelope(envelope).map(drop)
    }

    async fn post_unit<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.require_token()?;
        let envelope: Option<ApiResponse<serde_json::Value>> = self.http.post(path, body).await?;
        open_envelope(envelope).map(drop)
    }

    async fn put_unit<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.require_token()?;
        let envelope: Option<ApiResponse<serde_json::Value>> = self.http.put(path, body).await?;
        open_envelope(envelope).map(drop)
    }
}

/// Envelope → `data`; an empty body counts as success without data
fn open_envelope<T>(envelope: Option<ApiResponse<T>>) -> ClientResult<Option<T>> {
    match envelope {
        None => Ok(None),
        Some(resp) if resp.is_success => Ok(resp.data),
        Some(resp) => Err(error_from_envelope(resp.message, resp.errors)),
    }
}

fn require_data<T>(path: &str, envelope: Option<ApiResponse<T>>) -> ClientResult<T> {
    open_envelope(envelope)?
        .ok_or_else(|| ClientError::InvalidResponse(format!("missing data in response to {}", path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{ApiErrorEntry, ErrorCode};

    #[test]
    fn test_open_envelope() {
        assert_eq!(open_envelope::<u8>(None).unwrap(), None);
        assert_eq!(open_envelope(Some(ApiResponse::ok(3))).unwrap(), Some(3));

        let failed = ApiResponse::<u8>::failure(
            "nope",
            vec![ApiErrorEntry {
                code: Some("2001".into()),
                message: None,
                missing_options: None,
            }],
        );
        match open_envelope(Some(failed)) {
            Err(ClientError::Api { code, message }) => {
                assert_eq!(code, ErrorCode::PermissionDenied);
                assert_eq!(message, "nope");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_require_data() {
        let err = require_data::<u8>("/x", Some(ApiResponse {
            is_success: true,
            message: None,
            data: None,
            errors: Vec::new(),
        }))
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
