//! HTTP transport to the remote check-in endpoint

use crate::remote::RemoteCheckIn;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::TableId;
use shared::models::CheckInRecord;
use shared::request::RemoteRequest;
use shared::response::{
    CheckInResponse, GuestAndTableStatusResponse, StatusResponse, TableStatusResponse,
};
use std::time::Duration;

/// HTTP client posting JSON actions to a single endpoint URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoint_url: String,
}

impl HttpClient {
    /// Create a new HTTP client with the given request timeout
    pub fn new(endpoint_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.into(),
        })
    }

    /// Post one action and decode the response body
    pub async fn post<T: DeserializeOwned>(&self, request: &RemoteRequest) -> ClientResult<T> {
        tracing::debug!(action = request.action(), "Posting remote action");

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::InvalidResponse(format!("HTTP {}: {}", status, text)));
        }

        serde_json::from_str(&text).map_err(Into::into)
    }
}

#[async_trait]
impl RemoteCheckIn for HttpClient {
    async fn check_in(&self, record: &CheckInRecord) -> ClientResult<CheckInResponse> {
        self.post(&RemoteRequest::CheckIn {
            guest_id: record.guest_id.clone(),
            guest_name: record.guest_name.clone(),
            table: record.table,
            device_id: record.device_id.clone(),
        })
        .await
    }

    async fn check_status(&self, guest_id: &str) -> ClientResult<StatusResponse> {
        self.post(&RemoteRequest::CheckStatus {
            guest_id: guest_id.to_string(),
        })
        .await
    }

    async fn table_status(&self, table: TableId) -> ClientResult<TableStatusResponse> {
        self.post(&RemoteRequest::GetTableStatus { table }).await
    }

    async fn guest_and_table_status(
        &self,
        guest_id: &str,
        table: TableId,
    ) -> ClientResult<GuestAndTableStatusResponse> {
        self.post(&RemoteRequest::GetGuestAndTableStatus {
            guest_id: guest_id.to_string(),
            table,
        })
        .await
    }
}
