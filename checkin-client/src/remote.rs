//! Remote check-in store abstraction
//!
//! [`crate::HttpClient`] is the production implementation. The trait keeps
//! the reconciliation logic in [`crate::CheckInClient`] independent of the
//! transport.

use crate::ClientResult;
use async_trait::async_trait;
use shared::TableId;
use shared::models::CheckInRecord;
use shared::response::{
    CheckInResponse, GuestAndTableStatusResponse, StatusResponse, TableStatusResponse,
};

#[async_trait]
pub trait RemoteCheckIn: Send + Sync {
    /// `checkin` action
    async fn check_in(&self, record: &CheckInRecord) -> ClientResult<CheckInResponse>;

    /// `checkStatus` action
    async fn check_status(&self, guest_id: &str) -> ClientResult<StatusResponse>;

    /// `getTableStatus` action
    async fn table_status(&self, table: TableId) -> ClientResult<TableStatusResponse>;

    /// `getGuestAndTableStatus` action
    async fn guest_and_table_status(
        &self,
        guest_id: &str,
        table: TableId,
    ) -> ClientResult<GuestAndTableStatusResponse>;
}
