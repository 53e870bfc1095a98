//! Data models for the check-in kiosk

pub mod checkin;
pub mod guest;
pub mod table;

pub use checkin::{
    CheckInOutcome, CheckInRecord, CheckInStatus, GuestTableStatus, StatusSource, TableCheckIn,
    TableStatus,
};
pub use guest::{GuestEntry, GuestIdValue, GuestRecord, Suggestion};
pub use table::{
    DEFAULT_TABLE_RADIUS, GridConfig, LayoutError, Placement, Position, TableDataset, TableLayout,
};
