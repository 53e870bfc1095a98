//! Wedding check-in kiosk
//!
//! A guest types their name, the kiosk finds their table, lights it on the
//! floor plan and records the check-in.
//!
//! ```text
//! kiosk/src/
//! ├── core/          # config, errors
//! ├── utils/         # logging
//! ├── store.rs       # guest and table datasets
//! ├── matcher.rs     # tiered name matching, suggestions
//! ├── floor_plan.rs  # table markers, highlight
//! ├── controller.rs  # view state machine
//! ├── debounce.rs    # cancellable autocomplete timer
//! └── runtime.rs     # executes controller intents
//! ```

pub mod controller;
pub mod core;
pub mod debounce;
pub mod floor_plan;
pub mod matcher;
pub mod runtime;
pub mod store;
pub mod utils;

pub use controller::{Event, Intent, Key, KioskState, Notice, View, transition};
pub use crate::core::{Config, KioskError, Result};
pub use floor_plan::{FloorPlan, HighlightIntensity, TableMarker};
pub use matcher::{find_guest, suggest};
pub use runtime::Kiosk;
pub use store::DataStore;
pub use utils::init_logger;
