//! Kiosk runtime - executes controller intents
//!
//! Owns the controller state and every collaborator the intents touch:
//! the floor plan, the autocomplete debouncer and the check-in client.
//! Results of async intents are fed back into the controller as events
//! until the queue drains.

use crate::controller::{Event, Intent, KioskState, Notice, transition};
use crate::core::Config;
use crate::debounce::Debouncer;
use crate::floor_plan::FloorPlan;
use crate::store::DataStore;
use checkin_client::CheckInClient;
use shared::AppError;
use std::collections::VecDeque;
use tokio::sync::mpsc;

pub struct Kiosk {
    store: DataStore,
    client: CheckInClient,
    floor_plan: FloorPlan,
    debouncer: Debouncer<String>,
    due: mpsc::UnboundedReceiver<String>,
    state: KioskState,
}

impl Kiosk {
    pub fn new(store: DataStore, client: CheckInClient, config: &Config) -> Self {
        let floor_plan = FloorPlan::new(&store, config.highlight);
        let (debouncer, due) = Debouncer::new(config.debounce());
        Self {
            store,
            client,
            floor_plan,
            debouncer,
            due,
            state: KioskState::default(),
        }
    }

    pub fn state(&self) -> &KioskState {
        &self.state
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn client(&self) -> &CheckInClient {
        &self.client
    }

    pub fn floor_plan(&self) -> &FloorPlan {
        &self.floor_plan
    }

    pub fn floor_plan_mut(&mut self) -> &mut FloorPlan {
        &mut self.floor_plan
    }

    /// Wait for the next input whose quiet period elapsed
    ///
    /// Cancel safe, so it can sit in a `select!` next to user input.
    pub async fn next_due(&mut self) -> Option<String> {
        self.due.recv().await
    }

    /// Apply one event and everything it triggers; returns the notices raised
    pub async fn dispatch(&mut self, event: Event) -> Vec<Notice> {
        let mut notices = Vec::new();
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, intents) = transition(state, event, self.store.guests());
            self.state = state;

            for intent in intents {
                if let Some(event) = self.execute(intent, &mut notices).await {
                    queue.push_back(event);
                }
            }
        }
        notices
    }

    async fn execute(&mut self, intent: Intent, notices: &mut Vec<Notice>) -> Option<Event> {
        match intent {
            Intent::ScheduleSuggestions(query) => self.debouncer.schedule(query),
            Intent::CancelSuggestions => self.debouncer.cancel(),
            Intent::HighlightTable(table) => {
                self.floor_plan.highlight(table);
            }
            Intent::ClearHighlight => self.floor_plan.clear_highlight(),
            Intent::FetchStatus(guest) => {
                let status = self.client.get_guest_and_table_status(&guest).await;
                tracing::debug!(
                    guest_id = %guest.id,
                    checked_in = status.guest.checked_in,
                    table_offline = status.table.offline,
                    "Status loaded"
                );
                return Some(Event::StatusLoaded {
                    guest_id: guest.id,
                    status,
                });
            }
            Intent::RecordCheckIn(guest) => {
                let result = self
                    .client
                    .record_check_in(&guest)
                    .await
                    .map_err(|e| AppError::with_message(e.code(), e.to_string()));
                return Some(Event::CheckInFinished {
                    guest_id: guest.id,
                    result,
                });
            }
            Intent::Notify(notice) => {
                if let Notice::Error(e) = &notice {
                    tracing::debug!(code = %e.code, message = %e.message, "Notice raised");
                }
                notices.push(notice);
            }
        }
        None
    }
}

impl std::fmt::Debug for Kiosk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kiosk")
            .field("client", &self.client)
            .field("state", &self.state)
            .finish()
    }
}
