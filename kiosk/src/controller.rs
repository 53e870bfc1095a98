//! Presentation Controller
//!
//! A pure state machine: `transition(state, event)` returns the next state
//! and the side effects to perform. The runtime executes the intents and
//! feeds their results back as events.
//!
//! ```text
//! Searching ──(match)──▶ ViewingTable(guest)
//!     ▲                        │
//!     └─────────(back)─────────┘
//! ```

use crate::matcher::{find_guest, suggest, wants_suggestions};
use shared::models::{CheckInOutcome, GuestRecord, GuestTableStatus, Suggestion};
use shared::{AppError, TableId};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Searching,
    ViewingTable(GuestRecord),
}

/// Everything the view renders
#[derive(Debug, Clone, Default)]
pub struct KioskState {
    pub view: View,
    pub input: String,
    pub suggestions: Vec<Suggestion>,
    pub suggestions_visible: bool,
    pub selected: Option<usize>,
    /// Status of the viewed guest, once loaded
    pub status: Option<GuestTableStatus>,
    pub checking_in: bool,
}

impl KioskState {
    pub fn guest(&self) -> Option<&GuestRecord> {
        match &self.view {
            View::ViewingTable(guest) => Some(guest),
            View::Searching => None,
        }
    }

    /// Check-in is offered only for a guest not yet known to be checked in
    pub fn can_check_in(&self) -> bool {
        self.guest().is_some()
            && !self.checking_in
            && !self.status.as_ref().is_some_and(|s| s.guest.checked_in)
    }

    fn hide_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestions_visible = false;
        self.selected = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Escape,
    Tab,
    Enter,
}

#[derive(Debug, Clone)]
pub enum Event {
    InputChanged(String),
    /// The debounce period for this input elapsed
    SuggestionsDue(String),
    Key(Key),
    Submit,
    SelectSuggestion(usize),
    Back,
    RefreshStatus,
    StatusLoaded {
        guest_id: String,
        status: GuestTableStatus,
    },
    CheckInRequested,
    CheckInFinished {
        guest_id: String,
        result: Result<CheckInOutcome, AppError>,
    },
}

/// User-facing notification
#[derive(Debug, Clone)]
pub enum Notice {
    CheckedIn { guest: String, offline: bool },
    AlreadyCheckedIn { guest: String },
    Error(AppError),
}

/// Side effect requested by a transition
#[derive(Debug, Clone)]
pub enum Intent {
    ScheduleSuggestions(String),
    CancelSuggestions,
    HighlightTable(TableId),
    ClearHighlight,
    FetchStatus(GuestRecord),
    RecordCheckIn(GuestRecord),
    Notify(Notice),
}

pub fn transition(
    mut state: KioskState,
    event: Event,
    guests: &[GuestRecord],
) -> (KioskState, Vec<Intent>) {
    let mut intents = Vec::new();

    match event {
        Event::InputChanged(text) => {
            if state.guest().is_some() {
                return (state, intents);
            }
            state.selected = None;
            if wants_suggestions(&text) {
                intents.push(Intent::ScheduleSuggestions(text.clone()));
            } else {
                state.hide_suggestions();
                intents.push(Intent::CancelSuggestions);
            }
            state.input = text;
        }

        Event::SuggestionsDue(query) => {
            // superseded input
            if query != state.input || state.guest().is_some() {
                return (state, intents);
            }
            state.suggestions = suggest(guests, &query);
            state.suggestions_visible = !state.suggestions.is_empty();
            state.selected = None;
        }

        Event::Key(key) => {
            let open = state.suggestions_visible && !state.suggestions.is_empty();
            match key {
                Key::Down if open => {
                    let last = state.suggestions.len() - 1;
                    state.selected = Some(state.selected.map_or(0, |i| (i + 1).min(last)));
                }
                Key::Up if open => {
                    state.selected = match state.selected {
                        Some(0) | None => None,
                        Some(i) => Some(i - 1),
                    };
                }
                Key::Escape if open => state.hide_suggestions(),
                Key::Tab => {
                    if let (true, Some(i)) = (open, state.selected) {
                        return commit(state, i, guests);
                    }
                }
                Key::Enter => match (open, state.selected) {
                    (true, Some(i)) => return commit(state, i, guests),
                    _ => return submit(state, guests),
                },
                _ => {}
            }
        }

        Event::Submit => return submit(state, guests),

        Event::SelectSuggestion(index) => return commit(state, index, guests),

        Event::Back => {
            state.view = View::Searching;
            state.input.clear();
            state.status = None;
            state.checking_in = false;
            state.hide_suggestions();
            intents.push(Intent::CancelSuggestions);
            intents.push(Intent::ClearHighlight);
        }

        Event::RefreshStatus => {
            if let Some(guest) = state.guest() {
                intents.push(Intent::FetchStatus(guest.clone()));
            }
        }

        Event::StatusLoaded { guest_id, status } => {
            if state.guest().is_some_and(|g| g.id == guest_id) {
                state.status = Some(status);
            }
        }

        Event::CheckInRequested => {
            if let Some(guest) = state.guest().cloned() {
                if state.status.as_ref().is_some_and(|s| s.guest.checked_in) {
                    intents.push(Intent::Notify(Notice::AlreadyCheckedIn { guest: guest.name }));
                } else if !state.checking_in {
                    state.checking_in = true;
                    intents.push(Intent::RecordCheckIn(guest));
                }
            }
        }

        Event::CheckInFinished { guest_id, result } => {
            let Some(guest) = state.guest().filter(|g| g.id == guest_id).cloned() else {
                return (state, intents);
            };
            state.checking_in = false;
            match result {
                Ok(outcome) => {
                    intents.push(Intent::Notify(Notice::CheckedIn {
                        guest: guest.name.clone(),
                        offline: outcome.is_offline(),
                    }));
                    intents.push(Intent::FetchStatus(guest));
                }
                Err(e) => intents.push(Intent::Notify(Notice::Error(e))),
            }
        }
    }

    (state, intents)
}

/// Open the guest behind suggestion `index`
///
/// The suggestion names its guest exactly, so the fuzzy matcher is skipped;
/// names differing only in case would otherwise resolve to the first one.
fn commit(mut state: KioskState, index: usize, guests: &[GuestRecord]) -> (KioskState, Vec<Intent>) {
    let Some(suggestion) = state.suggestions.get(index) else {
        return (state, Vec::new());
    };
    state.input = suggestion.name.clone();
    match guests.iter().find(|g| g.name == state.input) {
        Some(guest) => open_guest(state, guest),
        None => submit(state, guests),
    }
}

fn submit(mut state: KioskState, guests: &[GuestRecord]) -> (KioskState, Vec<Intent>) {
    if state.guest().is_some() {
        return (state, Vec::new());
    }

    let query = state.input.trim().to_string();
    if query.is_empty() {
        state.hide_suggestions();
        let intents = vec![
            Intent::CancelSuggestions,
            Intent::Notify(Notice::Error(AppError::empty_query())),
        ];
        return (state, intents);
    }

    match find_guest(guests, &query) {
        Some(guest) => {
            tracing::info!(query = %query, guest = %guest.name, table = %guest.table, "Guest found");
            open_guest(state, guest)
        }
        None => {
            tracing::info!(query = %query, "No guest matched");
            state.hide_suggestions();
            let intents = vec![
                Intent::CancelSuggestions,
                Intent::Notify(Notice::Error(AppError::no_match(query))),
            ];
            (state, intents)
        }
    }
}

fn open_guest(mut state: KioskState, guest: &GuestRecord) -> (KioskState, Vec<Intent>) {
    if state.guest().is_some() {
        return (state, Vec::new());
    }
    state.hide_suggestions();
    state.view = View::ViewingTable(guest.clone());
    state.status = None;
    let intents = vec![
        Intent::CancelSuggestions,
        Intent::HighlightTable(guest.table),
        Intent::FetchStatus(guest.clone()),
    ];
    (state, intents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CheckInStatus, TableStatus};
    use shared::ErrorCode;

    fn guests() -> Vec<GuestRecord> {
        ["Nguyen Van A", "Nguyen Van B", "Tran Thi C"]
            .iter()
            .enumerate()
            .map(|(i, name)| GuestRecord {
                name: name.to_string(),
                id: (i + 1).to_string(),
                table: TableId::new(i as u32 + 1),
                description: None,
            })
            .collect()
    }

    fn run(state: KioskState, events: Vec<Event>) -> (KioskState, Vec<Intent>) {
        let guests = guests();
        let mut intents = Vec::new();
        let mut state = state;
        for event in events {
            let (next, mut new) = transition(state, event, &guests);
            state = next;
            intents.append(&mut new);
        }
        (state, intents)
    }

    fn with_suggestions(query: &str) -> KioskState {
        run(
            KioskState::default(),
            vec![
                Event::InputChanged(query.into()),
                Event::SuggestionsDue(query.into()),
            ],
        )
        .0
    }

    #[test]
    fn test_short_input_hides_suggestions() {
        let (state, intents) = run(
            with_suggestions("ng"),
            vec![Event::InputChanged("n".into())],
        );
        assert!(!state.suggestions_visible);
        assert!(state.suggestions.is_empty());
        assert!(matches!(&intents[..], [Intent::CancelSuggestions]));
    }

    #[test]
    fn test_input_schedules_suggestions() {
        let (state, intents) = run(KioskState::default(), vec![Event::InputChanged("ngu".into())]);
        assert!(matches!(&intents[..], [Intent::ScheduleSuggestions(q)] if q == "ngu"));
        assert!(!state.suggestions_visible);
    }

    #[test]
    fn test_stale_suggestions_ignored() {
        let (state, _) = run(
            KioskState::default(),
            vec![
                Event::InputChanged("ngu".into()),
                Event::InputChanged("tran".into()),
                Event::SuggestionsDue("ngu".into()),
            ],
        );
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_keyboard_navigation() {
        let state = with_suggestions("nguyen");
        assert_eq!(state.suggestions.len(), 2);

        let (state, _) = run(state, vec![Event::Key(Key::Down)]);
        assert_eq!(state.selected, Some(0));
        let (state, _) = run(state, vec![Event::Key(Key::Down), Event::Key(Key::Down)]);
        assert_eq!(state.selected, Some(1));
        let (state, _) = run(state, vec![Event::Key(Key::Up), Event::Key(Key::Up)]);
        assert_eq!(state.selected, None);

        let (state, intents) = run(state, vec![Event::Key(Key::Tab)]);
        assert!(intents.is_empty());
        assert_eq!(state.view, View::Searching);

        let (state, _) = run(state, vec![Event::Key(Key::Escape)]);
        assert!(!state.suggestions_visible);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_input_change_resets_selection() {
        let (state, _) = run(with_suggestions("nguyen"), vec![Event::Key(Key::Down)]);
        let (state, _) = run(state, vec![Event::InputChanged("nguyen v".into())]);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_tab_commits_selection() {
        let (state, intents) = run(
            with_suggestions("nguyen"),
            vec![Event::Key(Key::Down), Event::Key(Key::Down), Event::Key(Key::Tab)],
        );
        assert_eq!(state.input, "Nguyen Van B");
        assert_eq!(state.guest().unwrap().id, "2");
        assert!(!state.suggestions_visible);
        assert!(intents.iter().any(|i| matches!(i, Intent::HighlightTable(t) if *t == TableId::new(2))));
        assert!(intents.iter().any(|i| matches!(i, Intent::FetchStatus(g) if g.id == "2")));
    }

    #[test]
    fn test_selection_opens_that_exact_guest() {
        let list: Vec<GuestRecord> = [("ANN", 1), ("Ann", 2)]
            .iter()
            .map(|(name, table)| GuestRecord {
                name: name.to_string(),
                id: format!("{name}-{table}"),
                table: TableId::new(*table),
                description: None,
            })
            .collect();

        let mut state = KioskState::default();
        for event in [
            Event::InputChanged("an".into()),
            Event::SuggestionsDue("an".into()),
            Event::Key(Key::Down),
            Event::Key(Key::Down),
            Event::Key(Key::Tab),
        ] {
            state = transition(state, event, &list).0;
        }
        let guest = state.guest().unwrap();
        assert_eq!(guest.name, "Ann");
        assert_eq!(guest.table, TableId::new(2));
    }

    #[test]
    fn test_enter_without_selection_searches_input() {
        let (state, _) = run(with_suggestions("tran"), vec![Event::Key(Key::Enter)]);
        assert_eq!(state.guest().unwrap().name, "Tran Thi C");
    }

    #[test]
    fn test_no_match_stays_searching() {
        let (state, intents) = run(
            KioskState::default(),
            vec![Event::InputChanged("xyz".into()), Event::Submit],
        );
        assert_eq!(state.view, View::Searching);
        let err = intents.iter().find_map(|i| match i {
            Intent::Notify(Notice::Error(e)) => Some(e),
            _ => None,
        });
        assert_eq!(err.unwrap().code, ErrorCode::GuestNotFound);
    }

    #[test]
    fn test_empty_submit_rejected() {
        let (state, intents) = run(
            KioskState::default(),
            vec![Event::InputChanged("   ".into()), Event::Submit],
        );
        assert_eq!(state.view, View::Searching);
        assert!(intents.iter().any(|i| matches!(
            i,
            Intent::Notify(Notice::Error(e)) if e.code == ErrorCode::EmptyQuery
        )));
    }

    #[test]
    fn test_back_clears_guest_and_highlight() {
        let (state, _) = run(
            KioskState::default(),
            vec![Event::InputChanged("tran thi c".into()), Event::Submit],
        );
        assert!(state.guest().is_some());

        let (state, intents) = run(state, vec![Event::Back]);
        assert_eq!(state.view, View::Searching);
        assert!(state.input.is_empty());
        assert!(state.status.is_none());
        assert!(intents.iter().any(|i| matches!(i, Intent::ClearHighlight)));
    }

    fn viewing(checked_in: bool) -> KioskState {
        let (state, _) = run(
            KioskState::default(),
            vec![
                Event::InputChanged("tran thi c".into()),
                Event::Submit,
                Event::StatusLoaded {
                    guest_id: "3".into(),
                    status: GuestTableStatus {
                        guest: CheckInStatus::remote(checked_in, None),
                        table: TableStatus::online(vec![]),
                    },
                },
            ],
        );
        state
    }

    #[test]
    fn test_check_in_flow() {
        let state = viewing(false);
        assert!(state.can_check_in());

        let (state, intents) = run(state, vec![Event::CheckInRequested, Event::CheckInRequested]);
        assert!(state.checking_in);
        assert_eq!(
            intents
                .iter()
                .filter(|i| matches!(i, Intent::RecordCheckIn(_)))
                .count(),
            1
        );

        let (state, intents) = run(
            state,
            vec![Event::CheckInFinished {
                guest_id: "3".into(),
                result: Ok(CheckInOutcome {
                    recorded_remotely: false,
                    recorded_locally: true,
                }),
            }],
        );
        assert!(!state.checking_in);
        assert!(matches!(
            &intents[0],
            Intent::Notify(Notice::CheckedIn { offline: true, .. })
        ));
        assert!(matches!(&intents[1], Intent::FetchStatus(g) if g.id == "3"));
    }

    #[test]
    fn test_already_checked_in() {
        let state = viewing(true);
        assert!(!state.can_check_in());
        let (state, intents) = run(state, vec![Event::CheckInRequested]);
        assert!(!state.checking_in);
        assert!(matches!(&intents[..], [Intent::Notify(Notice::AlreadyCheckedIn { .. })]));
    }

    #[test]
    fn test_status_for_other_guest_ignored() {
        let (state, _) = run(
            viewing(false),
            vec![Event::StatusLoaded {
                guest_id: "1".into(),
                status: GuestTableStatus {
                    guest: CheckInStatus::remote(true, None),
                    table: TableStatus::offline(),
                },
            }],
        );
        assert!(!state.status.unwrap().guest.checked_in);
    }
}
