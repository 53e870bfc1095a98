//! Line-based kiosk session
//!
//! Input lines:
//!
//! | Line | Effect |
//! |------|--------|
//! | `?text` | type `text`; suggestions appear after the quiet period |
//! | `:down` `:up` `:tab` `:esc` `:enter` | navigate suggestions |
//! | any other text | search for it |
//! | `:checkin` | check in the shown guest |
//! | `:status` | reload status |
//! | `:back` | return to search |
//! | `:intensity low\|medium\|high` | highlight strength |
//! | `:quit` | leave |

use kiosk::{Event, Key, Kiosk, KioskState, Notice, View};
use shared::models::{GuestTableStatus, StatusSource};
use shared::GuestRecord;
use shared::error::Severity;
use tokio::io::{AsyncBufReadExt, BufReader};

enum Input {
    Event(Event),
    Search(String),
    Intensity(String),
    Quit,
    Unknown(String),
}

fn parse(line: &str) -> Input {
    if let Some(text) = line.strip_prefix('?') {
        return Input::Event(Event::InputChanged(text.to_string()));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Input::Search(line.to_string());
    };

    let mut parts = command.trim().splitn(2, char::is_whitespace);
    match (parts.next().unwrap_or(""), parts.next()) {
        ("down", _) => Input::Event(Event::Key(Key::Down)),
        ("up", _) => Input::Event(Event::Key(Key::Up)),
        ("tab", _) => Input::Event(Event::Key(Key::Tab)),
        ("esc", _) => Input::Event(Event::Key(Key::Escape)),
        ("enter", _) => Input::Event(Event::Key(Key::Enter)),
        ("checkin", _) => Input::Event(Event::CheckInRequested),
        ("status", _) => Input::Event(Event::RefreshStatus),
        ("back", _) => Input::Event(Event::Back),
        ("intensity", Some(level)) => Input::Intensity(level.trim().to_string()),
        ("quit" | "q", _) => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

pub async fn run(mut kiosk: Kiosk) -> anyhow::Result<()> {
    println!(
        "{} guests, {} tables. Type a name, or ?text for suggestions. :quit to leave.",
        kiosk.store().guests().len(),
        kiosk.store().tables().len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let notices = match parse(line) {
                    Input::Quit => break,
                    Input::Unknown(line) => {
                        println!("unknown command: {line}");
                        continue;
                    }
                    Input::Intensity(level) => {
                        match kiosk.floor_plan_mut().set_intensity(&level) {
                            Ok(intensity) => println!("highlight intensity: {intensity}"),
                            Err(e) => println!("{e}"),
                        }
                        continue;
                    }
                    Input::Search(text) => {
                        let mut notices = kiosk.dispatch(Event::InputChanged(text)).await;
                        notices.extend(kiosk.dispatch(Event::Submit).await);
                        notices
                    }
                    Input::Event(event) => kiosk.dispatch(event).await,
                };
                render(&kiosk, &notices);
            }
            Some(query) = kiosk.next_due() => {
                let notices = kiosk.dispatch(Event::SuggestionsDue(query)).await;
                render(&kiosk, &notices);
            }
        }
    }

    Ok(())
}

fn render(kiosk: &Kiosk, notices: &[Notice]) {
    for line in notices.iter().filter_map(notice_line) {
        println!("{line}");
    }

    let state = kiosk.state();
    match &state.view {
        View::Searching => render_suggestions(state),
        View::ViewingTable(guest) => {
            println!("{}: table {} ({})", guest.name, guest.table, guest.display_description());
            let plan = kiosk.floor_plan();
            if let Some(marker) = plan.highlighted() {
                println!(
                    "  table {} lit at ({}, {}) [{}]",
                    marker.table,
                    marker.position.x,
                    marker.position.y,
                    plan.intensity()
                );
            }
            match &state.status {
                Some(status) => print_status(guest, status),
                None => println!("  loading status..."),
            }
            if state.can_check_in() {
                println!("  :checkin to check in, :back to search again");
            }
        }
    }
}

/// Text shown for a notice; silent errors are only logged
fn notice_line(notice: &Notice) -> Option<String> {
    let line = match notice {
        Notice::CheckedIn { guest, offline: false } => format!("✓ {guest} checked in"),
        Notice::CheckedIn { guest, offline: true } => format!("✓ {guest} checked in (saved offline)"),
        Notice::AlreadyCheckedIn { guest } => format!("{guest} is already checked in"),
        Notice::Error(e) => match e.severity() {
            Severity::Blocking => format!("!! {} ({})", e.message, e.code),
            Severity::Recoverable => format!("! {}", e.message),
            Severity::Silent => {
                tracing::debug!(code = %e.code, error = %e, "Notice absorbed");
                return None;
            }
        },
    };
    Some(line)
}

fn render_suggestions(state: &KioskState) {
    if !state.suggestions_visible {
        return;
    }
    for (i, s) in state.suggestions.iter().enumerate() {
        let cursor = if state.selected == Some(i) { ">" } else { " " };
        println!("{cursor} {:<30} {}", s.name, s.description);
    }
}

pub fn print_status(guest: &GuestRecord, status: &GuestTableStatus) {
    let checked = &status.guest;
    if checked.checked_in {
        let at = checked
            .checked_in_at_utc
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown time".to_string());
        let source = match checked.source {
            StatusSource::Remote => "",
            StatusSource::Local => " (this device)",
            StatusSource::None => "",
        };
        println!("  {} checked in at {at}{source}", guest.name);
    } else {
        println!("  {} not checked in yet", guest.name);
    }

    if status.table.offline {
        println!("  table {}: offline, companions unavailable", guest.table);
    } else if status.table.check_ins.is_empty() {
        println!("  table {}: nobody checked in yet", guest.table);
    } else {
        println!("  table {}:", guest.table);
        for c in &status.table.check_ins {
            println!("    {} ({})", c.guest_name, c.timestamp);
        }
    }
}
