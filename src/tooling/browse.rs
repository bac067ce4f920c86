//! Interactive browse session.
//!
//! Menus are built from [`PageState`] and the checklist state by
//! [`menu_entries`], so what a selection does can be checked without a
//! terminal. The loop itself only prompts and dispatches.

use crate::checklist::{flatten, render_subject, ChecklistAction};
use crate::config::CountdownConfig;
use crate::countdown::{time_left, CountdownDisplay};
use crate::error::ApiError;
use crate::page::{OpenPanel, PageAction, PageState, View};
use crate::session::ChecklistSession;
use crate::tooling::format::{format_countdown, format_row};
use crate::types::{NodeId, SubjectId};
use chrono::Local;
use dialoguer::Select;

/// What selecting a menu line does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Page(PageAction),
    ToggleCountdownDisplay,
    RefreshCountdown,
    Checkbox { subject: SubjectId, path: Vec<NodeId> },
    Expand { subject: SubjectId, path: Vec<NodeId> },
    Info,
    Quit,
}

/// Menu lines for the current page, label first.
pub fn menu_entries(page: &PageState, session: &ChecklistSession) -> Vec<(String, MenuEntry)> {
    let mut entries = Vec::new();
    if page.sidebar_open {
        for (label, action) in [
            ("Countdown", PageAction::Navigate(View::Countdown)),
            ("Syllabus", PageAction::Navigate(View::Syllabus)),
            ("Close menu", PageAction::CloseSidebar),
        ] {
            entries.push((label.to_string(), MenuEntry::Page(action)));
        }
        return entries;
    }

    match page.view {
        View::Countdown => {
            entries.push(("Toggle days view".to_string(), MenuEntry::ToggleCountdownDisplay));
            entries.push(("Refresh".to_string(), MenuEntry::RefreshCountdown));
        }
        View::Syllabus => {
            for subject in &session.forest().subjects {
                let progress = session.progress(subject);
                entries.push((
                    format!("{} ({}/{})", subject.name, progress.checked, progress.total),
                    MenuEntry::Page(PageAction::ToggleRow(subject.id.clone())),
                ));
                entries.push((
                    format!("  Resources: {}", subject.name),
                    MenuEntry::Page(PageAction::ToggleResource(subject.id.clone())),
                ));
                match page.open_panel() {
                    Some(OpenPanel::Topics(id)) if id == &subject.id => {
                        let rows = render_subject(subject, session.state(), false);
                        for row in flatten(&rows) {
                            let indent = "    ".to_string() + &"  ".repeat(row.depth);
                            entries.push((
                                format!("{}{}", indent, format_row(row)),
                                MenuEntry::Checkbox {
                                    subject: subject.id.clone(),
                                    path: row.path.clone(),
                                },
                            ));
                            if row.has_children {
                                let verb = if row.expanded { "collapse" } else { "expand" };
                                entries.push((
                                    format!("{}    ({} {})", indent, verb, row.name),
                                    MenuEntry::Expand {
                                        subject: subject.id.clone(),
                                        path: row.path.clone(),
                                    },
                                ));
                            }
                        }
                    }
                    Some(OpenPanel::Resources(id)) if id == &subject.id => {
                        for resource in &subject.resources {
                            entries.push((
                                format!("    {} <{}>", resource.label, resource.url),
                                MenuEntry::Info,
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    entries.push(("Menu".to_string(), MenuEntry::Page(PageAction::ToggleSidebar)));
    entries.push(("Quit".to_string(), MenuEntry::Quit));
    entries
}

/// Run the interactive loop until the user quits.
pub fn run_browse(
    session: &mut ChecklistSession,
    countdown: &CountdownConfig,
) -> Result<String, ApiError> {
    let target = countdown.target_datetime()?;
    let mut page = PageState::new();
    let mut display = CountdownDisplay::default();
    let mut cursor = 0usize;

    loop {
        let prompt = if page.sidebar_open {
            "Menu".to_string()
        } else {
            match page.view {
                View::Countdown => {
                    let left = time_left(&target, &Local::now());
                    format_countdown(&left, display)
                }
                View::Syllabus => "Syllabus".to_string(),
            }
        };
        let entries = menu_entries(&page, session);
        let labels: Vec<&str> = entries.iter().map(|(label, _)| label.as_str()).collect();
        let selection = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(cursor.min(labels.len().saturating_sub(1)))
            .interact()?;
        cursor = selection;

        match &entries[selection].1 {
            MenuEntry::Page(action) => {
                page = page.reduce(action);
                cursor = 0;
            }
            MenuEntry::ToggleCountdownDisplay => display = display.toggled(),
            MenuEntry::RefreshCountdown | MenuEntry::Info => {}
            MenuEntry::Checkbox { subject, path } => {
                session.dispatch(subject, &ChecklistAction::ClickCheckbox { path: path.clone() })?;
            }
            MenuEntry::Expand { subject, path } => {
                session.dispatch(subject, &ChecklistAction::ToggleNodeOpen { path: path.clone() })?;
            }
            MenuEntry::Quit => break,
        }
    }
    Ok("Goodbye.".to_string())
}
