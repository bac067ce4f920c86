//! Format countdown, subjects, checklist trees, and resources as text.

use crate::checklist::{ChecklistState, Progress, RenderedNode};
use crate::countdown::{CountdownDisplay, TimeLeft};
use crate::types::{Forest, Subject};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_countdown(left: &TimeLeft, display: CountdownDisplay) -> String {
    match display {
        CountdownDisplay::Segmented => display.render(left),
        CountdownDisplay::TotalDays => format!("{} days", display.render(left)),
    }
}

fn format_progress(progress: &Progress) -> String {
    format!(
        "{}/{} ({}%)",
        progress.checked,
        progress.total,
        progress.percent()
    )
}

/// Subject table with checklist progress.
pub fn format_subjects_text(forest: &Forest, state: &ChecklistState) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Syllabus")));
    if forest.subjects.is_empty() {
        out.push_str("No subjects in document.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Subject", "Progress", "Resources"]);
    for subject in &forest.subjects {
        table.add_row(vec![
            subject.id.to_string(),
            subject.name.clone(),
            format_progress(&state.progress(subject)),
            subject.resources.len().to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_subjects_json(forest: &Forest, state: &ChecklistState) -> serde_json::Value {
    let subjects: Vec<_> = forest
        .subjects
        .iter()
        .map(|subject| {
            let progress = state.progress(subject);
            serde_json::json!({
                "id": subject.id,
                "name": subject.name,
                "checked": progress.checked,
                "total": progress.total,
                "resources": subject.resources.len(),
            })
        })
        .collect();
    serde_json::json!({ "subjects": subjects })
}

/// One line of a checklist row, without indentation.
pub fn format_row(row: &RenderedNode) -> String {
    let checkbox = if row.checked { "[x]" } else { "[ ]" };
    let marker = match (row.has_children, row.expanded) {
        (false, _) => "",
        (true, true) => " ▾",
        (true, false) => " ▸",
    };
    format!("{} {}{}", checkbox, row.name, marker)
}

/// Indented checklist tree; each line ends with the node key to address it by.
pub fn format_tree_text(subject: &Subject, rows: &[RenderedNode]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("{} ({})", subject.name, subject.id))
    ));
    if rows.is_empty() {
        out.push_str("No topics.\n");
        return out;
    }
    push_rows(&mut out, rows);
    out
}

fn push_rows(out: &mut String, rows: &[RenderedNode]) {
    for row in rows {
        out.push_str(&format!(
            "{}{}  {}\n",
            "  ".repeat(row.depth),
            format_row(row),
            row.key.dimmed()
        ));
        push_rows(out, &row.children);
    }
}

pub fn format_resources_text(subject: &Subject) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("{} resources", subject.name))
    ));
    if subject.resources.is_empty() {
        out.push_str("No resources.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Resource", "Link"]);
    for resource in &subject.resources {
        table.add_row(vec![resource.label.clone(), resource.url.clone()]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
