//! Page controller: view selection, sidebar, and the subject accordion.
//!
//! At most one panel is open at a time across all subjects, either a topic
//! checklist or a resource list.

use crate::types::SubjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Countdown,
    Syllabus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    ToggleRow(SubjectId),
    ToggleResource(SubjectId),
    ToggleSidebar,
    CloseSidebar,
    Navigate(View),
}

/// Which panel, if any, is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenPanel<'a> {
    Topics(&'a SubjectId),
    Resources(&'a SubjectId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub view: View,
    pub sidebar_open: bool,
    pub open_row: Option<SubjectId>,
    pub open_resource: Option<SubjectId>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition `(state, action) -> state`.
    pub fn reduce(&self, action: &PageAction) -> PageState {
        let mut next = self.clone();
        match action {
            PageAction::ToggleRow(id) => {
                next.open_resource = None;
                next.open_row = toggled(&self.open_row, id);
            }
            PageAction::ToggleResource(id) => {
                next.open_row = None;
                next.open_resource = toggled(&self.open_resource, id);
            }
            PageAction::ToggleSidebar => next.sidebar_open = !self.sidebar_open,
            PageAction::CloseSidebar => next.sidebar_open = false,
            PageAction::Navigate(view) => {
                next.view = *view;
                next.sidebar_open = false;
            }
        }
        next
    }

    pub fn open_panel(&self) -> Option<OpenPanel<'_>> {
        match (&self.open_row, &self.open_resource) {
            (Some(id), _) => Some(OpenPanel::Topics(id)),
            (None, Some(id)) => Some(OpenPanel::Resources(id)),
            (None, None) => None,
        }
    }
}

fn toggled(current: &Option<SubjectId>, id: &SubjectId) -> Option<SubjectId> {
    if current.as_ref() == Some(id) {
        None
    } else {
        Some(id.clone())
    }
}
