//! Operator action policy per schedule status.
//!
//! [`available_actions`] is the authoritative permission table. Menus use it
//! to decide what to offer, and the HTTP gate calls it again before any
//! operator-initiated change is applied.

use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleStatus;

/// Actions an operator may attempt on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleAction {
    View,
    Edit,
    Delete,
    Cancel,
    Approve,
    Reject,
}

impl ScheduleAction {
    /// All actions, in menu order.
    pub const ALL: [ScheduleAction; 6] = [
        ScheduleAction::View,
        ScheduleAction::Edit,
        ScheduleAction::Delete,
        ScheduleAction::Cancel,
        ScheduleAction::Approve,
        ScheduleAction::Reject,
    ];

    /// Button text for the action.
    pub fn label(self) -> &'static str {
        match self {
            ScheduleAction::View => "View",
            ScheduleAction::Edit => "Edit",
            ScheduleAction::Delete => "Delete",
            ScheduleAction::Cancel => "Cancel",
            ScheduleAction::Approve => "Approve",
            ScheduleAction::Reject => "Reject",
        }
    }

    /// Destructive actions must be confirmed by the operator.
    pub fn is_destructive(self) -> bool {
        matches!(
            self,
            ScheduleAction::Delete | ScheduleAction::Cancel | ScheduleAction::Reject
        )
    }

    /// Confirmation prompt for `title`. Empty for actions that need none.
    pub fn confirm_message(self, title: &str) -> String {
        match self {
            ScheduleAction::View | ScheduleAction::Edit => String::new(),
            ScheduleAction::Delete => format!("Delete broadcast schedule \"{title}\"?"),
            ScheduleAction::Cancel => format!("Cancel broadcast schedule \"{title}\"?"),
            ScheduleAction::Approve => format!("Approve broadcast schedule \"{title}\"?"),
            ScheduleAction::Reject => format!("Reject broadcast schedule \"{title}\"?"),
        }
    }
}

/// Which actions are permitted for a schedule in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleActions {
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_cancel: bool,
    pub can_approve: bool,
    pub can_reject: bool,
}

impl ScheduleActions {
    /// Only `can_view` set.
    pub const VIEW_ONLY: ScheduleActions = ScheduleActions {
        can_view: true,
        can_edit: false,
        can_delete: false,
        can_cancel: false,
        can_approve: false,
        can_reject: false,
    };

    pub fn allows(&self, action: ScheduleAction) -> bool {
        match action {
            ScheduleAction::View => self.can_view,
            ScheduleAction::Edit => self.can_edit,
            ScheduleAction::Delete => self.can_delete,
            ScheduleAction::Cancel => self.can_cancel,
            ScheduleAction::Approve => self.can_approve,
            ScheduleAction::Reject => self.can_reject,
        }
    }

    /// Permitted actions in menu order.
    pub fn permitted(&self) -> Vec<ScheduleAction> {
        ScheduleAction::ALL
            .into_iter()
            .filter(|action| self.allows(*action))
            .collect()
    }
}

/// Permission table for `status`. Total: `Unknown` is view-only.
pub fn available_actions(status: ScheduleStatus) -> ScheduleActions {
    let base = ScheduleActions::VIEW_ONLY;

    match status {
        ScheduleStatus::Draft => ScheduleActions {
            can_edit: true,
            can_delete: true,
            ..base
        },
        ScheduleStatus::PendingApproval => ScheduleActions {
            can_cancel: true,
            can_approve: true,
            can_reject: true,
            ..base
        },
        ScheduleStatus::Ready | ScheduleStatus::Approved => ScheduleActions {
            can_edit: true,
            can_cancel: true,
            ..base
        },
        // Emergency stop only.
        ScheduleStatus::Running => ScheduleActions {
            can_cancel: true,
            ..base
        },
        // Rejected schedules are edited or deleted to start over.
        ScheduleStatus::Rejected => ScheduleActions {
            can_edit: true,
            can_delete: true,
            ..base
        },
        ScheduleStatus::Completed | ScheduleStatus::Canceled | ScheduleStatus::Unknown => base,
    }
}

/// Check a single action against the table.
pub fn can_perform(status: ScheduleStatus, action: ScheduleAction) -> bool {
    available_actions(status).allows(action)
}
