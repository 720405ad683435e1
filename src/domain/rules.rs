//! Business rules guarding self-modification.
//!
//! The update operation runs an explicit, ordered pipeline of named rules
//! after structural validation. Each rule inspects the acting user, the
//! stored record and the submitted form; on violation it reverts the
//! offending form field to the stored value and reports a typed
//! [`Violation`] that ends up as a field error.

use uuid::Uuid;

use super::user::{User, UserForm};
use crate::config::{MSG_NO_SELF_ACCOUNT_TYPE_CHANGE, MSG_NO_SELF_DEACTIVATE};

/// A rejected business rule, scoped to the form field it guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Stable rule identifier
    pub rule: &'static str,
    /// Form field the violation is reported on
    pub field: &'static str,
    /// User-facing message
    pub message: &'static str,
}

/// Rules applied when a user edits a record through the update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfEditRule {
    /// A user may not deactivate their own account.
    DeactivateOwnAccount,
    /// A user may not change their own account type.
    ChangeOwnAccountType,
}

impl SelfEditRule {
    /// Evaluation order for the update operation.
    pub const PIPELINE: [SelfEditRule; 2] = [
        SelfEditRule::DeactivateOwnAccount,
        SelfEditRule::ChangeOwnAccountType,
    ];

    /// Stable identifier, usable in logs and inspection.
    pub fn name(self) -> &'static str {
        match self {
            SelfEditRule::DeactivateOwnAccount => "deactivate-own-account",
            SelfEditRule::ChangeOwnAccountType => "change-own-account-type",
        }
    }

    /// Check a single rule. Only applies when the acting user targets
    /// their own record; on violation the form field is reverted to the
    /// stored value.
    pub fn evaluate(self, actor_id: Uuid, target: &User, form: &mut UserForm) -> Option<Violation> {
        if actor_id != target.id {
            return None;
        }

        match self {
            SelfEditRule::DeactivateOwnAccount => {
                if !form.activated {
                    form.activated = target.activated;
                    return Some(Violation {
                        rule: self.name(),
                        field: "activated",
                        message: MSG_NO_SELF_DEACTIVATE,
                    });
                }
                None
            }
            SelfEditRule::ChangeOwnAccountType => {
                if form.account_type != target.account_type {
                    form.account_type = target.account_type.clone();
                    return Some(Violation {
                        rule: self.name(),
                        field: "account_type",
                        message: MSG_NO_SELF_ACCOUNT_TYPE_CHANGE,
                    });
                }
                None
            }
        }
    }
}

/// Run the full update pipeline in declaration order.
pub fn apply_self_edit_rules(
    actor_id: Uuid,
    target: &User,
    form: &mut UserForm,
) -> Vec<Violation> {
    SelfEditRule::PIPELINE
        .iter()
        .filter_map(|rule| rule.evaluate(actor_id, target, form))
        .collect()
}
