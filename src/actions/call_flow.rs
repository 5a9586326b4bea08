//! Call flow state machine for one "call this contact" interaction
//!
//! ```text
//! start ─┬─ several numbers, none remembered ─> PickNumber ─ choose_number ─┐
//!        └─ one number / remembered number ──────────────────────────────────┤
//!                                                                            v
//!          first call ever ─> PromptDirectDial ─ answer_direct_dial_prompt ─┤
//!                                                                            v
//!          direct dial off ─> Dialer | on + permission ─> DirectCall
//!                                   | on, no permission ─> RequestPermission
//!                                       ─ permission_result ─> DirectCall | Dialer
//! ```
//!
//! `dismiss` ends any unfinished flow with `Dismissed`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::failure::ActionFailure;
use super::permissions::{Permission, PermissionChecker};
use super::preferences::ChannelSettings;
use crate::domains::{ContactEntry, PhoneNumber};
use crate::error::ResultExt;
use crate::phone::is_same_number;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CallOutcome {
    DirectCall { number: String },
    Dialer { number: String },
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFlowStep {
    PickNumber(Vec<PhoneNumber>),
    PromptDirectDial { number: String },
    RequestPermission(Permission),
    Finished(CallOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowState {
    Idle,
    AwaitingNumber,
    AwaitingDirectDialAnswer { number: String },
    AwaitingPermission { number: String },
    Done,
}

pub struct CallFlow {
    contact: ContactEntry,
    settings: Arc<ChannelSettings>,
    permissions: Arc<dyn PermissionChecker>,
    state: FlowState,
}

impl CallFlow {
    pub fn new(
        contact: ContactEntry,
        settings: Arc<ChannelSettings>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        CallFlow {
            contact,
            settings,
            permissions,
            state: FlowState::Idle,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == FlowState::Done
    }

    pub fn start(&mut self) -> Result<CallFlowStep, ActionFailure> {
        if self.state != FlowState::Idle {
            return Err(ActionFailure::UnexpectedCallStep { attempted: "start" });
        }
        let numbers = &self.contact.phone_numbers;
        if numbers.is_empty() {
            return Err(ActionFailure::NoPhoneNumber);
        }

        let remembered = self.settings.preferred_number(self.contact.id).and_then(|preferred| {
            numbers
                .iter()
                .find(|n| is_same_number(&n.number, &preferred))
                .map(|n| n.number.clone())
        });
        if let Some(number) = remembered {
            return Ok(self.proceed(number));
        }

        if numbers.len() == 1 {
            let number = numbers[0].number.clone();
            return Ok(self.proceed(number));
        }

        self.state = FlowState::AwaitingNumber;
        Ok(CallFlowStep::PickNumber(numbers.clone()))
    }

    /// Picker answer; `remember` stores the number for this contact
    pub fn choose_number(
        &mut self,
        number: &str,
        remember: bool,
    ) -> Result<CallFlowStep, ActionFailure> {
        if self.state != FlowState::AwaitingNumber {
            return Err(ActionFailure::UnexpectedCallStep {
                attempted: "choose_number",
            });
        }
        let chosen = self
            .contact
            .phone_numbers
            .iter()
            .find(|n| is_same_number(&n.number, number))
            .map(|n| n.number.clone())
            .ok_or(ActionFailure::NoPhoneNumber)?;
        if remember {
            self.settings
                .set_preferred_number(self.contact.id, &chosen)
                .warn_on_err();
        }
        Ok(self.proceed(chosen))
    }

    /// One-time direct-dial prompt answer; closes the gate for the install
    pub fn answer_direct_dial_prompt(&mut self, enable: bool) -> Result<CallFlowStep, ActionFailure> {
        let FlowState::AwaitingDirectDialAnswer { number } = &self.state else {
            return Err(ActionFailure::UnexpectedCallStep {
                attempted: "answer_direct_dial_prompt",
            });
        };
        let number = number.clone();
        self.settings.mark_first_call_prompt_seen().warn_on_err();
        self.settings.set_direct_dial_enabled(enable).warn_on_err();
        Ok(self.dial(number))
    }

    /// Permission callback on the direct-call path; denial opens the dialer
    pub fn permission_result(&mut self, granted: bool) -> Result<CallFlowStep, ActionFailure> {
        let FlowState::AwaitingPermission { number } = &self.state else {
            return Err(ActionFailure::UnexpectedCallStep {
                attempted: "permission_result",
            });
        };
        let number = number.clone();
        let outcome = if granted {
            CallOutcome::DirectCall { number }
        } else {
            CallOutcome::Dialer { number }
        };
        Ok(self.finish(outcome))
    }

    pub fn dismiss(&mut self) -> CallFlowStep {
        if self.state == FlowState::Done {
            return CallFlowStep::Finished(CallOutcome::Dismissed);
        }
        self.finish(CallOutcome::Dismissed)
    }

    fn proceed(&mut self, number: String) -> CallFlowStep {
        if !self.settings.first_call_prompt_seen() {
            self.state = FlowState::AwaitingDirectDialAnswer {
                number: number.clone(),
            };
            return CallFlowStep::PromptDirectDial { number };
        }
        self.dial(number)
    }

    fn dial(&mut self, number: String) -> CallFlowStep {
        if !self.settings.direct_dial_enabled() {
            return self.finish(CallOutcome::Dialer { number });
        }
        if self.permissions.has_permission(Permission::CallPhone) {
            return self.finish(CallOutcome::DirectCall { number });
        }
        self.state = FlowState::AwaitingPermission { number };
        CallFlowStep::RequestPermission(Permission::CallPhone)
    }

    fn finish(&mut self, outcome: CallOutcome) -> CallFlowStep {
        info!(contact_id = self.contact.id, ?outcome, "Call flow finished");
        self.state = FlowState::Done;
        CallFlowStep::Finished(outcome)
    }
}
