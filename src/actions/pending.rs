//! Actions parked until the call permission comes back

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::failure::ActionFailure;
use super::methods::{ContactMethod, MethodData, RowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingKind {
    WhatsAppCall,
    WhatsAppVideoCall,
    SignalCall,
    SignalVideoCall,
}

/// A call waiting on the permission callback, identified by its provider data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub kind: PendingKind,
    pub row_id: RowId,
    pub datum: String,
}

impl PendingAction {
    /// Park-able form of `method`; None when it needs no call permission
    pub fn from_method(method: &ContactMethod) -> Result<Option<Self>, ActionFailure> {
        let kind = match method {
            ContactMethod::WhatsAppCall(_) => PendingKind::WhatsAppCall,
            ContactMethod::WhatsAppVideoCall(_) => PendingKind::WhatsAppVideoCall,
            ContactMethod::SignalCall(_) => PendingKind::SignalCall,
            ContactMethod::SignalVideoCall(_) => PendingKind::SignalVideoCall,
            _ => return Ok(None),
        };
        let row_id = method.row_id().ok_or(ActionFailure::MissingProviderRow)?;
        Ok(Some(PendingAction {
            kind,
            row_id,
            datum: method.datum().to_string(),
        }))
    }

    /// Rebuild the contact method to launch once permission is granted
    pub fn to_method(&self) -> ContactMethod {
        let data = MethodData::new(self.datum.clone(), Some(self.row_id));
        match self.kind {
            PendingKind::WhatsAppCall => ContactMethod::WhatsAppCall(data),
            PendingKind::WhatsAppVideoCall => ContactMethod::WhatsAppVideoCall(data),
            PendingKind::SignalCall => ContactMethod::SignalCall(data),
            PendingKind::SignalVideoCall => ContactMethod::SignalVideoCall(data),
        }
    }
}

/// Holds at most one pending action; a new one replaces the old
#[derive(Debug, Default)]
pub struct PendingActionSlot {
    slot: Mutex<Option<PendingAction>>,
}

impl PendingActionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, action: PendingAction) {
        if let Some(replaced) = self.slot.lock().replace(action) {
            debug!(kind = ?replaced.kind, "Replaced pending action");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Consume the pending action; the slot is empty afterwards either way
    pub fn on_permission_result(&self, granted: bool) -> Result<PendingAction, ActionFailure> {
        let action = self.slot.lock().take().ok_or(ActionFailure::NoPendingAction)?;
        if granted {
            info!(kind = ?action.kind, row_id = action.row_id, "Resuming pending action");
            Ok(action)
        } else {
            info!(kind = ?action.kind, "Pending action discarded, permission denied");
            Err(ActionFailure::PermissionDenied)
        }
    }
}
