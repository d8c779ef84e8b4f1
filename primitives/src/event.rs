//! Change notifications and call receipts.
//!
//! Notifications are emitted synchronously by successful calls and handed
//! to observers after commit. They are never stored as queryable state.

use serde::{Deserialize, Serialize};

use crate::types::{Address, DataKey, DataValue};

/// A change notification emitted by a successful registry call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum Event {
    /// The owner changed. `new_owner` is the zero address on renouncement.
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    /// A data key was written. An empty `data_value` is a clear.
    DataChanged {
        data_key: DataKey,
        data_value: DataValue,
    },
}

impl Event {
    /// Event name as observers see it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::DataChanged { .. } => "DataChanged",
        }
    }

    /// Number of payload bytes carried by this notification.
    pub fn payload_len(&self) -> usize {
        match self {
            Self::OwnershipTransferred { .. } => 64,
            Self::DataChanged { data_value, .. } => 32 + data_value.len(),
        }
    }
}

/// Outcome of a successful gated call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Receipt {
    /// Gas consumed by the call.
    pub gas_used: u64,
    /// Notifications in emission order.
    pub events: Vec<Event>,
}
