//! The drop protocol: framed, named binary messages exchanged with remote
//! controllers and viewers.

pub mod control;
pub mod frame;
pub mod queue;
pub mod snapshot;

pub use control::ControlDrop;
pub use frame::{DropMessage, FrameCodec};
pub use queue::DropQueue;
pub use snapshot::{snapshot_all, snapshot_message, split_snapshot};

use crate::error::DropError;

/// A decoded inbound drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundDrop {
    Control(ControlDrop),
}

impl InboundDrop {
    /// Decodes a drop by name. Unknown names are reported and rejected.
    pub fn decode(message: &DropMessage) -> Result<Self, DropError> {
        match message.name.as_str() {
            ControlDrop::NAME => Ok(InboundDrop::Control(ControlDrop::decode(&message.payload)?)),
            other => {
                log::warn!("ignoring unknown drop '{}'", other);
                Err(DropError::UnknownDrop(other.to_string()))
            }
        }
    }
}
