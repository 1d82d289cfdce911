//! Outbound snapshots of one capability of one object.
//!
//! The drop is named after the capability; its payload is the object id
//! (`u32`, little-endian) followed by the capability's own encoding.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::DropError;
use crate::objects::{AnyState, ObjectId, SimulatorObject};
use crate::world::SimulatorState;

use super::frame::DropMessage;

const ID_BYTES: usize = 4;

pub fn snapshot_message(object: &SimulatorObject, capability: &str) -> Result<DropMessage, DropError> {
    let state = object
        .state_by_name(capability)
        .ok_or_else(|| DropError::UnknownCapability {
            object: object.id(),
            name: capability.to_string(),
        })?;
    let data = state
        .snapshot()
        .ok_or_else(|| DropError::NoSnapshot(capability.to_string()))?;

    let mut payload = BytesMut::with_capacity(ID_BYTES + data.len());
    payload.put_u32_le(object.id());
    payload.put_slice(&data);
    Ok(DropMessage::new(state.name(), payload.freeze()))
}

/// Snapshots of every capability that has an encoding, for every object.
pub fn snapshot_all(state: &SimulatorState) -> Vec<DropMessage> {
    let mut messages = Vec::new();
    for root in state.objects() {
        for object in root.flatten() {
            for name in object.state_names() {
                if let Ok(message) = snapshot_message(object, name) {
                    messages.push(message);
                }
            }
        }
    }
    messages
}

/// Splits a snapshot payload into the object id and the capability bytes.
pub fn split_snapshot(message: &DropMessage) -> Result<(ObjectId, Bytes), DropError> {
    if message.payload.len() < ID_BYTES {
        return Err(DropError::BadPayloadSize {
            name: "snapshot",
            expected: ID_BYTES,
            actual: message.payload.len(),
        });
    }
    let mut payload = message.payload.clone();
    let id = payload.get_u32_le();
    Ok((id, payload))
}
