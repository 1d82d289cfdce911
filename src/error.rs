//! Error types for the object tree, the drop protocol and configuration.

use thiserror::Error;

use crate::objects::ObjectId;

/// Structural errors on the object tree. The tree is left unmodified
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// A capability with this name is already attached to the object.
    #[error("object {object} already has a '{name}' state")]
    DuplicateState { object: ObjectId, name: String },
    /// The child is already attached to another parent.
    #[error("object {child} already has a parent")]
    ChildHasParent { child: ObjectId },
    /// The child is already in this object's children list.
    #[error("object {child} is already a child of {parent}")]
    DuplicateChild { parent: ObjectId, child: ObjectId },
    /// Removal of an object that is not a child of this one.
    #[error("object {child} is not a child of {parent}")]
    NotAChild { parent: ObjectId, child: ObjectId },
    /// `set_parent` on an object that already has a parent.
    #[error("object {object} already has parent {parent}")]
    ParentAlreadySet { object: ObjectId, parent: ObjectId },
    /// `remove_parent` on a parentless object.
    #[error("object {object} has no parent")]
    NoParent { object: ObjectId },
    /// Copying an object that owns children.
    #[error("cannot copy object {object}: it has children")]
    HasChildren { object: ObjectId },
    /// An object with this id is already part of the state.
    #[error("object id {object} is already in use")]
    DuplicateId { object: ObjectId },
}

/// Errors raised while framing, decoding or applying drops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropError {
    #[error("drop name length {len} exceeds the {max} byte ceiling")]
    NameTooLong { len: usize, max: usize },
    #[error("negative {field} length {len}")]
    NegativeLength { field: &'static str, len: i32 },
    #[error("drop payload length {len} exceeds the {max} byte ceiling")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("drop name is not valid UTF-8")]
    InvalidUtf8,
    /// No decoder is registered for this drop name.
    #[error("unknown drop '{0}'")]
    UnknownDrop(String),
    #[error("'{name}' payload is {actual} bytes, expected {expected}")]
    BadPayloadSize {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An enum discriminant outside the known range.
    #[error("invalid {field} value {value}")]
    InvalidMode { field: &'static str, value: i32 },
    #[error("no object with id {0}")]
    UnknownObject(ObjectId),
    #[error("object {object} has no '{name}' state")]
    UnknownCapability { object: ObjectId, name: String },
    /// The capability exists but has nothing to serialize.
    #[error("'{0}' state has no snapshot encoding")]
    NoSnapshot(String),
}

/// Errors raised while loading a [`crate::config::SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
