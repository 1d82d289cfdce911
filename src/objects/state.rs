//! Named capabilities attached to simulator objects.
//!
//! Concrete states implement [`ObjectState`]. The object tree stores them
//! type-erased as `Box<dyn AnyState>`, which every `ObjectState` gets for
//! free through a blanket implementation.

use std::any::Any;
use std::fmt;

use bytes::Bytes;

use crate::config::DrawConfig;
use crate::draw::Canvas;

use super::simulator_object::SimulatorObject;

/// A typed capability (dynamics, drive, sensor, ...).
pub trait ObjectState: fmt::Debug + Clone + PartialEq + 'static {
    /// Stable capability name, used as the key in an object's state map and
    /// as the drop name of its snapshot.
    const NAME: &'static str;

    /// Resets data that is only meaningful for a single tick.
    fn clear_transient(&mut self) {}

    /// Draws this capability for `owner`. No-op unless overridden.
    fn draw(&self, _canvas: &mut dyn Canvas, _owner: &SimulatorObject, _config: &DrawConfig) {}

    /// Little-endian encoding of the capability data for outbound drops.
    fn snapshot(&self) -> Option<Bytes> {
        None
    }
}

/// Object-safe view of an [`ObjectState`].
pub trait AnyState: fmt::Debug {
    fn name(&self) -> &'static str;
    fn clone_box(&self) -> Box<dyn AnyState>;
    fn clear_transient(&mut self);
    fn draw(&self, canvas: &mut dyn Canvas, owner: &SimulatorObject, config: &DrawConfig);
    fn snapshot(&self) -> Option<Bytes>;
    /// Value equality with another capability of the same concrete type.
    fn state_eq(&self, other: &dyn AnyState) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: ObjectState> AnyState for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn clone_box(&self) -> Box<dyn AnyState> {
        Box::new(self.clone())
    }

    fn clear_transient(&mut self) {
        ObjectState::clear_transient(self)
    }

    fn draw(&self, canvas: &mut dyn Canvas, owner: &SimulatorObject, config: &DrawConfig) {
        ObjectState::draw(self, canvas, owner, config)
    }

    fn snapshot(&self) -> Option<Bytes> {
        ObjectState::snapshot(self)
    }

    fn state_eq(&self, other: &dyn AnyState) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn AnyState> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn AnyState {
    fn eq(&self, other: &Self) -> bool {
        self.state_eq(other)
    }
}
