use std::collections::BTreeMap;

use crate::config::DrawConfig;
use crate::draw::{Canvas, Color};
use crate::error::ObjectError;
use crate::math::{bound_direction, Transform, Vector2D};
use crate::shapes::Polygon;

use super::state::{AnyState, ObjectState};

/// Identifier of an object, stable for its lifetime and across state clones.
pub type ObjectId = u32;

/// A node of the scene graph.
///
/// Each node owns its children. The link back to the parent is only the
/// parent's id plus a cached copy of the parent's global frame, which the
/// parent refreshes whenever it moves.
///
/// `position` and `direction` are local to the parent (global for roots).
/// The shape, when present, is kept in world coordinates and is moved
/// rigidly together with the object and all its descendants.
#[derive(Debug, Clone)]
pub struct SimulatorObject {
    id: ObjectId,
    label: String,
    position: Vector2D,
    direction: f64,
    /// Global frame of the parent; identity for roots
    frame: Transform,
    shape: Option<Polygon>,
    parent: Option<ObjectId>,
    children: Vec<SimulatorObject>,
    states: BTreeMap<&'static str, Box<dyn AnyState>>,
}

impl SimulatorObject {
    pub fn new(label: impl Into<String>, id: ObjectId) -> Self {
        SimulatorObject {
            id,
            label: label.into(),
            position: Vector2D::ZERO,
            direction: 0.0,
            frame: Transform::identity(),
            shape: None,
            parent: None,
            children: Vec::new(),
            states: BTreeMap::new(),
        }
    }

    /// Builder-style: gives the object a shape, in world coordinates.
    pub fn with_shape(mut self, shape: Polygon) -> Self {
        self.set_shape(Some(shape));
        self
    }

    /// Builder-style: places the object, moving its shape along.
    pub fn at(mut self, position: Vector2D, direction: f64) -> Self {
        self.set_pose(position, direction);
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    // --- Pose ---

    pub fn local_position(&self) -> Vector2D {
        self.position
    }

    pub fn local_direction(&self) -> f64 {
        self.direction
    }

    /// Global frame: the parent's frame composed with the local pose.
    pub fn global_transform(&self) -> Transform {
        self.frame
            .compose(Transform::new(self.position, self.direction))
    }

    pub fn position(&self) -> Vector2D {
        self.global_transform().position
    }

    /// Global direction, in `[-PI, PI)`.
    pub fn direction(&self) -> f64 {
        self.global_transform().direction
    }

    /// Moves the object so that its global position is `position`.
    pub fn set_position(&mut self, position: Vector2D) {
        let direction = self.direction();
        self.set_pose(position, direction);
    }

    /// Turns the object so that its global direction is `direction`.
    pub fn set_direction(&mut self, direction: f64) {
        let position = self.position();
        self.set_pose(position, direction);
    }

    /// Moves the object to a global pose. Its shape and whole subtree follow
    /// rigidly: translated by the position change, then rotated about the
    /// new position by the direction change.
    pub fn set_pose(&mut self, position: Vector2D, direction: f64) {
        let old = self.global_transform();
        let new = Transform::new(position, bound_direction(direction));

        let local = self.frame.relative(new);
        self.position = local.position;
        self.direction = local.direction;

        let new = self.global_transform();
        self.move_shapes(new.position - old.position, new.direction - old.direction, new.position);
        self.refresh_child_frames();
    }

    pub fn translate(&mut self, delta: Vector2D) {
        let position = self.position() + delta;
        self.set_position(position);
    }

    pub fn rotate(&mut self, angle: f64) {
        let direction = self.direction() + angle;
        self.set_direction(direction);
    }

    fn move_shapes(&mut self, delta: Vector2D, angle: f64, center: Vector2D) {
        if let Some(shape) = self.shape.as_mut() {
            shape.translate(delta);
            shape.rotate(angle, center);
        }
        for child in self.children.iter_mut() {
            child.move_shapes(delta, angle, center);
        }
    }

    fn refresh_child_frames(&mut self) {
        let frame = self.global_transform();
        for child in self.children.iter_mut() {
            child.frame = frame;
            child.refresh_child_frames();
        }
    }

    // --- Shape ---

    pub fn shape(&self) -> Option<&Polygon> {
        self.shape.as_ref()
    }

    /// Replaces the shape. The polygon is taken in world coordinates.
    /// Replaces the outline. Outlines are expected counter-clockwise;
    /// a clockwise one gets inward edge normals and is reported.
    pub fn set_shape(&mut self, shape: Option<Polygon>) {
        if let Some(polygon) = &shape {
            if polygon.edge_count() >= 3 && !polygon.is_counter_clockwise() {
                log::warn!(
                    "object {} ('{}') has a clockwise outline; its collision normals point inward",
                    self.id,
                    self.label
                );
            }
        }
        self.shape = shape;
    }

    /// Whether `other` sits at the same place with the same shape.
    pub fn geometry_equals(&self, other: &SimulatorObject) -> bool {
        self.position == other.position
            && self.direction == other.direction
            && self.frame == other.frame
            && self.shape == other.shape
    }

    /// Copies the global pose of `other` onto this object.
    pub fn set_geometry(&mut self, other: &SimulatorObject) {
        self.set_pose(other.position(), other.direction());
    }

    // --- Tree ---

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[SimulatorObject] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [SimulatorObject] {
        &mut self.children
    }

    pub fn is_child(&self, id: ObjectId) -> bool {
        self.children.iter().any(|c| c.id == id)
    }

    /// Records `parent` as this object's parent.
    pub fn set_parent(&mut self, parent: ObjectId) -> Result<(), ObjectError> {
        if let Some(existing) = self.parent {
            return Err(ObjectError::ParentAlreadySet {
                object: self.id,
                parent: existing,
            });
        }
        self.parent = Some(parent);
        Ok(())
    }

    pub fn remove_parent(&mut self) -> Result<ObjectId, ObjectError> {
        self.parent
            .take()
            .ok_or(ObjectError::NoParent { object: self.id })
    }

    /// Attaches `child` below this object, keeping its world placement: the
    /// child's current pose is read as global and converted to local.
    ///
    /// Fails if the child already has a parent or an object with the same id
    /// is already a child. This object is left untouched on error.
    pub fn add_child(&mut self, mut child: SimulatorObject) -> Result<(), ObjectError> {
        if child.parent.is_some() {
            return Err(ObjectError::ChildHasParent { child: child.id });
        }
        if self.is_child(child.id) {
            return Err(ObjectError::DuplicateChild {
                parent: self.id,
                child: child.id,
            });
        }

        let global = child.global_transform();
        child.set_parent(self.id)?;
        child.frame = self.global_transform();
        let local = child.frame.relative(global);
        child.position = local.position;
        child.direction = local.direction;
        child.refresh_child_frames();

        self.children.push(child);
        Ok(())
    }

    /// Detaches the child with `id`, returning it as a root at the same
    /// world placement.
    pub fn remove_child(&mut self, id: ObjectId) -> Result<SimulatorObject, ObjectError> {
        let index = self
            .children
            .iter()
            .position(|c| c.id == id)
            .ok_or(ObjectError::NotAChild {
                parent: self.id,
                child: id,
            })?;

        let mut child = self.children.remove(index);
        let global = child.global_transform();
        child.parent = None;
        child.frame = Transform::identity();
        child.position = global.position;
        child.direction = global.direction;
        child.refresh_child_frames();
        Ok(child)
    }

    /// This object and all its descendants, children before parents.
    pub fn flatten(&self) -> Vec<&SimulatorObject> {
        let mut out = Vec::new();
        self.collect_post_order(&mut out);
        out
    }

    /// All descendants (excluding this object), children before parents.
    pub fn descendants(&self) -> Vec<&SimulatorObject> {
        let mut out = self.flatten();
        out.pop();
        out
    }

    fn collect_post_order<'a>(&'a self, out: &mut Vec<&'a SimulatorObject>) {
        for child in &self.children {
            child.collect_post_order(out);
        }
        out.push(self);
    }

    /// This object or one of its descendants, by id.
    pub fn find(&self, id: ObjectId) -> Option<&SimulatorObject> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: ObjectId) -> Option<&mut SimulatorObject> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Copies a childless object under a new label and id. The copy is a
    /// root at the same world placement.
    pub fn make_copy(
        &self,
        label: impl Into<String>,
        id: ObjectId,
    ) -> Result<SimulatorObject, ObjectError> {
        if !self.children.is_empty() {
            return Err(ObjectError::HasChildren { object: self.id });
        }
        let global = self.global_transform();
        let mut copy = self.clone();
        copy.id = id;
        copy.label = label.into();
        copy.parent = None;
        copy.frame = Transform::identity();
        copy.position = global.position;
        copy.direction = global.direction;
        Ok(copy)
    }

    // --- Capabilities ---

    /// Attaches a capability. Each name may only be attached once.
    pub fn add_state<T: ObjectState>(&mut self, state: T) -> Result<(), ObjectError> {
        self.add_boxed_state(Box::new(state))
    }

    pub fn add_boxed_state(&mut self, state: Box<dyn AnyState>) -> Result<(), ObjectError> {
        let name = state.name();
        if self.states.contains_key(name) {
            return Err(ObjectError::DuplicateState {
                object: self.id,
                name: name.to_string(),
            });
        }
        self.states.insert(name, state);
        Ok(())
    }

    /// Builder-style `add_state`.
    pub fn with_state<T: ObjectState>(mut self, state: T) -> Result<Self, ObjectError> {
        self.add_state(state)?;
        Ok(self)
    }

    pub fn remove_state(&mut self, name: &str) -> Option<Box<dyn AnyState>> {
        self.states.remove(name)
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn state<T: ObjectState>(&self) -> Option<&T> {
        self.states
            .get(T::NAME)
            .and_then(|s| s.as_any().downcast_ref::<T>())
    }

    pub fn state_mut<T: ObjectState>(&mut self) -> Option<&mut T> {
        self.states
            .get_mut(T::NAME)
            .and_then(|s| s.as_any_mut().downcast_mut::<T>())
    }

    pub fn state_by_name(&self, name: &str) -> Option<&dyn AnyState> {
        self.states.get(name).map(|s| s.as_ref())
    }

    /// Capability names in sorted order.
    pub fn state_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.states.keys().copied()
    }

    /// Clears per-tick data of every capability, recursively.
    pub fn clear_transient(&mut self) {
        for state in self.states.values_mut() {
            state.clear_transient();
        }
        for child in self.children.iter_mut() {
            child.clear_transient();
        }
    }

    /// Same id, label, geometry, capabilities and children, recursively.
    pub fn deep_equals(&self, other: &SimulatorObject) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.parent == other.parent
            && self.geometry_equals(other)
            && self.states.len() == other.states.len()
            && self
                .states
                .iter()
                .all(|(name, s)| other.states.get(name).is_some_and(|o| s == o))
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.deep_equals(b))
    }

    // --- Drawing ---

    /// Draws children first, then this object's shape and capabilities.
    pub fn draw(&self, canvas: &mut dyn Canvas, config: &DrawConfig) {
        for child in &self.children {
            child.draw(canvas, config);
        }
        if let Some(shape) = &self.shape {
            canvas.draw_polygon(shape, Color::BLACK, !config.svg);
        }
        for state in self.states.values() {
            state.draw(canvas, self, config);
        }
    }
}
