use crate::error::ObjectError;
use crate::objects::{ObjectId, ObjectState, SimulatorObject};
use crate::states::Omnidrive;

/// One buffer of the simulated world: the root objects, plus the ids of the
/// roots that carry a drive (the agents).
///
/// Cloning deep-copies every object tree and keeps all ids.
#[derive(Debug, Clone, Default)]
pub struct SimulatorState {
    objects: Vec<SimulatorObject>,
    agents: Vec<ObjectId>,
}

impl SimulatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root object. Fails if any id in its subtree is already in use.
    pub fn add_object(&mut self, object: SimulatorObject) -> Result<(), ObjectError> {
        for node in object.flatten() {
            if self.object(node.id()).is_some() {
                return Err(ObjectError::DuplicateId { object: node.id() });
            }
        }
        if object.has_state(Omnidrive::NAME) {
            self.agents.push(object.id());
        }
        self.objects.push(object);
        Ok(())
    }

    pub fn objects(&self) -> &[SimulatorObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [SimulatorObject] {
        &mut self.objects
    }

    /// Ids of the root objects that carry a drive.
    pub fn agents(&self) -> &[ObjectId] {
        &self.agents
    }

    /// Any object, root or descendant, by id.
    pub fn object(&self, id: ObjectId) -> Option<&SimulatorObject> {
        self.objects.iter().find_map(|o| o.find(id))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SimulatorObject> {
        self.objects.iter_mut().find_map(|o| o.find_mut(id))
    }

    /// The root whose tree contains the object `id`.
    pub fn root_of(&self, id: ObjectId) -> Option<&SimulatorObject> {
        self.objects.iter().find(|root| root.find(id).is_some())
    }

    /// The object in this state with the same id as `other`, typically
    /// taken from the other buffer.
    pub fn corresponding(&self, other: &SimulatorObject) -> Option<&SimulatorObject> {
        self.object(other.id())
    }

    pub fn corresponding_mut(&mut self, other: &SimulatorObject) -> Option<&mut SimulatorObject> {
        self.object_mut(other.id())
    }

    /// Every object (descendants included) carrying the capability `name`,
    /// root by root, children before parents.
    pub fn objects_with(&self, name: &str) -> Vec<&SimulatorObject> {
        self.objects
            .iter()
            .flat_map(|root| root.flatten())
            .filter(|o| o.has_state(name))
            .collect()
    }

    /// A fresh id, one above the largest in use.
    pub fn next_id(&self) -> ObjectId {
        self.objects
            .iter()
            .flat_map(|root| root.flatten())
            .map(|o| o.id())
            .max()
            .map_or(0, |id| id.saturating_add(1))
    }

    pub fn clear_transient(&mut self) {
        for object in self.objects.iter_mut() {
            object.clear_transient();
        }
    }

    /// Object-by-object deep equality (ids, geometry, capabilities).
    pub fn deep_equals(&self, other: &SimulatorState) -> bool {
        self.agents == other.agents
            && self.objects.len() == other.objects.len()
            && self
                .objects
                .iter()
                .zip(&other.objects)
                .all(|(a, b)| a.deep_equals(b))
    }
}
