use crate::components::{
    AccelerometerComponent, BumpSensorComponent, Component, DynamicsComponent, LightComponent,
    OmnidriveComponent,
};
use crate::config::SimConfig;
use crate::draw::Canvas;
use crate::drops::{snapshot_all, snapshot_message, ControlDrop, DropMessage, DropQueue, InboundDrop};
use crate::error::{DropError, ObjectError};
use crate::objects::{ObjectId, SimulatorObject};

use super::state::SimulatorState;

/// Drives the simulation: owns the `current` and `next` buffers and the
/// ordered component pipeline.
///
/// Components read `current` and write `next`; after the last one the
/// buffers are swapped, so the old `current` is reused as the scratch
/// buffer of the following tick. Its forces, contacts and bumps are
/// cleared before the pipeline runs.
pub struct Engine {
    config: SimConfig,
    current: SimulatorState,
    next: SimulatorState,
    components: Vec<Box<dyn Component>>,
    time_ms: i64,
    outbox: DropQueue,
}

impl Engine {
    /// Creates an engine with an empty world and no components.
    pub fn new(config: SimConfig) -> Self {
        log::info!(
            "creating engine: gravity {}, drop queue {}",
            config.gravity,
            config.drops.max_queued
        );
        let outbox = DropQueue::new(config.drops.max_queued);
        Self {
            config,
            current: SimulatorState::new(),
            next: SimulatorState::new(),
            components: Vec::new(),
            time_ms: 0,
            outbox,
        }
    }

    /// An engine running the usual pipeline: dynamics, the drive, then the
    /// sensors.
    pub fn with_standard_components(config: SimConfig) -> Self {
        let mut engine = Self::new(config);
        let gravity = engine.config.gravity;
        let force_gain = engine.config.drive.force_gain;
        engine.add_component(Box::new(DynamicsComponent::new(gravity)));
        engine.add_component(Box::new(OmnidriveComponent::new(force_gain)));
        engine.add_component(Box::new(BumpSensorComponent::new()));
        engine.add_component(Box::new(AccelerometerComponent::new()));
        engine.add_component(Box::new(LightComponent::new()));
        engine
    }

    /// Appends a component to the end of the pipeline.
    pub fn add_component(&mut self, component: Box<dyn Component>) {
        log::debug!("adding component '{}'", component.name());
        self.components.push(component);
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulated time elapsed so far, in milliseconds.
    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }

    /// Adds a root object to both buffers.
    pub fn add_object(&mut self, object: SimulatorObject) -> Result<(), ObjectError> {
        self.current.add_object(object.clone())?;
        self.next.add_object(object)
    }

    pub fn current(&self) -> &SimulatorState {
        &self.current
    }

    pub fn next(&self) -> &SimulatorState {
        &self.next
    }

    /// Runs `update` on the object `id` in both buffers, between ticks.
    ///
    /// Either both buffers take the update or neither does.
    pub fn update_object<F>(&mut self, id: ObjectId, mut update: F) -> Result<(), DropError>
    where
        F: FnMut(&mut SimulatorObject) -> Result<(), DropError>,
    {
        let staged = self.stage(id, &mut update)?;
        self.commit(staged);
        Ok(())
    }

    /// Updated copies of the object `id` from both buffers. Nothing is
    /// written back.
    fn stage<F>(&self, id: ObjectId, update: &mut F) -> Result<Staged, DropError>
    where
        F: FnMut(&mut SimulatorObject) -> Result<(), DropError>,
    {
        let mut staged = |state: &SimulatorState| {
            let mut object = state.object(id).ok_or(DropError::UnknownObject(id))?.clone();
            update(&mut object)?;
            Ok::<_, DropError>(object)
        };
        let current = staged(&self.current)?;
        let next = staged(&self.next)?;
        Ok(Staged { id, current, next })
    }

    fn commit(&mut self, staged: Staged) {
        if let Some(object) = self.current.object_mut(staged.id) {
            *object = staged.current;
        }
        if let Some(object) = self.next.object_mut(staged.id) {
            *object = staged.next;
        }
    }

    /// Advances the world by `delta_ms` milliseconds. Non-positive deltas
    /// are ignored.
    pub fn step(&mut self, delta_ms: i32) {
        if delta_ms <= 0 {
            log::trace!("skipping tick with delta {} ms", delta_ms);
            return;
        }

        self.next.clear_transient();
        for component in &self.components {
            log::trace!("applying '{}' ({} ms)", component.name(), delta_ms);
            component.apply(&self.current, &mut self.next, delta_ms);
        }
        std::mem::swap(&mut self.current, &mut self.next);
        self.time_ms += i64::from(delta_ms);
    }

    /// Applies a control command to the agent `id`.
    pub fn apply_control(&mut self, id: ObjectId, control: &ControlDrop) -> Result<(), DropError> {
        let drive = self.config.drive.clone();
        self.update_object(id, |object| control.apply_to(object, &drive))
    }

    /// Decodes an inbound drop and applies it. Control drops go to every
    /// agent, and if any agent rejects the command none of them takes it.
    pub fn apply_drop(&mut self, message: &DropMessage) -> Result<(), DropError> {
        match InboundDrop::decode(message)? {
            InboundDrop::Control(control) => {
                let drive = self.config.drive.clone();
                let mut apply = |object: &mut SimulatorObject| control.apply_to(object, &drive);
                let staged = self
                    .current
                    .agents()
                    .iter()
                    .map(|&id| self.stage(id, &mut apply))
                    .collect::<Result<Vec<_>, _>>()?;
                for update in staged {
                    self.commit(update);
                }
            }
        }
        Ok(())
    }

    /// Snapshot of the capability `name` of the object `id`, taken from
    /// the current buffer.
    pub fn snapshot(&self, id: ObjectId, name: &str) -> Result<DropMessage, DropError> {
        let object = self.current.object(id).ok_or(DropError::UnknownObject(id))?;
        snapshot_message(object, name)
    }

    /// Queues a snapshot of every capability of every object.
    pub fn publish_snapshots(&mut self) {
        for message in snapshot_all(&self.current) {
            self.outbox.push(message);
        }
    }

    pub fn queue_drop(&mut self, message: DropMessage) {
        self.outbox.push(message);
    }

    /// Takes every queued outbound drop, oldest first.
    pub fn drain_drops(&mut self) -> Vec<DropMessage> {
        self.outbox.drain().collect()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for object in self.current.objects() {
            object.draw(canvas, &self.config.draw);
        }
    }
}

/// An object update computed against both buffers, not yet written back.
struct Staged {
    id: ObjectId,
    current: SimulatorObject,
    next: SimulatorObject,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_standard_components(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Force, Material};
    use crate::config::DropConfig;
    use crate::draw::NullCanvas;
    use crate::math::Vector2D;
    use crate::objects::ObjectState;
    use crate::states::{Dynamics, Leds, MotorMode, Omnidrive};
    use std::cell::RefCell;
    use std::rc::Rc;
    const EPSILON: f64 = 1e-9;

    fn robot(id: ObjectId) -> SimulatorObject {
        SimulatorObject::new("robot", id)
            .with_state(Omnidrive::new())
            .unwrap()
            .with_state(Leds::new())
            .unwrap()
            .with_state(Dynamics::new(1.0, 1.0).with_material(Material::new(0.2, 0.0, 0.0)))
            .unwrap()
    }

    fn forward(speed: i32) -> ControlDrop {
        ControlDrop {
            motor_mode: MotorMode::XyThetaSpace,
            velocities: [speed, 0, 0],
            ..ControlDrop::default()
        }
    }

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Component for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn apply(&self, _current: &SimulatorState, _next: &mut SimulatorState, _delta_ms: i32) {
            self.log.borrow_mut().push(self.name);
        }
    }

    #[test]
    fn test_standard_pipeline_order() {
        let engine = Engine::default();
        assert_eq!(
            engine.component_names(),
            vec!["dynamics", "omnidrive", "bump", "accelerometer", "light"]
        );
    }

    #[test]
    fn test_components_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::new(SimConfig::default());
        for name in ["first", "second", "third"] {
            engine.add_component(Box::new(Recorder {
                name,
                log: Rc::clone(&log),
            }));
        }
        engine.step(10);
        engine.step(0);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
        assert_eq!(engine.time_ms(), 10);
    }

    #[test]
    fn test_non_positive_delta_changes_nothing() {
        let mut engine = Engine::default();
        engine.add_object(robot(1)).unwrap();
        engine.apply_control(1, &forward(1)).unwrap();
        let current = engine.current().clone();
        let next = engine.next().clone();

        engine.step(0);
        engine.step(-5);

        assert!(engine.current().deep_equals(&current));
        assert!(engine.next().deep_equals(&next));
        assert_eq!(engine.time_ms(), 0);
    }

    #[test]
    fn test_control_drop_drives_agent() {
        let mut engine = Engine::default();
        engine.add_object(robot(1)).unwrap();
        engine.apply_drop(&forward(1).to_message()).unwrap();

        // Tick 1 turns the drive into a force, tick 2 integrates it
        engine.step(10);
        engine.step(10);

        let dynamics = engine.current().object(1).unwrap().state::<Dynamics>().unwrap();
        assert!((dynamics.velocity().x - 1.0).abs() < EPSILON);
        assert!(dynamics.velocity().y.abs() < EPSILON);
        assert!(engine.current().object(1).unwrap().position().x > 0.0);
    }

    #[test]
    fn test_unknown_targets_are_errors() {
        let mut engine = Engine::default();
        engine.add_object(SimulatorObject::new("wall", 2)).unwrap();

        assert_eq!(
            engine.apply_control(9, &forward(1)),
            Err(DropError::UnknownObject(9))
        );
        assert!(matches!(
            engine.apply_control(2, &forward(1)),
            Err(DropError::UnknownCapability { object: 2, .. })
        ));
        assert_eq!(
            engine.apply_drop(&DropMessage::new("Nonsense", Vec::new())),
            Err(DropError::UnknownDrop("Nonsense".to_string()))
        );
    }

    #[test]
    fn test_duplicate_object_rejected() {
        let mut engine = Engine::default();
        engine.add_object(robot(1)).unwrap();
        assert_eq!(
            engine.add_object(robot(1)),
            Err(ObjectError::DuplicateId { object: 1 })
        );
    }

    #[test]
    fn test_snapshots_and_outbox() {
        let config = SimConfig {
            drops: DropConfig {
                max_queued: 2,
                ..DropConfig::default()
            },
            ..SimConfig::default()
        };
        let mut engine = Engine::with_standard_components(config);
        engine.add_object(robot(1)).unwrap();

        let message = engine.snapshot(1, Leds::NAME).unwrap();
        assert_eq!(message.name, "leds");
        assert_eq!(message.payload.len(), 4 + 52);
        assert_eq!(engine.snapshot(5, Leds::NAME), Err(DropError::UnknownObject(5)));

        // dynamics, leds, omnidrive; the queue keeps the newest two
        engine.publish_snapshots();
        let names: Vec<_> = engine.drain_drops().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["leds", "omnidrive"]);
        assert!(engine.drain_drops().is_empty());
    }

    #[test]
    fn test_draw_with_null_canvas() {
        let mut engine = Engine::default();
        engine.add_object(robot(1)).unwrap();
        engine.draw(&mut NullCanvas);
    }

    #[test]
    fn test_update_object_touches_both_buffers() {
        let mut engine = Engine::default();
        engine.add_object(robot(1)).unwrap();
        engine
            .update_object(1, |o| {
                o.set_position(Vector2D::new(3.0, 4.0));
                Ok(())
            })
            .unwrap();
        assert_eq!(engine.current().object(1).unwrap().position(), Vector2D::new(3.0, 4.0));
        assert_eq!(engine.next().object(1).unwrap().position(), Vector2D::new(3.0, 4.0));
    }

    #[test]
    fn test_pending_forces_are_not_carried_over() {
        let mut engine = Engine::new(SimConfig::default());
        engine.add_component(Box::new(DynamicsComponent::new(9.81)));
        let mut pushed = robot(1);
        pushed
            .state_mut::<Dynamics>()
            .unwrap()
            .add_force(Force::new(Vector2D::new(1.0, 0.0)));
        engine.add_object(pushed).unwrap();

        engine.step(100);
        let dynamics = engine.current().object(1).unwrap().state::<Dynamics>().unwrap();
        assert!((dynamics.velocity().x - 0.1).abs() < EPSILON);
        assert!(dynamics.forces().is_empty());

        // Nothing pushes on the second tick
        engine.step(100);
        let dynamics = engine.current().object(1).unwrap().state::<Dynamics>().unwrap();
        assert!((dynamics.velocity().x - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_failed_update_leaves_both_buffers_alone() {
        let mut engine = Engine::default();
        engine.add_object(robot(1)).unwrap();
        let before = (engine.current().clone(), engine.next().clone());

        // Succeeds on the first buffer, fails on the second
        let mut calls = 0;
        let result = engine.update_object(1, |o| {
            calls += 1;
            o.set_position(Vector2D::new(3.0, 4.0));
            if calls == 2 {
                return Err(DropError::UnknownObject(1));
            }
            Ok(())
        });

        assert_eq!(result, Err(DropError::UnknownObject(1)));
        assert!(engine.current().deep_equals(&before.0));
        assert!(engine.next().deep_equals(&before.1));
    }

    #[test]
    fn test_control_drop_is_all_or_nothing() {
        let mut engine = Engine::default();
        engine.add_object(robot(1)).unwrap();
        engine.add_object(robot(2)).unwrap();
        // Agent 2 loses its drive in the next buffer only
        engine
            .next
            .object_mut(2)
            .unwrap()
            .remove_state(Omnidrive::NAME)
            .unwrap();
        let before = (engine.current().clone(), engine.next().clone());

        let err = engine.apply_drop(&forward(1).to_message()).unwrap_err();
        assert!(matches!(err, DropError::UnknownCapability { object: 2, .. }));
        assert!(engine.current().deep_equals(&before.0));
        assert!(engine.next().deep_equals(&before.1));
        let drive = engine.current().object(1).unwrap().state::<Omnidrive>().unwrap();
        assert_eq!(drive.target_velocity(), Vector2D::ZERO);
    }
}
