use bytes::{BufMut, Bytes, BytesMut};

use crate::collision::Collision;
use crate::common::{Force, Material};
use crate::config::DrawConfig;
use crate::draw::{Canvas, Color};
use crate::math::Vector2D;
use crate::objects::{ObjectId, ObjectState, SimulatorObject};
use crate::shapes::Polygon;

pub const MIN_MASS: f64 = 1e-6;
pub const MAX_MASS: f64 = f64::MAX;
pub const MIN_MOMENT: f64 = MIN_MASS;
pub const MAX_MOMENT: f64 = f64::MAX;

/// A collision recorded on an object during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact geometry, with the normal pointing away from this object.
    pub collision: Collision,
    /// The object that was hit.
    pub other: ObjectId,
    /// Magnitude of the impulse exchanged (zero if the objects were
    /// already separating).
    pub impulse: f64,
}

/// Mass, velocity and per-tick force accumulation of an object that moves
/// or can be run into.
#[derive(Debug, Clone, PartialEq)]
pub struct Dynamics {
    velocity: Vector2D,
    angular_velocity: f64,
    forces: Vec<Force>,
    torque: f64,
    contacts: Vec<Contact>,
    mass: f64,
    moment: f64,
    pub material: Material,
    min_speed: f64,
    max_speed: f64,
}

impl Dynamics {
    /// Creates a dynamics state. Mass and moment of inertia are clamped to
    /// their valid ranges.
    pub fn new(mass: f64, moment: f64) -> Self {
        Dynamics {
            velocity: Vector2D::ZERO,
            angular_velocity: 0.0,
            forces: Vec::new(),
            torque: 0.0,
            contacts: Vec::new(),
            mass: clamp_mass(mass),
            moment: clamp_moment(moment),
            material: Material::default(),
            min_speed: 0.0,
            max_speed: f64::MAX,
        }
    }

    /// Mass and moment of inertia of a uniform plate covering `polygon`,
    /// with `density` in kilograms per square metre.
    pub fn from_polygon(polygon: &Polygon, density: f64) -> Self {
        Dynamics::new(polygon.area() * density, polygon.moment_of_inertia(density))
    }

    /// An immovable object (wall): huge mass and a zero speed limit.
    pub fn fixed() -> Self {
        Dynamics::new(MAX_MASS, MAX_MOMENT).with_speed_limits(0.0, 0.0)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_speed_limits(mut self, min_speed: f64, max_speed: f64) -> Self {
        self.min_speed = min_speed.max(0.0);
        self.max_speed = max_speed.max(self.min_speed);
        self
    }

    // --- Velocity ---

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity;
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    pub fn min_speed(&self) -> f64 {
        self.min_speed
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Scales `velocity` so its magnitude lies within the speed limits.
    /// A zero velocity stays zero.
    pub fn clamp_speed(&self, velocity: Vector2D) -> Vector2D {
        let speed = velocity.length();
        if speed == 0.0 {
            return velocity;
        }
        let clamped = speed.clamp(self.min_speed, self.max_speed);
        if clamped == speed {
            velocity
        } else {
            velocity * (clamped / speed)
        }
    }

    /// Whether collisions can move this object at all.
    pub fn is_fixed(&self) -> bool {
        self.max_speed <= 0.0
    }

    // --- Forces ---

    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Vector sum of the forces added this tick. Points of application are
    /// lost in the sum, so the result has none.
    pub fn force_sum(&self) -> Force {
        let mut sum = Vector2D::ZERO;
        for f in &self.forces {
            sum += f.vec;
        }
        Force::new(sum)
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    /// Accumulated torque plus the torque of every force about `center`.
    pub fn net_torque(&self, center: Vector2D) -> f64 {
        self.torque + self.forces.iter().map(|f| f.torque_about(center)).sum::<f64>()
    }

    pub fn torque(&self) -> f64 {
        self.torque
    }

    pub fn add_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    pub fn set_torque(&mut self, torque: f64) {
        self.torque = torque;
    }

    pub fn clear_torque(&mut self) {
        self.torque = 0.0;
    }

    // --- Collisions ---

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn collisions(&self) -> impl Iterator<Item = &Collision> + '_ {
        self.contacts.iter().map(|c| &c.collision)
    }

    pub fn add_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    pub fn clear_contacts(&mut self) {
        self.contacts.clear();
    }

    // --- Mass ---

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = clamp_mass(mass);
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment
    }

    pub fn set_moment_of_inertia(&mut self, moment: f64) {
        self.moment = clamp_moment(moment);
    }

    /// Zero for fixed objects.
    pub fn inverse_mass(&self) -> f64 {
        if self.is_fixed() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn inverse_moment(&self) -> f64 {
        if self.is_fixed() {
            0.0
        } else {
            1.0 / self.moment
        }
    }

    // --- Friction and restitution ---

    pub fn restitution(&self) -> f64 {
        self.material.restitution
    }

    /// Restitution for a collision with `other`: `clamp(e1 + e2, 0, 1)`.
    pub fn combined_restitution(&self, other: &Dynamics) -> f64 {
        self.material.combined_restitution(&other.material)
    }

    /// The static coefficient while the velocity is exactly zero, the
    /// dynamic one otherwise.
    pub fn friction_coefficient(&self) -> f64 {
        if self.velocity.is_zero() {
            self.material.static_friction
        } else {
            self.material.dynamic_friction
        }
    }

    /// Applied force minus floor friction of magnitude `mu * m * g`
    /// opposing the current velocity. At rest there is no velocity to
    /// oppose and `applied` comes back unchanged.
    pub fn subtract_friction(&self, applied: Vector2D, gravity: f64) -> Vector2D {
        if self.velocity.is_zero() {
            return applied;
        }
        let magnitude = self.friction_coefficient() * self.mass * gravity;
        applied - self.velocity.normalize() * magnitude
    }

    /// Largest force static friction holds back on a body at rest.
    pub fn static_friction_limit(&self, gravity: f64) -> f64 {
        self.material.static_friction * self.mass * gravity
    }

    // --- Resets ---

    /// Zeroes velocities only.
    pub fn clear(&mut self) {
        self.velocity = Vector2D::ZERO;
        self.angular_velocity = 0.0;
    }

    /// Zeroes torque, forces, collisions and velocities.
    pub fn clear_all(&mut self) {
        self.clear_torque();
        self.clear_forces();
        self.clear_contacts();
        self.clear();
    }
}

impl Default for Dynamics {
    /// A nearly massless object.
    fn default() -> Self {
        Dynamics::new(MIN_MASS, MIN_MOMENT)
    }
}

impl ObjectState for Dynamics {
    const NAME: &'static str = "dynamics";

    fn clear_transient(&mut self) {
        self.clear_torque();
        self.clear_forces();
        self.clear_contacts();
    }

    fn draw(&self, canvas: &mut dyn Canvas, _owner: &SimulatorObject, _config: &DrawConfig) {
        for contact in &self.contacts {
            let c = &contact.collision;
            canvas.draw_line(c.point, c.point + c.normal * 0.05, Color::RED);
        }
    }

    /// Velocity (x, y), angular velocity, and the summed force (x, y) and
    /// torque, as little-endian f64.
    fn snapshot(&self) -> Option<Bytes> {
        let sum = self.force_sum().vec;
        let mut buf = BytesMut::with_capacity(6 * 8);
        buf.put_f64_le(self.velocity.x);
        buf.put_f64_le(self.velocity.y);
        buf.put_f64_le(self.angular_velocity);
        buf.put_f64_le(sum.x);
        buf.put_f64_le(sum.y);
        buf.put_f64_le(self.torque);
        Some(buf.freeze())
    }
}

fn clamp_mass(mass: f64) -> f64 {
    if mass.is_nan() {
        return MIN_MASS;
    }
    mass.clamp(MIN_MASS, MAX_MASS)
}

fn clamp_moment(moment: f64) -> f64 {
    if moment.is_nan() {
        return MIN_MOMENT;
    }
    moment.clamp(MIN_MOMENT, MAX_MOMENT)
}
