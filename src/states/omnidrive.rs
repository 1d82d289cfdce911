use bytes::{BufMut, Bytes, BytesMut};

use crate::error::DropError;
use crate::math::Vector2D;
use crate::objects::ObjectState;

/// Mounting angles of the three omni wheels, in degrees from the robot's
/// forward axis.
pub const WHEEL_ANGLES_DEG: [f64; 3] = [100.0, 220.0, 340.0];

/// How the three velocity fields of a control command are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotorMode {
    /// One velocity per wheel (100, 220, 340 degrees).
    #[default]
    WheelSpace,
    /// Forward, sideways and angular velocity in the robot frame.
    XyThetaSpace,
    /// One voltage per wheel. Treated as wheel velocities.
    WheelVoltage,
}

impl TryFrom<i32> for MotorMode {
    type Error = DropError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MotorMode::WheelSpace),
            1 => Ok(MotorMode::XyThetaSpace),
            2 => Ok(MotorMode::WheelVoltage),
            _ => Err(DropError::InvalidMode {
                field: "motor mode",
                value,
            }),
        }
    }
}

impl From<MotorMode> for i32 {
    fn from(mode: MotorMode) -> i32 {
        match mode {
            MotorMode::WheelSpace => 0,
            MotorMode::XyThetaSpace => 1,
            MotorMode::WheelVoltage => 2,
        }
    }
}

/// Target motion of an omnidirectional robot, in its own frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Omnidrive {
    /// Target velocity, x forward and y to the left of the robot.
    velocity: Vector2D,
    /// Target angular velocity, rad/s.
    angular_velocity: f64,
}

impl Omnidrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn target_angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn set_target(&mut self, velocity: Vector2D, angular_velocity: f64) {
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
    }

    /// Sets the target from individual wheel velocities.
    ///
    /// Wheel `i` at angle `phi_i` rolls at `-sin(phi_i) vx + cos(phi_i) vy + R w`;
    /// with three wheels 120 degrees apart this inverts to
    /// `vx = 2/3 sum(-sin(phi_i) v_i)`, `vy = 2/3 sum(cos(phi_i) v_i)` and
    /// `w = sum(v_i) / 3R`.
    pub fn set_wheel_velocities(&mut self, wheels: [f64; 3], wheel_base: f64) {
        let mut vx = 0.0;
        let mut vy = 0.0;
        let mut sum = 0.0;
        for (v, angle) in wheels.iter().zip(WHEEL_ANGLES_DEG) {
            let (sin, cos) = angle.to_radians().sin_cos();
            vx -= sin * v;
            vy += cos * v;
            sum += v;
        }
        let angular = if wheel_base > 0.0 {
            sum / (3.0 * wheel_base)
        } else {
            0.0
        };
        self.set_target(Vector2D::new(vx, vy) * (2.0 / 3.0), angular);
    }

    /// Wheel velocities that realise the current target.
    pub fn wheel_velocities(&self, wheel_base: f64) -> [f64; 3] {
        WHEEL_ANGLES_DEG.map(|angle| {
            let (sin, cos) = angle.to_radians().sin_cos();
            -sin * self.velocity.x + cos * self.velocity.y + wheel_base * self.angular_velocity
        })
    }

    pub fn stop(&mut self) {
        self.set_target(Vector2D::ZERO, 0.0);
    }
}

impl ObjectState for Omnidrive {
    const NAME: &'static str = "omnidrive";

    /// Target velocity (x, y) and angular velocity, as little-endian f64.
    fn snapshot(&self) -> Option<Bytes> {
        let mut buf = BytesMut::with_capacity(3 * 8);
        buf.put_f64_le(self.velocity.x);
        buf.put_f64_le(self.velocity.y);
        buf.put_f64_le(self.angular_velocity);
        Some(buf.freeze())
    }
}
