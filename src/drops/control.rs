use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::config::DriveConfig;
use crate::draw::Color;
use crate::error::DropError;
use crate::math::Vector2D;
use crate::objects::{ObjectState, SimulatorObject};
use crate::states::{LedMode, Leds, MotorMode, Omnidrive, LED_COUNT};

use super::frame::DropMessage;

/// Drive and LED command sent by a controller to one robot.
///
/// Payload (little-endian): motor mode `i32`, three velocity `i32`s,
/// LED mode `i32`, then 16 RGB byte triples.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlDrop {
    pub motor_mode: MotorMode,
    /// Wheel velocities, or forward / sideways / angular velocity in
    /// `XyThetaSpace`, in drop integer units.
    pub velocities: [i32; 3],
    pub led_mode: LedMode,
    pub leds: [Color; LED_COUNT],
}

impl ControlDrop {
    pub const NAME: &'static str = "CritterControlDrop";
    pub const SIZE: usize = 5 * 4 + 3 * LED_COUNT;

    pub fn decode(payload: &[u8]) -> Result<Self, DropError> {
        if payload.len() != Self::SIZE {
            return Err(DropError::BadPayloadSize {
                name: Self::NAME,
                expected: Self::SIZE,
                actual: payload.len(),
            });
        }

        let mut buf = payload;
        let motor_mode = MotorMode::try_from(buf.get_i32_le())?;
        let velocities = [buf.get_i32_le(), buf.get_i32_le(), buf.get_i32_le()];
        let led_mode = LedMode::try_from(buf.get_i32_le())?;
        let mut leds = [Color::BLACK; LED_COUNT];
        for led in leds.iter_mut() {
            *led = Color::new(buf.get_u8(), buf.get_u8(), buf.get_u8());
        }

        Ok(ControlDrop {
            motor_mode,
            velocities,
            led_mode,
            leds,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_i32_le(self.motor_mode.into());
        for v in self.velocities {
            buf.put_i32_le(v);
        }
        buf.put_i32_le(self.led_mode.into());
        for led in &self.leds {
            buf.put_u8(led.r);
            buf.put_u8(led.g);
            buf.put_u8(led.b);
        }
        buf.freeze()
    }

    pub fn to_message(&self) -> DropMessage {
        DropMessage::new(Self::NAME, self.encode())
    }

    /// Writes the command into the object's drive, and into its LEDs when
    /// it has any. The object must carry an [`Omnidrive`].
    pub fn apply_to(&self, object: &mut SimulatorObject, drive: &DriveConfig) -> Result<(), DropError> {
        let id = object.id();
        let omnidrive = object
            .state_mut::<Omnidrive>()
            .ok_or_else(|| DropError::UnknownCapability {
                object: id,
                name: Omnidrive::NAME.to_string(),
            })?;

        let scaled = self.velocities.map(|v| f64::from(v) * drive.velocity_scale);
        match self.motor_mode {
            MotorMode::WheelSpace | MotorMode::WheelVoltage => {
                omnidrive.set_wheel_velocities(scaled, drive.wheel_base)
            }
            MotorMode::XyThetaSpace => {
                omnidrive.set_target(Vector2D::new(scaled[0], scaled[1]), scaled[2])
            }
        }

        if let Some(leds) = object.state_mut::<Leds>() {
            leds.set(self.led_mode, &self.leds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn sample() -> ControlDrop {
        let mut leds = [Color::BLACK; LED_COUNT];
        leds[0] = Color::RED;
        leds[15] = Color::new(1, 2, 3);
        ControlDrop {
            motor_mode: MotorMode::XyThetaSpace,
            velocities: [10, -20, 3],
            led_mode: LedMode::Custom,
            leds,
        }
    }

    #[test]
    fn test_payload_layout() {
        let bytes = sample().encode();
        assert_eq!(bytes.len(), 68);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &(-20i32).to_le_bytes());
        assert_eq!(&bytes[16..20], &[7, 0, 0, 0]);
        assert_eq!(&bytes[20..23], &[255, 0, 0]);
        assert_eq!(&bytes[65..68], &[1, 2, 3]);
        assert_eq!(ControlDrop::decode(&bytes), Ok(sample()));
    }

    #[test]
    fn test_wrong_size_rejected() {
        let err = ControlDrop::decode(&[0u8; 67]).unwrap_err();
        assert_eq!(
            err,
            DropError::BadPayloadSize {
                name: ControlDrop::NAME,
                expected: 68,
                actual: 67
            }
        );
    }

    #[test]
    fn test_bad_modes_rejected() {
        let mut bytes = BytesMut::from(&sample().encode()[..]);
        bytes[0] = 9;
        assert!(matches!(
            ControlDrop::decode(&bytes),
            Err(DropError::InvalidMode { field: "motor mode", value: 9 })
        ));

        let mut bytes = BytesMut::from(&sample().encode()[..]);
        bytes[16] = 8;
        assert!(matches!(
            ControlDrop::decode(&bytes),
            Err(DropError::InvalidMode { value: 8, .. })
        ));
    }

    #[test]
    fn test_apply_xy_theta_and_leds() {
        let mut robot = SimulatorObject::new("robot", 4)
            .with_state(Omnidrive::new())
            .unwrap()
            .with_state(Leds::new())
            .unwrap();
        let drive = DriveConfig {
            velocity_scale: 0.5,
            ..DriveConfig::default()
        };
        sample().apply_to(&mut robot, &drive).unwrap();

        let omnidrive = robot.state::<Omnidrive>().unwrap();
        assert_eq!(omnidrive.target_velocity(), Vector2D::new(5.0, -10.0));
        assert!((omnidrive.target_angular_velocity() - 1.5).abs() < EPSILON);
        let leds = robot.state::<Leds>().unwrap();
        assert_eq!(leds.mode, LedMode::Custom);
        assert_eq!(leds.colors[0], Color::RED);
    }

    #[test]
    fn test_apply_wheel_space_spins_in_place() {
        let mut robot = SimulatorObject::new("robot", 4)
            .with_state(Omnidrive::new())
            .unwrap();
        let command = ControlDrop {
            motor_mode: MotorMode::WheelSpace,
            velocities: [3, 3, 3],
            ..ControlDrop::default()
        };
        command.apply_to(&mut robot, &DriveConfig::default()).unwrap();

        let omnidrive = robot.state::<Omnidrive>().unwrap();
        assert!(omnidrive.target_velocity().length() < EPSILON);
        // 9 / (3 * 0.1)
        assert!((omnidrive.target_angular_velocity() - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_apply_without_drive_fails() {
        let mut wall = SimulatorObject::new("wall", 7);
        let err = sample().apply_to(&mut wall, &DriveConfig::default()).unwrap_err();
        assert_eq!(
            err,
            DropError::UnknownCapability {
                object: 7,
                name: "omnidrive".to_string()
            }
        );
    }
}
