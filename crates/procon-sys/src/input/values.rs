use cgmath::Vector2;
use num::FromPrimitive;
use std::fmt;

bitfield::bitfield! {
    #[repr(transparent)]
    #[derive(Copy, Clone)]
    pub struct DeviceStatus(u8);
    impl Debug;

    pub connected, _: 0;
    pub u8, into DeviceType, device_type, _: 2, 1;
    pub charging, _: 4;
    pub u8, into BatteryLevel, battery_level, _: 7, 5;
}

impl From<u8> for DeviceStatus {
    fn from(raw: u8) -> Self {
        DeviceStatus(raw)
    }
}

impl DeviceStatus {
    pub fn battery(&self) -> Battery {
        if self.charging() {
            return Battery::Charging;
        }
        match self.battery_level() {
            BatteryLevel::Full => Battery::Full,
            BatteryLevel::Medium => Battery::Medium,
            BatteryLevel::Low => Battery::Low,
            BatteryLevel::Critical | BatteryLevel::Empty => Battery::Critical,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeviceType {
    ProController = 0,
    MaybeAccessory = 1,
    MaybeInitializingAccessory = 2,
    Joycon = 3,
}

impl From<u8> for DeviceType {
    fn from(v: u8) -> Self {
        match v & 0b11 {
            0 => DeviceType::ProController,
            1 => DeviceType::MaybeAccessory,
            2 => DeviceType::MaybeInitializingAccessory,
            _ => DeviceType::Joycon,
        }
    }
}

#[derive(Debug, Copy, Clone, FromPrimitive, Eq, PartialEq, Ord, PartialOrd)]
pub enum BatteryLevel {
    Empty = 0,
    Critical = 1,
    Low = 2,
    Medium = 3,
    Full = 4,
}

impl From<u8> for BatteryLevel {
    fn from(v: u8) -> Self {
        // 5..=7 are never sent by real controllers.
        BatteryLevel::from_u8(v).unwrap_or(BatteryLevel::Full)
    }
}

/// Battery states the emulated controller can advertise.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Battery {
    Charging = 0,
    Full = 1,
    Medium = 2,
    Low = 3,
    Critical = 4,
}

/// Connection byte for every `(battery, connected)` pair, indexed by
/// `[battery][!connected]`.
pub const CONNECTION_INFO: [[u8; 2]; 5] = [
    [0x91, 0x90],
    [0x81, 0x80],
    [0x61, 0x60],
    [0x41, 0x40],
    [0x21, 0x20],
];

pub const fn connection_info(battery: Battery, connected: bool) -> u8 {
    CONNECTION_INFO[battery as usize][!connected as usize]
}

pub const DEFAULT_CONNECTION_INFO: u8 = connection_info(Battery::Charging, true);

pub const STICK_CENTER: u16 = 0x7ff;
pub const STICK_MAX: u16 = 0xfff;

/// Out of range values are pinned to the nearest bound.
pub fn clamp_axis(value: i32) -> u16 {
    value.max(0).min(STICK_MAX as i32) as u16
}

/// Two 12-bit axes packed in 3 bytes: `[x_lo] [y_lo4 | x_hi4] [y_hi]`.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Stick {
    data: [u8; 3],
}

impl Stick {
    pub const CENTERED: Stick = Stick::from_axes(STICK_CENTER, STICK_CENTER);

    pub fn new(x: i32, y: i32) -> Stick {
        Stick::from_axes(clamp_axis(x), clamp_axis(y))
    }

    const fn from_axes(x: u16, y: u16) -> Stick {
        Stick {
            data: [
                (x & 0xff) as u8,
                ((x >> 8) & 0xf) as u8 | ((y & 0xf) << 4) as u8,
                ((y >> 4) & 0xff) as u8,
            ],
        }
    }

    /// Maps `[-1, 1]` on each axis, 0 being the center. Values outside are
    /// clamped, NaN is centered.
    pub fn from_normalized(v: Vector2<f64>) -> Stick {
        fn axis(v: f64) -> i32 {
            if v.is_nan() {
                return i32::from(STICK_CENTER);
            }
            let v = v.max(-1.).min(1.);
            let span = if v >= 0. {
                f64::from(STICK_MAX - STICK_CENTER)
            } else {
                f64::from(STICK_CENTER)
            };
            i32::from(STICK_CENTER) + (v * span).round() as i32
        }
        Stick::new(axis(v.x), axis(v.y))
    }

    pub fn from_bytes(data: [u8; 3]) -> Stick {
        Stick { data }
    }

    pub fn as_bytes(&self) -> [u8; 3] {
        self.data
    }

    pub fn x(self) -> u16 {
        u16::from(self.data[0]) | u16::from(self.data[1] & 0xf) << 8
    }

    pub fn y(self) -> u16 {
        u16::from(self.data[1]) >> 4 | u16::from(self.data[2]) << 4
    }
}

impl Default for Stick {
    fn default() -> Self {
        Stick::CENTERED
    }
}

impl fmt::Debug for Stick {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Stick")
            .field(&self.x())
            .field(&self.y())
            .finish()
    }
}

pub fn encode_sticks(left_x: i32, left_y: i32, right_x: i32, right_y: i32) -> [u8; 6] {
    let left = Stick::new(left_x, left_y).as_bytes();
    let right = Stick::new(right_x, right_y).as_bytes();
    [left[0], left[1], left[2], right[0], right[1], right[2]]
}

pub fn decode_sticks(bytes: [u8; 6]) -> (u16, u16, u16, u16) {
    let left = Stick::from_bytes([bytes[0], bytes[1], bytes[2]]);
    let right = Stick::from_bytes([bytes[3], bytes[4], bytes[5]]);
    (left.x(), left.y(), right.x(), right.y())
}
