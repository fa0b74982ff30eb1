use enum_map::Enum;
use std::fmt;

/// Every named bit of the 3 button bytes.
///
/// Bit 14 is never used by the console and has no name.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Button {
    Y,
    X,
    B,
    A,
    RightSR,
    RightSL,
    R,
    ZR,
    Minus,
    Plus,
    RStick,
    LStick,
    Home,
    Capture,
    ChargingGrip,
    Down,
    Up,
    Right,
    Left,
    LeftSR,
    LeftSL,
    L,
    ZL,
}

impl Button {
    pub const ALL: [Button; 23] = [
        Button::Y,
        Button::X,
        Button::B,
        Button::A,
        Button::RightSR,
        Button::RightSL,
        Button::R,
        Button::ZR,
        Button::Minus,
        Button::Plus,
        Button::RStick,
        Button::LStick,
        Button::Home,
        Button::Capture,
        Button::ChargingGrip,
        Button::Down,
        Button::Up,
        Button::Right,
        Button::Left,
        Button::LeftSR,
        Button::LeftSL,
        Button::L,
        Button::ZL,
    ];

    /// Position in the 24 bits, byte 0 bit 0 first.
    pub const fn bit(self) -> u8 {
        use Button::*;
        match self {
            Y => 0,
            X => 1,
            B => 2,
            A => 3,
            RightSR => 4,
            RightSL => 5,
            R => 6,
            ZR => 7,
            Minus => 8,
            Plus => 9,
            RStick => 10,
            LStick => 11,
            Home => 12,
            Capture => 13,
            ChargingGrip => 15,
            Down => 16,
            Up => 17,
            Right => 18,
            Left => 19,
            LeftSR => 20,
            LeftSL => 21,
            L => 22,
            ZL => 23,
        }
    }

    pub const fn byte(self) -> usize {
        (self.bit() / 8) as usize
    }

    pub const fn mask(self) -> u8 {
        1 << (self.bit() % 8)
    }

    pub fn is_pressed(self, buttons: &[u8; 3]) -> bool {
        buttons[self.byte()] & self.mask() != 0
    }

    pub fn set(self, buttons: &mut [u8; 3], pressed: bool) {
        if pressed {
            self.press(buttons);
        } else {
            self.release(buttons);
        }
    }

    pub fn press(self, buttons: &mut [u8; 3]) {
        buttons[self.byte()] |= self.mask();
    }

    pub fn release(self, buttons: &mut [u8; 3]) {
        buttons[self.byte()] &= !self.mask();
    }
}

bitfield::bitfield! {
    #[repr(transparent)]
    #[derive(Copy, Clone, Default)]
    pub struct RightButtons(u8);
    impl Debug;
    pub y, set_y: 0;
    pub x, set_x: 1;
    pub b, set_b: 2;
    pub a, set_a: 3;
    pub sr, set_sr: 4;
    pub sl, set_sl: 5;
    pub r, set_r: 6;
    pub zr, set_zr: 7;
}

bitfield::bitfield! {
    #[repr(transparent)]
    #[derive(Copy, Clone, Default)]
    pub struct MiddleButtons(u8);
    impl Debug;
    pub minus, set_minus: 0;
    pub plus, set_plus: 1;
    pub rstick, set_rstick: 2;
    pub lstick, set_lstick: 3;
    pub home, set_home: 4;
    pub capture, set_capture: 5;
    pub _unused, _: 6;
    pub charging_grip, set_charging_grip: 7;
}

bitfield::bitfield! {
    #[repr(transparent)]
    #[derive(Copy, Clone, Default)]
    pub struct LeftButtons(u8);
    impl Debug;
    pub down, set_down: 0;
    pub up, set_up: 1;
    pub right, set_right: 2;
    pub left, set_left: 3;
    pub sr, set_sr: 4;
    pub sl, set_sl: 5;
    pub l, set_l: 6;
    pub zl, set_zl: 7;
}

/// Named view over the 3 button bytes of a [Report](super::Report).
#[repr(C)]
#[derive(Copy, Clone, Default)]
pub struct ButtonsStatus {
    pub right: RightButtons,
    pub middle: MiddleButtons,
    pub left: LeftButtons,
}

impl From<[u8; 3]> for ButtonsStatus {
    fn from(raw: [u8; 3]) -> Self {
        ButtonsStatus {
            right: RightButtons(raw[0]),
            middle: MiddleButtons(raw[1]),
            left: LeftButtons(raw[2]),
        }
    }
}

impl From<ButtonsStatus> for [u8; 3] {
    fn from(status: ButtonsStatus) -> Self {
        [status.right.0, status.middle.0, status.left.0]
    }
}

impl fmt::Debug for ButtonsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ButtonsStatus")
            .field(&format_args!("{}", self))
            .finish()
    }
}

impl fmt::Display for ButtonsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.right.a() {
            write!(f, " A")?;
        }
        if self.right.b() {
            write!(f, " B")?;
        }
        if self.right.x() {
            write!(f, " X")?;
        }
        if self.right.y() {
            write!(f, " Y")?;
        }
        if self.left.up() {
            write!(f, " UP")?;
        }
        if self.left.down() {
            write!(f, " DOWN")?;
        }
        if self.left.left() {
            write!(f, " LEFT")?;
        }
        if self.left.right() {
            write!(f, " RIGHT")?;
        }
        if self.left.l() {
            write!(f, " L")?;
        }
        if self.left.zl() {
            write!(f, " ZL")?;
        }
        if self.right.r() {
            write!(f, " R")?;
        }
        if self.right.zr() {
            write!(f, " ZR")?;
        }
        if self.left.sl() || self.right.sl() {
            write!(f, " SL")?;
        }
        if self.left.sr() || self.right.sr() {
            write!(f, " SR")?;
        }
        if self.middle.lstick() {
            write!(f, " L3")?;
        }
        if self.middle.rstick() {
            write!(f, " R3")?;
        }
        if self.middle.minus() {
            write!(f, " -")?;
        }
        if self.middle.plus() {
            write!(f, " +")?;
        }
        if self.middle.capture() {
            write!(f, " CAPTURE")?;
        }
        if self.middle.home() {
            write!(f, " HOME")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_release_restores() {
        for &start in &[[0u8; 3], [0xff; 3], [0x5a, 0xa5, 0x3c]] {
            for &button in &Button::ALL {
                let mut buttons = start;
                let was_pressed = button.is_pressed(&buttons);
                button.press(&mut buttons);
                assert!(button.is_pressed(&buttons));
                button.set(&mut buttons, was_pressed);
                assert_eq!(buttons, start, "{:?}", button);
            }
        }
    }

    #[test]
    fn no_aliasing() {
        let mut seen = 0u32;
        for &button in &Button::ALL {
            let mut buttons = [0; 3];
            button.press(&mut buttons);
            let value = u32::from(buttons[0])
                | u32::from(buttons[1]) << 8
                | u32::from(buttons[2]) << 16;
            assert_eq!(value.count_ones(), 1, "{:?}", button);
            assert_eq!(value, 1 << button.bit());
            assert_eq!(seen & value, 0, "{:?} aliases another button", button);
            seen |= value;
        }
        assert_eq!(seen, 0xff_ffff & !(1 << 14));
    }

    #[test]
    fn named_views_agree() {
        let mut buttons = [0; 3];
        Button::A.press(&mut buttons);
        Button::Plus.press(&mut buttons);
        Button::ZL.press(&mut buttons);
        let status = ButtonsStatus::from(buttons);
        assert!(status.right.a());
        assert!(status.middle.plus());
        assert!(status.left.zl());
        assert!(!status.right.zr());
        assert_eq!(status.to_string(), " A ZL +");

        let mut status = ButtonsStatus::default();
        status.right.set_zr(true);
        status.left.set_up(true);
        let raw: [u8; 3] = status.into();
        assert!(Button::ZR.is_pressed(&raw));
        assert!(Button::Up.is_pressed(&raw));
        assert_eq!(raw, [0x80, 0x00, 0x02]);
    }
}
