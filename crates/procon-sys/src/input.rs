//! Structs binary compatible with the input report sent to the console
//!
//! https://github.com/dekuNukem/Nintendo_Switch_Reverse_Engineering/blob/master/bluetooth_hid_notes.md#standard-input-report-format
//!
//! Only the controller state is described here. The report id, timer and
//! vibrator bytes around it are the transport stack's business.

mod buttons;
mod values;

pub use buttons::*;
pub use values::*;

use std::fmt;

/// Controller state as laid out on the wire.
///
/// ```ignore
/// let mut report = Report::neutral();
/// Button::A.set(&mut report.buttons, true);
/// report.left_stick = Stick::new(0, 0xfff);
/// send_hid_report(report.as_bytes());
/// ```
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Report {
    pub info: u8,
    pub buttons: [u8; 3],
    pub left_stick: Stick,
    pub right_stick: Stick,
}

impl Report {
    pub const SIZE: usize = 10;

    /// Nothing pressed, both sticks centered, charging and connected.
    pub const fn neutral() -> Report {
        Report {
            info: DEFAULT_CONNECTION_INFO,
            buttons: [0; 3],
            left_stick: Stick::CENTERED,
            right_stick: Stick::CENTERED,
        }
    }

    pub fn as_bytes(&self) -> &[u8; Report::SIZE] {
        unsafe { &*(self as *const Report as *const [u8; Report::SIZE]) }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; Report::SIZE] {
        unsafe { &mut *(self as *mut Report as *mut [u8; Report::SIZE]) }
    }

    pub fn from_bytes(bytes: [u8; Report::SIZE]) -> Report {
        let mut report = Report::neutral();
        *report.as_bytes_mut() = bytes;
        report
    }

    pub fn status(&self) -> DeviceStatus {
        DeviceStatus::from(self.info)
    }

    pub fn buttons_status(&self) -> ButtonsStatus {
        ButtonsStatus::from(self.buttons)
    }

    pub fn set_sticks(&mut self, left_x: i32, left_y: i32, right_x: i32, right_y: i32) {
        let packed = encode_sticks(left_x, left_y, right_x, right_y);
        self.as_bytes_mut()[4..].copy_from_slice(&packed);
    }
}

impl Default for Report {
    fn default() -> Self {
        Report::neutral()
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("info", &self.status())
            .field("buttons", &self.buttons_status())
            .field("left_stick", &self.left_stick)
            .field("right_stick", &self.right_stick)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::offset_of;

    #[test]
    fn check_layout() {
        let report = Report::neutral();
        assert_eq!(0, offset_of(&report, &report.info));
        assert_eq!(1, offset_of(&report, &report.buttons));
        assert_eq!(4, offset_of(&report, &report.left_stick));
        assert_eq!(7, offset_of(&report, &report.right_stick));
        assert_eq!(Report::SIZE, std::mem::size_of::<Report>());
        assert_eq!(1, std::mem::align_of::<Report>());
    }

    #[test]
    fn neutral_bytes() {
        assert_eq!(
            Report::neutral().as_bytes(),
            &[0x91, 0, 0, 0, 0xff, 0xf7, 0x7f, 0xff, 0xf7, 0x7f]
        );
    }

    #[test]
    fn wire_positions() {
        let mut report = Report::neutral();
        report.info = connection_info(Battery::Low, true);
        Button::Y.set(&mut report.buttons, true);
        Button::Capture.set(&mut report.buttons, true);
        Button::ZL.set(&mut report.buttons, true);
        report.set_sticks(0, 4095, 0x123, 0xabc);

        assert_eq!(
            report.as_bytes(),
            &[0x41, 0x01, 0x20, 0x80, 0x00, 0xf0, 0xff, 0x23, 0xc1, 0xab]
        );
        let back = Report::from_bytes(*report.as_bytes());
        assert_eq!(back, report);
        assert_eq!((back.right_stick.x(), back.right_stick.y()), (0x123, 0xabc));
    }
}
