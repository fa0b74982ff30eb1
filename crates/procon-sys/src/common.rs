pub const NINTENDO_VENDOR_ID: u16 = 1406;

pub const PRO_CONTROLLER: u16 = 0x2009;

/// Id of the full input report, sent at a fixed rate once paired.
pub const STANDARD_FULL_REPORT_ID: u8 = 0x30;

/// What the transport stack needs to enumerate or advertise the device.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeviceDescriptor {
    pub vendor_id: u16,
    pub product_id: u16,
    pub name: &'static str,
    pub report_id: u8,
}

pub const PRO_CONTROLLER_DESCRIPTOR: DeviceDescriptor = DeviceDescriptor {
    vendor_id: NINTENDO_VENDOR_ID,
    product_id: PRO_CONTROLLER,
    name: "Pro Controller",
    report_id: STANDARD_FULL_REPORT_ID,
};

#[cfg(test)]
pub(crate) fn offset_of<A, B>(a: &A, b: &B) -> usize {
    b as *const _ as usize - a as *const _ as usize
}

#[test]
fn descriptor_ids() {
    assert_eq!(PRO_CONTROLLER_DESCRIPTOR.report_id, 0x30);
    assert_eq!(PRO_CONTROLLER_DESCRIPTOR.vendor_id, 0x057E);
    assert_eq!(PRO_CONTROLLER_DESCRIPTOR.product_id, 0x2009);
}
