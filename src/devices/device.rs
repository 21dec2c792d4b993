use serde::Serialize;

/// One device type owned by the community, as listed in the device list.
///
/// # Examples
///
/// ```
/// use load_sim::devices::Device;
///
/// let light = Device::new("light", true, 40, 6.0, "Domestic");
/// assert_eq!(light.owned(), 40);
/// assert!((light.power_kw() - 0.006).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    /// Unique device name; also selects the utilisation profile file.
    pub name: String,

    /// Whether the device is available in the community at all.
    pub available: bool,

    /// Number of devices of this type in the community.
    pub number: u32,

    /// Rated power draw of one device in watts.
    pub power_w: f32,

    /// Free-form category (e.g. `Domestic`, `Commercial`, `Public`).
    pub device_type: String,
}

impl Device {
    /// Creates a device entry.
    pub fn new(
        name: impl Into<String>,
        available: bool,
        number: u32,
        power_w: f32,
        device_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            available,
            number,
            power_w,
            device_type: device_type.into(),
        }
    }

    /// Number of devices that can be switched on: `number` if available,
    /// otherwise zero.
    pub fn owned(&self) -> u32 {
        if self.available { self.number } else { 0 }
    }

    /// Rated power of one device in kilowatts.
    pub fn power_kw(&self) -> f32 {
        self.power_w * 0.001
    }
}
