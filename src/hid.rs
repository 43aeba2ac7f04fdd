//! hidapi-backed device channel.
//!
//! These keypads expose several HID interfaces; configuration reports
//! are accepted on the vendor interface, which is interface 1 on every
//! unit seen so far. Older firmware puts it on interface 0, so opening
//! falls back by usage page and finally to the first interface found.

use crate::channel::{ChannelError, DeviceChannel};
use crate::devices::{self, DeviceDefinition};
use crate::protocol::{self, REPORT_LEN};
use crate::report::Report;
use hidapi::{DeviceInfo, HidApi, HidDevice, HidError};
use tracing::{debug, warn};

/// Vendor-defined usage page carrying the configuration endpoint.
const VENDOR_USAGE_PAGE: u16 = 0xFF00;

impl From<HidError> for ChannelError {
    fn from(err: HidError) -> Self {
        let message = err.to_string();
        if message.contains("Permission denied") || message.contains("EPERM") {
            ChannelError::PermissionDenied(message)
        } else {
            ChannelError::Hid(message)
        }
    }
}

/// One enumerated HID interface of a supported device.
#[derive(Debug, Clone)]
pub struct DiscoveredInterface {
    pub definition: &'static DeviceDefinition,
    pub path: String,
    pub interface: i32,
    pub usage_page: u16,
    pub usage: u16,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

/// Open handle to one interface of a supported device.
pub struct HidChannel {
    device: HidDevice,
    definition: &'static DeviceDefinition,
    interface: i32,
    usage_page: u16,
}

/// List every interface of every supported device currently attached.
pub fn enumerate() -> Result<Vec<DiscoveredInterface>, ChannelError> {
    let api = HidApi::new()?;
    let mut found = Vec::new();
    for info in api.device_list() {
        let Some(definition) = devices::find_device(info.vendor_id(), info.product_id()) else {
            continue;
        };
        found.push(DiscoveredInterface {
            definition,
            path: info.path().to_string_lossy().into_owned(),
            interface: info.interface_number(),
            usage_page: info.usage_page(),
            usage: info.usage(),
            manufacturer: info.manufacturer_string().map(str::to_string),
            product: info.product_string().map(str::to_string),
        });
    }
    Ok(found)
}

/// Open the configuration interface of the first supported device.
pub fn open_first() -> Result<HidChannel, ChannelError> {
    let api = HidApi::new()?;
    let (definition, infos) = first_supported(&api)?;
    let info = preferred_interface(&infos);
    debug!(
        "Opening {} (PID {:04x}) interface {} usage page {:04x}",
        definition.display_name,
        definition.product_id,
        info.interface_number(),
        info.usage_page(),
    );
    let device = info.open_device(&api)?;
    Ok(HidChannel {
        device,
        definition,
        interface: info.interface_number(),
        usage_page: info.usage_page(),
    })
}

/// Open every interface of the first supported device, labeled for
/// display. Interfaces that fail to open are skipped with a warning.
pub fn open_monitor_channels() -> Result<Vec<(String, HidChannel)>, ChannelError> {
    let api = HidApi::new()?;
    let (definition, infos) = first_supported(&api)?;
    let mut channels = Vec::with_capacity(infos.len());
    let mut last_err = None;
    for info in infos {
        let label = format!(
            "iface{}_page{:04x}",
            info.interface_number(),
            info.usage_page()
        );
        match info.open_device(&api) {
            Ok(device) => channels.push((
                label,
                HidChannel {
                    device,
                    definition,
                    interface: info.interface_number(),
                    usage_page: info.usage_page(),
                },
            )),
            Err(err) => {
                warn!("Cannot open {label}: {err}");
                last_err = Some(ChannelError::from(err));
            }
        }
    }
    if channels.is_empty() {
        return Err(last_err
            .unwrap_or_else(|| ChannelError::Hid("no interfaces to open".to_string())));
    }
    Ok(channels)
}

fn first_supported(api: &HidApi) -> Result<(&'static DeviceDefinition, Vec<&DeviceInfo>), ChannelError> {
    for definition in devices::SUPPORTED_DEVICES {
        let infos: Vec<&DeviceInfo> = api
            .device_list()
            .filter(|info| {
                info.vendor_id() == definition.vendor_id
                    && info.product_id() == definition.product_id
            })
            .collect();
        if !infos.is_empty() {
            return Ok((definition, infos));
        }
    }
    Err(ChannelError::DeviceNotFound(format!(
        "no keypad with vendor ID {:04x} and a known product ID attached",
        protocol::VENDOR_ID
    )))
}

/// Pick the interface most likely to carry the configuration endpoint.
/// `infos` must be non-empty.
fn preferred_interface<'a>(infos: &[&'a DeviceInfo]) -> &'a DeviceInfo {
    infos
        .iter()
        .copied()
        .find(|info| info.interface_number() == 1)
        .or_else(|| {
            infos.iter().copied().find(|info| {
                info.usage_page() == VENDOR_USAGE_PAGE || info.interface_number() == 0
            })
        })
        .unwrap_or(infos[0])
}

impl HidChannel {
    pub fn definition(&self) -> &'static DeviceDefinition {
        self.definition
    }

    pub fn interface(&self) -> i32 {
        self.interface
    }

    pub fn usage_page(&self) -> u16 {
        self.usage_page
    }

    /// Read one input report, `Ok(None)` on timeout.
    pub fn read_report(&self, timeout_ms: i32) -> Result<Option<Vec<u8>>, ChannelError> {
        let mut buf = [0u8; 64];
        match self.device.read_timeout(&mut buf, timeout_ms) {
            Ok(0) => Ok(None),
            Ok(n) => Ok(Some(buf[..n].to_vec())),
            Err(err) => Err(err.into()),
        }
    }
}

impl DeviceChannel for HidChannel {
    fn write_report(&mut self, report_id: u8, payload: &Report) -> Result<(), ChannelError> {
        // hidapi expects the report ID as the first byte; ID 0 means
        // the device does not use numbered reports.
        let mut buf = [0u8; REPORT_LEN + 1];
        buf[0] = report_id;
        buf[1..].copy_from_slice(payload);
        self.device.write(&buf)?;
        Ok(())
    }
}
