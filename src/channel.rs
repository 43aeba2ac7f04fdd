//! Device channel abstraction.
//!
//! The session and report ID negotiation are written against this
//! trait so they can be exercised without hardware. The hidapi-backed
//! implementation lives in [`crate::hid`].

use crate::report::Report;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("no supported device found: {0}")]
    DeviceNotFound(String),
    #[error("permission denied opening device ({0}); check udev rules")]
    PermissionDenied(String),
    #[error("HID error: {0}")]
    Hid(String),
}

/// One open configuration endpoint on a device.
///
/// Reports are framed with an explicit report ID on every write
/// because the workable ID differs between firmware revisions and is
/// only discovered at runtime.
pub trait DeviceChannel {
    fn write_report(&mut self, report_id: u8, payload: &Report) -> Result<(), ChannelError>;
}
