//! HID report ID discovery.
//!
//! The configuration endpoint is reached through different report IDs
//! depending on firmware revision. The workable ID cannot be read from
//! the descriptor, so it is found by probing: write an all-zero report
//! under each candidate ID and keep the first one the device accepts.
//! An all-zero payload matches no configuration command, so the probe
//! does not disturb device state.

use crate::channel::{ChannelError, DeviceChannel};
use crate::protocol::{REPORT_ID_CANDIDATES, REPORT_LEN};
use thiserror::Error;
use tracing::debug;

/// Every candidate report ID was rejected. Carries the error from the
/// final probe; earlier failures differ only in the attempted ID.
#[derive(Error, Debug)]
#[error("device rejected all candidate report IDs (3, 0, 2): {last}")]
pub struct NoResponsiveFirmware {
    #[source]
    pub last: ChannelError,
}

/// Probe the candidate report IDs in order and return the first one
/// the device accepts. Stops at the first success.
pub fn negotiate<C: DeviceChannel>(channel: &mut C) -> Result<u8, NoResponsiveFirmware> {
    let mut last: Option<ChannelError> = None;
    for id in REPORT_ID_CANDIDATES {
        match channel.write_report(id, &[0; REPORT_LEN]) {
            Ok(()) => {
                debug!(report_id = id, "device accepted report ID");
                return Ok(id);
            }
            Err(err) => {
                debug!(report_id = id, error = %err, "report ID rejected");
                last = Some(err);
            }
        }
    }
    let last = last.unwrap_or(ChannelError::Hid("no candidate report IDs".to_string()));
    Err(NoResponsiveFirmware { last })
}
