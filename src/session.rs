//! Configuration session over a device channel.
//!
//! A session tracks the two pieces of state the wire protocol makes
//! implicit: the negotiated report ID and the layer targeted by the
//! most recent successful write. Reports are transmitted strictly in
//! order with no retries; if a write fails, later reports of the same
//! operation are not sent and the device may hold a partial update
//! until the next successful flash.

use crate::channel::{ChannelError, DeviceChannel};
use crate::key_binding::KeyBinding;
use crate::negotiate::{negotiate, NoResponsiveFirmware};
use crate::report::{self, EncodeError, Report};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("report ID negotiation failed: {0}")]
    Negotiation(#[from] NoResponsiveFirmware),
    #[error("cannot encode binding: {0}")]
    Encode(#[from] EncodeError),
    #[error("write {step} of {total} failed ({source}); earlier writes may already be applied")]
    Write {
        step: usize,
        total: usize,
        source: ChannelError,
    },
}

pub struct Session<'a, C: DeviceChannel> {
    channel: &'a mut C,
    report_id: Option<u8>,
    last_layer: Option<u8>,
}

impl<'a, C: DeviceChannel> Session<'a, C> {
    /// Start a session. No I/O happens until the first operation; the
    /// report ID is negotiated on demand and kept for the lifetime of
    /// the session, never across channels.
    pub fn new(channel: &'a mut C) -> Self {
        Session {
            channel,
            report_id: None,
            last_layer: None,
        }
    }

    /// The negotiated report ID, probing the device the first time.
    pub fn report_id(&mut self) -> Result<u8, SessionError> {
        if let Some(id) = self.report_id {
            return Ok(id);
        }
        let id = negotiate(&mut *self.channel)?;
        self.report_id = Some(id);
        Ok(id)
    }

    /// Program one physical key on one layer and flash the result.
    ///
    /// A layer switch report is prepended unless the previous
    /// successful operation already targeted `layer`. Encoding errors
    /// surface before anything is written.
    pub fn apply_binding(
        &mut self,
        key: u8,
        layer: u8,
        binding: &KeyBinding,
    ) -> Result<(), SessionError> {
        if let KeyBinding::Led { mode } = *binding {
            return self.apply_led_mode(mode);
        }

        let mut reports = Vec::with_capacity(4);
        if self.last_layer != Some(layer) {
            reports.push(report::encode_layer_switch(layer)?);
        }
        reports.extend(report::encode(binding, key, layer)?);
        reports.push(report::encode_flash(false));

        // A partial transmission leaves the device layer unknown.
        self.last_layer = None;
        self.transmit(&reports)?;
        self.last_layer = Some(layer);
        Ok(())
    }

    /// Set the backlight mode and flash the LED settings bank. Does
    /// not touch the layer state.
    pub fn apply_led_mode(&mut self, mode: u8) -> Result<(), SessionError> {
        let reports = [report::encode_led_mode(mode), report::encode_flash(true)];
        self.transmit(&reports)
    }

    fn transmit(&mut self, reports: &[Report]) -> Result<(), SessionError> {
        let report_id = self.report_id()?;
        let total = reports.len();
        for (i, payload) in reports.iter().enumerate() {
            debug!("TX {}/{} (report ID {}): {:02x?}", i + 1, total, report_id, payload);
            self.channel
                .write_report(report_id, payload)
                .map_err(|source| SessionError::Write {
                    step: i + 1,
                    total,
                    source,
                })?;
        }
        Ok(())
    }
}
