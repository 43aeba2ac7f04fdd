//! Integration tests for the parse → encode → transmit pipeline.
//!
//! These exercise the full configuration flow against a scripted
//! in-memory channel and check the exact byte sequences a device
//! would receive. No hardware required.

use turbokeys::channel::{ChannelError, DeviceChannel};
use turbokeys::{parse_physical_key, KeyBinding, Report, Session, SessionError};

/// Rejects report IDs not in `accept`, optionally fails one specific
/// write call, and records every successful write.
struct ScriptedChannel {
    accept: Vec<u8>,
    fail_on_call: Option<usize>,
    calls: usize,
    writes: Vec<(u8, Report)>,
}

impl ScriptedChannel {
    fn accepting(ids: &[u8]) -> Self {
        ScriptedChannel {
            accept: ids.to_vec(),
            fail_on_call: None,
            calls: 0,
            writes: Vec::new(),
        }
    }
}

impl DeviceChannel for ScriptedChannel {
    fn write_report(&mut self, report_id: u8, payload: &Report) -> Result<(), ChannelError> {
        self.calls += 1;
        if !self.accept.contains(&report_id) {
            return Err(ChannelError::Hid(format!("rejected report ID {report_id}")));
        }
        if self.fail_on_call == Some(self.calls) {
            return Err(ChannelError::Hid("simulated failure".to_string()));
        }
        self.writes.push((report_id, *payload));
        Ok(())
    }
}

fn binding(spec: &str) -> KeyBinding {
    spec.parse().unwrap()
}

// ── Full transaction byte sequences ──

#[test]
fn basic_binding_full_transaction() {
    let mut channel = ScriptedChannel::accepting(&[3]);
    let mut session = Session::new(&mut channel);
    session.apply_binding(2, 1, &binding("ctrl+c")).unwrap();

    assert_eq!(
        channel.writes,
        vec![
            // Negotiation probe
            (3, [0, 0, 0, 0, 0, 0, 0, 0]),
            // Layer switch
            (3, [0xA1, 1, 0, 0, 0, 0, 0, 0]),
            // Sequence header: key 2, layer 1 | basic, 1 keycode, ctrl
            (3, [2, 0x11, 1, 0, 0x01, 0, 0, 0]),
            // Keycode packet: c = 6
            (3, [2, 0x11, 1, 1, 0x01, 0x06, 0, 0]),
            // Flash key bank
            (3, [0xAA, 0xAA, 0, 0, 0, 0, 0, 0]),
        ]
    );
}

#[test]
fn media_binding_on_knob() {
    let key = parse_physical_key("knob1_press").unwrap();
    assert_eq!(key, 14);

    let mut channel = ScriptedChannel::accepting(&[3]);
    let mut session = Session::new(&mut channel);
    session.apply_binding(key, 2, &binding("playpause")).unwrap();

    assert_eq!(
        channel.writes,
        vec![
            (3, [0, 0, 0, 0, 0, 0, 0, 0]),
            (3, [0xA1, 2, 0, 0, 0, 0, 0, 0]),
            // Media reports carry the function code directly, no header
            (3, [14, 0x22, 205, 0, 0, 0, 0, 0]),
            (3, [0xAA, 0xAA, 0, 0, 0, 0, 0, 0]),
        ]
    );
}

#[test]
fn led_mode_full_transaction() {
    let mut channel = ScriptedChannel::accepting(&[3]);
    let mut session = Session::new(&mut channel);
    session.apply_led_mode(1).unwrap();

    assert_eq!(
        channel.writes,
        vec![
            (3, [0, 0, 0, 0, 0, 0, 0, 0]),
            (3, [0xB0, 0x08, 1, 0, 0, 0, 0, 0]),
            (3, [0xAA, 0xA1, 0, 0, 0, 0, 0, 0]),
        ]
    );
}

// ── Report ID fallback ──

#[test]
fn fallback_firmware_configured_under_id_zero() {
    let mut channel = ScriptedChannel::accepting(&[0]);
    let mut session = Session::new(&mut channel);
    session.apply_binding(1, 1, &binding("escape")).unwrap();

    // Probe under 3 was rejected before 0 succeeded.
    assert_eq!(channel.calls, channel.writes.len() + 1);
    assert!(channel.writes.iter().all(|(id, _)| *id == 0));
    assert_eq!(channel.writes[0], (0, [0, 0, 0, 0, 0, 0, 0, 0]));
    assert_eq!(channel.writes[1], (0, [0xA1, 1, 0, 0, 0, 0, 0, 0]));
}

#[test]
fn dead_channel_rejects_every_candidate() {
    let mut channel = ScriptedChannel::accepting(&[]);
    let mut session = Session::new(&mut channel);
    let err = session.apply_binding(1, 1, &binding("a")).unwrap_err();

    assert!(matches!(err, SessionError::Negotiation(_)));
    // Candidates 3, 0, 2, nothing else.
    assert_eq!(channel.calls, 3);
    assert!(channel.writes.is_empty());
}

// ── Session state across operations ──

#[test]
fn one_session_many_bindings() {
    let mut channel = ScriptedChannel::accepting(&[3]);
    let mut session = Session::new(&mut channel);
    session.apply_binding(1, 1, &binding("ctrl+a")).unwrap();
    session.apply_binding(2, 1, &binding("ctrl+b")).unwrap();
    session.apply_binding(3, 2, &binding("f5")).unwrap();

    let probes = channel
        .writes
        .iter()
        .filter(|(_, p)| *p == [0; 8])
        .count();
    assert_eq!(probes, 1);

    let switches: Vec<u8> = channel
        .writes
        .iter()
        .filter(|(_, p)| p[0] == 0xA1)
        .map(|(_, p)| p[1])
        .collect();
    assert_eq!(switches, vec![1, 2]);

    let flashes = channel
        .writes
        .iter()
        .filter(|(_, p)| p[0] == 0xAA)
        .count();
    assert_eq!(flashes, 3);
}

#[test]
fn write_failure_reports_position_and_stops() {
    // Call 1 is the probe; scheduled writes are calls 2-5. Failing
    // call 4 fails the third scheduled write.
    let mut channel = ScriptedChannel::accepting(&[3]);
    channel.fail_on_call = Some(4);
    let mut session = Session::new(&mut channel);

    let err = session.apply_binding(2, 1, &binding("ctrl+c")).unwrap_err();
    match err {
        SessionError::Write { step, total, .. } => {
            assert_eq!(step, 3);
            assert_eq!(total, 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(channel.writes.len(), 3);

    // The session keeps its negotiated ID and recovers on the next
    // operation, re-sending the layer switch.
    session.apply_binding(2, 1, &binding("ctrl+c")).unwrap();
    let probes = channel
        .writes
        .iter()
        .filter(|(_, p)| *p == [0; 8])
        .count();
    assert_eq!(probes, 1);
    let switches = channel
        .writes
        .iter()
        .filter(|(_, p)| p[0] == 0xA1)
        .count();
    assert_eq!(switches, 2);
}

// ── Spec strings to wire bytes ──

#[test]
fn spec_strings_produce_expected_keycode_packets() {
    let cases: &[(&str, u8, u8)] = &[
        // spec, modifier mask, keycode
        ("a", 0x00, 4),
        ("ctrl+c", 0x01, 6),
        ("ctrl+shift+escape", 0x03, 41),
        ("win+d", 0x08, 7),
        ("ralt+f12", 0x40, 69),
        ("ctrl+alt+kp_5", 0x05, 93),
    ];

    for &(spec, mods, code) in cases {
        let mut channel = ScriptedChannel::accepting(&[3]);
        let mut session = Session::new(&mut channel);
        session.apply_binding(5, 1, &binding(spec)).unwrap();

        let keycode_packet = channel
            .writes
            .iter()
            .find(|(_, p)| p[0] == 5 && p[3] == 1)
            .unwrap_or_else(|| panic!("{spec}: no keycode packet"));
        assert_eq!(keycode_packet.1[4], mods, "{spec}: modifier mask");
        assert_eq!(keycode_packet.1[5], code, "{spec}: keycode");
    }
}
