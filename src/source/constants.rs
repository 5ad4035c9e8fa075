/// Default pause between replayed readings in milliseconds
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 1000;

/// Default number of readings buffered by a subscription before publishers wait
pub const DEFAULT_SUBSCRIPTION_CAPACITY: usize = 64;

/// Known AirGradient devices and the telemetry topics they publish on
pub const KNOWN_DEVICES: [(&str, &str); 7] = [
    ("Greencoat GB_G03", "airgradient/readings/0cb815082660"),
    ("Greencoat GB_G04", "airgradient/readings/4022d8f9b4d8"),
    ("Peckham PR_B501-01", "airgradient/readings/dc5475bb845c"),
    ("Peckham PR_B501-02", "airgradient/readings/b48a0a613900"),
    ("Peckham PR_B501-03", "airgradient/readings/dc5475bcc430"),
    ("High Holborn HH_302", "airgradient/readings/dc5475bce770"),
    ("High Holborn HH_308", "airgradient/readings/dc5475bacb84"),
];

/// Topic for a known building, if any
pub fn topic_for_building(building: &str) -> Option<&'static str> {
    KNOWN_DEVICES.iter().find(|(name, _)| *name == building).map(|(_, topic)| *topic)
}
