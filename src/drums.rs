/// General MIDI percussion key map, the subset a drum chart can produce.
/// Used for human-readable inspection output only.
pub fn gm_drum_name(key: u8) -> Option<&'static str> {
    match key {
        35 => Some("Acoustic Bass Drum"),
        36 => Some("Kick"),
        37 => Some("Side Stick"),
        38 => Some("Snare"),
        39 => Some("Hand Clap"),
        40 => Some("Electric Snare"),
        41 => Some("Low Floor Tom"),
        42 => Some("Closed Hi-Hat"),
        43 => Some("Low Tom"),
        44 => Some("Pedal Hi-Hat"),
        45 => Some("Mid Tom"),
        46 => Some("Open Hi-Hat"),
        47 => Some("Low-Mid Tom"),
        48 => Some("High Tom"),
        49 => Some("Crash"),
        50 => Some("High Tom 2"),
        51 => Some("Ride"),
        52 => Some("Chinese Cymbal"),
        53 => Some("Ride Bell"),
        54 => Some("Tambourine"),
        55 => Some("Splash Cymbal"),
        56 => Some("Cowbell"),
        57 => Some("Crash 2"),
        59 => Some("Ride 2"),
        _ => None,
    }
}
