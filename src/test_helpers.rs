//! Shared helpers for the unit tests.

use crate::events::{Event, EventTable};
use midly::{Format, Header, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

/// Builds an event table from (tick, track, key, velocity) tuples on the
/// drum channel. This keeps the rule tests short.
pub fn table_of(hits: &[(u32, usize, u8, u8)]) -> EventTable<'static> {
    let mut table = EventTable::new();
    for &(tick, track, key, vel) in hits {
        table.insert(Event::note(tick, track, 9, key, vel));
    }
    table
}

/// Flattens the table's note events back to (tick, track, key, velocity)
/// tuples for assertions.
pub fn strikes_of(table: &EventTable) -> Vec<(u32, usize, u8, u8)> {
    table
        .iter()
        .filter_map(|event| {
            event
                .strike()
                .map(|s| (event.tick, event.track, s.key.as_int(), s.vel.as_int()))
        })
        .collect()
}

pub fn note_on(key: u8, vel: u8) -> TrackEventKind<'static> {
    TrackEventKind::Midi {
        channel: 9.into(),
        message: MidiMessage::NoteOn {
            key: key.into(),
            vel: vel.into(),
        },
    }
}

pub fn note_off(key: u8) -> TrackEventKind<'static> {
    TrackEventKind::Midi {
        channel: 9.into(),
        message: MidiMessage::NoteOff {
            key: key.into(),
            vel: 0.into(),
        },
    }
}

/// Assembles an in-memory container at the given resolution from
/// delta-encoded (delta, kind) event lists, one per track.
pub fn smf_with_tracks(
    ticks_per_beat: u16,
    tracks: Vec<Vec<(u32, TrackEventKind<'static>)>>,
) -> Smf<'static> {
    Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(ticks_per_beat.into())),
        tracks: tracks
            .into_iter()
            .map(|events| {
                events
                    .into_iter()
                    .map(|(delta, kind)| TrackEvent {
                        delta: delta.into(),
                        kind,
                    })
                    .collect()
            })
            .collect(),
    }
}
