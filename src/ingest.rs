use crate::events::{Event, EventTable, Payload, Strike};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("ticks per beat is {found}, expected {expected}")]
    ResolutionMismatch { expected: u16, found: u16 },

    #[error("SMPTE timecode timing is not supported, expected {expected} ticks per beat")]
    TimecodeResolution { expected: u16 },

    #[error("malformed MIDI container: {0}")]
    MalformedContainer(#[from] midly::Error),
}

/// Parses raw MIDI bytes, surfacing codec failures as [`ChartError`].
pub fn parse(data: &[u8]) -> Result<Smf<'_>, ChartError> {
    Ok(Smf::parse(data)?)
}

/// Flattens a parsed container into an [`EventTable`].
///
/// Walks every track accumulating absolute tick positions from the per-message
/// deltas. All note-offs are discarded — source durations are intentionally
/// lost and re-synthesized later with a fixed length. End-of-track markers are
/// dropped too, since the synthesizer emits its own. Everything else is kept
/// unchanged, tagged with its originating track index.
pub fn ingest<'a>(smf: &Smf<'a>, expected_tpb: u16) -> Result<EventTable<'a>, ChartError> {
    check_resolution(smf.header.timing, expected_tpb)?;

    let mut table = EventTable::new();
    for (track_index, track) in smf.tracks.iter().enumerate() {
        let mut tick = 0u32;
        for event in track {
            tick += event.delta.as_int();
            let payload = match event.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOff { .. },
                    ..
                } => continue,
                TrackEventKind::Meta(MetaMessage::EndOfTrack) => continue,
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn { key, vel },
                } => Payload::Note(Strike { channel, key, vel }),
                kind => Payload::Other(kind),
            };
            table.insert(Event {
                tick,
                track: track_index,
                payload,
            });
        }
    }
    Ok(table)
}

fn check_resolution(timing: Timing, expected_tpb: u16) -> Result<(), ChartError> {
    match timing {
        Timing::Metrical(tpb) if tpb.as_int() == expected_tpb => Ok(()),
        Timing::Metrical(tpb) => Err(ChartError::ResolutionMismatch {
            expected: expected_tpb,
            found: tpb.as_int(),
        }),
        Timing::Timecode(..) => Err(ChartError::TimecodeResolution {
            expected: expected_tpb,
        }),
    }
}
