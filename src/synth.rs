use crate::events::{EventTable, Payload};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};
use std::collections::BTreeMap;

/// Names for the first two emitted tracks: dominant hand, then off hand.
/// Cosmetic only, for readability in downstream editors.
const TRACK_NAMES: [&[u8]; 2] = [b"RH", b"LH"];

/// Rebuilds a playable container from the final event table.
///
/// Events are partitioned by track identifier (one output track each, in
/// ascending identifier order). Every note-on gets a synthesized note-off at
/// `tick + note_duration` with the same key and channel at velocity zero;
/// no durations survive from the source file. Each track is stably sorted by
/// absolute tick and re-encoded as delta times from a per-track cursor
/// starting at zero. `only_track` restricts the output to a single track
/// identifier. An empty table yields a container with no tracks.
pub fn synthesize<'a>(
    table: &EventTable<'a>,
    ticks_per_beat: u16,
    note_duration: u32,
    only_track: Option<usize>,
) -> Smf<'a> {
    let mut by_track: BTreeMap<usize, Vec<(u32, TrackEventKind<'a>)>> = BTreeMap::new();
    for event in table.iter() {
        let timeline = by_track.entry(event.track).or_default();
        match event.payload {
            Payload::Note(strike) => {
                timeline.push((
                    event.tick,
                    TrackEventKind::Midi {
                        channel: strike.channel,
                        message: MidiMessage::NoteOn {
                            key: strike.key,
                            vel: strike.vel,
                        },
                    },
                ));
                timeline.push((
                    event.tick + note_duration,
                    TrackEventKind::Midi {
                        channel: strike.channel,
                        message: MidiMessage::NoteOff {
                            key: strike.key,
                            vel: 0.into(),
                        },
                    },
                ));
            }
            Payload::Other(kind) => timeline.push((event.tick, kind)),
        }
    }

    let mut tracks: Vec<Track> = Vec::new();
    for (track_id, mut timeline) in by_track {
        if only_track.map_or(false, |only| only != track_id) {
            continue;
        }
        // Stable sort: same-tick events keep their insertion order.
        timeline.sort_by_key(|&(tick, _)| tick);
        let mut track = Track::new();
        let mut cursor = 0u32;
        for (tick, kind) in timeline {
            track.push(TrackEvent {
                delta: (tick - cursor).into(),
                kind,
            });
            cursor = tick;
        }
        track.push(TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        tracks.push(track);
    }

    for (track, name) in tracks.iter_mut().zip(TRACK_NAMES) {
        track.insert(
            0,
            TrackEvent {
                delta: 0.into(),
                kind: TrackEventKind::Meta(MetaMessage::TrackName(name)),
            },
        );
    }

    Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(ticks_per_beat.into())),
        tracks,
    }
}
