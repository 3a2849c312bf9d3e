//! The Moonscraper-chart-to-Melodics conversion profile.
//!
//! The ordered pass list below *is* the behavioral specification of the
//! conversion: later passes see the cumulative effect of earlier ones, so the
//! order is load-bearing and must not be shuffled.

use crate::hands::{AssignHands, ExpandFlam};
use crate::rules::{
    ReplaceChord, ReplaceNote, ReplaceNoteAtVelocity, ReplaceVelocity, RewritePass, RouteNotes,
    RouteTrack,
};
use once_cell::sync::Lazy;

/// Melodics refuses charts at any other resolution.
pub const EXPECTED_TPB: u16 = 96;
/// Length of every synthesized note, in ticks.
pub const NOTE_DURATION: u32 = 8;

// Chart lanes as Moonscraper writes them. The 110..112 markers turn the
// matching cymbal lane into a tom when both sound on the same tick.
const LANE_KICK: u8 = 96;
const LANE_2X_KICK: u8 = 95;
const LANE_RED: u8 = 97;
const LANE_YELLOW: u8 = 98;
const LANE_BLUE: u8 = 99;
const LANE_GREEN: u8 = 100;
const TOM_MARKER_YELLOW: u8 = 110;
const TOM_MARKER_BLUE: u8 = 111;
const TOM_MARKER_GREEN: u8 = 112;

// General MIDI percussion numbers Melodics listens for.
const KICK: u8 = 36;
const SNARE: u8 = 38;
const CLOSED_HIHAT: u8 = 42;
const LOW_TOM: u8 = 43;
const PEDAL_HIHAT: u8 = 44;
const MID_TOM: u8 = 45;
const OPEN_HIHAT: u8 = 46;
const HIGH_TOM: u8 = 48;
const CRASH: u8 = 49;
const RIDE: u8 = 51;

// Chart velocity conventions.
const ACCENT_VELOCITY: u8 = 127;
const GHOST_MARKER_VELOCITY: u8 = 1;
const GHOST_VELOCITY: u8 = 20;

// Hand tracks during the transform; the lead hand is merged into the final
// output track at the end of the pipeline.
const OFF_HAND_TRACK: usize = 5;
const LEAD_HAND_TRACK: usize = 6;
const OUTPUT_TRACK: usize = 2;

/// One immutable conversion configuration, threaded explicitly into ingestion
/// and synthesis. Nothing in the pipeline reads process-wide state.
pub struct Profile {
    pub ticks_per_beat: u16,
    pub note_duration: u32,
    pub passes: Vec<Box<dyn RewritePass>>,
}

/// The reference Melodics profile.
pub static MELODICS: Lazy<Profile> = Lazy::new(|| Profile {
    ticks_per_beat: EXPECTED_TPB,
    note_duration: NOTE_DURATION,
    passes: vec![
        // Tom markers plus their cymbal lane collapse into one tom.
        Box::new(ReplaceChord {
            notes: &[TOM_MARKER_YELLOW, LANE_YELLOW],
            replacement: HIGH_TOM,
        }),
        Box::new(ReplaceChord {
            notes: &[TOM_MARKER_BLUE, LANE_BLUE],
            replacement: MID_TOM,
        }),
        Box::new(ReplaceChord {
            notes: &[TOM_MARKER_GREEN, LANE_GREEN],
            replacement: LOW_TOM,
        }),
        // Plain lane renumbering.
        Box::new(ReplaceNote {
            from: LANE_KICK,
            to: KICK,
        }),
        Box::new(ReplaceNote {
            from: LANE_2X_KICK,
            to: KICK,
        }),
        Box::new(ReplaceNote {
            from: LANE_RED,
            to: SNARE,
        }),
        Box::new(ReplaceNote {
            from: LANE_YELLOW,
            to: CLOSED_HIHAT,
        }),
        Box::new(ReplaceNote {
            from: LANE_BLUE,
            to: RIDE,
        }),
        Box::new(ReplaceNote {
            from: LANE_GREEN,
            to: CRASH,
        }),
        // Accent velocity on a cymbal encodes a different hi-hat articulation.
        Box::new(ReplaceNoteAtVelocity {
            from: CRASH,
            at_velocity: ACCENT_VELOCITY,
            to: PEDAL_HIHAT,
        }),
        Box::new(ReplaceNoteAtVelocity {
            from: CLOSED_HIHAT,
            at_velocity: ACCENT_VELOCITY,
            to: OPEN_HIHAT,
        }),
        Box::new(ReplaceVelocity {
            from: GHOST_MARKER_VELOCITY,
            to: GHOST_VELOCITY,
        }),
        // Snare defaults to the lead hand, then the heuristic peels off-hand
        // hits away; the second run layers the toms into the hit sequence.
        Box::new(RouteNotes {
            notes: &[SNARE],
            to_track: LEAD_HAND_TRACK,
        }),
        Box::new(AssignHands {
            notes: &[SNARE, CLOSED_HIHAT],
            ticks_per_beat: EXPECTED_TPB as u32,
            off_track: OFF_HAND_TRACK,
        }),
        Box::new(AssignHands {
            notes: &[SNARE, HIGH_TOM, MID_TOM, LOW_TOM],
            ticks_per_beat: EXPECTED_TPB as u32,
            off_track: OFF_HAND_TRACK,
        }),
        Box::new(ExpandFlam {
            note: SNARE,
            at_velocity: ACCENT_VELOCITY,
            replacement: SNARE,
            off_track: OFF_HAND_TRACK,
            lead_track: LEAD_HAND_TRACK,
        }),
        // Collapse the source tracks and the lead hand onto the output track.
        Box::new(RouteTrack {
            from_track: 0,
            to_track: OUTPUT_TRACK,
        }),
        Box::new(RouteTrack {
            from_track: 1,
            to_track: OUTPUT_TRACK,
        }),
        Box::new(RouteTrack {
            from_track: LEAD_HAND_TRACK,
            to_track: OUTPUT_TRACK,
        }),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{ingest, ChartError};
    use crate::rules::apply_all;
    use crate::synth::synthesize;
    use crate::test_helpers::{note_on, smf_with_tracks};
    use midly::{MetaMessage, MidiMessage, TrackEventKind};

    fn convert<'a>(smf: &midly::Smf<'a>) -> Result<midly::Smf<'a>, ChartError> {
        let profile = &*MELODICS;
        let mut table = ingest(smf, profile.ticks_per_beat)?;
        apply_all(&mut table, &profile.passes);
        Ok(synthesize(
            &table,
            profile.ticks_per_beat,
            profile.note_duration,
            None,
        ))
    }

    fn notes(track: &midly::Track) -> Vec<(u32, u8, u8, bool)> {
        let mut cursor = 0;
        track
            .iter()
            .filter_map(|event| {
                cursor += event.delta.as_int();
                match event.kind {
                    TrackEventKind::Midi {
                        message: MidiMessage::NoteOn { key, vel },
                        ..
                    } => Some((cursor, key.as_int(), vel.as_int(), true)),
                    TrackEventKind::Midi {
                        message: MidiMessage::NoteOff { key, vel },
                        ..
                    } => Some((cursor, key.as_int(), vel.as_int(), false)),
                    _ => None,
                }
            })
            .collect()
    }

    #[test]
    fn tom_chord_converts_end_to_end() {
        // A yellow lane hit plus its tom marker on the same tick, nothing else.
        let smf = smf_with_tracks(
            96,
            vec![vec![(0, note_on(110, 100)), (0, note_on(98, 90))]],
        );
        let out = convert(&smf).unwrap();

        // One surviving track, named for the dominant hand.
        assert_eq!(out.tracks.len(), 1);
        assert_eq!(
            out.tracks[0][0].kind,
            TrackEventKind::Meta(MetaMessage::TrackName(b"RH"))
        );
        // The sole note is the high tom, attributes donated by the lower
        // chart note (98), with its synthesized off one duration later.
        assert_eq!(
            notes(&out.tracks[0]),
            vec![(0, 48, 90, true), (8, 48, 0, false)]
        );
    }

    #[test]
    fn snare_pickup_splits_across_both_hands() {
        let smf = smf_with_tracks(
            96,
            vec![vec![
                (0, note_on(97, 100)),
                (24, note_on(97, 100)),
                (24, note_on(97, 100)),
            ]],
        );
        let out = convert(&smf).unwrap();

        // Hits at 0 (pickup lead-in) and 24 (weak) go to the off hand; the
        // hit at 48 is a strong "and" with no pickup and stays on the lead
        // hand, which is merged into the first output track.
        assert_eq!(out.tracks.len(), 2);
        assert_eq!(
            out.tracks[0][0].kind,
            TrackEventKind::Meta(MetaMessage::TrackName(b"RH"))
        );
        assert_eq!(
            out.tracks[1][0].kind,
            TrackEventKind::Meta(MetaMessage::TrackName(b"LH"))
        );
        assert_eq!(
            notes(&out.tracks[0]),
            vec![(48, 38, 100, true), (56, 38, 0, false)]
        );
        assert_eq!(
            notes(&out.tracks[1]),
            vec![
                (0, 38, 100, true),
                (8, 38, 0, false),
                (24, 38, 100, true),
                (32, 38, 0, false)
            ]
        );
    }

    #[test]
    fn accented_snare_becomes_a_flam_on_both_tracks() {
        let smf = smf_with_tracks(96, vec![vec![(0, note_on(97, 127))]]);
        let out = convert(&smf).unwrap();
        assert_eq!(out.tracks.len(), 2);
        assert_eq!(
            notes(&out.tracks[0]),
            vec![(0, 38, 100, true), (8, 38, 0, false)]
        );
        assert_eq!(
            notes(&out.tracks[1]),
            vec![(0, 38, 100, true), (8, 38, 0, false)]
        );
    }

    #[test]
    fn resolution_mismatch_aborts_before_any_output() {
        let smf = smf_with_tracks(480, vec![vec![(0, note_on(97, 100))]]);
        assert!(matches!(
            convert(&smf),
            Err(ChartError::ResolutionMismatch {
                expected: 96,
                found: 480
            })
        ));
    }
}
