use crate::events::{Event, EventTable};

/// Velocity that special chart markers (accents, flams, pedal notes) are
/// normalized to on the way out.
pub const NORMALIZED_VELOCITY: u8 = 100;

/// One rewrite pass over the event table.
///
/// Passes are total: events they do not match are left untouched, and no pass
/// may introduce a note-off. They run in the fixed order declared by the
/// conversion profile, each seeing the cumulative effect of the earlier ones.
pub trait RewritePass: Send + Sync {
    fn apply(&self, table: &mut EventTable);
}

/// Runs the passes in declared order.
pub fn apply_all(table: &mut EventTable, passes: &[Box<dyn RewritePass>]) {
    for pass in passes {
        pass.apply(table);
    }
}

/// Collapses a chord of specific simultaneous notes into one substitute note.
///
/// Fires only at ticks where *every* member of the match set is present as a
/// note-on; partial overlap leaves the tick untouched. The substitute copies
/// channel, velocity and track from the matched event with the numerically
/// smallest note number.
pub struct ReplaceChord {
    pub notes: &'static [u8],
    pub replacement: u8,
}

impl ReplaceChord {
    fn matches(&self, event: &Event) -> bool {
        event
            .strike()
            .map_or(false, |strike| self.notes.contains(&strike.key.as_int()))
    }
}

impl RewritePass for ReplaceChord {
    fn apply(&self, table: &mut EventTable) {
        for (_, bucket) in table.buckets_mut() {
            let covered = self.notes.iter().all(|&note| {
                bucket
                    .iter()
                    .any(|event| event.strike().map_or(false, |s| s.key.as_int() == note))
            });
            if !covered {
                continue;
            }
            let base = bucket
                .iter()
                .filter(|event| self.matches(event))
                .min_by_key(|event| event.strike().map(|s| s.key.as_int()))
                .cloned();
            if let Some(mut substitute) = base {
                if let Some(strike) = substitute.strike_mut() {
                    strike.key = self.replacement.into();
                }
                bucket.retain(|event| !self.matches(event));
                bucket.push(substitute);
            }
        }
    }
}

/// Unconditional note renumbering; velocity, channel and track untouched.
pub struct ReplaceNote {
    pub from: u8,
    pub to: u8,
}

impl RewritePass for ReplaceNote {
    fn apply(&self, table: &mut EventTable) {
        for event in table.iter_mut() {
            if let Some(strike) = event.strike_mut() {
                if strike.key.as_int() == self.from {
                    strike.key = self.to.into();
                }
            }
        }
    }
}

/// Renumbers a note only when it is hit at one distinguished velocity,
/// normalizing the output velocity. This models chart conventions where the
/// same pad at a marker velocity encodes a different instrument.
pub struct ReplaceNoteAtVelocity {
    pub from: u8,
    pub at_velocity: u8,
    pub to: u8,
}

impl RewritePass for ReplaceNoteAtVelocity {
    fn apply(&self, table: &mut EventTable) {
        for event in table.iter_mut() {
            if let Some(strike) = event.strike_mut() {
                if strike.key.as_int() == self.from && strike.vel.as_int() == self.at_velocity {
                    strike.key = self.to.into();
                    strike.vel = NORMALIZED_VELOCITY.into();
                }
            }
        }
    }
}

/// Rewrites one marker velocity to a playable dynamic level, for any note.
pub struct ReplaceVelocity {
    pub from: u8,
    pub to: u8,
}

impl RewritePass for ReplaceVelocity {
    fn apply(&self, table: &mut EventTable) {
        for event in table.iter_mut() {
            if let Some(strike) = event.strike_mut() {
                if strike.vel.as_int() == self.from {
                    strike.vel = self.to.into();
                }
            }
        }
    }
}

/// Routes every note-on in a note set to a fixed output track.
pub struct RouteNotes {
    pub notes: &'static [u8],
    pub to_track: usize,
}

impl RewritePass for RouteNotes {
    fn apply(&self, table: &mut EventTable) {
        for event in table.iter_mut() {
            if let Some(strike) = event.strike() {
                if self.notes.contains(&strike.key.as_int()) {
                    event.track = self.to_track;
                }
            }
        }
    }
}

/// Merges one track identifier into another, notes and pass-through events alike.
pub struct RouteTrack {
    pub from_track: usize,
    pub to_track: usize,
}

impl RewritePass for RouteTrack {
    fn apply(&self, table: &mut EventTable) {
        for event in table.iter_mut() {
            if event.track == self.from_track {
                event.track = self.to_track;
            }
        }
    }
}
