use crate::events::EventTable;
use crate::rules::{RewritePass, NORMALIZED_VELOCITY};

/// Infers which hand plays each hit of one instrument family and routes
/// off-hand hits to their own track.
///
/// Hits are the note-ons whose number is in `notes`, in chronological order.
/// A hit is *strong* when it lands on the beat or on its eighth-note "and"
/// (`tick % ticks_per_beat` of 0 or half a beat). Strong hits normally keep
/// the track they already carry; a strong hit whose successor follows exactly
/// a sixteenth later leads into an off-hand pickup and is routed to the
/// off-hand track instead, and every weak hit is presumed an off-hand fill.
///
/// The pass can run several times over overlapping note sets; later runs see
/// a broader hit sequence and override the routing of any hit they rewrite.
pub struct AssignHands {
    pub notes: &'static [u8],
    pub ticks_per_beat: u32,
    pub off_track: usize,
}

impl RewritePass for AssignHands {
    fn apply(&self, table: &mut EventTable) {
        let eighth = self.ticks_per_beat / 2;
        let sixteenth = self.ticks_per_beat / 4;
        let hits = collect_hits(table, self.notes);
        for (i, &(tick, index)) in hits.iter().enumerate() {
            let subdivision = tick % self.ticks_per_beat;
            let strong = subdivision == 0 || subdivision == eighth;
            // The last hit has no successor and can never lead into a pickup.
            let leads_into_pickup = strong
                && hits
                    .get(i + 1)
                    .map_or(false, |&(next_tick, _)| next_tick - tick == sixteenth);
            if !strong || leads_into_pickup {
                if let Some(bucket) = table.bucket_mut(tick) {
                    bucket[index].track = self.off_track;
                }
            }
        }
    }
}

/// Chronologically ordered (tick, index-within-bucket) positions of all
/// note-ons in the note set.
fn collect_hits(table: &EventTable, notes: &[u8]) -> Vec<(u32, usize)> {
    let mut hits = Vec::new();
    for (tick, bucket) in table.buckets() {
        for (index, event) in bucket.iter().enumerate() {
            if event
                .strike()
                .map_or(false, |strike| notes.contains(&strike.key.as_int()))
            {
                hits.push((tick, index));
            }
        }
    }
    hits
}

/// Expands a flam marker (one note at a signal velocity) into two strikes of
/// the output note at the same tick, one per hand, both at the normalized
/// velocity. The only pass that grows the event count.
pub struct ExpandFlam {
    pub note: u8,
    pub at_velocity: u8,
    pub replacement: u8,
    pub off_track: usize,
    pub lead_track: usize,
}

impl RewritePass for ExpandFlam {
    fn apply(&self, table: &mut EventTable) {
        for (_, bucket) in table.buckets_mut() {
            let mut doubled = Vec::new();
            for event in bucket.iter_mut() {
                let matched = event.strike().map_or(false, |strike| {
                    strike.key.as_int() == self.note && strike.vel.as_int() == self.at_velocity
                });
                if !matched {
                    continue;
                }
                if let Some(strike) = event.strike_mut() {
                    strike.key = self.replacement.into();
                    strike.vel = NORMALIZED_VELOCITY.into();
                }
                event.track = self.off_track;
                let mut grace = event.clone();
                grace.track = self.lead_track;
                doubled.push(grace);
            }
            bucket.extend(doubled);
        }
    }
}
