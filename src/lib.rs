//! Drum-chart to Melodics MIDI converter.
//!
//! Reads a Moonscraper-style drum chart, remaps its lane note numbers to
//! General MIDI drums, splits the hits across a left-hand and a right-hand
//! track with a timing heuristic, and writes the result back out with
//! synthesized fixed-length note-offs.

pub mod cmdline;
pub mod drums;
pub mod events;
pub mod hands;
pub mod ingest;
pub mod profile;
pub mod rules;
pub mod synth;
#[cfg(test)]
pub mod test_helpers;

pub use events::{Event, EventTable, Payload, Strike};
pub use ingest::ChartError;
pub use profile::Profile;
pub use rules::RewritePass;
