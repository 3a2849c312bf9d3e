use anyhow::{Context, Result};
use chart2melodics::cmdline::parse_args;
use chart2melodics::profile::MELODICS;
use chart2melodics::{ingest, rules, synth};
use std::fs;

fn main() -> Result<()> {
    let args = parse_args();
    let profile = &*MELODICS;

    let data = fs::read(&args.input)
        .with_context(|| format!("Failed to read chart file {}", args.input.display()))?;
    let smf = ingest::parse(&data)?;
    let mut events = ingest::ingest(&smf, profile.ticks_per_beat)?;
    println!(
        "Read {} events from {} tracks in {}",
        events.len(),
        smf.tracks.len(),
        args.input.display()
    );

    rules::apply_all(&mut events, &profile.passes);

    let out = synth::synthesize(
        &events,
        profile.ticks_per_beat,
        profile.note_duration,
        args.track,
    );
    out.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Wrote {} tracks to {}",
        out.tracks.len(),
        args.output.display()
    );
    Ok(())
}
