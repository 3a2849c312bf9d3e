use chart2melodics::drums::gm_drum_name;
use midly::{MidiMessage::NoteOn, Timing, TrackEventKind::Midi};
use std::{collections::BTreeMap, env};

fn main() {
    let args: Vec<String> = env::args().collect();
    let chart_path = &args[1];

    let data = std::fs::read(chart_path).unwrap();
    let smf = midly::Smf::parse(&data).unwrap();

    match smf.header.timing {
        Timing::Metrical(tpb) => println!("{} ticks per beat", tpb.as_int()),
        timing => println!("timecode timing {:?}", timing),
    }

    let mut histogram: BTreeMap<u8, usize> = BTreeMap::new();
    for (track_num, track) in smf.tracks.iter().enumerate() {
        let mut note_ons = 0;
        for event in track {
            if let Midi {
                message: NoteOn { key, .. },
                ..
            } = event.kind
            {
                note_ons += 1;
                *histogram.entry(key.as_int()).or_default() += 1;
            }
        }
        println!(
            "track {}: {} events, {} 'note on' events",
            track_num,
            track.len(),
            note_ons
        );
    }

    for (key, count) in histogram {
        println!(
            "{:>4} {:<18} {:>5}",
            key,
            gm_drum_name(key).unwrap_or("(chart lane)"),
            count
        );
    }
}
