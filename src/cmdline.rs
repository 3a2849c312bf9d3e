use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "chart2melodics",
    about = "Convert a Moonscraper drum chart MIDI file into a Melodics practice file"
)]
pub struct Cli {
    /// Chart MIDI file to convert (must be at 96 ticks per beat)
    #[structopt(short = "i", long = "input", parse(from_os_str))]
    pub input: PathBuf,
    /// Converted MIDI file to write
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    pub output: PathBuf,
    /// Write only this output track instead of all of them
    #[structopt(short = "t", long = "track")]
    pub track: Option<usize>,
}

pub fn parse_args() -> Cli {
    Cli::from_args()
}
