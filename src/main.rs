use argh::FromArgs;
use std::path::PathBuf;
use std::process::ExitCode;

use aprs_afsk::audio::{Player, WavFile};
use aprs_afsk::config::{self, EncoderConfig};
use aprs_afsk::node::AprsEncoder;

#[macro_use]
extern crate nolog;

const STATUS_REPORT_PREFIX: &str = ">";
const OUTPUT_FILE_SUFFIX: &str = "_aprs.wav";

#[derive(FromArgs)]
#[argh(description = "Encode an APRS status message into a 1200 baud AFSK wave file")]
struct Args {
    #[argh(positional)]
    #[argh(description = "message text, sent as an APRS status report")]
    message: String,

    #[argh(option, short = 's')]
    #[argh(description = "source call sign, CALL[-SSID]")]
    #[argh(default = "config::DEFAULT_SOURCE.to_string()")]
    source: String,

    #[argh(option, short = 'd')]
    #[argh(description = "destination call sign, CALL[-SSID]")]
    #[argh(default = "config::DEFAULT_DESTINATION.to_string()")]
    destination: String,

    #[argh(option, short = 'p')]
    #[argh(description = "digipeater path entry, repeat for more hops")]
    path: Vec<String>,

    #[argh(switch)]
    #[argh(description = "send without any digipeater path")]
    no_path: bool,

    #[argh(option, short = 'r')]
    #[argh(description = "output sample rate in Hz")]
    #[argh(default = "config::DEFAULT_SAMPLE_RATE")]
    sample_rate: u32,

    #[argh(option, short = 'o')]
    #[argh(description = "output wave file, derived from the message by default")]
    output: Option<PathBuf>,

    #[argh(switch)]
    #[argh(description = "only write the wave file, skip playback")]
    no_play: bool,
}

fn output_file_name(message: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", message, OUTPUT_FILE_SUFFIX).replace('=', "_"))
}

fn run(args: Args) -> aprs_afsk::Result<()> {
    let path = match (args.no_path, args.path.is_empty()) {
        (true, _) => Vec::new(),
        (false, true) => config::DEFAULT_PATH.iter().map(|call| call.to_string()).collect(),
        (false, false) => args.path,
    };

    let config = EncoderConfig::from_calls(&args.source, &args.destination, &path)?
        .with_sample_rate(args.sample_rate);
    let encoder = AprsEncoder::new(&config)?;

    let payload = format!("{}{}", STATUS_REPORT_PREFIX, args.message);
    let waveform = encoder.encode(&payload)?;

    let file_name = args
        .output
        .unwrap_or_else(|| output_file_name(&args.message));
    WavFile::write(&file_name, &waveform)?;
    info!("Generated {:?} with content: {}", file_name, payload);

    if args.no_play {
        return Ok(());
    }

    let recorded = WavFile::read(&file_name)?;
    Player::new()?.play(&recorded)
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
