use crate::ax25::StationId;
use crate::error::Result;
use crate::hdlc::HdlcFraming;
use crate::modem::DEFAULT_BAUD_RATE;

pub const DEFAULT_SOURCE: &str = "N0CALL";
pub const DEFAULT_DESTINATION: &str = "APCSS";
pub const DEFAULT_PATH: &[&str] = &["WIDE1-1"];
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub source: StationId,
    pub destination: StationId,
    pub path: Vec<StationId>,
    pub sample_rate: u32,
    pub baud_rate: u32,
    pub framing: HdlcFraming,
}

impl EncoderConfig {
    /// Builds a configuration from textual `CALL[-SSID]` identifiers.
    pub fn from_calls<S: AsRef<str>>(source: &str, destination: &str, path: &[S]) -> Result<Self> {
        Ok(Self {
            source: source.parse()?,
            destination: destination.parse()?,
            path: path
                .iter()
                .map(|call| call.as_ref().parse())
                .collect::<Result<Vec<_>>>()?,
            ..Self::default()
        })
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_framing(mut self, framing: HdlcFraming) -> Self {
        self.framing = framing;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        // The default identifiers are compile-time literals known to be valid.
        let station = |call: &str| {
            call.parse::<StationId>()
                .unwrap_or_else(|error| unreachable!("{}", error))
        };

        Self {
            source: station(DEFAULT_SOURCE),
            destination: station(DEFAULT_DESTINATION),
            path: DEFAULT_PATH.iter().map(|&call| station(call)).collect(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            baud_rate: DEFAULT_BAUD_RATE,
            framing: HdlcFraming::default(),
        }
    }
}
