use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid station identifier `{identifier}`: {reason}")]
    InvalidIdentifier {
        identifier: String,
        reason: &'static str,
    },

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("audio I/O failure: {0}")]
    IoFailure(#[from] IoFailure),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("payload contains non-ASCII character {0:?}")]
    NonAsciiPayload(char),

    #[error("cannot encode an empty frame")]
    EmptyFrame,

    #[error("baud rate must be non-zero")]
    ZeroBaudRate,

    #[error("sample rate {sample_rate} Hz is below the baud rate {baud_rate}")]
    SampleRateBelowBaud { sample_rate: u32, baud_rate: u32 },
}

#[derive(Debug, Error)]
pub enum IoFailure {
    #[error(transparent)]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Playback(#[from] jack::Error),

    #[error("no playback port available on the audio server")]
    NoPlaybackPort,

    #[error("unsupported audio format: {channels} channel(s), {bits_per_sample} bit")]
    UnsupportedFormat { channels: u16, bits_per_sample: u16 },
}

impl Error {
    pub(crate) fn invalid_identifier(identifier: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            reason,
        }
    }
}

impl From<hound::Error> for Error {
    fn from(error: hound::Error) -> Self {
        Self::IoFailure(IoFailure::Wav(error))
    }
}

impl From<jack::Error> for Error {
    fn from(error: jack::Error) -> Self {
        Self::IoFailure(IoFailure::Playback(error))
    }
}
