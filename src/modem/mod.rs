mod afsk;
pub use afsk::{AfskModulator, Oscillator};
pub use afsk::{AMPLITUDE, DEFAULT_BAUD_RATE, MARK_FREQUENCY, SPACE_FREQUENCY};

use crate::hdlc::BitSequence;

pub trait Modem {
    fn sample_rate(&self) -> u32;
    fn modulate(&self, bits: &BitSequence) -> Waveform;
}

/// Signed 16-bit mono samples at a fixed rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
