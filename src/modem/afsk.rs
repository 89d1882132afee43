use std::f64::consts::TAU;

use super::{Modem, Waveform};
use crate::error::{EncodingError, Result};
use crate::hdlc::BitSequence;

pub const MARK_FREQUENCY: f64 = 1200.0;
pub const SPACE_FREQUENCY: f64 = 2200.0;
pub const DEFAULT_BAUD_RATE: u32 = 1200;
pub const AMPLITUDE: f64 = 16000.0;

/// Bell 202 style AFSK with NRZI line coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AfskModulator {
    sample_rate: u32,
    baud_rate: u32,
    samples_per_bit: usize,
}

impl AfskModulator {
    pub fn new(sample_rate: u32, baud_rate: u32) -> Result<Self> {
        if baud_rate == 0 {
            return Err(EncodingError::ZeroBaudRate.into());
        }
        if sample_rate < baud_rate {
            return Err(EncodingError::SampleRateBelowBaud {
                sample_rate,
                baud_rate,
            }
            .into());
        }

        // Truncated on purpose: 44100 / 1200 gives 36, not 36.75.
        let samples_per_bit = (sample_rate / baud_rate) as usize;

        Ok(Self {
            sample_rate,
            baud_rate,
            samples_per_bit,
        })
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn samples_per_bit(&self) -> usize {
        self.samples_per_bit
    }
}

impl Modem for AfskModulator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn modulate(&self, bits: &BitSequence) -> Waveform {
        let mut samples = Vec::with_capacity(bits.len() * self.samples_per_bit);

        bits.iter().fold(Oscillator::new(), |oscillator, bit| {
            oscillator.step(bit, self, &mut samples)
        });

        Waveform::new(samples, self.sample_rate)
    }
}

/// Phase accumulator and NRZI tone state for one modulation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    phase: f64,
    tone_is_mark: bool,
}

impl Oscillator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            tone_is_mark: true,
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn tone_is_mark(&self) -> bool {
        self.tone_is_mark
    }

    pub fn frequency(&self) -> f64 {
        if self.tone_is_mark {
            MARK_FREQUENCY
        } else {
            SPACE_FREQUENCY
        }
    }

    /// Synthesizes one bit period into `samples` and returns the advanced state.
    pub fn step(self, bit: bool, modem: &AfskModulator, samples: &mut Vec<i16>) -> Self {
        // NRZI: a zero is a tone transition.
        let tone_is_mark = if bit { self.tone_is_mark } else { !self.tone_is_mark };
        let next = Self {
            tone_is_mark,
            ..self
        };

        let increment = TAU * next.frequency() / modem.sample_rate as f64;
        let phase = (0..modem.samples_per_bit).fold(next.phase, |phase, _| {
            let phase = phase + increment;
            samples.push((phase.sin() * AMPLITUDE).round() as i16);
            phase
        });

        Self {
            phase: phase % TAU,
            tone_is_mark,
        }
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}
