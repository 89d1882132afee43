use crate::ax25::{ChecksummedFrame, RawFrame};
use crate::config::EncoderConfig;
use crate::error::Result;
use crate::hdlc::BitSequence;
use crate::modem::{AfskModulator, Modem, Waveform};

/// Message to waveform pipeline for one station configuration.
pub struct AprsEncoder<M = AfskModulator> {
    modem: M,
    config: EncoderConfig,
}

impl AprsEncoder<AfskModulator> {
    pub fn new(config: &EncoderConfig) -> Result<Self> {
        let modem = AfskModulator::new(config.sample_rate, config.baud_rate)?;
        Ok(Self::with_modem(config, modem))
    }
}

impl<M> AprsEncoder<M>
where
    M: Modem,
{
    pub fn with_modem(config: &EncoderConfig, modem: M) -> Self {
        Self {
            modem,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn frame(&self, payload: &str) -> Result<ChecksummedFrame> {
        let raw_frame = RawFrame::build(
            &self.config.destination,
            &self.config.source,
            &self.config.path,
            payload,
        )?;
        debug!("Raw frame: {:02X?}", raw_frame.as_bytes());

        Ok(raw_frame.append_crc())
    }

    pub fn encode(&self, payload: &str) -> Result<Waveform> {
        let frame = self.frame(payload)?;
        info!(
            "Frame {} > {} ({} bytes, FCS {:#06X})",
            self.config.source,
            self.config.destination,
            frame.len(),
            frame.fcs()
        );

        let bits = BitSequence::encode_with(&frame, self.config.framing)?;
        debug!("Bit sequence length: {:?}", bits.len());

        let waveform = self.modem.modulate(&bits);
        info!(
            "Modulated {} samples at {} Hz ({:.2} s)",
            waveform.len(),
            waveform.sample_rate(),
            waveform.duration_secs()
        );

        Ok(waveform)
    }
}
