use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::error::{IoFailure, Result};
use crate::modem::Waveform;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

pub struct WavFile;

impl WavFile {
    pub fn spec(sample_rate: u32) -> WavSpec {
        WavSpec {
            channels: CHANNELS,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_rate,
            sample_format: SampleFormat::Int,
        }
    }

    pub fn write<P: AsRef<Path>>(path: P, waveform: &Waveform) -> Result<()> {
        let writer = WavWriter::create(path, Self::spec(waveform.sample_rate()))?;
        Self::write_samples(writer, waveform)
    }

    pub fn write_to<W: Write + Seek>(writer: W, waveform: &Waveform) -> Result<()> {
        let writer = WavWriter::new(writer, Self::spec(waveform.sample_rate()))?;
        Self::write_samples(writer, waveform)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Waveform> {
        Self::read_samples(WavReader::open(path)?)
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Waveform> {
        Self::read_samples(WavReader::new(reader)?)
    }

    fn write_samples<W: Write + Seek>(mut writer: WavWriter<W>, waveform: &Waveform) -> Result<()> {
        waveform
            .samples()
            .iter()
            .try_for_each(|&sample| writer.write_sample(sample))?;

        writer.finalize()?;
        Ok(())
    }

    fn read_samples<R: Read>(mut reader: WavReader<R>) -> Result<Waveform> {
        let spec = reader.spec();
        if spec.channels != CHANNELS
            || spec.bits_per_sample != BITS_PER_SAMPLE
            || spec.sample_format != SampleFormat::Int
        {
            return Err(IoFailure::UnsupportedFormat {
                channels: spec.channels,
                bits_per_sample: spec.bits_per_sample,
            }
            .into());
        }

        let samples = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Waveform::new(samples, spec.sample_rate))
    }
}
