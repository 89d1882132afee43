use crossbeam_channel::bounded;
use jack::{AudioOut, Client, ClientOptions};
use jack::{ClosureProcessHandler, Control, ProcessScope};

use crate::error::{IoFailure, Result};
use crate::modem::Waveform;

const CLIENT_NAME_PREFIX: &str = "AprsAfsk";
const OUTPUT_PORT_NAME: &str = "output";
const PLAYBACK_PORT_NAME: &str = "system:playback_1";

/// Blocking playback through a running JACK server.
pub struct Player {
    client: Client,
}

impl Player {
    pub fn new() -> Result<Self> {
        let client_name = format!("{}-{}", CLIENT_NAME_PREFIX, std::process::id());
        let (client, _status) = Client::new(&client_name, ClientOptions::NO_START_SERVER)?;

        Ok(Self { client })
    }

    pub fn sample_rate(&self) -> usize {
        self.client.sample_rate()
    }

    /// Returns once the last sample has been handed to the device.
    pub fn play(self, waveform: &Waveform) -> Result<()> {
        let device_rate = self.client.sample_rate();
        if device_rate != waveform.sample_rate() as usize {
            warn!(
                "Device runs at {} Hz, resampling from {} Hz",
                device_rate,
                waveform.sample_rate()
            );
        }

        let samples = Self::prepare(waveform, device_rate);
        let total_samples = samples.len();

        let mut output = self
            .client
            .register_port(OUTPUT_PORT_NAME, AudioOut::default())?;
        let output_name = output.name()?;

        let (done_sender, done_receiver) = bounded(1);
        let mut position = 0usize;

        let playback_callback = move |_: &Client, ps: &ProcessScope| -> Control {
            let buffer = output.as_mut_slice(ps);
            let period = buffer.len();

            buffer.iter_mut().enumerate().for_each(|(index, sample)| {
                *sample = samples.get(position + index).copied().unwrap_or(0.0);
            });
            position += period;

            // One trailing period of silence so the tail reaches the device.
            if position >= total_samples + period {
                let _ = done_sender.try_send(());
            }
            Control::Continue
        };

        let active_client = self
            .client
            .activate_async((), ClosureProcessHandler::new(playback_callback))?;

        if active_client
            .as_client()
            .port_by_name(PLAYBACK_PORT_NAME)
            .is_none()
        {
            return Err(IoFailure::NoPlaybackPort.into());
        }
        active_client
            .as_client()
            .connect_ports_by_name(&output_name, PLAYBACK_PORT_NAME)?;

        info!("Playing {} samples at {} Hz", total_samples, device_rate);
        if done_receiver.recv().is_err() {
            warn!("Audio server stopped before playback completed");
        }

        active_client.deactivate()?;
        Ok(())
    }

    /// Scales to [-1, 1] and maps onto the device rate by nearest index.
    pub fn prepare(waveform: &Waveform, device_rate: usize) -> Vec<f32> {
        let amplitude = i16::MAX as f32;
        let source_rate = waveform.sample_rate() as usize;
        let samples = waveform.samples();

        if source_rate == device_rate || source_rate == 0 {
            return samples
                .iter()
                .map(|&sample| sample as f32 / amplitude)
                .collect();
        }

        let output_length = samples.len() * device_rate / source_rate;
        (0..output_length)
            .map(|index| {
                let source_index = (index * source_rate / device_rate).min(samples.len() - 1);
                samples[source_index] as f32 / amplitude
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_same_rate() {
        let waveform = Waveform::new(vec![0, i16::MAX, -i16::MAX, 16384], 44100);
        let prepared = Player::prepare(&waveform, 44100);

        assert_eq!(prepared.len(), 4);
        assert_eq!(prepared[0], 0.0);
        assert_eq!(prepared[1], 1.0);
        assert_eq!(prepared[2], -1.0);
        assert!((prepared[3] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_prepare_keeps_duration() {
        let samples = (0..44100).map(|index| (index % 100) as i16).collect();
        let waveform = Waveform::new(samples, 44100);

        let prepared = Player::prepare(&waveform, 48000);
        assert_eq!(prepared.len(), 48000);

        let prepared = Player::prepare(&waveform, 22050);
        assert_eq!(prepared.len(), 22050);
        assert_eq!(prepared[1], 2.0 / i16::MAX as f32);
    }

    #[test]
    #[ignore]
    fn test_play_tone() {
        let samples = (0..48000)
            .map(|index| ((index as f64 * 0.1).sin() * 8000.0) as i16)
            .collect();
        let player = Player::new().unwrap();
        player.play(&Waveform::new(samples, 48000)).unwrap();
    }
}
