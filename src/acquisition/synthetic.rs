use std::f64::consts::PI;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::{BoardParams, BoardSource, SYNTHETIC_BOARD_ID};
use super::descriptor::ChannelDescriptor;
use super::RawSignalMatrix;
use crate::error::{ExperimentError, Result};

const SAMPLING_RATE: f64 = 250.0;
const NUM_ROWS: usize = 32;
const EEG_TONE_HZ: f64 = 10.0;

// SYNTHETIC BOARD COMPONENT ---------------------------------------------------

/// Simulated acquisition source. Rows are synthesized on demand from the time
/// elapsed since `start_stream`, so the buffer always reflects what a
/// rate-driven producer would have captured by now. A requested marker is
/// stamped into the first row synthesized after the request.
pub struct SyntheticBoard {
    descriptor: ChannelDescriptor,
    buffer: RawSignalMatrix,
    streaming: bool,
    started_at: Option<Instant>,
    epoch: f64,
    produced: usize,
    pending_marker: f64,
    rng: StdRng,
}

impl SyntheticBoard {
    pub fn open(_params: &BoardParams) -> Result<Self> {
        let eeg_names = [
            "Fz", "C3", "Cz", "C4", "Pz", "PO7", "Oz", "PO8", "F5", "F7", "F3", "F1", "F2",
            "F4", "F6", "F8",
        ];
        let descriptor = ChannelDescriptor {
            num_rows: NUM_ROWS,
            eeg_channels: (1..=16).collect(),
            eeg_names: eeg_names.iter().map(|s| s.to_string()).collect(),
            accel_channels: vec![17, 18, 19],
            gyro_channels: vec![20, 21, 22],
            timestamp_channel: 30,
            marker_channel: 31,
        };
        Ok(SyntheticBoard {
            descriptor,
            buffer: vec![Vec::new(); NUM_ROWS],
            streaming: false,
            started_at: None,
            epoch: 0.0,
            produced: 0,
            pending_marker: 0.0,
            rng: StdRng::from_entropy(),
        })
    }

    /// Synthesizes every row the fixed-rate producer owes us since start.
    fn synthesize_pending(&mut self) {
        let target = match self.started_at {
            Some(started) => (started.elapsed().as_secs_f64() * SAMPLING_RATE) as usize,
            None => return,
        };
        self.synthesize(target.saturating_sub(self.produced));
    }

    fn synthesize(&mut self, count: usize) {
        for _ in 0..count {
            let t = self.produced as f64 / SAMPLING_RATE;
            for row in 0..NUM_ROWS {
                let value = if row == 0 {
                    // packet counter, wraps like the hardware's
                    (self.produced % 256) as f64
                } else if let Some(pos) =
                    self.descriptor.eeg_channels.iter().position(|&c| c == row)
                {
                    let amplitude = (pos + 1) as f64;
                    amplitude * (2.0 * PI * EEG_TONE_HZ * t).sin()
                        + self.rng.gen_range(-0.5..0.5)
                } else if self.descriptor.accel_channels.contains(&row)
                    || self.descriptor.gyro_channels.contains(&row)
                {
                    self.rng.gen_range(-0.1..0.1)
                } else if row == self.descriptor.timestamp_channel {
                    self.epoch + t
                } else if row == self.descriptor.marker_channel {
                    let marker = self.pending_marker;
                    self.pending_marker = 0.0;
                    marker
                } else {
                    0.0
                };
                self.buffer[row].push(value);
            }
            self.produced += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn force_produce(&mut self, count: usize) {
        self.synthesize(count);
    }
}

impl BoardSource for SyntheticBoard {
    fn board_id(&self) -> i32 {
        SYNTHETIC_BOARD_ID
    }

    fn start_stream(&mut self) -> Result<()> {
        if self.streaming {
            return Err(ExperimentError::Stream(
                "synthetic stream already running".to_string(),
            ));
        }
        self.epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        self.started_at = Some(Instant::now());
        self.streaming = true;
        Ok(())
    }

    fn insert_marker(&mut self, code: i32) -> Result<()> {
        if !self.streaming {
            return Err(ExperimentError::Stream(
                "cannot insert marker, synthetic stream not running".to_string(),
            ));
        }
        // Rows owed up to this instant keep any previously pending code; the
        // new code lands on the next synthesized row. Two requests within one
        // sample period overwrite.
        self.synthesize_pending();
        self.pending_marker = code as f64;
        Ok(())
    }

    fn stop_stream(&mut self) -> Result<()> {
        if !self.streaming {
            return Err(ExperimentError::Stream(
                "synthetic stream not running".to_string(),
            ));
        }
        self.synthesize_pending();
        self.streaming = false;
        self.started_at = None;
        Ok(())
    }

    fn get_board_data(&mut self) -> RawSignalMatrix {
        if self.streaming {
            self.synthesize_pending();
        }
        std::mem::replace(&mut self.buffer, vec![Vec::new(); NUM_ROWS])
    }

    fn descriptor(&self) -> &ChannelDescriptor {
        &self.descriptor
    }

    fn release_session(&mut self) -> Result<()> {
        self.buffer = vec![Vec::new(); NUM_ROWS];
        self.streaming = false;
        self.started_at = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_started() -> SyntheticBoard {
        let mut board = SyntheticBoard::open(&BoardParams::default()).unwrap();
        board.start_stream().unwrap();
        board
    }

    #[test]
    fn descriptor_roles_are_disjoint_and_named() {
        let board = SyntheticBoard::open(&BoardParams::default()).unwrap();
        let d = board.descriptor();
        assert_eq!(d.eeg_names.len(), d.eeg_channels.len());

        let mut seen = vec![0u8; d.num_rows];
        for &c in d.eeg_channels.iter().chain(&d.accel_channels).chain(&d.gyro_channels) {
            seen[c] += 1;
        }
        seen[d.timestamp_channel] += 1;
        seen[d.marker_channel] += 1;
        assert!(seen.iter().all(|&n| n <= 1), "channel roles overlap");
    }

    #[test]
    fn marker_is_stamped_on_next_synthesized_row() {
        let mut board = open_started();
        board.force_produce(3);
        board.insert_marker(7).unwrap();
        board.force_produce(4);
        board.stop_stream().unwrap();

        let data = board.get_board_data();
        let markers = &data[board.descriptor.marker_channel];
        let stamped: Vec<usize> = markers
            .iter()
            .enumerate()
            .filter(|(_, &m)| m == 7.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(stamped.len(), 1);
        assert!(stamped[0] >= 3);
    }

    #[test]
    fn later_injection_overwrites_pending_marker() {
        let mut board = open_started();
        board.insert_marker(5).unwrap();
        board.insert_marker(9).unwrap();
        board.force_produce(2);
        board.stop_stream().unwrap();

        let data = board.get_board_data();
        let markers = &data[board.descriptor.marker_channel];
        assert_eq!(markers.iter().filter(|&&m| m == 9.0).count(), 1);
        // a row may have slipped in between the two requests, never more
        assert!(markers.iter().filter(|&&m| m == 5.0).count() <= 1);
    }

    #[test]
    fn timestamps_increase_at_the_sample_period() {
        let mut board = open_started();
        board.force_produce(10);
        board.stop_stream().unwrap();

        let data = board.get_board_data();
        let ts = &data[board.descriptor.timestamp_channel];
        assert!(ts.len() >= 10);
        // epoch-based values sit near 1e9, where f64 spacing is ~1e-7
        for pair in ts.windows(2) {
            assert!((pair[1] - pair[0] - 1.0 / SAMPLING_RATE).abs() < 1e-5);
        }
    }

    #[test]
    fn drain_while_streaming_yields_a_time_valid_prefix() {
        let mut board = open_started();
        board.force_produce(5);

        let first = board.get_board_data();
        let ts_first = &first[board.descriptor.timestamp_channel];
        assert!(ts_first.len() >= 5);
        assert!(ts_first.windows(2).all(|pair| pair[1] > pair[0]));

        // the stream keeps running; later rows continue after the prefix
        board.force_produce(5);
        board.stop_stream().unwrap();
        let rest = board.get_board_data();
        let ts_rest = &rest[board.descriptor.timestamp_channel];
        assert!(ts_rest.len() >= 5);
        assert!(ts_rest[0] > ts_first[ts_first.len() - 1]);
        assert!(ts_rest.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn drain_clears_the_buffer() {
        let mut board = open_started();
        board.force_produce(5);
        board.stop_stream().unwrap();

        let first = board.get_board_data();
        assert!(first[0].len() >= 5);
        let second = board.get_board_data();
        assert!(second.iter().all(|row| row.is_empty()));
    }
}
