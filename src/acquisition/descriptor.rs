/// Static channel layout reported by a board for one session configuration.
///
/// Each column index in `0..num_rows` belongs to exactly one role (EEG,
/// accelerometer, gyroscope, timestamp, marker) or to no role at all.
/// `eeg_names` runs parallel to `eeg_channels`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDescriptor {
    pub num_rows: usize,
    pub eeg_channels: Vec<usize>,
    pub eeg_names: Vec<String>,
    pub accel_channels: Vec<usize>,
    pub gyro_channels: Vec<usize>,
    pub timestamp_channel: usize,
    pub marker_channel: usize,
}
