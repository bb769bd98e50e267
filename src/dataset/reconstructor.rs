use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::resolver::resolve_channel_names;
use crate::acquisition::descriptor::ChannelDescriptor;
use crate::acquisition::RawSignalMatrix;
use crate::error::{ExperimentError, Result};
use crate::sequencer::event_log::EventLog;

pub fn signal_path(data_dir: &str, participant_id: &str) -> PathBuf {
    Path::new(data_dir).join(format!("eeg_data_{}.csv", participant_id))
}

pub fn events_path(data_dir: &str, participant_id: &str) -> PathBuf {
    Path::new(data_dir).join(format!("events_data_{}.csv", participant_id))
}

// DATASET RECONSTRUCTOR COMPONENT ---------------------------------------------

/// Writes the drained channel-major matrix as a sample-major CSV table:
/// resolved channel names as the header, one row per sample. The timestamp
/// column is rebased to a zero origin by position before any renaming. An
/// empty matrix still produces the header row.
pub fn write_signal_table<P: AsRef<Path>>(
    path: P,
    matrix: &RawSignalMatrix,
    descriptor: &ChannelDescriptor,
) -> Result<()> {
    let names = resolve_channel_names(descriptor);

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&names)?;

    let num_samples = matrix.first().map_or(0, |row| row.len());
    let t0 = matrix
        .get(descriptor.timestamp_channel)
        .and_then(|row| row.first())
        .copied()
        .unwrap_or(0.0);

    for sample in 0..num_samples {
        let mut record = Vec::with_capacity(matrix.len());
        for (channel, row) in matrix.iter().enumerate() {
            let mut value = row.get(sample).copied().ok_or_else(|| {
                ExperimentError::State(format!(
                    "channel {} ends at sample {}, drained matrix is not rectangular",
                    channel,
                    row.len()
                ))
            })?;
            if channel == descriptor.timestamp_channel {
                value -= t0;
            }
            record.push(value.to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the event log as a CSV table, one row per stimulus presentation.
/// An empty log still produces the header row.
pub fn write_event_table<P: AsRef<Path>>(path: P, log: &EventLog) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["participant_id", "stimulus", "marker", "time"])?;

    for record in log.records() {
        let marker = record.marker.to_string();
        let time = record.time.to_string();
        writer.write_record([
            record.participant_id.as_str(),
            record.stimulus.as_str(),
            marker.as_str(),
            time.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Persists both session artifacts under `data_dir`, keyed by participant.
pub fn persist_session(
    data_dir: &str,
    participant_id: &str,
    matrix: &RawSignalMatrix,
    descriptor: &ChannelDescriptor,
    log: &EventLog,
) -> Result<()> {
    fs::create_dir_all(data_dir)?;

    let signal = signal_path(data_dir, participant_id);
    write_signal_table(&signal, matrix, descriptor)?;
    info!("signal table written to {}", signal.display());

    let events = events_path(data_dir, participant_id);
    write_event_table(&events, log)?;
    info!("event table written to {}", events.display());

    Ok(())
}
