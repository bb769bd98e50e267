use std::time::Duration;

use log::{info, warn};

use crate::acquisition::board::BoardParams;
use crate::acquisition::descriptor::ChannelDescriptor;
use crate::acquisition::session::AcquisitionSession;
use crate::config::ExperimentConfig;
use crate::dataset::reconstructor;
use crate::display::DisplaySurface;
use crate::error::Result;
use crate::sequencer::event_log::EventLog;
use crate::sequencer::{Sequencer, SequencerConfig};

const WELCOME_TEXT: &str = "Welcome to our sensory-motor experiment.\n\n\
You will be prompted with a stimulus and expected to\n\
imagine arm movements with respect to the stimulus.\n\n\
Press any key to begin.";

/// Runs one full experiment: participant dialog, welcome screen, acquisition
/// session, sequencer loop, then persistence.
///
/// Once the session exists, the stop → drain → release → persist sequence
/// runs on every exit path, normal, cancelled or erroring, so an abort never
/// loses the data captured so far. Failures inside that sequence are logged
/// and swallowed; each remaining step still runs.
pub fn run<D: DisplaySurface>(config: &ExperimentConfig, display: &mut D) -> Result<()> {
    let participant_id = match display.prompt("Participant ID")? {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => {
            info!("cancelled at participant dialog, nothing recorded");
            return Ok(());
        }
    };

    display.show(WELCOME_TEXT)?;
    display.wait_for_key()?;

    let params = BoardParams {
        serial_port: config.board.serial_port.clone(),
        ip_address: config.board.ip_address.clone(),
    };
    // connection failures abort here, before any session state or files exist
    let mut session = AcquisitionSession::open(config.board.board_id, &params)?;
    let descriptor = session.descriptor()?.clone();
    let mut event_log = EventLog::new();

    let run_result = stream_and_sequence(config, display, &mut session, &participant_id, &mut event_log);

    finalize(
        &mut session,
        &descriptor,
        &event_log,
        &config.output.data_dir,
        &participant_id,
    );

    run_result
}

fn stream_and_sequence<D: DisplaySurface>(
    config: &ExperimentConfig,
    display: &mut D,
    session: &mut AcquisitionSession,
    participant_id: &str,
    event_log: &mut EventLog,
) -> Result<()> {
    session.start()?;

    let sequencer_config = SequencerConfig {
        participant_id: participant_id.to_string(),
        rest_duration: Duration::from_secs_f64(config.timing.rest_s),
        ready_duration: Duration::from_secs_f64(config.timing.ready_s),
        stimulus_duration: Duration::from_secs_f64(config.timing.stimulus_s),
        abort_key: config.output.abort_key.clone(),
        enable_debug_logging: config.board.enable_debug_logging,
    };
    let mut sequencer = Sequencer::new(sequencer_config, config.stimuli.clone(), display);
    sequencer.run(session, event_log)
}

/// Best-effort cleanup and persistence. Every step runs even if an earlier
/// one failed, to salvage whatever was captured.
fn finalize(
    session: &mut AcquisitionSession,
    descriptor: &ChannelDescriptor,
    event_log: &EventLog,
    data_dir: &str,
    participant_id: &str,
) {
    if let Err(e) = session.stop() {
        warn!("stop during cleanup failed: {}", e);
    }

    let matrix = match session.drain() {
        Ok(matrix) => matrix,
        Err(e) => {
            warn!("drain during cleanup failed: {}", e);
            Vec::new()
        }
    };

    if let Err(e) = session.close() {
        warn!("release during cleanup failed: {}", e);
    }

    match reconstructor::persist_session(data_dir, participant_id, &matrix, descriptor, event_log)
    {
        Ok(()) => {
            let samples = matrix.first().map_or(0, |row| row.len());
            info!(
                "session persisted: {} events, {} samples, {} channels",
                event_log.len(),
                samples,
                descriptor.num_rows
            );
            info!("board description: {:?}", descriptor);
        }
        Err(e) => warn!("persisting session data failed: {}", e),
    }
}
