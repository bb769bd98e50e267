use std::fs;

use stim_runner::config::{BoardConfig, ExperimentConfig, OutputConfig, TimingConfig};
use stim_runner::dataset::reconstructor::{events_path, signal_path};
use stim_runner::display::DisplaySurface;
use stim_runner::error::Result;
use stim_runner::experiment;
use stim_runner::sequencer::StimulusDef;

/// Headless display: answers the participant dialog, skips the welcome
/// screen, and presses the abort key at the first poll after a stimulus.
struct HeadlessDisplay {
    participant: Option<String>,
    abort_at_poll: usize,
    polls: usize,
}

impl HeadlessDisplay {
    fn new(participant: Option<&str>, abort_at_poll: usize) -> Self {
        HeadlessDisplay {
            participant: participant.map(|p| p.to_string()),
            abort_at_poll,
            polls: 0,
        }
    }
}

impl DisplaySurface for HeadlessDisplay {
    fn show(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn keys_pressed(&mut self) -> Result<Vec<String>> {
        self.polls += 1;
        if self.polls >= self.abort_at_poll {
            Ok(vec!["escape".to_string()])
        } else {
            Ok(Vec::new())
        }
    }

    fn wait_for_key(&mut self) -> Result<()> {
        Ok(())
    }

    fn prompt(&mut self, _title: &str) -> Result<Option<String>> {
        Ok(self.participant.clone())
    }
}

fn fast_config(data_dir: &str) -> ExperimentConfig {
    ExperimentConfig {
        board: BoardConfig {
            board_id: stim_runner::acquisition::board::SYNTHETIC_BOARD_ID,
            serial_port: None,
            ip_address: None,
            enable_debug_logging: false,
        },
        timing: TimingConfig {
            rest_s: 0.001,
            ready_s: 0.001,
            stimulus_s: 0.001,
        },
        stimuli: vec![StimulusDef::new("left", 1), StimulusDef::new("right", 2)],
        output: OutputConfig {
            data_dir: data_dir.to_string(),
            abort_key: "escape".to_string(),
        },
    }
}

#[test]
fn cancelled_run_still_persists_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let data_dir = data_dir.to_str().unwrap();

    let config = fast_config(data_dir);
    let mut display = HeadlessDisplay::new(Some("p01"), 1);
    experiment::run(&config, &mut display).unwrap();

    let events = fs::read_to_string(events_path(data_dir, "p01")).unwrap();
    let lines: Vec<&str> = events.lines().collect();
    assert_eq!(lines[0], "participant_id,stimulus,marker,time");
    // abort observed right after the first stimulus phase
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("p01,"));

    let signal = fs::read_to_string(signal_path(data_dir, "p01")).unwrap();
    let header = signal.lines().next().unwrap();
    // 32-row synthetic layout, labeled by the resolver
    assert_eq!(header.split(',').count(), 32);
    assert!(header.contains("Timestamp"));
    assert!(header.contains("Marker"));
}

#[test]
fn cancelled_participant_dialog_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let data_dir_str = data_dir.to_str().unwrap();

    let config = fast_config(data_dir_str);
    let mut display = HeadlessDisplay::new(None, 1);
    experiment::run(&config, &mut display).unwrap();

    assert!(!data_dir.exists());
}

#[test]
fn unknown_board_fails_before_any_files_exist() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let data_dir_str = data_dir.to_str().unwrap();

    let mut config = fast_config(data_dir_str);
    config.board.board_id = 77;
    let mut display = HeadlessDisplay::new(Some("p01"), 1);
    let err = experiment::run(&config, &mut display).unwrap_err();

    assert!(matches!(
        err,
        stim_runner::ExperimentError::Connection(_)
    ));
    assert!(!data_dir.exists());
}
