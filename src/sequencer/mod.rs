pub mod event_log;

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::acquisition::session::AcquisitionSession;
use crate::display::DisplaySurface;
use crate::error::Result;
use self::event_log::{EventLog, EventRecord};

/// One stimulus label and the non-zero marker code stamped into the stream
/// when it comes up. Code 0 is reserved for no-marker.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StimulusDef {
    pub label: String,
    pub marker: i32,
}

impl StimulusDef {
    pub fn new(label: &str, marker: i32) -> Self {
        StimulusDef {
            label: label.to_string(),
            marker,
        }
    }
}

pub struct SequencerConfig {
    pub participant_id: String,
    pub rest_duration: Duration,
    pub ready_duration: Duration,
    pub stimulus_duration: Duration,
    pub abort_key: String,
    pub enable_debug_logging: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum BlockOutcome {
    Completed,
    Cancelled,
}

// SEQUENCER COMPONENT ---------------------------------------------------------

/// Drives the rest/ready/stimulus control loop, block by block, until the
/// abort key is observed.
///
/// Onset times come from the software experiment clock at the instant the
/// stimulus is shown; marker delivery is hardware-buffered and lands on the
/// next captured sample. The two are correlated after the session by matching
/// event-log times against the marker column of the drained matrix, never
/// assumed bit-exact.
pub struct Sequencer<'a, D: DisplaySurface> {
    config: SequencerConfig,
    stimuli: Vec<StimulusDef>,
    display: &'a mut D,
    clock: Instant,
}

impl<'a, D: DisplaySurface> Sequencer<'a, D> {
    /// Creates the sequencer and starts the experiment clock.
    pub fn new(config: SequencerConfig, stimuli: Vec<StimulusDef>, display: &'a mut D) -> Self {
        Sequencer {
            config,
            stimuli,
            display,
            clock: Instant::now(),
        }
    }

    /// Runs blocks until cancelled. Every permutation of the stimulus set is
    /// equally likely within a block.
    pub fn run(&mut self, session: &mut AcquisitionSession, log: &mut EventLog) -> Result<()> {
        loop {
            match self.run_block(session, log)? {
                BlockOutcome::Completed => continue,
                BlockOutcome::Cancelled => {
                    info!("experiment terminated by user");
                    return Ok(());
                }
            }
        }
    }

    /// One pass through the full stimulus set in shuffled order. Cancellation
    /// is only observed at stimulus-phase boundaries, so an abort during rest
    /// or ready takes effect after the current stimulus phase.
    pub fn run_block(
        &mut self,
        session: &mut AcquisitionSession,
        log: &mut EventLog,
    ) -> Result<BlockOutcome> {
        let mut order = self.stimuli.clone();
        order.shuffle(&mut rand::thread_rng());

        for stimulus in &order {
            // rest phase
            self.display.show("Rest")?;
            thread::sleep(self.config.rest_duration);

            // ready phase
            self.display.show("Ready")?;
            thread::sleep(self.config.ready_duration);

            // stimulus phase: capture onset, show, stamp, record, hold
            let onset = self.clock.elapsed().as_secs_f64();
            self.display.show(&stimulus.label)?;
            session.inject_marker(stimulus.marker)?;
            log.append(EventRecord {
                participant_id: self.config.participant_id.clone(),
                stimulus: stimulus.label.clone(),
                marker: stimulus.marker,
                time: onset,
            });
            debug!(
                "stimulus '{}' marker {} at {:.4}s",
                stimulus.label, stimulus.marker, onset
            );
            if self.config.enable_debug_logging {
                let line = format!(
                    "participant: {}, stimulus: {}, marker: {}, onset: {:.6}",
                    self.config.participant_id, stimulus.label, stimulus.marker, onset
                );
                if let Err(e) = crate::utils::log::log_to_file("events.log", &line) {
                    debug!("debug trail write failed: {}", e);
                }
            }
            thread::sleep(self.config.stimulus_duration);

            if self
                .display
                .keys_pressed()?
                .iter()
                .any(|k| k == &self.config.abort_key)
            {
                return Ok(BlockOutcome::Cancelled);
            }
        }

        Ok(BlockOutcome::Completed)
    }
}
