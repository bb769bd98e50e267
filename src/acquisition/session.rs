use log::{info, warn};

use super::board::{self, BoardParams, BoardSource};
use super::descriptor::ChannelDescriptor;
use super::RawSignalMatrix;
use crate::error::{ExperimentError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Opened,
    Streaming,
    Stopped,
    Closed,
}

// ACQUISITION SESSION COMPONENT -----------------------------------------------

/// Owns one board handle for the lifetime of a recording.
///
/// Transitions are one-directional: `Opened → Streaming → Stopped → Closed`.
/// There is no restart from `Stopped`; a new session means a new `open`.
/// The handle is also released on drop, so an early unwind cannot leave the
/// board claimed.
pub struct AcquisitionSession {
    source: Box<dyn BoardSource>,
    state: SessionState,
}

impl AcquisitionSession {
    /// Connects to the board and creates the session handle. No session state
    /// exists if this fails.
    pub fn open(board_id: i32, params: &BoardParams) -> Result<Self> {
        let source = board::open(board_id, params)?;
        info!("acquisition session opened for board id {}", board_id);
        Ok(AcquisitionSession {
            source,
            state: SessionState::Opened,
        })
    }

    /// Wraps an already-constructed source. Used when the caller builds the
    /// backend itself.
    pub fn with_source(source: Box<dyn BoardSource>) -> Self {
        AcquisitionSession {
            source,
            state: SessionState::Opened,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn descriptor(&self) -> Result<&ChannelDescriptor> {
        if self.state == SessionState::Closed {
            return Err(ExperimentError::State(
                "descriptor queried on closed session".to_string(),
            ));
        }
        Ok(self.source.descriptor())
    }

    /// Begins continuous background sampling. Samples accumulate in the
    /// source's buffer at its native rate until `stop`.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            SessionState::Opened => {
                self.source.start_stream()?;
                self.state = SessionState::Streaming;
                info!("stream started");
                Ok(())
            }
            SessionState::Streaming => Err(ExperimentError::Stream(
                "stream already started".to_string(),
            )),
            _ => Err(ExperimentError::State(format!(
                "start called in {:?}",
                self.state
            ))),
        }
    }

    /// Requests that the next captured sample carry `code` in its marker
    /// slot. Fire-and-forget: tagged on arrival, no earlier than the request.
    /// Requests issued faster than the sample period overwrite each other.
    pub fn inject_marker(&mut self, code: i32) -> Result<()> {
        if code == 0 {
            return Err(ExperimentError::State(
                "marker code 0 is reserved for no-marker".to_string(),
            ));
        }
        match self.state {
            SessionState::Streaming => self.source.insert_marker(code),
            _ => Err(ExperimentError::State(format!(
                "inject_marker called in {:?}",
                self.state
            ))),
        }
    }

    pub fn stop(&mut self) -> Result<()> {
        match self.state {
            SessionState::Streaming => {
                self.source.stop_stream()?;
                self.state = SessionState::Stopped;
                info!("stream stopped");
                Ok(())
            }
            _ => Err(ExperimentError::State(format!(
                "stop called in {:?}",
                self.state
            ))),
        }
    }

    /// Retrieves and clears everything buffered since the stream started.
    /// Calling while still streaming yields a time-valid prefix.
    pub fn drain(&mut self) -> Result<RawSignalMatrix> {
        match self.state {
            SessionState::Streaming | SessionState::Stopped => {
                Ok(self.source.get_board_data())
            }
            _ => Err(ExperimentError::State(format!(
                "drain called in {:?}",
                self.state
            ))),
        }
    }

    /// Releases the board handle. Every later call on this session fails.
    pub fn close(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Err(ExperimentError::State(
                "session already closed".to_string(),
            ));
        }
        if self.state == SessionState::Streaming {
            if let Err(e) = self.source.stop_stream() {
                warn!("stop during close failed: {}", e);
            }
        }
        let released = self.source.release_session();
        self.state = SessionState::Closed;
        released
    }
}

impl Drop for AcquisitionSession {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            if let Err(e) = self.close() {
                warn!("release on drop failed: {}", e);
            }
        }
    }
}
