use serde::{Deserialize, Serialize};

use super::descriptor::ChannelDescriptor;
use super::synthetic::SyntheticBoard;
use super::RawSignalMatrix;
use crate::error::{ExperimentError, Result};

pub const SYNTHETIC_BOARD_ID: i32 = -1;

/// Connection parameters passed to a board at open time. Which fields matter
/// depends on the backend; the synthetic board ignores all of them.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BoardParams {
    pub serial_port: Option<String>,
    pub ip_address: Option<String>,
}

// BOARD SOURCE COMPONENT ------------------------------------------------------

/// Capability interface over the sampling hardware (or a simulation of it).
///
/// Once `start_stream` returns, the source produces sample rows at its native
/// rate into an internal buffer until `stop_stream`. `insert_marker` tags the
/// next captured sample with the given code: no earlier than the request, but
/// with no exact-sample alignment guarantee. Injections faster than the
/// sample period overwrite each other.
pub trait BoardSource: Send {
    fn board_id(&self) -> i32;

    fn start_stream(&mut self) -> Result<()>;

    fn insert_marker(&mut self, code: i32) -> Result<()>;

    fn stop_stream(&mut self) -> Result<()>;

    /// Retrieves and clears everything buffered since the stream started.
    fn get_board_data(&mut self) -> RawSignalMatrix;

    fn descriptor(&self) -> &ChannelDescriptor;

    fn release_session(&mut self) -> Result<()>;
}

/// Opens a backend for the given board id. Only the synthetic board is built
/// in; hardware ids fail at connect time rather than deep in the session.
pub fn open(board_id: i32, params: &BoardParams) -> Result<Box<dyn BoardSource>> {
    match board_id {
        SYNTHETIC_BOARD_ID => Ok(Box::new(SyntheticBoard::open(params)?)),
        other => Err(ExperimentError::Connection(format!(
            "no backend available for board id {}",
            other
        ))),
    }
}
