pub mod board;
pub mod descriptor;
pub mod session;
pub mod synthetic;

/// Channel-major capture buffer: one inner vector per board row, one value
/// per sample. Row order matches the board's channel layout; column order is
/// temporal.
pub type RawSignalMatrix = Vec<Vec<f64>>;
