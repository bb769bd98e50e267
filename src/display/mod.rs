pub mod console;

use crate::error::Result;

/// Presentation and input surface for the experiment. Implementations are
/// thin: draw a text screen, poll or wait for keys, ask for a line of input.
/// The sequencer drives all timing itself.
pub trait DisplaySurface {
    /// Draws `text` and flips it onto the screen.
    fn show(&mut self, text: &str) -> Result<()>;

    /// Keys pressed since the last call. Non-blocking.
    fn keys_pressed(&mut self) -> Result<Vec<String>>;

    /// Blocks until any key is pressed.
    fn wait_for_key(&mut self) -> Result<()>;

    /// Modal text-input dialog. `None` means the operator cancelled.
    fn prompt(&mut self, title: &str) -> Result<Option<String>>;
}
