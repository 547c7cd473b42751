//! Console commands understood by the sampling loop.
//!
//! Each command is a single ASCII byte typed on the debug console.  The
//! set-delay command takes one more byte, the new delay in seconds.

use super::ports::CommandSource;

/// Pause or resume sampling.
pub const CMD_TOGGLE_SAMPLING: u8 = b'1';
/// Set the scan delay; followed by one digit byte.
pub const CMD_SET_SCAN_DELAY: u8 = b'2';

/// Commands that change controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleSampling,
    /// Carries the raw byte that followed the command.
    SetScanDelay(u8),
}

/// Outcome of decoding one received byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Command(Command),
    /// `'2'` arrived but no argument byte was waiting.
    MissingArgument,
    /// Not a command byte; dropped.
    Ignored(u8),
}

/// Decode `first`, pulling the argument byte from `input` when the command
/// needs one.  The argument read is non-blocking like every other read.
pub fn decode(first: u8, input: &mut impl CommandSource) -> Decoded {
    match first {
        CMD_TOGGLE_SAMPLING => Decoded::Command(Command::ToggleSampling),
        CMD_SET_SCAN_DELAY => match input.try_read_byte() {
            Some(arg) => Decoded::Command(Command::SetScanDelay(arg)),
            None => Decoded::MissingArgument,
        },
        other => Decoded::Ignored(other),
    }
}
