//! Fixed console text printed during bring-up.

use super::ports::ReportSink;

/// ANSI: clear screen, cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[;H";

const RULE: &str = "-----------------------------------------------------------";
const TITLE: &str = "ESP32-S3: ADC scan using HAL";

/// Clear the terminal and print the title block and command help.
pub fn announce_startup(out: &mut impl ReportSink) {
    out.write_str(CLEAR_SCREEN);
    out.write_line(RULE);
    out.write_line(TITLE);
    out.write_line(RULE);
    out.write_line("");
    out.write_line("Press '1' to pause/resume sampling.");
    out.write_line("Press '2' then a digit to set the scan delay in seconds.");
    out.write_line("");
}

/// Printed once the ADC channel is configured.
pub fn announce_channel_ready(out: &mut impl ReportSink, channel: u8) {
    out.write_line("ADC is configured in single channel configuration");
    out.write_line("");
    let mut line: heapless::String<64> = heapless::String::new();
    let _ = core::fmt::write(
        &mut line,
        format_args!("Provide input voltage at the channel {} input pin.", channel),
    );
    out.write_line(&line);
    out.write_line("");
}
