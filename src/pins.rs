//! GPIO / peripheral assignments for the ESP32-S3 evaluation board.
//!
//! Single source of truth — drivers reference this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Analog input
// ---------------------------------------------------------------------------

/// Channel 0 input pin.  ADC1 channel 0 is bonded to GPIO 1 on the S3.
pub const ADC_CH0_GPIO: i32 = 1;
/// ADC1 channel index behind [`ADC_CH0_GPIO`].
pub const ADC_CH0_INDEX: u32 = 0;

// ---------------------------------------------------------------------------
// Debug console (UART0, routed to the USB-UART bridge)
// ---------------------------------------------------------------------------

pub const CONSOLE_UART_PORT: i32 = 0;
pub const CONSOLE_TX_GPIO: i32 = 43;
pub const CONSOLE_RX_GPIO: i32 = 44;
/// RX ring buffer size handed to the UART driver.
pub const CONSOLE_RX_BUF_LEN: i32 = 256;
