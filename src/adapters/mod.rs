//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                   | Connects to           |
//! |-------------|------------------------------|-----------------------|
//! | `console`   | CommandSource, ReportSink    | UART0 debug console   |
//! | `delay`     | embedded_hal DelayNs         | FreeRTOS / std sleep  |
//! | `hardware`  | VoltageSensor                | ADC1 oneshot channel  |
//! | `log_sink`  | EventSink                    | `log` output          |

pub mod console;
pub mod delay;
pub mod hardware;
pub mod log_sink;
