//! Peripheral drivers and one-shot bring-up.

pub mod adc;
pub mod hw_init;
pub mod uart;
pub mod watchdog;
