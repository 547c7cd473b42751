//! Application core — pure domain logic, zero I/O.
//!
//! The sampling loop, its command decoding, and the console text it
//! prints.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer testable without peripherals.

pub mod banner;
pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
