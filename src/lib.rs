//! Bfruit - three-reel fruit machine for the terminal.
//!
//! The slot engine lives in `slot`; everything else is the terminal front-end
//! and the payout simulator built on top of it.

pub mod app;
pub mod audio;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod input;
pub mod logging;
pub mod simulator;
pub mod slot;
pub mod ui;
pub mod utils;
