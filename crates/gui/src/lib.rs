// Library crate: exposes the headless chart (artwork engine, interaction, coordinator, backend)
// for integration tests and the JSON command interface.
// egui front-end modules (app, ui) remain in the binary crate.

pub mod artwork;
pub mod backend;
pub mod chart;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod interaction;
pub mod state;
