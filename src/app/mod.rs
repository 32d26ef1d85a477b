//! Binary-local application orchestration.
//!
//! `main.rs` only parses arguments. Config loading, renderer setup and the
//! per-subcommand flows live here so each flow can be tested against a
//! recording [`elebee::ui::render::RenderSink`].

pub(crate) mod config_flow;
pub(crate) mod entry;
pub(crate) mod exec_mode;
pub(crate) mod install_flow;
#[cfg(test)]
pub(crate) mod recording;
