// Library root
// -----------
// This crate exposes the backlog estimator as a library; the binary
// (`main.rs`) wires it to an interactive terminal menu.
//
// Module responsibilities:
// - `normalize`, `resolver`, `duration`, `aggregate`: the pipeline that
//   turns Steam library entries into HowLongToBeat estimates and totals.
// - `api`: blocking HTTP clients for HowLongToBeat and Steam, behind the
//   collaborator traits the pipeline consumes.
// - `ui`: menu flows, prompts and output; delegates work to the pipeline.
// - `config`, `session`, `cli`, `logging`, `error`: ambient plumbing.
pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod resolver;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
