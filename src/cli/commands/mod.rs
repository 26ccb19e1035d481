//! CLI command implementations.

mod ask;
mod chat;
mod classify;
mod config;
mod doctor;
mod lookup;
mod serve;

pub use ask::run_ask;
pub use chat::run_chat;
pub use classify::run_classify;
pub use config::run_config;
pub use doctor::run_doctor;
pub use lookup::{run_calc, run_constant, run_convert, run_element, run_formula};
pub use serve::{app, run_serve};
