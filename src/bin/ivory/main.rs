//! ivory - terminal piano
//!
//! Run with: cargo run
//!
//! Home row keys play the white keys, the row above plays the black keys.
//! Click keys with the mouse, Esc quits. Logs go to `ivory.log`; set
//! `RUST_LOG=debug` to see every note.

mod app;
mod audio;
mod ui;

use std::fs::File;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use ivory::config::PianoConfig;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let config = PianoConfig::default();
    init_logging(&config)?;

    let terminal = ratatui::init();
    let res = app::run(terminal, config);
    ratatui::restore();
    res
}

/// Log to a file: the terminal belongs to the UI.
fn init_logging(config: &PianoConfig) -> EyreResult<()> {
    let file = File::create(&config.log_file)
        .wrap_err_with(|| format!("failed to create log file {}", config.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
