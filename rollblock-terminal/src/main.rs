/// Rollblock Terminal Demo
///
/// Rolls a block across a dotted floor in the terminal.
/// Controls:
///   - Up/Down or W/S: Roll about X
///   - Left/Right or A/D: Roll about Y
///   - Z/C: Roll about Z
///   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use rollblock_terminal::{Config, TerminalApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();
    log::debug!("starting with {config:?}");

    let mut app = TerminalApp::new(&config)?;
    app.run().context("terminal session failed")?;

    let block = app.block();
    println!(
        "Block finished as {} at {:?}",
        block.current_orientation(),
        block.position()
    );
    Ok(())
}
