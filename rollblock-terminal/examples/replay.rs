/// Example: Replay a move script without a terminal
///
/// Usage: cargo run --example replay -- --script "2X+ Y- Z+"
use clap::Parser;
use rollblock_terminal::{Config, UNITS_PER_SECOND};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut config = Config::parse();
    if config.script.is_none() {
        println!("No --script given, rolling a square...");
        config.script = Some("X+ Y+ X- Y-".to_string());
    }

    let mut block = config.build_block()?;
    let dt = UNITS_PER_SECOND / config.fps() as f64;
    println!("start: {} at {:?}", block.current_orientation(), block.position());

    for (i, step) in config.moves()?.into_iter().enumerate() {
        block.request_roll(step.axis, step.sign);
        let mut frames = 0;
        while block.is_rolling() {
            block.step(dt);
            frames += 1;
        }
        let position = block.position();
        println!(
            "{:>3} {step}: {} at ({:.3}, {:.3}, {:.3}) after {frames} frames",
            i + 1,
            block.current_orientation(),
            position.x,
            position.y,
            position.z
        );
    }
    Ok(())
}
