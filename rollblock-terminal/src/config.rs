/// Command line configuration for the terminal demo
use anyhow::{bail, Context};
use clap::Parser;
use nalgebra::Vector3;
use rollblock_core::{HalfExtents, RollAnimator, DEFAULT_ROLL_SPEED};

use crate::script::{parse_script, Move};

#[derive(Parser, Debug, Clone)]
#[command(name = "rollblock-terminal", version, about = "Roll a block across the floor")]
pub struct Config {
    /// Full block dimensions along its local X, Y and Z axes
    #[arg(long, num_args = 3, value_names = ["W", "H", "D"], default_values_t = [2.0, 4.0, 6.0])]
    pub size: Vec<f64>,

    /// Starting center of the block
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        default_values_t = [10.0, 0.0, 3.0]
    )]
    pub start: Vec<f64>,

    /// Fraction of a half turn covered per nominal time unit
    #[arg(long, default_value_t = DEFAULT_ROLL_SPEED)]
    pub roll_speed: f64,

    /// Target frame rate
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Rolls to play back before handing over to the keyboard, e.g. "2X+ Y- Z+"
    #[arg(long)]
    pub script: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: vec![2.0, 4.0, 6.0],
            start: vec![10.0, 0.0, 3.0],
            roll_speed: DEFAULT_ROLL_SPEED,
            fps: 30,
            script: None,
        }
    }
}

impl Config {
    /// Build the animator described by `--size`, `--start` and `--roll-speed`.
    pub fn build_block(&self) -> anyhow::Result<RollAnimator> {
        let &[width, height, depth] = self.size.as_slice() else {
            bail!("--size takes exactly three values, got {}", self.size.len());
        };
        let &[x, y, z] = self.start.as_slice() else {
            bail!("--start takes exactly three values, got {}", self.start.len());
        };

        let extents = HalfExtents::from_size(width, height, depth).context("invalid --size")?;
        let mut block = RollAnimator::with_extents(extents);
        block
            .set_roll_speed(self.roll_speed)
            .context("invalid --roll-speed")?;
        block.set_base_position(Vector3::new(x, y, z))?;
        Ok(block)
    }

    pub fn moves(&self) -> anyhow::Result<Vec<Move>> {
        match &self.script {
            Some(script) => parse_script(script).map_err(anyhow::Error::msg).context("invalid --script"),
            None => Ok(Vec::new()),
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps.max(1)
    }
}
