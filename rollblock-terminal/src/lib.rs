/// Terminal front end for rolling a block across the floor
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use rollblock_core::{RollAnimator, Sign, WorldAxis};
use std::collections::VecDeque;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod camera;
pub mod config;
pub mod renderer;
pub mod script;

pub use camera::Camera;
pub use config::Config;
pub use renderer::WireframeRenderer;
pub use script::{parse_script, Move};

/// Nominal time units per second handed to `RollAnimator::step`.
pub const UNITS_PER_SECOND: f64 = 60.0;

/// Map a key press to the roll it requests.
pub fn key_to_move(code: KeyCode) -> Option<Move> {
    let (axis, sign) = match code {
        KeyCode::Left | KeyCode::Char('a') => (WorldAxis::Y, Sign::Positive),
        KeyCode::Right | KeyCode::Char('d') => (WorldAxis::Y, Sign::Negative),
        KeyCode::Up | KeyCode::Char('w') => (WorldAxis::X, Sign::Positive),
        KeyCode::Down | KeyCode::Char('s') => (WorldAxis::X, Sign::Negative),
        KeyCode::Char('z') => (WorldAxis::Z, Sign::Positive),
        KeyCode::Char('c') => (WorldAxis::Z, Sign::Negative),
        _ => return None,
    };
    Some(Move::new(axis, sign))
}

/// Main application struct driving one block
pub struct TerminalApp {
    block: RollAnimator,
    script: VecDeque<Move>,
    camera: Camera,
    renderer: WireframeRenderer,
    target_fps: u32,
    running: bool,
    last_update: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(config, width, height)
    }

    pub fn with_size(config: &Config, width: u16, height: u16) -> anyhow::Result<Self> {
        let block = config.build_block()?;
        let script = VecDeque::from(config.moves()?);
        log::info!("block ready at {:?}, {} scripted moves", block.position(), script.len());

        let mut camera = Camera::new(width as u32, height as u32);
        camera.follow(&block.position());

        Ok(Self {
            block,
            script,
            camera,
            renderer: WireframeRenderer::new(width as usize, height as usize),
            target_fps: config.fps(),
            running: true,
            last_update: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn block(&self) -> &RollAnimator {
        &self.block
    }

    pub fn pending_moves(&self) -> usize {
        self.script.len()
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs(1) / self.target_fps;
        self.last_update = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            let dt = (frame_start - self.last_update).as_secs_f64() * UNITS_PER_SECOND;
            self.last_update = frame_start;
            self.update(dt);

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            code => {
                if let Some(step) = key_to_move(code) {
                    self.block.request_roll(step.axis, step.sign);
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        log::debug!("terminal resized to {width}x{height}");
        let mut camera = Camera::new(width as u32, height as u32);
        camera.follow(&self.block.position());
        self.camera = camera;
        self.renderer = WireframeRenderer::new(width as usize, height as usize);
    }

    /// Advance the animation by `dt` nominal units, starting the next
    /// scripted roll whenever the block is idle.
    pub fn update(&mut self, dt: f64) {
        if !self.block.is_rolling() {
            if let Some(step) = self.script.pop_front() {
                self.block.request_roll(step.axis, step.sign);
            }
        }
        let pose = self.block.step(dt);
        self.camera.follow(&pose.position);
    }

    fn render(&mut self) -> io::Result<()> {
        let pose = self.block.pose();
        let extents = self.block.half_extents();

        self.renderer.clear();
        self.renderer.render_floor(&pose.position, &self.camera);
        self.renderer.render_block(&extents, &pose, &self.camera);
        self.renderer.render_axes(&extents, &pose, &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    pub fn status_line(&self) -> String {
        let position = self.block.position();
        let state = if self.block.is_rolling() {
            "rolling"
        } else {
            "idle"
        };
        format!(
            "{} at ({:.1}, {:.1}, {:.1}) {} | FPS: {:.1} | Arrows/WASD=Roll X,Y Z/C=Roll Z Q=Quit",
            self.block.current_orientation(),
            position.x,
            position.y,
            position.z,
            state,
            self.fps
        )
    }
}
