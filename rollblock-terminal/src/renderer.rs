/// ASCII wireframe renderer for a rolling block
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use rollblock_core::{HalfExtents, Pose};
use std::io::Write;

use crate::camera::Camera;

const EDGE_CHAR: char = '#';
const CORNER_CHAR: char = '@';
const FLOOR_CHAR: char = '.';
/// Local X, Y and Z axis markers, drawn red, green and blue.
const AXIS_CHARS: [char; 3] = ['x', 'y', 'z'];

/// How far each axis marker reaches past the face it leaves through.
const AXIS_OVERHANG: f64 = 1.0;

/// Spacing and reach of the floor grid, in world units.
const FLOOR_SPACING: f64 = 2.0;
const FLOOR_REACH: i32 = 12;

/// Corner pairs making up the 12 edges of a cuboid, indexed as in `corners`.
#[rustfmt::skip]
const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// World space corners of a block with the given extents and pose.
pub fn corners(extents: &HalfExtents, pose: &Pose) -> [Point3<f64>; 8] {
    let mut corners = [Point3::origin(); 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let local = Vector3::new(
            if i & 1 == 0 { -extents.x } else { extents.x },
            if i & 2 == 0 { -extents.y } else { extents.y },
            if i & 4 == 0 { -extents.z } else { extents.z },
        );
        *corner = Point3::from(pose.rotation * local + pose.position);
    }
    corners
}

/// Renders the floor and the block outline into a character buffer.
pub struct WireframeRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
}

impl WireframeRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Grid of dots on the z = 0 plane around `center`.
    pub fn render_floor(&mut self, center: &Vector3<f64>, camera: &Camera) {
        let vp = camera.view_projection();
        let cx = (center.x / FLOOR_SPACING).round();
        let cy = (center.y / FLOOR_SPACING).round();
        for i in -FLOOR_REACH..=FLOOR_REACH {
            for j in -FLOOR_REACH..=FLOOR_REACH {
                let point = Point3::new(
                    (cx + i as f64) * FLOOR_SPACING,
                    (cy + j as f64) * FLOOR_SPACING,
                    0.0,
                );
                if let Some((x, y, depth)) = self.project(&vp, &point, camera) {
                    // Floor never hides the block
                    self.plot(x, y, depth.max(1.0 - f64::EPSILON), FLOOR_CHAR);
                }
            }
        }
    }

    pub fn render_block(&mut self, extents: &HalfExtents, pose: &Pose, camera: &Camera) {
        let vp = camera.view_projection();
        let corners = corners(extents, pose);
        for (a, b) in EDGES {
            let start = self.project(&vp, &corners[a], camera);
            let end = self.project(&vp, &corners[b], camera);
            if let (Some(start), Some(end)) = (start, end) {
                self.draw_line(start, end, EDGE_CHAR);
            }
        }
        for corner in &corners {
            if let Some((x, y, depth)) = self.project(&vp, corner, camera) {
                self.plot(x, y, depth, CORNER_CHAR);
            }
        }
    }

    /// Local axis triad from the block center, turning with the block.
    pub fn render_axes(&mut self, extents: &HalfExtents, pose: &Pose, camera: &Camera) {
        let vp = camera.view_projection();
        let center = Point3::from(pose.position);
        let reach = [extents.x, extents.y, extents.z];
        for (column, character) in AXIS_CHARS.into_iter().enumerate() {
            let direction = pose.rotation.column(column).into_owned();
            let tip = center + direction * (reach[column] + AXIS_OVERHANG);
            let start = self.project(&vp, &center, camera);
            let end = self.project(&vp, &tip, camera);
            if let (Some(start), Some(end)) = (start, end) {
                self.draw_line(start, end, character);
            }
        }
    }

    fn project(
        &self,
        vp: &Matrix4<f64>,
        point: &Point3<f64>,
        camera: &Camera,
    ) -> Option<(f64, f64, f64)> {
        camera.project_to_screen(vp, point, self.width, self.height)
    }

    /// Step along the line one cell at a time, interpolating depth.
    fn draw_line(&mut self, start: (f64, f64, f64), end: (f64, f64, f64), character: char) {
        let (dx, dy, dz) = (end.0 - start.0, end.1 - start.1, end.2 - start.2);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        // Lines far off screen would take forever to walk
        if steps > 4.0 * (self.width + self.height) as f64 {
            return;
        }
        let count = steps as usize;
        for i in 0..=count {
            let t = i as f64 / steps;
            self.plot(start.0 + dx * t, start.1 + dy * t, start.2 + dz * t, character);
        }
    }

    fn plot(&mut self, x: f64, y: f64, depth: f64, character: char) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        if depth <= self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    FLOOR_CHAR => Color::DarkGrey,
                    CORNER_CHAR => Color::Yellow,
                    EDGE_CHAR => Color::Cyan,
                    'x' => Color::Red,
                    'y' => Color::Green,
                    'z' => Color::Blue,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
