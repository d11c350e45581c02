/// Camera and projection for the terminal view
use nalgebra::{Matrix4, Point3, Vector3};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Where the camera sits relative to the point it looks at.
const FOLLOW_OFFSET: Vector3<f64> = Vector3::new(0.0, -25.0, 13.0);

/// Perspective camera looking down at the floor, Z up.
pub struct Camera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, -25.0, 15.0),
            target: Point3::origin(),
            up: Vector3::z(),
            fov: std::f64::consts::PI / 4.0, // 45 degrees
            aspect: width as f64 / (height.max(1) as f64 * CELL_ASPECT),
            near: 0.1,
            far: 200.0,
        }
    }

    /// Track a block at `position`, keeping the same viewing angle.
    pub fn follow(&mut self, position: &Vector3<f64>) {
        self.target = Point3::new(position.x, position.y, 2.0);
        self.position = self.target + FOLLOW_OFFSET;
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f64> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to screen cells, returning `(x, y, depth)`.
    /// Points behind the camera yield `None`; points off screen are still
    /// returned so lines can be clipped per cell.
    pub fn project_to_screen(
        &self,
        view_projection: &Matrix4<f64>,
        point: &Point3<f64>,
        width: usize,
        height: usize,
    ) -> Option<(f64, f64, f64)> {
        let clip = view_projection * point.to_homogeneous();

        // Prevent division by near-zero or negative w (behind the camera)
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f64;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f64;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
