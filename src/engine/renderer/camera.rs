// Fixed canvas camera for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Maps a fixed logical canvas onto the window
///
/// Game coordinates are canvas pixels with the origin in the top-left corner
/// and y growing downward, whatever the window size is. The canvas is
/// stretched to fill the window.
#[derive(Debug, Clone)]
pub struct Camera {
    canvas_size: Vec2,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        let canvas_size = Vec2::new(canvas_width, canvas_height);
        Self {
            canvas_size,
            view_proj: Self::projection(canvas_size),
        }
    }

    fn projection(canvas_size: Vec2) -> Mat4 {
        // bottom = height, top = 0 flips y so the canvas origin is top-left
        Mat4::orthographic_rh(0.0, canvas_size.x, canvas_size.y, 0.0, -1.0, 1.0)
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
