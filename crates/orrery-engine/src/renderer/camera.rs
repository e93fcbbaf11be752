use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective camera for 3D rendering.
/// Right-handed, Y-up, looking down -Z in view space.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub up: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    projection: Mat4,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// World-space eye position; w is padding.
    pub position: [f32; 4],
}

impl CameraUniform {
    /// Two 4×4 matrices plus one padded vec4.
    pub const FLOATS: usize = 36;
}

impl PerspectiveCamera {
    /// Camera at the origin looking down -Z, with the projection already built.
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            up: Vec3::Y,
            target: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    /// Place the eye. The target is unchanged; call `look_at` to re-aim.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Aim the camera at a world-space point. Takes effect in the next
    /// `view_matrix`; the projection is untouched.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Change the aspect ratio and refresh the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
        self.update_projection_matrix();
    }

    /// Recompute the cached projection after editing fov/aspect/near/far.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    /// Projection as of the last `update_projection_matrix`.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view transform, recomputed from position, target and up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Combined world-to-clip transform.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Snapshot for upload to the GPU.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}
