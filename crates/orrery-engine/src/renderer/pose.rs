use bytemuck::{Pod, Zeroable};

use crate::core::scene::SceneModel;

/// Per-body data handed to the external renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyPose {
    /// World-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Spin angle in degrees.
    pub rotation_deg: f32,
    /// Uniform model scale.
    pub scale: f32,
    /// Ascending nodes of every ancestor, degrees.
    pub ascending_node_sum: f32,
    /// Inclinations of every ancestor plus this body, degrees.
    pub inclination_sum: f32,
    pub axial_tilt_deg: f32,
}

impl BodyPose {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One pose per body, in table order, rebuilt every processed frame.
pub struct PoseBuffer {
    poses: Vec<BodyPose>,
}

impl PoseBuffer {
    pub fn new() -> Self {
        Self {
            poses: Vec::with_capacity(32),
        }
    }

    /// Replace the buffer contents with the scene's current state.
    pub fn rebuild(&mut self, scene: &SceneModel) {
        self.poses.clear();
        self.poses.extend(scene.bodies().iter().map(|body| {
            let p = body.position.as_vec3();
            BodyPose {
                x: p.x,
                y: p.y,
                z: p.z,
                rotation_deg: body.rotation_deg as f32,
                scale: body.scale as f32,
                ascending_node_sum: body.ancestor_ascending_node_sum as f32,
                inclination_sum: body.ancestor_inclination_sum as f32,
                axial_tilt_deg: body.axial_tilt_deg as f32,
            }
        }));
    }

    pub fn poses(&self) -> &[BodyPose] {
        &self.poses
    }

    /// Flat float view of the buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.poses)
    }

    pub fn pose_count(&self) -> u32 {
        self.poses.len() as u32
    }

    /// Raw pointer to pose data for SharedArrayBuffer reads.
    pub fn poses_ptr(&self) -> *const f32 {
        self.poses.as_ptr() as *const f32
    }
}

impl Default for PoseBuffer {
    fn default() -> Self {
        Self::new()
    }
}
