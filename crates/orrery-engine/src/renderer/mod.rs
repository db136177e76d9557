pub mod pose;

pub use pose::{BodyPose, PoseBuffer};
