use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// One target of a test layout. Built once per layout, immutable for the
/// whole test; controllers copy the id/position values they need into
/// their records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: usize,
    pub position: Vec3,
    /// Display diameter; also the collision diameter of the sphere.
    pub width: f32,
}

impl Target {
    pub fn new(id: usize, position: Vec3, width: f32) -> Self {
        Self {
            id,
            position,
            width,
        }
    }
}

/// Task variant governing how a trial is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperimentTask {
    ReciprocalTapping,
    Dragging,
}

impl ExperimentTask {
    pub fn label(&self) -> &'static str {
        match self {
            ExperimentTask::ReciprocalTapping => "ReciprocalTapping",
            ExperimentTask::Dragging => "Dragging",
        }
    }
}

/// Plane the target circle lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneOrientation {
    PlaneXY,
    PlaneYZ,
    PlaneZX,
}

impl PlaneOrientation {
    /// Axis pair label used in canonical test ids
    pub fn label(&self) -> &'static str {
        match self {
            PlaneOrientation::PlaneXY => "XY",
            PlaneOrientation::PlaneYZ => "YZ",
            PlaneOrientation::PlaneZX => "ZX",
        }
    }

    /// Orthonormal basis (u, v) spanning the plane; a point at angle
    /// theta sits at u * sin(theta) + v * cos(theta).
    pub fn basis(&self) -> (Vec3, Vec3) {
        match self {
            PlaneOrientation::PlaneXY => {
                (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0))
            }
            PlaneOrientation::PlaneYZ => {
                (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0))
            }
            PlaneOrientation::PlaneZX => {
                (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0))
            }
        }
    }
}
