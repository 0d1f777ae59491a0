//! One capture cycle: frame → detect/encode → resolve identity.

use facewatch_core::{identify, CycleOutcome, Gallery};
use facewatch_hw::{Camera, CameraError};
use facewatch_vision::{AnalyzedFace, AnalyzerError, FaceAnalyzer};
use thiserror::Error;

/// Per-cycle failure. Always contained at the loop boundary: logged,
/// then the cycle is retried on the next tick.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("frame read: {0}")]
    FrameRead(#[from] CameraError),
    #[error("analysis: {0}")]
    Analysis(#[from] AnalyzerError),
}

/// Run one capture cycle against the camera and models.
pub fn run_cycle(
    camera: &Camera,
    analyzer: &mut FaceAnalyzer,
    gallery: &Gallery,
    tolerance: f32,
) -> Result<CycleOutcome, CycleError> {
    let frame = camera.capture_frame()?;
    let faces = analyzer.analyze(&frame.data, frame.width, frame.height)?;
    Ok(resolve_first_face(faces, gallery, tolerance))
}

/// Turn the detector's output into the cycle outcome.
///
/// Only the first (highest-confidence) detected face participates;
/// additional faces in the scene are ignored. Documented scope
/// limitation, kept deliberately.
pub fn resolve_first_face(
    faces: Vec<AnalyzedFace>,
    gallery: &Gallery,
    tolerance: f32,
) -> CycleOutcome {
    match faces.into_iter().next() {
        None => CycleOutcome::NoFace,
        Some(face) => {
            let identity = identify(&face.encoding, gallery, tolerance);
            CycleOutcome::Face {
                crop: face.crop,
                encoding: face.encoding,
                identity,
            }
        }
    }
}
