//! facewatch-vision — The external face detection/encoding black box.
//!
//! Wraps a SCRFD-style detector and an ArcFace-style encoder running via
//! ONNX Runtime. The rest of the system only consumes the output: per
//! face, a bounding region, a grayscale crop, and a fixed-length
//! encoding. Nothing outside this crate touches `ort`.

pub mod analyzer;
pub mod detector;
pub mod encoder;
pub mod imageops;

pub use analyzer::{AnalyzedFace, AnalyzerError, FaceAnalyzer};
pub use detector::{FaceDetector, FaceRegion};
pub use encoder::FaceEncoder;
