//! Detector + encoder facade: one call per frame.

use crate::detector::{DetectorError, FaceDetector, FaceRegion};
use crate::encoder::{EncoderError, FaceEncoder};
use crate::imageops;
use facewatch_core::{Encoding, FaceCrop};
use std::path::Path;
use thiserror::Error;

const DETECTOR_MODEL_FILE: &str = "det_10g.onnx";
const ENCODER_MODEL_FILE: &str = "w600k_r50.onnx";

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Detector(#[from] DetectorError),
    #[error(transparent)]
    Encoder(#[from] EncoderError),
}

/// One detected face with everything downstream consumers need: the
/// region, a native-resolution grayscale crop (for archival on
/// enrollment), and the identity encoding.
pub struct AnalyzedFace {
    pub region: FaceRegion,
    pub crop: FaceCrop,
    pub encoding: Encoding,
}

/// The full external black box: frame in, encoded faces out.
pub struct FaceAnalyzer {
    detector: FaceDetector,
    encoder: FaceEncoder,
}

impl FaceAnalyzer {
    /// Load both models from a directory using their standard filenames.
    pub fn load(model_dir: &Path) -> Result<Self, AnalyzerError> {
        let detector =
            FaceDetector::load(&model_dir.join(DETECTOR_MODEL_FILE).to_string_lossy())?;
        let encoder = FaceEncoder::load(&model_dir.join(ENCODER_MODEL_FILE).to_string_lossy())?;
        Ok(Self { detector, encoder })
    }

    /// Detect and encode every face in a grayscale frame.
    ///
    /// Faces come back sorted by detection confidence, highest first;
    /// a face whose region degenerates to an empty crop is skipped.
    pub fn analyze(
        &mut self,
        frame: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<AnalyzedFace>, AnalyzerError> {
        let regions = self.detector.detect(frame, width, height)?;

        let mut faces = Vec::with_capacity(regions.len());
        for region in regions {
            let encoding = match self.encoder.encode(frame, width, height, &region) {
                Ok(encoding) => encoding,
                Err(EncoderError::EmptyRegion) => {
                    tracing::debug!(?region, "skipping degenerate face region");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let (data, cw, ch) = imageops::crop_clamped(
                frame,
                width,
                height,
                region.x,
                region.y,
                region.width,
                region.height,
            );

            faces.push(AnalyzedFace {
                region,
                crop: FaceCrop {
                    data,
                    width: cw,
                    height: ch,
                },
                encoding,
            });
        }

        Ok(faces)
    }
}
