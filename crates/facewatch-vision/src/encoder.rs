//! ArcFace-style face encoder via ONNX Runtime.
//!
//! Produces fixed-length, L2-normalized encodings from face crops. The
//! crop is the detected bounding region resized to the model input; no
//! landmark alignment is performed.

use crate::detector::FaceRegion;
use crate::imageops;
use facewatch_core::Encoding;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use thiserror::Error;

const ENCODER_INPUT_SIZE: usize = 112;
const ENCODER_MEAN: f32 = 127.5;
const ENCODER_STD: f32 = 127.5; // symmetric normalization
const ENCODING_DIM: usize = 512;

#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("face region is empty")]
    EmptyRegion,
    #[error("ort: {0}")]
    Ort(#[from] ort::Error),
}

/// Face encoder producing 512-dim identity vectors.
pub struct FaceEncoder {
    session: Session,
}

impl FaceEncoder {
    /// Load the encoder ONNX model from the given path.
    pub fn load(model_path: &str) -> Result<Self, EncoderError> {
        if !Path::new(model_path).exists() {
            return Err(EncoderError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()?
            .with_intra_threads(2)?
            .commit_from_file(model_path)?;

        tracing::info!(path = model_path, "loaded face encoder model");

        Ok(Self { session })
    }

    /// Compute the encoding of a detected face in a grayscale frame.
    pub fn encode(
        &mut self,
        frame: &[u8],
        width: u32,
        height: u32,
        region: &FaceRegion,
    ) -> Result<Encoding, EncoderError> {
        let (crop, cw, ch) = imageops::crop_clamped(
            frame,
            width,
            height,
            region.x,
            region.y,
            region.width,
            region.height,
        );
        if cw == 0 || ch == 0 {
            return Err(EncoderError::EmptyRegion);
        }

        let resized = imageops::resize_bilinear(
            &crop,
            cw as usize,
            ch as usize,
            ENCODER_INPUT_SIZE,
            ENCODER_INPUT_SIZE,
        );
        let input = Self::preprocess(&resized);

        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(input.view())?])?;

        let (_, raw_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| EncoderError::InferenceFailed(format!("encoding extraction: {e}")))?;

        let raw: Vec<f32> = raw_data.to_vec();
        if raw.len() != ENCODING_DIM {
            return Err(EncoderError::InferenceFailed(format!(
                "expected {ENCODING_DIM}-dim encoding, got {}",
                raw.len()
            )));
        }

        // L2-normalize so Euclidean distances are comparable.
        let norm: f32 = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
        let values = if norm > 0.0 {
            raw.iter().map(|x| x / norm).collect()
        } else {
            raw
        };

        Ok(Encoding::new(values))
    }

    /// Preprocess a 112x112 grayscale crop into a normalized NCHW tensor.
    fn preprocess(crop: &[u8]) -> Array4<f32> {
        let size = ENCODER_INPUT_SIZE;
        let mut tensor = Array4::<f32>::zeros((1, 3, size, size));

        for y in 0..size {
            for x in 0..size {
                let pixel = crop.get(y * size + x).copied().unwrap_or(0) as f32;
                let normalized = (pixel - ENCODER_MEAN) / ENCODER_STD;
                tensor[[0, 0, y, x]] = normalized;
                tensor[[0, 1, y, x]] = normalized;
                tensor[[0, 2, y, x]] = normalized;
            }
        }

        tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_output_shape() {
        let crop = vec![128u8; ENCODER_INPUT_SIZE * ENCODER_INPUT_SIZE];
        let tensor = FaceEncoder::preprocess(&crop);
        assert_eq!(tensor.shape(), &[1, 3, ENCODER_INPUT_SIZE, ENCODER_INPUT_SIZE]);
    }

    #[test]
    fn test_preprocess_normalization() {
        let crop = vec![128u8; ENCODER_INPUT_SIZE * ENCODER_INPUT_SIZE];
        let tensor = FaceEncoder::preprocess(&crop);
        let expected = (128.0 - ENCODER_MEAN) / ENCODER_STD;
        assert!((tensor[[0, 0, 0, 0]] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_preprocess_channels_identical() {
        let crop: Vec<u8> = (0..(ENCODER_INPUT_SIZE * ENCODER_INPUT_SIZE))
            .map(|i| (i % 251) as u8)
            .collect();
        let tensor = FaceEncoder::preprocess(&crop);
        for y in [0, 55, ENCODER_INPUT_SIZE - 1] {
            for x in [0, 17, ENCODER_INPUT_SIZE - 1] {
                assert_eq!(tensor[[0, 0, y, x]], tensor[[0, 1, y, x]]);
                assert_eq!(tensor[[0, 1, y, x]], tensor[[0, 2, y, x]]);
            }
        }
    }
}
