use std::path::PathBuf;

/// Runtime configuration, loaded from `FACEWATCH_*` environment
/// variables with defaults. Command-line flags override individual
/// fields on top.
pub struct Config {
    /// V4L2 device path (default: /dev/video0).
    pub camera_device: String,
    /// Directory containing the ONNX model files.
    pub model_dir: PathBuf,
    /// Directory holding the gallery file and archived face crops.
    pub data_dir: PathBuf,
    /// Match tolerance in the encoder's Euclidean space.
    pub tolerance: f32,
    /// Capture cycle cadence in milliseconds.
    pub cycle_interval_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("FACEWATCH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::var("XDG_DATA_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                        PathBuf::from(home).join(".local/share")
                    })
                    .join("facewatch")
            });

        let model_dir = std::env::var("FACEWATCH_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("models"));

        Self {
            camera_device: std::env::var("FACEWATCH_CAMERA_DEVICE")
                .unwrap_or_else(|_| "/dev/video0".to_string()),
            model_dir,
            data_dir,
            tolerance: env_f32("FACEWATCH_TOLERANCE", facewatch_core::DEFAULT_TOLERANCE),
            cycle_interval_ms: env_u64("FACEWATCH_CYCLE_INTERVAL_MS", 30),
        }
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
