//! facewatch-hw — V4L2 camera capture.
//!
//! Thin hardware layer: opens the camera, negotiates a pixel format, and
//! hands grayscale frames to the capture loop. The device handle is
//! released on drop, on every exit path.

pub mod camera;
pub mod frame;

pub use camera::{Camera, CameraError, DeviceInfo, PixelFormat};
pub use frame::Frame;
