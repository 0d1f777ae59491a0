//! facewatch-core — Identity matching, gallery storage, and enrollment.
//!
//! The decision logic of the tool lives here: nearest-neighbor identity
//! resolution under a distance tolerance, the persisted gallery of known
//! faces, and the per-cycle session state that makes an unknown face
//! enrollable. Camera capture and model inference live in the hw and
//! vision crates; this crate only ever sees encodings and crops.

pub mod encoding;
pub mod enroll;
pub mod gallery;
pub mod matcher;
pub mod session;
pub mod store;

pub use encoding::Encoding;
pub use enroll::{enroll, EnrollError};
pub use gallery::{Gallery, GalleryEntry};
pub use matcher::{identify, Identity, DEFAULT_TOLERANCE};
pub use session::{CycleOutcome, FaceCrop, FrameSession, SessionState, TrackedFace};
pub use store::{GalleryStore, StoreError};
