//! Per-cycle session state: which face is on screen, and whether it is
//! enrollable.

use crate::encoding::Encoding;
use crate::matcher::Identity;

/// Grayscale crop of a detected face region.
#[derive(Debug, Clone)]
pub struct FaceCrop {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The single most-recently-seen unrecognized face, held for enrollment.
///
/// Overwritten or cleared every cycle; never accumulated. Not persisted.
#[derive(Debug, Clone)]
pub struct TrackedFace {
    pub crop: FaceCrop,
    pub encoding: Encoding,
}

/// What the session concluded about the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No face in frame (or no cycle processed yet).
    #[default]
    Idle,
    /// An unknown face is in frame and held for possible enrollment.
    TrackingUnknown,
    /// A known identity is in frame.
    Recognized(String),
}

/// The per-cycle input: either no face, or the first detected face with
/// its crop, encoding, and resolved identity.
///
/// Only the first detected face per frame participates; additional faces
/// in the scene are ignored. Documented simplification, not a bug.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    NoFace,
    Face {
        crop: FaceCrop,
        encoding: Encoding,
        identity: Identity,
    },
}

/// Tracks the currently-visible face across capture cycles.
///
/// There is no cross-cycle identity continuity: "the same person" is
/// re-identified from scratch each cycle by the matcher, and this state
/// is rebuilt from the cycle's outcome alone.
#[derive(Debug, Default)]
pub struct FrameSession {
    state: SessionState,
    tracked: Option<TrackedFace>,
}

impl FrameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The unknown face held for enrollment, when in `TrackingUnknown`.
    pub fn tracked(&self) -> Option<&TrackedFace> {
        self.tracked.as_ref()
    }

    /// Apply one capture cycle's outcome.
    pub fn observe(&mut self, outcome: CycleOutcome) {
        match outcome {
            CycleOutcome::NoFace => {
                self.state = SessionState::Idle;
                self.tracked = None;
            }
            CycleOutcome::Face {
                identity: Identity::Known(name),
                ..
            } => {
                // A recognized face discards any held unknown face, even
                // if it is a different face region than the one held.
                self.state = SessionState::Recognized(name);
                self.tracked = None;
            }
            CycleOutcome::Face {
                crop,
                encoding,
                identity: Identity::Unknown,
            } => {
                self.state = SessionState::TrackingUnknown;
                self.tracked = Some(TrackedFace { crop, encoding });
            }
        }
    }

    /// Drop the held face after a successful enrollment.
    pub fn clear_tracked(&mut self) {
        self.tracked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> FaceCrop {
        FaceCrop {
            data: vec![0u8; 4],
            width: 2,
            height: 2,
        }
    }

    fn face(values: Vec<f32>, identity: Identity) -> CycleOutcome {
        CycleOutcome::Face {
            crop: crop(),
            encoding: Encoding::new(values),
            identity,
        }
    }

    #[test]
    fn test_starts_idle() {
        let session = FrameSession::new();
        assert_eq!(*session.state(), SessionState::Idle);
        assert!(session.tracked().is_none());
    }

    #[test]
    fn test_unknown_face_becomes_tracked() {
        let mut session = FrameSession::new();
        session.observe(face(vec![1.0], Identity::Unknown));
        assert_eq!(*session.state(), SessionState::TrackingUnknown);
        assert!(session.tracked().is_some());
    }

    #[test]
    fn test_no_face_clears_tracked() {
        let mut session = FrameSession::new();
        session.observe(face(vec![1.0], Identity::Unknown));
        session.observe(CycleOutcome::NoFace);
        assert_eq!(*session.state(), SessionState::Idle);
        assert!(session.tracked().is_none());
    }

    #[test]
    fn test_recognized_face_clears_tracked() {
        let mut session = FrameSession::new();
        session.observe(face(vec![1.0], Identity::Unknown));
        session.observe(face(vec![2.0], Identity::Known("Alice".into())));
        assert_eq!(*session.state(), SessionState::Recognized("Alice".into()));
        assert!(session.tracked().is_none());
    }

    #[test]
    fn test_new_unknown_overwrites_previous() {
        let mut session = FrameSession::new();
        session.observe(face(vec![1.0], Identity::Unknown));
        session.observe(face(vec![2.0], Identity::Unknown));
        let tracked = session.tracked().unwrap();
        assert_eq!(tracked.encoding, Encoding::new(vec![2.0]));
    }
}
