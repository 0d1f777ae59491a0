//! Enrollment workflow: bind a name to the currently tracked unknown face.

use crate::session::FrameSession;
use crate::store::{GalleryStore, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrollError {
    #[error("name is empty")]
    InvalidName,
    #[error("no unknown face is currently tracked")]
    NoFaceAvailable,
    #[error("gallery persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

/// Enroll the session's tracked unknown face under `proposed_name`.
///
/// The name is whitespace-trimmed and must be non-empty. On success the
/// tracked face is cleared, so a second enrollment needs a fresh unknown
/// face; on persistence failure it is left intact so the operator may
/// retry. Returns the name actually enrolled.
pub fn enroll(
    session: &mut FrameSession,
    store: &mut GalleryStore,
    proposed_name: &str,
) -> Result<String, EnrollError> {
    // Precondition before validation: without a tracked face there is
    // nothing to name, so that failure wins even over a bad name.
    let tracked = session.tracked().ok_or(EnrollError::NoFaceAvailable)?;

    let name = proposed_name.trim();
    if name.is_empty() {
        return Err(EnrollError::InvalidName);
    }

    store.append(name, tracked.encoding.clone(), &tracked.crop)?;
    session.clear_tracked();

    tracing::info!(name, "enrollment complete");
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoding;
    use crate::matcher::Identity;
    use crate::session::{CycleOutcome, FaceCrop};

    fn store() -> (tempfile::TempDir, GalleryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GalleryStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn session_with_unknown() -> FrameSession {
        let mut session = FrameSession::new();
        session.observe(CycleOutcome::Face {
            crop: FaceCrop {
                data: vec![100u8; 16],
                width: 4,
                height: 4,
            },
            encoding: Encoding::new(vec![0.1, 0.2]),
            identity: Identity::Unknown,
        });
        session
    }

    #[test]
    fn test_enroll_whitespace_name_rejected() {
        let (_dir, mut store) = store();
        let mut session = session_with_unknown();
        let err = enroll(&mut session, &mut store, "  ");
        assert!(matches!(err, Err(EnrollError::InvalidName)));
        assert!(store.gallery().is_empty());
        // Tracked face untouched by the aborted attempt.
        assert!(session.tracked().is_some());
    }

    #[test]
    fn test_enroll_missing_face_reported_before_bad_name() {
        // Both failures at once: the precondition wins, as in the
        // original flow where no name is even asked for without a face.
        let (_dir, mut store) = store();
        let mut session = FrameSession::new();
        let err = enroll(&mut session, &mut store, "  ");
        assert!(matches!(err, Err(EnrollError::NoFaceAvailable)));
        assert!(store.gallery().is_empty());
    }

    #[test]
    fn test_enroll_without_tracked_face() {
        let (_dir, mut store) = store();
        let mut session = FrameSession::new();
        let err = enroll(&mut session, &mut store, "Carol");
        assert!(matches!(err, Err(EnrollError::NoFaceAvailable)));
        assert!(store.gallery().is_empty());
    }

    #[test]
    fn test_enroll_success_then_requires_fresh_face() {
        let (_dir, mut store) = store();
        let mut session = session_with_unknown();

        let name = enroll(&mut session, &mut store, " Carol ").unwrap();
        assert_eq!(name, "Carol");
        assert_eq!(store.gallery().len(), 1);
        assert_eq!(store.gallery().entries()[0].name, "Carol");
        assert!(session.tracked().is_none());

        // No fresh unknown face observed since: second attempt fails.
        let err = enroll(&mut session, &mut store, "Carol");
        assert!(matches!(err, Err(EnrollError::NoFaceAvailable)));
        assert_eq!(store.gallery().len(), 1);
    }

    #[test]
    fn test_enroll_after_face_disappears() {
        let (_dir, mut store) = store();
        let mut session = session_with_unknown();
        session.observe(CycleOutcome::NoFace);
        let err = enroll(&mut session, &mut store, "Carol");
        assert!(matches!(err, Err(EnrollError::NoFaceAvailable)));
        assert!(store.gallery().is_empty());
    }

    #[test]
    fn test_enroll_persistence_failure_keeps_tracked_face() {
        let (_dir, mut store) = store();
        let mut session = FrameSession::new();
        // A crop whose dimensions disagree with its data fails the
        // archive write, standing in for a disk-level failure.
        session.observe(CycleOutcome::Face {
            crop: FaceCrop {
                data: vec![0u8; 3],
                width: 4,
                height: 4,
            },
            encoding: Encoding::new(vec![0.1]),
            identity: Identity::Unknown,
        });

        let err = enroll(&mut session, &mut store, "Carol");
        assert!(matches!(err, Err(EnrollError::Persistence(_))));
        assert!(store.gallery().is_empty());
        // Operator may retry: tracked face survives the failure.
        assert!(session.tracked().is_some());
    }
}
