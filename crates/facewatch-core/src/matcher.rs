//! Identity resolution: nearest neighbor under a distance tolerance.

use crate::encoding::Encoding;
use crate::gallery::Gallery;

/// Default match tolerance in the encoder's Euclidean space.
pub const DEFAULT_TOLERANCE: f32 = 0.45;

/// Outcome of resolving one encoding against the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// The name of the best-matching gallery entry.
    Known(String),
    /// No gallery entry within tolerance (or the gallery is empty).
    Unknown,
}

/// Resolve `probe` against the gallery.
///
/// An entry is a candidate when its Euclidean distance to the probe is
/// within `tolerance`. If at least one candidate exists, the answer is
/// the name of the entry with the globally minimal distance; exact ties
/// go to the lowest index (first-inserted). Otherwise `Unknown`.
///
/// Pure function: no side effects, identical inputs give identical output.
pub fn identify(probe: &Encoding, gallery: &Gallery, tolerance: f32) -> Identity {
    let mut best_dist = f32::INFINITY;
    let mut best_idx: Option<usize> = None;
    let mut any_candidate = false;

    for (i, entry) in gallery.entries().iter().enumerate() {
        let dist = probe.euclidean_distance(&entry.encoding);
        if dist <= tolerance {
            any_candidate = true;
        }
        // Strict `<` keeps the earliest entry on an exact tie.
        if dist < best_dist {
            best_dist = dist;
            best_idx = Some(i);
        }
    }

    match best_idx {
        Some(idx) if any_candidate => Identity::Known(gallery.entries()[idx].name.clone()),
        _ => Identity::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryEntry;

    fn entry(name: &str, values: Vec<f32>) -> GalleryEntry {
        GalleryEntry {
            name: name.to_string(),
            encoding: Encoding::new(values),
            enrolled_at: String::new(),
        }
    }

    fn gallery(entries: Vec<GalleryEntry>) -> Gallery {
        let mut g = Gallery::new();
        for e in entries {
            g.push(e);
        }
        g
    }

    #[test]
    fn test_identify_nearest_within_tolerance() {
        // Alice at distance 0.3, Bob at distance 0.9, tolerance 0.45.
        let g = gallery(vec![
            entry("Alice", vec![0.3, 0.0]),
            entry("Bob", vec![0.9, 0.0]),
        ]);
        let probe = Encoding::new(vec![0.0, 0.0]);
        assert_eq!(
            identify(&probe, &g, DEFAULT_TOLERANCE),
            Identity::Known("Alice".into())
        );
    }

    #[test]
    fn test_identify_all_beyond_tolerance() {
        let g = gallery(vec![
            entry("Alice", vec![1.0, 0.0]),
            entry("Bob", vec![0.0, 2.0]),
        ]);
        let probe = Encoding::new(vec![0.0, 0.0]);
        assert_eq!(identify(&probe, &g, 0.45), Identity::Unknown);
    }

    #[test]
    fn test_identify_empty_gallery() {
        let probe = Encoding::new(vec![0.0, 0.0]);
        assert_eq!(identify(&probe, &Gallery::new(), 0.45), Identity::Unknown);
    }

    #[test]
    fn test_identify_tie_goes_to_first_inserted() {
        // Both entries at exactly the same distance from the probe.
        let g = gallery(vec![
            entry("First", vec![0.2, 0.0]),
            entry("Second", vec![-0.2, 0.0]),
        ]);
        let probe = Encoding::new(vec![0.0, 0.0]);
        assert_eq!(identify(&probe, &g, 0.45), Identity::Known("First".into()));
    }

    #[test]
    fn test_identify_duplicate_names_nearest_entry_wins() {
        // Same person enrolled twice with different encodings; either may
        // match, and the winner is the nearest *entry*.
        let g = gallery(vec![
            entry("Carol", vec![0.4, 0.0]),
            entry("Dave", vec![0.35, 0.0]),
            entry("Carol", vec![0.1, 0.0]),
        ]);
        let probe = Encoding::new(vec![0.0, 0.0]);
        assert_eq!(identify(&probe, &g, 0.45), Identity::Known("Carol".into()));
    }

    #[test]
    fn test_identify_global_argmin_not_candidate_argmin() {
        // The nearest entry overall decides the name once any entry is a
        // candidate; minimal distance here is also the candidate.
        let g = gallery(vec![
            entry("Far", vec![3.0, 0.0]),
            entry("Near", vec![0.1, 0.0]),
        ]);
        let probe = Encoding::new(vec![0.0, 0.0]);
        assert_eq!(identify(&probe, &g, 0.45), Identity::Known("Near".into()));
    }

    #[test]
    fn test_identify_pure() {
        let g = gallery(vec![entry("Alice", vec![0.1, 0.0])]);
        let probe = Encoding::new(vec![0.0, 0.0]);
        let first = identify(&probe, &g, 0.45);
        let second = identify(&probe, &g, 0.45);
        assert_eq!(first, second);
    }

    #[test]
    fn test_identify_boundary_distance_equals_tolerance() {
        // distance == tolerance is a candidate (inclusive bound).
        let g = gallery(vec![entry("Edge", vec![0.5, 0.0])]);
        let probe = Encoding::new(vec![0.0, 0.0]);
        assert_eq!(identify(&probe, &g, 0.5), Identity::Known("Edge".into()));
    }
}
