//! facewatch-rebuild — rebuild the gallery from the archived face images.
//!
//! Takes no arguments: scans the known-faces directory under the
//! configured data dir, re-derives one encoding per image (first
//! detected face only), and overwrites the gallery file.

use anyhow::{Context, Result};
use facewatch_cli::config::Config;
use facewatch_cli::naming::entry_name_from_stem;
use facewatch_core::{Encoding, Gallery, GalleryEntry, GalleryStore};
use facewatch_vision::FaceAnalyzer;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();

    let mut store = GalleryStore::open(&config.data_dir)
        .with_context(|| format!("opening gallery store in {}", config.data_dir.display()))?;

    let mut analyzer = FaceAnalyzer::load(&config.model_dir)
        .with_context(|| format!("loading models from {}", config.model_dir.display()))?;

    let mut paths: Vec<_> = std::fs::read_dir(store.faces_dir())
        .with_context(|| format!("reading {}", store.faces_dir().display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut gallery = Gallery::new();
    let mut skipped = 0usize;

    for path in &paths {
        match encode_first_face(&mut analyzer, path) {
            Ok(Some(encoding)) => {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                let name = entry_name_from_stem(stem).to_string();
                println!("added: {name} ({})", file_name(path));
                gallery.push(GalleryEntry::new(name, encoding));
            }
            Ok(None) => {
                println!("skipped: no face detected in {}", file_name(path));
                skipped += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "image unusable");
                println!("skipped: {} ({e})", file_name(path));
                skipped += 1;
            }
        }
    }

    let total = gallery.len();
    store
        .replace(gallery)
        .context("writing the rebuilt gallery")?;

    println!("gallery rebuilt: {total} entries, {skipped} skipped");
    Ok(())
}

/// Load an image, detect, and encode its first face (if any).
fn encode_first_face(analyzer: &mut FaceAnalyzer, path: &Path) -> Result<Option<Encoding>> {
    let gray = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_luma8();
    let (width, height) = gray.dimensions();

    let faces = analyzer
        .analyze(gray.as_raw(), width, height)
        .with_context(|| format!("analyzing {}", path.display()))?;

    Ok(faces.into_iter().next().map(|face| face.encoding))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
