//! File-backed gallery store.
//!
//! The gallery lives in `gallery.json` under the data directory; enrolled
//! face crops are archived as PNGs in `known_faces/` next to it. The
//! images are never read back by the matcher — only the bulk rebuild
//! tool consumes them.

use crate::encoding::Encoding;
use crate::gallery::{Gallery, GalleryEntry};
use crate::session::FaceCrop;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

const GALLERY_FILE: &str = "gallery.json";
const FACES_DIR: &str = "known_faces";
const FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("gallery I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("gallery serialization: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("face image write: {0}")]
    Image(#[from] image::ImageError),
    #[error("face crop dimensions do not match its pixel data")]
    BadCrop,
}

/// On-disk gallery layout: versioned list of records.
#[derive(Serialize, Deserialize)]
struct GalleryFile {
    version: u32,
    entries: Vec<GalleryEntry>,
}

#[derive(Serialize)]
struct GalleryFileRef<'a> {
    version: u32,
    entries: &'a [GalleryEntry],
}

/// Owns the persisted gallery and its on-disk locations.
///
/// Mutated only by enrollment (append) and the bulk rebuild (replace),
/// always from the single logical thread of control; every mutation is
/// written through to disk before it is reported successful.
pub struct GalleryStore {
    gallery: Gallery,
    gallery_path: PathBuf,
    faces_dir: PathBuf,
}

impl GalleryStore {
    /// Open the store under `data_dir`, creating the faces directory if
    /// absent and loading any persisted gallery.
    ///
    /// A missing gallery file yields an empty gallery; an unreadable or
    /// corrupt one is logged and also yields an empty gallery. Load
    /// failures never propagate to the caller.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let faces_dir = data_dir.join(FACES_DIR);
        fs::create_dir_all(&faces_dir)?;

        let gallery_path = data_dir.join(GALLERY_FILE);
        let gallery = Self::load(&gallery_path);

        tracing::info!(
            path = %gallery_path.display(),
            entries = gallery.len(),
            "gallery loaded"
        );

        Ok(Self {
            gallery,
            gallery_path,
            faces_dir,
        })
    }

    fn load(path: &Path) -> Gallery {
        if !path.exists() {
            return Gallery::new();
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "gallery unreadable; starting empty");
                return Gallery::new();
            }
        };

        match serde_json::from_str::<GalleryFile>(&raw) {
            Ok(file) if file.version == FORMAT_VERSION => {
                let mut gallery = Gallery::new();
                for entry in file.entries {
                    gallery.push(entry);
                }
                gallery
            }
            Ok(file) => {
                tracing::warn!(
                    path = %path.display(),
                    version = file.version,
                    "unsupported gallery format version; starting empty"
                );
                Gallery::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "gallery corrupt; starting empty");
                Gallery::new()
            }
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Directory holding the archived face crops.
    pub fn faces_dir(&self) -> &Path {
        &self.faces_dir
    }

    /// Enroll one face: archive its crop, append the entry, persist.
    ///
    /// The crop is written as `{name}_{8-hex}.png` (random suffix to
    /// avoid collisions between images of the same person). If either
    /// write fails the in-memory append is rolled back, so memory and
    /// disk never disagree after a reported error.
    pub fn append(
        &mut self,
        name: &str,
        encoding: Encoding,
        crop: &FaceCrop,
    ) -> Result<(), StoreError> {
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        let image_path = self.faces_dir.join(format!("{name}_{suffix}.png"));
        write_crop(&image_path, crop)?;

        self.gallery.push(GalleryEntry::new(name, encoding));

        if let Err(e) = self.save() {
            self.gallery.pop();
            // Best-effort: don't leave an orphan crop for a failed enrollment.
            let _ = fs::remove_file(&image_path);
            return Err(e);
        }

        tracing::info!(name, image = %image_path.display(), "face enrolled");
        Ok(())
    }

    /// Replace the whole gallery and persist it, overwriting any
    /// existing store. Used by the bulk rebuild.
    pub fn replace(&mut self, gallery: Gallery) -> Result<(), StoreError> {
        self.gallery = gallery;
        self.save()
    }

    /// Serialize the gallery and atomically overwrite the persisted
    /// file (temp file in the same directory, then rename).
    pub fn save(&self) -> Result<(), StoreError> {
        let file = GalleryFileRef {
            version: FORMAT_VERSION,
            entries: self.gallery.entries(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.gallery_path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.gallery_path)?;
        Ok(())
    }
}

/// Write a grayscale crop as a PNG.
fn write_crop(path: &Path, crop: &FaceCrop) -> Result<(), StoreError> {
    let img = image::GrayImage::from_raw(crop.width, crop.height, crop.data.clone())
        .ok_or(StoreError::BadCrop)?;
    img.save(path)?;
    Ok(())
}
