//! Upload policy and file pipeline.
//!
//! Uploads arrive as multipart fields; the field name decides the category.
//! Each category carries its own MIME allow-list, size ceiling, filename
//! prefix, and storage bucket. Validation happens before any bytes touch
//! the disk, so a rejected upload never leaves a partial file behind.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::images::{self, ImageOutcome};

/// Filename of the shared fallback audio asset, under the sounds bucket.
pub const DEFAULT_SOUND_FILE: &str = "default-sound.mp3";

/// Upload category, resolved from the multipart field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Sound,
}

/// Per-category upload constraints.
#[derive(Debug)]
pub struct UploadPolicy {
    /// Acceptable `Content-Type` values.
    pub allowed_types: &'static [&'static str],
    /// Hard ceiling on the upload size in bytes.
    pub max_bytes: usize,
    /// Generated filename prefix, e.g. `item-`.
    pub prefix: &'static str,
    /// Directory under the upload root.
    pub bucket: &'static str,
    /// Message for a disallowed content type.
    pub type_rejection: &'static str,
    /// Message for an oversized upload, distinct from the type message.
    pub size_rejection: &'static str,
}

const IMAGE_POLICY: UploadPolicy = UploadPolicy {
    allowed_types: &["image/jpeg", "image/png", "image/webp"],
    max_bytes: 5 * 1024 * 1024,
    prefix: "item-",
    bucket: "images",
    type_rejection: "Only JPEG, PNG, and WebP images are allowed",
    size_rejection: "Image file too large (5MB max)",
};

const SOUND_POLICY: UploadPolicy = UploadPolicy {
    allowed_types: &["audio/mpeg", "audio/mp3", "audio/wav", "audio/ogg"],
    max_bytes: 2 * 1024 * 1024,
    prefix: "sound-",
    bucket: "sounds",
    type_rejection: "Only MP3, WAV, and OGG audio files are allowed",
    size_rejection: "Audio file too large (2MB max)",
};

impl UploadKind {
    /// Resolve the category from a multipart field name.
    pub fn from_field(field: &str) -> Result<Self, UploadError> {
        match field {
            "image" => Ok(UploadKind::Image),
            "sound" => Ok(UploadKind::Sound),
            other => Err(UploadError::UnknownField(other.to_string())),
        }
    }

    pub fn policy(&self) -> &'static UploadPolicy {
        match self {
            UploadKind::Image => &IMAGE_POLICY,
            UploadKind::Sound => &SOUND_POLICY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Unexpected file field '{0}'. Only \"image\" and \"sound\" fields are allowed")]
    UnknownField(String),

    #[error("{}", .0.policy().type_rejection)]
    UnsupportedType(UploadKind),

    #[error("{}", .0.policy().size_rejection)]
    TooLarge(UploadKind),

    #[error("Upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Whether the error is the caller's fault (maps to HTTP 400).
    pub fn is_rejection(&self) -> bool {
        !matches!(self, UploadError::Io(_))
    }
}

/// Check an upload's declared content type and size against its policy.
///
/// Type mismatches and size overruns are reported as distinct errors.
pub fn validate(kind: UploadKind, content_type: &str, size: usize) -> Result<(), UploadError> {
    let policy = kind.policy();
    if !policy.allowed_types.contains(&content_type) {
        return Err(UploadError::UnsupportedType(kind));
    }
    if size > policy.max_bytes {
        return Err(UploadError::TooLarge(kind));
    }
    Ok(())
}

/// Generate a collision-resistant stored filename.
///
/// Combines the current time in milliseconds with a random component and
/// preserves the client filename's extension:
/// `item-1724500000000-123456789.png`.
pub fn generate_filename(kind: UploadKind, original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{}{millis}-{random}{ext}", kind.policy().prefix)
}

/// Outcome of persisting one upload.
#[derive(Debug)]
pub struct StoredUpload {
    /// Locator relative to the upload root, e.g. `images/item-...png`.
    pub locator: String,
    /// Image pipeline outcome; `None` for sounds.
    pub image_outcome: Option<ImageOutcome>,
}

/// Filesystem store for uploaded assets.
///
/// Owns the upload root and its `images/` and `sounds/` buckets. Locators
/// handed out (and stored on item records) are paths relative to the root.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the bucket directories if they do not exist yet.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for kind in [UploadKind::Image, UploadKind::Sound] {
            tokio::fs::create_dir_all(self.root.join(kind.policy().bucket)).await?;
        }
        Ok(())
    }

    /// Absolute path backing a stored locator.
    pub fn resolve(&self, locator: &str) -> PathBuf {
        self.root.join(locator)
    }

    /// Path of the shared fallback audio asset.
    pub fn default_sound(&self) -> PathBuf {
        self.root
            .join(SOUND_POLICY.bucket)
            .join(DEFAULT_SOUND_FILE)
    }

    /// Validate, name, and persist one upload; returns the stored locator.
    ///
    /// Images are run through the resize/re-encode pipeline first; when
    /// processing succeeds a `{stem}_thumb.jpg` thumbnail is written next
    /// to the main file. Pipeline failure keeps the original bytes.
    pub async fn save(
        &self,
        kind: UploadKind,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        validate(kind, content_type, bytes.len())?;

        let policy = kind.policy();
        let file_name = generate_filename(kind, original_name);
        let dest = self.root.join(policy.bucket).join(&file_name);

        let image_outcome = match kind {
            UploadKind::Image => {
                let processed = images::process(bytes);
                tokio::fs::write(&dest, &processed.bytes).await?;
                if let Some(thumb) = &processed.thumbnail {
                    tokio::fs::write(thumbnail_path(&dest), thumb).await?;
                }
                Some(processed.outcome)
            }
            UploadKind::Sound => {
                tokio::fs::write(&dest, bytes).await?;
                None
            }
        };

        Ok(StoredUpload {
            locator: format!("{}/{}", policy.bucket, file_name),
            image_outcome,
        })
    }

    /// Remove the file backing a locator. Callers treat failures as
    /// best-effort; an already-missing file surfaces as `NotFound`.
    pub async fn remove(&self, locator: &str) -> std::io::Result<()> {
        tokio::fs::remove_file(self.resolve(locator)).await
    }
}

/// `images/item-123.png` -> `images/item-123_thumb.jpg`
fn thumbnail_path(main: &Path) -> PathBuf {
    let stem = main
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("thumb");
    main.with_file_name(format!("{stem}_thumb.jpg"))
}
