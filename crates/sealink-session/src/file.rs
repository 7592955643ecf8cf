//! Files going into and coming out of a share

use std::fmt;

use sealink_link::FileMetadata;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A file picked by the sender, held in memory
///
/// The plaintext is wiped when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Wrap file content with its name and MIME type
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Metadata carried in the share link
    pub fn metadata(&self) -> FileMetadata {
        FileMetadata::new(self.name.clone(), self.mime_type.clone(), self.size())
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Decrypted file ready to hand to a download sink
///
/// The plaintext is wiped when the value is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DownloadArtifact {
    #[zeroize(skip)]
    metadata: FileMetadata,
    bytes: Vec<u8>,
}

impl DownloadArtifact {
    pub fn new(metadata: FileMetadata, bytes: Vec<u8>) -> Self {
        Self { metadata, bytes }
    }

    /// Metadata as carried by the link (not authenticated)
    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// Suggested file name for the download
    pub fn file_name(&self) -> &str {
        &self.metadata.name
    }

    pub fn mime_type(&self) -> &str {
        &self.metadata.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.metadata.mime_type)
    }
}

impl fmt::Debug for DownloadArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadArtifact")
            .field("metadata", &self.metadata)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Broad category of a file, for picking an icon or label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Archive,
    Other,
}

impl FileKind {
    /// Classify a MIME type
    pub fn from_mime(mime_type: &str) -> Self {
        let mime_type = mime_type.to_ascii_lowercase();
        if mime_type.starts_with("image/") {
            FileKind::Image
        } else if mime_type.starts_with("video/") {
            FileKind::Video
        } else if mime_type.starts_with("audio/") {
            FileKind::Audio
        } else if mime_type.contains("pdf") {
            FileKind::Pdf
        } else if mime_type.contains("zip") {
            FileKind::Archive
        } else {
            FileKind::Other
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Image => write!(f, "image"),
            FileKind::Video => write!(f, "video"),
            FileKind::Audio => write!(f, "audio"),
            FileKind::Pdf => write!(f, "pdf"),
            FileKind::Archive => write!(f, "archive"),
            FileKind::Other => write!(f, "file"),
        }
    }
}

/// Human-readable size: `0 B`, `512 B`, `1.5 KB`, `2 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.1}", value);
    let rounded = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{} {}", rounded, UNITS[unit])
}
