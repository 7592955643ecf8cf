//! The three subcommands, callable without a terminal

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use sealink_link::{FileMetadata, MemoryLocation, deserialize_package, fragment_of, parse};
use sealink_logging::{SessionContextGuard, SessionRole};
use sealink_session::{
    DECRYPT_FAILURE_MESSAGE, SelectedFile, SessionConfig, SessionState, ShareError, ShareSession,
};
use tracing::info;
use uuid::Uuid;

/// Name used when a link carries no usable file name
const FALLBACK_FILE_NAME: &str = "download";

/// Encrypt `path` and return the share link
pub fn share(
    path: &Path,
    base_url: &str,
    mime: Option<&str>,
    max_size: u64,
) -> anyhow::Result<String> {
    let size = fs::metadata(path)
        .with_context(|| format!("Cannot read {}", path.display()))?
        .len();

    // Checked before reading so an oversized file is never loaded
    if size > max_size {
        return Err(ShareError::FileTooLarge {
            size,
            limit: max_size,
        }
        .into());
    }

    let bytes = fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
    let mime = mime.map(str::to_string).unwrap_or_else(|| guess_mime(path).to_string());

    let config = SessionConfig::default().with_max_file_size(max_size);
    let mut session = ShareSession::new(config, Arc::new(MemoryLocation::new(base_url)));
    let _ctx = SessionContextGuard::new(session.id(), SessionRole::Sender);

    session.select_file(SelectedFile::new(name, mime, bytes))?;
    let link = session.encrypt_and_share()?;
    Ok(link)
}

/// Decrypt `link` and write the file into `out_dir`, returning its path
///
/// Never overwrites an existing file.
pub fn receive(link: &str, out_dir: &Path) -> anyhow::Result<PathBuf> {
    let mut session = ShareSession::new(SessionConfig::default(), Arc::new(MemoryLocation::new(link)));
    let _ctx = SessionContextGuard::new(session.id(), SessionRole::Receiver);

    if !session.detect_link()? {
        bail!("No share link found");
    }

    let artifact = match (session.state(), session.download()) {
        (SessionState::Ready, Some(artifact)) => artifact,
        _ => bail!("{}", session.failure_message().unwrap_or(DECRYPT_FAILURE_MESSAGE)),
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create {}", out_dir.display()))?;
    let target = out_dir.join(safe_file_name(artifact.file_name()));

    write_new_file(&target, |file| file.write_all(artifact.bytes()))?;

    info!(size = artifact.bytes().len(), kind = %artifact.kind(), "file written");
    session.reset();
    Ok(target)
}

/// Create `target` and fill it with `write`, removing it again if writing fails
///
/// Fails without touching anything when `target` already exists.
pub fn write_new_file(
    target: &Path,
    write: impl FnOnce(&mut fs::File) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .with_context(|| format!("Cannot create {}", target.display()))?;

    if let Err(e) = write(&mut file).and_then(|()| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(target);
        return Err(e).with_context(|| format!("Cannot write {}", target.display()));
    }
    Ok(())
}

/// Read the metadata a link carries, leaving the key untouched
pub fn inspect(link: &str) -> anyhow::Result<FileMetadata> {
    let _ctx = SessionContextGuard::new(Uuid::new_v4(), SessionRole::Inspector);

    let Some(tokens) = parse(fragment_of(link)) else {
        bail!("No share link found");
    };
    let package = deserialize_package(&tokens.package)
        .map_err(|_| anyhow::anyhow!(DECRYPT_FAILURE_MESSAGE))?;
    Ok(package.metadata)
}

/// Reduce a carried file name to a single path component
pub fn safe_file_name(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    match last {
        "" | "." | ".." => FALLBACK_FILE_NAME.to_string(),
        other => other.to_string(),
    }
}

/// MIME type for common extensions, empty when unknown
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_file_name() {
        assert_eq!(safe_file_name("a.txt"), "a.txt");
        assert_eq!(safe_file_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_file_name("C:\\Users\\x\\report.pdf"), "report.pdf");
        assert_eq!(safe_file_name("dir/"), "download");
        assert_eq!(safe_file_name(".."), "download");
        assert_eq!(safe_file_name(""), "download");
    }

    #[test]
    fn test_write_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.txt");

        write_new_file(&target, |f| f.write_all(b"hello")).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"hello");

        // Existing files are left alone
        assert!(write_new_file(&target, |f| f.write_all(b"other")).is_err());
        assert_eq!(fs::read(&target).unwrap(), b"hello");
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("partial.bin");

        let err = write_new_file(&target, |f| {
            f.write_all(b"first half")?;
            Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
        })
        .unwrap_err();

        assert!(err.to_string().contains("Cannot write"));
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("a.txt")), "text/plain");
        assert_eq!(guess_mime(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("archive.zip")), "application/zip");
        assert_eq!(guess_mime(Path::new("noext")), "");
        assert_eq!(guess_mime(Path::new("data.xyz")), "");
    }
}
