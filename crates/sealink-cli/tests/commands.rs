use std::fs;

use sealink_cli::commands::{inspect, receive, share};
use sealink_link::{build, fragment_of, parse};
use sealink_session::{DECRYPT_FAILURE_MESSAGE, MAX_FILE_SIZE};

const BASE: &str = "https://sealink.example/";

#[test]
fn share_then_receive_writes_identical_file() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let path = src.path().join("a.txt");
    fs::write(&path, b"0123456789").unwrap();

    let link = share(&path, BASE, None, MAX_FILE_SIZE).unwrap();
    assert!(link.starts_with("https://sealink.example/#d="));

    let meta = inspect(&link).unwrap();
    assert_eq!(meta.name, "a.txt");
    assert_eq!(meta.mime_type, "text/plain");
    assert_eq!(meta.size_bytes, 10);

    let written = receive(&link, out.path()).unwrap();
    assert_eq!(written, out.path().join("a.txt"));
    assert_eq!(fs::read(&written).unwrap(), b"0123456789");
}

#[test]
fn explicit_mime_overrides_guess() {
    let src = tempfile::tempdir().unwrap();
    let path = src.path().join("notes.txt");
    fs::write(&path, b"hello").unwrap();

    let link = share(&path, BASE, Some("text/markdown"), MAX_FILE_SIZE).unwrap();
    assert_eq!(inspect(&link).unwrap().mime_type, "text/markdown");
}

#[test]
fn unknown_extension_defaults_to_octet_stream() {
    let src = tempfile::tempdir().unwrap();
    let path = src.path().join("blob.xyz");
    fs::write(&path, [0u8, 1, 2]).unwrap();

    let link = share(&path, BASE, None, MAX_FILE_SIZE).unwrap();
    assert_eq!(inspect(&link).unwrap().mime_type, "application/octet-stream");
}

#[test]
fn oversized_file_is_refused() {
    let src = tempfile::tempdir().unwrap();
    let path = src.path().join("big.bin");
    fs::write(&path, vec![0u8; 65]).unwrap();

    let err = share(&path, BASE, None, 64).unwrap_err();
    assert!(err.to_string().contains("File too large"));
}

#[test]
fn receive_refuses_to_overwrite() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = src.path().join("a.txt");
    fs::write(&path, b"new").unwrap();
    fs::write(out.path().join("a.txt"), b"existing").unwrap();

    let link = share(&path, BASE, None, MAX_FILE_SIZE).unwrap();
    assert!(receive(&link, out.path()).is_err());
    assert_eq!(fs::read(out.path().join("a.txt")).unwrap(), b"existing");
}

#[test]
fn corrupted_link_reports_generic_failure() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = src.path().join("a.txt");
    fs::write(&path, b"0123456789").unwrap();

    let link = share(&path, BASE, None, MAX_FILE_SIZE).unwrap();
    let tokens = parse(fragment_of(&link)).unwrap();
    let wrong_key = build(BASE, &tokens.package, &"A".repeat(43));

    let err = receive(&wrong_key, out.path()).unwrap_err();
    assert_eq!(err.to_string(), DECRYPT_FAILURE_MESSAGE);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn plain_url_is_not_a_share_link() {
    let out = tempfile::tempdir().unwrap();
    assert!(receive(BASE, out.path()).is_err());
    assert!(inspect(BASE).is_err());
}
