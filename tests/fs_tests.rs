//! Filesystem tests for dualpane
//!
//! These tests cover directory listing, reading files for the viewer and the copy/move/delete
//! operations through the library API.
//!
//! Every test works inside a temporary directory that is removed when the test completes.

use dualpane::core::fileops::{copy_entry, delete_entry, move_entry};
use dualpane::core::formatter::{
    FileContent, HEX_DUMP_LIMIT, MAX_VIEW_SIZE, hex_dump, read_for_view,
};
use dualpane::core::{Formatter, browse_dir};

use rand::{Rng, rng};
use std::fs::{self, File};
use std::io::ErrorKind;
use tempfile::tempdir;

#[test]
fn test_core_empty_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let entries = browse_dir(temp_dir.path())?;

    assert!(entries.is_empty(), "Directory should be empty");
    Ok(())
}

#[test]
fn test_browse_dir_flags_and_sizes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("data.bin"), [0u8; 300])?;
    fs::write(dir.path().join(".hidden"), "x")?;
    fs::create_dir(dir.path().join("sub"))?;

    let entries = browse_dir(dir.path())?;
    assert_eq!(entries.len(), 3);

    let find = |name: &str| entries.iter().find(|e| e.name() == name);
    let data = find("data.bin").ok_or("data.bin missing")?;
    assert_eq!(data.size(), 300);
    assert!(!data.is_dir());
    assert!(data.modified().is_some());

    assert!(find(".hidden").is_some_and(|e| e.is_hidden()));
    assert!(find("sub").is_some_and(|e| e.is_dir()));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_dir_is_browsable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("real"))?;
    fs::write(dir.path().join("target.txt"), "12345")?;
    std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link"))?;
    std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("file_link"))?;

    let entries = browse_dir(dir.path())?;
    let find = |name: &str| entries.iter().find(|e| e.name() == name);
    let link = find("link").ok_or("link missing")?;
    assert!(link.is_dir());

    let file_link = find("file_link").ok_or("file_link missing")?;
    assert!(!file_link.is_dir());
    assert_eq!(file_link.size(), 5);
    Ok(())
}

#[test]
fn test_panel_listing_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["zeta.txt", "Alpha.txt", ".env"] {
        File::create(dir.path().join(name))?;
    }
    fs::create_dir(dir.path().join("src"))?;

    let names = |formatter: Formatter| -> Result<Vec<String>, std::io::Error> {
        Ok(formatter
            .list_dir(dir.path())?
            .iter()
            .map(|e| e.name_str().into_owned())
            .collect())
    };

    assert_eq!(
        names(Formatter::new(true, false, true))?,
        ["..", "src", "Alpha.txt", "zeta.txt"]
    );
    assert_eq!(
        names(Formatter::new(false, true, true))?,
        ["..", ".env", "Alpha.txt", "src", "zeta.txt"]
    );
    Ok(())
}

#[test]
fn test_read_for_view_variants() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let text = dir.path().join("notes.md");
    fs::write(&text, "# Title\nbody\n")?;
    assert_eq!(
        read_for_view(&text)?,
        FileContent::Text("# Title\nbody\n".to_string())
    );

    let binary = dir.path().join("image.bin");
    fs::write(&binary, [0xFFu8, 0xFE, 0x00, 0x41])?;
    assert!(matches!(read_for_view(&binary)?, FileContent::Binary(b) if b.len() == 4));

    let large = dir.path().join("large.log");
    File::create(&large)?.set_len(MAX_VIEW_SIZE + 1)?;
    let err = read_for_view(&large).err().ok_or("large file should fail")?;
    assert_eq!(err.kind(), ErrorKind::FileTooLarge);

    assert!(read_for_view(dir.path()).is_err());
    assert!(read_for_view(&dir.path().join("missing")).is_err());
    Ok(())
}

#[test]
fn test_hex_dump_limit() {
    let mut rng = rng();
    let bytes: Vec<u8> = (0..2000).map(|_| rng.random()).collect();

    let lines = hex_dump(&bytes, HEX_DUMP_LIMIT);
    assert_eq!(lines.len(), HEX_DUMP_LIMIT / 16);
    assert!(lines[0].starts_with("00000000  "));
    assert!(lines[31].starts_with("000001F0  "));
    assert!(lines.iter().all(|l| l.len() == lines[0].len()));
}

#[test]
fn test_copy_then_move_preserves_content() -> Result<(), Box<dyn std::error::Error>> {
    let left = tempdir()?;
    let right = tempdir()?;
    let mut rng = rng();
    let payload: Vec<u8> = (0..4096).map(|_| rng.random()).collect();

    fs::create_dir_all(left.path().join("project/src"))?;
    fs::write(left.path().join("project/src/blob"), &payload)?;

    let copied = copy_entry(&left.path().join("project"), right.path())?;
    assert_eq!(fs::read(copied.join("src/blob"))?, payload);

    fs::remove_dir_all(&copied)?;
    let moved = move_entry(&left.path().join("project"), right.path())?;
    assert!(!left.path().join("project").exists());
    assert_eq!(fs::read(moved.join("src/blob"))?, payload);
    Ok(())
}

#[test]
fn test_delete_file_and_empty_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("old.txt");
    let empty = dir.path().join("empty");
    fs::write(&file, "bye")?;
    fs::create_dir(&empty)?;

    delete_entry(&file, false)?;
    delete_entry(&empty, false)?;
    assert!(browse_dir(dir.path())?.is_empty());

    let err = delete_entry(&file, false).err().ok_or("second delete should fail")?;
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}
