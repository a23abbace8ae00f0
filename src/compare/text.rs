use std::fs::File;
use std::io::Read;
use std::path::Path;

const SNIFF_LEN: usize = 8192;

/// Whether `path` holds text that is worth diffing line by line.
///
/// Known source and config extensions are accepted without touching the file;
/// anything else is sniffed: no NUL bytes and valid UTF-8 in the first block.
pub fn is_path_text(path: &Path) -> bool {
    if has_text_name(path) {
        return true;
    }
    match sniff(path) {
        Ok(is_text) => is_text,
        Err(e) => {
            tracing::debug!("Could not sniff {}: {e}", path.display());
            false
        }
    }
}

fn has_text_name(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        matches!(
            ext.to_ascii_lowercase().as_str(),
            "rs" | "py" | "js" | "ts" | "jsx" | "tsx" | "java" | "kt" | "swift"
                | "go" | "c" | "cpp" | "cc" | "h" | "hpp" | "cs" | "php" | "rb"
                | "html" | "htm" | "css" | "scss" | "vue" | "svelte"
                | "json" | "yaml" | "yml" | "toml" | "xml" | "ini" | "conf" | "cfg"
                | "md" | "txt" | "rst" | "tex"
                | "sh" | "bash" | "zsh" | "fish"
                | "sql" | "lock" | "csv" | "log"
        )
    } else if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "makefile" | "dockerfile" | "readme" | "license" | "changelog"
        )
    } else {
        false
    }
}

fn sniff(path: &Path) -> std::io::Result<bool> {
    let mut buf = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut buf)?;
    Ok(looks_like_text(&buf))
}

fn looks_like_text(buf: &[u8]) -> bool {
    if buf.contains(&0) {
        return false;
    }
    match std::str::from_utf8(buf) {
        Ok(_) => true,
        // A multi-byte sequence cut off by the sniff window is still text.
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extension_is_text_without_reading() {
        assert!(is_path_text(Path::new("/does/not/exist/main.rs")));
        assert!(is_path_text(Path::new("Makefile")));
    }

    #[test]
    fn test_sniff_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("notes");
        std::fs::write(&p, "hello\nworld\n").unwrap();
        assert!(is_path_text(&p));
    }

    #[test]
    fn test_sniff_binary() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("blob.bin");
        std::fs::write(&p, [0x89, b'P', b'N', b'G', 0, 1, 2]).unwrap();
        assert!(!is_path_text(&p));
    }

    #[test]
    fn test_truncated_utf8_is_text() {
        // "é" is two bytes; drop the second
        let bytes = "abc\u{e9}".as_bytes();
        assert!(looks_like_text(&bytes[..bytes.len() - 1]));
        assert!(!looks_like_text(&[b'a', 0xff, b'b']));
    }

    #[test]
    fn test_missing_unknown_file_is_not_text() {
        assert!(!is_path_text(Path::new("/does/not/exist/blob")));
    }
}
