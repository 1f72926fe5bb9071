use crate::domain::model::{InputSource, RawInput};
use crate::utils::error::{Result, StatsError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn resolve(source: &InputSource) -> Result<RawInput> {
    match source {
        InputSource::Inline(text) => Ok(RawInput::new(text.clone())),
        InputSource::File(path) => read_first_line(path),
    }
}

/// Only the first line counts; the rest of the file is never read.
pub fn read_first_line(path: &Path) -> Result<RawInput> {
    let io_error = |source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(io_error)?;

    if read == 0 {
        return Err(StatsError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    // a line ends at `\n`, `\r\n` or a lone `\r`
    if let Some(end) = line.find(&['\r', '\n'][..]) {
        line.truncate(end);
    }

    tracing::debug!("Read {} bytes from {}", read, path.display());
    Ok(RawInput::new(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_inline_value_is_used_verbatim() {
        let raw = resolve(&InputSource::Inline(" 1, 2 ,3 ".to_string())).unwrap();
        assert_eq!(raw.as_str(), " 1, 2 ,3 ");
    }

    #[test]
    fn test_file_uses_first_line_only() {
        let file = file_with("1,2,3\n4,5,6\n");
        let raw = resolve(&InputSource::File(file.path().to_path_buf())).unwrap();
        assert_eq!(raw.as_str(), "1,2,3");
    }

    #[test]
    fn test_crlf_and_missing_newline() {
        let crlf = file_with("7,8\r\nignored");
        assert_eq!(read_first_line(crlf.path()).unwrap().as_str(), "7,8");

        let bare = file_with("9");
        assert_eq!(read_first_line(bare.path()).unwrap().as_str(), "9");
    }

    #[test]
    fn test_lone_carriage_return_ends_first_line() {
        let file = file_with("1,2\r3,4");
        assert_eq!(read_first_line(file.path()).unwrap().as_str(), "1,2");

        let trailing = file_with("5,6\r");
        assert_eq!(read_first_line(trailing.path()).unwrap().as_str(), "5,6");
    }

    #[test]
    fn test_empty_file_is_empty_input() {
        let file = file_with("");
        let err = read_first_line(file.path()).unwrap_err();
        assert!(matches!(err, StatsError::EmptyInput { .. }));
    }

    #[test]
    fn test_blank_first_line_is_passed_through() {
        let file = file_with("\n1,2\n");
        assert_eq!(read_first_line(file.path()).unwrap().as_str(), "");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");
        let err = read_first_line(&path).unwrap_err();
        match err {
            StatsError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
