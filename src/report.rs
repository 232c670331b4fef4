//! HTML report rendering.
//!
//! The report is `<pre>` followed by each captured line exactly as given,
//! then `</pre>`. Lines are joined with the empty string: captured lines
//! keep their own terminators, so nothing is inserted between them.
//!
//! Tool output is not HTML-escaped. Angle brackets and ampersands reach
//! the report untouched, matching what existing consumers of these
//! reports already receive.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Opening tag written before the captured lines.
pub const PREFIX: &str = "<pre>";
/// Closing tag written after the captured lines.
pub const SUFFIX: &str = "</pre>";

/// Writes `lines` into `path` wrapped in `<pre>` tags, truncating any
/// existing file.
///
/// Parent directories are not created. When the file cannot be created
/// nothing is written and no file appears; a failure part-way through
/// leaves the partial file in place. The handle is closed on every path.
///
/// # Errors
///
/// Returns [`Error::IoFailure`] if the file cannot be created or written.
pub fn render_report<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let io_failure = |source| Error::IoFailure {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(io_failure)?);
    write_report(&mut out, lines).map_err(io_failure)?;
    out.flush().map_err(io_failure)
}

fn write_report<W: Write, S: AsRef<str>>(out: &mut W, lines: &[S]) -> std::io::Result<()> {
    out.write_all(PREFIX.as_bytes())?;
    for line in lines {
        out.write_all(line.as_ref().as_bytes())?;
    }
    out.write_all(SUFFIX.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(lines: &[&str]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        render_report(&path, lines).unwrap();
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn wraps_lines_in_pre_tags() {
        let content = render_to_string(&["Layer name: roads\n", "Feature Count: 10\n"]);
        assert_eq!(content, "<pre>Layer name: roads\nFeature Count: 10\n</pre>");
    }

    #[test]
    fn lines_are_concatenated_without_separator() {
        let content = render_to_string(&["Layer: roads ", "Feature Count: 10"]);
        assert_eq!(content, "<pre>Layer: roads Feature Count: 10</pre>");
    }

    #[test]
    fn no_lines_renders_empty_block() {
        assert_eq!(render_to_string(&[]), "<pre></pre>");
    }

    #[test]
    fn output_is_not_escaped() {
        let content = render_to_string(&["Name: <roads> & \"paths\"\n"]);
        assert_eq!(content, "<pre>Name: <roads> & \"paths\"\n</pre>");
    }

    #[test]
    fn truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        render_report(&path, &["short\n"]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<pre>short\n</pre>");
    }

    #[test]
    fn missing_parent_directory_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.html");

        let err = render_report(&path, &["line\n"]).unwrap_err();
        assert!(matches!(err, Error::IoFailure { path: ref p, .. } if *p == path));
        assert!(!path.exists());
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.html");
        let second = dir.path().join("b.html");
        let lines = ["INFO: Open of `roads.shp'\n", "Geometry: Line String\n"];

        render_report(&first, &lines).unwrap();
        render_report(&second, &lines).unwrap();
        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }

    struct FailAfter(usize);

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.0 == 0 {
                return Err(std::io::Error::other("disk full"));
            }
            self.0 -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_stops_rendering() {
        let err = write_report(&mut FailAfter(2), &["a", "b", "c"]).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
