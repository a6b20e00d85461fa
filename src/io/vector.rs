//! Batch pattern files: one vector, fault or result per line
//!
//! Uses the same test pattern format as Atalanta, with an optional index
//! prefix: `1: 00011101`. A bare line with no `:` is accepted as well, so a
//! plain list of vectors or fault specifications works too.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::Error;

/// Read a batch file of one argument per line (vectors or faults), for the
/// CLI's `-f` option
///
/// Lines may be prefixed with `N: ` (Atalanta-style numbering); the prefix
/// is stripped if present. Blank lines and `#` comments are skipped.
pub fn read_patterns<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Error> {
    let f = File::open(path.as_ref()).map_err(|e| {
        Error::NetlistParse(format!(
            "could not open pattern file {}: {e}",
            path.as_ref().display()
        ))
    })?;
    let mut out = Vec::new();
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line.map_err(|e| {
            Error::NetlistParse(format!("pattern file line {}: {e}", lineno + 1))
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let value = match trimmed.split_once(':') {
            Some((_, rest)) => rest.trim(),
            None => trimmed,
        };
        out.push(value.to_string());
    }
    Ok(out)
}

/// Write a batch of result strings, one per line, numbered Atalanta-style
pub fn write_patterns<W: Write>(w: &mut W, results: &[String]) -> std::io::Result<()> {
    for (i, r) in results.iter().enumerate() {
        writeln!(w, "{}: {}", i + 1, r)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_read_patterns_with_and_without_index() {
        let mut path = std::env::temp_dir();
        path.push(format!("atpg-test-pattern-file-{}.txt", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(b"1: 00011101\n01110000\n# a comment\n\n3: 11X1\n")
                .unwrap();
        }
        let patterns = read_patterns(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(patterns, vec!["00011101", "01110000", "11X1"]);
    }

    #[test]
    fn test_write_patterns() {
        let mut buf = Vec::new();
        write_patterns(&mut buf, &["00".to_string(), "11".to_string()]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1: 00\n2: 11\n");
    }
}
