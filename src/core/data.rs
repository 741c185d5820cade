//! CSV ingest for the command line front end, with zero-allocation float
//! parsing.

use std::io::{BufRead, BufReader, Read};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseCsvError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("expected {expected} columns, got {got}")]
    BadColumnCount { expected: usize, got: usize },
    #[error("invalid number '{0}'")]
    BadFloat(String),
    #[error("no data rows")]
    Empty,
}

impl ParseCsvError {
    #[inline]
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = b {
        if !first.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    while let [rest @ .., last] = b {
        if !last.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    b
}

/// Replace U+2212 MINUS SIGN with ASCII `-` in place.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

#[inline]
fn parse_f64(bytes: &[u8], line: usize) -> Result<f64, ParseCsvError> {
    lexical_core::parse::<f64>(bytes).map_err(|_| {
        ParseCsvError::new(
            line,
            ParseErrorKind::BadFloat(String::from_utf8_lossy(bytes).into_owned()),
        )
    })
}

// --- Record walker ---
const BUF_CAP: usize = 1 << 16;

/// Feed every data record (comments, blank lines and a non-numeric header
/// skipped) to `f` as trimmed fields.
fn for_each_record<R, F>(src: R, mut f: F) -> Result<usize, ParseCsvError>
where
    R: Read,
    F: FnMut(usize, &[&[u8]]) -> Result<(), ParseCsvError>,
{
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut saw_first = false;
    let mut line_no = 0usize;
    let mut records = 0usize;

    loop {
        buf.clear();
        let n = rdr
            .read_until(b'\n', &mut buf)
            .map_err(|e| ParseCsvError::new(line_no, e.into()))?;
        if n == 0 {
            break;
        }
        line_no += 1;

        if buf.ends_with(b"\n") {
            buf.pop();
        }
        if buf.ends_with(b"\r") {
            buf.pop();
        }

        normalize_unicode_minus(&mut buf);
        let line = trim(&buf);
        if line.is_empty() || line[0] == b'#' {
            continue;
        }

        let fields: Vec<&[u8]> = line.split(|&b| b == b',').map(trim).collect();

        // simple header detection (non-numeric last field)
        if !saw_first {
            saw_first = true;
            if fields
                .last()
                .is_some_and(|last| lexical_core::parse::<f64>(last).is_err())
            {
                continue;
            }
        }

        f(line_no, &fields)?;
        records += 1;
    }
    if records == 0 {
        return Err(ParseCsvError::new(line_no, ParseErrorKind::Empty));
    }
    Ok(records)
}

/// Rectangular numeric table, one `Vec` per record.
pub fn read_numeric<R: Read>(src: R) -> Result<Vec<Vec<f64>>, ParseCsvError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for_each_record(src, |line, fields| {
        let expected = rows.first().map_or(fields.len(), Vec::len);
        if expected != fields.len() {
            return Err(ParseCsvError::new(
                line,
                ParseErrorKind::BadColumnCount {
                    expected,
                    got: fields.len(),
                },
            ));
        }
        rows.push(
            fields
                .iter()
                .map(|f| parse_f64(f, line))
                .collect::<Result<_, _>>()?,
        );
        Ok(())
    })?;
    Ok(rows)
}

/// `label,value` records.
pub fn read_labeled<R: Read>(src: R) -> Result<Vec<(String, f64)>, ParseCsvError> {
    let mut out = Vec::new();
    for_each_record(src, |line, fields| {
        let [label, value] = fields else {
            return Err(ParseCsvError::new(
                line,
                ParseErrorKind::BadColumnCount {
                    expected: 2,
                    got: fields.len(),
                },
            ));
        };
        out.push((
            String::from_utf8_lossy(label).into_owned(),
            parse_f64(value, line)?,
        ));
        Ok(())
    })?;
    Ok(out)
}

/// Transpose records into columns.
#[must_use]
pub fn columns(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let width = rows.first().map_or(0, Vec::len);
    (0..width)
        .map(|c| rows.iter().map(|r| r[c]).collect())
        .collect()
}

/// Open `path` (`-` is stdin) and hand the reader to `parse`.
pub fn from_path<T>(
    path: &str,
    parse: impl FnOnce(Box<dyn Read>) -> Result<T, ParseCsvError>,
) -> Result<T, ParseCsvError> {
    if path == "-" {
        parse(Box::new(std::io::stdin()))
    } else {
        let file =
            std::fs::File::open(path).map_err(|e| ParseCsvError::new(0, ParseErrorKind::Io(e)))?;
        parse(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_table_skips_header_and_comments() {
        let src = "x,y\n# note\n1, 2\n\n3,−4\n";
        let rows = read_numeric(src.as_bytes()).unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, -4.0]]);
        assert_eq!(columns(&rows), vec![vec![1.0, 3.0], vec![2.0, -4.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = read_numeric("1,2\n3\n".as_bytes()).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(
            err.kind,
            ParseErrorKind::BadColumnCount {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn bad_numbers_report_text() {
        let err = read_numeric("1,2\n3,abc\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "line 2: invalid number 'abc'");
    }

    #[test]
    fn labeled_records() {
        let rows = read_labeled("name,count\nfoo,3\nbar baz,4.5\n".as_bytes()).unwrap();
        assert_eq!(rows, vec![("foo".into(), 3.0), ("bar baz".into(), 4.5)]);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = read_numeric("# nothing\n".as_bytes()).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Empty));
    }
}
