//! # Status page parser.
//!
//! Turns the portal's HTML status page into a [`SessionSnapshot`]. The page
//! renders the session as a two-column table (label, value); the values are
//! read positionally from the first six innermost rows that carry at least
//! two cells:
//!
//! ```text
//! row 1  username
//! row 2  ip address
//! row 3  session time
//! row 4  time left
//! row 5  bytes up     ("12.5 MiB")
//! row 6  bytes down
//! ```
//!
//! Pure function, no I/O. Tags inside a cell are stripped, the common HTML
//! entities are decoded, and surrounding whitespace is trimmed.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::model::{ByteSize, SessionSnapshot};

static ROW_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<tr\b").expect("static regex"));
static ROW_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</tr\s*>").expect("static regex"));
static CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>").expect("static regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

const FIELDS: [&str; 6] = [
    "username",
    "ip address",
    "session time",
    "time left",
    "bytes up",
    "bytes down",
];

/// Parses the status page body.
///
/// Fails with [`ParseError::MissingField`] when the table is shorter than six
/// value rows and with [`ParseError::EmptyTimeLeft`] when the page rendered
/// without a time-left value.
pub fn parse_status_page(html: &str) -> Result<SessionSnapshot, ParseError> {
    let values = value_cells(html);
    let field = |i: usize| {
        values
            .get(i)
            .cloned()
            .ok_or(ParseError::MissingField(FIELDS[i]))
    };

    let snapshot = SessionSnapshot {
        username: field(0)?,
        ip_address: field(1)?,
        session_time: field(2)?,
        time_left: field(3)?,
        bytes_up: ByteSize::parse(&field(4)?),
        bytes_down: ByteSize::parse(&field(5)?),
    };
    if !snapshot.is_valid() {
        return Err(ParseError::EmptyTimeLeft);
    }
    Ok(snapshot)
}

/// Second-cell text of every innermost row that has at least two cells.
fn value_cells(html: &str) -> Vec<String> {
    // Splitting on `<tr` leaves each segment free of nested rows, so the
    // segments that close a row are exactly the innermost ones.
    ROW_START
        .split(html)
        .skip(1)
        .filter_map(|segment| {
            let row = ROW_END.split(segment).next().unwrap_or(segment);
            CELL.captures_iter(row)
                .nth(1)
                .and_then(|caps| caps.get(1))
                .map(|cell| cell_text(cell.as_str()))
        })
        .take(FIELDS.len())
        .collect()
}

fn cell_text(raw: &str) -> String {
    let text = TAG.replace_all(raw, "");
    decode_entities(text.trim())
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(label, value)| format!("<tr>\n  <td class=\"l\">{label}</td>\n  <td>{value}</td>\n</tr>\n"))
            .collect();
        format!(
            "<html><body><div class=\"limiter\"><div><div>\
             <form><input name=\"x\"></form>\
             <form><table><tbody><tr><td><table><tbody>{body}</tbody></table></td></tr></tbody></table></form>\
             </div></div></div></body></html>"
        )
    }

    fn full_rows() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Username", "alice"),
            ("IP Address", "<b>10.0.0.7</b>"),
            ("Session Time", "01:02:03"),
            ("Time Left", " 5 days &amp; 2 hours "),
            ("Bytes Up", "1536 KiB"),
            ("Bytes Down", "2 GiB"),
        ]
    }

    #[test]
    fn parses_nested_status_table() {
        let snapshot = parse_status_page(&page(&full_rows())).unwrap();
        assert_eq!(snapshot.username, "alice");
        assert_eq!(snapshot.ip_address, "10.0.0.7");
        assert_eq!(snapshot.session_time, "01:02:03");
        assert_eq!(snapshot.time_left, "5 days & 2 hours");
        assert_eq!(snapshot.bytes_up.to_string(), "1.5 MiB");
        assert_eq!(snapshot.bytes_down.bytes(), 2 << 30);
    }

    #[test]
    fn empty_time_left_is_invalid() {
        let mut rows = full_rows();
        rows[3] = ("Time Left", "   ");
        assert!(matches!(
            parse_status_page(&page(&rows)),
            Err(ParseError::EmptyTimeLeft)
        ));
    }

    #[test]
    fn short_table_reports_missing_field() {
        let rows = &full_rows()[..4];
        assert!(matches!(
            parse_status_page(&page(rows)),
            Err(ParseError::MissingField("bytes up"))
        ));
    }

    #[test]
    fn unrelated_page_fails() {
        let err = parse_status_page("<html><body><h1>Login</h1></body></html>").unwrap_err();
        assert!(matches!(err, ParseError::MissingField("username")));
    }

    #[test]
    fn garbled_byte_counts_parse_to_zero() {
        let mut rows = full_rows();
        rows[4] = ("Bytes Up", "n/a");
        let snapshot = parse_status_page(&page(&rows)).unwrap();
        assert_eq!(snapshot.bytes_up, ByteSize::ZERO);
    }
}
