//! Process list parsing.
//!
//! Turns test-case text into [`ProcessRecord`]s. Values are kept as raw
//! text or JSON so that [`validate_records`] can report malformed fields
//! per record instead of the parser rejecting the whole input.
//!
//! # Formats
//!
//! | Format | Detected when | Shape |
//! |--------|---------------|-------|
//! | [`InputFormat::Json`] | text starts with `[` or `{` | array of objects, or `{"processes": [...]}` |
//! | [`InputFormat::Csv`] | `.csv` file or comma in the first line, and a recognizable header | header row, then one row per process |
//! | [`InputFormat::Counted`] | first line is a single integer `n` | `n` rows of `arrival burst [priority]`, ids `P1..Pn` |
//! | [`InputFormat::Standard`] | otherwise | `id arrival burst [priority]` per line |
//!
//! Standard lines may separate fields with whitespace, `,`, `;` or `|`;
//! lines starting with `#` or `//` are comments.
//!
//! # Example
//!
//! ```
//! use u_cpusched::parser::{detect_format, parse_processes, InputFormat};
//!
//! let text = "# id arrival burst priority\nP1 0 5 2\nP2 1 3 1\n";
//! assert_eq!(detect_format(text, None), InputFormat::Standard);
//!
//! let processes = parse_processes(text, None).unwrap();
//! assert_eq!(processes.len(), 2);
//! assert_eq!(processes[1].priority, 1);
//! ```

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::models::{Process, ProcessRecord};
use crate::validation::validate_records;

/// Text that could not be turned into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text looked like JSON but did not parse.
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    /// Valid JSON, but not a process list.
    #[error("JSON must be an array of processes or an object with a 'processes' array")]
    UnexpectedJsonShape,

    /// An element of the process array is not an object.
    #[error("process {} is not a JSON object", .index + 1)]
    NotAnObject {
        /// 0-based position in the array.
        index: usize,
    },
}

/// Recognized input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON array or `{"processes": [...]}`.
    Json,
    /// Comma-separated with a header row.
    Csv,
    /// Process count, then `arrival burst [priority]` rows.
    Counted,
    /// `id arrival burst [priority]` lines.
    Standard,
}

/// Picks the format for `content`. `filename` is only used for its extension.
pub fn detect_format(content: &str, filename: Option<&str>) -> InputFormat {
    let trimmed = content.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return InputFormat::Json;
    }

    let first_line = trimmed.lines().next().unwrap_or_default();
    let csv_name = filename.is_some_and(|f| f.to_ascii_lowercase().ends_with(".csv"));
    if csv_name || first_line.contains(',') {
        let header = first_line.to_ascii_lowercase();
        if ["id", "arrival", "burst"].iter().any(|k| header.contains(k)) {
            return InputFormat::Csv;
        }
    }

    if count_line(trimmed).is_some() {
        return InputFormat::Counted;
    }
    InputFormat::Standard
}

/// Detects the format and parses `content`.
///
/// Counted input that yields no rows is re-read as standard lines.
pub fn parse(content: &str, filename: Option<&str>) -> std::result::Result<Vec<ProcessRecord>, ParseError> {
    let format = detect_format(content, filename);
    let records = match format {
        InputFormat::Json => parse_json(content)?,
        InputFormat::Csv => parse_csv(content),
        InputFormat::Counted => {
            let records = parse_counted(content);
            if records.is_empty() {
                parse_standard(content)
            } else {
                records
            }
        }
        InputFormat::Standard => parse_standard(content),
    };
    debug!(?format, records = records.len(), "parsed process input");
    Ok(records)
}

/// Parses and validates `content` into processes.
///
/// # Errors
/// [`Error::Parse`](crate::error::Error::Parse) for unreadable text,
/// [`Error::Validation`](crate::error::Error::Validation) for bad records.
pub fn parse_processes(content: &str, filename: Option<&str>) -> Result<Vec<Process>> {
    let records = parse(content, filename)?;
    Ok(validate_records(&records)?)
}

/// Parses `id arrival burst [priority]` lines.
///
/// Lines with fewer than three fields are skipped.
pub fn parse_standard(content: &str) -> Vec<ProcessRecord> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .filter_map(|line| {
            let parts: Vec<&str> = line
                .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '|'))
                .filter(|p| !p.is_empty())
                .collect();
            match parts.as_slice() {
                [id, arrival, burst, rest @ ..] => Some(ProcessRecord::from_fields(
                    *id,
                    arrival,
                    burst,
                    rest.first().copied(),
                )),
                _ => None,
            }
        })
        .collect()
}

/// Parses CSV with a header row.
///
/// Columns are matched by substring: `id`/`name`/`process` for the id,
/// `arrival`, `burst`/`execution`/`cpu`, and `priority`. Rows missing an
/// id, arrival or burst cell are skipped.
pub fn parse_csv(content: &str) -> Vec<ProcessRecord> {
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<Column> = header
        .to_ascii_lowercase()
        .split(',')
        .map(|h| Column::from_header(h.trim()))
        .collect();

    lines
        .filter_map(|line| {
            let mut id = None;
            let mut arrival = None;
            let mut burst = None;
            let mut priority = None;
            for (column, value) in columns.iter().zip(line.split(',').map(str::trim)) {
                let cell = Some(value).filter(|v| !v.is_empty());
                match column {
                    Column::Id => id = cell,
                    Column::Arrival => arrival = cell,
                    Column::Burst => burst = cell,
                    Column::Priority => priority = cell,
                    Column::Other => {}
                }
            }
            Some(ProcessRecord::from_fields(id?, arrival?, burst?, priority))
        })
        .collect()
}

/// Parses JSON: an array of process objects or `{"processes": [...]}`.
///
/// Accepts `id`/`name`, `arrivalTime`/`arrival` and
/// `burstTime`/`burst`/`executionTime`. A missing id becomes `P<n>` and a
/// missing arrival becomes 0; a missing burst is left for validation.
pub fn parse_json(content: &str) -> std::result::Result<Vec<ProcessRecord>, ParseError> {
    let data: Value =
        serde_json::from_str(content.trim()).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let items = match &data {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("processes") {
            Some(Value::Array(items)) => items,
            _ => return Err(ParseError::UnexpectedJsonShape),
        },
        _ => return Err(ParseError::UnexpectedJsonShape),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(obj) => Ok(json_record(index, obj)),
            _ => Err(ParseError::NotAnObject { index }),
        })
        .collect()
}

/// Parses the counted format: `n`, then `arrival burst [priority]` rows.
///
/// Returns nothing if the first line is not a count. Ids are assigned by
/// row position, so skipped rows leave gaps.
pub fn parse_counted(content: &str) -> Vec<ProcessRecord> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_comment(l))
        .collect();
    let Some(count) = lines.first().and_then(|l| count_line(l)) else {
        return Vec::new();
    };

    lines
        .iter()
        .enumerate()
        .skip(1)
        .take(count)
        .filter_map(|(row, line)| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [arrival, burst, rest @ ..] => Some(ProcessRecord::from_fields(
                    format!("P{row}"),
                    arrival,
                    burst,
                    rest.first().copied(),
                )),
                _ => None,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Arrival,
    Burst,
    Priority,
    Other,
}

impl Column {
    fn from_header(header: &str) -> Self {
        if ["id", "name", "process"].iter().any(|k| header.contains(k)) {
            Column::Id
        } else if header.contains("arrival") {
            Column::Arrival
        } else if ["burst", "execution", "cpu"].iter().any(|k| header.contains(k)) {
            Column::Burst
        } else if header.contains("priority") {
            Column::Priority
        } else {
            Column::Other
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//")
}

/// The process count, if `text`'s first non-comment line is a lone
/// non-negative integer.
fn count_line(text: &str) -> Option<usize> {
    let first = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !is_comment(l))?;
    let mut tokens = first.split_whitespace();
    let count: usize = tokens.next()?.parse().ok()?;
    tokens.next().is_none().then_some(count)
}

fn json_record(index: usize, obj: &Map<String, Value>) -> ProcessRecord {
    let id = first_present(obj, &["id", "name"])
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("P{}", index + 1));

    ProcessRecord {
        id: Some(id),
        arrival_time: Some(
            first_present(obj, &["arrivalTime", "arrival"])
                .cloned()
                .unwrap_or_else(|| Value::from(0)),
        ),
        burst_time: first_present(obj, &["burstTime", "burst", "executionTime"]).cloned(),
        priority: first_present(obj, &["priority"]).cloned(),
    }
}

/// First non-null value among `keys`.
fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("  [{\"id\":\"P1\"}]", None), InputFormat::Json);
        assert_eq!(detect_format("{\"processes\":[]}", None), InputFormat::Json);
        assert_eq!(detect_format("id,arrival,burst\nP1,0,3", None), InputFormat::Csv);
        assert_eq!(detect_format("3\n0 5\n1 3\n2 8", None), InputFormat::Counted);
        assert_eq!(detect_format("P1 0 5\nP2 1 3", None), InputFormat::Standard);
        // Commas alone are not enough without a header.
        assert_eq!(detect_format("P1,0,5\nP2,1,3", None), InputFormat::Standard);
        assert_eq!(
            detect_format("Process;Arrival;Burst\nP1;0;5", Some("case.CSV")),
            InputFormat::Csv
        );
    }

    #[test]
    fn test_parse_standard_separators_and_comments() {
        let text = "# header\n// note\nP1 0 5\nP2,1,3,2\nP3;2;8\nP4 | 3 | 1\nbroken 1\n";
        let records = parse_standard(text);
        assert_eq!(records.len(), 4);
        assert_eq!(records[1], ProcessRecord::from_fields("P2", "1", "3", Some("2")));
        assert_eq!(records[3], ProcessRecord::from_fields("P4", "3", "1", None));
    }

    #[test]
    fn test_parse_csv_header_mapping() {
        let text = "Process Name, Arrival Time, CPU Burst, Priority\nA,0,4,1\nB,2,,3\nC,1,2,\n";
        let records = parse_csv(text);
        // B has no burst and is skipped; C has an empty priority.
        assert_eq!(
            records,
            vec![
                ProcessRecord::from_fields("A", "0", "4", Some("1")),
                ProcessRecord::from_fields("C", "1", "2", None),
            ]
        );
    }

    #[test]
    fn test_parse_csv_header_only() {
        assert!(parse_csv("id,arrival,burst\n").is_empty());
    }

    #[test]
    fn test_parse_json_aliases_and_defaults() {
        let text = r#"{"processes": [
            {"name": "A", "arrival": 2, "burst": 3},
            {"executionTime": 4, "priority": 1},
            {"id": 7, "arrivalTime": null, "burstTime": "5"}
        ]}"#;
        let records = parse_json(text).unwrap();
        assert_eq!(records[0].id.as_deref(), Some("A"));
        assert_eq!(records[0].arrival_time, Some(Value::from(2)));
        assert_eq!(records[1].id.as_deref(), Some("P2"));
        assert_eq!(records[1].arrival_time, Some(Value::from(0)));
        assert_eq!(records[1].burst_time, Some(Value::from(4)));
        assert_eq!(records[2].id.as_deref(), Some("7"));
        assert_eq!(records[2].arrival_time, Some(Value::from(0)));
    }

    #[test]
    fn test_parse_json_missing_burst_fails_validation() {
        let err = parse_processes(r#"[{"id": "P1", "arrivalTime": 0}]"#, None).unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidBurstTime);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_json_errors() {
        assert!(matches!(parse_json("[1,"), Err(ParseError::InvalidJson(_))));
        assert_eq!(parse_json("{\"jobs\": []}"), Err(ParseError::UnexpectedJsonShape));
        assert_eq!(parse_json("[{}, 3]"), Err(ParseError::NotAnObject { index: 1 }));
        assert!(matches!(
            parse_processes("[1,", None),
            Err(Error::Parse(ParseError::InvalidJson(_)))
        ));
    }

    #[test]
    fn test_parse_counted() {
        let records = parse_counted("3\n0 5 2\n1 3\n2 8\n9 9\n");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], ProcessRecord::from_fields("P1", "0", "5", Some("2")));
        assert_eq!(records[2].id.as_deref(), Some("P3"));
    }

    #[test]
    fn test_counted_with_leading_comments() {
        let text = "# three processes\n// arrival burst\n3\n0 5\n1 3\n# late one\n2 8\n";
        assert_eq!(detect_format(text, None), InputFormat::Counted);

        let processes = parse_processes(text, None).unwrap();
        let ids: Vec<_> = processes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
        assert_eq!(processes[2], Process::new("P3", 2, 8));

        // A comment above standard lines does not turn them into a count.
        assert_eq!(detect_format("# 3\nP1 0 5\n", None), InputFormat::Standard);
    }

    #[test]
    fn test_counted_without_rows_falls_back() {
        // "5" alone is a count with no rows; nothing parses either way.
        assert!(parse("5\n", None).unwrap().is_empty());
        assert_eq!(parse("2\n0 5\n1 3\n", None).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_processes_end_to_end() {
        let csv = "id,arrivalTime,burstTime,priority\nP1,0,5,2\nP2,1,3,1\n";
        let processes = parse_processes(csv, Some("case.csv")).unwrap();
        assert_eq!(processes[0], Process::new("P1", 0, 5).with_priority(2));

        let err = parse_processes("P1 0 x\n", None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = parse_processes("", None).unwrap_err();
        assert!(err.to_string().contains("No valid processes found"));
    }
}
