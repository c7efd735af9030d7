use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Columns an uploaded sheet must carry (any order)
pub const REQUIRED_COLUMNS: [&str; 4] = ["date", "category", "subcategory", "value"];

/// date → category → subcategory → value
pub type ReducedData = BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>;

/// Result of reducing an uploaded CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvSummary {
    /// Data rows accepted into `data`
    pub rows: usize,
    /// Data rows dropped (too few fields or non-numeric value)
    pub skipped_rows: usize,
    pub data: ReducedData,
}

/// Upload errors
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    Empty,
    MissingColumns(Vec<&'static str>),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Empty => write!(f, "No file provided"),
            UploadError::MissingColumns(cols) => {
                write!(f, "CSV header is missing required columns: {}", cols.join(", "))
            }
        }
    }
}

impl std::error::Error for UploadError {}

/// Split one CSV record, honouring double-quoted fields and `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Group rows by date, then category, then subcategory.
///
/// A later row for the same (date, category, subcategory) replaces the earlier
/// value. Blank lines are ignored.
pub fn reduce_csv(text: &str) -> Result<CsvSummary, UploadError> {
    let mut lines = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let header = lines.next().ok_or(UploadError::Empty)?;
    let columns = split_record(header);
    let position = |name: &str| columns.iter().position(|c| c == name);

    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|&name| position(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(UploadError::MissingColumns(missing));
    }

    // Checked above
    let [date_idx, category_idx, subcategory_idx, value_idx] =
        REQUIRED_COLUMNS.map(|name| position(name).unwrap_or_default());

    let mut summary = CsvSummary {
        rows: 0,
        skipped_rows: 0,
        data: BTreeMap::new(),
    };

    for line in lines {
        let fields = split_record(line);
        let field = |idx: usize| fields.get(idx).map(String::as_str);

        let parsed = match (
            field(date_idx),
            field(category_idx),
            field(subcategory_idx),
            field(value_idx).and_then(|v| v.parse::<f64>().ok()),
        ) {
            (Some(date), Some(category), Some(subcategory), Some(value)) => {
                Some((date.to_string(), category.to_string(), subcategory.to_string(), value))
            }
            _ => None,
        };

        match parsed {
            Some((date, category, subcategory, value)) => {
                summary
                    .data
                    .entry(date)
                    .or_default()
                    .entry(category)
                    .or_default()
                    .insert(subcategory, value);
                summary.rows += 1;
            }
            None => summary.skipped_rows += 1,
        }
    }

    Ok(summary)
}
