use std::collections::HashMap;

/// One data line of the source file, keyed by trimmed header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    fields: HashMap<String, String>,
}

impl CsvRow {
    /// Value of `column`, or `None` if the header has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column`, treating an unknown column like an empty cell.
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

/// Parses CSV text whose first non-empty line is the header.
///
/// Quoted fields may contain commas and doubled quotes, but not line breaks:
/// the text is split into lines before any field is examined.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        return Vec::new();
    }

    let header: Vec<&str> = lines[0].split(',').map(str::trim).collect();

    let mut rows = Vec::with_capacity(lines.len() - 1);
    for line in &lines[1..] {
        let cols = split_csv_line(line);
        if cols.is_empty() {
            continue;
        }
        let mut fields = HashMap::with_capacity(header.len());
        for (idx, name) in header.iter().enumerate() {
            let value = cols.get(idx).map(|c| c.trim()).unwrap_or("");
            fields.insert((*name).to_string(), value.to_string());
        }
        rows.push(CsvRow { fields });
    }
    rows
}

/// Splits one line on commas that are outside double quotes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => result.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    result.push(current);
    result
}
