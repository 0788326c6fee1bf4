//! CSV header parsing and duplicate detection.

/// Column positions to keep when a header repeats a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPlan {
    /// Header names as written in the file.
    pub columns: Vec<String>,
    /// Indices of the first occurrence of each name, in file order.
    pub keep: Vec<usize>,
}

impl HeaderPlan {
    pub fn new(columns: Vec<String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let keep = columns
            .iter()
            .enumerate()
            .filter(|(_, name)| seen.insert(name.as_str()))
            .map(|(idx, _)| idx)
            .collect();
        Self { columns, keep }
    }

    /// True when at least one name repeats.
    pub fn has_duplicates(&self) -> bool {
        self.keep.len() != self.columns.len()
    }

    /// Names that were dropped because an earlier column had the same name.
    pub fn dropped(&self) -> Vec<&str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.keep.contains(idx))
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

/// Parses a CSV line into fields, handling quoted values.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current.trim().to_string());
    fields
}
