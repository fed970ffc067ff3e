use crate::event::Event;

/// Download name handed to the file-saving collaborator.
pub const EXPORT_FILE_NAME: &str = "request-data.csv";

const CSV_HEADER: &str = "Endpoint,Time,Requests";

/// Serializes the filtered set as CSV: header first, one row per event,
/// rows joined with `\n` and no trailing newline.
///
/// Always receives the whole filtered subset, never a page. Endpoint names
/// containing commas are not escaped; route names are assumed plain.
pub fn to_csv(filtered: &[Event]) -> String {
    let mut lines = Vec::with_capacity(filtered.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for event in filtered {
        lines.push(format!(
            "{},{},{}",
            event.endpoint,
            event.timestamp_text(),
            event.count
        ));
    }
    lines.join("\n")
}

/// CSV payload plus the download name expected by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub file_name: &'static str,
    pub body: String,
}

impl CsvDocument {
    /// Builds the export document for a filtered set.
    pub fn render(filtered: &[Event]) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            body: to_csv(filtered),
        }
    }

    /// Number of lines including the header.
    pub fn line_count(&self) -> usize {
        self.body.lines().count()
    }

    /// Bytes for the octet-stream handoff.
    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }
}
