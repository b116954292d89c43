use super::domain::AllocationResult;
use serde::Serialize;
use std::io::Write;

pub const EXPORT_FILE_NAME: &str = "bid_results.csv";

const HEADERS: [&str; 6] = [
    "Bid Position",
    "Employee ID",
    "Employee Name",
    "Awarded Line",
    "Choice",
    "Message",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct ResultRow<'a> {
    seniority_position: u32,
    employee_id: &'a str,
    employee_name: Option<&'a str>,
    awarded_line: Option<&'a str>,
    choice_position: Option<usize>,
    message: &'a str,
}

impl<'a> From<&'a AllocationResult> for ResultRow<'a> {
    fn from(result: &'a AllocationResult) -> Self {
        Self {
            seniority_position: result.seniority_position,
            employee_id: &result.employee_id,
            employee_name: result.employee_name.as_deref(),
            awarded_line: result.awarded_line.as_deref(),
            choice_position: result.choice_position,
            message: &result.message,
        }
    }
}

pub fn csv_content_type() -> mime::Mime {
    mime::TEXT_CSV_UTF_8
}

/// Writes results as CSV in the order given. The header row is always written.
pub fn write_results_csv<W: Write>(
    writer: W,
    results: &[AllocationResult],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADERS)?;
    for result in results {
        csv_writer.serialize(ResultRow::from(result))?;
    }
    csv_writer.flush()?;

    Ok(())
}

pub fn results_to_csv(results: &[AllocationResult]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_results_csv(&mut buffer, results)?;
    Ok(String::from_utf8(buffer)?)
}
