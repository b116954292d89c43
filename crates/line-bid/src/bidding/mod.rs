//! Seniority line bidding: parse pasted bid summaries, award lines in seniority
//! order, and export the outcome.

mod allocator;
pub mod domain;
mod export;
mod layout;
mod normalizer;
mod parser;
pub mod router;

pub use allocator::allocate_lines;
pub use domain::{
    AllocationResult, AllocationSummary, AwardStatus, BidRecord, LINES_UNAVAILABLE_MESSAGE,
    NO_PREFERENCES_MESSAGE,
};
pub use export::{
    csv_content_type, results_to_csv, write_results_csv, ExportError, EXPORT_FILE_NAME,
};
pub use layout::{detect_layout, BidLayout};
pub use parser::{parse_bid_text, parse_bids, BidParseError, ParseErrorKind, ParsedBids};
pub use router::bid_router;

use serde::Serialize;
use tracing::info;

/// Outcome of one end-to-end allocation over pasted text.
#[derive(Debug, Clone, Serialize)]
pub struct BidRun {
    pub layout: BidLayout,
    pub results: Vec<AllocationResult>,
    pub summary: AllocationSummary,
}

/// Parses `text` and allocates lines. Parse failures abort before any award is made.
pub fn process_bid_text(text: &str) -> Result<BidRun, BidParseError> {
    let ParsedBids { layout, records } = parse_bid_text(text)?;
    let results = allocate_lines(&records);
    let summary = AllocationSummary::from_results(&results);

    info!(
        %layout,
        employees = summary.total,
        awarded = summary.awarded,
        unawarded = summary.unawarded,
        "allocated bid lines"
    );

    Ok(BidRun {
        layout,
        results,
        summary,
    })
}
