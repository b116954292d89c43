use super::domain::BidRecord;
use super::layout::{detect_layout, split_cells, split_field, BidLayout, FieldKey};
use super::normalizer::{
    clean_line, is_seniority_shaped, normalize_key, parse_seniority, split_preferences,
    strip_rank_prefix,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Coarse classification used when reporting parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Format,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BidParseError {
    #[error("no recognizable bid layout found")]
    UnrecognizedLayout,
    #[error("no bid records found in {layout} text")]
    NoRecords { layout: BidLayout },
    #[error("missing employee id on line {line}")]
    MissingEmployeeId { line: usize },
    #[error("missing seniority position for employee block starting on line {line}")]
    MissingSeniority { line: usize },
    #[error("invalid seniority position '{value}' on line {line}")]
    InvalidSeniority { line: usize, value: String },
    #[error("duplicate seniority position {seniority} on line {line}")]
    DuplicateSeniority { line: usize, seniority: u32 },
    #[error("duplicate employee id '{employee_id}' on line {line}")]
    DuplicateEmployee { line: usize, employee_id: String },
}

impl BidParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnrecognizedLayout | Self::NoRecords { .. } => ParseErrorKind::Format,
            Self::MissingEmployeeId { .. }
            | Self::MissingSeniority { .. }
            | Self::InvalidSeniority { .. }
            | Self::DuplicateSeniority { .. }
            | Self::DuplicateEmployee { .. } => ParseErrorKind::Validation,
        }
    }
}

/// Records extracted from one pasted batch, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBids {
    pub layout: BidLayout,
    pub records: Vec<BidRecord>,
}

/// Parses pasted bid text, returning records in the order they appear.
pub fn parse_bids(text: &str) -> Result<Vec<BidRecord>, BidParseError> {
    parse_bid_text(text).map(|parsed| parsed.records)
}

pub fn parse_bid_text(text: &str) -> Result<ParsedBids, BidParseError> {
    let layout = detect_layout(text).ok_or(BidParseError::UnrecognizedLayout)?;
    let located = match layout {
        BidLayout::ScheduleSummary => parse_schedule_summary(text)?,
        BidLayout::ViewSummary => parse_view_summary(text)?,
    };

    if located.is_empty() {
        return Err(BidParseError::NoRecords { layout });
    }
    ensure_unique_identity(&located)?;

    debug!(%layout, records = located.len(), "parsed bid text");
    Ok(ParsedBids {
        layout,
        records: located.into_iter().map(|entry| entry.record).collect(),
    })
}

struct LocatedRecord {
    line: usize,
    record: BidRecord,
}

fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    text.lines()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, clean_line(raw)))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn is_title(line: &str) -> bool {
    let normalized = normalize_key(line);
    normalized.starts_with("schedule bid summary") || normalized.starts_with("view bid summary")
}

fn parse_schedule_summary(text: &str) -> Result<Vec<LocatedRecord>, BidParseError> {
    let mut records = Vec::new();

    for (line_no, line) in numbered_lines(text) {
        if is_title(&line) {
            continue;
        }

        let cells = split_cells(&line);
        let seniority_cell = cells.first().copied().unwrap_or_default();
        let Some(seniority_position) = parse_seniority(seniority_cell) else {
            let data_row = cells.len() >= 2 && is_seniority_shaped(seniority_cell);
            if records.is_empty() && !data_row {
                trace!(line = line_no, "skipping schedule preamble");
                continue;
            }
            return Err(BidParseError::InvalidSeniority {
                line: line_no,
                value: seniority_cell.to_string(),
            });
        };

        let employee_id = match cells.get(1) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(BidParseError::MissingEmployeeId { line: line_no }),
        };

        let tabbed = line.contains('\t');
        let (employee_name, preference_cells) = if tabbed && cells.len() >= 4 {
            let name = Some(cells[2]).filter(|name| !name.is_empty());
            (name.map(str::to_string), &cells[3..])
        } else {
            (None, &cells[2..])
        };

        let preferences = preference_cells
            .iter()
            .flat_map(|cell| split_preferences(cell))
            .collect();

        records.push(LocatedRecord {
            line: line_no,
            record: BidRecord {
                seniority_position,
                employee_id,
                employee_name,
                preferences,
            },
        });
    }

    Ok(records)
}

#[derive(Default)]
struct BlockBuilder {
    start_line: usize,
    seniority: Option<u32>,
    employee_id: Option<String>,
    employee_name: Option<String>,
    preferences: Vec<String>,
    in_preferences: bool,
}

impl BlockBuilder {
    fn starting_at(line: usize) -> Self {
        Self {
            start_line: line,
            ..Self::default()
        }
    }

    fn finish(self) -> Result<LocatedRecord, BidParseError> {
        let seniority_position = self.seniority.ok_or(BidParseError::MissingSeniority {
            line: self.start_line,
        })?;
        let employee_id = self
            .employee_id
            .filter(|id| !id.is_empty())
            .ok_or(BidParseError::MissingEmployeeId {
                line: self.start_line,
            })?;

        Ok(LocatedRecord {
            line: self.start_line,
            record: BidRecord {
                seniority_position,
                employee_id,
                employee_name: self.employee_name,
                preferences: self.preferences,
            },
        })
    }
}

fn parse_view_summary(text: &str) -> Result<Vec<LocatedRecord>, BidParseError> {
    let mut records = Vec::new();
    let mut current: Option<BlockBuilder> = None;

    for (line_no, line) in numbered_lines(text) {
        if is_title(&line) {
            continue;
        }

        let Some((key, value)) = split_field(&line) else {
            match current.as_mut() {
                Some(block) if block.in_preferences => match preference_entry(&line) {
                    Some(line_id) => block.preferences.push(line_id.to_string()),
                    None => {
                        trace!(line = line_no, "free text closes preference list");
                        block.in_preferences = false;
                    }
                },
                Some(_) => trace!(line = line_no, "ignoring text outside preference list"),
                None => trace!(line = line_no, "skipping view preamble"),
            }
            continue;
        };

        let repeats_identity = current.as_ref().is_some_and(|block| match key {
            FieldKey::Seniority => block.seniority.is_some(),
            FieldKey::EmployeeId => block.employee_id.is_some(),
            FieldKey::Name => block.employee_name.is_some(),
            _ => false,
        });
        let opens_block =
            matches!(key, FieldKey::Seniority | FieldKey::EmployeeId | FieldKey::Name)
                && (current.is_none() || repeats_identity);

        if opens_block {
            if let Some(block) = current.take() {
                records.push(block.finish()?);
            }
            current = Some(BlockBuilder::starting_at(line_no));
        }

        let Some(block) = current.as_mut() else {
            trace!(line = line_no, "skipping view preamble field");
            continue;
        };

        block.in_preferences = false;
        match key {
            FieldKey::Seniority => {
                let position =
                    parse_seniority(value).ok_or_else(|| BidParseError::InvalidSeniority {
                        line: line_no,
                        value: value.to_string(),
                    })?;
                block.seniority = Some(position);
            }
            FieldKey::EmployeeId => {
                let id = value.split_whitespace().next().unwrap_or_default();
                if id.is_empty() {
                    return Err(BidParseError::MissingEmployeeId { line: line_no });
                }
                block.employee_id = Some(id.to_string());
            }
            FieldKey::Name => {
                block.employee_name = Some(value.to_string()).filter(|name| !name.is_empty());
            }
            FieldKey::Preferences => {
                block.preferences.extend(split_preferences(value));
                block.in_preferences = true;
            }
            FieldKey::Other => {}
        }
    }

    if let Some(block) = current.take() {
        records.push(block.finish()?);
    }

    Ok(records)
}

/// A ranked entry yields its first token; an unranked line counts only when it
/// is a bare line id.
fn preference_entry(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let entry = strip_rank_prefix(trimmed);
    let mut tokens = entry.split_whitespace();
    let first = tokens.next()?;
    let ranked = entry.len() < trimmed.len();
    (ranked || tokens.next().is_none()).then_some(first)
}

fn ensure_unique_identity(records: &[LocatedRecord]) -> Result<(), BidParseError> {
    let mut seniorities: HashMap<u32, usize> = HashMap::new();
    let mut employees: HashMap<&str, usize> = HashMap::new();

    for entry in records {
        let record = &entry.record;
        if seniorities
            .insert(record.seniority_position, entry.line)
            .is_some()
        {
            return Err(BidParseError::DuplicateSeniority {
                line: entry.line,
                seniority: record.seniority_position,
            });
        }
        if employees
            .insert(record.employee_id.as_str(), entry.line)
            .is_some()
        {
            return Err(BidParseError::DuplicateEmployee {
                line: entry.line,
                employee_id: record.employee_id.clone(),
            });
        }
    }

    Ok(())
}
