use super::normalizer::{clean_line, is_seniority_shaped, normalize_key};
use serde::Serialize;
use std::fmt;

/// The two pasted layouts the crew portal produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BidLayout {
    /// One row per employee: seniority, id, optional name, delimited preference list.
    ScheduleSummary,
    /// Multi-line employee blocks with one preference per line.
    ViewSummary,
}

impl BidLayout {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ScheduleSummary => "Schedule Bid Summary",
            Self::ViewSummary => "View Bid Summary",
        }
    }

    fn from_title(normalized: &str) -> Option<Self> {
        if normalized.starts_with("view bid summary") {
            Some(Self::ViewSummary)
        } else if normalized.starts_with("schedule bid summary") {
            Some(Self::ScheduleSummary)
        } else {
            None
        }
    }
}

impl fmt::Display for BidLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field keys recognised inside View Bid Summary blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKey {
    Seniority,
    EmployeeId,
    Name,
    Preferences,
    Other,
}

impl FieldKey {
    fn from_normalized(key: &str) -> Self {
        match key {
            "seniority" | "seniority position" | "seniority number" | "bid position"
            | "position" => Self::Seniority,
            "employee id" | "employee" | "emp id" | "employee number" | "id" => Self::EmployeeId,
            "name" | "employee name" => Self::Name,
            "preferences" | "preferred lines" | "line preferences" | "lines" | "bids" => {
                Self::Preferences
            }
            _ => Self::Other,
        }
    }
}

/// Splits a `key: value` line. Keys containing digits are rank markers, not fields.
pub(crate) fn split_field(line: &str) -> Option<(FieldKey, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = normalize_key(key);
    if key.is_empty() || key.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((FieldKey::from_normalized(&key), value.trim()))
}

/// Splits a schedule row into cells: tab-separated when tabs are present,
/// whitespace-separated otherwise.
pub(crate) fn split_cells(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.trim_start().split('\t').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Picks the layout of a pasted bid export.
///
/// A title line wins outright. Without one, a `Seniority:` field holding a number
/// marks the view layout and a row opening with a number marks the schedule layout.
pub fn detect_layout(text: &str) -> Option<BidLayout> {
    let lines: Vec<String> = text
        .lines()
        .map(clean_line)
        .filter(|line| !line.trim().is_empty())
        .collect();

    if let Some(layout) = lines
        .iter()
        .find_map(|line| BidLayout::from_title(&normalize_key(line)))
    {
        return Some(layout);
    }

    let has_block = lines.iter().any(|line| {
        matches!(
            split_field(line),
            Some((FieldKey::Seniority, value)) if is_seniority_shaped(value)
        )
    });
    if has_block {
        return Some(BidLayout::ViewSummary);
    }

    let has_row = lines.iter().any(|line| {
        let cells = split_cells(line);
        cells.len() >= 2 && is_seniority_shaped(cells[0])
    });
    if has_row {
        return Some(BidLayout::ScheduleSummary);
    }

    None
}
