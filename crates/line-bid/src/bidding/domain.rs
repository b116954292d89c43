use serde::{Deserialize, Deserializer, Serialize};

/// One employee's ranked bid as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord {
    pub seniority_position: u32,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl BidRecord {
    pub fn new<I, S>(
        seniority_position: u32,
        employee_id: impl Into<String>,
        preferences: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seniority_position,
            employee_id: employee_id.into(),
            employee_name: None,
            preferences: preferences.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.employee_name = Some(name.into());
        self
    }
}

/// Why an employee did or did not receive a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardStatus {
    Awarded { line: String, choice: usize },
    NoPreferences,
    LinesUnavailable,
}

pub const NO_PREFERENCES_MESSAGE: &str =
    "No preferences submitted: no preferred lines available";
pub const LINES_UNAVAILABLE_MESSAGE: &str = "Requested lines no longer available";

impl AwardStatus {
    pub fn message(&self) -> String {
        match self {
            Self::Awarded { line, choice } => format!("Awarded line {line} (choice {choice})"),
            Self::NoPreferences => NO_PREFERENCES_MESSAGE.to_string(),
            Self::LinesUnavailable => LINES_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

/// Fixed-shape outcome for one employee. `choice_position` is 1-based and present
/// exactly when `awarded_line` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    #[serde(alias = "bid_position")]
    pub seniority_position: u32,
    #[serde(deserialize_with = "text_or_number")]
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text_or_number")]
    pub awarded_line: Option<String>,
    #[serde(default)]
    pub choice_position: Option<usize>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

impl AllocationResult {
    pub fn from_status(bid: &BidRecord, status: AwardStatus) -> Self {
        let message = status.message();
        let (awarded_line, choice_position) = match status {
            AwardStatus::Awarded { line, choice } => (Some(line), Some(choice)),
            AwardStatus::NoPreferences | AwardStatus::LinesUnavailable => (None, None),
        };

        Self {
            seniority_position: bid.seniority_position,
            employee_id: bid.employee_id.clone(),
            employee_name: bid.employee_name.clone(),
            awarded_line,
            choice_position,
            message,
        }
    }

    pub fn is_awarded(&self) -> bool {
        self.awarded_line.is_some()
    }
}

/// Roll-up counts for one allocation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllocationSummary {
    pub total: usize,
    pub awarded: usize,
    pub unawarded: usize,
    pub first_choice: usize,
}

impl AllocationSummary {
    pub fn from_results(results: &[AllocationResult]) -> Self {
        let awarded = results.iter().filter(|result| result.is_awarded()).count();
        let first_choice = results
            .iter()
            .filter(|result| result.choice_position == Some(1))
            .count();

        Self {
            total: results.len(),
            awarded,
            unawarded: results.len() - awarded,
            first_choice,
        }
    }
}

// Exported result sets may come back from older clients with numeric ids and lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Integer(number) => number.to_string(),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Scalar>::deserialize(deserializer)?;
    Ok(opt
        .map(String::from)
        .filter(|value| !value.trim().is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
