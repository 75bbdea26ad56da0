// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A candidate on the ballot, with the publicly disclosed voters who selected them.
///
/// In most cases, it is easier to build the dataset with the [`crate::builder::Builder`].
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Candidate {
    /// Stable identity, also used as the position badge.
    pub id: u32,
    pub name: String,
    /// Only used for display. Absent when the source does not track it.
    pub years_on_ballot: Option<u32>,
    /// The voters, in disclosure order. Absent when the source does not disclose them,
    /// which is different from an empty list of voters.
    pub voters: Option<Vec<String>>,
}

impl Candidate {
    /// The number of disclosed votes. Duplicated names count as distinct ballot entries.
    pub fn votes(&self) -> u64 {
        self.voter_names().len() as u64
    }

    /// The disclosed voters, or an empty slice when they are absent.
    pub fn voter_names(&self) -> &[String] {
        self.voters.as_deref().unwrap_or(&[])
    }

    pub fn has_voters(&self) -> bool {
        !self.voter_names().is_empty()
    }
}

/// The full dataset. It is loaded once and never modified.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ElectionDataset {
    /// Size of the full ballot pool. It may exceed the number of disclosed voters.
    pub total_voters: u64,
    /// Display order is the input order.
    pub candidates: Vec<Candidate>,
}

/// Optional header information attached to the dataset.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct DashboardMeta {
    pub title: Option<String>,
    pub last_updated: Option<String>,
}

impl DashboardMeta {
    pub const DEFAULT_TITLE: &'static str = "Hall of Fame";

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(Self::DEFAULT_TITLE)
    }
}

// ******** Output data structures *********

/// The color bands of the bars, from the elected band down to the lowest one.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ColorToken {
    /// At or above the election threshold.
    Elected,
    Sky,
    Indigo,
    Violet,
    Neutral,
}

impl ColorToken {
    /// Fill used for the bars of the chart.
    pub fn chart_hex(&self) -> &'static str {
        match self {
            ColorToken::Elected => "#059669",
            ColorToken::Sky => "#0EA5E9",
            ColorToken::Indigo => "#6366F1",
            ColorToken::Violet => "#8B5CF6",
            ColorToken::Neutral => "#A1A1AA",
        }
    }

    /// Fill used for the progress bars of the candidate cards.
    pub fn progress_hex(&self) -> &'static str {
        match self {
            ColorToken::Elected => "#10B981",
            ColorToken::Sky => "#0EA5E9",
            ColorToken::Indigo => "#6366F1",
            ColorToken::Violet => "#8B5CF6",
            ColorToken::Neutral => "#94A3B8",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorToken::Elected => "elected",
            ColorToken::Sky => "sky",
            ColorToken::Indigo => "indigo",
            ColorToken::Violet => "violet",
            ColorToken::Neutral => "neutral",
        }
    }
}

/// Errors that prevent the dashboard from being assembled.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DashboardErrors {
    /// Two candidates share the same name, which breaks the lookups by name.
    DuplicateCandidate(String),
    /// Two candidates share the same identity.
    DuplicateId(u32),
    /// A voter was attached to a candidate that is not registered.
    UnknownCandidate(String),
}

impl Error for DashboardErrors {}

impl Display for DashboardErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardErrors::DuplicateCandidate(name) => {
                write!(f, "candidate {:?} appears more than once", name)
            }
            DashboardErrors::DuplicateId(id) => {
                write!(f, "candidate id {} appears more than once", id)
            }
            DashboardErrors::UnknownCandidate(name) => {
                write!(f, "candidate {:?} is not registered", name)
            }
        }
    }
}

// ********* Configuration **********

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct DisplayRules {
    /// The percentage of ballots required for election.
    pub threshold: f64,
}

impl DisplayRules {
    pub const DEFAULT_RULES: DisplayRules = DisplayRules { threshold: 75.0 };
}

impl Default for DisplayRules {
    fn default() -> Self {
        DisplayRules::DEFAULT_RULES
    }
}
