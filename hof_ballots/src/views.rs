//! View models of the tracker.
//!
//! All the structures here are computed from a [`Dashboard`] when they are requested. They hold
//! display-ready values but no styling: the renderers decide how they look.

use log::{debug, info};

use crate::*;

/// The immutable inputs of one rendering session.
#[derive(PartialEq, Debug, Clone)]
pub struct Dashboard {
    pub dataset: ElectionDataset,
    pub meta: DashboardMeta,
    pub rules: DisplayRules,
}

impl Dashboard {
    pub fn new(dataset: ElectionDataset, meta: DashboardMeta, rules: DisplayRules) -> Dashboard {
        info!(
            "Dashboard: {} candidates, {} ballots, threshold {}",
            dataset.candidates.len(),
            dataset.total_voters,
            rules.threshold
        );
        Dashboard {
            dataset,
            meta,
            rules,
        }
    }

    pub fn summary(&self) -> SummaryPanel {
        SummaryPanel::compute(&self.dataset, &self.rules)
    }

    pub fn chart(&self) -> ChartView {
        ChartView::compute(&self.dataset, &self.rules)
    }

    pub fn entries(&self) -> Vec<CandidateEntry> {
        self.dataset
            .candidates
            .iter()
            .map(|c| CandidateEntry::compute(c, self.dataset.total_voters, &self.rules))
            .collect()
    }

    /// Opens the ballot of a voter.
    pub fn ballot(&self, voter: &str) -> VoterBallot {
        VoterBallot::open(voter, &self.dataset.candidates)
    }

    /// All the distinct disclosed voters, in order of first appearance.
    pub fn voters(&self) -> Vec<&str> {
        let mut res: Vec<&str> = Vec::new();
        for c in self.dataset.candidates.iter() {
            for v in c.voter_names() {
                if !res.contains(&v.as_str()) {
                    res.push(v.as_str());
                }
            }
        }
        res
    }

    /// Finds a candidate by exact name, or by id when the key is a number.
    pub fn find_candidate(&self, key: &str) -> Option<&Candidate> {
        let key = key.trim();
        self.dataset
            .candidates
            .iter()
            .find(|c| c.name == key)
            .or_else(|| {
                key.parse::<u32>()
                    .ok()
                    .and_then(|id| self.dataset.candidates.iter().find(|c| c.id == id))
            })
    }

    pub fn threshold_text(&self) -> String {
        format_threshold(self.rules.threshold)
    }
}

/// "75%", or "72.5%" for a fractional threshold.
pub fn format_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 {
        format!("{:.0}%", threshold)
    } else {
        format!("{}%", threshold)
    }
}

// ******** Summary panel *********

#[derive(PartialEq, Debug, Clone)]
pub struct SummaryPanel {
    pub on_track: usize,
    pub candidates: usize,
    /// Absent when there is no candidate.
    pub top_candidate: Option<String>,
    pub threshold: f64,
}

/// One of the four cells of the summary panel.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SummaryCell {
    pub label: &'static str,
    pub value: String,
    /// Accent color of the icon.
    pub accent: &'static str,
}

impl SummaryPanel {
    pub const PLACEHOLDER: &'static str = "—";

    pub fn compute(dataset: &ElectionDataset, rules: &DisplayRules) -> SummaryPanel {
        // An empty roster has no top candidate: do not ask for one.
        let top = if dataset.candidates.is_empty() {
            None
        } else {
            top_candidate(&dataset.candidates).map(|c| c.name.clone())
        };
        SummaryPanel {
            on_track: count_qualifying(&dataset.candidates, dataset.total_voters, rules.threshold),
            candidates: dataset.candidates.len(),
            top_candidate: top,
            threshold: rules.threshold,
        }
    }

    pub fn cells(&self) -> [SummaryCell; 4] {
        [
            SummaryCell {
                label: "On Track",
                value: self.on_track.to_string(),
                accent: "#059669",
            },
            SummaryCell {
                label: "Candidates",
                value: self.candidates.to_string(),
                accent: "#2563EB",
            },
            SummaryCell {
                label: "Top Candidate",
                value: self
                    .top_candidate
                    .clone()
                    .unwrap_or_else(|| Self::PLACEHOLDER.to_string()),
                accent: "#7C3AED",
            },
            SummaryCell {
                label: "Threshold",
                value: format_threshold(self.threshold),
                accent: "#D97706",
            },
        ]
    }
}

// ******** Chart *********

#[derive(PartialEq, Debug, Clone)]
pub struct BarDatum {
    pub id: u32,
    pub name: String,
    pub votes: u64,
    /// Absent when there are no ballots.
    pub percentage: Option<f64>,
    pub color: ColorToken,
}

impl BarDatum {
    /// The label on top of the bar.
    pub fn label(&self) -> String {
        format_percentage(self.percentage)
    }

    /// The two lines of the tooltip.
    pub fn tooltip(&self) -> (String, String) {
        (
            self.name.clone(),
            format!("{} ({} votes)", format_percentage(self.percentage), self.votes),
        )
    }

    /// The height of the bar relative to the y-axis, between 0 and 1.
    pub fn height_fraction(&self) -> f64 {
        match self.percentage {
            Some(p) if p.is_finite() => (p / ChartView::Y_MAX).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ChartView {
    pub bars: Vec<BarDatum>,
    /// Position of the reference line.
    pub threshold: f64,
}

impl ChartView {
    pub const Y_MAX: f64 = 100.0;
    pub const Y_TICKS: [u32; 5] = [0, 25, 50, 75, 100];
    /// Rotation of the candidate names under the bars, in degrees.
    pub const LABEL_ANGLE: i32 = -45;

    pub fn compute(dataset: &ElectionDataset, rules: &DisplayRules) -> ChartView {
        let bars = dataset
            .candidates
            .iter()
            .map(|c| {
                let percentage = vote_share(c, dataset.total_voters);
                BarDatum {
                    id: c.id,
                    name: c.name.clone(),
                    votes: c.votes(),
                    percentage,
                    color: bar_color(percentage.unwrap_or(0.0), rules.threshold),
                }
            })
            .collect();
        ChartView {
            bars,
            threshold: rules.threshold,
        }
    }

    pub fn threshold_label(&self) -> String {
        format!("{} Threshold", format_threshold(self.threshold))
    }

    /// The explanation shown next to the chart title.
    pub fn note(&self) -> String {
        format!(
            "The red dashed line at {} marks the election threshold. Data is from publicly released ballots only.",
            format_threshold(self.threshold)
        )
    }

    pub fn aria_label(&self) -> String {
        format!(
            "Bar Chart showing {} Hall of Fame candidates and their vote percentages.",
            self.bars.len()
        )
    }

    pub fn tick_label(tick: u32) -> String {
        format!("{}%", tick)
    }
}

// ******** Candidate list and cards *********

/// The status badge of a candidate card.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum CardStatus {
    OnTrack,
    Gaining,
    /// Percentage points still missing.
    Needed(f64),
    /// No ballot to compare with.
    Unknown,
}

impl CardStatus {
    pub fn label(&self) -> String {
        match self {
            CardStatus::OnTrack => "On Track".to_string(),
            CardStatus::Gaining => "Gaining".to_string(),
            CardStatus::Needed(x) => format!("{:.1}% needed", round_one_decimal(*x)),
            CardStatus::Unknown => "—".to_string(),
        }
    }
}

/// Everything the list row and the card show for one candidate.
#[derive(PartialEq, Debug, Clone)]
pub struct CandidateEntry {
    pub id: u32,
    pub name: String,
    /// Absent when the voters are not disclosed.
    pub votes: Option<u64>,
    pub percentage: Option<f64>,
    pub qualifies: bool,
    /// "3rd Year on Ballot" material, absent when the tenure is unknown.
    pub ordinal: Option<String>,
    pub color: ColorToken,
    pub status: CardStatus,
    pub voters: Vec<String>,
    pub threshold: f64,
}

impl CandidateEntry {
    /// Strictly above this share, a candidate below the threshold is "Gaining".
    pub const GAINING_ABOVE: f64 = 60.0;

    pub fn compute(candidate: &Candidate, total_voters: u64, rules: &DisplayRules) -> Self {
        let percentage = vote_share(candidate, total_voters);
        let is_elected = percentage
            .map(|p| qualifies(p, rules.threshold))
            .unwrap_or(false);
        let status = match percentage {
            None => CardStatus::Unknown,
            Some(_) if is_elected => CardStatus::OnTrack,
            Some(p) if p > Self::GAINING_ABOVE => CardStatus::Gaining,
            Some(p) => CardStatus::Needed(rules.threshold - p),
        };
        debug!(
            "CandidateEntry: {:?}: percentage {:?} status {:?}",
            candidate.name, percentage, status
        );
        CandidateEntry {
            id: candidate.id,
            name: candidate.name.clone(),
            votes: candidate.voters.as_ref().map(|v| v.len() as u64),
            percentage,
            qualifies: is_elected,
            ordinal: candidate.years_on_ballot.map(ordinal),
            color: bar_color(percentage.unwrap_or(0.0), rules.threshold),
            status,
            voters: candidate.voter_names().to_vec(),
            threshold: rules.threshold,
        }
    }

    pub fn percent_text(&self) -> String {
        format_percentage(self.percentage)
    }

    pub fn votes_text(&self) -> Option<String> {
        self.votes.map(format_votes)
    }

    pub fn tenure_text(&self) -> Option<String> {
        self.ordinal.as_ref().map(|o| format!("{} Year on Ballot", o))
    }

    /// Width of the progress gauge, in percent of the gauge.
    pub fn progress_width(&self) -> f64 {
        match self.percentage {
            Some(p) if p.is_finite() => p.clamp(0.0, 100.0),
            _ => 0.0,
        }
    }

    /// The disclosure control only exists when there is someone to show.
    pub fn can_disclose(&self) -> bool {
        !self.voters.is_empty()
    }

    pub fn list_voters_header(&self) -> String {
        format!("Voters ({})", self.voters.len())
    }

    pub fn card_voters_header(&self) -> String {
        format!("Public ballot voters ({})", self.voters.len())
    }
}

/// The disclosure state of one list or card view: at most one candidate is expanded.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Disclosure {
    expanded: Option<String>,
}

impl Disclosure {
    pub fn new() -> Disclosure {
        Disclosure { expanded: None }
    }

    /// Collapses the candidate if it is expanded, otherwise expands it and collapses the other one.
    ///
    /// Returns whether the candidate is expanded after the toggle.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.is_expanded(name) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(name.to_string());
            true
        }
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.as_deref() == Some(name)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }
}

// ******** Voter ballot *********

/// The content of the voter overlay. It is computed when opened and dropped when closed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoterBallot {
    pub voter: String,
    pub candidates: Vec<String>,
}

impl VoterBallot {
    pub fn open(voter: &str, candidates: &[Candidate]) -> VoterBallot {
        let ballot: Vec<String> = ballot_of(voter, candidates)
            .iter()
            .map(|c| c.name.clone())
            .collect();
        debug!("VoterBallot::open: {:?} -> {:?}", voter, ballot);
        VoterBallot {
            voter: voter.to_string(),
            candidates: ballot,
        }
    }

    pub fn title(&self) -> String {
        format!("{}'s Ballot", self.voter)
    }

    /// "(3) votes", "(1) vote".
    pub fn description(&self) -> String {
        let n = self.candidates.len();
        format!("({}) vote{}", n, if n != 1 { "s" } else { "" })
    }
}

/// The interactive state of the page: one disclosure per view and the open ballot, if any.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ViewState {
    pub list: Disclosure,
    pub cards: Disclosure,
    pub ballot: Option<VoterBallot>,
}

impl ViewState {
    pub fn new() -> ViewState {
        ViewState::default()
    }

    pub fn open_ballot(&mut self, dashboard: &Dashboard, voter: &str) -> &VoterBallot {
        self.ballot.insert(dashboard.ballot(voter))
    }

    pub fn close_ballot(&mut self) {
        self.ballot = None;
    }
}
