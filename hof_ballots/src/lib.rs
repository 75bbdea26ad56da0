/*!
Aggregates and view models for a public Hall of Fame ballot tracker.

The dataset is a list of candidates, each with the publicly disclosed voters who selected them,
and the size of the full ballot pool. Everything displayed by the tracker is derived from it with
the free functions of this crate. Nothing is cached on the dataset: the percentages, colors and
rankings are computed again for every rendering.

```
use hof_ballots::builder::Builder;
use hof_ballots::*;

let mut builder = Builder::new(400)
    .candidate(1, "Ichiro Suzuki", Some(1))?
    .candidate(2, "CC Sabathia", Some(1))?;
for voter in ["A", "B", "C"] {
    builder.add_voter("Ichiro Suzuki", voter)?;
}
builder.add_voter("CC Sabathia", "A")?;
let dataset = builder.build();

let top = top_candidate(&dataset.candidates).map(|c| c.name.as_str());
assert_eq!(top, Some("Ichiro Suzuki"));
assert_eq!(count_qualifying(&dataset.candidates, dataset.total_voters, 75.0), 0);
# Ok::<(), DashboardErrors>(())
```
*/
mod config;
pub mod builder;
pub mod manual;
pub mod views;

use log::debug;

pub use crate::config::*;

/// The share of the ballot pool that selected this candidate, in percent.
///
/// This is the raw formula: the result is not finite when `total_voters` is zero.
/// Views should use [`vote_share`] instead.
pub fn percentage_of(candidate: &Candidate, total_voters: u64) -> f64 {
    (candidate.votes() as f64 / total_voters as f64) * 100.0
}

/// The share of the ballot pool that selected this candidate, or `None` if there are no ballots.
pub fn vote_share(candidate: &Candidate, total_voters: u64) -> Option<f64> {
    if total_voters == 0 {
        None
    } else {
        Some(percentage_of(candidate, total_voters))
    }
}

pub fn qualifies(percentage: f64, threshold: f64) -> bool {
    percentage >= threshold
}

/// The number of candidates at or above the threshold.
pub fn count_qualifying(candidates: &[Candidate], total_voters: u64, threshold: f64) -> usize {
    if total_voters == 0 {
        // Every share is undefined, nobody qualifies.
        return 0;
    }
    candidates
        .iter()
        .filter(|c| qualifies(percentage_of(c, total_voters), threshold))
        .count()
}

/// The candidate with the most disclosed votes. Ties go to the first one in list order.
///
/// Returns `None` for an empty list.
pub fn top_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for c in candidates.iter() {
        match best {
            Some(b) if b.votes() >= c.votes() => {}
            _ => best = Some(c),
        }
    }
    debug!("top_candidate: {:?}", best.map(|c| &c.name));
    best
}

/// The English ordinal suffix of a number.
///
/// All the numbers from 4 to 20 take "th". The others follow their last digit, which means that
/// 111 is written "111st".
pub fn ordinal_suffix(n: u32) -> &'static str {
    if n > 3 && n < 21 {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn ordinal(n: u32) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

/// The color band of a percentage. The bands are half-open: a value on a boundary belongs to the
/// band above it.
pub fn bar_color(percentage: f64, threshold: f64) -> ColorToken {
    if percentage >= threshold {
        ColorToken::Elected
    } else if percentage >= 60.0 {
        ColorToken::Sky
    } else if percentage >= 40.0 {
        ColorToken::Indigo
    } else if percentage >= 20.0 {
        ColorToken::Violet
    } else {
        ColorToken::Neutral
    }
}

/// All the candidates selected by a voter, in candidate order.
///
/// The voter name must match exactly. A candidate appears once even if the voter is listed twice
/// for it.
pub fn ballot_of<'a>(voter_name: &str, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| c.voter_names().iter().any(|v| v == voter_name))
        .collect()
}

/// Rounds to one decimal. Halfway values go up: 0.25 becomes 0.3, not 0.2.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Formats a percentage with one decimal, or a dash when it is not defined.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) if p.is_finite() => format!("{:.1}%", round_one_decimal(p)),
        _ => "—".to_string(),
    }
}

/// "1 vote", "2 votes".
pub fn format_votes(count: u64) -> String {
    format!("{} vote{}", count, if count != 1 { "s" } else { "" })
}
