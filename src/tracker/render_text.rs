// Terminal rendering of the dashboard.

use std::fmt::Write;

use crate::tracker::*;

/// Which candidate layout the text rendering uses.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Layout {
    /// The candidate list.
    Desktop,
    /// The candidate cards.
    Mobile,
}

impl Layout {
    pub fn parse(s: Option<&str>) -> TrackerResult<Layout> {
        match s {
            None | Some("desktop") | Some("list") => Ok(Layout::Desktop),
            Some("mobile") | Some("cards") => Ok(Layout::Mobile),
            Some(x) => UnknownLayoutSnafu { layout: x }.fail(),
        }
    }
}

const CHART_WIDTH: usize = 40;
const GAUGE_WIDTH: usize = 24;

/// Draws a horizontal gauge of `width` cells filled up to `fraction`, with a marker at the
/// threshold.
fn gauge(fraction: f64, threshold: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let marker = ((threshold / ChartView::Y_MAX).clamp(0.0, 1.0) * width as f64).round() as usize;
    let marker = marker.min(width - 1);
    (0..width)
        .map(|i| match (i < filled, i == marker) {
            (true, true) => '+',
            (false, true) => '|',
            (true, false) => '#',
            (false, false) => '.',
        })
        .collect()
}

fn pad(s: &str, width: usize) -> String {
    let n = s.chars().count();
    format!("{}{}", s, " ".repeat(width.saturating_sub(n)))
}

pub fn render_text(dashboard: &Dashboard, state: &ViewState, layout: Layout) -> String {
    let mut out = String::new();
    write_header(&mut out, dashboard);
    write_summary(&mut out, &dashboard.summary());
    write_chart(&mut out, &dashboard.chart());
    let entries = dashboard.entries();
    match layout {
        Layout::Desktop => write_list(&mut out, &entries, &state.list),
        Layout::Mobile => write_cards(&mut out, &entries, &state.cards),
    }
    if let Some(ballot) = &state.ballot {
        write_ballot(&mut out, ballot);
    }
    debug!("render_text: {:?} layout, {} bytes", layout, out.len());
    out
}

// Writing to a String cannot fail: the results of writeln! are ignored below.

fn write_header(out: &mut String, d: &Dashboard) {
    let _ = writeln!(out, "BBWA Voting Tracker");
    let _ = writeln!(out, "{}", d.meta.title());
    let _ = writeln!(
        out,
        "Track the latest voting status for MLB Hall of Fame. {} is required for election.",
        d.threshold_text()
    );
    if let Some(last_updated) = &d.meta.last_updated {
        let _ = writeln!(out, "Last updated: {}", last_updated);
    }
    let _ = writeln!(
        out,
        "{} Total Ballots (Only Public Official Results)",
        d.dataset.total_voters
    );
    let _ = writeln!(out);
}

fn write_summary(out: &mut String, summary: &SummaryPanel) {
    let cells: Vec<String> = summary
        .cells()
        .iter()
        .map(|c| format!("{}: {}", c.label, c.value))
        .collect();
    let _ = writeln!(out, "{}", cells.join(" | "));
    let _ = writeln!(out);
}

fn write_chart(out: &mut String, chart: &ChartView) {
    let _ = writeln!(out, "Current Voting Percentages");
    let _ = writeln!(out, "{}", chart.note());
    let name_width = chart
        .bars
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0);
    for bar in chart.bars.iter() {
        let _ = writeln!(
            out,
            "  {} [{}] {:>7}",
            pad(&bar.name, name_width),
            gauge(bar.height_fraction(), chart.threshold, CHART_WIDTH),
            bar.label()
        );
    }
    let marker = ((chart.threshold / ChartView::Y_MAX).clamp(0.0, 1.0) * CHART_WIDTH as f64)
        .round() as usize;
    let _ = writeln!(
        out,
        "  {} {}^ {}",
        " ".repeat(name_width),
        " ".repeat(marker.min(CHART_WIDTH - 1) + 1),
        chart.threshold_label()
    );
    let _ = writeln!(out);
}

fn write_voter_names(out: &mut String, indent: &str, header: &str, voters: &[String]) {
    let _ = writeln!(out, "{}{}", indent, header);
    for v in voters.iter() {
        let _ = writeln!(out, "{}  - {}", indent, v);
    }
}

fn write_list(out: &mut String, entries: &[CandidateEntry], list: &Disclosure) {
    let _ = writeln!(out, "All Candidates");
    let name_width = entries
        .iter()
        .map(|e| e.name.chars().count() + if e.qualifies { 10 } else { 0 })
        .max()
        .unwrap_or(0);
    for e in entries.iter() {
        let name = if e.qualifies {
            format!("{} (Elected)", e.name)
        } else {
            e.name.clone()
        };
        let _ = writeln!(
            out,
            "{:>3}. {} {:>10} {:>7}",
            e.id,
            pad(&name, name_width),
            e.votes_text().unwrap_or_default(),
            e.percent_text()
        );
        if e.can_disclose() {
            if list.is_expanded(&e.name) {
                write_voter_names(
                    out,
                    "     ",
                    &format!("[-] {}", e.list_voters_header()),
                    &e.voters,
                );
            } else {
                let _ = writeln!(out, "     [+] {}", e.list_voters_header());
            }
        }
    }
}

fn write_cards(out: &mut String, entries: &[CandidateEntry], cards: &Disclosure) {
    let _ = writeln!(out, "All Candidates");
    for e in entries.iter() {
        let _ = writeln!(out);
        let marker = if e.qualifies { " *" } else { "" };
        let _ = writeln!(out, "[{}] {}{}  {}", e.id, e.name, marker, e.percent_text());
        if let Some(tenure) = e.tenure_text() {
            let _ = writeln!(out, "    {}", tenure);
        }
        if let Some(votes) = e.votes_text() {
            let _ = writeln!(out, "    {}", votes);
        }
        let _ = writeln!(
            out,
            "    [{}] {}",
            gauge(e.progress_width() / 100.0, e.threshold, GAUGE_WIDTH),
            e.status.label()
        );
        if e.can_disclose() {
            if cards.is_expanded(&e.name) {
                let _ = writeln!(out, "    [-] Public Voters");
                write_voter_names(out, "        ", &e.card_voters_header(), &e.voters);
            } else {
                let _ = writeln!(out, "    [+] Public Voters");
            }
        }
    }
}

fn write_ballot(out: &mut String, ballot: &VoterBallot) {
    let mut lines = vec![ballot.title(), ballot.description()];
    for (i, c) in ballot.candidates.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, c));
    }
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border = format!("+{}+", "-".repeat(width + 2));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", border);
    for (i, l) in lines.iter().enumerate() {
        let _ = writeln!(out, "| {} |", pad(l, width));
        if i == 1 {
            let _ = writeln!(out, "{}", border);
        }
    }
    let _ = writeln!(out, "{}", border);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::tests::hof_2026;

    #[test]
    fn layouts() {
        assert_eq!(Layout::parse(None).unwrap(), Layout::Desktop);
        assert_eq!(Layout::parse(Some("mobile")).unwrap(), Layout::Mobile);
        assert!(matches!(
            Layout::parse(Some("tablet")),
            Err(TrackerError::UnknownLayout { .. })
        ));
    }

    #[test]
    fn gauges() {
        assert_eq!(gauge(0.0, 75.0, 8), "......|.");
        assert_eq!(gauge(1.0, 75.0, 8), "######+#");
        assert_eq!(gauge(0.5, 75.0, 8), "####..|.");
        // The marker stays inside the gauge.
        assert_eq!(gauge(0.0, 100.0, 4), "...|");
    }

    #[test]
    fn header_and_summary() {
        let text = render_text(&hof_2026(), &ViewState::new(), Layout::Desktop);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "BBWA Voting Tracker");
        assert_eq!(lines[1], "2026 Hall of Fame");
        assert_eq!(lines[3], "Last updated: 11/25/2025");
        assert_eq!(lines[4], "12 Total Ballots (Only Public Official Results)");
        assert_eq!(
            lines[6],
            "On Track: 1 | Candidates: 6 | Top Candidate: Carlos Beltran | Threshold: 75%"
        );
        assert!(text.contains("^ 75% Threshold"));
        assert!(text.contains(
            "Current Voting Percentages\nThe red dashed line at 75% marks the election threshold."
        ));
    }

    #[test]
    fn chart_lines_carry_no_vote_count() {
        let text = render_text(&hof_2026(), &ViewState::new(), Layout::Desktop);
        let chart: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "Current Voting Percentages")
            .take_while(|l| !l.is_empty())
            .collect();
        let beltran = chart.iter().find(|l| l.contains("Carlos Beltran")).unwrap();
        assert!(beltran.ends_with("83.3%"));
        // No voters field: the count is unknown, not zero.
        let pedroia = chart.iter().find(|l| l.contains("Dustin Pedroia")).unwrap();
        assert!(pedroia.ends_with("0.0%"));
        assert!(!chart.iter().any(|l| l.contains("vote")));
    }

    #[test]
    fn desktop_list() {
        let d = hof_2026();
        let mut state = ViewState::new();
        state.list.toggle("Felix Hernandez");
        let text = render_text(&d, &state, Layout::Desktop);
        assert!(text.contains("Carlos Beltran (Elected)"));
        assert!(text.contains("[+] Voters (10)"));
        assert!(text.contains("[-] Voters (3)"));
        assert!(text.contains("  - Ben Ode"));
        assert!(!text.contains("Public Voters"));
        // Nobody to show for these two.
        assert_eq!(text.matches("Voters (").count(), 4);
    }

    #[test]
    fn mobile_cards() {
        let d = hof_2026();
        let mut state = ViewState::new();
        state.cards.toggle("Chase Utley");
        // The list disclosure does not show in the cards.
        state.list.toggle("Carlos Beltran");
        let text = render_text(&d, &state, Layout::Mobile);
        assert!(text.contains("[1] Carlos Beltran *  83.3%"));
        assert!(text.contains("    4th Year on Ballot"));
        assert!(text.contains("] On Track"));
        assert!(text.contains("] Gaining"));
        assert!(text.contains("] 33.3% needed"));
        assert!(text.contains("Public ballot voters (5)"));
        assert!(!text.contains("Public ballot voters (10)"));
        assert_eq!(text.matches("[+] Public Voters").count(), 3);
        // No tenure and no vote count when they are absent.
        assert!(text.contains("[6] Dustin Pedroia  0.0%\n    ["));
    }

    #[test]
    fn ballot_box() {
        let d = hof_2026();
        let mut state = ViewState::new();
        state.open_ballot(&d, "Ben Ode");
        let text = render_text(&d, &state, Layout::Desktop);
        assert!(text.contains("| Ben Ode's Ballot   |"));
        assert!(text.contains("| (2) votes          |"));
        assert!(text.contains("| 1. Carlos Beltran  |"));
        assert!(text.contains("| 2. Felix Hernandez |"));
        assert!(text.contains("+--------------------+"));
        state.close_ballot();
        let closed = render_text(&d, &state, Layout::Desktop);
        assert!(!closed.contains("Ben Ode's Ballot"));
    }
}
