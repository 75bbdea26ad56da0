// Self-contained HTML rendering of the dashboard: inline CSS, inline SVG, no script.

use std::collections::HashMap;

use crate::tracker::*;

const PAGE_CSS: &str = "\
*{box-sizing:border-box}\
body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',sans-serif;background:#F8FAFC;color:#0F172A}\
main{max-width:1100px;margin:0 auto;padding:24px 16px}\
header{text-align:center;margin-bottom:24px}\
.eyebrow{text-transform:uppercase;letter-spacing:.1em;font-size:12px;font-weight:600;color:#2563EB;margin:0}\
h1{font-size:32px;margin:8px 0}\
.lede{color:#475569;margin:4px 0}\
.ballots{display:inline-block;margin-top:8px;padding:4px 12px;border-radius:999px;background:#E2E8F0;font-size:14px}\
.summary{display:grid;grid-template-columns:repeat(2,1fr);gap:12px;margin-bottom:24px}\
.cell{background:#FFF;border-radius:12px;padding:12px;box-shadow:0 1px 2px rgba(0,0,0,.08)}\
.cell .icon{display:inline-block;width:10px;height:10px;border-radius:50%;margin-right:6px}\
.cell .label{font-size:12px;color:#64748B}\
.cell .value{font-size:20px;font-weight:700;margin-top:4px}\
section{background:#FFF;border-radius:12px;padding:16px;margin-bottom:24px;box-shadow:0 1px 2px rgba(0,0,0,.08)}\
h2{font-size:18px;margin:0 0 12px}\
.chart svg{width:100%;height:auto}\
.badge{display:inline-flex;align-items:center;justify-content:center;min-width:28px;height:28px;border-radius:50%;background:#E2E8F0;font-weight:600;font-size:13px}\
.elected .badge{background:#D1FAE5;color:#065F46}\
.elected .pct{color:#059669}\
.pct{font-weight:700}\
.votes{color:#64748B;font-size:13px}\
.award{color:#D97706}\
ol.candidates{list-style:none;margin:0;padding:0}\
ol.candidates li{border-bottom:1px solid #E2E8F0}\
.row-head{display:flex;align-items:center;gap:12px;padding:10px 4px}\
.row-head .name{flex:1;font-weight:600}\
summary.row-head{cursor:pointer}\
.voters{padding:0 4px 12px 44px}\
.voters h4{margin:0 0 6px;font-size:13px;color:#475569}\
.voters ul{list-style:none;margin:0;padding:0;display:flex;flex-wrap:wrap;gap:6px}\
.voters a{display:inline-block;padding:2px 8px;border-radius:6px;background:#EFF6FF;color:#1D4ED8;text-decoration:none;font-size:13px}\
.card{border:1px solid #E2E8F0;border-radius:12px;padding:12px;margin-bottom:12px}\
.card.elected{border-color:#6EE7B7}\
.card-head{display:flex;align-items:center;gap:10px}\
.card-head .name{flex:1}\
.card-head h3{margin:0;font-size:16px}\
.tenure{margin:0;font-size:12px;color:#64748B}\
.progress{position:relative;height:8px;border-radius:4px;background:#E2E8F0;margin:24px 0 10px}\
.progress .fill{height:100%;border-radius:4px}\
.progress .marker{position:absolute;top:-3px;width:2px;height:14px;background:#DC2626}\
.progress .marker-label{position:absolute;top:-20px;transform:translateX(-50%);font-size:10px;color:#DC2626}\
.note{margin:-6px 0 12px;font-size:13px;color:#64748B}\
.status{display:inline-block;font-size:12px;padding:2px 8px;border-radius:999px;background:#F1F5F9}\
.status-on-track{background:#D1FAE5;color:#065F46}\
.status-gaining{background:#E0F2FE;color:#075985}\
.card details summary{cursor:pointer;font-size:13px;color:#2563EB;margin-top:8px}\
.card .voters{padding:8px 0 0}\
.overlay{display:none;position:fixed;inset:0;background:rgba(15,23,42,.5);align-items:center;justify-content:center}\
.overlay:target{display:flex}\
.ballot{background:#FFF;border:0;border-radius:12px;padding:16px;min-width:280px;max-width:90vw}\
dialog.ballot{position:fixed;top:50%;left:50%;transform:translate(-50%,-50%);box-shadow:0 0 0 100vmax rgba(15,23,42,.5)}\
.ballot h3{margin:0}\
.ballot p{margin:4px 0 12px;color:#64748B}\
.ballot ol{margin:0;padding-left:20px}\
.close{display:inline-block;margin-top:12px}\
.mobile-only{display:block}\
.desktop-only{display:none}\
@media (min-width:640px){\
.summary{grid-template-columns:repeat(4,1fr)}\
.mobile-only{display:none}\
.desktop-only{display:block}\
}";

/// Escapes the text and attribute values of the document.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(32 * 1024),
        }
    }

    fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Anchors of the ballot overlays, one per distinct disclosed voter.
struct Anchors<'a> {
    ids: HashMap<&'a str, usize>,
}

impl<'a> Anchors<'a> {
    fn new(voters: &[&'a str]) -> Anchors<'a> {
        let ids = voters.iter().enumerate().map(|(i, v)| (*v, i)).collect();
        Anchors { ids }
    }

    fn id(&self, voter: &str) -> Option<String> {
        self.ids.get(voter).map(|i| format!("ballot-{}", i))
    }
}

pub fn render_html(dashboard: &Dashboard, state: &ViewState) -> String {
    let voters = dashboard.voters();
    let anchors = Anchors::new(&voters);
    let entries = dashboard.entries();
    debug!(
        "render_html: {} entries, {} voters, expanded list: {:?} cards: {:?}",
        entries.len(),
        voters.len(),
        state.list.expanded(),
        state.cards.expanded()
    );

    let mut w = Html::new();
    w.push("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    w.push("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    w.push(format!("<title>{}</title>", esc(dashboard.meta.title())));
    w.push("<style>");
    w.push(PAGE_CSS);
    w.push("</style></head><body><main>");

    write_header(&mut w, dashboard);
    write_summary(&mut w, &dashboard.summary());
    write_chart(&mut w, &dashboard.chart());
    write_cards(&mut w, &entries, &state.cards, &anchors);
    write_list(&mut w, &entries, &state.list, &anchors);

    w.push("</main>");
    write_overlays(&mut w, dashboard, &voters);
    if let Some(ballot) = &state.ballot {
        write_open_ballot(&mut w, ballot);
    }
    w.push("</body></html>\n");
    let html = w.finish();
    info!("render_html: {} bytes", html.len());
    html
}

fn write_header(w: &mut Html, d: &Dashboard) {
    w.push("<header>");
    w.push("<p class=\"eyebrow\">BBWA Voting Tracker</p>");
    w.push(format!("<h1>{}</h1>", esc(d.meta.title())));
    w.push(format!(
        "<p class=\"lede\">Track the latest voting status for MLB Hall of Fame. {} is required for election.</p>",
        esc(&d.threshold_text())
    ));
    if let Some(last_updated) = &d.meta.last_updated {
        w.push(format!(
            "<p class=\"lede\">Last updated: {}</p>",
            esc(last_updated)
        ));
    }
    w.push(format!(
        "<p class=\"ballots\">{} Total Ballots (Only Public Official Results)</p>",
        d.dataset.total_voters
    ));
    w.push("</header>");
}

fn write_summary(w: &mut Html, summary: &SummaryPanel) {
    w.push("<div class=\"summary\">");
    for cell in summary.cells().iter() {
        w.push("<div class=\"cell\"><div class=\"label\">");
        w.push(format!(
            "<span class=\"icon\" style=\"background:{}\"></span>",
            cell.accent
        ));
        w.push(esc(cell.label));
        w.push("</div>");
        w.push(format!("<div class=\"value\">{}</div></div>", esc(&cell.value)));
    }
    w.push("</div>");
}

// Geometry of the chart, in SVG user units.
const CHART_LEFT: f64 = 48.0;
const CHART_TOP: f64 = 24.0;
const CHART_HEIGHT: f64 = 240.0;
const CHART_BOTTOM: f64 = 120.0;
const CHART_RIGHT: f64 = 96.0;
const BAR_SLOT: f64 = 64.0;
const BAR_WIDTH: f64 = 40.0;

fn y_of(percentage: f64) -> f64 {
    let p = percentage.clamp(0.0, ChartView::Y_MAX);
    CHART_TOP + CHART_HEIGHT * (1.0 - p / ChartView::Y_MAX)
}

fn write_chart(w: &mut Html, chart: &ChartView) {
    let plot_width = BAR_SLOT * chart.bars.len().max(1) as f64;
    let width = CHART_LEFT + plot_width + CHART_RIGHT;
    let height = CHART_TOP + CHART_HEIGHT + CHART_BOTTOM;
    let right = CHART_LEFT + plot_width;

    w.push("<section class=\"chart desktop-only\"><h2>Current Voting Percentages</h2>");
    w.push(format!("<p class=\"note\">{}</p>", esc(&chart.note())));
    w.push(format!(
        "<svg viewBox=\"0 0 {:.0} {:.0}\" role=\"img\" aria-label=\"{}\">",
        width,
        height,
        esc(&chart.aria_label())
    ));

    // Y axis
    for tick in ChartView::Y_TICKS.iter() {
        let y = y_of(*tick as f64);
        w.push(format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#E2E8F0\"/>",
            CHART_LEFT, y, right, y
        ));
        w.push(format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" dominant-baseline=\"middle\" font-size=\"12\" fill=\"#64748B\">{}</text>",
            CHART_LEFT - 8.0,
            y,
            ChartView::tick_label(*tick)
        ));
    }

    let baseline = y_of(0.0);
    for (i, bar) in chart.bars.iter().enumerate() {
        let x = CHART_LEFT + BAR_SLOT * i as f64 + (BAR_SLOT - BAR_WIDTH) / 2.0;
        let cx = x + BAR_WIDTH / 2.0;
        let h = CHART_HEIGHT * bar.height_fraction();
        let (line1, line2) = bar.tooltip();
        w.push("<g>");
        w.push(format!("<title>{}\n{}</title>", esc(&line1), esc(&line2)));
        w.push(format!(
            "<rect class=\"bar bar-{}\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"4\" fill=\"{}\"/>",
            bar.color.name(),
            x,
            baseline - h,
            BAR_WIDTH,
            h,
            bar.color.chart_hex()
        ));
        w.push(format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" font-weight=\"600\">{}</text>",
            cx,
            baseline - h - 6.0,
            esc(&bar.label())
        ));
        let ly = baseline + 12.0;
        w.push(format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\" transform=\"rotate({} {:.1} {:.1})\">{}</text>",
            cx,
            ly,
            ChartView::LABEL_ANGLE,
            cx,
            ly,
            esc(&bar.name)
        ));
        w.push("</g>");
    }

    let ty = y_of(chart.threshold);
    w.push(format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#DC2626\" stroke-width=\"2\" stroke-dasharray=\"8 4\"/>",
        CHART_LEFT, ty, right, ty
    ));
    w.push(format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" dominant-baseline=\"middle\" font-size=\"12\" fill=\"#DC2626\">{}</text>",
        right + 6.0,
        ty,
        esc(&chart.threshold_label())
    ));
    w.push("</svg></section>");
}

fn write_voters(w: &mut Html, header: &str, voters: &[String], anchors: &Anchors) {
    w.push("<div class=\"voters\">");
    w.push(format!("<h4>{}</h4><ul>", esc(header)));
    for v in voters.iter() {
        match anchors.id(v) {
            Some(id) => w.push(format!("<li><a href=\"#{}\">{}</a></li>", id, esc(v))),
            None => w.push(format!("<li>{}</li>", esc(v))),
        }
    }
    w.push("</ul></div>");
}

fn open_attr(disclosure: &Disclosure, name: &str) -> &'static str {
    if disclosure.is_expanded(name) {
        " open"
    } else {
        ""
    }
}

fn status_class(status: &CardStatus) -> &'static str {
    match status {
        CardStatus::OnTrack => "status-on-track",
        CardStatus::Gaining => "status-gaining",
        CardStatus::Needed(_) => "status-needed",
        CardStatus::Unknown => "status-unknown",
    }
}

fn write_cards(w: &mut Html, entries: &[CandidateEntry], cards: &Disclosure, anchors: &Anchors) {
    w.push("<section class=\"cards mobile-only\"><h2>All Candidates</h2>");
    for e in entries.iter() {
        let elected = if e.qualifies { " elected" } else { "" };
        w.push(format!("<article class=\"card{}\">", elected));
        w.push(format!(
            "<div class=\"card-head\"><span class=\"badge\">{}</span><div class=\"name\"><h3>{}</h3>",
            e.id,
            esc(&e.name)
        ));
        if let Some(tenure) = e.tenure_text() {
            w.push(format!("<p class=\"tenure\">{}</p>", esc(&tenure)));
        }
        w.push(format!(
            "</div><span class=\"pct\">{}</span></div>",
            esc(&e.percent_text())
        ));
        if let Some(votes) = e.votes_text() {
            w.push(format!("<p class=\"votes\">{}</p>", esc(&votes)));
        }
        let marker = e.threshold.clamp(0.0, 100.0);
        w.push(format!(
            "<div class=\"progress\"><div class=\"fill fill-{}\" style=\"width:{:.1}%;background:{}\"></div><div class=\"marker\" style=\"left:{:.1}%\"></div><span class=\"marker-label\" style=\"left:{:.1}%\">{}</span></div>",
            e.color.name(),
            e.progress_width(),
            e.color.progress_hex(),
            marker,
            marker,
            esc(&format_threshold(e.threshold))
        ));
        w.push(format!(
            "<span class=\"status {}\">{}</span>",
            status_class(&e.status),
            esc(&e.status.label())
        ));
        if e.can_disclose() {
            w.push(format!(
                "<details name=\"card-voters\"{}><summary>Public Voters</summary>",
                open_attr(cards, &e.name)
            ));
            write_voters(w, &e.card_voters_header(), &e.voters, anchors);
            w.push("</details>");
        }
        w.push("</article>");
    }
    w.push("</section>");
}

fn write_row_head(w: &mut Html, tag: &str, e: &CandidateEntry) {
    w.push(format!("<{} class=\"row-head\">", tag));
    w.push(format!("<span class=\"badge\">{}</span>", e.id));
    w.push(format!("<span class=\"name\">{}", esc(&e.name)));
    if e.qualifies {
        w.push(" <span class=\"award\" role=\"img\" aria-label=\"Elected\">&#9733;</span>");
    }
    w.push("</span>");
    if let Some(votes) = e.votes_text() {
        w.push(format!("<span class=\"votes\">{}</span>", esc(&votes)));
    }
    w.push(format!(
        "<span class=\"pct\">{}</span></{}>",
        esc(&e.percent_text()),
        tag
    ));
}

fn write_list(w: &mut Html, entries: &[CandidateEntry], list: &Disclosure, anchors: &Anchors) {
    w.push("<section class=\"list desktop-only\"><h2>All Candidates</h2><ol class=\"candidates\">");
    for e in entries.iter() {
        let elected = if e.qualifies { " class=\"elected\"" } else { "" };
        w.push(format!("<li{}>", elected));
        if e.can_disclose() {
            w.push(format!(
                "<details name=\"list-voters\"{}>",
                open_attr(list, &e.name)
            ));
            write_row_head(w, "summary", e);
            write_voters(w, &e.list_voters_header(), &e.voters, anchors);
            w.push("</details>");
        } else {
            write_row_head(w, "div", e);
        }
        w.push("</li>");
    }
    w.push("</ol></section>");
}

fn write_ballot_body(w: &mut Html, ballot: &VoterBallot, title_id: &str) {
    w.push(format!(
        "<h3 id=\"{}\">{}</h3><p>{}</p><ol>",
        title_id,
        esc(&ballot.title()),
        esc(&ballot.description())
    ));
    for c in ballot.candidates.iter() {
        w.push(format!("<li>{}</li>", esc(c)));
    }
    w.push("</ol>");
}

/// One overlay per voter, shown when its anchor is the target of the page.
fn write_overlays(w: &mut Html, d: &Dashboard, voters: &[&str]) {
    for (i, voter) in voters.iter().enumerate() {
        let ballot = d.ballot(voter);
        let id = format!("ballot-{}", i);
        w.push(format!(
            "<div class=\"overlay\" id=\"{}\" role=\"dialog\" aria-modal=\"true\" aria-labelledby=\"{}-title\"><div class=\"ballot\">",
            id, id
        ));
        write_ballot_body(w, &ballot, &format!("{}-title", id));
        w.push("<a class=\"close\" href=\"#\">Close</a></div></div>");
    }
}

/// The ballot opened with the page. Closing it is handled by the browser.
fn write_open_ballot(w: &mut Html, ballot: &VoterBallot) {
    w.push("<dialog class=\"ballot\" open aria-labelledby=\"open-ballot-title\">");
    write_ballot_body(w, ballot, "open-ballot-title");
    w.push("<form method=\"dialog\"><button class=\"close\">Close</button></form></dialog>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::tests::hof_2026;

    #[test]
    fn document_shell() {
        let d = hof_2026();
        let html = render_html(&d, &ViewState::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>2026 Hall of Fame</title>"));
        assert!(html.contains("BBWA Voting Tracker"));
        assert!(html.contains(
            "Track the latest voting status for MLB Hall of Fame. 75% is required for election."
        ));
        assert!(html.contains("Last updated: 11/25/2025"));
        assert!(html.contains("12 Total Ballots (Only Public Official Results)"));
        assert!(html.contains("@media (min-width:640px)"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn summary_and_chart() {
        let d = hof_2026();
        let html = render_html(&d, &ViewState::new());
        assert!(html.contains("<div class=\"value\">Carlos Beltran</div>"));
        assert!(html.contains(
            "aria-label=\"Bar Chart showing 6 Hall of Fame candidates and their vote percentages.\""
        ));
        assert!(html.contains("75% Threshold"));
        assert!(html.contains("stroke-dasharray=\"8 4\""));
        assert!(html.contains("<title>Carlos Beltran\n83.3% (10 votes)</title>"));
        assert!(html.contains("rotate(-45 "));
        for tick in ["0%", "25%", "50%", "75%", "100%"] {
            assert!(html.contains(&format!(">{}</text>", tick)));
        }
        assert_eq!(html.matches("<g>").count(), 6);
    }

    #[test]
    fn threshold_note_and_color_classes() {
        let d = hof_2026();
        let html = render_html(&d, &ViewState::new());
        assert!(html.contains(
            "<h2>Current Voting Percentages</h2><p class=\"note\">The red dashed line at 75% marks the election threshold. Data is from publicly released ballots only.</p>"
        ));
        assert_eq!(
            html.matches("<span class=\"marker-label\" style=\"left:75.0%\">75%</span>")
                .count(),
            6
        );
        assert!(html.contains("<rect class=\"bar bar-elected\""));
        assert!(html.contains("<rect class=\"bar bar-sky\""));
        assert!(html.contains("<rect class=\"bar bar-indigo\""));
        assert!(html.contains("<rect class=\"bar bar-violet\""));
        assert_eq!(html.matches("<rect class=\"bar bar-neutral\"").count(), 2);
        assert!(html.contains("<div class=\"fill fill-elected\" style=\"width:83.3%;background:#10B981\">"));
        assert!(html.contains("<div class=\"fill fill-sky\""));
    }

    #[test]
    fn disclosures_follow_state() {
        let d = hof_2026();
        let mut state = ViewState::new();
        let closed = render_html(&d, &state);
        // Omar Vizquel and Dustin Pedroia have nobody to show.
        assert_eq!(closed.matches("<details name=\"list-voters\">").count(), 4);
        assert_eq!(closed.matches("<details name=\"card-voters\">").count(), 4);

        state.list.toggle("Andruw Jones");
        let html = render_html(&d, &state);
        assert_eq!(html.matches("<details name=\"list-voters\" open>").count(), 1);
        assert_eq!(html.matches("<details name=\"card-voters\" open>").count(), 0);
        assert!(html.contains("<h4>Voters (8)</h4>"));
        assert!(html.contains("<h4>Public ballot voters (5)</h4>"));
    }

    #[test]
    fn entry_details() {
        let d = hof_2026();
        let html = render_html(&d, &ViewState::new());
        assert!(html.contains("aria-label=\"Elected\""));
        assert_eq!(html.matches("aria-label=\"Elected\"").count(), 1);
        assert!(html.contains("<p class=\"tenure\">4th Year on Ballot</p>"));
        assert!(html.contains(">On Track</span>"));
        assert!(html.contains(">Gaining</span>"));
        assert!(html.contains(">33.3% needed</span>"));
        assert!(!html.contains("width:100.0%"));
        assert!(html.contains("width:83.3%;background:#10B981"));
        assert!(html.contains("<p class=\"votes\">0 votes</p>"));
    }

    #[test]
    fn one_overlay_per_voter() {
        let d = hof_2026();
        let html = render_html(&d, &ViewState::new());
        assert_eq!(html.matches("class=\"overlay\"").count(), 10);
        assert!(html.contains("<a href=\"#ballot-0\">Jane Doe</a>"));
        assert!(html.contains("Jane Doe&#39;s Ballot"));
        assert!(html.contains("<p>(3) votes</p>"));
        assert!(!html.contains("<dialog"));
    }

    #[test]
    fn open_ballot() {
        let d = hof_2026();
        let mut state = ViewState::new();
        state.open_ballot(&d, "Ben Ode");
        let html = render_html(&d, &state);
        assert!(html.contains("<dialog class=\"ballot\" open"));
        assert!(html.contains("<form method=\"dialog\">"));
        let dialog = &html[html.find("<dialog").unwrap()..];
        assert!(dialog.contains("Ben Ode&#39;s Ballot"));
        assert!(dialog.contains("<li>Carlos Beltran</li><li>Felix Hernandez</li>"));
    }

    #[test]
    fn escaping() {
        assert_eq!(esc("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        let ds = ElectionDataset {
            total_voters: 0,
            candidates: vec![Candidate {
                id: 1,
                name: "<script>".to_string(),
                years_on_ballot: None,
                voters: Some(vec!["O'Neil".to_string()]),
            }],
        };
        let d = Dashboard::new(ds, DashboardMeta::default(), DisplayRules::DEFAULT_RULES);
        let html = render_html(&d, &ViewState::new());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("O&#39;Neil"));
        // No ballots: dashes and flat bars.
        assert!(html.contains(">—</text>"));
        assert!(html.contains("height=\"0.0\""));
    }
}
