use log::{debug, info, warn};

use hof_ballots::views::*;
use hof_ballots::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{self, Write};

use text_diff::print_diff;

use crate::args::Args;

mod explore;
mod io_json;
mod io_xlsx;
mod render_html;
mod render_text;

pub use render_text::Layout;

#[derive(Debug, Snafu)]
pub enum TrackerError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyWorkbook { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {name:?}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display(
        "The workbook {path} has {count} worksheets, select one with --excel-worksheet-name"
    ))]
    AmbiguousWorksheet { path: String, count: usize },
    #[snafu(display("The worksheet has no header row"))]
    EmptyExcel {},
    #[snafu(display("Row {lineno}: could not understand cell {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error reading file {path}"))]
    OpeningJson { source: std::io::Error, path: String },
    #[snafu(display("Error parsing the ballot document"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid ballot document"))]
    InvalidDataset { source: DashboardErrors },
    #[snafu(display("Unknown input type {input_type:?}, expected json or xlsx"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Unknown output format {format:?}, expected html or text"))]
    UnknownFormat { format: String },
    #[snafu(display("Unknown layout {layout:?}, expected desktop or mobile"))]
    UnknownLayout { layout: String },
    #[snafu(display("Candidate {name:?} is not on the ballot"))]
    UnknownCandidate { name: String },
    #[snafu(display("Error writing the rendering to {path}"))]
    WritingOutput { source: std::io::Error, path: String },
    #[snafu(display("Error reading the reference {path}"))]
    OpeningReference { source: std::io::Error, path: String },
    #[snafu(display("Difference detected between the rendering and the reference {path}"))]
    ReferenceMismatch { path: String },
    #[snafu(display("Error in the interactive session"))]
    Session { source: std::io::Error },
}

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Json,
    Xlsx,
}

impl InputType {
    fn parse(s: Option<&str>) -> TrackerResult<InputType> {
        match s {
            None | Some("json") => Ok(InputType::Json),
            Some("xlsx") | Some("excel") => Ok(InputType::Xlsx),
            Some(x) => UnknownInputTypeSnafu { input_type: x }.fail(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Html,
    Text,
}

impl OutputFormat {
    fn parse(s: Option<&str>) -> TrackerResult<OutputFormat> {
        match s {
            None | Some("html") => Ok(OutputFormat::Html),
            Some("text") | Some("txt") => Ok(OutputFormat::Text),
            Some(x) => UnknownFormatSnafu { format: x }.fail(),
        }
    }
}

/// Reads the input and applies the overrides of the command line.
pub fn load_dashboard(args: &Args) -> TrackerResult<Dashboard> {
    let input_type = InputType::parse(args.input_type.as_deref())?;
    info!("Attempting to read {:?} file {:?}", input_type, args.input);
    let (mut dataset, mut meta) = match input_type {
        InputType::Json => io_json::read_json(&args.input)?,
        InputType::Xlsx => io_xlsx::read_excel_file(
            &args.input,
            args.excel_worksheet_name.as_deref(),
            args.total_voters,
        )?,
    };

    if let Some(total) = args.total_voters {
        dataset.total_voters = total;
    }
    if let Some(title) = &args.title {
        meta.title = Some(title.clone());
    }
    if let Some(last_updated) = &args.last_updated {
        meta.last_updated = Some(last_updated.clone());
    }
    check_dataset(&dataset);

    let rules = match args.threshold {
        Some(threshold) => DisplayRules { threshold },
        None => DisplayRules::DEFAULT_RULES,
    };
    Ok(Dashboard::new(dataset, meta, rules))
}

/// Reports the suspicious parts of a dataset. None of them prevents the rendering.
fn check_dataset(dataset: &ElectionDataset) {
    if dataset.total_voters == 0 {
        warn!("The ballot document has no ballot: the percentages will not be displayed");
    }
    if dataset.candidates.is_empty() {
        warn!("The ballot document has no candidate");
    }
    for c in dataset.candidates.iter() {
        if c.votes() > dataset.total_voters {
            warn!(
                "Candidate {:?} has {} public votes for {} ballots",
                c.name,
                c.votes(),
                dataset.total_voters
            );
        }
    }
}

/// The state of the page when it opens.
pub fn initial_state(
    dashboard: &Dashboard,
    expand: Option<&str>,
    voter: Option<&str>,
) -> TrackerResult<ViewState> {
    let mut state = ViewState::new();
    if let Some(key) = expand {
        let cand = dashboard
            .find_candidate(key)
            .context(UnknownCandidateSnafu { name: key })?;
        if cand.has_voters() {
            state.list.toggle(&cand.name);
            state.cards.toggle(&cand.name);
        } else {
            warn!("Candidate {:?} has no public voter, nothing to expand", cand.name);
        }
    }
    if let Some(v) = voter {
        let ballot = state.open_ballot(dashboard, v);
        debug!("initial_state: ballot {:?}", ballot);
    }
    Ok(state)
}

pub fn render(
    dashboard: &Dashboard,
    state: &ViewState,
    format: OutputFormat,
    layout: Layout,
) -> String {
    match format {
        OutputFormat::Html => render_html::render_html(dashboard, state),
        OutputFormat::Text => render_text::render_text(dashboard, state, layout),
    }
}

fn write_output(out: Option<&str>, content: &str) -> TrackerResult<()> {
    match out {
        None | Some("stdout") | Some("") => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .context(WritingOutputSnafu { path: "stdout" })?;
        }
        Some(path) => {
            info!("Writing the rendering to {:?}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

/// Compares a rendering with the content of a reference file.
pub fn check_reference(reference_path: &str, rendered: &str) -> TrackerResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
        path: reference_path,
    })?;
    if reference != rendered {
        warn!("Found differences with the reference {:?}", reference_path);
        print_diff(reference.as_str(), rendered, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The rendering matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run_tracker(args: &Args) -> TrackerResult<()> {
    let format = OutputFormat::parse(args.format.as_deref())?;
    let layout = Layout::parse(args.layout.as_deref())?;
    let dashboard = load_dashboard(args)?;
    let mut state = initial_state(&dashboard, args.expand.as_deref(), args.voter.as_deref())?;

    if args.explore {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return explore::run_session(
            &dashboard,
            &mut state,
            layout,
            &mut stdin.lock(),
            &mut stdout.lock(),
        )
        .context(SessionSnafu {});
    }

    let rendered = render(&dashboard, &state, format, layout);
    write_output(args.out.as_deref(), &rendered)?;

    // The reference rendering, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &rendered)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn data_path(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    pub fn test_args(input: &str) -> Args {
        Args {
            input: data_path(input),
            input_type: None,
            excel_worksheet_name: None,
            total_voters: None,
            format: None,
            layout: None,
            out: None,
            expand: None,
            voter: None,
            threshold: None,
            title: None,
            last_updated: None,
            reference: None,
            explore: false,
            verbose: false,
        }
    }

    pub fn hof_2026() -> Dashboard {
        load_dashboard(&test_args("hof_2026.json")).unwrap()
    }

    fn temp_file(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("hoftrack-{}-{}", std::process::id(), name))
            .display()
            .to_string()
    }

    #[test]
    fn loads_fixture() {
        let d = hof_2026();
        assert_eq!(d.dataset.total_voters, 12);
        assert_eq!(d.dataset.candidates.len(), 6);
        assert_eq!(d.meta.title(), "2026 Hall of Fame");
        assert_eq!(d.meta.last_updated.as_deref(), Some("11/25/2025"));
        assert_eq!(d.rules, DisplayRules::DEFAULT_RULES);
    }

    #[test]
    fn command_line_overrides() {
        let mut args = test_args("hof_2026.json");
        args.total_voters = Some(10);
        args.threshold = Some(50.0);
        args.title = Some("Contemporary Era".to_string());
        let d = load_dashboard(&args).unwrap();
        assert_eq!(d.dataset.total_voters, 10);
        assert_eq!(d.rules.threshold, 50.0);
        assert_eq!(d.meta.title(), "Contemporary Era");
        assert_eq!(d.summary().cells()[3].value, "50%");
    }

    #[test]
    fn end_to_end_example() {
        let d = load_dashboard(&test_args("ichiro_sabathia.json")).unwrap();
        let s = d.summary();
        assert_eq!(s.on_track, 0);
        assert_eq!(s.top_candidate.as_deref(), Some("Ichiro Suzuki"));
        let entries = d.entries();
        assert_eq!(entries[0].percent_text(), "0.8%");
        assert!(!entries[0].qualifies);
        assert_eq!(
            d.ballot("A").candidates,
            vec!["Ichiro Suzuki", "CC Sabathia"]
        );
    }

    #[test]
    fn unknown_types() {
        let mut args = test_args("hof_2026.json");
        args.input_type = Some("csv".to_string());
        assert!(matches!(
            load_dashboard(&args),
            Err(TrackerError::UnknownInputType { .. })
        ));
        assert!(matches!(
            OutputFormat::parse(Some("pdf")),
            Err(TrackerError::UnknownFormat { .. })
        ));
        assert_eq!(OutputFormat::parse(None).unwrap(), OutputFormat::Html);
    }

    #[test]
    fn missing_input() {
        let args = test_args("does_not_exist.json");
        assert!(matches!(
            load_dashboard(&args),
            Err(TrackerError::OpeningJson { .. })
        ));
    }

    #[test]
    fn initial_state_from_flags() {
        let d = hof_2026();
        let state = initial_state(&d, Some("Carlos Beltran"), Some("Jane Doe")).unwrap();
        assert!(state.list.is_expanded("Carlos Beltran"));
        assert!(state.cards.is_expanded("Carlos Beltran"));
        assert_eq!(
            state.ballot.map(|b| b.candidates),
            Some(vec![
                "Carlos Beltran".to_string(),
                "Andruw Jones".to_string(),
                "Chase Utley".to_string()
            ])
        );

        let by_id = initial_state(&d, Some("2"), None).unwrap();
        assert!(by_id.list.is_expanded("Andruw Jones"));

        assert!(matches!(
            initial_state(&d, Some("Nobody"), None),
            Err(TrackerError::UnknownCandidate { .. })
        ));
    }

    #[test]
    fn nothing_to_expand_without_voters() {
        let d = hof_2026();
        let state = initial_state(&d, Some("Omar Vizquel"), None).unwrap();
        assert_eq!(state.list.expanded(), None);
    }

    #[test]
    fn reference_check() {
        let d = hof_2026();
        let state = ViewState::new();
        let rendered = render(&d, &state, OutputFormat::Text, Layout::Desktop);

        let path = temp_file("reference.txt");
        fs::write(&path, &rendered).unwrap();
        assert!(check_reference(&path, &rendered).is_ok());

        let other = render(&d, &state, OutputFormat::Text, Layout::Mobile);
        assert!(matches!(
            check_reference(&path, &other),
            Err(TrackerError::ReferenceMismatch { .. })
        ));
        let _ = fs::remove_file(&path);

        assert!(matches!(
            check_reference(&temp_file("missing.txt"), &rendered),
            Err(TrackerError::OpeningReference { .. })
        ));
    }

    #[test]
    fn run_writes_output() {
        let out = temp_file("out.html");
        let mut args = test_args("hof_2026.json");
        args.out = Some(out.clone());
        args.expand = Some("Andruw Jones".to_string());
        run_tracker(&args).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("2026 Hall of Fame"));

        // The same run, checked against its own output.
        args.reference = Some(out.clone());
        let out2 = temp_file("out2.html");
        args.out = Some(out2.clone());
        run_tracker(&args).unwrap();
        let _ = fs::remove_file(&out);
        let _ = fs::remove_file(&out2);
    }
}
