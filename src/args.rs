use clap::Parser;

/// This program renders the public ballot tracker of a Hall of Fame election.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The ballot document: the number of ballots and the public voters of each
    /// candidate. See the manual of hof_ballots for the supported formats.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default json) The type of the input: json or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Required if the
    /// workbook has more than one worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// The number of ballots in the whole election. Overrides the value of the document.
    /// For Excel inputs, the number of voter rows is used if it is not provided.
    #[clap(long, value_parser)]
    pub total_voters: Option<u64>,

    /// (default html) The output format: html or text.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    /// (default desktop) For the text output, the layout of the candidates: desktop (list) or
    /// mobile (cards).
    #[clap(long, value_parser)]
    pub layout: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the rendering. Defaults to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (candidate name or id) The candidate whose voters are shown when the page opens.
    #[clap(long, value_parser)]
    pub expand: Option<String>,

    /// (voter name) The voter whose ballot is shown when the page opens.
    #[clap(long, value_parser)]
    pub voter: Option<String>,

    /// (default 75) The percentage of ballots required for election.
    #[clap(long, value_parser)]
    pub threshold: Option<f64>,

    /// The title of the page. Overrides the electionName of the document.
    #[clap(long, value_parser)]
    pub title: Option<String>,

    /// The date of the last update, as displayed. Overrides the lastUpdated of the document.
    #[clap(long, value_parser)]
    pub last_updated: Option<String>,

    /// (file path) A reference rendering. If provided, hoftrack will check that the output
    /// matches the reference and fail otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Starts an interactive session in the terminal instead of writing a rendering.
    #[clap(long, takes_value = false)]
    pub explore: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
