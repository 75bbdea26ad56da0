// Reader for the tracker spreadsheets: one row per public ballot, one column per candidate.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use hof_ballots::builder::Builder;

use crate::tracker::*;

pub fn read_excel_file(
    path: &str,
    worksheet_name: Option<&str>,
    total_voters: Option<u64>,
) -> TrackerResult<(ElectionDataset, DashboardMeta)> {
    let wrange = get_range(path, worksheet_name)?;
    let dataset = parse_tracker_sheet(&wrange, total_voters)?;
    // The spreadsheets carry no header information: the command line provides it.
    Ok((dataset, DashboardMeta::default()))
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> TrackerResult<Range<DataType>> {
    debug!(
        "read_excel_file: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    if let Some(name) = worksheet_name {
        return workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path });
    }
    let mut all_worksheets = workbook.worksheets();
    match all_worksheets.len() {
        0 => EmptyWorkbookSnafu { path }.fail(),
        1 => {
            let (name, wrange) = all_worksheets.remove(0);
            debug!("read_excel_file: using the only worksheet {:?}", name);
            Ok(wrange)
        }
        count => AmbiguousWorksheetSnafu { path, count }.fail(),
    }
}

/// Whether a cell marks a vote for the candidate of its column.
///
/// A mark is any non-empty text, a non-zero number or `TRUE`.
fn is_vote(cell: &DataType, lineno: u64) -> TrackerResult<bool> {
    match cell {
        DataType::Empty => Ok(false),
        DataType::String(s) => Ok(!s.trim().is_empty()),
        DataType::Int(i) => Ok(*i != 0),
        DataType::Float(f) => Ok(*f != 0.0),
        DataType::Bool(b) => Ok(*b),
        x => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Empty => "".to_string(),
        x => x.to_string(),
    }
}

/// Parses a worksheet. The first row holds the candidates, starting in the second column.
/// Every following row is a public ballot: the name of the voter, then a mark under each
/// candidate selected.
pub fn parse_tracker_sheet(
    wrange: &Range<DataType>,
    total_voters: Option<u64>,
) -> TrackerResult<ElectionDataset> {
    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyExcelSnafu {})?;
    debug!("parse_tracker_sheet: header: {:?}", header);

    let names: Vec<String> = header.iter().skip(1).map(cell_text).collect();
    let mut builder = Builder::new(0);
    for (idx, name) in names.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        builder = builder
            .candidate((idx + 1) as u32, name, None)
            .context(InvalidDatasetSnafu {})?;
    }

    let mut num_ballots: u64 = 0;
    for (idx, row) in rows.enumerate() {
        // The header is the first line of the sheet.
        let lineno = (idx + 2) as u64;
        let voter = row.first().map(cell_text).unwrap_or_default();
        if voter.is_empty() {
            debug!("parse_tracker_sheet: skipping line {} without voter", lineno);
            continue;
        }
        num_ballots += 1;
        for (name, cell) in names.iter().zip(row.iter().skip(1)) {
            if !name.is_empty() && is_vote(cell, lineno)? {
                builder
                    .add_voter(name, &voter)
                    .context(InvalidDatasetSnafu {})?;
            }
        }
    }

    let mut dataset = builder.build();
    dataset.total_voters = total_voters.unwrap_or(num_ballots);
    info!(
        "parse_tracker_sheet: {} candidates, {} public ballots",
        dataset.candidates.len(),
        num_ballots
    );
    Ok(dataset)
}
