/*!

This is the long-form manual for `hof_ballots` and `hoftrack`.

## Input formats

The following formats are supported:
* `json` The ballot document used by the tracker website
* `xlsx` A public ballot tracker spreadsheet

### `json`

```text
{
  "totalVoters": 400,
  "electionName": "2026 Hall of Fame",
  "lastUpdated": "11/25/2025",
  "players": [
    { "id": 1, "name": "Ichiro Suzuki", "yearsOnBallot": 1, "voters": ["A", "B", "C"] },
    { "id": 2, "name": "CC Sabathia", "yearsOnBallot": 1, "voters": ["A"] }
  ]
}
```

`totalVoters` is the number of ballots in the whole election, not the number of public ballots.
The percentages are computed against it.

`yearsOnBallot` and `voters` are optional. When `yearsOnBallot` is missing, the card does not show
the "Year on Ballot" line. When `voters` is missing, the vote count and the list of voters are not
shown (the candidate still appears with 0%). `electionName` and `lastUpdated` only change the header.

### `xlsx`

The layout of the ballot tracker spreadsheets: one row per public ballot, one column per candidate.

|             | Ichiro Suzuki | CC Sabathia | ... |
|-------------|---------------|-------------|-----|
| Voter A     | x             | x           |     |
| Voter B     | x             |             |     |
| ...         |               |             |     |

Any text or non-zero number in a cell counts as a vote. The candidates are numbered in column
order. Since the spreadsheet only lists the public ballots, the size of the ballot pool should be
given with `--total-voters`, otherwise the number of rows is used.

If the workbook has more than one worksheet, select one with `--excel-worksheet-name`.

## Display rules

The election threshold is 75% of the ballots. A candidate at or above it is "On Track". The bars
and the progress gauges are colored by bands:

| Band          | Color  |
|---------------|--------|
| threshold+    | green  |
| 60 to threshold | sky  |
| 40 to 60      | indigo |
| 20 to 40      | violet |
| below 20      | gray   |

A value on a boundary belongs to the upper band. The threshold may be changed with `--threshold`,
the other bands are fixed.

```
use hof_ballots::{bar_color, ColorToken, DisplayRules};

let rules = DisplayRules { threshold: 70.0 };
assert_eq!(bar_color(72.0, rules.threshold), ColorToken::Elected);
assert_eq!(bar_color(72.0, DisplayRules::DEFAULT_RULES.threshold), ColorToken::Sky);
```

## Outputs

`hoftrack` writes a single HTML file (no script, no external asset) by default. The page switches
between the card layout and the list layout at 640 pixels. With `--format text`, the same content is
printed for the terminal, and `--explore` starts an interactive session:

```text
list Ichiro Suzuki     toggle the voters of a candidate in the list
card 2                 toggle the voters of candidate #2 in the cards
voter A                show the ballot of a voter
close                  close the ballot
layout mobile          switch to the cards
quit
```

 */
