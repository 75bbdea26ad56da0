// Reader for the JSON ballot document.

use hof_ballots::builder::Builder;
use serde::{Deserialize, Serialize};

use crate::tracker::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "yearsOnBallot")]
    pub years_on_ballot: Option<u32>,
    pub voters: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BallotDocument {
    #[serde(rename = "totalVoters")]
    pub total_voters: u64,
    pub players: Vec<PlayerRecord>,
    // New options specific to hoftrack
    #[serde(rename = "electionName")]
    pub election_name: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

pub fn read_json(path: &str) -> TrackerResult<(ElectionDataset, DashboardMeta)> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let doc = parse_document(&contents)?;
    debug!(
        "read_json: {} players, {} ballots",
        doc.players.len(),
        doc.total_voters
    );
    document_to_dataset(doc)
}

pub fn parse_document(contents: &str) -> TrackerResult<BallotDocument> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

pub fn document_to_dataset(doc: BallotDocument) -> TrackerResult<(ElectionDataset, DashboardMeta)> {
    let mut builder = Builder::new(doc.total_voters);
    for p in doc.players {
        if p.voters.is_none() {
            debug!("document_to_dataset: no public voter list for {:?}", p.name);
        }
        builder = builder
            .candidate_with_voters(p.id, &p.name, p.years_on_ballot, p.voters)
            .context(InvalidDatasetSnafu {})?;
    }
    let meta = DashboardMeta {
        title: doc.election_name,
        last_updated: doc.last_updated,
    };
    Ok((builder.build(), meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::tests::data_path;

    #[test]
    fn optional_fields() {
        let doc = parse_document(
            r#"{"totalVoters": 5, "players": [
                {"id": 3, "name": "Bobby Abreu", "yearsOnBallot": 7, "voters": ["A"]},
                {"id": 1, "name": "David Wright"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.election_name, None);
        let (ds, meta) = document_to_dataset(doc).unwrap();
        assert_eq!(meta, DashboardMeta::default());
        assert_eq!(ds.candidates[0].id, 3);
        assert_eq!(ds.candidates[0].years_on_ballot, Some(7));
        assert_eq!(ds.candidates[1].years_on_ballot, None);
        assert_eq!(ds.candidates[1].voters, None);
        assert_eq!(ds.candidates[1].votes(), 0);
    }

    #[test]
    fn malformed_document() {
        assert!(matches!(
            read_json(&data_path("bad_shape.json")),
            Err(TrackerError::ParsingJson { .. })
        ));
        assert!(matches!(
            parse_document(r#"{"players": []}"#),
            Err(TrackerError::ParsingJson { .. })
        ));
    }

    #[test]
    fn duplicate_candidates() {
        let res = read_json(&data_path("duplicate_names.json"));
        match res {
            Err(TrackerError::InvalidDataset { source }) => {
                assert_eq!(
                    source,
                    DashboardErrors::DuplicateCandidate("Billy Wagner".to_string())
                );
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn fixture_order_is_kept() {
        let (ds, _) = read_json(&data_path("hof_2026.json")).unwrap();
        let names: Vec<&str> = ds.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Carlos Beltran",
                "Andruw Jones",
                "Chase Utley",
                "Felix Hernandez",
                "Omar Vizquel",
                "Dustin Pedroia"
            ]
        );
        assert_eq!(ds.candidates[4].voters, Some(vec![]));
    }
}
