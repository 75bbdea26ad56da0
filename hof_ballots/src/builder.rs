pub use crate::config::*;

/// A builder for assembling a dataset.
///
/// The readers go through the builder, so that the same checks apply to all the input formats.
///
/// ```
/// pub use hof_ballots::builder::Builder;
/// # use hof_ballots::DashboardErrors;
///
/// let mut builder = Builder::new(400)
///     .candidate(1, "Ichiro Suzuki", Some(1))?
///     .candidate(2, "CC Sabathia", Some(1))?;
///
/// builder.add_voter("Ichiro Suzuki", "Jane Doe")?;
/// builder.add_voter("CC Sabathia", "Jane Doe")?;
///
/// let dataset = builder.build();
/// assert_eq!(dataset.candidates[0].votes(), 1);
///
/// # Ok::<(), DashboardErrors>(())
/// ```
pub struct Builder {
    pub(crate) _total_voters: u64,
    pub(crate) _candidates: Vec<Candidate>,
}

impl Builder {
    pub fn new(total_voters: u64) -> Builder {
        Builder {
            _total_voters: total_voters,
            _candidates: Vec::new(),
        }
    }

    /// Registers a candidate with no disclosed voter yet.
    pub fn candidate(
        self,
        id: u32,
        name: &str,
        years_on_ballot: Option<u32>,
    ) -> Result<Builder, DashboardErrors> {
        self.candidate_with_voters(id, name, years_on_ballot, Some(Vec::new()))
    }

    /// Registers a candidate. Passing `None` for the voters marks them as not disclosed.
    pub fn candidate_with_voters(
        mut self,
        id: u32,
        name: &str,
        years_on_ballot: Option<u32>,
        voters: Option<Vec<String>>,
    ) -> Result<Builder, DashboardErrors> {
        if self._candidates.iter().any(|c| c.name == name) {
            return Err(DashboardErrors::DuplicateCandidate(name.to_string()));
        }
        if self._candidates.iter().any(|c| c.id == id) {
            return Err(DashboardErrors::DuplicateId(id));
        }
        self._candidates.push(Candidate {
            id,
            name: name.to_string(),
            years_on_ballot,
            voters,
        });
        Ok(self)
    }

    /// Adds a voter to the ballot list of an already registered candidate.
    pub fn add_voter(&mut self, candidate: &str, voter: &str) -> Result<(), DashboardErrors> {
        let cand = self
            ._candidates
            .iter_mut()
            .find(|c| c.name == candidate)
            .ok_or_else(|| DashboardErrors::UnknownCandidate(candidate.to_string()))?;
        cand.voters.get_or_insert_with(Vec::new).push(voter.to_string());
        Ok(())
    }

    pub fn build(self) -> ElectionDataset {
        ElectionDataset {
            total_voters: self._total_voters,
            candidates: self._candidates,
        }
    }
}
