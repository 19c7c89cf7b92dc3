use serde::{Deserialize, Serialize};

// ============ Harvest Models ============

/// A display name in "Last, First" form, as listed by the discovery source.
pub type CandidateName = String;

/// One keyspace partition of the discovery source: a lowercase ASCII letter.
pub type Partition = char;

/// The discovery keyspace, in the order results are delivered.
pub fn keyspace() -> impl Iterator<Item = Partition> {
    'a'..='z'
}

/// A fighter profile extracted from a profile page.
///
/// A record is either complete or the empty sentinel (`ProfileRecord::default()`),
/// which marks "no profile" and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Canonical display name from the profile page.
    pub name: String,
    /// Nickname, empty when the fighter has none.
    pub nickname: String,
    /// Activity tag (e.g. "Active").
    pub status: String,
    /// Second comma-separated segment of the hometown text.
    pub country: String,
    /// Fighting style label.
    pub style: String,
    /// Win-loss-draw summary, kept as text.
    pub record: String,
    /// Weight class label.
    pub division: String,
    /// Age in years.
    pub age: i32,
    pub knockout_wins: i32,
    pub submission_wins: i32,
    /// Height, in whatever unit the source shows.
    pub height: f64,
    /// Weight, in whatever unit the source shows.
    pub weight: f64,
    /// Reach, in whatever unit the source shows.
    pub reach: f64,
    /// Fraction in [0, 1].
    pub striking_accuracy: f64,
    /// Fraction in [0, 1].
    pub takedown_accuracy: f64,
}

impl ProfileRecord {
    /// True for the "no profile" placeholder.
    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty()
    }
}

/// Counts and records produced by the enrichment stage.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentReport {
    /// Complete records, in candidate order.
    pub records: Vec<ProfileRecord>,
    /// Candidates handed to the stage.
    pub attempted: usize,
    /// Candidates whose profile page was unavailable.
    pub missing: usize,
    /// Candidates whose profile page lacked a region or held unparseable numbers.
    pub malformed: usize,
    /// Candidates dropped for any other reason (malformed name, failed worker).
    pub rejected: usize,
}

impl EnrichmentReport {
    pub fn succeeded(&self) -> usize {
        self.records.len()
    }
}

/// Outcome of a full discovery + enrichment run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestReport {
    /// Partitions queried during discovery.
    pub shards: usize,
    /// Names discovered across all partitions.
    pub candidates: usize,
    pub enrichment: EnrichmentReport,
}

/// Result of handing a batch of records to storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub stored: usize,
    pub failed: usize,
}
