use std::fmt;

use indexmap::IndexMap;
use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

/// Decimal places kept on published scores
pub const SCORE_DECIMALS: i32 = 5;

/// Round `score` to `decimals` places
#[inline]
pub fn round_score(score: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (score * factor).round() / factor
}

/// One ranked document
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry {
    pub key: String,
    pub score: f64,
}

/// Ranked `(identifier, score)` list
///
/// Serializes as a JSON object whose key order is the rank order:
/// `{"C": 0.84347, "A": 0.7041}`.
#[derive(Clone, Default, PartialEq)]
pub struct ScoredResult {
    pub list: Vec<HitEntry>,
}

impl ScoredResult {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Self { list }
    }

    /// Sort by descending score
    /// Stable, so equal scores keep their input order. NaN scores are dropped.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.retain(|e| !e.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Round every score to `decimals` places
    pub fn round_scores(&mut self, decimals: i32) -> &mut Self {
        for e in self.list.iter_mut() {
            e.score = round_score(e.score, decimals);
        }
        self
    }

    /// Keep the first `n` entries
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry> {
        self.list.iter()
    }

    /// identifiers in rank order
    pub fn keys(&self) -> Vec<&str> {
        self.list.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.list.iter().find(|e| e.key == key).map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ScoredResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.list.len()))?;
        for e in &self.list {
            map.serialize_entry(&e.key, &e.score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoredResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = IndexMap::<String, f64>::deserialize(deserializer)?;
        Ok(Self {
            list: map
                .into_iter()
                .map(|(key, score)| HitEntry { key, score })
                .collect(),
        })
    }
}

impl fmt::Debug for ScoredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "ScoredResult [")?;
            for e in &self.list {
                writeln!(f, "    {:?}: {:.5}", e.key, e.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|e| (&e.key, e.score)))
                .finish()
        }
    }
}

impl fmt::Display for ScoredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, e) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. {:.5}  {}", rank + 1, e.score, e.key)?;
        }
        Ok(())
    }
}
