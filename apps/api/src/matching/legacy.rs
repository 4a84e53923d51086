//! Legacy result normalization for the storage boundary.
//!
//! Older persisted scans carry skills either as bare names or as `{ name, level }`
//! objects, and some lack a verdict. This converts them into the current
//! `AnalysisResult` shape so the engine never has to emit legacy forms.
//! The output always honors the engine's rules: weights are 1, 2 or 3, the score
//! is at most 100, and the verdict is derived from that score.

use serde::Deserialize;

use crate::matching::catalog::{RoleCatalog, RoleSpec, Tier};
use crate::matching::engine::{AnalysisResult, Verdict, WeightedSkill};

/// Weight given to bare names whose tier cannot be recovered (custom-role weight).
const FALLBACK_WEIGHT: u8 = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredSkill {
    Weighted(WeightedSkill),
    Name(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredAnalysis {
    pub score: u32,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub matched: Vec<StoredSkill>,
    #[serde(default)]
    pub missing: Vec<StoredSkill>,
    #[serde(default)]
    pub verdict: Option<Verdict>,
}

impl StoredAnalysis {
    /// Bare names and out-of-range weights take their tier weight from the catalog
    /// role titled `job_title`. Any stored verdict is replaced by the score's verdict.
    pub fn normalize(self, catalog: &RoleCatalog) -> AnalysisResult {
        let role = catalog.find_by_title(&self.job_title);
        let resolve = |skill: StoredSkill| match skill {
            StoredSkill::Weighted(weighted) if is_tier_weight(weighted.weight) => weighted,
            StoredSkill::Weighted(WeightedSkill { name, .. }) | StoredSkill::Name(name) => {
                let weight = recover_weight(role, &name);
                WeightedSkill { name, weight }
            }
        };

        let score = self.score.min(100);
        if let Some(stored) = self.verdict {
            if stored != Verdict::from_score(score) {
                tracing::debug!("Stored verdict {stored:?} disagrees with score {score}; recomputing");
            }
        }

        AnalysisResult {
            score,
            job_title: self.job_title,
            matched: self.matched.into_iter().map(&resolve).collect(),
            missing: self.missing.into_iter().map(&resolve).collect(),
            verdict: Verdict::from_score(score),
        }
    }
}

fn is_tier_weight(weight: u8) -> bool {
    Tier::ALL.iter().any(|tier| tier.weight() == weight)
}

fn recover_weight(role: Option<&RoleSpec>, name: &str) -> u8 {
    role.and_then(|r| r.tier_of(name))
        .map(Tier::weight)
        .unwrap_or(FALLBACK_WEIGHT)
}
