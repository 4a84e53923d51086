//! Matching Engine: weighted whole-word keyword scan of resume text against a `RoleSpec`.
//!
//! Algorithm:
//! 1. Walk tiers in order (must_have=3, important=2, optional=1), terms in original order.
//! 2. Every term adds its weight to the total; a whole-word, case-insensitive hit
//!    also adds it to the matched weight. Terms are regex-escaped and `\b`-anchored,
//!    so "java" never matches inside "javascript" and "ci/cd" matches literally.
//! 3. score = round_half_up(100 × matched / total), or 0 when total is 0.
//! 4. verdict: STRONG ≥ 70, MEDIUM ≥ 40, POOR otherwise.
//!
//! Term patterns are compiled once per role into a `RoleMatcher`; catalog roles
//! compile at startup, custom roles per request. Scanning is pure: identical
//! inputs always yield identical results.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::matching::catalog::{RoleSpec, Tier};
use crate::matching::MatchError;

pub const STRONG_THRESHOLD: u32 = 70;
pub const MEDIUM_THRESHOLD: u32 = 40;

/// Compiled-size cap per term pattern. Skill terms are short keywords.
const TERM_PATTERN_SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Strong,
    Medium,
    Poor,
}

impl Verdict {
    pub fn from_score(score: u32) -> Self {
        if score >= STRONG_THRESHOLD {
            Verdict::Strong
        } else if score >= MEDIUM_THRESHOLD {
            Verdict::Medium
        } else {
            Verdict::Poor
        }
    }
}

/// A matched or missing term with the weight of the tier it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSkill {
    pub name: String,
    #[serde(alias = "level")]
    pub weight: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub job_title: String,
    pub matched: Vec<WeightedSkill>,
    pub missing: Vec<WeightedSkill>,
    pub verdict: Verdict,
}

impl AnalysisResult {
    /// Missing must-have terms, in role order.
    pub fn critical_gaps(&self) -> impl Iterator<Item = &WeightedSkill> {
        self.missing
            .iter()
            .filter(|skill| skill.weight == Tier::MustHave.weight())
    }
}

#[derive(Debug, Clone)]
struct TermPattern {
    name: String,
    weight: u8,
    pattern: Regex,
}

/// A `RoleSpec` with every term pattern compiled, ready to scan any number of resumes.
#[derive(Debug, Clone)]
pub struct RoleMatcher {
    title: String,
    terms: Vec<TermPattern>,
}

impl RoleMatcher {
    /// Compiles all term patterns; a term that cannot be compiled is `InvalidInput`.
    pub fn compile(role: &RoleSpec) -> Result<Self, MatchError> {
        let mut terms = Vec::with_capacity(role.term_count());
        for tier in Tier::ALL {
            for term in role.terms(tier) {
                terms.push(TermPattern {
                    name: term.clone(),
                    weight: tier.weight(),
                    pattern: whole_word_pattern(term)?,
                });
            }
        }
        debug_assert_eq!(
            terms.iter().map(|t| u32::from(t.weight)).sum::<u32>(),
            role.total_weight()
        );
        Ok(Self {
            title: role.title.clone(),
            terms,
        })
    }

    /// Scores `resume_text` against the compiled role. Never fails.
    pub fn analyze(&self, resume_text: &str) -> AnalysisResult {
        let mut total_weight = 0_u32;
        let mut matched_weight = 0_u32;
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for term in &self.terms {
            total_weight += u32::from(term.weight);

            let skill = WeightedSkill {
                name: term.name.clone(),
                weight: term.weight,
            };

            if term.pattern.is_match(resume_text) {
                matched_weight += u32::from(term.weight);
                matched.push(skill);
            } else {
                missing.push(skill);
            }
        }

        let score = compute_score(matched_weight, total_weight);

        AnalysisResult {
            score,
            job_title: self.title.clone(),
            matched,
            missing,
            verdict: Verdict::from_score(score),
        }
    }
}

/// One-shot compile-and-scan for a role that is not held in a catalog.
pub fn analyze(resume_text: &str, role: &RoleSpec) -> Result<AnalysisResult, MatchError> {
    Ok(RoleMatcher::compile(role)?.analyze(resume_text))
}

/// round_half_up(100 × matched / total) in integer arithmetic; 0 when total is 0.
pub fn compute_score(matched_weight: u32, total_weight: u32) -> u32 {
    if total_weight == 0 {
        return 0;
    }
    (200 * matched_weight + total_weight) / (2 * total_weight)
}

/// Case-insensitive literal pattern for `term`, bounded by word boundaries on both sides.
fn whole_word_pattern(term: &str) -> Result<Regex, MatchError> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
        .case_insensitive(true)
        .size_limit(TERM_PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| MatchError::InvalidInput(format!("term '{term}' cannot be matched: {e}")))
}
