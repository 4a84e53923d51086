//! Role Catalog: immutable mapping from role key to its tiered skill specification.
//!
//! Built once at startup (seed table or `ROLES_FILE`) and shared read-only through
//! `AppState` as `Arc<RoleCatalog>`. There are no mutation operations.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matching::engine::RoleMatcher;
use crate::matching::MatchError;

/// Weight class of a skill term within a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    MustHave,
    Important,
    Optional,
}

impl Tier {
    /// Tiers in scan order.
    pub const ALL: [Tier; 3] = [Tier::MustHave, Tier::Important, Tier::Optional];

    pub fn weight(self) -> u8 {
        match self {
            Tier::MustHave => 3,
            Tier::Important => 2,
            Tier::Optional => 1,
        }
    }
}

/// Tiered skill list plus display title for one job role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub title: String,
    #[serde(default)]
    pub must_have: Vec<String>,
    #[serde(default)]
    pub important: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
}

impl RoleSpec {
    pub fn terms(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::MustHave => &self.must_have,
            Tier::Important => &self.important,
            Tier::Optional => &self.optional,
        }
    }

    pub fn term_count(&self) -> usize {
        self.must_have.len() + self.important.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0
    }

    /// Sum of tier weights over every term (duplicates counted).
    pub fn total_weight(&self) -> u32 {
        Tier::ALL
            .iter()
            .map(|&tier| self.terms(tier).len() as u32 * u32::from(tier.weight()))
            .sum()
    }

    /// First tier (in scan order) containing `term`, compared case-insensitively.
    pub fn tier_of(&self, term: &str) -> Option<Tier> {
        let needle = term.trim().to_lowercase();
        Tier::ALL.into_iter().find(|&tier| {
            self.terms(tier)
                .iter()
                .any(|t| t.trim().to_lowercase() == needle)
        })
    }

    /// Rejects blank titles and blank terms. Duplicates are allowed.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.title.trim().is_empty() {
            return Err(MatchError::InvalidInput(
                "role title cannot be empty".to_string(),
            ));
        }
        for tier in Tier::ALL {
            if self.terms(tier).iter().any(|t| t.trim().is_empty()) {
                return Err(MatchError::InvalidInput(format!(
                    "role '{}' has an empty {:?} term",
                    self.title, tier
                )));
            }
        }
        Ok(())
    }
}

/// Compact view of a role for pickers.
#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub key: String,
    pub title: String,
    pub must_have: usize,
    pub important: usize,
    pub optional: usize,
}

#[derive(Debug, Clone)]
struct CatalogRole {
    spec: RoleSpec,
    matcher: RoleMatcher,
}

/// Roles keyed by stable key; each role's term patterns are compiled on construction.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: BTreeMap<String, CatalogRole>,
}

struct SeedRole {
    key: &'static str,
    title: &'static str,
    must_have: &'static [&'static str],
    important: &'static [&'static str],
    optional: &'static [&'static str],
}

const SEED_ROLES: &[SeedRole] = &[
    SeedRole {
        key: "frontend",
        title: "Frontend Developer",
        must_have: &["react", "javascript", "html", "css"],
        important: &["typescript", "tailwind", "nextjs", "git"],
        optional: &["webpack", "vite", "redux", "accessibility"],
    },
    SeedRole {
        key: "backend",
        title: "Backend Developer",
        must_have: &["java", "spring boot", "rest api", "sql"],
        important: &["node.js", "express", "python", "git"],
        optional: &["docker", "kubernetes", "aws", "redis", "microservices"],
    },
    SeedRole {
        key: "fullstack",
        title: "Full Stack Engineer",
        must_have: &["react", "node.js", "sql", "javascript"],
        important: &["express", "typescript", "git", "rest api"],
        optional: &["mongodb", "graphql", "deployment", "cicd", "system design"],
    },
    SeedRole {
        key: "ds",
        title: "Data Scientist",
        must_have: &["python", "sql", "machine learning", "statistics"],
        important: &["pandas", "numpy", "scikit-learn", "data visualization"],
        optional: &["tensorflow", "pytorch", "tableau", "deep learning", "r"],
    },
    SeedRole {
        key: "pm",
        title: "Product Manager",
        must_have: &["agile", "scrum", "roadmapping", "communication"],
        important: &["stakeholder management", "user research", "analytics", "jira"],
        optional: &["product discovery", "strategic thinking", "market analysis"],
    },
    SeedRole {
        key: "uiux",
        title: "UI/UX Designer",
        must_have: &["figma", "user experience", "interface design", "prototyping"],
        important: &["wireframing", "user research", "visual design", "sketch"],
        optional: &["adobe xd", "usability testing", "design systems"],
    },
    SeedRole {
        key: "devops",
        title: "DevOps Engineer",
        must_have: &["ci/cd", "docker", "kubernetes", "aws"],
        important: &["terraform", "jenkins", "linux", "ansible"],
        optional: &["monitoring", "logging", "bash", "azure", "security"],
    },
];

fn to_owned_terms(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl RoleCatalog {
    /// The built-in seven-role table.
    pub fn seed() -> Result<Self, MatchError> {
        Self::from_roles(SEED_ROLES.iter().map(|seed| {
            (
                seed.key.to_string(),
                RoleSpec {
                    title: seed.title.to_string(),
                    must_have: to_owned_terms(seed.must_have),
                    important: to_owned_terms(seed.important),
                    optional: to_owned_terms(seed.optional),
                },
            )
        }))
    }

    /// Builds a catalog from explicit entries, validating and compiling every role.
    pub fn from_roles<I>(roles: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (String, RoleSpec)>,
    {
        let mut map = BTreeMap::new();
        for (key, spec) in roles {
            if key.trim().is_empty() {
                return Err(MatchError::InvalidInput(
                    "role key cannot be empty".to_string(),
                ));
            }
            spec.validate()?;
            let matcher = RoleMatcher::compile(&spec)?;
            map.insert(key, CatalogRole { spec, matcher });
        }
        Ok(Self { roles: map })
    }

    /// Parses the `{ key: { title, must_have, important, optional } }` JSON shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let roles: BTreeMap<String, RoleSpec> =
            serde_json::from_str(json).context("Role catalog is not valid JSON")?;
        Ok(Self::from_roles(roles)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read role catalog '{}'", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Failed to load role catalog '{}'", path.display()))
    }

    fn entry(&self, role_key: &str) -> Result<&CatalogRole, MatchError> {
        self.roles
            .get(role_key)
            .ok_or_else(|| MatchError::RoleNotFound(role_key.to_string()))
    }

    pub fn lookup(&self, role_key: &str) -> Result<&RoleSpec, MatchError> {
        self.entry(role_key).map(|role| &role.spec)
    }

    /// Precompiled matcher for a catalog role.
    pub fn matcher(&self, role_key: &str) -> Result<&RoleMatcher, MatchError> {
        self.entry(role_key).map(|role| &role.matcher)
    }

    /// Case-insensitive title match, first by key order.
    pub fn find_by_title(&self, title: &str) -> Option<&RoleSpec> {
        let wanted = title.trim().to_lowercase();
        self.roles
            .values()
            .map(|role| &role.spec)
            .find(|spec| spec.title.to_lowercase() == wanted)
    }

    pub fn list(&self) -> Vec<RoleSummary> {
        self.roles
            .iter()
            .map(|(key, role)| RoleSummary {
                key: key.clone(),
                title: role.spec.title.clone(),
                must_have: role.spec.must_have.len(),
                important: role.spec.important.len(),
                optional: role.spec.optional.len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
