//! Custom role derivation: assembles an ad-hoc `RoleSpec` from a free-form job description.

use crate::matching::catalog::RoleSpec;

pub const CUSTOM_ROLE_TITLE: &str = "Custom Role";

/// Fixed technology vocabulary scanned for in custom job descriptions.
pub const TECH_VOCABULARY: &[&str] = &[
    "java",
    "spring boot",
    "rest api",
    "sql",
    "git",
    "microservices",
    "react",
    "javascript",
    "python",
    "aws",
    "docker",
    "kubernetes",
    "node.js",
    "typescript",
    "html",
    "css",
    "machine learning",
    "figma",
    "agile",
    "jenkins",
];

/// Builds a "Custom Role" spec whose `important` tier holds every vocabulary term
/// found as a case-insensitive substring of `description`, in vocabulary order.
///
/// Substring semantics: "javascript" in the description also yields "java".
pub fn derive_custom_role(description: &str) -> RoleSpec {
    let description = description.to_lowercase();

    let important = TECH_VOCABULARY
        .iter()
        .filter(|term| description.contains(*term))
        .map(|term| term.to_string())
        .collect();

    RoleSpec {
        title: CUSTOM_ROLE_TITLE.to_string(),
        must_have: vec![],
        important,
        optional: vec![],
    }
}
