//! Brand identity: alias canonicalisation at parse time and fuzzy matching
//! across independently uploaded workbooks at query time.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Built-in variant -> canonical pairs. Every canonical name maps to itself
/// so canonicalisation is idempotent.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("T-fal（ティファール）", "T-Fal（ティファール）"),
    ("T-Fal（ティファール）", "T-Fal（ティファール）"),
    ("タイガー［魔法瓶］", "タイガー[魔法瓶]"),
    ("タイガー[魔法瓶]", "タイガー[魔法瓶]"),
    ("Apple（アップル）［コンピューター、スマホなど］", "Apple（アップル）"),
    ("Apple（アップル）", "Apple（アップル）"),
    ("JOYSOUND（ジョイサウンド）", "JOYSOUND"),
    ("JOYSOUND", "JOYSOUND"),
    ("コロナ Relala（リララ）", "コロナ Relala（リララ）"),
    ("コロナRelala（リララ）", "コロナ Relala（リララ）"),
    ("THERMOS（サーモス）", "サーモス"),
    ("サーモス", "サーモス"),
];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]").expect("valid description regex"));
static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid paren regex"));
static BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid bracket regex"));

fn unify_brackets(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            '［' => '[',
            '］' => ']',
            other => other,
        })
        .collect()
}

/// Normalize a brand name for comparison.
///
/// Full-width brackets become half-width, whitespace runs collapse to a
/// single space and the result is trimmed. With `remove_description`, any
/// `[...]` qualifier is dropped as well.
#[must_use]
pub fn normalize_brand_name(name: &str, remove_description: bool) -> String {
    let unified = unify_brackets(name.trim());
    let stripped = if remove_description {
        DESCRIPTION.replace_all(&unified, "").into_owned()
    } else {
        unified
    };
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// The brand name with every parenthesised and bracketed part removed.
#[must_use]
pub fn brand_core(name: &str) -> String {
    let unified = unify_brackets(name);
    let without_parens = PAREN_GROUP.replace_all(&unified, "");
    BRACKET_GROUP
        .replace_all(&without_parens, "")
        .trim()
        .to_string()
}

/// Whether two spellings refer to the same brand: equal after full
/// normalization, or sharing a non-empty core of the normalized names.
#[must_use]
pub fn same_brand(a: &str, b: &str) -> bool {
    let normalized_a = normalize_brand_name(a, true);
    let normalized_b = normalize_brand_name(b, true);
    if normalized_a == normalized_b {
        return true;
    }
    let core_a = brand_core(&normalized_a);
    !core_a.is_empty() && core_a == brand_core(&normalized_b)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandAlias {
    pub variant: String,
    pub canonical: String,
}

#[derive(Debug, Deserialize)]
pub struct AliasesFile {
    pub aliases: Vec<BrandAlias>,
}

/// Load and validate a brand alias table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_aliases(path: &Path) -> Result<AliasesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AliasesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let aliases_file: AliasesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::AliasesFileParse)?;

    validate_aliases(&aliases_file)?;

    Ok(aliases_file)
}

fn validate_aliases(aliases_file: &AliasesFile) -> Result<(), ConfigError> {
    let mut seen_variants = HashSet::new();

    for alias in &aliases_file.aliases {
        if alias.variant.trim().is_empty() {
            return Err(ConfigError::Validation(
                "alias variant must be non-empty".to_string(),
            ));
        }

        if alias.canonical.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "alias '{}' has an empty canonical name",
                alias.variant
            )));
        }

        if !seen_variants.insert(alias.variant.trim()) {
            return Err(ConfigError::Validation(format!(
                "duplicate alias variant: '{}'",
                alias.variant
            )));
        }
    }

    Ok(())
}

/// Maps raw brand labels from workbook rows to canonical brand keys and
/// matches brand keys across datasets.
#[derive(Debug, Clone)]
pub struct BrandResolver {
    aliases: HashMap<String, String>,
}

impl Default for BrandResolver {
    fn default() -> Self {
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|(variant, canonical)| ((*variant).to_string(), (*canonical).to_string()))
            .collect();
        Self { aliases }
    }
}

impl BrandResolver {
    /// Resolver seeded with [`DEFAULT_ALIASES`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with no aliases at all; only normalization applies.
    #[must_use]
    pub fn without_aliases() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Add or replace an alias. Returns the canonical name it previously
    /// mapped to, if any.
    pub fn add_alias(
        &mut self,
        variant: impl AsRef<str>,
        canonical: impl Into<String>,
    ) -> Option<String> {
        self.aliases
            .insert(variant.as_ref().trim().to_string(), canonical.into())
    }

    pub fn remove_alias(&mut self, variant: &str) -> Option<String> {
        self.aliases.remove(variant.trim())
    }

    /// Merge a loaded alias file over the current table.
    pub fn extend(&mut self, file: AliasesFile) {
        for alias in file.aliases {
            self.add_alias(alias.variant, alias.canonical);
        }
    }

    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Canonical brand key for a raw label: an exact alias hit after
    /// trimming, otherwise the normalized label with descriptions kept.
    #[must_use]
    pub fn canonicalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self.aliases.get(trimmed) {
            Some(canonical) => canonical.clone(),
            None => normalize_brand_name(trimmed, false),
        }
    }
}

/// Find the candidate that refers to the same brand as `name`.
///
/// Tries exact equality, then normalized equality, then core equality,
/// each over the whole candidate list in order. The first hit wins, so
/// two candidates sharing a core are not disambiguated.
pub fn find_match<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&'a str> = candidates.into_iter().collect();

    if let Some(hit) = candidates.iter().copied().find(|c| *c == name) {
        return Some(hit);
    }

    let normalized = normalize_brand_name(name, true);
    if let Some(hit) = candidates
        .iter()
        .copied()
        .find(|c| normalize_brand_name(c, true) == normalized)
    {
        return Some(hit);
    }

    candidates.into_iter().find(|c| same_brand(name, c))
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
