//! Region alias table.
//!
//! Each canonical region registers its lowercased full name and every word of
//! that name as aliases. Matching is case-insensitive and whole-word, so
//! `south` never fires inside `southeast`.

use std::collections::HashSet;

use regex::Regex;

/// One alias and the canonical region it resolves to.
#[derive(Debug, Clone)]
struct Alias {
    token: String,
    region: usize,
    pattern: Regex,
}

/// Immutable alias → canonical region mapping, built once from a region list.
#[derive(Debug, Clone, Default)]
pub struct RegionAliases {
    regions: Vec<String>,
    aliases: Vec<Alias>,
}

impl RegionAliases {
    /// Build the table. When two regions share an alias the first one
    /// registered keeps it.
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        let mut seen = HashSet::new();

        for region in regions {
            let region = region.as_ref().trim();
            if region.is_empty() || table.regions.iter().any(|r| r == region) {
                continue;
            }
            let index = table.regions.len();
            table.regions.push(region.to_string());

            let lower = region.to_lowercase();
            let variants = std::iter::once(lower.as_str()).chain(lower.split_whitespace());
            for variant in variants {
                if !seen.insert(variant.to_string()) {
                    continue;
                }
                let pattern = match Regex::new(&format!(r"\b{}\b", regex::escape(variant))) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!(alias = variant, error = %e, "skipping region alias");
                        continue;
                    }
                };
                table.aliases.push(Alias {
                    token: variant.to_string(),
                    region: index,
                    pattern,
                });
            }
        }

        tracing::debug!(
            regions = table.regions.len(),
            aliases = table.aliases.len(),
            "region alias table built"
        );
        table
    }

    /// First alias (in registration order) found as a whole word in `query`.
    pub fn detect(&self, query: &str) -> Option<&str> {
        let lower = query.to_lowercase();
        self.aliases
            .iter()
            .find(|a| a.pattern.is_match(&lower))
            .map(|a| self.regions[a.region].as_str())
    }

    /// Resolve an exact alias (any case) to its canonical region.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let lower = name.trim().to_lowercase();
        self.aliases
            .iter()
            .find(|a| a.token == lower)
            .map(|a| self.regions[a.region].as_str())
    }

    /// Canonical regions in registration order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
