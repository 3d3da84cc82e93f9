//! Role mapping from Disziplin to the person noun used in titles.

use phf::phf_map;

/// Role title used for a Disziplin without a mapping entry.
pub const DEFAULT_ROLE_TITLE: &str = "Spezialist:in";

/// Role stem used for a Disziplin without a mapping entry.
pub const DEFAULT_ROLE_STEM: &str = "spezialist";

/// Reader-facing role noun per Disziplin.
static ROLE_TITLE: phf::Map<&'static str, &'static str> = phf_map! {
    "Beratung" => "Berater:in",
    "Design" => "Designer:in",
    "Konzept" => "Konzeptioner:in",
    "Text" => "Texter:in",
    "Redaktion" => "Redakteur:in",
    "Analyse" => "Analyst:in",
};

/// Lowercase bound morpheme per Disziplin, used inside compounds.
static ROLE_STEM: phf::Map<&'static str, &'static str> = phf_map! {
    "Beratung" => "berater",
    "Design" => "designer",
    "Konzept" => "konzeptioner",
    "Text" => "texter",
    "Redaktion" => "redakteur",
    "Analyse" => "analyst",
};

/// Both role forms of one Disziplin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    /// Honorific form, e.g. `Berater:in`
    pub title: &'static str,
    /// Compound form, e.g. `berater`
    pub stem: &'static str,
}

impl Role {
    /// The pair used for unmapped disciplines.
    pub const DEFAULT: Role = Role {
        title: DEFAULT_ROLE_TITLE,
        stem: DEFAULT_ROLE_STEM,
    };

    /// Look up the role of `disziplin`, falling back to [`Role::DEFAULT`].
    ///
    /// Both forms fall back independently.
    pub fn of(disziplin: &str) -> Role {
        Role {
            title: ROLE_TITLE.get(disziplin).copied().unwrap_or(DEFAULT_ROLE_TITLE),
            stem: ROLE_STEM.get(disziplin).copied().unwrap_or(DEFAULT_ROLE_STEM),
        }
    }

    /// Whether `disziplin` has an entry in the mapping.
    #[inline]
    pub fn is_mapped(disziplin: &str) -> bool {
        ROLE_TITLE.contains_key(disziplin) && ROLE_STEM.contains_key(disziplin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DISZIPLINEN;

    #[test]
    fn every_standard_discipline_is_mapped() {
        for disziplin in DISZIPLINEN {
            assert!(Role::is_mapped(disziplin), "{disziplin} lacks a role");
        }
    }

    #[test]
    fn unmapped_discipline_gets_default_pair() {
        assert_eq!(Role::of("Strategie"), Role::DEFAULT);
    }

    #[test]
    fn mapped_forms() {
        let role = Role::of("Redaktion");
        assert_eq!(role.title, "Redakteur:in");
        assert_eq!(role.stem, "redakteur");
    }
}
