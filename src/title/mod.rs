//! Job-title composition.
//!
//! A title is built from three parts: an optional level qualifier, a
//! Leistung-specific compound and the role noun of the Disziplin. Most
//! Leistungen produce `<Leistung>-<Rolle>`, but a handful of them form
//! irregular German compounds. Those exceptions live in an ordered decision
//! table where the first matching row wins.
//!
//! # Example
//!
//! ```rust
//! use jobslot::{Catalog, compose_title};
//!
//! let catalog = Catalog::standard();
//! let title = compose_title(&catalog, "Senior", "Wissenschaft", "Text")?;
//! assert_eq!(title, "Senior Wissenschaftstexter:in");
//! # Ok::<(), jobslot::Error>(())
//! ```

mod roles;

pub use roles::{DEFAULT_ROLE_STEM, DEFAULT_ROLE_TITLE, Role};

use crate::catalog::{Catalog, Selection};
use crate::common::Result;

/// Level shown without qualifier.
pub const NEUTRAL_LEVEL: &str = "Mid-Level";

/// How a decision-table row builds the compound after the level prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    /// A complete irregular compound
    Fixed(&'static str),
    /// `prefix + role_stem + ":in"`
    Stem(&'static str),
    /// `prefix + role_title`
    Titled(&'static str),
}

/// One row of the special-case table.
#[derive(Debug, Clone, Copy)]
struct TitleRule {
    leistung: &'static str,
    /// `None` matches every Disziplin
    disziplin: Option<&'static str>,
    form: Form,
}

const fn rule(leistung: &'static str, disziplin: Option<&'static str>, form: Form) -> TitleRule {
    TitleRule {
        leistung,
        disziplin,
        form,
    }
}

/// Special cases in precedence order. Rows for one Leistung keep the
/// discipline-specific entries before the catch-all.
static TITLE_RULES: &[TitleRule] = &[
    rule("Wissenschaft", Some("Text"), Form::Fixed("Wissenschaftstexter:in")),
    rule("Wissenschaft", None, Form::Stem("Wissenschafts")),
    rule("Kommunikation", None, Form::Stem("Kommunikations")),
    rule("Kampagne", Some("Design"), Form::Fixed("Kampagnen-Designer:in")),
    rule("Kampagne", Some("Beratung"), Form::Fixed("Kampagnen-Berater:in")),
    rule("Kampagne", None, Form::Titled("Kampagnen-")),
    rule("Web", Some("Design"), Form::Fixed("Web-Designer:in")),
    rule("Web", Some("Konzept"), Form::Fixed("Web-Konzeptioner:in")),
    rule("Web", None, Form::Titled("Web-")),
    rule("Presse/PR", Some("Beratung"), Form::Fixed("PR-Berater:in")),
    rule("Presse/PR", Some("Text"), Form::Fixed("Presse-Texter:in")),
    rule("Presse/PR", None, Form::Titled("PR-")),
    rule("UX/UI", Some("Design"), Form::Fixed("UX/UI-Designer:in")),
    rule("UX/UI", None, Form::Titled("UX/UI-")),
];

impl TitleRule {
    fn matches(&self, leistung: &str, disziplin: &str) -> bool {
        self.leistung == leistung && self.disziplin.is_none_or(|d| d == disziplin)
    }
}

/// Compose the title of a triple after validating it against `catalog`.
///
/// Out-of-domain values fail with [`Error::InvalidArgument`](crate::Error::InvalidArgument).
pub fn compose_title(
    catalog: &Catalog,
    level: &str,
    leistung: &str,
    disziplin: &str,
) -> Result<String> {
    let selection = catalog.select(level, leistung, disziplin)?;
    Ok(render(&selection))
}

/// Compose the title of an already validated triple.
pub fn render(selection: &Selection<'_>) -> String {
    let role = Role::of(selection.disziplin);
    let mut title = level_prefix(selection.level);

    let special = TITLE_RULES
        .iter()
        .find(|rule| rule.matches(selection.leistung, selection.disziplin));

    match special.map(|rule| rule.form) {
        Some(Form::Fixed(compound)) => title.push_str(compound),
        Some(Form::Stem(prefix)) => {
            title.push_str(prefix);
            title.push_str(role.stem);
            title.push_str(":in");
        },
        Some(Form::Titled(prefix)) => {
            title.push_str(prefix);
            title.push_str(role.title);
        },
        None => {
            title.push_str(&hyphenate(selection.leistung));
            title.push('-');
            title.push_str(role.title);
        },
    }

    title
}

fn level_prefix(level: &str) -> String {
    if level == NEUTRAL_LEVEL {
        String::new()
    } else {
        format!("{level} ")
    }
}

/// Join the whitespace-separated words of `term` with hyphens.
pub fn hyphenate(term: &str) -> String {
    term.split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::catalog::{Axis, DISZIPLINEN, LEISTUNGEN, LEVELS};

    fn title(level: &str, leistung: &str, disziplin: &str) -> String {
        compose_title(&Catalog::standard(), level, leistung, disziplin).unwrap()
    }

    #[test]
    fn neutral_level_is_suppressed() {
        assert_eq!(title("Mid-Level", "Event", "Design"), "Event-Designer:in");
    }

    #[test]
    fn multi_word_leistung_is_hyphenated() {
        assert_eq!(title("Junior", "Social Media", "Text"), "Junior Social-Media-Texter:in");
    }

    #[test]
    fn wissenschaft_compounds() {
        assert_eq!(title("Senior", "Wissenschaft", "Text"), "Senior Wissenschaftstexter:in");
        assert_eq!(title("Junior", "Wissenschaft", "Beratung"), "Junior Wissenschaftsberater:in");
        assert_eq!(title("Mid-Level", "Wissenschaft", "Analyse"), "Wissenschaftsanalyst:in");
    }

    #[test]
    fn kommunikation_uses_stem_for_every_discipline() {
        assert_eq!(title("Senior", "Kommunikation", "Text"), "Senior Kommunikationstexter:in");
        assert_eq!(title("Mid-Level", "Kommunikation", "Design"), "Kommunikationsdesigner:in");
    }

    #[test]
    fn kampagne_branches() {
        assert_eq!(title("Junior", "Kampagne", "Design"), "Junior Kampagnen-Designer:in");
        assert_eq!(title("Mid-Level", "Kampagne", "Beratung"), "Kampagnen-Berater:in");
        assert_eq!(title("Senior", "Kampagne", "Redaktion"), "Senior Kampagnen-Redakteur:in");
    }

    #[test]
    fn web_branches() {
        assert_eq!(title("Mid-Level", "Web", "Design"), "Web-Designer:in");
        assert_eq!(title("Senior", "Web", "Konzept"), "Senior Web-Konzeptioner:in");
        assert_eq!(title("Junior", "Web", "Analyse"), "Junior Web-Analyst:in");
    }

    #[test]
    fn presse_branches() {
        assert_eq!(title("Mid-Level", "Presse/PR", "Beratung"), "PR-Berater:in");
        assert_eq!(title("Junior", "Presse/PR", "Text"), "Junior Presse-Texter:in");
        assert_eq!(title("Senior", "Presse/PR", "Konzept"), "Senior PR-Konzeptioner:in");
    }

    #[test]
    fn ux_ui_branches() {
        assert_eq!(title("Senior", "UX/UI", "Design"), "Senior UX/UI-Designer:in");
        assert_eq!(title("Mid-Level", "UX/UI", "Konzept"), "UX/UI-Konzeptioner:in");
    }

    #[test]
    fn default_branch_uses_mapped_role_title() {
        for disziplin in DISZIPLINEN {
            let expected = format!("Print-{}", Role::of(disziplin).title);
            assert_eq!(title("Mid-Level", "Print", disziplin), expected);
        }
    }

    #[test]
    fn unmapped_discipline_falls_back_to_default_pair() {
        let catalog = Catalog::new(LEVELS, LEISTUNGEN, ["Strategie"]);
        let compose = |leistung: &str| compose_title(&catalog, "Senior", leistung, "Strategie").unwrap();

        assert_eq!(compose("Video"), "Senior Video-Spezialist:in");
        assert_eq!(compose("Wissenschaft"), "Senior Wissenschaftsspezialist:in");
        assert_eq!(compose("Web"), "Senior Web-Spezialist:in");
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let catalog = Catalog::standard();
        assert!(matches!(
            compose_title(&catalog, "Lead", "Event", "Design"),
            Err(Error::InvalidArgument {
                axis: Axis::Level,
                ..
            })
        ));
        assert!(matches!(
            compose_title(&catalog, "Junior", "Event", "Strategie"),
            Err(Error::InvalidArgument {
                axis: Axis::Disziplin,
                ..
            })
        ));
    }

    #[test]
    fn every_standard_triple_composes() {
        let catalog = Catalog::standard();
        for level in LEVELS {
            for leistung in LEISTUNGEN {
                for disziplin in DISZIPLINEN {
                    let title = compose_title(&catalog, level, leistung, disziplin).unwrap();
                    assert!(title.ends_with(":in"), "{title}");
                    assert!(!title.starts_with("Mid-Level"), "{title}");
                }
            }
        }
    }

    #[test]
    fn hyphenate_collapses_whitespace() {
        assert_eq!(hyphenate("Social  Media"), "Social-Media");
        assert_eq!(hyphenate("Event"), "Event");
    }
}
