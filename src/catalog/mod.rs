//! Category schema of the three selector wheels.
//!
//! A [`Catalog`] lists the options of the Level, Leistung and Disziplin axes.
//! It is passed explicitly to everything that validates category values, so a
//! changed schema only needs a different catalog value.

mod wheels;

pub use wheels::Wheels;

use std::fmt;

use crate::common::{Error, Result};

/// Level options, in wheel order.
pub const LEVELS: [&str; 3] = ["Junior", "Mid-Level", "Senior"];

/// Leistung options, in wheel order.
pub const LEISTUNGEN: [&str; 13] = [
    "Event",
    "Content",
    "Video",
    "Audio",
    "Social Media",
    "Dialog",
    "Kommunikation",
    "Wissenschaft",
    "Print",
    "Kampagne",
    "Web",
    "Presse/PR",
    "UX/UI",
];

/// Disziplin options, in wheel order.
pub const DISZIPLINEN: [&str; 6] = ["Beratung", "Design", "Konzept", "Text", "Redaktion", "Analyse"];

/// One of the three selector axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Level,
    Leistung,
    Disziplin,
}

impl Axis {
    /// All axes in wheel order.
    pub const ALL: [Axis; 3] = [Axis::Level, Axis::Leistung, Axis::Disziplin];

    /// Position of this axis in a wheel index triple.
    #[inline]
    pub fn position(self) -> usize {
        match self {
            Axis::Level => 0,
            Axis::Leistung => 1,
            Axis::Disziplin => 2,
        }
    }

    /// Display name of the axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::Level => "Level",
            Axis::Leistung => "Leistung",
            Axis::Disziplin => "Disziplin",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated `(level, leistung, disziplin)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection<'a> {
    pub level: &'a str,
    pub leistung: &'a str,
    pub disziplin: &'a str,
}

/// Option lists of all three axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    levels: Vec<String>,
    leistungen: Vec<String>,
    disziplinen: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The schema shipped with this version of the crate.
    pub fn standard() -> Self {
        Self::new(LEVELS, LEISTUNGEN, DISZIPLINEN)
    }

    /// Build a catalog from arbitrary option lists.
    pub fn new<L, S, D>(levels: L, leistungen: S, disziplinen: D) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
            leistungen: leistungen.into_iter().map(Into::into).collect(),
            disziplinen: disziplinen.into_iter().map(Into::into).collect(),
        }
    }

    /// Options of one axis, in wheel order.
    pub fn options(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Level => &self.levels,
            Axis::Leistung => &self.leistungen,
            Axis::Disziplin => &self.disziplinen,
        }
    }

    /// Check whether `value` is an option of `axis`.
    #[inline]
    pub fn contains(&self, axis: Axis, value: &str) -> bool {
        self.options(axis).iter().any(|option| option == value)
    }

    /// Fail with [`Error::InvalidArgument`] unless `value` is an option of `axis`.
    pub fn validate(&self, axis: Axis, value: &str) -> Result<()> {
        if self.contains(axis, value) {
            Ok(())
        } else {
            Err(Error::InvalidArgument {
                axis,
                value: value.to_string(),
            })
        }
    }

    /// Validate a full triple.
    pub fn select<'a>(
        &self,
        level: &'a str,
        leistung: &'a str,
        disziplin: &'a str,
    ) -> Result<Selection<'a>> {
        self.validate(Axis::Level, level)?;
        self.validate(Axis::Leistung, leistung)?;
        self.validate(Axis::Disziplin, disziplin)?;
        Ok(Selection {
            level,
            leistung,
            disziplin,
        })
    }

    /// Resolve raw wheel indices to a triple.
    ///
    /// Each index is reduced modulo the option count of its axis.
    pub fn resolve(&self, indices: [usize; 3]) -> Result<Selection<'_>> {
        Ok(Selection {
            level: self.pick(Axis::Level, indices)?,
            leistung: self.pick(Axis::Leistung, indices)?,
            disziplin: self.pick(Axis::Disziplin, indices)?,
        })
    }

    fn pick(&self, axis: Axis, indices: [usize; 3]) -> Result<&str> {
        let options = self.options(axis);
        if options.is_empty() {
            return Err(Error::EmptyAxis(axis));
        }
        Ok(options[indices[axis.position()] % options.len()].as_str())
    }
}
