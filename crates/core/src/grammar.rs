//! SemVer 2.0.0 line matching.
//!
//! Two anchored forms are recognised:
//!
//! - `<count>,<semver>` where `count` is an unsigned decimal
//! - `<semver>` on its own
//!
//! Matching is pure; the compiled patterns live in process-wide statics.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Canonical SemVer 2.0.0 grammar, without anchors.
const SEMVER: &str = concat!(
    r"(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)",
    r"(?:-(?P<prerelease>(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
    r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(?:\+(?P<build>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?",
);

fn bare_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("^{SEMVER}$")).expect("SemVer pattern is valid"))
}

fn counted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^(?P<count>[0-9]+),{SEMVER}$")).expect("counted pattern is valid")
    })
}

/// Fields extracted from one matching line. Borrows from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRecord<'a> {
    /// Explicit repetition count; `None` when the line carried no count field.
    pub count: Option<u64>,
    pub major: &'a str,
    pub minor: &'a str,
    pub patch: &'a str,
    pub prerelease: Option<&'a str>,
    pub build: Option<&'a str>,
}

/// Outcome of matching one line against the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch<'a> {
    Matched(VersionRecord<'a>),
    NoMatch,
}

impl<'a> LineMatch<'a> {
    #[must_use]
    pub const fn record(self) -> Option<VersionRecord<'a>> {
        match self {
            Self::Matched(record) => Some(record),
            Self::NoMatch => None,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Match `line` against the count-prefixed form, then the bare form.
#[must_use]
pub fn match_line(line: &str) -> LineMatch<'_> {
    match match_counted(line) {
        LineMatch::NoMatch => match_bare(line),
        matched => matched,
    }
}

/// Match only the `<count>,<semver>` form.
///
/// A count that does not fit in `u64` fails the form.
#[must_use]
pub fn match_counted(line: &str) -> LineMatch<'_> {
    let Some(caps) = counted_re().captures(line) else {
        return LineMatch::NoMatch;
    };
    let Some(count) = caps.name("count").and_then(|m| m.as_str().parse::<u64>().ok()) else {
        return LineMatch::NoMatch;
    };
    extract(&caps, Some(count))
}

/// Match only the bare `<semver>` form.
#[must_use]
pub fn match_bare(line: &str) -> LineMatch<'_> {
    bare_re()
        .captures(line)
        .map_or(LineMatch::NoMatch, |caps| extract(&caps, None))
}

fn extract<'a>(caps: &Captures<'a>, count: Option<u64>) -> LineMatch<'a> {
    let (Some(major), Some(minor), Some(patch)) =
        (caps.name("major"), caps.name("minor"), caps.name("patch"))
    else {
        return LineMatch::NoMatch;
    };
    LineMatch::Matched(VersionRecord {
        count,
        major: major.as_str(),
        minor: minor.as_str(),
        patch: patch.as_str(),
        prerelease: caps.name("prerelease").map(|m| m.as_str()),
        build: caps.name("build").map(|m| m.as_str()),
    })
}
