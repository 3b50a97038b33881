//! Classification of `wlstExtClasspath` entries.
//!
//! An entry is either a literal filesystem path or a dependency coordinate of
//! the form `group:artifact:type` (for example `org.antlr:antlr4-runtime:jar`).
//! Coordinates are emitted as `${group:artifact:type}` placeholders and replaced
//! with a resolved path just before the interpreter is launched.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

const COORDINATE_PATTERN: &str = r"^[A-Za-z0-9_.\-]+:[A-Za-z0-9_.\-]+:[A-Za-z0-9]+$";
const PLACEHOLDER_PATTERN: &str = r"\$\{([A-Za-z0-9_.\-]+:[A-Za-z0-9_.\-]+:[A-Za-z0-9]+)\}";

fn coordinate_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(COORDINATE_PATTERN).expect("valid coordinate regex"))
}

fn placeholder_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid placeholder regex"))
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    raw: String,
}

impl Coordinate {
    /// Parses `raw` when the whole string is a `group:artifact:type` token.
    pub fn parse(raw: &str) -> Option<Self> {
        coordinate_regex().is_match(raw).then(|| Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn group(&self) -> &str {
        self.raw.split(':').next().unwrap_or_default()
    }

    pub fn artifact(&self) -> &str {
        self.raw.split(':').nth(1).unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.raw.split(':').nth(2).unwrap_or_default()
    }

    /// `${group:artifact:type}`
    pub fn placeholder(&self) -> String {
        format!("${{{}}}", self.raw)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClasspathEntry {
    Coordinate(Coordinate),
    Path(PathBuf),
}

impl ClasspathEntry {
    pub fn parse(raw: &str) -> Self {
        match Coordinate::parse(raw) {
            Some(coordinate) => Self::Coordinate(coordinate),
            None => Self::Path(Path::new(raw).to_path_buf()),
        }
    }
}

/// Rewrites every `${group:artifact:type}` placeholder in `value`.
///
/// `lookup` returns `Ok(None)` to keep a placeholder verbatim. The first error
/// returned by `lookup` aborts the rewrite.
pub fn replace_placeholders<E>(
    value: &str,
    mut lookup: impl FnMut(&Coordinate) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let mut rendered = String::with_capacity(value.len());
    let mut last = 0;
    for captures in placeholder_regex().captures_iter(value) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let coordinate = captures.get(1).map_or("", |m| m.as_str());
        rendered.push_str(&value[last..whole.start()]);
        let coordinate = Coordinate {
            raw: coordinate.to_string(),
        };
        match lookup(&coordinate)? {
            Some(resolved) => rendered.push_str(&resolved),
            None => rendered.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    rendered.push_str(&value[last..]);
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn coordinates_match_the_whole_entry() {
        let parsed = Coordinate::parse("org.antlr:antlr4-runtime:jar").expect("coordinate");
        assert_eq!(parsed.group(), "org.antlr");
        assert_eq!(parsed.artifact(), "antlr4-runtime");
        assert_eq!(parsed.kind(), "jar");
        assert_eq!(parsed.placeholder(), "${org.antlr:antlr4-runtime:jar}");

        assert!(Coordinate::parse("org.foo:bar:jar:1.0").is_none());
        assert!(Coordinate::parse("org.foo:bar:ja-r").is_none());
        assert!(Coordinate::parse("/abs/path/x.jar").is_none());
        assert!(Coordinate::parse("C:\\libs\\x.jar").is_none());
    }

    #[test]
    fn entries_fall_back_to_paths() {
        assert_eq!(
            ClasspathEntry::parse("lib/extra.jar"),
            ClasspathEntry::Path(PathBuf::from("lib/extra.jar"))
        );
        assert!(matches!(
            ClasspathEntry::parse("com.oracle:ojdbc8:jar"),
            ClasspathEntry::Coordinate(_)
        ));
    }

    #[test]
    fn placeholders_are_replaced_or_kept() {
        let value = "${org.foo:bar:jar}:/abs/x.jar:${org.baz:qux:jar}";
        let rendered = replace_placeholders(value, |coordinate| {
            Ok::<_, Infallible>(
                (coordinate.artifact() == "bar").then(|| "/repo/bar-1.0.jar".to_string()),
            )
        })
        .expect("infallible");
        assert_eq!(rendered, "/repo/bar-1.0.jar:/abs/x.jar:${org.baz:qux:jar}");
    }

    #[test]
    fn placeholder_lookup_errors_propagate() {
        let err = replace_placeholders("${a:b:c}", |_| Err("boom")).expect_err("lookup fails");
        assert_eq!(err, "boom");
    }
}
