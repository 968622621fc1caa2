//! Checks a spreadsheet's heading row before any data row is read.
//!
//! Headings are declared as required, optional, ignored (glob with `*`) or
//! multiple. A multiple pattern uses `#` for a running number
//! (`policy_#` accepts `policy_1`, `policy_2`, ...). Several patterns passed
//! to one `multiple` call form a set: for every number used, each pattern in
//! the set must be present (`attachment_3_url` needs `attachment_3_title`).

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::RangeInclusive;

use regex::Regex;

#[derive(Debug, Clone)]
struct MultipleMatcher {
    patterns: Vec<(String, Regex)>,
    range: RangeInclusive<usize>,
}

impl MultipleMatcher {
    fn new(patterns: Vec<String>, range: RangeInclusive<usize>) -> Self {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let regex = numbered_pattern(&p);
                (p, regex)
            })
            .collect();
        Self { patterns, range }
    }

    /// Index of the matching pattern and the number in the heading
    fn match_heading(&self, heading: &str) -> Option<(usize, usize)> {
        self.patterns.iter().enumerate().find_map(|(i, (_, re))| {
            re.captures(heading)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .filter(|&n| n > 0)
                .map(|n| (i, n))
        })
    }

    fn describe(&self) -> String {
        self.patterns
            .iter()
            .map(|(p, _)| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Anchored regex where `#` captures a column number
pub(super) fn numbered_pattern(pattern: &str) -> Regex {
    pattern_regex(pattern, '#', r"(\d+)")
}

/// Anchored regex from a pattern where `wildcard` stands for `replacement`
fn pattern_regex(pattern: &str, wildcard: char, replacement: &str) -> Regex {
    let body = pattern
        .split(wildcard)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(replacement);
    Regex::new(&format!("^{body}$")).expect("escaped heading pattern is a valid regex")
}

fn quoted<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default)]
pub struct HeadingValidator {
    required: Vec<String>,
    optional: Vec<String>,
    multiples: Vec<MultipleMatcher>,
    ignored: Vec<Regex>,
}

impl HeadingValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn optional<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn multiple<I, S>(mut self, patterns: I, range: RangeInclusive<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns.into_iter().map(Into::into).collect();
        self.multiples.push(MultipleMatcher::new(patterns, range));
        self
    }

    pub fn ignored(mut self, glob: &str) -> Self {
        self.ignored.push(pattern_regex(glob, '*', ".*"));
        self
    }

    pub fn is_valid(&self, headings: &[String]) -> bool {
        self.errors(headings).is_empty()
    }

    pub fn errors(&self, headings: &[String]) -> Vec<String> {
        let mut errors = Vec::new();

        let present: HashSet<&str> = headings.iter().map(String::as_str).collect();

        let missing: Vec<&str> = self
            .required
            .iter()
            .map(String::as_str)
            .filter(|r| !present.contains(r))
            .collect();
        if !missing.is_empty() {
            errors.push(format!("missing fields: {}", quoted(missing)));
        }

        let mut seen = HashSet::new();
        let mut duplicates = BTreeSet::new();
        let mut unexpected = Vec::new();
        // matcher index -> number -> pattern indexes seen
        let mut numbered: BTreeMap<usize, BTreeMap<usize, BTreeSet<usize>>> = BTreeMap::new();

        for heading in headings {
            if !seen.insert(heading.as_str()) {
                duplicates.insert(heading.as_str());
                continue;
            }

            if self.required.iter().any(|r| r == heading)
                || self.optional.iter().any(|o| o == heading)
                || self.ignored.iter().any(|re| re.is_match(heading))
            {
                continue;
            }

            let matched = self
                .multiples
                .iter()
                .enumerate()
                .find_map(|(m, matcher)| matcher.match_heading(heading).map(|hit| (m, hit)));

            match matched {
                Some((m, (pattern, number))) => {
                    numbered
                        .entry(m)
                        .or_default()
                        .entry(number)
                        .or_default()
                        .insert(pattern);
                }
                None => unexpected.push(heading.as_str()),
            }
        }

        if !unexpected.is_empty() {
            errors.push(format!("unexpected fields: {}", quoted(unexpected)));
        }

        if !duplicates.is_empty() {
            errors.push(format!("duplicate fields: {}", quoted(duplicates)));
        }

        for (m, matcher) in self.multiples.iter().enumerate() {
            let numbers = numbered.remove(&m).unwrap_or_default();

            let mut incomplete = Vec::new();
            for (number, patterns) in &numbers {
                for (i, (pattern, _)) in matcher.patterns.iter().enumerate() {
                    if !patterns.contains(&i) {
                        incomplete.push(pattern.replace('#', &number.to_string()));
                    }
                }
            }
            if !incomplete.is_empty() {
                errors.push(format!(
                    "incomplete fields: {}",
                    quoted(incomplete.iter().map(String::as_str))
                ));
            }

            let count = numbers.len();
            if count > *matcher.range.end() {
                errors.push(format!(
                    "too many fields matching {}: {} (maximum {})",
                    matcher.describe(),
                    count,
                    matcher.range.end()
                ));
            } else if count < *matcher.range.start() {
                errors.push(format!(
                    "too few fields matching {}: {} (minimum {})",
                    matcher.describe(),
                    count,
                    matcher.range.start()
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn validator() -> HeadingValidator {
        HeadingValidator::new()
            .required(["title", "body"])
            .optional(["isbn"])
            .ignored("ignore_*")
            .multiple(["policy_#"], 0..=2)
            .multiple(["attachment_#_url", "attachment_#_title"], 0..=50)
    }

    #[test]
    fn accepts_declared_headings() {
        let h = headings(&[
            "title",
            "body",
            "isbn",
            "ignore_this",
            "policy_1",
            "policy_2",
            "attachment_1_url",
            "attachment_1_title",
        ]);
        assert!(validator().is_valid(&h), "{:?}", validator().errors(&h));
    }

    #[test]
    fn reports_missing_required_headings() {
        let errors = validator().errors(&headings(&["title"]));
        assert_eq!(errors, vec!["missing fields: 'body'".to_string()]);
    }

    #[test]
    fn reports_unexpected_headings() {
        let errors = validator().errors(&headings(&["title", "body", "colour", "policy_0"]));
        assert_eq!(errors, vec!["unexpected fields: 'colour', 'policy_0'".to_string()]);
    }

    #[test]
    fn reports_incomplete_sets() {
        let errors = validator().errors(&headings(&["title", "body", "attachment_2_url"]));
        assert_eq!(errors, vec!["incomplete fields: 'attachment_2_title'".to_string()]);
    }

    #[test]
    fn reports_too_many_numbered_headings() {
        let errors = validator().errors(&headings(&[
            "title", "body", "policy_1", "policy_2", "policy_3",
        ]));
        assert_eq!(
            errors,
            vec!["too many fields matching policy_#: 3 (maximum 2)".to_string()]
        );
    }

    #[test]
    fn reports_duplicate_headings() {
        let errors = validator().errors(&headings(&["title", "body", "title"]));
        assert_eq!(errors, vec!["duplicate fields: 'title'".to_string()]);
    }

    #[test]
    fn regex_metacharacters_in_patterns_are_literal() {
        let v = HeadingValidator::new().multiple(["a.b_#"], 0..=3);
        assert!(v.is_valid(&headings(&["a.b_1"])));
        assert!(!v.is_valid(&headings(&["axb_1"])));
    }
}
