use regex::Regex;
use serde::Deserialize;

use crate::decls::DeclKind;
use crate::error::{DocpatchError, Result};

/// Whether a matching rule pulls a declaration in or throws it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleAction {
    Include,
    Exclude,
}

/// How a rule's value is compared against a declaration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// The name must equal the value exactly.
    Exact,
    /// The value is a regex that must match at the start of the name.
    Pattern,
}

/// A single include/exclude rule keyed on declaration kind and name.
#[derive(Debug)]
pub struct FilterRule {
    pub action: RuleAction,
    pub kind: DeclKind,
    match_kind: MatchKind,
    value: String,
    pattern: Option<Regex>,
}

impl FilterRule {
    /// Rule that matches one name verbatim.
    pub fn exact(action: RuleAction, kind: DeclKind, value: &str) -> Self {
        FilterRule {
            action,
            kind,
            match_kind: MatchKind::Exact,
            value: value.to_owned(),
            pattern: None,
        }
    }

    /// Rule that matches names by regex. The pattern is compiled up front so
    /// a bad one fails the run before any scanning happens.
    pub fn pattern(action: RuleAction, kind: DeclKind, value: &str) -> Result<Self> {
        let pattern = Regex::new(value).map_err(|source| DocpatchError::InvalidRule {
            pattern: value.to_owned(),
            source,
        })?;
        Ok(FilterRule {
            action,
            kind,
            match_kind: MatchKind::Pattern,
            value: value.to_owned(),
            pattern: Some(pattern),
        })
    }

    /// Whether this rule applies to the given declaration.
    ///
    /// Pattern rules are anchored at the head of the name: an interior match
    /// does not count, and a full-name match is not required.
    pub fn matches(&self, name: &str, kind: DeclKind) -> bool {
        if kind != self.kind {
            return false;
        }
        match self.match_kind {
            MatchKind::Exact => name == self.value,
            MatchKind::Pattern => self
                .pattern
                .as_ref()
                .is_some_and(|re| re.find(name).is_some_and(|m| m.start() == 0)),
        }
    }
}

/// An ordered set of filter rules.
///
/// An empty set accepts everything. A non-empty set accepts a declaration
/// only when at least one include rule matches and no exclude rule does.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<FilterRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    pub fn from_rules(rules: Vec<FilterRule>) -> Self {
        RuleSet { rules }
    }

    pub fn push(&mut self, rule: FilterRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn accepts(&self, name: &str, kind: DeclKind) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let mut included = false;
        for rule in &self.rules {
            if !rule.matches(name, kind) {
                continue;
            }
            match rule.action {
                RuleAction::Include => included = true,
                RuleAction::Exclude => return false,
            }
        }
        included
    }
}

#[cfg(test)]
#[path = "../tests/src/filter_tests.rs"]
mod tests;
