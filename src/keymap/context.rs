//! Context conditions for key bindings
//!
//! A context is a guard clause Sublime Text evaluates before a binding fires,
//! e.g. "the text preceding the caret ends with an underscore".

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::error::KeymapError;
use super::json::{is_blank, to_json, JsonOptions};

/// Comparison operators understood by Sublime Text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// The context's value must equal the operand
    Equal,
    /// The context's value must not equal the operand
    NotEqual,
    /// Full regex match
    RegexMatch,
    /// Negated full regex match
    NotRegexMatch,
    /// Partial regex match
    RegexContains,
    /// Negated partial regex match
    NotRegexContains,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::RegexMatch,
        Operator::NotRegexMatch,
        Operator::RegexContains,
        Operator::NotRegexContains,
    ];

    /// Name of the operator as written in a keymap file
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Equal => "equal",
            Operator::NotEqual => "not_equal",
            Operator::RegexMatch => "regex_match",
            Operator::NotRegexMatch => "not_regex_match",
            Operator::RegexContains => "regex_contains",
            Operator::NotRegexContains => "not_regex_contains",
        }
    }
}

impl FromStr for Operator {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Operator::Equal),
            "not_equal" => Ok(Operator::NotEqual),
            "regex_match" => Ok(Operator::RegexMatch),
            "not_regex_match" => Ok(Operator::NotRegexMatch),
            "regex_contains" => Ok(Operator::RegexContains),
            "not_regex_contains" => Ok(Operator::NotRegexContains),
            _ => Err(KeymapError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

/// Whether a condition must hold for all selections or for at least one
///
/// Written to the keymap as the boolean `match_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchScope {
    /// At least one selection must satisfy the test (`"match_all": false`)
    Any,
    /// Every selection must satisfy the test (`"match_all": true`)
    All,
}

impl MatchScope {
    pub const fn from_match_all(match_all: bool) -> Self {
        if match_all {
            MatchScope::All
        } else {
            MatchScope::Any
        }
    }

    pub const fn match_all(self) -> bool {
        matches!(self, MatchScope::All)
    }
}

impl Serialize for MatchScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.match_all())
    }
}

impl<'de> Deserialize<'de> for MatchScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(MatchScope::from_match_all)
    }
}

/// A single condition of a key binding
///
/// Attributes are emitted in the order `key`, `operator`, `operand`, `match_all`;
/// unset attributes are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "is_blank")]
    operand: Option<Value>,
    #[serde(
        rename = "match_all",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    match_scope: Option<MatchScope>,
}

impl Context {
    /// Create a condition querying the context named `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: None,
            operand: None,
            match_scope: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn operand(&self) -> Option<&Value> {
        self.operand.as_ref()
    }

    pub fn match_scope(&self) -> Option<MatchScope> {
        self.match_scope
    }

    /// Set operator and operand together; last write wins
    pub(crate) fn set_comparison(&mut self, operator: Operator, operand: Value) {
        self.operator = Some(operator);
        self.operand = Some(operand);
    }

    pub(crate) fn set_match_scope(&mut self, scope: MatchScope) {
        self.match_scope = Some(scope);
    }

    /// Fill in the match scope unless one was chosen explicitly
    pub(crate) fn apply_default_match_scope(&mut self, default: Option<MatchScope>) {
        if self.match_scope.is_none() {
            self.match_scope = default;
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = to_json(self, &JsonOptions::compact()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Fluent operators shared by standalone contexts and contexts attached to a binding
///
/// Comparison methods return [`Condition::Output`]: the owning binding when the
/// condition was created with [`Binding::when`](super::Binding::when), the
/// context itself otherwise. `all()` and `any()` always return `Self` so that
/// a comparison can follow.
pub trait Condition: Sized {
    type Output;

    /// Set operator and operand, then hand back the owner
    fn with_operator(self, operator: Operator, operand: Value) -> Self::Output;

    fn with_match_scope(self, scope: MatchScope) -> Self;

    /// Require the test to succeed for all selections
    fn all(self) -> Self {
        self.with_match_scope(MatchScope::All)
    }

    /// Require the test to succeed for at least one selection
    fn any(self) -> Self {
        self.with_match_scope(MatchScope::Any)
    }

    /// Compare using an operator given by name
    ///
    /// Fails with [`KeymapError::UnsupportedOperator`] when `operator` isn't one
    /// of the names listed in [`Operator::ALL`].
    fn compare(
        self,
        operator: &str,
        operand: impl Into<Value>,
    ) -> Result<Self::Output, KeymapError> {
        let operator = operator.parse::<Operator>()?;
        Ok(self.with_operator(operator, operand.into()))
    }

    fn equal(self, operand: impl Into<Value>) -> Self::Output {
        self.with_operator(Operator::Equal, operand.into())
    }

    fn not_equal(self, operand: impl Into<Value>) -> Self::Output {
        self.with_operator(Operator::NotEqual, operand.into())
    }

    fn regex_match(self, pattern: impl Into<Value>) -> Self::Output {
        self.with_operator(Operator::RegexMatch, pattern.into())
    }

    fn not_regex_match(self, pattern: impl Into<Value>) -> Self::Output {
        self.with_operator(Operator::NotRegexMatch, pattern.into())
    }

    fn regex_contains(self, pattern: impl Into<Value>) -> Self::Output {
        self.with_operator(Operator::RegexContains, pattern.into())
    }

    fn not_regex_contains(self, pattern: impl Into<Value>) -> Self::Output {
        self.with_operator(Operator::NotRegexContains, pattern.into())
    }

    /// Shortcut for `equal(true)`
    fn is_true(self) -> Self::Output {
        self.equal(true)
    }

    /// Shortcut for `equal(false)`
    fn is_false(self) -> Self::Output {
        self.equal(false)
    }
}

impl Condition for Context {
    type Output = Context;

    fn with_operator(mut self, operator: Operator, operand: Value) -> Self::Output {
        self.set_comparison(operator, operand);
        self
    }

    fn with_match_scope(mut self, scope: MatchScope) -> Self {
        self.set_match_scope(scope);
        self
    }
}

/// Alias for [`Context::new`]
pub fn context(key: impl Into<String>) -> Context {
    Context::new(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_sets_key_only() {
        let ctx = Context::new("foo");
        assert_eq!(ctx.key(), "foo");
        assert_eq!(ctx.operator(), None);
        assert_eq!(ctx.operand(), None);
        assert_eq!(ctx.match_scope(), None);
    }

    #[test]
    fn test_every_operator_sets_operator_and_operand() {
        for operator in Operator::ALL {
            let ctx = Context::new("foo").compare(operator.as_str(), 42).unwrap();
            assert_eq!(ctx.operator(), Some(operator));
            assert_eq!(ctx.operand(), Some(&json!(42)));
        }
    }

    #[test]
    fn test_named_operators_match_compare() {
        assert_eq!(
            Context::new("a").not_equal(1),
            Context::new("a").compare("not_equal", 1).unwrap()
        );
        assert_eq!(
            Context::new("a").regex_match("^x"),
            Context::new("a").compare("regex_match", "^x").unwrap()
        );
        assert_eq!(
            Context::new("a").not_regex_match("^x"),
            Context::new("a").compare("not_regex_match", "^x").unwrap()
        );
        assert_eq!(
            Context::new("a").not_regex_contains("x"),
            Context::new("a").compare("not_regex_contains", "x").unwrap()
        );
    }

    #[test]
    fn test_unsupported_operator() {
        let err = Context::new("foo").compare("greater_than", 1).unwrap_err();
        assert!(
            matches!(err, KeymapError::UnsupportedOperator(ref name) if name == "greater_than")
        );
    }

    #[test]
    fn test_last_comparison_wins() {
        let ctx = Context::new("foo").equal(1).not_equal("two");
        assert_eq!(ctx.operator(), Some(Operator::NotEqual));
        assert_eq!(ctx.operand(), Some(&json!("two")));
    }

    #[test]
    fn test_all_and_any() {
        assert_eq!(Context::new("foo").all().match_scope(), Some(MatchScope::All));
        assert_eq!(Context::new("foo").any().match_scope(), Some(MatchScope::Any));
    }

    #[test]
    fn test_true_false_shortcuts() {
        assert_eq!(Context::new("foo").is_true(), Context::new("foo").equal(true));
        assert_eq!(Context::new("foo").is_false(), Context::new("foo").equal(false));
    }

    #[test]
    fn test_equality_over_public_attributes() {
        assert_eq!(Context::new("foo").all().equal(42), Context::new("foo").all().equal(42));
        assert_ne!(Context::new("foo"), Context::new("bar"));
        assert_ne!(Context::new("foo").all(), Context::new("foo").any());
        assert_ne!(Context::new("foo").equal(42), Context::new("foo").not_equal(42));
        assert_ne!(Context::new("foo").equal(42), Context::new("foo").equal(55));
    }

    #[test]
    fn test_default_match_scope_keeps_explicit_scope() {
        let mut explicit = Context::new("foo").any();
        explicit.apply_default_match_scope(Some(MatchScope::All));
        assert_eq!(explicit.match_scope(), Some(MatchScope::Any));

        let mut unset = Context::new("foo");
        unset.apply_default_match_scope(Some(MatchScope::All));
        assert_eq!(unset.match_scope(), Some(MatchScope::All));

        let mut still_unset = Context::new("foo");
        still_unset.apply_default_match_scope(None);
        assert_eq!(still_unset.match_scope(), None);
    }

    #[test]
    fn test_display_is_single_line() {
        let ctx = Context::new("selector").all().equal("text.asciidoc");
        assert_eq!(
            ctx.to_string(),
            r#"{"key": "selector", "operator": "equal", "operand": "text.asciidoc", "match_all": true}"#
        );
        assert_eq!(
            Context::new("selection_empty").is_true().to_string(),
            r#"{"key": "selection_empty", "operator": "equal", "operand": true}"#
        );
    }

    #[test]
    fn test_operator_round_trips_through_name() {
        for operator in Operator::ALL {
            assert_eq!(operator.as_str().parse::<Operator>().unwrap(), operator);
            assert_eq!(operator.to_string(), operator.as_str());
        }
    }
}
