//! Binding struct mapping key combinations to a Sublime Text command

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::{Condition, Context, MatchScope, Operator};
use super::error::KeymapError;
use super::json::{to_json, JsonOptions};

/// A single key binding
///
/// Attributes are emitted in the order `keys`, `command`, `args`, `context`.
/// `args` always comes out sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BindingRecord")]
pub struct Binding {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    args: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    context: Vec<Context>,
}

impl Binding {
    /// Create a binding for one or more key combinations, e.g. `["ctrl+k", "ctrl+u"]`
    ///
    /// Keys are case-sensitive; modifiers are joined with `+`.
    pub fn new<I, S>(keys: I) -> Result<Self, KeymapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(KeymapError::InvalidBinding);
        }

        Ok(Self {
            keys,
            command: None,
            args: BTreeMap::new(),
            context: Vec::new(),
        })
    }

    /// Bind the keys to a command without arguments
    pub fn to(self, command: impl Into<String>) -> Self {
        self.to_with(command, std::iter::empty::<(String, Value)>())
    }

    /// Bind the keys to a command with arguments
    pub fn to_with<I, K, V>(mut self, command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.command = Some(command.into());
        self.args = args
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self
    }

    /// Start a new condition on this binding
    ///
    /// The condition is appended right away; the returned [`When`] gives the
    /// binding back once an operator is chosen.
    pub fn when(mut self, key: impl Into<String>) -> When {
        self.context.push(Context::new(key));
        When { binding: self }
    }

    /// Alias for [`Binding::when`]
    pub fn also(self, key: impl Into<String>) -> When {
        self.when(key)
    }

    /// Alias for [`Binding::when`]
    pub fn and_(self, key: impl Into<String>) -> When {
        self.when(key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn args(&self) -> &BTreeMap<String, Value> {
        &self.args
    }

    pub fn context(&self) -> &[Context] {
        &self.context
    }

    pub(crate) fn context_mut(&mut self) -> &mut Vec<Context> {
        &mut self.context
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = to_json(self, &JsonOptions::default()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Alias for [`Binding::new`]
pub fn bind<I, S>(keys: I) -> Result<Binding, KeymapError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Binding::new(keys)
}

/// A binding whose last condition is still waiting for an operator
#[derive(Debug, Clone, PartialEq)]
pub struct When {
    binding: Binding,
}

impl When {
    /// The condition being built
    pub fn context(&self) -> Option<&Context> {
        self.binding.context.last()
    }

    /// Give the binding back without setting an operator
    pub fn end(self) -> Binding {
        self.binding
    }

    fn pending(&mut self) -> Option<&mut Context> {
        self.binding.context.last_mut()
    }
}

impl Condition for When {
    type Output = Binding;

    fn with_operator(mut self, operator: Operator, operand: Value) -> Self::Output {
        if let Some(ctx) = self.pending() {
            ctx.set_comparison(operator, operand);
        }
        self.binding
    }

    fn with_match_scope(mut self, scope: MatchScope) -> Self {
        if let Some(ctx) = self.pending() {
            ctx.set_match_scope(scope);
        }
        self
    }
}

impl From<When> for Binding {
    fn from(when: When) -> Self {
        when.end()
    }
}

/// Wire shape of a binding, checked before it becomes a [`Binding`]
#[derive(Deserialize)]
struct BindingRecord {
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    args: BTreeMap<String, Value>,
    #[serde(default)]
    context: Vec<Context>,
}

impl TryFrom<BindingRecord> for Binding {
    type Error = KeymapError;

    fn try_from(record: BindingRecord) -> Result<Self, Self::Error> {
        let mut binding = Binding::new(record.keys)?;
        binding.command = record.command;
        binding.args = record.args;
        binding.context = record.context;
        Ok(binding)
    }
}
