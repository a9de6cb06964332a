//! Keymap container collecting bindings into one keymap file

use std::fmt;
use std::io;
use std::ops::ShlAssign;

use serde::{Serialize, Serializer};

use super::binding::{Binding, When};
use super::context::{Context, MatchScope};
use super::error::KeymapError;
use super::json::{to_json, JsonOptions, FILE_HEADER};

/// Settings applied to every binding added to a [`Keymap`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeymapOptions {
    /// Match scope for conditions that don't choose one
    pub default_match_all: Option<MatchScope>,
    /// Conditions appended to every binding
    pub common_context: Vec<Context>,
}

impl KeymapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_match_all(mut self, scope: MatchScope) -> Self {
        self.default_match_all = Some(scope);
        self
    }

    pub fn common_context(mut self, contexts: impl IntoIterator<Item = Context>) -> Self {
        self.common_context = contexts.into_iter().collect();
        self
    }
}

/// Anything that can be added to a keymap: bindings, nested lists, other keymaps
///
/// Borrowed bindings and keymaps are cloned, so a keymap never shares state
/// with the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingSource {
    Binding(Binding),
    Many(Vec<BindingSource>),
    /// A nested keymap contributes its already processed bindings
    Keymap(Keymap),
}

impl BindingSource {
    fn flatten_into(self, out: &mut Vec<Binding>) {
        match self {
            BindingSource::Binding(binding) => out.push(binding),
            BindingSource::Many(sources) => {
                for source in sources {
                    source.flatten_into(out);
                }
            }
            BindingSource::Keymap(keymap) => out.extend(keymap.bindings),
        }
    }
}

impl From<Binding> for BindingSource {
    fn from(binding: Binding) -> Self {
        BindingSource::Binding(binding)
    }
}

impl From<&Binding> for BindingSource {
    fn from(binding: &Binding) -> Self {
        BindingSource::Binding(binding.clone())
    }
}

impl From<When> for BindingSource {
    fn from(when: When) -> Self {
        BindingSource::Binding(when.end())
    }
}

impl From<Keymap> for BindingSource {
    fn from(keymap: Keymap) -> Self {
        BindingSource::Keymap(keymap)
    }
}

impl From<&Keymap> for BindingSource {
    fn from(keymap: &Keymap) -> Self {
        BindingSource::Keymap(keymap.clone())
    }
}

impl<T: Into<BindingSource>> From<Vec<T>> for BindingSource {
    fn from(sources: Vec<T>) -> Self {
        BindingSource::Many(sources.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<BindingSource>, const N: usize> From<[T; N]> for BindingSource {
    fn from(sources: [T; N]) -> Self {
        BindingSource::Many(sources.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<BindingSource> + Clone> From<&[T]> for BindingSource {
    fn from(sources: &[T]) -> Self {
        BindingSource::Many(sources.iter().cloned().map(Into::into).collect())
    }
}

impl<A, B> From<(A, B)> for BindingSource
where
    A: Into<BindingSource>,
    B: Into<BindingSource>,
{
    fn from((a, b): (A, B)) -> Self {
        BindingSource::Many(vec![a.into(), b.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for BindingSource
where
    A: Into<BindingSource>,
    B: Into<BindingSource>,
    C: Into<BindingSource>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        BindingSource::Many(vec![a.into(), b.into(), c.into()])
    }
}

/// An ordered collection of key bindings, written out as one keymap file
///
/// Every batch of bindings added to the keymap is copied, flattened, extended
/// with the common context and given the default match scope, in that order.
/// Bindings are never removed; output order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keymap {
    options: KeymapOptions,
    bindings: Vec<Binding>,
}

impl Keymap {
    /// Create a keymap with default options
    pub fn new(bindings: impl Into<BindingSource>) -> Self {
        Self::with_options(KeymapOptions::default(), bindings)
    }

    /// Create a keymap with a default match scope and/or common context
    pub fn with_options(options: KeymapOptions, bindings: impl Into<BindingSource>) -> Self {
        let mut keymap = Self {
            options,
            bindings: Vec::new(),
        };
        keymap.extend(bindings);
        keymap
    }

    /// Append bindings after the existing ones
    pub fn extend(&mut self, bindings: impl Into<BindingSource>) -> &mut Self {
        let processed = self.preprocess(bindings.into());
        self.bindings.extend(processed);
        self
    }

    /// Append a single binding
    pub fn push(&mut self, binding: impl Into<Binding>) -> &mut Self {
        self.extend(BindingSource::Binding(binding.into()))
    }

    fn preprocess(&self, source: BindingSource) -> Vec<Binding> {
        let mut batch = Vec::new();
        source.flatten_into(&mut batch);

        for binding in &mut batch {
            binding
                .context_mut()
                .extend(self.options.common_context.iter().cloned());
        }

        let default_scope = self.options.default_match_all;
        for ctx in batch.iter_mut().flat_map(|b| b.context_mut().iter_mut()) {
            ctx.apply_default_match_scope(default_scope);
        }

        tracing::debug!(
            bindings = batch.len(),
            common_context = self.options.common_context.len(),
            "Preprocessed keymap batch"
        );
        batch
    }

    /// Serialize the bindings as JSON
    pub fn to_json(&self, options: &JsonOptions) -> Result<String, KeymapError> {
        to_json(&self.bindings, options)
    }

    /// Write the file header, the JSON and a trailing newline to `sink`
    ///
    /// Everything is rendered first and handed to the sink in one `write_all`;
    /// a failing sink is reported as [`KeymapError::Write`].
    pub fn write_to<W>(&self, sink: &mut W, options: &JsonOptions) -> Result<(), KeymapError>
    where
        W: io::Write + ?Sized,
    {
        let json = self.to_json(options)?;
        let mut document = String::with_capacity(FILE_HEADER.len() + json.len() + 1);
        document.push_str(FILE_HEADER);
        document.push_str(&json);
        document.push('\n');

        sink.write_all(document.as_bytes())?;
        tracing::trace!(bytes = document.len(), "Wrote keymap");
        Ok(())
    }

    /// Parse a generated keymap back into a container
    ///
    /// Leading `//` comment lines (such as [`FILE_HEADER`]) are skipped. The
    /// bindings are taken as they are, without common context or default scope.
    pub fn from_json(text: &str) -> Result<Self, KeymapError> {
        let mut body = text;
        while body.trim_start().starts_with("//") {
            let trimmed = body.trim_start();
            body = match trimmed.find('\n') {
                Some(end) => &trimmed[end + 1..],
                None => "",
            };
        }

        let bindings: Vec<Binding> =
            serde_json::from_str(body).map_err(|e| KeymapError::Parse(e.to_string()))?;

        Ok(Self {
            options: KeymapOptions::default(),
            bindings,
        })
    }

    pub fn options(&self) -> &KeymapOptions {
        &self.options
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<T: Into<Binding>> ShlAssign<T> for Keymap {
    fn shl_assign(&mut self, binding: T) {
        self.push(binding);
    }
}

impl<'a> IntoIterator for &'a Keymap {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

impl IntoIterator for Keymap {
    type Item = Binding;
    type IntoIter = std::vec::IntoIter<Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

impl Serialize for Keymap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bindings.serialize(serializer)
    }
}

impl fmt::Display for Keymap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self
            .to_json(&JsonOptions::default())
            .map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
