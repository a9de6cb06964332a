//! Deterministic JSON output for keymaps
//!
//! Attribute order comes from the field order of [`Context`](super::Context) and
//! [`Binding`](super::Binding); unset and empty attributes are skipped at the
//! field level. This module only decides how the JSON is laid out.
//!
//! Two layouts are produced:
//!
//! ```text
//! indent = Some(2)          indent = None
//! {                         {"key": "selector", "operator": "equal"}
//!   "key": "selector",
//!   "operator": "equal"
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;

use super::error::KeymapError;

/// First line of every generated keymap file
pub const FILE_HEADER: &str = "// This file is generated, do not edit it by hand!\n";

/// Layout options for generated JSON
///
/// Only indentation and ASCII escaping can be changed; separators and key order are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Spaces per nesting level; `None` writes everything on one line
    pub indent: Option<usize>,
    /// Escape every non-ASCII character (and DEL) as `\uXXXX`
    pub ensure_ascii: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            ensure_ascii: true,
        }
    }
}

impl JsonOptions {
    /// Single-line output
    pub fn compact() -> Self {
        Self {
            indent: None,
            ..Self::default()
        }
    }

    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }

    pub fn ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }
}

/// Serialize a context, a binding, a keymap or a slice of those
pub fn to_json<T>(value: &T, options: &JsonOptions) -> Result<String, KeymapError>
where
    T: Serialize + ?Sized,
{
    let mut out = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, KeymapFormatter::new(options));
    value.serialize(&mut serializer)?;

    String::from_utf8(out).map_err(|e| {
        KeymapError::Serialize(<serde_json::Error as serde::ser::Error>::custom(e))
    })
}

/// Nulls, empty arrays and empty objects are never written
pub(crate) fn is_blank(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// serde_json formatter producing the keymap layout
///
/// Indented output separates items with `,` plus a newline; single-line output
/// uses `", "`. Keys are always followed by `": "`.
struct KeymapFormatter {
    indent: Option<Vec<u8>>,
    current_indent: usize,
    has_value: bool,
    ensure_ascii: bool,
}

impl KeymapFormatter {
    fn new(options: &JsonOptions) -> Self {
        Self {
            indent: options.indent.map(|width| vec![b' '; width]),
            current_indent: 0,
            has_value: false,
            ensure_ascii: options.ensure_ascii,
        }
    }

    fn write_separator<W>(&self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !first {
            let separator: &[u8] = if self.indent.is_some() { b"," } else { b", " };
            writer.write_all(separator)?;
        }
        self.write_line_start(writer)
    }

    fn write_line_start<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let Some(indent) = &self.indent else {
            return Ok(());
        };
        writer.write_all(b"\n")?;
        for _ in 0..self.current_indent {
            writer.write_all(indent)?;
        }
        Ok(())
    }

    fn close<W>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.current_indent -= 1;
        if self.has_value {
            self.write_line_start(writer)?;
        }
        writer.write_all(bracket)
    }
}

impl Formatter for KeymapFormatter {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.close(writer, b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_separator(writer, first)
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.close(writer, b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_separator(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !self.ensure_ascii {
            return writer.write_all(fragment.as_bytes());
        }

        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
