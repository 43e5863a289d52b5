use tracing::trace;

use crate::errors::InvalidLevelError;
use crate::level::Level;
use crate::object::BaseObject;
use crate::value::{SeqKind, Value};

/// One indentation unit of multi-line output
pub(crate) const INDENT: &str = "  ";

/// Replaces line breaks in single line output
const NEWLINE_MARKER: &str = "< NEWLINE />";

/// Maximum length of single line output, in characters
const MAX_SINGLE_LINE: usize = 100;

/// Characters kept when single line output gets truncated
const TRUNCATED_LEN: usize = 97;

/// Number of sequence items listed at [`Level::Expanded`]
const EXPANDED_ITEMS: usize = 20;

/// Render a value at a raw integer verbosity level
///
/// The level is validated once here, before any rendering happens.
///
/// # Example
/// ```rust
/// use objrepr::{render_value, Value};
///
/// let value = Value::map([("a", 1), ("b", 2), ("c", 3)]);
/// assert_eq!(
///     render_value(&value, 1).unwrap(),
///     "dict(\n  #0 a: 1,\n  #1 b: 2,\n  #2 c: 3\n)"
/// );
/// assert!(render_value(&value, 3).is_err());
/// ```
pub fn render_value(value: &Value, level: i64) -> Result<String, InvalidLevelError> {
    let level = Level::try_from(level)?;
    Ok(value.render(level))
}

impl Value {
    /// Render the value at the given verbosity level
    pub fn render(&self, level: Level) -> String {
        Renderer::new().render(self, level)
    }
}

/// Indent every line after the first by one unit
fn indent(text: &str) -> String {
    text.replace('\n', &format!("\n{INDENT}"))
}

/// Force single line output and cap its length
fn single_line(output: String) -> String {
    let output = output.replace('\n', NEWLINE_MARKER);
    let len = output.chars().count();
    if len > MAX_SINGLE_LINE {
        let head: String = output.chars().take(TRUNCATED_LEN).collect();
        return format!("{head}... + {}", len - TRUNCATED_LEN);
    }
    output
}

/// Recursive renderer state for a single rendering call
///
/// Keeps track of the objects being rendered so a value graph that refers
/// back to one of its own objects terminates.
#[derive(Default)]
pub(crate) struct Renderer {
    active: Vec<usize>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer::default()
    }

    pub fn render(&mut self, value: &Value, level: Level) -> String {
        let output = match value {
            Value::Str(s) => self.string(s, level),
            Value::Map(entries) => {
                if level.is_single_line() {
                    self.native(value)
                } else {
                    self.map(entries, level)
                }
            }
            Value::Seq(kind, items) => self.seq(*kind, items, level),
            Value::Object(object) => {
                if level.is_single_line() {
                    self.single_line(object.as_ref())
                } else {
                    self.multi_line(object.as_ref())
                }
            }
            Value::Opaque(opaque) => match level {
                Level::Debug => format!("Unknown Object Type: {}", opaque.debug),
                Level::Short | Level::Expanded => {
                    format!("Unknown Object Type: {}", opaque.display)
                }
            },
            _ => self.native(value),
        };

        if level.is_single_line() {
            single_line(output)
        } else {
            output
        }
    }

    /// The native string form of a value
    pub fn native(&mut self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Type(name) | Value::Callable(name) => name.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => x.to_string(),
            Value::Complex(c) => c.to_string(),
            Value::Str(s) => s.clone(),
            Value::Map(entries) => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    parts.push(format!("{}: {}", self.nested(key), self.nested(value)));
                }
                format!("{{{}}}", parts.join(", "))
            }
            Value::Seq(SeqKind::Bytes, items) => {
                let bytes: Option<Vec<u8>> = items
                    .iter()
                    .map(|item| match item {
                        Value::Int(i) => u8::try_from(*i).ok(),
                        _ => None,
                    })
                    .collect();
                match bytes {
                    Some(bytes) => format!("b\"{}\"", bytes.escape_ascii()),
                    // not every item is a byte, keep all of them
                    None => {
                        let mut parts = Vec::with_capacity(items.len());
                        for item in items {
                            parts.push(self.nested(item));
                        }
                        format!("[{}]", parts.join(", "))
                    }
                }
            }
            Value::Seq(kind, items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(self.nested(item));
                }
                let joined = parts.join(", ");
                match kind {
                    SeqKind::Tuple if parts.len() == 1 => format!("({joined},)"),
                    SeqKind::Tuple => format!("({joined})"),
                    SeqKind::Set if parts.is_empty() => "set()".to_string(),
                    SeqKind::Set => format!("{{{joined}}}"),
                    SeqKind::FrozenSet if parts.is_empty() => "frozenset()".to_string(),
                    SeqKind::FrozenSet => format!("frozenset({{{joined}}})"),
                    SeqKind::List | SeqKind::Bytes => format!("[{joined}]"),
                }
            }
            Value::Range(range) => range.to_string(),
            Value::Object(object) => self.single_line(object.as_ref()),
            Value::Opaque(opaque) => opaque.display.clone(),
        }
    }

    /// Native form of a value inside a container, strings are quoted
    fn nested(&mut self, value: &Value) -> String {
        match value {
            Value::Str(s) => format!("{s:?}"),
            other => self.native(other),
        }
    }

    fn string(&mut self, s: &str, level: Level) -> String {
        if level.is_single_line() {
            return format!("\"{s}\"");
        }
        let body = s.replace('\n', &format!("\n{INDENT}{INDENT}"));
        format!("\"\n{INDENT}{INDENT}{body}\n{INDENT}\"")
    }

    fn map(&mut self, entries: &[(Value, Value)], level: Level) -> String {
        // children are rendered one level below the map
        let child = level.lower();
        let mut lines = Vec::with_capacity(entries.len());
        for (i, (key, value)) in entries.iter().enumerate() {
            let key = self.native(key);
            let value = self.render(value, child);
            lines.push(format!("{INDENT}#{i} {key}: {}", indent(&value)));
        }
        format!("dict(\n{}\n)", lines.join(",\n"))
    }

    fn seq(&mut self, kind: SeqKind, items: &[Value], level: Level) -> String {
        let mut lines = Vec::new();
        match level {
            Level::Short => {
                for item in items {
                    lines.push(self.native(item));
                }
                return lines.join(",");
            }
            Level::Expanded => {
                for (i, item) in items.iter().take(EXPANDED_ITEMS).enumerate() {
                    lines.push(format!("{INDENT}{i}: {}", self.native(item)));
                }
                if items.len() > EXPANDED_ITEMS {
                    lines.push(format!(
                        "{INDENT}... + {} items",
                        items.len() - EXPANDED_ITEMS
                    ));
                }
            }
            Level::Debug => {
                for (i, item) in items.iter().enumerate() {
                    let item = self.render(item, Level::Expanded);
                    lines.push(format!("{INDENT}#{i}: {}", indent(&item)));
                }
            }
        }
        format!("{}(\n{}\n)", kind.name(), lines.join(",\n"))
    }

    /// Run `render` for the object unless it is already being rendered
    fn guarded<O, F>(&mut self, object: &O, render: F) -> String
    where
        O: BaseObject + ?Sized,
        F: FnOnce(&mut Self) -> String,
    {
        let addr = object as *const O as *const () as usize;
        if self.active.contains(&addr) {
            trace!(
                type_name = object.type_name(),
                "object refers back to itself, stopping"
            );
            return format!("<cycle: {}>", object.type_name());
        }

        self.active.push(addr);
        let output = render(self);
        self.active.pop();
        output
    }

    pub fn single_line<O: BaseObject + ?Sized>(&mut self, object: &O) -> String {
        self.guarded(object, |renderer| {
            let data = object.get_data(Level::Short);
            let mut fields = Vec::with_capacity(data.len());
            for (name, value) in data.iter() {
                fields.push(format!("{name} = {}", renderer.render(value, Level::Short)));
            }
            format!("{} {}", object.type_name(), fields.join(", "))
        })
    }

    pub fn multi_line<O: BaseObject + ?Sized>(&mut self, object: &O) -> String {
        self.guarded(object, |renderer| {
            let name = object.type_name();
            let data = object.get_data(Level::Expanded);
            let mut fields = Vec::with_capacity(data.len());
            for (key, value) in data.iter() {
                let value = renderer.render(value, Level::Expanded);
                fields.push(format!("{key} = {}", indent(&value)));
            }
            format!(
                "<{name}\n{INDENT}{}\n/{name}>",
                fields.join(&format!(",\n{INDENT}"))
            )
        })
    }

    pub fn debug<O: BaseObject + ?Sized>(&mut self, object: &O, indent: usize) -> String {
        self.guarded(object, |renderer| {
            let name = object.type_name();
            let pad = INDENT.repeat(indent);
            let line_start = format!("\n{INDENT}{pad}");
            let data = object.get_data(Level::Debug);
            let mut fields = Vec::with_capacity(data.len());
            for (key, value) in data.iter() {
                let value = renderer.render(value, Level::Debug);
                fields.push(format!("{key} = {}", value.replace('\n', &line_start)));
            }
            format!(
                "{pad}<{name}{line_start}{}\n{pad}/{name}>",
                fields.join(&format!(",{line_start}"))
            )
        })
    }
}
