use core::fmt::{self, Display, Write};

use kiln_core::Kind;
use kiln_reflect::Peek;
use yansi::{Paint, Style};

const TYPE_NAME: Style = Style::new().blue().bold();
const FIELD_NAME: Style = Style::new().cyan();
const SCALAR: Style = Style::new().yellow();
const TEXT: Style = Style::new().green();
const MUTED: Style = Style::new().dim();
const REDACTED: Style = Style::new().red().bold();

/// Renders values as indented, optionally colored text.
///
/// Nil maps, lists and pointers render as `nil`, values of an unsupported
/// kind as `⟨opaque⟩`, and fields flagged sensitive as `[REDACTED]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyPrinter {
    indent_size: usize,
    max_depth: Option<usize>,
    use_colors: bool,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self {
            indent_size: 2,
            max_depth: None,
            use_colors: std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl PrettyPrinter {
    /// A printer with two-space indentation, no depth limit, and colors unless
    /// `NO_COLOR` is set
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    /// Stops descending below `depth` levels, printing `…` instead
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Turns ANSI colors on or off
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Renders `peek` into a new string
    pub fn format(&self, peek: Peek<'_>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.format_to(peek, &mut out);
        out
    }

    /// Renders `peek` into `f`
    pub fn format_to(&self, peek: Peek<'_>, f: &mut impl Write) -> fmt::Result {
        self.write_value(peek, f, 0)
    }

    fn write_value(&self, peek: Peek<'_>, f: &mut impl Write, depth: usize) -> fmt::Result {
        let kind = peek.kind();
        if peek.is_nil() {
            return self.paint(f, "nil", MUTED);
        }
        if !kind.is_leaf() && self.max_depth.is_some_and(|max| depth > max) {
            return self.paint(f, "…", MUTED);
        }

        match kind {
            Kind::Bool | Kind::Int | Kind::Uint | Kind::Float | Kind::Complex => {
                self.paint(f, peek, SCALAR)
            }
            Kind::String => {
                let text = peek.as_str().map_err(|_| fmt::Error)?;
                self.paint(f, format_args!("{text:?}"), TEXT)
            }
            Kind::Pointer => {
                let pointer = peek.into_pointer().map_err(|_| fmt::Error)?;
                let Some(target) = pointer.target() else {
                    return self.paint(f, "nil", MUTED);
                };
                f.write_char('&')?;
                self.write_value(target, f, depth)
            }
            Kind::List => {
                let list = peek.into_list().map_err(|_| fmt::Error)?;
                self.paint(f, peek.shape(), TYPE_NAME)?;
                if list.is_empty() {
                    return f.write_str(" []");
                }
                f.write_str(" [\n")?;
                for item in list.iter() {
                    self.indent(f, depth + 1)?;
                    self.write_value(item, f, depth + 1)?;
                    f.write_str(",\n")?;
                }
                self.indent(f, depth)?;
                f.write_char(']')
            }
            Kind::Map => {
                let map = peek.into_map().map_err(|_| fmt::Error)?;
                self.paint(f, peek.shape(), TYPE_NAME)?;
                if map.is_empty() {
                    return f.write_str(" {}");
                }
                f.write_str(" {\n")?;
                for (key, value) in map.iter() {
                    self.indent(f, depth + 1)?;
                    self.write_value(key, f, depth + 1)?;
                    f.write_str(" => ")?;
                    self.write_value(value, f, depth + 1)?;
                    f.write_str(",\n")?;
                }
                self.indent(f, depth)?;
                f.write_char('}')
            }
            Kind::Struct => {
                let st = peek.into_struct().map_err(|_| fmt::Error)?;
                self.paint(f, peek.shape(), TYPE_NAME)?;
                if st.field_count() == 0 {
                    return Ok(());
                }
                f.write_str(" {\n")?;
                for (field, value) in st.fields() {
                    self.indent(f, depth + 1)?;
                    self.paint(f, field.name, FIELD_NAME)?;
                    f.write_str(": ")?;
                    if field.is_sensitive() {
                        self.paint(f, "[REDACTED]", REDACTED)?;
                    } else {
                        self.write_value(value, f, depth + 1)?;
                    }
                    f.write_str(",\n")?;
                }
                self.indent(f, depth)?;
                f.write_char('}')
            }
            Kind::Unsupported(_) => self.paint(f, "⟨opaque⟩", MUTED),
        }
    }

    fn indent(&self, f: &mut impl Write, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = depth * self.indent_size)
    }

    fn paint(&self, f: &mut impl Write, text: impl Display, style: Style) -> fmt::Result {
        if self.use_colors {
            write!(f, "{}", text.paint(style))
        } else {
            write!(f, "{text}")
        }
    }
}
