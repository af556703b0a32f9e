//! Indentation-to-brace conversion.
//!
//! Shorthand nests by indentation alone:
//!
//! ```text
//! query:
//!   user:
//!     name
//!     friends [
//!       id
//!     ]
//! ```
//!
//! The converter walks the lines once, keeping an explicit stack of open
//! frames. How far a block extends is only known when a later line dedents
//! past it, so closers are emitted lazily as frames are popped.
//!
//! ```text
//! query {
//!   user {
//!     name
//!     friends [
//!       id
//!     ]
//!   }
//! }
//! ```

use crate::line::{lines, LineRecord};
use gqls_core::diagnostics::codes;
use gqls_core::{Diagnostic, DiagnosticBag, Span};

const BLOCK_OPEN: char = ':';
const LIST_OPEN: char = '[';
const LIST_CLOSE: &str = "]";

/// Conversion options.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Number of spaces per nesting level.
    pub indent_size: usize,
    /// Use tabs instead of spaces.
    pub use_tabs: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            use_tabs: false,
        }
    }
}

/// What kind of scope a frame opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Opened by a trailing `:`, closed by `}`.
    Block,
    /// Opened by a trailing `[`, closed by `]`.
    List,
}

impl FrameKind {
    /// Classifies trimmed line content, returning `None` for leaf lines.
    pub fn of(content: &str) -> Option<Self> {
        if content.ends_with(BLOCK_OPEN) {
            Some(Self::Block)
        } else if content.ends_with(LIST_OPEN) {
            Some(Self::List)
        } else {
            None
        }
    }

    /// The text that closes this kind of scope.
    pub const fn closer(self) -> char {
        match self {
            Self::Block => '}',
            Self::List => ']',
        }
    }
}

/// An open block or list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Indentation of the opening line in the input.
    pub indent_level: usize,
    /// Trimmed content of the opening line.
    pub content: &'a str,
    pub kind: FrameKind,
    /// Nesting depth of the opening line in the output.
    pub depth: usize,
    pub span: Span,
}

/// The result of converting a document.
#[derive(Debug)]
pub struct ConvertResult {
    pub output: String,
    /// Structural problems that were closed over on a best-effort basis.
    pub diagnostics: DiagnosticBag,
}

/// Stack-driven shorthand converter.
pub struct Converter<'a> {
    options: ConvertOptions,
    output: String,
    stack: Vec<Frame<'a>>,
    diagnostics: DiagnosticBag,
}

impl<'a> Converter<'a> {
    /// Creates a new converter.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            output: String::new(),
            stack: Vec::new(),
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Converts a whole document.
    pub fn convert(mut self, source: &'a str) -> ConvertResult {
        for record in lines(source) {
            self.line(record);
        }

        while let Some(frame) = self.stack.pop() {
            self.close(&frame);
        }

        ConvertResult {
            output: self.output,
            diagnostics: self.diagnostics,
        }
    }

    fn line(&mut self, record: LineRecord<'a>) {
        let LineRecord {
            indent_level,
            content,
            span,
        } = record;
        let is_list_close = content == LIST_CLOSE;

        // A `]` consumes its own list frame below, so dedent stops there.
        while let Some(frame) = self.pop_if(|top| {
            indent_level <= top.indent_level && !(is_list_close && top.kind == FrameKind::List)
        }) {
            self.close(&frame);
        }

        if is_list_close {
            self.close_list(span);
            return;
        }

        let depth = self.stack.len();
        let Some(kind) = FrameKind::of(content) else {
            self.push_line(depth, content);
            return;
        };

        match kind {
            FrameKind::Block => {
                let head = &content[..content.len() - BLOCK_OPEN.len_utf8()];
                self.push_indent(depth);
                self.output.push_str(head);
                self.output.push_str(" {\n");
            }
            FrameKind::List => self.push_line(depth, content),
        }

        self.stack.push(Frame {
            indent_level,
            content,
            kind,
            depth,
            span,
        });
    }

    fn close_list(&mut self, span: Span) {
        // Blocks opened inside the list and still open end with it.
        while let Some(frame) = self.pop_if(|top| top.kind != FrameKind::List) {
            self.close(&frame);
        }

        match self.stack.pop() {
            Some(list) => self.push_line(list.depth, LIST_CLOSE),
            None => {
                self.diagnostics.add(
                    Diagnostic::error(codes::UNMATCHED_LIST_CLOSE, "unmatched list closer")
                        .with_span(span, "no list is open here")
                        .with_message("remove the `]` or open a list with a line ending in `[`"),
                );
                self.push_line(0, LIST_CLOSE);
            }
        }
    }

    fn close(&mut self, frame: &Frame<'a>) {
        if frame.kind == FrameKind::List {
            self.diagnostics.add(
                Diagnostic::warning(codes::UNCLOSED_LIST, "unclosed list")
                    .with_span(
                        frame.span,
                        format!("`{}` is never closed with `]`", frame.content),
                    )
                    .with_message("close the list with `]` at the opener's indentation"),
            );
        }

        self.push_indent(frame.depth);
        self.output.push(frame.kind.closer());
        self.output.push('\n');
    }

    fn pop_if(&mut self, predicate: impl Fn(&Frame<'a>) -> bool) -> Option<Frame<'a>> {
        if self.stack.last().is_some_and(predicate) {
            self.stack.pop()
        } else {
            None
        }
    }

    fn push_line(&mut self, depth: usize, content: &str) {
        self.push_indent(depth);
        self.output.push_str(content);
        self.output.push('\n');
    }

    fn push_indent(&mut self, depth: usize) {
        if self.options.use_tabs {
            for _ in 0..depth {
                self.output.push('\t');
            }
        } else {
            for _ in 0..(depth * self.options.indent_size) {
                self.output.push(' ');
            }
        }
    }
}

/// Converts shorthand to brace syntax with default options.
///
/// Malformed input never fails; use [`convert_with_options`] to see what
/// was closed over.
pub fn convert(source: &str) -> String {
    convert_with_options(source, ConvertOptions::default()).output
}

/// Converts shorthand with custom options, keeping diagnostics.
pub fn convert_with_options(source: &str, options: ConvertOptions) -> ConvertResult {
    Converter::new(options).convert(source)
}
