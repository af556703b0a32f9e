//! Indentation measurement for shorthand lines.

use gqls_core::Span;

/// One line of shorthand, measured and trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// Number of leading whitespace characters. Tabs count as one.
    pub indent_level: usize,
    /// The line with surrounding whitespace removed.
    pub content: &'a str,
    /// Location of `content` in the source.
    pub span: Span,
}

/// Measures a single line.
///
/// The returned span is relative to the start of `line`.
pub fn parse_line(line: &str) -> LineRecord<'_> {
    parse_line_at(line, 0, 0)
}

fn parse_line_at(line: &str, offset: usize, index: usize) -> LineRecord<'_> {
    let indent_level = line.chars().take_while(|c| c.is_whitespace()).count();
    let leading = line.len() - line.trim_start().len();
    let content = line.trim();
    let start = offset + leading;

    LineRecord {
        indent_level,
        content,
        span: Span::from_offsets(start, start + content.len(), index),
    }
}

/// Returns the line records of a whole shorthand document.
///
/// The document is trimmed as a whole before splitting, so leading and
/// trailing blank lines never reach the converter and a blank document
/// yields nothing. Blank lines in the middle are kept.
pub fn lines(source: &str) -> Lines<'_> {
    let trimmed = source.trim();
    let base = source.len() - source.trim_start().len();
    let skipped = memchr::memchr_iter(b'\n', &source.as_bytes()[..base]).count();

    Lines {
        rest: trimmed,
        offset: base,
        index: skipped,
        done: trimmed.is_empty(),
    }
}

/// Iterator over the [`LineRecord`]s of a document. See [`lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
    offset: usize,
    index: usize,
    done: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = LineRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (line, consumed) = match memchr::memchr(b'\n', self.rest.as_bytes()) {
            Some(newline) => (&self.rest[..newline], newline + 1),
            None => {
                self.done = true;
                (self.rest, self.rest.len())
            }
        };

        let record = parse_line_at(line, self.offset, self.index);
        self.rest = &self.rest[consumed..];
        self.offset += consumed;
        self.index += 1;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let record = parse_line("    name  ");
        assert_eq!(record.indent_level, 4);
        assert_eq!(record.content, "name");
        assert_eq!(record.span, Span::new(4, 8, 0));
    }

    #[test]
    fn test_tabs_are_not_expanded() {
        let record = parse_line("\t\tid");
        assert_eq!(record.indent_level, 2);
        assert_eq!(record.content, "id");
    }

    #[test]
    fn test_blank_line() {
        let record = parse_line("   ");
        assert_eq!(record.indent_level, 3);
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_lines() {
        let records: Vec<_> = lines("user:\n  name\n\n  email\n")
            .map(|r| (r.indent_level, r.content))
            .collect();
        assert_eq!(
            records,
            vec![(0, "user:"), (2, "name"), (0, ""), (2, "email")]
        );
    }

    #[test]
    fn test_lines_trims_document() {
        let source = "\n\n  user:\n    name\n\n";
        let records: Vec<_> = lines(source).collect();

        assert_eq!(records.len(), 2);
        // Leading whitespace of the first line goes with the document trim.
        assert_eq!(records[0].indent_level, 0);
        assert_eq!(records[0].span.line, 2);
        assert_eq!(&source[std::ops::Range::from(records[1].span)], "name");
        assert_eq!(records[1].span.line_number(), 4);
    }

    #[test]
    fn test_span_offsets_are_absolute() {
        let source = "a:\n  b\n  c";
        let spans: Vec<_> = lines(source).map(|r| r.span).collect();
        assert_eq!(spans[2], Span::new(9, 10, 2));
        assert_eq!(&source[std::ops::Range::from(spans[1])], "b");
    }

    #[test]
    fn test_crlf() {
        let records: Vec<_> = lines("a:\r\n  b\r\n").map(|r| r.content).collect();
        assert_eq!(records, vec!["a:", "b"]);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines(" \n\t\n").count(), 0);
    }
}
