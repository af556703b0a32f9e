//! Matching shorthand import statements.

use crate::error::RewriteResult;
use regex::Regex;
use std::ops::Range;

/// Matches `import <binding> from '<path>.<ext>';` statements.
#[derive(Debug, Clone)]
pub struct ImportPattern {
    regex: Regex,
    output_extension: String,
}

/// One matched import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMatch<'t> {
    /// Whatever sits between `import` and `from`.
    pub binding: &'t str,
    /// The module path without the shorthand extension.
    pub stem: &'t str,
    pub quote: char,
    /// Byte range of the whole statement.
    pub range: Range<usize>,
}

impl ImportPattern {
    /// Builds a pattern for imports of `shorthand_extension` files, rewritten
    /// to `output_extension`.
    pub fn new(shorthand_extension: &str, output_extension: &str) -> RewriteResult<Self> {
        let ext = regex::escape(shorthand_extension);
        let regex = Regex::new(&format!(
            r#"import ([^;\n]+?) from (?:'([^'\n]+?)\.{ext}'|"([^"\n]+?)\.{ext}");"#
        ))?;

        Ok(Self {
            regex,
            output_extension: output_extension.to_string(),
        })
    }

    /// Iterates over the import statements in `text`, in order.
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = ImportMatch<'t>> + 'r
    where
        't: 'r,
    {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let binding = caps.get(1)?.as_str();
            let (stem, quote) = match (caps.get(2), caps.get(3)) {
                (Some(single), _) => (single.as_str(), '\''),
                (None, Some(double)) => (double.as_str(), '"'),
                (None, None) => return None,
            };

            Some(ImportMatch {
                binding,
                stem,
                quote,
                range: whole.range(),
            })
        })
    }

    /// Renders the replacement statement pointing at the generated file.
    pub fn render(&self, import: &ImportMatch<'_>) -> String {
        format!(
            "import {binding} from {q}{stem}.{ext}{q};",
            binding = import.binding,
            q = import.quote,
            stem = import.stem,
            ext = self.output_extension,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> ImportPattern {
        ImportPattern::new("gql", "graphql").unwrap()
    }

    #[test]
    fn test_single_quoted() {
        let pattern = pattern();
        let text = "import Foo from './query.gql';";
        let found: Vec<_> = pattern.find_iter(text).collect();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].binding, "Foo");
        assert_eq!(found[0].stem, "./query");
        assert_eq!(found[0].range, 0..text.len());
        assert_eq!(
            pattern.render(&found[0]),
            "import Foo from './query.graphql';"
        );
    }

    #[test]
    fn test_double_quoted() {
        let pattern = pattern();
        let found: Vec<_> = pattern
            .find_iter(r#"import { a, b } from "../gql/user.gql";"#)
            .collect();

        assert_eq!(found[0].binding, "{ a, b }");
        assert_eq!(
            pattern.render(&found[0]),
            r#"import { a, b } from "../gql/user.graphql";"#
        );
    }

    #[test]
    fn test_ignores_other_imports() {
        let pattern = pattern();
        let text = "import React from 'react';\nimport x from './x.graphql';\nimport y from './y.gql'\n";
        assert_eq!(pattern.find_iter(text).count(), 0);
    }

    #[test]
    fn test_statements_on_one_line_stay_separate() {
        let pattern = pattern();
        let text = "import a from './a.js'; import b from './b.gql';";
        let found: Vec<_> = pattern.find_iter(text).collect();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].binding, "b");
        assert_eq!(&text[found[0].range.clone()], "import b from './b.gql';");
    }

    #[test]
    fn test_custom_extensions_are_escaped() {
        let pattern = ImportPattern::new("g.ql", "gen.graphql").unwrap();
        assert_eq!(pattern.find_iter("import a from './a.gxql';").count(), 0);

        let found: Vec<_> = pattern.find_iter("import a from './a.g.ql';").collect();
        assert_eq!(pattern.render(&found[0]), "import a from './a.gen.graphql';");
    }
}
