use crate::ast::Position;

/// Maps byte offsets in a source file to line and column numbers.
pub(crate) struct LineResolver<'a> {
    source: &'a str,
    lines: Vec<usize>,
}

impl<'a> LineResolver<'a> {
    pub fn new(source: &'a str) -> Self {
        let lines = source
            .match_indices('\n')
            .map(|(index, _)| index + 1)
            .collect();
        LineResolver { source, lines }
    }

    /// Resolves an offset into a 1-based line and column. Columns count characters, not bytes.
    pub fn resolve(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let (line, line_start) = match self.lines.binary_search(&offset) {
            Ok(index) => (index + 1, self.lines[index]),
            Err(0) => (0, 0),
            Err(index) => (index, self.lines[index - 1]),
        };

        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());

        Position {
            offset,
            line: line + 1,
            column: column + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(resolver: &LineResolver, offset: usize) -> (usize, usize) {
        let position = resolver.resolve(offset);
        assert_eq!(position.offset, offset);
        (position.line, position.column)
    }

    #[test]
    fn resolve_line_number() {
        let resolver = LineResolver::new("hello\nworld\nfoo");

        assert_eq!(resolve(&resolver, 0), (1, 1));
        assert_eq!(resolve(&resolver, 4), (1, 5));
        assert_eq!(resolve(&resolver, 5), (1, 6));
        assert_eq!(resolve(&resolver, 6), (2, 1));
        assert_eq!(resolve(&resolver, 7), (2, 2));
        assert_eq!(resolve(&resolver, 10), (2, 5));
        assert_eq!(resolve(&resolver, 11), (2, 6));
        assert_eq!(resolve(&resolver, 12), (3, 1));
        assert_eq!(resolve(&resolver, 13), (3, 2));
        assert_eq!(resolve(&resolver, 15), (3, 4));
    }

    #[test]
    fn resolve_multibyte_column() {
        let source = "// 😀\nx 😀 y";
        let resolver = LineResolver::new(source);

        let y = source.rfind('y').unwrap();
        assert_eq!(resolve(&resolver, y), (2, 5));
    }

    #[test]
    fn resolve_end_of_input() {
        let resolver = LineResolver::new("foo\n");

        assert_eq!(resolve(&resolver, 4), (2, 1));
        assert_eq!(resolver.resolve(10).offset, 4);
    }
}
