use core::fmt;
use core::fmt::{Debug, Display, Formatter};

/// A line/column position in the template source. Both components start
/// at 1, the way editors report them.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    /// Default to line 1, column 1
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

/// The source range a token covers, from its first to its last column.
/// The end location is inclusive: a one-character token has `start == end`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start: Location,
    pub end: Location,
}

impl Range {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Range on a single line, spanning `start_col` through `end_col`.
    pub fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self::new(Location::new(line, start_col), Location::new(line, end_col))
    }
}

impl Debug for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_editor_style() {
        let range = Range::on_line(3, 7, 12);
        assert_eq!(format!("{}", range), "(3:7)-(3:12)");
    }

    #[test]
    fn default_is_origin() {
        assert_eq!(Range::default().start, Location::new(1, 1));
        assert_eq!(Range::default().end, Location::new(1, 1));
    }
}
