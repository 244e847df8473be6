/// A read position inside normalized notice text.
///
/// The cursor never owns or rewrites the text; every operation either moves
/// past a recognized prefix or leaves the position where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    /// Text not yet consumed
    pub const fn rest(&self) -> &'a str {
        self.rest
    }

    pub const fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Consumes `literal` if the remaining text starts with it.
    pub fn eat(&mut self, literal: &str) -> bool {
        match self.rest.strip_prefix(literal) {
            Some(tail) => {
                self.rest = tail;
                true
            }
            None => false,
        }
    }

    /// Consumes the first literal of `literals` that matches, in table order.
    pub fn eat_any(&mut self, literals: &[&'static str]) -> Option<&'static str> {
        literals.iter().copied().find(|literal| self.eat(literal))
    }

    /// Consumes the first matching phrase of `table` and returns its action.
    pub fn eat_first<T: Copy>(&mut self, table: &[(&str, T)]) -> Option<T> {
        table
            .iter()
            .find(|(phrase, _)| self.eat(phrase))
            .map(|&(_, action)| action)
    }

    /// Moves forward by `len` bytes. Offsets that are past the end or not on
    /// a character boundary leave the cursor unchanged.
    pub fn advance(&mut self, len: usize) {
        if let Some(tail) = self.rest.get(len..) {
            self.rest = tail;
        }
    }

    /// Discards everything that remains.
    pub fn finish(&mut self) {
        self.rest = "";
    }
}
