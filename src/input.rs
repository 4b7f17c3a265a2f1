use std::iter::FusedIterator;

/// Position into an input stream.
///
/// `offset` counts characters (not bytes) from the start of the input.
/// `line` and `column` are 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Step over `previous`, the character that was just consumed.
    pub fn advance(&mut self, previous: Option<char>) -> &mut Self {
        self.offset += 1;
        self.column += 1;
        if previous == Some('\n') {
            self.line += 1;
            self.column = 0;
        }
        self
    }

    /// An independent copy of this position
    pub fn snapshot(&self) -> Pos {
        *self
    }
}

/// A cursor over an input stream of characters.
/// It keeps track of the current position in the stream.
#[derive(Debug, Clone)]
pub struct Cursor<I> {
    // input iterator
    input: I,
    // position of the next character to be consumed
    pos: Pos,
}

impl<I> Cursor<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            pos: Pos::default(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl<I> Cursor<I>
where
    I: Iterator<Item = char> + Clone,
{
    pub fn first(&self) -> Option<char> {
        self.input.clone().next()
    }
}

impl<I> Iterator for Cursor<I>
where
    I: Iterator<Item = char>,
{
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.input.next();
        if next.is_some() {
            self.pos.advance(next);
        }
        next
    }
}

impl<I> FusedIterator for Cursor<I> where I: FusedIterator<Item = char> {}
