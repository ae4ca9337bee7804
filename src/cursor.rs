use std::cell::RefCell;
use std::rc::Rc;

/// The character used to signal "no character here": either the cursor is at
/// or past the end of the buffer, or a NUL has been written at this position
/// by a previous [`Cursor::overwrite_nul`] call.
pub(crate) const EMPTY: char = '\0';

/// An index into a shared, mutable character buffer, mimicking a C string
/// cursor: a NUL written into the buffer acts as a soft terminator that
/// truncates `peek` and `to_string` from that point on, even though the
/// underlying buffer extends further.
///
/// Several cursors can share the same buffer (via `clone`); writing through
/// one is visible to all the others.
#[derive(Clone)]
pub(crate) struct Cursor {
    buf: Rc<RefCell<Vec<char>>>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            buf: Rc::new(RefCell::new(text.chars().collect())),
            pos: 0,
        }
    }

    /// Returns the character at `pos + offset`, or [`EMPTY`] if that's past
    /// the end of the buffer or at/after an embedded NUL.
    pub(crate) fn peek(&self, offset: usize) -> char {
        let buf = self.buf.borrow();
        let i = self.pos + offset;
        buf.get(i).copied().unwrap_or(EMPTY)
    }

    pub(crate) fn advance(&mut self) {
        self.pos += 1;
    }

    /// Writes [`EMPTY`] (NUL) at the current position, truncating `peek` and
    /// `to_string` for every cursor sharing this buffer.
    #[allow(dead_code)] // part of the documented primitive; no current call site needs it
    pub(crate) fn overwrite_nul(&mut self) {
        let mut buf = self.buf.borrow_mut();
        if self.pos < buf.len() {
            buf[self.pos] = EMPTY;
        }
    }

    /// Returns up to `n` characters starting at the current position,
    /// stopping early at an embedded NUL or the end of the buffer.
    #[allow(dead_code)] // part of the documented primitive; no current call site needs it
    pub(crate) fn slice(&self, n: usize) -> String {
        let buf = self.buf.borrow();
        let mut out = String::with_capacity(n);
        for &c in buf.iter().skip(self.pos).take(n) {
            if c == EMPTY {
                break;
            }
            out.push(c);
        }
        out
    }

    /// Signed offset between two cursors. Only meaningful when both share
    /// the same underlying buffer.
    #[allow(dead_code)] // part of the documented primitive; no current call site needs it
    pub(crate) fn ptr_diff(&self, other: &Cursor) -> isize {
        debug_assert!(Rc::ptr_eq(&self.buf, &other.buf));
        self.pos as isize - other.pos as isize
    }

    /// The substring from the current position to the next NUL or the end
    /// of the buffer.
    #[allow(dead_code, clippy::inherent_to_string)] // part of the documented primitive; no current call site needs it
    pub(crate) fn to_string(&self) -> String {
        let buf = self.buf.borrow();
        buf.iter()
            .skip(self.pos)
            .take_while(|&&c| c != EMPTY)
            .collect()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek(0) == EMPTY
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
#[path = "cursor.test.rs"]
mod test;
