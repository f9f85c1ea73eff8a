/// A byte cursor over HTML source.
///
/// All stop conditions used by the lexer are ASCII bytes, so every slice the
/// cursor hands out falls on a UTF-8 character boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The source being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Byte `n` positions ahead of the current one.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Consumes bytes while `pred` holds and returns the consumed slice.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }

    /// Consumes everything up to (not including) `pat`, or to the end of input.
    ///
    /// Returns the consumed slice and whether `pat` was found.
    pub fn take_until(&mut self, pat: &[u8]) -> (&'a str, bool) {
        let start = self.i;
        match find_bytes(&self.s.as_bytes()[start..], pat, false) {
            Some(offset) => {
                self.i = start + offset;
                (&self.s[start..self.i], true)
            }
            None => {
                self.i = self.s.len();
                (&self.s[start..], false)
            }
        }
    }

    /// Like [`Cursor::take_until`] but matches `pat` ignoring ASCII case.
    pub fn take_until_ignore_case(&mut self, pat: &[u8]) -> (&'a str, bool) {
        let start = self.i;
        match find_bytes(&self.s.as_bytes()[start..], pat, true) {
            Some(offset) => {
                self.i = start + offset;
                (&self.s[start..self.i], true)
            }
            None => {
                self.i = self.s.len();
                (&self.s[start..], false)
            }
        }
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8], ignore_case: bool) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| {
        if ignore_case {
            w.eq_ignore_ascii_case(needle)
        } else {
            w == needle
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("<div>");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'<'));
        assert_eq!(cur.peek_at(1), Some(b'd'));
        assert_eq!(cur.bump(), Some(b'<'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn take_while_stops_on_predicate() {
        let mut cur = Cursor::new("input type");
        assert_eq!(cur.take_while(|b| b.is_ascii_alphanumeric()), "input");
        assert_eq!(cur.peek(), Some(b' '));
    }

    #[test]
    fn take_until_reports_missing_pattern() {
        let mut cur = Cursor::new("abc");
        let (taken, found) = cur.take_until(b"-->");
        assert_eq!(taken, "abc");
        assert!(!found);
        assert!(cur.eof());
    }

    #[test]
    fn take_until_ignore_case_finds_mixed_case_close_tag() {
        let mut cur = Cursor::new("var x = 1;</SCRIPT>");
        let (taken, found) = cur.take_until_ignore_case(b"</script");
        assert_eq!(taken, "var x = 1;");
        assert!(found);
        assert!(cur.starts_with(b"</SCRIPT"));
    }

    #[test]
    fn slices_stay_on_char_boundaries() {
        let mut cur = Cursor::new("¿Tiene hijos?<");
        let (taken, _) = cur.take_until(b"<");
        assert_eq!(taken, "¿Tiene hijos?");
    }

    #[test]
    fn bump_n_saturates_at_end() {
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert!(cur.starts_with(b""));
    }
}
