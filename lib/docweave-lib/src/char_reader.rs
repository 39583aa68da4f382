/// Character cursor with peeking functionality over an in-memory template
/// source. Sources are small enough to hold fully in memory, so reads never
/// fail; `None` means end of input.
pub struct CharReader {
    buffer: Vec<char>,
    consumed: usize,
}

impl CharReader {
    pub fn from_str(input: &str) -> CharReader {
        CharReader {
            buffer: input.chars().collect(),
            consumed: 0,
        }
    }

    pub fn has_read(&self) -> bool {
        self.consumed > 0
    }

    pub fn is_eof(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Read a character without consuming it. `pos` is 0 indexed
    pub fn peek_char(&self, pos: usize) -> Option<char> {
        self.buffer.get(pos).copied()
    }

    /// Peek up to `length` characters, returning a shorter string on eof
    pub fn peek_string(&self, length: usize) -> String {
        self.buffer[..length.min(self.buffer.len())]
            .iter()
            .collect()
    }

    /// Whether the remaining input starts with `pattern`
    pub fn has_string(&self, pattern: &str) -> bool {
        let mut i = 0;
        for c in pattern.chars() {
            if self.peek_char(i) != Some(c) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Peek until `pattern` matches or return None when not found
    pub fn peek_until_match_inclusive(&self, pattern: &str) -> Option<String> {
        let chars: Vec<char> = pattern.chars().collect();

        let mut char_i = 0;
        let mut i = 0;
        loop {
            let c = self.peek_char(i)?;
            // iterate where we left off
            if chars[char_i] == c {
                char_i += 1;
                if char_i == chars.len() {
                    break;
                }
            } else {
                char_i = 0;
            }
            i += 1;
        }

        Some(self.peek_string(i + 1))
    }

    pub fn consume(&mut self, length: usize) {
        self.consumed += length.min(self.buffer.len());
        self.buffer.drain(0..length.min(self.buffer.len()));
    }

    pub fn consume_char(&mut self) -> Option<char> {
        if self.buffer.is_empty() {
            None
        } else {
            self.consumed += 1;
            Some(self.buffer.remove(0))
        }
    }

    /// Consume up to `length` characters, returning a shorter string on eof
    pub fn consume_string(&mut self, length: usize) -> String {
        let length = length.min(self.buffer.len());
        self.consumed += length;
        self.buffer.drain(0..length).collect()
    }

    /// Consume until eof or `op` is true excluding the character that matched
    pub fn consume_until_exclusive(&mut self, op: impl Fn(char) -> bool) -> String {
        let mut i = 0;
        loop {
            match self.peek_char(i) {
                Some(c) => {
                    if op(c) {
                        break;
                    }
                }
                None => break,
            };
            i += 1;
        }
        self.consume_string(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propagation() {
        let mut reader = CharReader::from_str("This is a piece of text");
        assert_eq!(reader.peek_string(4), "This".to_owned());
        assert_eq!(reader.peek_char(3), Some('s'));

        assert_eq!(reader.consume_string(5), "This ".to_owned());

        assert_eq!(reader.peek_string(3), "is ".to_owned());
        assert_eq!(reader.peek_string(2), "is".to_owned());

        assert_eq!(reader.consume_string(11), "is a piece ".to_owned());
        assert_eq!(reader.peek_string(3), "of ".to_owned());
        assert_eq!(reader.peek_char(1), Some('f'));
        assert_eq!(reader.consume_char(), Some('o'));
        assert_eq!(reader.peek_char(1), Some(' '));
    }

    #[test]
    fn test_peek_until_match() {
        let reader = CharReader::from_str("before {{ name }} after");
        assert_eq!(
            reader.peek_until_match_inclusive("}}"),
            Some("before {{ name }}".to_owned())
        );
        assert_eq!(reader.peek_until_match_inclusive("%}"), None);
    }

    #[test]
    fn test_consume_until_exclusive() {
        let mut reader = CharReader::from_str("text {{ name }}");
        assert_eq!(reader.consume_until_exclusive(|c| c == '{'), "text ");
        assert_eq!(reader.peek_char(0), Some('{'));
    }

    #[test]
    fn test_eof() {
        let mut reader = CharReader::from_str("ab");
        assert_eq!(reader.consume_string(5), "ab".to_owned());
        assert_eq!(reader.consume_char(), None);
        assert!(reader.is_eof());
        assert!(reader.has_read());
    }
}
