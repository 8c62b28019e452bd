//! Shell-style splitting of a free-form "extra options" string into arguments.
//!
//! Only whitespace separation and single-quote grouping are recognized. Double
//! quotes, backslashes and `$` are ordinary characters, matching what the
//! `dotnet` option parser itself accepts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    /// Between words.
    Start,
    /// Inside an unquoted run of a word.
    ReadingWord,
    /// Inside `'...'`.
    ReadingSingleQuote,
}

struct LexingFSM<'a> {
    input: std::str::Chars<'a>,
    state: LexingState,
    buffer: String,
    /// Set once a quote has been opened for the current word, so `''` still
    /// produces an (empty) argument.
    quoted: bool,
    out: Vec<String>,
}

impl<'a> LexingFSM<'a> {
    fn new(line: &'a str) -> Self {
        LexingFSM {
            input: line.chars(),
            state: LexingState::Start,
            buffer: String::new(),
            quoted: false,
            out: Vec::new(),
        }
    }

    fn make_tokens(mut self) -> Vec<String> {
        while let Some(ch) = self.input.next() {
            match self.state {
                LexingState::Start => self.handle_start(ch),
                LexingState::ReadingWord => self.handle_word(ch),
                LexingState::ReadingSingleQuote => self.handle_single_quote(ch),
            }
        }

        // An unterminated quote keeps what was read so far.
        self.finish_word();
        self.out
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {}
            '\'' => {
                self.quoted = true;
                self.state = LexingState::ReadingSingleQuote;
            }
            c => {
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {
                self.finish_word();
                self.state = LexingState::Start;
            }
            '\'' => {
                self.quoted = true;
                self.state = LexingState::ReadingSingleQuote;
            }
            c => self.buffer.push(c),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::ReadingWord,
            c => self.buffer.push(c),
        }
    }

    fn finish_word(&mut self) {
        if !self.buffer.is_empty() || self.quoted {
            self.out.push(std::mem::take(&mut self.buffer));
        }
        self.quoted = false;
    }
}

/// Split `raw` into arguments the way a shell would, honoring single quotes.
///
/// Quoted and unquoted runs with no whitespace between them form one argument,
/// so `-o:'a b'` yields `-o:a b`. `None`, empty and blank input yield nothing.
pub fn tokenize(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(line) => LexingFSM::new(line).make_tokens(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lex(s: &str) -> Vec<String> {
        tokenize(Some(s))
    }

    #[test]
    fn test_empty_inputs_yield_nothing() {
        assert!(tokenize(None).is_empty());
        assert!(lex("").is_empty());
        assert!(lex("   ").is_empty());
        assert!(lex("\n\t ").is_empty());
    }

    #[test]
    fn test_quoted_argument_keeps_spaces() {
        assert_eq!(
            lex("--random -o:ptions 'Including Whatever'"),
            vec!["--random", "-o:ptions", "Including Whatever"]
        );
    }

    #[test]
    fn test_mixed_segments_form_one_token() {
        assert_eq!(lex("-p:Title='Hello World'!"), vec!["-p:Title=Hello World!"]);
        assert_eq!(lex("a'b'c 'd'e"), vec!["abc", "de"]);
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(lex(r#"'a "b" \c $d'"#), vec![r#"a "b" \c $d"#]);
    }

    #[test]
    fn test_double_quotes_and_backslashes_are_ordinary() {
        assert_eq!(lex(r#""a b" c\ d"#), vec![r#""a"#, r#"b""#, r"c\", "d"]);
    }

    #[test]
    fn test_empty_quotes_yield_empty_token() {
        assert_eq!(lex("a '' b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_unterminated_quote_takes_rest() {
        assert_eq!(lex("--flag 'open ended"), vec!["--flag", "open ended"]);
    }

    #[test]
    fn test_newlines_separate_tokens() {
        assert_eq!(lex("--a\n--b\r\n  --c"), vec!["--a", "--b", "--c"]);
    }

    proptest! {
        #[test]
        fn unquoted_input_matches_whitespace_split(s in "[a-z0-9:=./ \\t\\n-]{0,40}") {
            let expected: Vec<String> = s.split_whitespace().map(str::to_string).collect();
            prop_assert_eq!(lex(&s), expected);
        }

        #[test]
        fn quoted_word_round_trips(word in "[a-zA-Z0-9 ]{0,20}") {
            let line = format!("--x '{word}'");
            prop_assert_eq!(lex(&line), vec!["--x".to_string(), word]);
        }
    }
}
