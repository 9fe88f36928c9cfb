//! Lexer for the tunec language.
//!
//! Converts source text into a stream of [`Token`]s terminated by
//! [`TokenKind::Eof`]. Newlines are significant (they separate statements)
//! and are emitted as tokens; `//` comments and other whitespace are not.

use super::error::LexError;
use super::token::{Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            self.skip_comment();

            if self.is_at_end() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line: self.line,
                    col: self.col,
                });
                break;
            }

            let ch = self.peek();

            if ch == '\n' {
                tokens.push(Token {
                    kind: TokenKind::Newline,
                    text: String::new(),
                    line: self.line,
                    col: self.col,
                });
                self.advance();
                self.line += 1;
                self.col = 1;
                continue;
            }

            let token = match ch {
                ':' => self.single_char(TokenKind::Colon),
                '{' => self.single_char(TokenKind::LBrace),
                '}' => self.single_char(TokenKind::RBrace),
                ',' => self.single_char(TokenKind::Comma),
                '/' => self.single_char(TokenKind::Slash),
                '-' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => self.lex_integer()?,
                '0'..='9' => self.lex_integer()?,
                'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
                _ => {
                    return Err(LexError {
                        line: self.line,
                        col: self.col,
                        character: ch,
                    });
                }
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch != '\n' {
            self.col += 1;
        }
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            let ch = self.peek();
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        if !self.is_at_end() && self.peek() == '/' && self.peek_next() == Some('/') {
            while !self.is_at_end() && self.peek() != '\n' {
                self.advance();
            }
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        let col = self.col;
        let text = self.advance().to_string();
        Token {
            kind,
            text,
            line,
            col,
        }
    }

    fn lex_integer(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let col = self.col;
        let mut s = String::new();

        if self.peek() == '-' {
            s.push(self.advance());
        }
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            s.push(self.advance());
        }

        // Literals too large for i64 are reported at their first digit.
        let value: i64 = s.parse().map_err(|_| LexError {
            line,
            col,
            character: s.chars().next().unwrap_or('0'),
        })?;

        Ok(Token {
            kind: TokenKind::Integer(value),
            text: s,
            line,
            col,
        })
    }

    fn lex_word(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let mut s = String::new();

        s.push(self.advance());
        // A sharp is only part of a word directly after a note letter.
        if matches!(s.as_str(), "A" | "B" | "C" | "D" | "E" | "F" | "G")
            && !self.is_at_end()
            && self.peek() == '#'
        {
            s.push(self.advance());
        }
        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '_') {
            s.push(self.advance());
        }

        let kind = match s.as_str() {
            "Tempo" => TokenKind::Tempo,
            "Volume" => TokenKind::Volume,
            "Instrument" => TokenKind::Instrument,
            "Play" => TokenKind::Play,
            "Chord" => TokenKind::Chord,
            "Rest" => TokenKind::Rest,
            "Repeat" => TokenKind::Repeat,
            _ if is_note_name(&s) => TokenKind::Note(s.clone()),
            _ => TokenKind::Ident(s.clone()),
        };

        Token {
            kind,
            text: s,
            line,
            col,
        }
    }
}

/// Whether `s` matches `[A-G][#b]?[0-9]+`.
pub fn is_note_name(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() || !matches!(chars[0], 'A'..='G') {
        return false;
    }
    let mut i = 1;
    if i < chars.len() && (chars[i] == '#' || chars[i] == 'b') {
        i += 1;
    }
    i < chars.len() && chars[i..].iter().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lex_tempo_declaration() {
        assert_eq!(
            kinds("Tempo: 120"),
            vec![
                TokenKind::Tempo,
                TokenKind::Colon,
                TokenKind::Integer(120),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lex_play_with_fraction() {
        assert_eq!(
            kinds("Play A4: 1/4"),
            vec![
                TokenKind::Play,
                TokenKind::Note("A4".to_string()),
                TokenKind::Colon,
                TokenKind::Integer(1),
                TokenKind::Slash,
                TokenKind::Integer(4),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lex_chord_punctuation() {
        assert_eq!(
            kinds("Chord {C4, Eb4}"),
            vec![
                TokenKind::Chord,
                TokenKind::LBrace,
                TokenKind::Note("C4".to_string()),
                TokenKind::Comma,
                TokenKind::Note("Eb4".to_string()),
                TokenKind::RBrace,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lex_sharp_note_is_single_token() {
        let tokens = Lexer::new("F#3").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Note("F#3".to_string()));
        assert_eq!(tokens[0].text, "F#3");
    }

    #[test]
    fn lex_multi_digit_octave() {
        assert_eq!(kinds("C10")[0], TokenKind::Note("C10".to_string()));
    }

    #[test]
    fn lex_identifier_not_note() {
        assert_eq!(kinds("sine")[0], TokenKind::Ident("sine".to_string()));
        assert_eq!(kinds("Bass")[0], TokenKind::Ident("Bass".to_string()));
        assert_eq!(kinds("banjo")[0], TokenKind::Ident("banjo".to_string()));
    }

    #[test]
    fn lex_keywords_are_case_sensitive() {
        assert_eq!(kinds("tempo")[0], TokenKind::Ident("tempo".to_string()));
        assert_eq!(kinds("PLAY")[0], TokenKind::Ident("PLAY".to_string()));
        assert_eq!(
            kinds("Tempo Volume Instrument Play Chord Rest Repeat")[..7],
            [
                TokenKind::Tempo,
                TokenKind::Volume,
                TokenKind::Instrument,
                TokenKind::Play,
                TokenKind::Chord,
                TokenKind::Rest,
                TokenKind::Repeat
            ]
        );
    }

    #[test]
    fn lex_negative_integer() {
        assert_eq!(kinds("Tempo: -5")[2], TokenKind::Integer(-5));
    }

    #[test]
    fn lex_comment_skipped() {
        assert_eq!(
            kinds("Rest: 1/4 // breathe\nPlay C4: 1/8"),
            vec![
                TokenKind::Rest,
                TokenKind::Colon,
                TokenKind::Integer(1),
                TokenKind::Slash,
                TokenKind::Integer(4),
                TokenKind::Newline,
                TokenKind::Play,
                TokenKind::Note("C4".to_string()),
                TokenKind::Colon,
                TokenKind::Integer(1),
                TokenKind::Slash,
                TokenKind::Integer(8),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lex_comment_only_source() {
        assert_eq!(kinds("// nothing here"), vec![TokenKind::Eof]);
    }

    #[test]
    fn lex_line_tracking() {
        let tokens = Lexer::new("Tempo: 90\n\nPlay C4: 1/4").tokenize().unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert_eq!(tokens[3].line, 1);
        assert_eq!(tokens[5].kind, TokenKind::Play);
        assert_eq!(tokens[5].line, 3);
        assert_eq!(tokens[5].col, 1);
    }

    #[test]
    fn lex_error_on_unexpected_char() {
        let err = Lexer::new("Tempo: 120\nVolume @ 3").tokenize().unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.col, 8);
        assert_eq!(err.character, '@');
    }

    #[test]
    fn lex_lone_minus_is_error() {
        let err = Lexer::new("Tempo: - 5").tokenize().unwrap_err();
        assert_eq!(err.character, '-');
    }

    #[test]
    fn lex_hash_outside_note_is_error() {
        let err = Lexer::new("Instrument: #sine").tokenize().unwrap_err();
        assert_eq!(err.character, '#');
    }

    #[test]
    fn lex_empty_input() {
        let tokens = Lexer::new("").tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn lex_crlf_line_endings() {
        assert_eq!(
            kinds("Tempo: 90\r\nRest: 1/2"),
            vec![
                TokenKind::Tempo,
                TokenKind::Colon,
                TokenKind::Integer(90),
                TokenKind::Newline,
                TokenKind::Rest,
                TokenKind::Colon,
                TokenKind::Integer(1),
                TokenKind::Slash,
                TokenKind::Integer(2),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn note_name_detection() {
        assert!(is_note_name("C2"));
        assert!(is_note_name("Eb4"));
        assert!(is_note_name("F#3"));
        assert!(is_note_name("A10"));
        assert!(!is_note_name("H4"));
        assert!(!is_note_name("C"));
        assert!(!is_note_name("Cb"));
        assert!(!is_note_name("C4x"));
        assert!(!is_note_name("sine"));
    }
}
