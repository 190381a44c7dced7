//! Hand-rolled lexer for workload definition files.
//!
//! Produces a flat token stream with positions and byte offsets. Comments
//! are emitted as ordinary tokens so the parser can attach them to the
//! declaration or entry they precede.

use super::ParseError;

/// A lexical token kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Str { value: String, raw: bool },
    Int(i64),
    Comment(String),
    LBrace,
    RBrace,
    LBrack,
    RBrack,
    LParen,
    RParen,
    Comma,
    Colon,
    Dot,
    Amp,
    Assign,
    Eof,
}

/// A token with its source position and byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
    pub start: usize,
    pub end: usize,
}

/// Tokenize a whole source file.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut line = 1u32;
    let mut column = 1u32;

    macro_rules! push {
        ($kind:expr, $start:expr, $start_line:expr, $start_col:expr) => {
            tokens.push(Token {
                kind: $kind,
                line: $start_line,
                column: $start_col,
                start: $start,
                end: pos,
            })
        };
    }

    while pos < bytes.len() {
        let c = bytes[pos];
        let (start, start_line, start_col) = (pos, line, column);

        match c {
            b' ' | b'\t' | b'\r' => {
                pos += 1;
                column += 1;
            }
            b'\n' => {
                pos += 1;
                line += 1;
                column = 1;
            }
            b'/' if pos + 1 < bytes.len() && bytes[pos + 1] == b'/' => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                    column += 1;
                }
                let text = source[start..pos].to_string();
                push!(TokenKind::Comment(text), start, start_line, start_col);
            }
            b'/' if pos + 1 < bytes.len() && bytes[pos + 1] == b'*' => {
                pos += 2;
                column += 2;
                loop {
                    if pos + 1 >= bytes.len() {
                        return Err(ParseError::new(start_line, start_col, "unterminated block comment"));
                    }
                    if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                        pos += 2;
                        column += 2;
                        break;
                    }
                    if bytes[pos] == b'\n' {
                        line += 1;
                        column = 1;
                    } else {
                        column += 1;
                    }
                    pos += 1;
                }
                let text = source[start..pos].to_string();
                push!(TokenKind::Comment(text), start, start_line, start_col);
            }
            b'"' => {
                pos += 1;
                column += 1;
                let mut value = String::new();
                loop {
                    if pos >= bytes.len() || bytes[pos] == b'\n' {
                        return Err(ParseError::new(start_line, start_col, "unterminated string literal"));
                    }
                    match bytes[pos] {
                        b'"' => {
                            pos += 1;
                            column += 1;
                            break;
                        }
                        b'\\' => {
                            if pos + 1 >= bytes.len() {
                                return Err(ParseError::new(
                                    start_line,
                                    start_col,
                                    "unterminated escape sequence",
                                ));
                            }
                            let escaped = bytes[pos + 1];
                            value.push(match escaped {
                                b'n' => '\n',
                                b't' => '\t',
                                b'r' => '\r',
                                b'\\' => '\\',
                                b'"' => '"',
                                other => {
                                    return Err(ParseError::new(
                                        line,
                                        column,
                                        format!("unknown escape sequence \\{}", other as char),
                                    ));
                                }
                            });
                            pos += 2;
                            column += 2;
                        }
                        _ => {
                            let ch_len = utf8_len(bytes[pos]);
                            value.push_str(&source[pos..pos + ch_len]);
                            pos += ch_len;
                            column += 1;
                        }
                    }
                }
                push!(
                    TokenKind::Str { value, raw: false },
                    start,
                    start_line,
                    start_col
                );
            }
            b'`' => {
                pos += 1;
                column += 1;
                let content_start = pos;
                while pos < bytes.len() && bytes[pos] != b'`' {
                    if bytes[pos] == b'\n' {
                        line += 1;
                        column = 1;
                    } else {
                        column += 1;
                    }
                    pos += 1;
                }
                if pos >= bytes.len() {
                    return Err(ParseError::new(start_line, start_col, "unterminated raw string literal"));
                }
                let value = source[content_start..pos].to_string();
                pos += 1;
                column += 1;
                push!(
                    TokenKind::Str { value, raw: true },
                    start,
                    start_line,
                    start_col
                );
            }
            b'0'..=b'9' | b'-' => {
                pos += 1;
                column += 1;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                    column += 1;
                }
                let text = &source[start..pos];
                let value: i64 = text.parse().map_err(|_| {
                    ParseError::new(start_line, start_col, format!("invalid integer literal `{}`", text))
                })?;
                push!(TokenKind::Int(value), start, start_line, start_col);
            }
            b'{' => {
                pos += 1;
                column += 1;
                push!(TokenKind::LBrace, start, start_line, start_col);
            }
            b'}' => {
                pos += 1;
                column += 1;
                push!(TokenKind::RBrace, start, start_line, start_col);
            }
            b'[' => {
                pos += 1;
                column += 1;
                push!(TokenKind::LBrack, start, start_line, start_col);
            }
            b']' => {
                pos += 1;
                column += 1;
                push!(TokenKind::RBrack, start, start_line, start_col);
            }
            b'(' => {
                pos += 1;
                column += 1;
                push!(TokenKind::LParen, start, start_line, start_col);
            }
            b')' => {
                pos += 1;
                column += 1;
                push!(TokenKind::RParen, start, start_line, start_col);
            }
            b',' => {
                pos += 1;
                column += 1;
                push!(TokenKind::Comma, start, start_line, start_col);
            }
            b':' => {
                pos += 1;
                column += 1;
                push!(TokenKind::Colon, start, start_line, start_col);
            }
            b'.' => {
                pos += 1;
                column += 1;
                push!(TokenKind::Dot, start, start_line, start_col);
            }
            b'&' => {
                pos += 1;
                column += 1;
                push!(TokenKind::Amp, start, start_line, start_col);
            }
            b'=' => {
                pos += 1;
                column += 1;
                push!(TokenKind::Assign, start, start_line, start_col);
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                pos += 1;
                column += 1;
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                    pos += 1;
                    column += 1;
                }
                let text = source[start..pos].to_string();
                push!(TokenKind::Ident(text), start, start_line, start_col);
            }
            other => {
                return Err(ParseError::new(
                    line,
                    column,
                    format!("unexpected character `{}`", other as char),
                ));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
        column,
        start: pos,
        end: pos,
    });
    Ok(tokens)
}

fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b >= 0xF0 => 4,
        b if b >= 0xE0 => 3,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_and_idents() {
        let toks = kinds("var x = &pkg.T{}");
        assert_eq!(
            toks,
            vec![
                TokenKind::Ident("var".into()),
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Amp,
                TokenKind::Ident("pkg".into()),
                TokenKind::Dot,
                TokenKind::Ident("T".into()),
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let toks = kinds(r#""a\"b\n""#);
        assert_eq!(
            toks[0],
            TokenKind::Str {
                value: "a\"b\n".into(),
                raw: false
            }
        );
    }

    #[test]
    fn test_raw_string() {
        let toks = kinds("`raw \"text\"`");
        assert_eq!(
            toks[0],
            TokenKind::Str {
                value: "raw \"text\"".into(),
                raw: true
            }
        );
    }

    #[test]
    fn test_negative_int() {
        let toks = kinds("-42");
        assert_eq!(toks[0], TokenKind::Int(-42));
    }

    #[test]
    fn test_comments_are_tokens() {
        let toks = kinds("// hello\nx /* inline */ y");
        assert_eq!(toks[0], TokenKind::Comment("// hello".into()));
        assert_eq!(toks[2], TokenKind::Comment("/* inline */".into()));
    }

    #[test]
    fn test_positions() {
        let toks = tokenize("var\n  x").unwrap();
        assert_eq!((toks[0].line, toks[0].column), (1, 1));
        assert_eq!((toks[1].line, toks[1].column), (2, 3));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(tokenize("\"abc").is_err());
    }
}
