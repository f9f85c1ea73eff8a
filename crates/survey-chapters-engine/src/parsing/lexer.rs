//! # Lexer - Tokenizing HTML Source
//!
//! Breaks a chapter document into tags and text runs. The lexer is lenient:
//! it never fails, and anything it cannot recognise as markup is emitted as
//! text. Only the constructs the chapter template uses are understood:
//!
//! - `<!DOCTYPE ...>` and `<!-- comments -->`
//! - start tags with quoted, unquoted or bare attributes, and `/>`
//! - end tags
//! - raw text bodies of `<script>` and `<style>`
//!
//! Attribute values are entity-decoded here; text runs are kept raw so the
//! tree can decide whether to decode them (script bodies must stay verbatim).

use super::cursor::Cursor;

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name
    pub name: String,
    /// Entity-decoded value; `None` for bare attributes such as `required`
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Lower-cased element name
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Doctype(&'a str),
    Comment(&'a str),
    StartTag(StartTag),
    EndTag(String),
    Text(&'a str),
}

/// Tokenize `src`.
pub fn lex(src: &str) -> Vec<Token<'_>> {
    let mut cur = Cursor::new(src);
    let mut tokens = Vec::new();

    while !cur.eof() {
        if cur.starts_with(b"<!--") {
            cur.bump_n(4);
            let (body, closed) = cur.take_until(b"-->");
            if closed {
                cur.bump_n(3);
            }
            tokens.push(Token::Comment(body));
        } else if cur.starts_with(b"<!") {
            cur.bump_n(2);
            let (body, closed) = cur.take_until(b">");
            if closed {
                cur.bump();
            }
            tokens.push(Token::Doctype(body));
        } else if cur.starts_with(b"</") && cur.peek_at(2).is_some_and(|b| b.is_ascii_alphabetic()) {
            cur.bump_n(2);
            let name = cur.take_while(is_name_byte).to_ascii_lowercase();
            cur.take_until(b">");
            cur.bump();
            tokens.push(Token::EndTag(name));
        } else if cur.peek() == Some(b'<') && cur.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let tag = lex_start_tag(&mut cur);
            let raw_body = RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) && !tag.self_closing;
            let close = format!("</{}", tag.name);
            tokens.push(Token::StartTag(tag));
            if raw_body {
                let (body, _) = cur.take_until_ignore_case(close.as_bytes());
                if !body.is_empty() {
                    tokens.push(Token::Text(body));
                }
            }
        } else {
            let start = cur.pos();
            // a lone '<' that opens nothing is plain text
            if cur.peek() == Some(b'<') {
                cur.bump();
            }
            cur.take_until(b"<");
            tokens.push(Token::Text(&src[start..cur.pos()]));
        }
    }

    tokens
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn lex_start_tag(cur: &mut Cursor<'_>) -> StartTag {
    cur.bump(); // '<'
    let name = cur.take_while(is_name_byte).to_ascii_lowercase();
    let mut attrs = Vec::new();
    let mut self_closing = false;

    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => break,
            Some(b'>') => {
                cur.bump();
                break;
            }
            Some(b'/') if cur.peek_at(1) == Some(b'>') => {
                cur.bump_n(2);
                self_closing = true;
                break;
            }
            Some(b'/') => {
                cur.bump();
                continue;
            }
            _ => {}
        }

        let attr_name = cur.take_while(|b| {
            !b.is_ascii_whitespace() && b != b'=' && b != b'>' && b != b'/'
        });
        if attr_name.is_empty() {
            // stray '=' with no name
            cur.bump();
            continue;
        }

        cur.skip_whitespace();
        let value = if cur.peek() == Some(b'=') {
            cur.bump();
            cur.skip_whitespace();
            Some(lex_attr_value(cur))
        } else {
            None
        };

        attrs.push(Attribute {
            name: attr_name.to_ascii_lowercase(),
            value: value.map(|v| html_escape::decode_html_entities(v).into_owned()),
        });
    }

    StartTag {
        name,
        attrs,
        self_closing,
    }
}

fn lex_attr_value<'a>(cur: &mut Cursor<'a>) -> &'a str {
    match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.bump();
            let (value, closed) = cur.take_until(&[quote]);
            if closed {
                cur.bump();
            }
            value
        }
        _ => cur.take_while(|b| !b.is_ascii_whitespace() && b != b'>'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn start(name: &str, attrs: &[(&str, Option<&str>)]) -> Token<'static> {
        Token::StartTag(StartTag {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(n, v)| Attribute {
                    name: n.to_string(),
                    value: v.map(str::to_string),
                })
                .collect(),
            self_closing: false,
        })
    }

    #[test]
    fn lexes_input_with_bare_and_quoted_attributes() {
        let tokens = lex(r#"<input type="radio" id=q1_1 name='q1' value="Si" required>"#);
        assert_eq!(
            tokens,
            vec![start(
                "input",
                &[
                    ("type", Some("radio")),
                    ("id", Some("q1_1")),
                    ("name", Some("q1")),
                    ("value", Some("Si")),
                    ("required", None),
                ]
            )]
        );
    }

    #[test]
    fn decodes_entities_in_attribute_values() {
        let tokens = lex(r#"<input value="&quot;A&quot; &amp; B">"#);
        let Token::StartTag(tag) = &tokens[0] else {
            panic!("expected start tag");
        };
        assert_eq!(tag.attrs[0].value.as_deref(), Some(r#""A" & B"#));
    }

    #[test]
    fn keeps_script_bodies_raw() {
        let tokens = lex("<script>if (a < b) { x = '<div>'; }</script>");
        assert_eq!(
            tokens,
            vec![
                start("script", &[]),
                Token::Text("if (a < b) { x = '<div>'; }"),
                Token::EndTag("script".to_string()),
            ]
        );
    }

    #[test]
    fn lexes_doctype_comments_and_text() {
        let tokens = lex("<!DOCTYPE html><!-- Q1 -->Hola");
        assert_eq!(
            tokens,
            vec![
                Token::Doctype("DOCTYPE html"),
                Token::Comment(" Q1 "),
                Token::Text("Hola"),
            ]
        );
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        let tokens = lex("3 < 4</p>");
        assert_eq!(
            tokens,
            vec![Token::Text("3 "), Token::Text("< 4"), Token::EndTag("p".to_string())]
        );
    }

    #[test]
    fn test_text_starting_with_multibyte_char() {
        // Given text runs that open with accented and inverted punctuation
        let src = "<label>¿Qué aprendieron?</label><span>Él</span>Ñandú";

        // When lexed
        let tokens = lex(src);

        // Then each run is kept whole
        assert_eq!(
            tokens,
            vec![
                start("label", &[]),
                Token::Text("¿Qué aprendieron?"),
                Token::EndTag("label".to_string()),
                start("span", &[]),
                Token::Text("Él"),
                Token::EndTag("span".to_string()),
                Token::Text("Ñandú"),
            ]
        );
    }

    #[test]
    fn self_closing_tag_is_flagged() {
        let tokens = lex("<br/>");
        let Token::StartTag(tag) = &tokens[0] else {
            panic!("expected start tag");
        };
        assert!(tag.self_closing);
        assert_eq!(tag.name, "br");
    }

    #[test]
    fn unterminated_tag_does_not_loop() {
        let tokens = lex(r#"<div class="open"#);
        assert_eq!(tokens.len(), 1);
    }
}
