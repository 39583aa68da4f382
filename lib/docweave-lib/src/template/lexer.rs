use log::warn;

use crate::{char_reader::CharReader, parse_error::ParseError};

use super::token::{Language, Token};

/// Lex a template source into tokens using recursive descent.
///
/// Text outside directives passes through verbatim, including lone braces.
pub fn read_tokens(reader: &mut CharReader) -> Result<Vec<Token>, ParseError> {
    let mut tokens = vec![];
    if let Some(attributes) = read_attributes(reader) {
        tokens.push(attributes);
    }
    read_tokens_until(reader, &[], &mut tokens)?;
    Ok(tokens)
}

/// Read tokens until eof or until one of `terminators` is found. The
/// terminating directive is consumed and its keyword returned.
fn read_tokens_until(
    reader: &mut CharReader,
    terminators: &[&str],
    tokens: &mut Vec<Token>,
) -> Result<Option<String>, ParseError> {
    let mut text = String::new();
    loop {
        if reader.is_eof() {
            flush_text(&mut text, tokens);
            if terminators.is_empty() {
                return Ok(None);
            }
            return Err(ParseError::eof(format!(
                "unclosed block, expected {}",
                format_directives(terminators)
            )));
        }
        if reader.has_string("{{") {
            flush_text(&mut text, tokens);
            tokens.push(read_placeholder(reader)?);
            continue;
        }
        if reader.has_string("{%") {
            let (keyword, argument) = peek_directive(reader)?;
            if terminators.iter().any(|t| *t == keyword) {
                flush_text(&mut text, tokens);
                consume_directive(reader);
                return Ok(Some(keyword));
            }
            flush_text(&mut text, tokens);
            let token = match keyword.as_str() {
                "if" => read_if(reader, argument)?,
                "include" => {
                    consume_directive(reader);
                    parse_include(&argument)?
                }
                "sample" => read_sample(reader, argument)?,
                "else" | "endif" | "endsample" | "csharp" | "python" => {
                    return Err(ParseError::invalid(format!(
                        "unexpected '{{% {keyword} %}}'"
                    )));
                }
                _ => {
                    return Err(ParseError::unsupported(format!(
                        "unknown directive '{{% {keyword} %}}'"
                    )));
                }
            };
            tokens.push(token);
            continue;
        }

        text.push_str(&reader.consume_until_exclusive(|c| c == '{'));
        // a lone brace that does not open a directive is literal text
        if !reader.is_eof() && !reader.has_string("{{") && !reader.has_string("{%") {
            if let Some(c) = reader.consume_char() {
                text.push(c);
            }
        }
    }
}

/// A leading html comment in toml format holds the page or fragment attributes
fn read_attributes(reader: &mut CharReader) -> Option<Token> {
    if reader.has_read() || !reader.has_string("<!--") {
        return None;
    }
    let comment = reader.peek_until_match_inclusive("-->")?;
    match toml::from_str(&comment[4..comment.len() - 3]) {
        Ok(toml::Value::Table(table)) => {
            reader.consume(comment.chars().count());
            Some(Token::Attributes { table })
        }
        Ok(_) => {
            warn!("Attributes is not a table");
            None
        }
        Err(e) => {
            warn!("Not parsing possible attributes: {e}");
            None
        }
    }
}

fn read_placeholder(reader: &mut CharReader) -> Result<Token, ParseError> {
    let raw = reader
        .peek_until_match_inclusive("}}")
        .ok_or_else(|| ParseError::eof("unclosed placeholder, expected '}}'"))?;
    let name = raw[2..raw.len() - 2].trim().to_string();
    if !is_identifier(&name) {
        return Err(ParseError::invalid(format!(
            "invalid placeholder name '{name}'"
        )));
    }
    reader.consume(raw.chars().count());
    Ok(Token::Placeholder { name })
}

fn read_if(reader: &mut CharReader, flag: String) -> Result<Token, ParseError> {
    if !is_identifier(&flag) {
        return Err(ParseError::invalid(format!(
            "invalid flag '{flag}' in '{{% if %}}'"
        )));
    }
    consume_directive(reader);
    let mut then = vec![];
    let mut otherwise = vec![];
    if let Some("else") = read_tokens_until(reader, &["else", "endif"], &mut then)?.as_deref() {
        read_tokens_until(reader, &["endif"], &mut otherwise)?;
    }
    Ok(Token::If {
        flag,
        then,
        otherwise,
    })
}

fn parse_include(argument: &str) -> Result<Token, ParseError> {
    let Some(rest) = argument.strip_prefix('"') else {
        return Err(ParseError::invalid(format!(
            "expected a quoted fragment identifier in '{{% include %}}', got '{argument}'"
        )));
    };
    let Some((fragment, rest)) = rest.split_once('"') else {
        return Err(ParseError::invalid(
            "unterminated fragment identifier in '{% include %}'",
        ));
    };
    if fragment.is_empty() || !fragment.split('/').all(is_identifier) {
        return Err(ParseError::invalid(format!(
            "invalid fragment identifier '{fragment}'"
        )));
    }
    let rest = rest.trim();
    let with_params = if rest.is_empty() {
        None
    } else if let Some(key) = rest.strip_prefix("with ") {
        let key = key.trim();
        if !is_identifier(key) {
            return Err(ParseError::invalid(format!(
                "invalid parameter object key '{key}'"
            )));
        }
        Some(key.to_string())
    } else {
        return Err(ParseError::invalid(format!(
            "unexpected '{rest}' after fragment identifier"
        )));
    };
    Ok(Token::Include {
        fragment: fragment.to_string(),
        with_params,
    })
}

enum SampleMarker {
    Language(Language),
    End,
}

fn read_sample(reader: &mut CharReader, argument: String) -> Result<Token, ParseError> {
    consume_directive(reader);

    // a qualified sample names its language set and holds a single body
    if !argument.is_empty() {
        let Some(language) = Language::from_name(&argument) else {
            return Err(ParseError::invalid(format!(
                "unknown sample language '{argument}'"
            )));
        };
        let mut body = vec![];
        if let SampleMarker::Language(inner) = read_sample_body(reader, &mut body)? {
            return Err(ParseError::invalid(format!(
                "'{{% {inner} %}}' is not allowed inside a '{{% sample {argument} %}}' block"
            )));
        }
        return Ok(Token::Sample {
            qualified: true,
            variants: vec![(language, body)],
        });
    }

    let mut leading = vec![];
    let mut marker = read_sample_body(reader, &mut leading)?;
    let blank = leading.iter().all(|t| match t {
        Token::Text { text } => text.trim().is_empty(),
        _ => false,
    });
    if !blank {
        return Err(ParseError::invalid(
            "content before the first language marker of a '{% sample %}' block",
        ));
    }
    let mut variants: Vec<(Language, Vec<Token>)> = vec![];
    while let SampleMarker::Language(language) = marker {
        if variants.iter().any(|(l, _)| *l == language) {
            return Err(ParseError::invalid(format!(
                "duplicate '{{% {language} %}}' variant"
            )));
        }
        let mut body = vec![];
        marker = read_sample_body(reader, &mut body)?;
        variants.push((language, body));
    }
    if variants.is_empty() {
        return Err(ParseError::invalid(
            "'{% sample %}' block without language variants",
        ));
    }
    Ok(Token::Sample {
        qualified: false,
        variants,
    })
}

/// Read a sample variant body up to the next language marker or
/// `{% endsample %}`. Only text and placeholders may appear inside.
fn read_sample_body(
    reader: &mut CharReader,
    tokens: &mut Vec<Token>,
) -> Result<SampleMarker, ParseError> {
    let mut text = String::new();
    loop {
        if reader.is_eof() {
            return Err(ParseError::eof(
                "unclosed sample block, expected '{% endsample %}'",
            ));
        }
        if reader.has_string("{{") {
            flush_text(&mut text, tokens);
            tokens.push(read_placeholder(reader)?);
            continue;
        }
        if reader.has_string("{%") {
            let (keyword, argument) = peek_directive(reader)?;
            match keyword.as_str() {
                "endsample" => {
                    flush_text(&mut text, tokens);
                    consume_directive(reader);
                    return Ok(SampleMarker::End);
                }
                "csharp" | "python" => {
                    if !argument.is_empty() {
                        return Err(ParseError::invalid(format!(
                            "unexpected argument '{argument}' on '{{% {keyword} %}}'"
                        )));
                    }
                    flush_text(&mut text, tokens);
                    consume_directive(reader);
                    let language = if keyword == "csharp" {
                        Language::CSharp
                    } else {
                        Language::Python
                    };
                    return Ok(SampleMarker::Language(language));
                }
                _ => {
                    return Err(ParseError::unsupported(format!(
                        "'{{% {keyword} %}}' is not supported inside sample blocks"
                    )));
                }
            }
        }

        text.push_str(&reader.consume_until_exclusive(|c| c == '{'));
        if !reader.is_eof() && !reader.has_string("{{") && !reader.has_string("{%") {
            if let Some(c) = reader.consume_char() {
                text.push(c);
            }
        }
    }
}

/// Peek a `{% keyword argument %}` directive without consuming it
fn peek_directive(reader: &CharReader) -> Result<(String, String), ParseError> {
    let raw = reader
        .peek_until_match_inclusive("%}")
        .ok_or_else(|| ParseError::eof("unclosed directive, expected '%}'"))?;
    let inner = raw[2..raw.len() - 2].trim();
    let mut parts = inner.splitn(2, char::is_whitespace);
    let keyword = parts.next().unwrap_or_default().to_string();
    if keyword.is_empty() {
        return Err(ParseError::invalid("empty directive"));
    }
    let argument = parts.next().unwrap_or_default().trim().to_string();
    Ok((keyword, argument))
}

/// Consume a directive previously peeked with `peek_directive`
fn consume_directive(reader: &mut CharReader) {
    if let Some(raw) = reader.peek_until_match_inclusive("%}") {
        reader.consume(raw.chars().count());
    }
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::Text {
            text: std::mem::take(text),
        });
    }
}

/// kebab-case identifier used for placeholders, flags and family keys
fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn format_directives(keywords: &[&str]) -> String {
    let directives: Vec<String> = keywords.iter().map(|k| format!("'{{% {k} %}}'")).collect();
    directives.join(" or ")
}
