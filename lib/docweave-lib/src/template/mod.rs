//! The directive language shared by pages and fragments.
//!
//! Sources are html with a handful of directives: `{{ name }}` placeholders,
//! `{% if flag %}` conditionals over context flags, `{% include "id" %}`
//! fragment composition and `{% sample %}` blocks holding one code variant
//! per target language. A leading html comment in toml format carries the
//! attributes of the surrounding file.

mod lexer;
pub use lexer::read_tokens;

mod token;
pub use token::{Language, Token};

use std::collections::BTreeSet;

use crate::{char_reader::CharReader, docweave_error::DocweaveError, parse_error::ParseError};

pub fn parse_template(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut reader = CharReader::from_str(source);
    read_tokens(&mut reader)
}

/// Resolve a declared language list, defaulting to every supported language
pub(crate) fn parse_languages(
    names: Option<Vec<String>>,
) -> Result<BTreeSet<Language>, DocweaveError> {
    let Some(names) = names else {
        return Ok(Language::ALL.into_iter().collect());
    };
    let mut languages = BTreeSet::new();
    for name in &names {
        let language = Language::from_name(name)
            .ok_or_else(|| DocweaveError::invalid_field(format!("unknown language '{name}'")))?;
        languages.insert(language);
    }
    if languages.is_empty() {
        return Err(DocweaveError::invalid_field("declared language list is empty"));
    }
    Ok(languages)
}

/// Static checks shared by fragments and pages, run once at load time.
///
/// An unqualified sample must cover exactly the declared language set, a
/// qualified sample must stay within it, and only pages may pass parameter
/// objects through an include.
pub(crate) fn check_tokens(
    tokens: &[Token],
    languages: &BTreeSet<Language>,
    allow_param_includes: bool,
    owner: &str,
) -> Result<(), DocweaveError> {
    for token in tokens {
        match token {
            Token::If {
                then, otherwise, ..
            } => {
                check_tokens(then, languages, allow_param_includes, owner)?;
                check_tokens(otherwise, languages, allow_param_includes, owner)?;
            }
            Token::Include {
                fragment,
                with_params,
            } => {
                if with_params.is_some() && !allow_param_includes {
                    return Err(DocweaveError::parse(format!(
                        "include of '{fragment}' passes a parameter object, only pages may do that"
                    ))
                    .with_context(owner));
                }
            }
            Token::Sample {
                qualified,
                variants,
            } => {
                let covered: BTreeSet<Language> = variants.iter().map(|(l, _)| *l).collect();
                if *qualified {
                    if let Some(language) = covered.difference(languages).next() {
                        return Err(DocweaveError::language_mismatch(format!(
                            "sample declares '{language}' which is outside the declared languages {}",
                            format_languages(languages)
                        ))
                        .with_context(owner));
                    }
                } else if covered != *languages {
                    return Err(DocweaveError::language_mismatch(format!(
                        "sample covers {} but the declared languages are {}",
                        format_languages(&covered),
                        format_languages(languages)
                    ))
                    .with_context(owner));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn format_languages(languages: &BTreeSet<Language>) -> String {
    let names: Vec<&str> = languages.iter().map(|l| l.as_class()).collect();
    format!("[{}]", names.join(", "))
}
