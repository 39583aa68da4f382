use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::{
    docweave_error::DocweaveError,
    template::{self, Language, Token},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct FragmentAttributes {
    languages: Option<Vec<String>>,
    #[serde(default)]
    defaults: HashMap<String, String>,
}

/// A reusable template unit identified by a path like key.
///
/// Fragments are parsed once at catalog load and stay read only afterwards,
/// two renders with different inputs cannot interfere. Front matter declares
/// the supported language set (both languages unless narrowed) and default
/// values for placeholders the caller may leave unset.
#[derive(Debug)]
pub struct Fragment {
    id: String,
    languages: BTreeSet<Language>,
    defaults: HashMap<String, String>,
    tokens: Vec<Token>,
}

impl Fragment {
    pub fn from_source(id: impl Into<String>, source: &str) -> Result<Fragment, DocweaveError> {
        let id = id.into();
        let owner = format!("fragment '{id}'");
        let mut tokens = template::parse_template(source)
            .map_err(|e| DocweaveError::from(e).with_context(owner.clone()))?;
        let attributes: FragmentAttributes = match tokens.first() {
            Some(Token::Attributes { table }) => {
                let table = table.clone();
                tokens.remove(0);
                table.try_into().map_err(|e| {
                    DocweaveError::parse(format!("invalid attributes: {e}"))
                        .with_context(owner.clone())
                })?
            }
            _ => FragmentAttributes::default(),
        };
        let languages = template::parse_languages(attributes.languages)
            .map_err(|e| e.with_context(owner.clone()))?;
        template::check_tokens(&tokens, &languages, false, &owner)?;
        Ok(Fragment {
            id,
            languages,
            defaults: attributes.defaults,
            tokens,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn languages(&self) -> &BTreeSet<Language> {
        &self.languages
    }

    pub fn defaults(&self) -> &HashMap<String, String> {
        &self.defaults
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docweave_error::DocweaveErrorKind;

    #[test]
    fn test_defaults_to_both_languages() {
        let fragment = Fragment::from_source("a/b", "<p>text</p>").unwrap();
        assert_eq!(fragment.languages().len(), 2);
        assert!(fragment.defaults().is_empty());
    }

    #[test]
    fn test_front_matter() {
        let fragment = Fragment::from_source(
            "a/b",
            concat!(
                "<!--\n",
                "languages = [\"python\"]\n",
                "[defaults]\n",
                "post-deploy = \"\"\n",
                "-->\n",
                "<p>{{ post-deploy }}</p>"
            ),
        )
        .unwrap();
        assert_eq!(
            fragment.languages().iter().collect::<Vec<_>>(),
            vec![&Language::Python]
        );
        assert_eq!(fragment.defaults().get("post-deploy"), Some(&String::new()));
    }

    #[test]
    fn test_rejects_param_include() {
        let err =
            Fragment::from_source("a/b", "{% include \"c/d\" with live-deploy %}").unwrap_err();
        assert_eq!(err.kind(), DocweaveErrorKind::Parse);
    }

    #[test]
    fn test_rejects_incomplete_sample() {
        let err = Fragment::from_source(
            "a/b",
            "{% sample %}\n{% csharp %}\nvar x = 1;\n{% endsample %}",
        )
        .unwrap_err();
        assert_eq!(err.kind(), DocweaveErrorKind::LanguageMismatch);
    }

    #[test]
    fn test_unknown_attribute() {
        let err = Fragment::from_source("a/b", "<!--\nlanguage = \"python\"\n-->\n").unwrap_err();
        assert_eq!(err.kind(), DocweaveErrorKind::Parse);
    }
}
