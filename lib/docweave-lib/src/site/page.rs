use std::{
    collections::{BTreeSet, HashMap},
    fs::read_to_string,
    path::Path,
};

use serde::Deserialize;

use crate::{
    context::{Brokerage, Features},
    docweave_error::DocweaveError,
    params::{self, ParameterObject},
    site::Location,
    template::{self, Language, Token},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PageAttributes {
    languages: Option<Vec<String>>,
    brokerage: Option<Brokerage>,
    #[serde(default)]
    features: Features,
    #[serde(default)]
    vars: HashMap<String, String>,
    #[serde(default)]
    params: HashMap<String, toml::Table>,
}

/// A leaf document of the site tree.
///
/// The front matter declares everything the page contributes to rendering:
/// the brokerage and feature inputs the context resolver consumes, page local
/// `[vars]`, and `[params.<family>]` tables that become typed parameter
/// objects. Parameter objects are constructed at load time so a page with a
/// missing or malformed field fails before any fragment renders.
#[derive(Debug)]
pub struct Page {
    location: Location,
    languages: BTreeSet<Language>,
    brokerage: Option<Brokerage>,
    features: Features,
    vars: HashMap<String, String>,
    params: HashMap<String, Box<dyn ParameterObject>>,
    tokens: Vec<Token>,
}

impl Page {
    /// Load a page source file. The path relative to the pages root becomes
    /// the page location.
    pub fn load(pages_root: &Path, path: &Path) -> Result<Page, DocweaveError> {
        let rel = path.strip_prefix(pages_root).map_err(|e| {
            DocweaveError::io(format!("page path {path:?} is outside the pages root: {e}"))
        })?;
        let location = Location::from_rel_path(rel)?;
        let source = read_to_string(path)
            .map_err(|e| DocweaveError::from(e).with_context(format!("page '{location}'")))?;
        Page::from_source(location, &source)
    }

    pub fn from_source(location: Location, source: &str) -> Result<Page, DocweaveError> {
        let owner = format!("page '{location}'");
        let mut tokens = template::parse_template(source)
            .map_err(|e| DocweaveError::from(e).with_context(owner.clone()))?;
        let attributes: PageAttributes = match tokens.first() {
            Some(Token::Attributes { table }) => {
                let table = table.clone();
                tokens.remove(0);
                table.try_into().map_err(|e| {
                    DocweaveError::parse(format!("invalid attributes: {e}"))
                        .with_context(owner.clone())
                })?
            }
            _ => PageAttributes::default(),
        };
        let languages = template::parse_languages(attributes.languages)
            .map_err(|e| e.with_context(owner.clone()))?;
        let mut objects: HashMap<String, Box<dyn ParameterObject>> = HashMap::new();
        for (family, table) in &attributes.params {
            let object =
                params::from_attributes(family, table).map_err(|e| e.with_context(owner.clone()))?;
            objects.insert(family.clone(), object);
        }
        template::check_tokens(&tokens, &languages, true, &owner)?;
        Ok(Page {
            location,
            languages,
            brokerage: attributes.brokerage,
            features: attributes.features,
            vars: attributes.vars,
            params: objects,
            tokens,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn languages(&self) -> &BTreeSet<Language> {
        &self.languages
    }

    pub fn brokerage(&self) -> Option<&Brokerage> {
        self.brokerage.as_ref()
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }

    pub fn params(&self) -> &HashMap<String, Box<dyn ParameterObject>> {
        &self.params
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
