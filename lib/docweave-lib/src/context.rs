use serde::Deserialize;

use crate::{docweave_error::DocweaveError, site::Location};

/// Where the documented product runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Cloud,
    Local,
}

/// Who a page is written for. Algorithm writing guides are platform neutral,
/// brokerage reference pages always belong to a platform section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    WritingAlgorithms,
    BrokerageReference,
}

/// Brokerage record set by brokerage reference pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Brokerage {
    pub name: String,
}

/// Feature availability flags set by brokerage reference pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Features {
    #[serde(default)]
    pub cash_state: bool,
    #[serde(default)]
    pub holdings_state: bool,
}

/// Flags and scalars describing where and for whom a page is rendered.
///
/// The schema is fixed: conditionals may only reference [`FLAG_NAMES`] and
/// placeholders may only fall back to [`SCALAR_NAMES`]. Flags without a
/// source are false, scalars without a source are empty. A context is built
/// once per page render and is read only afterwards.
///
/// [`FLAG_NAMES`]: PageContext::FLAG_NAMES
/// [`SCALAR_NAMES`]: PageContext::SCALAR_NAMES
#[derive(Debug, Clone)]
pub struct PageContext {
    platform: Option<Platform>,
    audience: Audience,
    brokerage: Option<Brokerage>,
    features: Features,
}

impl PageContext {
    pub const FLAG_NAMES: [&'static str; 6] = [
        "cloud-platform",
        "local-platform",
        "writing-algorithms",
        "brokerage-reference",
        "cash-state",
        "holdings-state",
    ];
    pub const SCALAR_NAMES: [&'static str; 1] = ["brokerage-name"];

    /// Derive a context from the section a page lives in. Fails only when the
    /// location points into an unknown top level section.
    pub fn resolve(
        location: &Location,
        brokerage: Option<Brokerage>,
        features: Features,
    ) -> Result<PageContext, DocweaveError> {
        let (platform, audience) = match location.section() {
            "writing-algorithms" => (None, Audience::WritingAlgorithms),
            "cloud-platform" => (Some(Platform::Cloud), Audience::BrokerageReference),
            "local-platform" => (Some(Platform::Local), Audience::BrokerageReference),
            section => {
                return Err(DocweaveError::invalid_location(format!(
                    "unknown top level section '{section}' in location '{location}'"
                )));
            }
        };
        Ok(PageContext {
            platform,
            audience,
            brokerage,
            features,
        })
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    /// Look up a context flag. Referencing a flag outside the schema is an
    /// error rather than a silent false.
    pub fn flag(&self, name: &str) -> Result<bool, DocweaveError> {
        match name {
            "cloud-platform" => Ok(self.platform == Some(Platform::Cloud)),
            "local-platform" => Ok(self.platform == Some(Platform::Local)),
            "writing-algorithms" => Ok(self.audience == Audience::WritingAlgorithms),
            "brokerage-reference" => Ok(self.audience == Audience::BrokerageReference),
            "cash-state" => Ok(self.features.cash_state),
            "holdings-state" => Ok(self.features.holdings_state),
            _ => Err(DocweaveError::undeclared_flag(format!(
                "'{name}' is not a context flag, declared flags are {:?}",
                Self::FLAG_NAMES
            ))),
        }
    }

    /// Look up a context scalar, None when the name is outside the schema
    pub fn scalar(&self, name: &str) -> Option<String> {
        match name {
            "brokerage-name" => Some(
                self.brokerage
                    .as_ref()
                    .map(|b| b.name.clone())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }
}
