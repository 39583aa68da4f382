//! Typed parameter objects pages hand to fragments.
//!
//! Each fragment family has one type. Pages declare them in front matter as
//! `[params.<family>]` tables and pass them through `{% include .. with
//! <family> %}`. Required fields are checked at construction so a broken
//! page fails before anything renders.

mod consolidator;
pub use consolidator::MixedModeConsolidatorParams;

mod live_deploy;
pub use live_deploy::LiveDeployParams;

use std::fmt;

use crate::docweave_error::DocweaveError;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => write!(f, "{value}"),
            ParamValue::Int(value) => write!(f, "{value}"),
        }
    }
}

/// A fragment specific bag of named fields. Fragments borrow it read only
/// for a single render call.
pub trait ParameterObject: fmt::Debug {
    /// Family key pages declare this object under
    fn family(&self) -> &'static str;

    /// Look up a field by placeholder name
    fn field(&self, name: &str) -> Option<ParamValue>;
}

/// Build a typed parameter object from a `[params.<family>]` table
pub fn from_attributes(
    family: &str,
    table: &toml::Table,
) -> Result<Box<dyn ParameterObject>, DocweaveError> {
    match family {
        MixedModeConsolidatorParams::FAMILY => Ok(Box::new(
            MixedModeConsolidatorParams::from_attributes(table)?,
        )),
        LiveDeployParams::FAMILY => Ok(Box::new(LiveDeployParams::from_attributes(table)?)),
        _ => Err(DocweaveError::invalid_field(format!(
            "unknown parameter object family '{family}'"
        ))),
    }
}
