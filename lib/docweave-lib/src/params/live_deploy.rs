use serde::Deserialize;

use crate::docweave_error::DocweaveError;

use super::{ParamValue, ParameterObject};

/// Extension points a brokerage page feeds into the live deployment wizard
/// fragment. Every field is optional markup and defaults to empty, the
/// wizard renders its generic steps either way.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LiveDeployParams {
    #[serde(default)]
    pub second_bullet: String,
    #[serde(default)]
    pub authentication: String,
    #[serde(default)]
    pub data_provider_details: String,
    #[serde(default)]
    pub post_deploy: String,
}

impl LiveDeployParams {
    pub const FAMILY: &'static str = "live-deploy";

    pub fn from_attributes(table: &toml::Table) -> Result<LiveDeployParams, DocweaveError> {
        table.clone().try_into().map_err(|e| {
            DocweaveError::invalid_field(format!(
                "invalid '{}' parameter object: {e}",
                Self::FAMILY
            ))
        })
    }
}

impl ParameterObject for LiveDeployParams {
    fn family(&self) -> &'static str {
        Self::FAMILY
    }

    fn field(&self, name: &str) -> Option<ParamValue> {
        match name {
            "second-bullet" => Some(ParamValue::Str(self.second_bullet.clone())),
            "authentication" => Some(ParamValue::Str(self.authentication.clone())),
            "data-provider-details" => Some(ParamValue::Str(self.data_provider_details.clone())),
            "post-deploy" => Some(ParamValue::Str(self.post_deploy.clone())),
            _ => None,
        }
    }
}
