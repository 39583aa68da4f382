use serde::Deserialize;

use crate::docweave_error::DocweaveError;

use super::{ParamValue, ParameterObject};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConsolidatorAttributes {
    num_samples: Option<i64>,
    period: Option<String>,
    resolution: Option<String>,
    receive_time: Option<String>,
}

/// Parameters for the mixed mode consolidator fragments.
///
/// The human readable `period` ("1 day", "30 minutes") is resolved into the
/// per language duration literals at construction, so sample code embeds
/// `TimeSpan.FromDays(1)` and `timedelta(days=1)` without the page spelling
/// out either language.
#[derive(Debug, Clone)]
pub struct MixedModeConsolidatorParams {
    num_samples: i64,
    period: String,
    period_csharp: String,
    period_python: String,
    resolution: String,
    receive_time: String,
}

impl MixedModeConsolidatorParams {
    pub const FAMILY: &'static str = "mixed-mode-consolidator";

    pub fn from_attributes(table: &toml::Table) -> Result<MixedModeConsolidatorParams, DocweaveError> {
        let attributes: ConsolidatorAttributes = table.clone().try_into().map_err(|e| {
            DocweaveError::invalid_field(format!(
                "invalid '{}' parameter object: {e}",
                Self::FAMILY
            ))
        })?;
        let num_samples = attributes.num_samples.ok_or_else(|| missing("num-samples"))?;
        let period = attributes.period.ok_or_else(|| missing("period"))?;
        let resolution = attributes.resolution.ok_or_else(|| missing("resolution"))?;
        if num_samples <= 0 {
            return Err(DocweaveError::invalid_field(format!(
                "'num-samples' must be positive, got {num_samples}"
            )));
        }
        let (period_csharp, period_python) = resolve_period(&period)?;
        Ok(MixedModeConsolidatorParams {
            num_samples,
            period,
            period_csharp,
            period_python,
            resolution,
            receive_time: attributes.receive_time.unwrap_or_default(),
        })
    }
}

impl ParameterObject for MixedModeConsolidatorParams {
    fn family(&self) -> &'static str {
        Self::FAMILY
    }

    fn field(&self, name: &str) -> Option<ParamValue> {
        match name {
            "num-samples" => Some(ParamValue::Int(self.num_samples)),
            "period" => Some(ParamValue::Str(self.period.clone())),
            "period-csharp" => Some(ParamValue::Str(self.period_csharp.clone())),
            "period-python" => Some(ParamValue::Str(self.period_python.clone())),
            "resolution" => Some(ParamValue::Str(self.resolution.clone())),
            "receive-time" => Some(ParamValue::Str(self.receive_time.clone())),
            _ => None,
        }
    }
}

fn missing(field: &str) -> DocweaveError {
    DocweaveError::missing_field(format!(
        "'{}' parameter objects require a '{field}' field",
        MixedModeConsolidatorParams::FAMILY
    ))
}

/// Resolve a "<count> <unit>" period into the C# and Python duration literals
fn resolve_period(period: &str) -> Result<(String, String), DocweaveError> {
    let invalid = || {
        DocweaveError::invalid_field(format!(
            "cannot resolve period '{period}', expected '<count> <seconds|minutes|hours|days>'"
        ))
    };
    let mut parts = period.split_whitespace();
    let count: u32 = parts
        .next()
        .and_then(|c| c.parse().ok())
        .ok_or_else(invalid)?;
    let unit = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    let (method, keyword) = match unit.trim_end_matches('s') {
        "second" => ("FromSeconds", "seconds"),
        "minute" => ("FromMinutes", "minutes"),
        "hour" => ("FromHours", "hours"),
        "day" => ("FromDays", "days"),
        _ => return Err(invalid()),
    };
    Ok((
        format!("TimeSpan.{method}({count})"),
        format!("timedelta({keyword}={count})"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docweave_error::DocweaveErrorKind;

    fn table(source: &str) -> toml::Table {
        source.parse().unwrap()
    }

    #[test]
    fn test_construction() {
        let params = MixedModeConsolidatorParams::from_attributes(&table(
            "num-samples = 10\nperiod = \"1 day\"\nresolution = \"minute\"\nreceive-time = \"9:31\"",
        ))
        .unwrap();
        assert_eq!(params.field("num-samples"), Some(ParamValue::Int(10)));
        assert_eq!(
            params.field("period-csharp"),
            Some(ParamValue::Str("TimeSpan.FromDays(1)".to_string()))
        );
        assert_eq!(
            params.field("period-python"),
            Some(ParamValue::Str("timedelta(days=1)".to_string()))
        );
        assert_eq!(
            params.field("receive-time"),
            Some(ParamValue::Str("9:31".to_string()))
        );
        assert_eq!(params.field("time-span"), None);
    }

    #[test]
    fn test_optional_receive_time() {
        let params = MixedModeConsolidatorParams::from_attributes(&table(
            "num-samples = 5\nperiod = \"30 minutes\"\nresolution = \"second\"",
        ))
        .unwrap();
        assert_eq!(
            params.field("period-csharp"),
            Some(ParamValue::Str("TimeSpan.FromMinutes(30)".to_string()))
        );
        assert_eq!(params.field("receive-time"), Some(ParamValue::Str(String::new())));
    }

    #[test]
    fn test_missing_required_field() {
        let err = MixedModeConsolidatorParams::from_attributes(&table(
            "num-samples = 10\nresolution = \"minute\"",
        ))
        .unwrap_err();
        assert_eq!(err.kind(), DocweaveErrorKind::MissingField);
    }

    #[test]
    fn test_unknown_field() {
        let err = MixedModeConsolidatorParams::from_attributes(&table(
            "num-samples = 10\nperiod = \"1 day\"\nresolution = \"minute\"\nsamples = 2",
        ))
        .unwrap_err();
        assert_eq!(err.kind(), DocweaveErrorKind::InvalidField);
    }

    #[test]
    fn test_unresolvable_period() {
        for period in ["daily", "1", "one day", "1 fortnight", "1 day extra"] {
            let err = MixedModeConsolidatorParams::from_attributes(&table(&format!(
                "num-samples = 10\nperiod = \"{period}\"\nresolution = \"minute\""
            )))
            .unwrap_err();
            assert_eq!(err.kind(), DocweaveErrorKind::InvalidField, "{period}");
        }
    }

    #[test]
    fn test_non_positive_samples() {
        let err = MixedModeConsolidatorParams::from_attributes(&table(
            "num-samples = 0\nperiod = \"1 day\"\nresolution = \"minute\"",
        ))
        .unwrap_err();
        assert_eq!(err.kind(), DocweaveErrorKind::InvalidField);
    }
}
