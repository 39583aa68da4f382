use std::collections::HashMap;

use crate::{context::PageContext, docweave_error::DocweaveError, params::ParameterObject};

/// Placeholder and parameter resolution for one evaluation pass.
///
/// Fragment scope resolves placeholders against the parameter object first,
/// then the fragment's declared defaults, then context scalars. Page scope
/// resolves against page `[vars]` then context scalars. Page vars never leak
/// into fragments, a fragment sees exactly its three inputs.
pub(crate) struct Scope<'a> {
    context: &'a PageContext,
    vars: ScopeVars<'a>,
}

enum ScopeVars<'a> {
    Fragment {
        params: Option<&'a dyn ParameterObject>,
        defaults: &'a HashMap<String, String>,
    },
    Page {
        vars: &'a HashMap<String, String>,
        params: &'a HashMap<String, Box<dyn ParameterObject>>,
    },
}

impl<'a> Scope<'a> {
    pub fn fragment(
        context: &'a PageContext,
        params: Option<&'a dyn ParameterObject>,
        defaults: &'a HashMap<String, String>,
    ) -> Scope<'a> {
        Scope {
            context,
            vars: ScopeVars::Fragment { params, defaults },
        }
    }

    pub fn page(
        context: &'a PageContext,
        vars: &'a HashMap<String, String>,
        params: &'a HashMap<String, Box<dyn ParameterObject>>,
    ) -> Scope<'a> {
        Scope {
            context,
            vars: ScopeVars::Page { vars, params },
        }
    }

    pub fn context(&self) -> &'a PageContext {
        self.context
    }

    /// Resolve a placeholder to its substituted value
    pub fn lookup(&self, name: &str) -> Result<String, DocweaveError> {
        match &self.vars {
            ScopeVars::Fragment { params, defaults } => {
                if let Some(params) = params {
                    if let Some(value) = params.field(name) {
                        return Ok(value.to_string());
                    }
                }
                if let Some(value) = defaults.get(name) {
                    return Ok(value.clone());
                }
                if let Some(value) = self.context.scalar(name) {
                    return Ok(value);
                }
                Err(DocweaveError::placeholder_mismatch(format!(
                    "placeholder '{name}' has no parameter field, default or context scalar"
                )))
            }
            ScopeVars::Page { vars, .. } => {
                if let Some(value) = vars.get(name) {
                    return Ok(value.clone());
                }
                if let Some(value) = self.context.scalar(name) {
                    return Ok(value);
                }
                Err(DocweaveError::placeholder_mismatch(format!(
                    "placeholder '{name}' has no page var or context scalar"
                )))
            }
        }
    }

    /// Parameter object an include passes on: pages select one of their
    /// declared objects by family key, fragments pass their own through
    pub fn include_params(
        &self,
        key: Option<&str>,
    ) -> Result<Option<&'a dyn ParameterObject>, DocweaveError> {
        match (&self.vars, key) {
            (ScopeVars::Fragment { params, .. }, None) => Ok(*params),
            (ScopeVars::Fragment { .. }, Some(key)) => Err(DocweaveError::parse(format!(
                "only pages may pass a parameter object, got 'with {key}'"
            ))),
            (ScopeVars::Page { params, .. }, Some(key)) => {
                params.get(key).map(|p| Some(p.as_ref())).ok_or_else(|| {
                    DocweaveError::missing_field(format!(
                        "page declares no '{key}' parameter object"
                    ))
                })
            }
            (ScopeVars::Page { .. }, None) => Ok(None),
        }
    }
}
