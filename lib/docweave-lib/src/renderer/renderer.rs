use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::{
    catalog::FragmentCatalog,
    context::PageContext,
    docweave_error::DocweaveError,
    params::ParameterObject,
    template::{Language, Token},
};

use super::{Scope, escape::escape_html};

/// Markup produced by one fragment render, tagged with the set of code
/// languages it emitted. Downstream display logic selects between language
/// tagged sub blocks, the renderer itself never picks one.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    pub html: String,
    pub languages: BTreeSet<Language>,
}

impl RenderedBlock {
    pub(crate) fn new() -> RenderedBlock {
        RenderedBlock {
            html: String::new(),
            languages: BTreeSet::new(),
        }
    }
}

/// Renders fragments against a page context and an optional parameter
/// object.
///
/// Rendering is referentially transparent: identical inputs always produce
/// an identical block, fragments read nothing outside their three inputs.
/// Fragments may include other fragments, the active chain is tracked so a
/// cycle fails instead of recursing forever.
pub struct FragmentRenderer<'c> {
    catalog: &'c FragmentCatalog,
}

impl<'c> FragmentRenderer<'c> {
    pub fn new(catalog: &'c FragmentCatalog) -> FragmentRenderer<'c> {
        FragmentRenderer { catalog }
    }

    pub fn render(
        &self,
        fragment_id: &str,
        context: &PageContext,
        params: Option<&dyn ParameterObject>,
    ) -> Result<RenderedBlock, DocweaveError> {
        let mut chain = Vec::new();
        self.render_fragment(fragment_id, context, params, &mut chain)
    }

    fn render_fragment(
        &self,
        fragment_id: &str,
        context: &PageContext,
        params: Option<&dyn ParameterObject>,
        chain: &mut Vec<String>,
    ) -> Result<RenderedBlock, DocweaveError> {
        if chain.iter().any(|id| id == fragment_id) {
            chain.push(fragment_id.to_string());
            return Err(DocweaveError::fragment_cycle(format!(
                "fragment inclusion cycle: {}",
                chain.join(" -> ")
            )));
        }
        let fragment = self.catalog.resolve(fragment_id)?;
        chain.push(fragment_id.to_string());
        debug!("Rendering fragment '{fragment_id}'");
        let scope = Scope::fragment(context, params, fragment.defaults());
        let mut block = RenderedBlock::new();
        self.eval_tokens(fragment.tokens(), &scope, chain, &mut block)
            .map_err(|e| e.with_context(format!("fragment '{fragment_id}'")))?;
        chain.pop();
        Ok(block)
    }

    /// Evaluate tokens into `block`. Shared by fragment renders and page
    /// bodies, which differ only in their scope.
    pub(crate) fn eval_tokens(
        &self,
        tokens: &[Token],
        scope: &Scope,
        chain: &mut Vec<String>,
        block: &mut RenderedBlock,
    ) -> Result<(), DocweaveError> {
        for token in tokens {
            match token {
                // attributes are extracted at load time
                Token::Attributes { .. } => {}
                Token::Text { text } => block.html.push_str(text),
                Token::Placeholder { name } => block.html.push_str(&scope.lookup(name)?),
                Token::If {
                    flag,
                    then,
                    otherwise,
                } => {
                    if scope.context().flag(flag)? {
                        self.eval_tokens(then, scope, chain, block)?;
                    } else {
                        self.eval_tokens(otherwise, scope, chain, block)?;
                    }
                }
                Token::Include {
                    fragment,
                    with_params,
                } => {
                    let params = scope.include_params(with_params.as_deref())?;
                    let child = self.render_fragment(fragment, scope.context(), params, chain)?;
                    block.html.push_str(&child.html);
                    block.languages.extend(child.languages.iter().copied());
                }
                Token::Sample { variants, .. } => self.eval_sample(variants, scope, block)?,
            }
        }
        Ok(())
    }

    /// Serialize a sample block: one `<pre>` per language inside a shared
    /// container, C# before Python. A single language sample widens the
    /// container class so display rules can hide the whole block.
    fn eval_sample(
        &self,
        variants: &[(Language, Vec<Token>)],
        scope: &Scope,
        block: &mut RenderedBlock,
    ) -> Result<(), DocweaveError> {
        let mut rendered: BTreeMap<Language, String> = BTreeMap::new();
        for (language, tokens) in variants {
            let mut code = String::new();
            for token in tokens {
                match token {
                    Token::Text { text } => code.push_str(text),
                    Token::Placeholder { name } => code.push_str(&scope.lookup(name)?),
                    // the lexer only emits text and placeholders here
                    _ => {}
                }
            }
            rendered.insert(*language, trim_code(&code));
        }

        let container_class = match rendered.keys().next() {
            Some(language) if rendered.len() == 1 => {
                format!("{language} section-example-container")
            }
            _ => "section-example-container".to_string(),
        };
        block.html.push_str(&format!("<div class=\"{container_class}\">\n"));
        for (language, code) in &rendered {
            block.languages.insert(*language);
            block.html.push_str(&format!(
                "    <pre class=\"{language}\">{}</pre>\n",
                escape_html(code)
            ));
        }
        block.html.push_str("</div>");
        Ok(())
    }
}

/// Strip the newline after the opening marker and trailing indentation
/// before the closing marker, preserving the code's own layout
fn trim_code(code: &str) -> String {
    let code = code
        .strip_prefix("\r\n")
        .or_else(|| code.strip_prefix('\n'))
        .unwrap_or(code);
    code.trim_end().to_string()
}
