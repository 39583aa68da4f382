use crate::{
    catalog::FragmentCatalog,
    context::PageContext,
    docweave_error::DocweaveError,
    renderer::{FragmentRenderer, RenderedBlock, Scope},
    site::Page,
};

/// Turns loaded pages into finished html documents.
///
/// Assembly resolves the page context from the location, evaluates the page
/// body against it and hands parameter objects to included fragments. The
/// page's own `[vars]` stay page local.
pub struct PageAssembler<'c> {
    catalog: &'c FragmentCatalog,
}

impl<'c> PageAssembler<'c> {
    pub fn new(catalog: &'c FragmentCatalog) -> PageAssembler<'c> {
        PageAssembler { catalog }
    }

    pub fn assemble(&self, page: &Page) -> Result<String, DocweaveError> {
        let context = PageContext::resolve(
            page.location(),
            page.brokerage().cloned(),
            page.features().clone(),
        )?;
        let renderer = FragmentRenderer::new(self.catalog);
        let scope = Scope::page(&context, page.vars(), page.params());
        let mut chain = Vec::new();
        let mut block = RenderedBlock::new();
        renderer
            .eval_tokens(page.tokens(), &scope, &mut chain, &mut block)
            .map_err(|e| e.with_context(format!("page '{}'", page.location())))?;
        let mut html = block.html;
        if !html.ends_with('\n') {
            html.push('\n');
        }
        Ok(html)
    }
}
