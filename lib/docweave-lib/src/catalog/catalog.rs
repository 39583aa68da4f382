use std::{collections::HashMap, fs::read_to_string, path::Path};

use glob::glob;
use log::{debug, info};

use crate::docweave_error::DocweaveError;

use super::Fragment;

/// Read only mapping from fragment identifier to parsed fragment, loaded once
/// per build and shared by every page render.
#[derive(Debug)]
pub struct FragmentCatalog {
    fragments: HashMap<String, Fragment>,
}

impl FragmentCatalog {
    /// Load every `*.html` fragment under `root`, keyed by its path relative
    /// to `root` without the extension. Parse errors surface here, not at
    /// render time.
    pub fn load(root: &Path) -> Result<FragmentCatalog, DocweaveError> {
        let pattern = root.join("**/*.html");
        let mut fragments = HashMap::new();
        for entry in glob(&pattern.to_string_lossy())? {
            let path = entry?;
            let rel = path
                .strip_prefix(root)
                .map_err(|e| DocweaveError::io(e.to_string()))?;
            let id = rel
                .with_extension("")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<String>>()
                .join("/");
            let source = read_to_string(&path)?;
            debug!("Loading fragment '{id}' from {path:?}");
            fragments.insert(id.clone(), Fragment::from_source(id, &source)?);
        }
        info!("Loaded {} fragments from {root:?}", fragments.len());
        Ok(FragmentCatalog { fragments })
    }

    /// Build a catalog from in-memory `(id, source)` pairs
    pub fn from_sources<I, S>(sources: I) -> Result<FragmentCatalog, DocweaveError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut fragments = HashMap::new();
        for (id, source) in sources {
            let id = id.as_ref().to_string();
            fragments.insert(id.clone(), Fragment::from_source(id, source.as_ref())?);
        }
        Ok(FragmentCatalog { fragments })
    }

    pub fn resolve(&self, id: &str) -> Result<&Fragment, DocweaveError> {
        self.fragments
            .get(id)
            .ok_or_else(|| DocweaveError::unknown_fragment(format!("unknown fragment '{id}'")))
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
