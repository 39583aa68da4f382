//! Docweave
//!
//! Composes reference documentation pages out of shared fragments. Pages
//! declare their rendering inputs in front matter, fragments stay input
//! driven and render the same markup for the same inputs every time.
//!
//! # Example on how to use this crate
//! ```rs
//! let docweave = Docweave::new(
//!     PathBuf::from("content/pages"),
//!     PathBuf::from("content/resources"),
//!     PathBuf::from("build"),
//! );
//! let report = docweave.render().unwrap();
//! println!("{report}");
//! ```
pub mod catalog;
pub mod char_reader;
pub mod context;
pub mod params;
pub mod renderer;
pub mod report;
pub mod site;
pub mod template;

pub mod docweave_error;
pub mod parse_error;

use std::{
    fs::{create_dir_all, remove_dir_all, write},
    path::{Path, PathBuf},
};

use glob::glob;
use log::{error, info};

use catalog::FragmentCatalog;
use docweave_error::DocweaveError;
use report::BuildReport;
use site::{Location, Page, PageAssembler};

pub struct Docweave {
    pages_root: PathBuf,
    fragments_root: PathBuf,
    output_directory: PathBuf,
}

impl Docweave {
    pub fn new(pages_root: PathBuf, fragments_root: PathBuf, output_directory: PathBuf) -> Docweave {
        Docweave {
            pages_root,
            fragments_root,
            output_directory,
        }
    }

    /// Render every page under the pages root into the output directory
    pub fn render(&self) -> Result<BuildReport, DocweaveError> {
        self.build(true)
    }

    /// Validate every page without writing anything
    pub fn check(&self) -> Result<BuildReport, DocweaveError> {
        self.build(false)
    }

    /// Render a single page to a string
    pub fn render_page(&self, location: &str) -> Result<String, DocweaveError> {
        let location = Location::parse(location)?;
        let catalog = FragmentCatalog::load(&self.fragments_root)?;
        let path = self.pages_root.join(format!("{location}.html"));
        let page = Page::load(&self.pages_root, &path)?;
        PageAssembler::new(&catalog).assemble(&page)
    }

    fn build(&self, write_output: bool) -> Result<BuildReport, DocweaveError> {
        info!("Loading fragments from {:?}", self.fragments_root);
        let catalog = FragmentCatalog::load(&self.fragments_root)?;
        let assembler = PageAssembler::new(&catalog);

        let mut page_paths = Vec::new();
        for entry in glob(&self.pages_root.join("**/*.html").to_string_lossy())? {
            page_paths.push(entry?);
        }
        // render in a stable order
        page_paths.sort();
        info!("Found {} pages under {:?}", page_paths.len(), self.pages_root);

        if write_output {
            if self.output_directory.exists() {
                info!("Removing {:?}", self.output_directory);
                remove_dir_all(&self.output_directory)?;
            }
            info!("Creating {:?}", self.output_directory);
            create_dir_all(&self.output_directory)?;
        }

        let mut report = BuildReport::new();
        for path in page_paths {
            match self.build_page(&assembler, &path, write_output) {
                Ok(location) => report.page_rendered(location),
                Err(e) => {
                    let location = display_location(&self.pages_root, &path);
                    error!("Failed to render '{location}': {e}");
                    report.page_failed(location, e);
                }
            }
        }

        if write_output {
            info!("All files written");
        }
        Ok(report)
    }

    fn build_page(
        &self,
        assembler: &PageAssembler,
        path: &Path,
        write_output: bool,
    ) -> Result<String, DocweaveError> {
        let page = Page::load(&self.pages_root, path)?;
        let html = assembler.assemble(&page)?;
        if write_output {
            let output_path = self
                .output_directory
                .join(format!("{}.html", page.location()));
            if let Some(parent) = output_path.parent() {
                create_dir_all(parent)?;
            }
            info!("Writing {output_path:?}");
            write(&output_path, html)?;
        }
        Ok(page.location().to_string())
    }
}

/// Best effort location string for reporting, valid even for pages that
/// failed to load
fn display_location(pages_root: &Path, path: &Path) -> String {
    path.strip_prefix(pages_root)
        .unwrap_or(path)
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<String>>()
        .join("/")
}
