//! Pages and their assembly into final documents.

mod location;
pub use location::Location;

mod page;
pub use page::Page;

mod assembler;
pub use assembler::PageAssembler;
