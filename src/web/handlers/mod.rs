//! HTML template rendering handlers.

mod index;
mod link_access_error;

pub use index::{IndexTemplate, index_handler};
pub use link_access_error::LinkAccessErrorTemplate;
