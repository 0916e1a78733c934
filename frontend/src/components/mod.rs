//! UI Components for the resume analyzer page.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadForm`] - Resume selection, drag & drop and upload
//! - [`ResultPanel`] - Last stored analysis with a clear action

mod hero;
mod upload;
mod result;
mod footer;

pub use hero::*;
pub use upload::*;
pub use result::*;
pub use footer::*;
