pub mod table;
pub mod errors;

pub use table::{RenderOptions, Table};
pub use errors::EtlError;
