pub mod ext;
pub mod pipeline;

mod err;
pub use err::{Error, Result};
