pub mod enums;
pub mod filters;
pub mod inputs;
pub mod models;

pub use enums::*;
pub use filters::*;
pub use inputs::*;
pub use models::*;
