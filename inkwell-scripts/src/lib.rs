pub mod context;
pub mod logging;
pub mod runner;
pub mod scripts;

pub use context::ScriptContext;
pub use scripts::Script;
