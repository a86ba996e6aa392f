pub mod scripts;
pub mod submodules;

pub use submodules::logging::init_logging;
