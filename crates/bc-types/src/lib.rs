pub mod config;
pub mod errors;
pub mod goal;
pub mod space;

pub use config::*;
pub use errors::*;
pub use goal::*;
pub use space::*;
