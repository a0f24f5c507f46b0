pub mod check;
pub mod run;

pub use check::*;
pub use run::*;
