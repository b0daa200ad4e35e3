//! GitHub Issues model types.

mod issue;
mod label;
mod user;

pub use issue::*;
pub use label::*;
pub use user::*;
