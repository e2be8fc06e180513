//! Index types and index-keyed vectors used throughout the solver.

mod litvec;
mod var;
mod varvec;

pub use litvec::LitVec;
pub use var::{Lit, Var};
pub use varvec::VarVec;
