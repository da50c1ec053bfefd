pub mod basis;
pub mod cgto;
pub mod error;
pub mod gto;
pub mod helper;

mod gto_test;

pub use basis::Basis;
pub use cgto::{ContractedGTO, Normalization};
pub use error::CgtoError;
pub use gto::{GTO1d, GTO};
