// Application layer - session handling and reporting on top of the ledger.

pub mod error;
pub mod reporting;
pub mod session;

pub use error::*;
pub use reporting::*;
pub use session::*;
