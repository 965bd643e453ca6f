mod ledger;
mod money;
mod subscription;

pub use ledger::*;
pub use money::*;
pub use subscription::*;
