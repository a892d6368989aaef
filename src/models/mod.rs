mod inputs;
mod reports;
mod topology;
mod vlan;

pub use inputs::*;
pub use reports::*;
pub use topology::*;
pub use vlan::*;
