pub mod dc_diff;
pub mod host_vlans;
pub mod presence;
pub mod regions;
pub mod zones;

pub use dc_diff::{firewall_dc_presence, switch_dc_presence, DcPresenceMap};
pub use host_vlans::host_vlans;
pub use presence::PresenceMatrix;
pub use regions::compare_regions;
pub use zones::{compare_zones, sort_rows};
