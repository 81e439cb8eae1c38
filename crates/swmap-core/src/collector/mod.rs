// ── Collectors ──
//
// Turn live API calls into domain records. Every call is isolated: a
// failing query is logged and contributes nothing, so one bad switch or
// BMC never costs the run the data already gathered elsewhere.

pub mod bmc;
pub mod switch;

pub use bmc::{absorb_network_info, collect_bmc_macs};
pub use switch::{SwitchCollector, SwitchObservations};
