// ── Resource mappers ──
//
// One mapper per resource kind, each borrowing the session's device.
// Every operation re-queries live state; nothing is cached between calls.
// Multi-call sequences are not atomic: the first failing call is returned
// and earlier calls are not rolled back.
//
// `find_all` deliberately lists names and then runs a full `find` for each
// one, costing one list call plus N detail lookups.

pub mod monitor;
pub mod node;
pub mod pool;
pub mod rule;
pub mod virtual_server;

pub use monitor::MonitorReader;
pub use node::NodeMapper;
pub use pool::PoolMapper;
pub use rule::RuleReader;
pub use virtual_server::VirtualServerMapper;
