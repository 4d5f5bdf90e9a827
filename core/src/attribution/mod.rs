//! Spend-to-outcome attribution
//!
//! Every resource-spending cast is matched to the damage or heal it
//! produced. Two paths, disjoint by the eligible-ability partition:
//!
//! - **spender**: a two-state flag machine per tracked actor. A qualifying
//!   cast arms it when the cast carries a spender link; the next qualifying
//!   outcome consumes it.
//! - **chain**: multi-hop resolution for the designated chain-sensitive
//!   ability, folding triggered-cast hits into a proxy identifier.
//!
//! Both paths feed the per-ability accumulators in `SpenderTotals`.

mod chain;
mod spender;
mod totals;


pub use chain::{ChainAttribution, resolve_chain};
pub use spender::SpenderAttribution;
pub use totals::SpenderTotals;
