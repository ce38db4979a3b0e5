// ABOUTME: Fork module - exclusive shared resources arranged in a ring.
// ABOUTME: Contains the non-blocking fork primitive, its scoped guard, and the ring.

mod epoch;
mod fork;
mod ring;

pub(crate) use epoch::WriteEpoch;
pub use fork::{Fork, ForkGuard};
pub use ring::ForkRing;

#[cfg(test)]
mod ring_test;
