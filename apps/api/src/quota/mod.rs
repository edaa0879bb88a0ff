// Daily admission quotas per caller.
// Tracker is the source of truth; the sweeper only frees memory.

pub mod clock;
pub mod sweeper;
pub mod tracker;
