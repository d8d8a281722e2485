/*!
 * Wait Policies
 *
 * A spin-wait loop invokes some action on every iteration while its
 * condition is false. Three named behaviors cover the usual trade-offs:
 *
 * - **burn**: spin at full speed, lowest wake-up latency, hottest core
 * - **yield**: give the slice back to the scheduler, friendliest to
 *   oversubscribed machines
 * - **pause**: issue the CPU spin-loop hint, reduces speculation and
 *   power without leaving the core
 *
 * Every spin site in this crate also accepts an arbitrary `FnMut()`
 * closure in place of a named policy; the work-stealing sort passes a
 * closure that drains peer task queues while it waits.
 */

use std::hint;
use std::thread;

/// Named spin-wait behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitPolicy {
    /// Spin consuming CPU cycles
    Burn,
    /// Yield to the OS scheduler
    #[default]
    Yield,
    /// Hint the core to relax the spin loop (PAUSE)
    Pause,
}

impl WaitPolicy {
    /// Parse from a symbolic tag; unknown tags yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "burn" | "active" => Some(Self::Burn),
            "yield" | "passive" => Some(Self::Yield),
            "pause" | "paused" => Some(Self::Pause),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Burn => "burn",
            Self::Yield => "yield",
            Self::Pause => "pause",
        }
    }

    /// One iteration of waiting under this policy
    #[inline(always)]
    pub fn relax(self) {
        match self {
            Self::Burn => {}
            Self::Yield => thread::yield_now(),
            Self::Pause => hint::spin_loop(),
        }
    }
}

impl std::fmt::Display for WaitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips() {
        for policy in [WaitPolicy::Burn, WaitPolicy::Yield, WaitPolicy::Pause] {
            assert_eq!(WaitPolicy::parse(policy.as_str()), Some(policy));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(WaitPolicy::parse("sleep"), None);
    }

    #[test]
    fn default_is_yield() {
        assert_eq!(WaitPolicy::default(), WaitPolicy::Yield);
    }

    #[test]
    fn relax_returns() {
        // Nothing observable; all three must simply come back.
        WaitPolicy::Burn.relax();
        WaitPolicy::Yield.relax();
        WaitPolicy::Pause.relax();
    }
}
