//! Interstitial ad gating.
//!
//! The gate is a pure parity check over the persisted game-over counter.
//! The counter advances on every evaluation, even while ads are disabled, so
//! re-enabling them resumes the every-other-game rhythm from the user's real
//! play count instead of restarting it.

use tracing::debug;

use crate::system::SaveSystem;

/// Decides whether a game-over should show an interstitial. Every second
/// game-over shows one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdsGate;

impl AdsGate {
    /// Game-overs per interstitial.
    const CADENCE: u64 = 2;

    /// Creates the gate.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates one game-over. Always bumps the counter; returns `true`
    /// when the counter lands on the cadence boundary and ads are enabled.
    pub fn should_show_interstitial(&self, save: &mut SaveSystem) -> bool {
        let count = save.bump_ad_gate_counter();
        let show = count % Self::CADENCE == 0 && save.settings().ads_enabled;
        debug!(count, show, "ad gate evaluated");
        show
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn fresh() -> SaveSystem {
        SaveSystem::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_every_other_game_over() {
        let gate = AdsGate::new();
        let mut save = fresh();

        let shown: Vec<bool> = (0..6)
            .map(|_| gate.should_show_interstitial(&mut save))
            .collect();
        assert_eq!(shown, [false, true, false, true, false, true]);
    }

    #[test]
    fn test_disabled_ads_never_show_but_counter_advances() {
        let gate = AdsGate::new();
        let mut save = fresh();
        save.set_ads_enabled(false);

        for _ in 0..3 {
            assert!(!gate.should_show_interstitial(&mut save));
        }
        assert_eq!(save.data().ad_gate_counter, 3);
    }

    #[test]
    fn test_parity_survives_toggle() {
        let gate = AdsGate::new();
        let mut save = fresh();

        // Counts 1 and 2 with ads off: nothing shown, counter still moves.
        save.set_ads_enabled(false);
        assert!(!gate.should_show_interstitial(&mut save));
        assert!(!gate.should_show_interstitial(&mut save));

        // Re-enabled: count 3 is odd, count 4 shows. Parity is continuous
        // with the disabled stretch, not reset by it.
        save.set_ads_enabled(true);
        assert!(!gate.should_show_interstitial(&mut save));
        assert!(gate.should_show_interstitial(&mut save));
    }
}
