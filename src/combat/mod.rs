//! Combat Engine
//!
//! Enemies, class abilities, and the battle state machine. Randomness
//! (escape, critical strikes) comes from a caller-supplied `Rng`.

pub mod ability;
pub mod battle;
pub mod enemy;

pub use ability::{AbilityOutcome, SpecialAbility};
pub use battle::{Battle, BattleResult, BattleState, PlayerAction, calculate_damage};
pub use enemy::{Enemy, EnemyType, VictoryRewards, victory_rewards};

#[cfg(test)]
pub(crate) mod tests {
    use rand::RngCore;

    /// Rng that always yields the same word, to pin 50/50 rolls
    pub(crate) struct FixedRng(u64);

    impl FixedRng {
        /// `gen_bool(0.5)` is always true
        pub(crate) fn heads() -> Self {
            Self(0)
        }

        /// `gen_bool(0.5)` is always false
        pub(crate) fn tails() -> Self {
            Self(u64::MAX)
        }
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0 as u8);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }
}
