use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for a [`Game`].
///
/// The generator is owned by the game and kept across generations, so a stateful generator (such as an RNG-backed
/// one) continues its stream on every re-initialisation instead of starting over.
pub trait MinefieldGenerator {
    /// Produce a layout for `config`.
    ///
    /// Configs that fail [`GameConfig::validate`] get a degenerate field (full for too many mines, empty for bad
    /// dimensions) whose [`Minefield::game_config`] differs from the request.
    fn generate(&mut self, config: GameConfig) -> Minefield;
}
