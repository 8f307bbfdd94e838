use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform generation strategy: draws linear positions and redraws any position already holding a mine until the
/// requested count is reached.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomMinefieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMinefieldGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> Minefield {
        match config.validate() {
            Err(GameError::MineCountOutOfRange) => {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    config.total_cells()
                );
                let mine_mask = Array2::from_elem((config.height, config.width), true);
                return Minefield::from_mine_mask(mine_mask);
            }
            Err(err) => {
                log::warn!("Cannot generate minefield for {:?}: {}", config, err);
                return Minefield::from_mine_mask(Array2::default((0, 0)));
            }
            Ok(()) => {}
        }

        let total_cells = config.total_cells();
        let mut mine_mask: Array2<bool> = Array2::default((config.height, config.width));
        let mut mines_placed = 0;
        let mut redraws = 0usize;

        while mines_placed < config.mines {
            let position = self.rng.random_range(0..total_cells);
            let cell = &mut mine_mask[from_position(position, config.width)];
            if *cell {
                redraws += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::trace!(
            "Placed {} mines on {}x{} with {} redraws",
            mines_placed,
            config.width,
            config.height,
            redraws
        );
        Minefield::from_mine_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let mut generator = RandomMinefieldGenerator::from_seed(7);
        for mines in [0, 1, 10, 40, 81] {
            let config = GameConfig::new(9, 9, mines).unwrap();
            let minefield = generator.generate(config);
            assert_eq!(minefield.mine_count(), mines);
            assert_eq!(minefield.game_config(), config);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(16, 16, 40).unwrap();
        let a = RandomMinefieldGenerator::from_seed(42).generate(config);
        let b = RandomMinefieldGenerator::from_seed(42).generate(config);
        assert_eq!(a, b);
    }

    #[test]
    fn stream_continues_between_generations() {
        let config = GameConfig::new(30, 16, 99).unwrap();
        let mut generator = RandomMinefieldGenerator::from_seed(42);
        let first = generator.generate(config);
        let second = generator.generate(config);
        assert_ne!(first, second);
    }

    #[test]
    fn unchecked_config_does_not_panic_or_spin() {
        let mut generator = RandomMinefieldGenerator::from_seed(1);

        let empty = generator.generate(GameConfig::new_unchecked(0, 3, 1));
        assert_eq!(empty.mine_count(), 0);
        assert_eq!(empty.width(), 0);

        let full = generator.generate(GameConfig::new_unchecked(3, 2, 7));
        assert_eq!(full.mine_count(), 6);
        assert_eq!(full.game_config(), GameConfig::new(3, 2, 6).unwrap());
    }

    #[test]
    fn non_square_boards_use_every_column() {
        let config = GameConfig::new(5, 2, 10).unwrap();
        let minefield = RandomMinefieldGenerator::from_seed(1).generate(config);
        for row in 0..2 {
            for col in 0..5 {
                assert!(minefield.contains_mine((row, col)));
            }
        }
    }
}
