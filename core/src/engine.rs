use std::collections::BTreeSet;

use crate::*;

/// Represents a game across any number of generations
///
/// Owns the current [`Board`] and the [`MinefieldGenerator`] that produced it, so every regeneration keeps drawing
/// from the same source.
#[derive(Clone, Debug)]
pub struct Game<G = RandomMinefieldGenerator> {
    config: GameConfig,
    board: Board,
    generator: G,
    generation: u64,
}

impl Game {
    /// New game seeded once from OS entropy.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new(width, height, mines)?;
        Self::with_generator(config, RandomMinefieldGenerator::from_os_rng())
    }

    /// New game with a reproducible mine stream.
    pub fn from_seed(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new(width, height, mines)?;
        Self::with_generator(config, RandomMinefieldGenerator::from_seed(seed))
    }
}

impl<G: MinefieldGenerator> Game<G> {
    pub fn with_generator(config: GameConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let board = Self::generate_board(&mut generator, config)?;
        log::debug!(
            "New game {}x{} with {} mines",
            config.width,
            config.height,
            config.mines
        );
        Ok(Self {
            config,
            board,
            generator,
            generation: 1,
        })
    }

    /// Start a new generation, replacing grid, mines and flags.
    ///
    /// Nothing changes when the parameters are rejected.
    pub fn initialise(&mut self, width: Coord, height: Coord, mines: CellCount) -> Result<()> {
        let config = GameConfig::new(width, height, mines)?;
        self.board = Self::generate_board(&mut self.generator, config)?;
        self.config = config;
        self.generation += 1;
        log::debug!(
            "Initialised generation {} as {}x{} with {} mines",
            self.generation,
            width,
            height,
            mines
        );
        Ok(())
    }

    /// Start a new generation with the current parameters.
    pub fn restart(&mut self) -> Result<()> {
        let GameConfig {
            width,
            height,
            mines,
        } = self.config;
        self.initialise(width, height, mines)
    }

    /// Reveal from `(row, col)`, returning every tile this call revealed.
    ///
    /// The first successful reveal of a generation never lands on a mine while the board has a safe tile: the layout
    /// is regenerated and the reveal retried until it does not. If a regeneration fails the board from before the
    /// call is put back.
    pub fn reveal(&mut self, row: Coord, col: Coord) -> Result<BTreeSet<Coord2>> {
        let coords = self.board.validate_coords((row, col))?;
        // board to restore if a regeneration fails
        let mut previous = None;
        loop {
            match self.board.flood_reveal(coords)? {
                FloodOutcome::Revealed(revealed) => return Ok(revealed),
                FloodOutcome::FirstMine => {
                    log::debug!("Regenerating board to keep first reveal at {:?} safe", coords);
                    previous.get_or_insert_with(|| (self.board.clone(), self.generation));
                    if let Err(err) = self.restart() {
                        if let Some((board, generation)) = previous {
                            self.board = board;
                            self.generation = generation;
                        }
                        return Err(err);
                    }
                }
            }
        }
    }

    pub fn reveal_at(&mut self, position: CellCount) -> Result<BTreeSet<Coord2>> {
        let (row, col) = self.board.coords_of(position)?;
        self.reveal(row, col)
    }

    /// Toggle the flag at `(row, col)`, revealed tiles are left untouched.
    pub fn flag(&mut self, row: Coord, col: Coord) -> Result<MarkOutcome> {
        self.board.toggle_flag((row, col))
    }

    pub fn flag_at(&mut self, position: CellCount) -> Result<MarkOutcome> {
        let coords = self.board.coords_of(position)?;
        self.board.toggle_flag(coords)
    }

    fn generate_board(generator: &mut G, config: GameConfig) -> Result<Board> {
        let minefield = generator.generate(config);
        if minefield.game_config() != config {
            log::warn!(
                "Generator returned {:?}, requested {:?}",
                minefield.game_config(),
                config
            );
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Board::from_minefield(&minefield))
    }
}

impl<G> Game<G> {
    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Number of generations so far, first-click regenerations included.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> Coord {
        self.board.width()
    }

    pub fn height(&self) -> Coord {
        self.board.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.board.flag_count()
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    pub fn tile_at(&self, row: Coord, col: Coord) -> Result<TileView> {
        self.board.tile_at((row, col))
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coord2, TileView)> + '_ {
        self.board.tiles()
    }

    pub fn is_mine_revealed(&self) -> bool {
        self.board.is_mine_revealed()
    }

    pub fn is_all_except_mines_revealed(&self) -> bool {
        self.board.is_all_except_mines_revealed()
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Hands out prepared layouts in order, repeating the last one.
    #[derive(Debug)]
    struct Scripted {
        layouts: VecDeque<Vec<Coord2>>,
        calls: usize,
    }

    impl Scripted {
        fn new(layouts: &[&[Coord2]]) -> Self {
            Self {
                layouts: layouts.iter().map(|layout| layout.to_vec()).collect(),
                calls: 0,
            }
        }
    }

    impl MinefieldGenerator for Scripted {
        fn generate(&mut self, config: GameConfig) -> Minefield {
            self.calls += 1;
            let layout = if self.layouts.len() > 1 {
                self.layouts.pop_front().unwrap()
            } else {
                self.layouts[0].clone()
            };
            Minefield::from_mine_coords(config.width, config.height, &layout).unwrap()
        }
    }

    fn scripted(width: Coord, height: Coord, layouts: &[&[Coord2]]) -> Game<Scripted> {
        let mines = layouts[0].len();
        let config = GameConfig::new(width, height, mines).unwrap();
        Game::with_generator(config, Scripted::new(layouts)).unwrap()
    }

    #[test]
    fn first_reveal_on_mine_regenerates() {
        let mut game = scripted(3, 3, &[&[(0, 0)], &[(2, 2)]]);
        game.flag(1, 1).unwrap();

        let revealed = game.reveal(0, 0).unwrap();

        assert_eq!(game.generation(), 2);
        assert_eq!(game.generator().calls, 2);
        assert!(!game.tile_at(0, 0).unwrap().mined);
        assert!(game.tile_at(2, 2).unwrap().mined);
        assert_eq!(revealed.len(), 8);
        // flags belong to the discarded generation
        assert_eq!(game.flag_count(), 0);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn regeneration_repeats_until_safe() {
        let mut game = scripted(2, 2, &[&[(0, 0)], &[(0, 0)], &[(0, 0)], &[(1, 1)]]);

        let revealed = game.reveal(0, 0).unwrap();

        assert_eq!(revealed, BTreeSet::from([(0, 0)]));
        assert_eq!(game.generation(), 4);
        assert!(!game.is_mine_revealed());
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn failed_regeneration_restores_original_board() {
        // the last layout has two mines for a one-mine config
        let mut game = scripted(2, 2, &[&[(0, 0)], &[(0, 0)], &[(0, 0), (1, 1)]]);
        game.flag(1, 1).unwrap();
        let before = game.board().clone();

        assert_eq!(game.reveal(0, 0), Err(GameError::InvalidBoardShape));

        assert_eq!(game.generator().calls, 3);
        assert_eq!(game.generation(), 1);
        assert_eq!(game.board(), &before);
        assert_eq!(game.flag_count(), 1);
        assert_eq!(game.status(), GameStatus::Ready);
    }

    #[test]
    fn later_reveal_on_mine_loses() {
        let mut game = scripted(2, 2, &[&[(0, 0)], &[(1, 1)]]);
        game.reveal(1, 1).unwrap();

        let revealed = game.reveal(0, 0).unwrap();

        assert_eq!(revealed, BTreeSet::from([(0, 0)]));
        assert_eq!(game.generation(), 1);
        assert!(game.is_mine_revealed());
        assert!(!game.is_all_except_mines_revealed());
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn full_board_first_reveal_does_not_loop() {
        let mut game = scripted(2, 1, &[&[(0, 0), (0, 1)]]);

        let revealed = game.reveal(0, 0).unwrap();

        assert_eq!(revealed, BTreeSet::from([(0, 0)]));
        assert_eq!(game.generation(), 1);
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn flagging_revealed_tile_is_noop() {
        let mut game = scripted(3, 3, &[&[(2, 2)]]);
        game.reveal(1, 1).unwrap();
        let before = game.board().clone();

        assert_eq!(game.flag(1, 1).unwrap(), MarkOutcome::NoChange);

        assert_eq!(game.board(), &before);
        assert_eq!(game.flag_count(), 0);
    }

    #[test]
    fn linear_addressing_matches_row_col() {
        let mut game = scripted(4, 2, &[&[(0, 0)]]);

        assert_eq!(game.flag_at(7).unwrap(), MarkOutcome::Changed);
        assert!(game.tile_at(1, 3).unwrap().flagged);
        assert_eq!(game.reveal_at(8), Err(GameError::OutOfRange));
        assert_eq!(game.flag_at(8), Err(GameError::OutOfRange));

        let revealed = game.reveal_at(3).unwrap();
        assert!(revealed.contains(&(0, 3)));
        assert!(!revealed.contains(&(1, 3)));
    }

    #[test]
    fn invalid_initialise_keeps_state() {
        let mut game = scripted(3, 3, &[&[(1, 1)]]);
        game.reveal(0, 0).unwrap();
        let before = game.board().clone();

        assert_eq!(game.initialise(0, 3, 0), Err(GameError::InvalidDimensions));
        assert_eq!(game.initialise(3, 0, 0), Err(GameError::InvalidDimensions));
        assert_eq!(game.initialise(3, 3, 10), Err(GameError::MineCountOutOfRange));

        assert_eq!(game.board(), &before);
        assert_eq!(game.generation(), 1);
        assert_eq!(game.config(), GameConfig::new(3, 3, 1).unwrap());
    }

    #[test]
    fn mismatched_generator_is_rejected() {
        let mut game = scripted(3, 3, &[&[(1, 1)]]);
        let before = game.board().clone();

        assert_eq!(game.initialise(3, 3, 2), Err(GameError::InvalidBoardShape));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn initialise_resets_generation_state() {
        let mut game = Game::from_seed(9, 9, 10, 3).unwrap();
        game.reveal(4, 4).unwrap();
        game.flag(0, 0).unwrap();

        game.initialise(16, 16, 40).unwrap();

        assert_eq!(game.width(), 16);
        assert_eq!(game.height(), 16);
        assert_eq!(game.mine_count(), 40);
        assert_eq!(game.flag_count(), 0);
        assert_eq!(game.status(), GameStatus::Ready);
        assert!(game.tiles().all(|(_, tile)| !tile.revealed && !tile.flagged));
        assert!(game.board().is_first_reveal());
    }

    #[test]
    fn single_cell_board_is_won_after_reveal() {
        let mut game = Game::new(1, 1, 0).unwrap();

        assert_eq!(game.reveal(0, 0).unwrap(), BTreeSet::from([(0, 0)]));

        assert!(game.is_all_except_mines_revealed());
        assert!(!game.is_mine_revealed());
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn out_of_range_reveal_leaves_board_untouched() {
        let mut game = Game::from_seed(9, 9, 10, 11).unwrap();
        let before = game.board().clone();

        assert_eq!(game.reveal(100, 100), Err(GameError::OutOfRange));
        assert_eq!(game.flag(9, 0), Err(GameError::OutOfRange));

        assert_eq!(game.board(), &before);
        assert_eq!(game.generation(), 1);
    }
}
