//! # Dungeon Generation
//!
//! Room placement by rejection sampling.
//!
//! The [`PlacementEngine`] repeatedly samples a random room, throws it away if
//! it overlaps a room already placed, and otherwise carves it into the grid
//! and joins it to the previously accepted room with a corridor. It stops
//! once it has the requested number of rooms or has used up its attempts.

use crate::config::BORDER_MARGIN;
use crate::generation::corridor::carve_tunnel;
use crate::utils;
use crate::{DelveError, DelveResult, GenerationConfig, Generator, Grid, Room};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;

/// Counters collected while placing rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Sampling attempts made
    pub attempts: u32,
    /// Candidates kept
    pub accepted: u32,
    /// Candidates discarded because they overlapped an earlier room
    pub rejected: u32,
    /// Corridors carved between consecutive rooms
    pub corridors: u32,
}

/// Outcome of a single [`PlacementEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    /// The candidate was carved into the grid and appended to the room list
    Accepted(Room),
    /// The candidate overlapped an earlier room and was discarded
    Rejected(Room),
    /// The room target or the attempt cap has been reached
    Done,
}

/// A generated dungeon: the carved grid plus the rooms in placement order.
#[derive(Debug, Clone)]
pub struct Dungeon {
    /// The carved map
    pub grid: Grid,
    /// Accepted rooms; each is joined by a corridor to the one before it
    pub rooms: Vec<Room>,
    /// Counters from the placement run
    pub stats: GenerationStats,
}

impl Dungeon {
    /// Discards the rooms and keeps the map.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Renders the map as `#`/`.` text.
    pub fn render(&self) -> String {
        crate::rendering::render(&self.grid)
    }
}

/// Carves a room into the grid.
///
/// The whole rectangle is checked against the grid before anything is
/// written, so a room that does not fit leaves the grid untouched.
pub fn carve_room(grid: &mut Grid, room: &Room) -> DelveResult<()> {
    if room.top_left.x < 0
        || room.top_left.y < 0
        || room.right() > grid.width() as i32
        || room.bottom() > grid.height() as i32
    {
        return Err(DelveError::OutOfBounds {
            x: room.top_left.x,
            y: room.top_left.y,
        });
    }

    for pos in room.positions() {
        grid.carve(pos)?;
    }

    Ok(())
}

/// Step-wise room placement over a grid it owns.
///
/// # Examples
///
/// ```
/// use delve::{GenerationConfig, PlacementEngine, PlacementState};
/// use rand::SeedableRng;
///
/// let config = GenerationConfig::for_testing(3);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let mut engine = PlacementEngine::new(&config).unwrap();
///
/// // The first candidate always fits: there is nothing to overlap yet.
/// assert!(matches!(engine.step(&mut rng).unwrap(), PlacementState::Accepted(_)));
///
/// let dungeon = engine.run(&mut rng).unwrap();
/// assert!(!dungeon.rooms.is_empty());
/// ```
#[derive(Debug)]
pub struct PlacementEngine<'a> {
    config: &'a GenerationConfig,
    grid: Grid,
    rooms: Vec<Room>,
    stats: GenerationStats,
}

impl<'a> PlacementEngine<'a> {
    /// Validates the configuration and starts with an all-wall grid.
    pub fn new(config: &'a GenerationConfig) -> DelveResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            grid: Grid::new(config.width, config.height),
            rooms: Vec::new(),
            stats: GenerationStats::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// True once the room target is met or every attempt has been used.
    pub fn is_done(&self) -> bool {
        self.rooms.len() >= self.config.max_rooms as usize
            || self.stats.attempts >= self.config.max_tries
    }

    /// Makes one sampling attempt.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DelveResult<PlacementState> {
        if self.is_done() {
            return Ok(PlacementState::Done);
        }

        let candidate = self.sample_room(rng);
        self.stats.attempts += 1;

        if self.rooms.iter().any(|room| room.intersects(&candidate)) {
            self.stats.rejected += 1;
            trace!(
                "Attempt {}: rejected {}x{} room at {}",
                self.stats.attempts,
                candidate.width,
                candidate.height,
                candidate.top_left
            );
            return Ok(PlacementState::Rejected(candidate));
        }

        carve_room(&mut self.grid, &candidate)?;

        if let Some(previous) = self.rooms.last() {
            let shape = carve_tunnel(&mut self.grid, rng, previous.center(), candidate.center())?;
            self.stats.corridors += 1;
            trace!(
                "Corridor {:?} from room {} to room {}",
                shape,
                previous.id,
                candidate.id
            );
        }

        self.rooms.push(candidate);
        self.stats.accepted += 1;
        trace!(
            "Attempt {}: accepted room {} ({}x{} at {})",
            self.stats.attempts,
            candidate.id,
            candidate.width,
            candidate.height,
            candidate.top_left
        );

        Ok(PlacementState::Accepted(candidate))
    }

    /// Steps until done and returns the finished dungeon.
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> DelveResult<Dungeon> {
        while self.step(rng)? != PlacementState::Done {}

        debug!(
            "Placed {} of {} rooms in {} attempts ({} rejected) on a {}x{} grid",
            self.stats.accepted,
            self.config.max_rooms,
            self.stats.attempts,
            self.stats.rejected,
            self.config.width,
            self.config.height
        );

        Ok(self.finish())
    }

    /// Stops placing and hands over the grid and rooms as they stand.
    pub fn finish(self) -> Dungeon {
        Dungeon {
            grid: self.grid,
            rooms: self.rooms,
            stats: self.stats,
        }
    }

    /// Samples a candidate whose sides lie in `[room_min, room_max]` and whose
    /// origin keeps a wall margin to every grid edge.
    fn sample_room<R: Rng + ?Sized>(&self, rng: &mut R) -> Room {
        let width = rng.gen_range(self.config.room_min..=self.config.room_max);
        let height = rng.gen_range(self.config.room_min..=self.config.room_max);

        // Non-empty because the config was validated.
        let x_end = self.config.width as i32 - width as i32 - BORDER_MARGIN;
        let y_end = self.config.height as i32 - height as i32 - BORDER_MARGIN;
        let x = rng.gen_range(BORDER_MARGIN..x_end);
        let y = rng.gen_range(BORDER_MARGIN..y_end);

        Room::new(self.rooms.len() as u32, (x, y).into(), width, height)
    }
}

/// Generator that places rooms by rejection sampling and links each to its
/// predecessor with an L-shaped corridor.
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether `validate` also checks that consecutive rooms are joined
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GenerationConfig, Generator, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let config = GenerationConfig::for_testing(12345);
    /// let mut rng = delve::utils::create_rng(&config);
    ///
    /// let dungeon = generator.generate(&config, &mut rng).unwrap();
    /// assert!(generator.validate(&dungeon, &config).is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    fn validate_rooms(&self, dungeon: &Dungeon, config: &GenerationConfig) -> DelveResult<()> {
        for (i, room) in dungeon.rooms.iter().enumerate() {
            let sides = config.room_min..=config.room_max;
            if !sides.contains(&room.width) || !sides.contains(&room.height) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} is {}x{}, outside {}..={}",
                    room.id, room.width, room.height, config.room_min, config.room_max
                )));
            }

            if !room.fits_within(config.width, config.height) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} at {} does not keep the wall margin",
                    room.id, room.top_left
                )));
            }

            if let Some(other) = dungeon.rooms[..i].iter().find(|other| other.intersects(room)) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} overlaps room {}",
                    room.id, other.id
                )));
            }
        }

        Ok(())
    }

    /// Checks that a floor path joins the centers of every consecutive pair.
    fn validate_connectivity(&self, dungeon: &Dungeon) -> DelveResult<()> {
        if !self.ensure_connectivity {
            return Ok(());
        }

        for pair in dungeon.rooms.windows(2) {
            if !utils::is_connected(&dungeon.grid, pair[0].center(), pair[1].center()) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} is not connected to room {}",
                    pair[1].id, pair[0].id
                )));
            }
        }

        Ok(())
    }
}

impl Generator<Dungeon> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<Dungeon> {
        PlacementEngine::new(config)?.run(rng)
    }

    fn validate(&self, dungeon: &Dungeon, config: &GenerationConfig) -> DelveResult<()> {
        if dungeon.grid.width() != config.width || dungeon.grid.height() != config.height {
            return Err(DelveError::GenerationFailed(format!(
                "Grid is {}x{}, expected {}x{}",
                dungeon.grid.width(),
                dungeon.grid.height(),
                config.width,
                config.height
            )));
        }

        if !dungeon.grid.border_is_solid() {
            return Err(DelveError::GenerationFailed(
                "Grid border has been carved".to_string(),
            ));
        }

        self.validate_rooms(dungeon, config)?;
        self.validate_connectivity(dungeon)
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Position};
    use rand::SeedableRng;

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            width: 20,
            height: 10,
            max_rooms: 2,
            room_min: 3,
            room_max: 4,
            max_tries: 1000,
            seed: None,
        }
    }

    #[test]
    fn test_room_corridor_generator_creation() {
        let generator = RoomCorridorGenerator::new();
        assert!(generator.ensure_connectivity);
        assert_eq!(generator.generator_type(), "RoomCorridorGenerator");
    }

    #[test]
    fn test_carve_room_is_half_open() {
        let mut grid = Grid::new(10, 10);
        let room = Room::new(0, Position::new(2, 3), 4, 2);

        carve_room(&mut grid, &room).unwrap();

        assert_eq!(grid.count(Cell::Floor), 8);
        assert_eq!(grid.get(Position::new(2, 3)), Some(Cell::Floor));
        assert_eq!(grid.get(Position::new(5, 4)), Some(Cell::Floor));
        assert_eq!(grid.get(Position::new(6, 3)), Some(Cell::Wall));
        assert_eq!(grid.get(Position::new(2, 5)), Some(Cell::Wall));
        assert_eq!(grid.get(Position::new(1, 3)), Some(Cell::Wall));
    }

    #[test]
    fn test_carve_room_rejects_rooms_outside_grid() {
        let mut grid = Grid::new(10, 10);
        let spills_over = Room::new(0, Position::new(7, 7), 4, 2);

        assert!(matches!(
            carve_room(&mut grid, &spills_over),
            Err(DelveError::OutOfBounds { .. })
        ));
        assert_eq!(grid.count(Cell::Floor), 0);

        let negative = Room::new(0, Position::new(-1, 2), 3, 3);
        assert!(carve_room(&mut grid, &negative).is_err());
        assert_eq!(grid.count(Cell::Floor), 0);
    }

    #[test]
    fn test_engine_rejects_invalid_configuration() {
        let config = GenerationConfig {
            room_max: 8,
            ..small_config()
        };
        assert!(matches!(
            PlacementEngine::new(&config),
            Err(DelveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_tries_leaves_grid_untouched() {
        let config = GenerationConfig {
            max_tries: 0,
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = PlacementEngine::new(&config).unwrap();

        assert!(engine.is_done());
        assert_eq!(engine.step(&mut rng).unwrap(), PlacementState::Done);

        let dungeon = engine.run(&mut rng).unwrap();
        assert!(dungeon.rooms.is_empty());
        assert_eq!(dungeon.stats, GenerationStats::default());
        assert_eq!(dungeon.grid, Grid::new(20, 10));
    }

    #[test]
    fn test_zero_max_rooms_makes_no_attempts() {
        let config = GenerationConfig {
            max_rooms: 0,
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let dungeon = PlacementEngine::new(&config).unwrap().run(&mut rng).unwrap();

        assert_eq!(dungeon.stats.attempts, 0);
        assert_eq!(dungeon.grid.count(Cell::Floor), 0);
    }

    #[test]
    fn test_first_room_has_no_corridor() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(77);
        let mut engine = PlacementEngine::new(&config).unwrap();

        let room = match engine.step(&mut rng).unwrap() {
            PlacementState::Accepted(room) => room,
            other => panic!("first attempt should be accepted, got {:?}", other),
        };

        assert_eq!(room.id, 0);
        assert_eq!(engine.stats().corridors, 0);
        assert_eq!(engine.grid().count(Cell::Floor), room.area() as usize);
        assert_eq!(engine.grid().floor_positions(), room.positions());
    }

    #[test]
    fn test_stats_account_for_every_attempt() {
        let config = GenerationConfig::classic();
        let mut rng = StdRng::seed_from_u64(2024);
        let dungeon = PlacementEngine::new(&config).unwrap().run(&mut rng).unwrap();
        let stats = dungeon.stats;

        assert_eq!(stats.attempts, stats.accepted + stats.rejected);
        assert_eq!(stats.accepted as usize, dungeon.rooms.len());
        assert_eq!(stats.corridors, stats.accepted.saturating_sub(1));
        assert!(stats.attempts <= config.max_tries);
        assert!(dungeon.rooms.len() <= config.max_rooms as usize);
    }

    #[test]
    fn test_room_ids_follow_placement_order() {
        let config = GenerationConfig::classic();
        let mut rng = StdRng::seed_from_u64(8);
        let dungeon = PlacementEngine::new(&config).unwrap().run(&mut rng).unwrap();

        for (i, room) in dungeon.rooms.iter().enumerate() {
            assert_eq!(room.id as usize, i);
        }
    }

    #[test]
    fn test_rejected_candidates_do_not_touch_grid() {
        let config = GenerationConfig::classic();
        let mut rng = StdRng::seed_from_u64(31);
        let mut engine = PlacementEngine::new(&config).unwrap();

        loop {
            let before = engine.grid().clone();
            match engine.step(&mut rng).unwrap() {
                PlacementState::Rejected(room) => {
                    assert_eq!(engine.grid(), &before);
                    assert!(engine.rooms().iter().any(|r| r.intersects(&room)));
                }
                PlacementState::Accepted(_) => {}
                PlacementState::Done => break,
            }
        }
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let config = GenerationConfig::classic();

        let mut rng_a = StdRng::seed_from_u64(555);
        let mut rng_b = StdRng::seed_from_u64(555);
        let a = PlacementEngine::new(&config).unwrap().run(&mut rng_a).unwrap();
        let b = PlacementEngine::new(&config).unwrap().run(&mut rng_b).unwrap();

        assert_eq!(a.grid, b.grid);
        assert_eq!(a.rooms, b.rooms);
    }

    #[test]
    fn test_generation_validates() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(12345);
        let mut rng = utils::create_rng(&config);

        let dungeon = generator.generate(&config, &mut rng).unwrap();
        assert!(generator.validate(&dungeon, &config).is_ok());
        assert!(!dungeon.rooms.is_empty());
        assert!(dungeon.grid.count(Cell::Floor) > 0);
    }

    #[test]
    fn test_validation_catches_broken_dungeons() {
        let generator = RoomCorridorGenerator::new();
        let config = small_config();

        let mut grid = Grid::new(20, 10);
        let a = Room::new(0, Position::new(1, 1), 3, 3);
        let b = Room::new(1, Position::new(10, 5), 3, 3);
        carve_room(&mut grid, &a).unwrap();
        carve_room(&mut grid, &b).unwrap();

        // Two rooms with no corridor between them
        let disconnected = Dungeon {
            grid: grid.clone(),
            rooms: vec![a, b],
            stats: GenerationStats::default(),
        };
        assert!(generator.validate(&disconnected, &config).is_err());

        let lenient = RoomCorridorGenerator {
            ensure_connectivity: false,
        };
        assert!(lenient.validate(&disconnected, &config).is_ok());

        let overlapping = Dungeon {
            grid: grid.clone(),
            rooms: vec![a, Room::new(1, Position::new(2, 2), 3, 3)],
            stats: GenerationStats::default(),
        };
        assert!(lenient.validate(&overlapping, &config).is_err());

        let mut carved_border = grid;
        carved_border.carve(Position::new(0, 4)).unwrap();
        let broken_border = Dungeon {
            grid: carved_border,
            rooms: vec![a],
            stats: GenerationStats::default(),
        };
        assert!(lenient.validate(&broken_border, &config).is_err());
    }
}
