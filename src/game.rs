use log::{debug, info};
use rand::Rng;

use crate::food::Food;
use crate::grid::{Cell, Direction, Geometry};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Plain one-cell move, length unchanged.
    Moved,
    /// Head landed on the food; the snake grew and the food moved.
    Ate,
    /// The game is over. Nothing was moved.
    Collided(Collision),
}

/// One play-through: the snake, its food and the score so far.
#[derive(Clone, Debug)]
pub struct Game {
    geometry: Geometry,
    snake: Snake,
    food: Food,
    score: u32,
    collision: Option<Collision>,
}

impl Game {
    pub fn new(geometry: Geometry) -> Self {
        Self::with_parts(geometry, Snake::new(), Food::new())
    }

    pub fn with_parts(geometry: Geometry, snake: Snake, food: Food) -> Self {
        Game {
            geometry,
            snake,
            food,
            score: 0,
            collision: None,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub fn is_over(&self) -> bool {
        self.collision.is_some()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    /// Advances the game by one step.
    pub fn tick(&mut self, rng: &mut impl Rng) -> TickOutcome {
        if let Some(collision) = self.collision {
            return TickOutcome::Collided(collision);
        }

        let new_head = self.snake.commit_direction();

        if let Some(collision) = self.check_collision(new_head) {
            info!(
                "Snake hit {:?} at ({}, {}) with score {}",
                collision, new_head.col, new_head.row, self.score
            );
            self.collision = Some(collision);
            return TickOutcome::Collided(collision);
        }

        self.snake.push_head(new_head);

        if new_head == self.food.position() {
            self.score += 1;
            self.food.relocate(&self.geometry, rng);
            debug!(
                "Ate food, score {}, next food at {:?}",
                self.score,
                self.food.position()
            );
            TickOutcome::Ate
        } else {
            self.snake.pop_tail();
            TickOutcome::Moved
        }
    }

    // Runs against the body before the tail is dropped, so following the
    // tail into its own cell counts as a hit.
    fn check_collision(&self, head: Cell) -> Option<Collision> {
        let wall = self.geometry.is_border(head);
        let body = self.snake.occupies(head);

        if wall {
            Some(Collision::Wall)
        } else if body {
            Some(Collision::SelfCollision)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn geometry() -> Geometry {
        Geometry::new(40, 30)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xC0FFEE)
    }

    fn cells(game: &Game) -> Vec<Cell> {
        game.snake().segments().collect()
    }

    #[test]
    fn test_plain_move() {
        let mut game = Game::new(geometry());

        assert_eq!(game.tick(&mut rng()), TickOutcome::Moved);

        assert_eq!(
            cells(&game),
            vec![Cell::new(8, 5), Cell::new(7, 5), Cell::new(6, 5)]
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.food().position(), Cell::new(10, 10));
    }

    #[test]
    fn test_eating_grows_and_relocates() {
        let mut game = Game::with_parts(geometry(), Snake::new(), Food::at(Cell::new(8, 5)));

        assert_eq!(game.tick(&mut rng()), TickOutcome::Ate);

        assert_eq!(game.score(), 1);
        assert_eq!(
            cells(&game),
            vec![
                Cell::new(8, 5),
                Cell::new(7, 5),
                Cell::new(6, 5),
                Cell::new(5, 5)
            ]
        );
        let food = game.food().position();
        assert!((1..=38).contains(&food.col));
        assert!((1..=28).contains(&food.row));
    }

    #[test]
    fn test_length_only_grows_on_food() {
        let mut game = Game::new(geometry());
        let mut rng = rng();
        let mut previous = game.snake().len();

        game.set_direction(Direction::Down);
        for _ in 0..20 {
            match game.tick(&mut rng) {
                TickOutcome::Moved => assert_eq!(game.snake().len(), previous),
                TickOutcome::Ate => assert_eq!(game.snake().len(), previous + 1),
                TickOutcome::Collided(_) => break,
            }
            previous = game.snake().len();
        }
    }

    #[test]
    fn test_move_shifts_by_one_cell() {
        let mut game = Game::new(geometry());
        game.set_direction(Direction::Down);
        let before = cells(&game);

        game.tick(&mut rng());

        let after = cells(&game);
        assert_eq!(after[0], before[0].shifted(Direction::Down));
        assert_eq!(&after[1..], &before[..before.len() - 1]);
    }

    #[test]
    fn test_turn_applies_on_next_tick() {
        let mut game = Game::new(geometry());
        game.set_direction(Direction::Up);

        assert_eq!(game.snake().direction(), Direction::Right);
        game.tick(&mut rng());
        assert_eq!(game.snake().direction(), Direction::Up);
        assert_eq!(game.snake().head(), Cell::new(7, 4));
    }

    #[test]
    fn test_reversal_keeps_heading() {
        let mut game = Game::new(geometry());
        game.set_direction(Direction::Left);

        game.tick(&mut rng());

        assert_eq!(game.snake().head(), Cell::new(8, 5));
        assert!(!game.is_over());
    }

    #[test]
    fn test_wall_collision_left() {
        let snake = Snake::from_segments(
            [Cell::new(1, 5), Cell::new(2, 5), Cell::new(3, 5)],
            Direction::Left,
        );
        let mut game = Game::with_parts(geometry(), snake.clone(), Food::new());

        assert_eq!(
            game.tick(&mut rng()),
            TickOutcome::Collided(Collision::Wall)
        );
        assert!(game.is_over());
        // Nothing moved.
        assert_eq!(game.snake(), &snake);
    }

    #[test]
    fn test_wall_collision_every_side() {
        let cases = [
            (Cell::new(5, 1), Direction::Up),
            (Cell::new(38, 5), Direction::Right),
            (Cell::new(5, 28), Direction::Down),
            (Cell::new(1, 5), Direction::Left),
        ];

        for (head, dir) in cases {
            let snake = Snake::from_segments([head], dir);
            let mut game = Game::with_parts(geometry(), snake, Food::new());
            assert_eq!(
                game.tick(&mut rng()),
                TickOutcome::Collided(Collision::Wall),
                "moving {:?} from {:?}",
                dir,
                head
            );
        }
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) heading up into its own body at (5,4).
        let snake = Snake::from_segments(
            [
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(4, 4),
            ],
            Direction::Left,
        );
        let mut game = Game::with_parts(geometry(), snake, Food::new());
        game.set_direction(Direction::Up);

        assert_eq!(
            game.tick(&mut rng()),
            TickOutcome::Collided(Collision::SelfCollision)
        );
        assert_eq!(game.snake().len(), 5);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_a_collision() {
        // A 2x2 loop: the head's next cell is the tail, which would be
        // freed this tick. It still counts as a hit.
        let snake = Snake::from_segments(
            [
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
            ],
            Direction::Left,
        );
        let mut game = Game::with_parts(geometry(), snake, Food::new());
        game.set_direction(Direction::Down);

        assert_eq!(
            game.tick(&mut rng()),
            TickOutcome::Collided(Collision::SelfCollision)
        );
    }

    #[test]
    fn test_finished_game_does_not_move() {
        let snake = Snake::from_segments([Cell::new(1, 5)], Direction::Left);
        let mut game = Game::with_parts(geometry(), snake, Food::at(Cell::new(0, 5)));
        let mut rng = rng();

        game.tick(&mut rng);
        game.set_direction(Direction::Down);

        assert_eq!(
            game.tick(&mut rng),
            TickOutcome::Collided(Collision::Wall)
        );
        assert_eq!(game.snake().head(), Cell::new(1, 5));
        assert_eq!(game.score(), 0);
    }
}
