use glam::IVec2;

/// One of the four cardinal directions an actor can travel in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Left,
    Right,
}

impl Direction {
    /// The order in which candidate moves are enumerated; ties resolve to the earliest entry.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Screen angle of the direction in degrees, clockwise from +X (y grows downward).
    pub const fn angle_degrees(self) -> i16 {
        match self {
            Direction::Right => 0,
            Direction::Down => 90,
            Direction::Left => 180,
            Direction::Up => 270,
        }
    }

    /// The direction of a one-tile step, if `delta` is one.
    pub fn from_step(delta: IVec2) -> Option<Direction> {
        Self::DIRECTIONS.into_iter().find(|d| d.as_ivec2() == delta)
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}
