use crate::math::Vector3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    pub fn to_vector(&self) -> Vector3 {
        match self {
            Direction::Up => Vector3::new(0.0, 0.0, -1.0),
            Direction::Down => Vector3::new(0.0, 0.0, 1.0),
            Direction::Left => Vector3::new(-1.0, 0.0, 0.0),
            Direction::Right => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    pub fn nearest(v: &Vector3) -> Option<Direction> {
        if v.x == 0.0 && v.z == 0.0 {
            return None;
        }
        let direction = if v.x.abs() > v.z.abs() {
            if v.x > 0.0 { Direction::Right } else { Direction::Left }
        } else if v.z > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }

    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}
