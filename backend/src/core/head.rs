//! Disk head model
//!
//! The head occupies exactly one track at a time and moves by one track per
//! tick. Tracks are plain signed integers; nothing here bounds them.

use serde::{Deserialize, Serialize};

/// Direction of head travel along the track axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward lower track numbers
    Down,
    /// Not moving (head sits on the active request's track)
    Idle,
    /// Toward higher track numbers
    Up,
}

impl Direction {
    /// Signed unit step for this direction (-1, 0 or +1)
    pub fn step(self) -> i64 {
        match self {
            Direction::Down => -1,
            Direction::Idle => 0,
            Direction::Up => 1,
        }
    }

    /// Opposite direction. `Idle` stays `Idle`.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
            Direction::Up => Direction::Down,
        }
    }

    /// Direction that moves `from` toward `to`
    ///
    /// # Example
    /// ```
    /// use iosched_core_rs::Direction;
    ///
    /// assert_eq!(Direction::toward(10, 40), Direction::Up);
    /// assert_eq!(Direction::toward(40, 10), Direction::Down);
    /// assert_eq!(Direction::toward(7, 7), Direction::Idle);
    /// ```
    pub fn toward(from: i64, to: i64) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }

    /// Whether `track` lies on the path swept from `head` in this direction.
    /// The head's own track counts as ahead in both directions.
    pub fn is_ahead(self, head: i64, track: i64) -> bool {
        match self {
            Direction::Up => track >= head,
            Direction::Down => track <= head,
            Direction::Idle => track == head,
        }
    }
}

/// Seek distance between two tracks
pub fn seek_distance(from: i64, to: i64) -> u64 {
    from.abs_diff(to)
}

/// Position, direction and cumulative travel of the disk head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskHead {
    position: i64,
    direction: Direction,
    /// Number of single-track moves performed so far
    total_movement: u64,
}

impl DiskHead {
    /// Place the head on `track`, initially heading up
    pub fn new(track: i64) -> Self {
        Self {
            position: track,
            direction: Direction::Up,
            total_movement: 0,
        }
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn total_movement(&self) -> u64 {
        self.total_movement
    }

    /// Point the head toward `target` and return the resulting direction
    pub fn aim_at(&mut self, target: i64) -> Direction {
        self.direction = Direction::toward(self.position, target);
        self.direction
    }

    /// Move one track in the current direction.
    ///
    /// Returns `false` (and does not count movement) when the head is idle.
    pub fn step(&mut self) -> bool {
        if self.direction == Direction::Idle {
            return false;
        }
        self.position += self.direction.step();
        self.total_movement += 1;
        true
    }
}

impl Default for DiskHead {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_reversal() {
        assert_eq!(Direction::Up.reversed(), Direction::Down);
        assert_eq!(Direction::Down.reversed(), Direction::Up);
        assert_eq!(Direction::Idle.reversed(), Direction::Idle);
    }

    #[test]
    fn test_is_ahead_includes_head_track() {
        assert!(Direction::Up.is_ahead(10, 10));
        assert!(Direction::Down.is_ahead(10, 10));
        assert!(Direction::Up.is_ahead(10, 11));
        assert!(!Direction::Up.is_ahead(10, 9));
        assert!(Direction::Down.is_ahead(10, -3));
    }

    #[test]
    fn test_seek_distance_symmetric() {
        assert_eq!(seek_distance(3, 10), 7);
        assert_eq!(seek_distance(10, 3), 7);
        assert_eq!(seek_distance(-5, 5), 10);
    }

    #[test]
    fn test_head_steps_toward_target() {
        let mut head = DiskHead::new(5);
        assert_eq!(head.aim_at(3), Direction::Down);
        assert!(head.step());
        assert!(head.step());
        assert_eq!(head.position(), 3);
        assert_eq!(head.total_movement(), 2);

        assert_eq!(head.aim_at(3), Direction::Idle);
        assert!(!head.step());
        assert_eq!(head.position(), 3);
        assert_eq!(head.total_movement(), 2);
    }
}
