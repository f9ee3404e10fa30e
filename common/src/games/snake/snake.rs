use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Snake body, head first. `body_set` mirrors `body` for occupancy checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Lays out `length` segments extending left of `head` along the x-axis.
    pub fn new(head: Point, length: usize) -> Self {
        let body: VecDeque<Point> = (0..length as i32)
            .map(|i| Point::new(head.x - i, head.y))
            .collect();
        Self::from_segments(body)
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Self {
        let body: VecDeque<Point> = segments.into_iter().collect();
        assert!(!body.is_empty(), "Snake body should never be empty");
        let body_set = body.iter().copied().collect();
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Point> {
        self.body.iter()
    }

    pub fn occupies(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    /// True if `point` hits a segment that stays put this tick: not the head, not the tail.
    pub fn blocks(&self, point: &Point) -> bool {
        if !self.body_set.contains(point) {
            return false;
        }
        let last = self.body.len() - 1;
        self.body
            .iter()
            .enumerate()
            .any(|(i, segment)| i != 0 && i != last && segment == point)
    }

    pub fn push_head(&mut self, point: Point) {
        self.body.push_front(point);
        self.body_set.insert(point);
    }

    pub fn pop_tail(&mut self) -> Option<Point> {
        let tail = self.body.pop_back()?;
        if !self.body.contains(&tail) {
            self.body_set.remove(&tail);
        }
        Some(tail)
    }
}
