//! Bounded position over a page index.
//!
//! The index is stored in descending name order, so reading forward moves
//! the position toward zero and the first page to read sits at the end.

use std::fmt;

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved to the contained position
    Moved(usize),
    /// The cursor was already at the bound it was stepping toward
    AtBound,
}

/// Reading progress as "page `current` of `total`", 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction of the archive read so far, in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {}/{}", self.current, self.total)
    }
}

/// Position within a non-empty page index.
///
/// Invariant: `position < len`. Steps clamp at either end, never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    len: usize,
}

impl Cursor {
    /// Cursor on the first page in reading order, or `None` for an empty index.
    pub fn initial(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|position| Self { position, len })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of pages the cursor ranges over
    pub fn total(&self) -> usize {
        self.len
    }

    /// Move one page on in reading order (toward position 0).
    pub fn step_forward(&mut self) -> Step {
        if self.position == 0 {
            return Step::AtBound;
        }
        self.position -= 1;
        Step::Moved(self.position)
    }

    /// Move one page back in reading order (toward the last position).
    pub fn step_backward(&mut self) -> Step {
        if self.position + 1 >= self.len {
            return Step::AtBound;
        }
        self.position += 1;
        Step::Moved(self.position)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.len - self.position,
            total: self.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_points_at_last_position() {
        let cursor = Cursor::initial(3).unwrap();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.progress(), Progress { current: 1, total: 3 });
        assert!(Cursor::initial(0).is_none());
    }

    #[test]
    fn forward_clamps_at_zero() {
        let mut cursor = Cursor::initial(2).unwrap();
        assert_eq!(cursor.step_forward(), Step::Moved(0));
        assert_eq!(cursor.step_forward(), Step::AtBound);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn backward_clamps_at_last() {
        let mut cursor = Cursor::initial(3).unwrap();
        assert_eq!(cursor.step_backward(), Step::AtBound);
        assert_eq!(cursor.position(), 2);

        cursor.step_forward();
        cursor.step_forward();
        assert_eq!(cursor.step_backward(), Step::Moved(1));
    }

    #[test]
    fn single_page_never_moves() {
        let mut cursor = Cursor::initial(1).unwrap();
        assert_eq!(cursor.step_forward(), Step::AtBound);
        assert_eq!(cursor.step_backward(), Step::AtBound);
        assert_eq!(cursor.progress(), Progress { current: 1, total: 1 });
    }

    #[test]
    fn progress_counts_forward_steps() {
        let n = 7;
        let mut cursor = Cursor::initial(n).unwrap();
        for k in 0..n {
            assert_eq!(cursor.progress(), Progress { current: k + 1, total: n });
            cursor.step_forward();
        }
        assert_eq!(cursor.progress().fraction(), 1.0);
    }

    #[test]
    fn progress_display() {
        let p = Progress { current: 2, total: 3 };
        assert_eq!(p.to_string(), "Page 2/3");
        assert!((p.fraction() - 2.0 / 3.0).abs() < f64::EPSILON);
    }
}
