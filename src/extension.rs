use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

pub trait Splittable {
    fn split_equal<const N: usize>(area: Rect, direction: Direction) -> [Rect; N];

    /// Centers a column at most `width` wide inside `area`.
    fn center_column(area: Rect, width: u16) -> Rect;
}

impl Splittable for Layout {
    fn split_equal<const N: usize>(area: Rect, direction: Direction) -> [Rect; N] {
        let n = N as u32;
        match direction {
            Direction::Horizontal => {
                Self::horizontal(Constraint::from_ratios([(1, n); N])).areas(area)
            }
            Direction::Vertical => Self::vertical(Constraint::from_ratios([(1, n); N])).areas(area),
        }
    }

    fn center_column(area: Rect, width: u16) -> Rect {
        let [column] = Self::horizontal([Constraint::Max(width)])
            .flex(Flex::Center)
            .areas(area);
        column
    }
}

/// Tab order over a fixed list of focus targets, wrapping at both ends.
pub trait FocusCycle<T> {
    fn after(&self, current: T) -> T;
    fn before(&self, current: T) -> T;
}

impl<T: Copy + PartialEq> FocusCycle<T> for [T] {
    fn after(&self, current: T) -> T {
        match self.iter().position(|f| *f == current) {
            Some(i) => self[(i + 1) % self.len()],
            None => self.first().copied().unwrap_or(current),
        }
    }

    fn before(&self, current: T) -> T {
        match self.iter().position(|f| *f == current) {
            Some(i) => self[(i + self.len() - 1) % self.len()],
            None => self.first().copied().unwrap_or(current),
        }
    }
}
