use chrono::NaiveDate;
use ratatui::layout::{Position, Rect};

/// Something a mouse click can activate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Day(NaiveDate),
    PrevYear,
    NextYear,
    ThisYear,
    Back,
    Toggle(i64),
    Text(i64),
    Delete(i64),
    NewTask,
}

/// Screen regions recorded during the last render, in draw order.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, target: Target) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, target));
        }
    }

    /// Topmost target under the given cell, if any.
    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, target)| *target)
    }

    #[cfg(test)]
    pub fn rect_of(&self, target: Target) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, t)| *t == target)
            .map(|(rect, _)| *rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_at_inside_rect() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(2, 3, 4, 1), Target::Back);
        assert_eq!(hits.target_at(2, 3), Some(Target::Back));
        assert_eq!(hits.target_at(5, 3), Some(Target::Back));
    }

    #[test]
    fn test_target_at_outside_rect() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(2, 3, 4, 1), Target::Back);
        assert_eq!(hits.target_at(6, 3), None);
        assert_eq!(hits.target_at(2, 4), None);
    }

    #[test]
    fn test_later_regions_win() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 1), Target::NewTask);
        hits.push(Rect::new(0, 0, 3, 1), Target::Toggle(1));
        assert_eq!(hits.target_at(1, 0), Some(Target::Toggle(1)));
        assert_eq!(hits.target_at(5, 0), Some(Target::NewTask));
    }

    #[test]
    fn test_empty_rects_are_skipped() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 0, 1), Target::Back);
        assert_eq!(hits.target_at(0, 0), None);
        assert!(hits.regions.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 1, 1), Target::PrevYear);
        hits.clear();
        assert_eq!(hits.target_at(0, 0), None);
    }
}
