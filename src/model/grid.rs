use serde::{Deserialize, Serialize};

/// Width and height of the map, in cells.
pub const GRID_SIZE: i32 = 20;
pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Row-major cell index. Only meaningful for in-bounds positions.
    pub fn index(self) -> usize {
        (self.y * GRID_SIZE + self.x) as usize
    }

    pub fn from_index(index: usize) -> Self {
        let i = index as i32;
        Self::new(i % GRID_SIZE, i / GRID_SIZE)
    }

    /// One step in `direction`; an axis that would leave the map stays put.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(
            (self.x + dx).clamp(0, GRID_SIZE - 1),
            (self.y + dy).clamp(0, GRID_SIZE - 1),
        )
    }

    /// One step in `direction`, or `None` if that lands off the map.
    pub fn checked_step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let next = Self::new(self.x + dx, self.y + dy);
        next.in_bounds().then_some(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellTag {
    Library,
    ActivityRoom,
    Guard,
    Treasure,
}

impl CellTag {
    pub fn short_name(&self) -> &'static str {
        match self {
            CellTag::Library => "library",
            CellTag::ActivityRoom => "activity-room",
            CellTag::Guard => "guard",
            CellTag::Treasure => "treasure",
        }
    }
}

/// The map. Each cell carries zero or more tags; no tags means empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Vec<CellTag>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cells: vec![Vec::new(); CELL_COUNT],
        }
    }
}

impl Grid {
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    pub fn tag(&mut self, pos: Position, tag: CellTag) {
        if let Some(cell) = self.cell_mut(pos) {
            if !cell.contains(&tag) {
                cell.push(tag);
            }
        }
    }

    pub fn untag(&mut self, pos: Position, tag: CellTag) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.retain(|t| *t != tag);
        }
    }

    /// Removes `tag` from every cell.
    pub fn untag_all(&mut self, tag: CellTag) {
        for cell in &mut self.cells {
            cell.retain(|t| *t != tag);
        }
    }

    pub fn has_tag(&self, pos: Position, tag: CellTag) -> bool {
        self.tags_at(pos).contains(&tag)
    }

    pub fn tags_at(&self, pos: Position) -> &[CellTag] {
        if !pos.in_bounds() {
            return &[];
        }
        &self.cells[pos.index()]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.tags_at(pos).is_empty()
    }

    pub fn tagged(&self, tag: CellTag) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.contains(&tag))
            .map(|(i, _)| Position::from_index(i))
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Vec<CellTag>> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells.get_mut(pos.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        assert_eq!(Position::new(6, 14).index(), 14 * 20 + 6);
        assert_eq!(Position::from_index(5 * 20 + 14), Position::new(14, 5));
    }

    #[test]
    fn step_absorbs_boundary() {
        let corner = Position::ORIGIN;
        assert_eq!(corner.step(Direction::Up), corner);
        assert_eq!(corner.step(Direction::Left), corner);
        assert_eq!(corner.step(Direction::Right), Position::new(1, 0));

        let far = Position::new(19, 19);
        assert_eq!(far.step(Direction::Down), far);
        assert_eq!(far.step(Direction::Right), far);
        assert_eq!(far.step(Direction::Up), Position::new(19, 18));
    }

    #[test]
    fn checked_step_rejects_leaving_the_map() {
        assert_eq!(Position::new(0, 7).checked_step(Direction::Left), None);
        assert_eq!(Position::new(3, 19).checked_step(Direction::Down), None);
        assert_eq!(
            Position::new(3, 19).checked_step(Direction::Up),
            Some(Position::new(3, 18))
        );
    }

    #[test]
    fn tags_are_a_set_per_cell() {
        let mut grid = Grid::default();
        let p = Position::new(9, 9);

        grid.tag(p, CellTag::Treasure);
        grid.tag(p, CellTag::Treasure);
        grid.tag(p, CellTag::Guard);
        assert_eq!(grid.tags_at(p), &[CellTag::Treasure, CellTag::Guard]);

        grid.untag(p, CellTag::Guard);
        assert!(grid.has_tag(p, CellTag::Treasure));
        assert!(!grid.has_tag(p, CellTag::Guard));

        grid.clear();
        assert!(grid.is_empty_at(p));
    }

    #[test]
    fn out_of_bounds_tagging_is_ignored() {
        let mut grid = Grid::default();
        grid.tag(Position::new(20, 0), CellTag::Guard);
        grid.tag(Position::new(-1, 3), CellTag::Guard);
        assert_eq!(grid.tagged(CellTag::Guard).count(), 0);
        assert!(grid.tags_at(Position::new(-1, 3)).is_empty());
    }
}
