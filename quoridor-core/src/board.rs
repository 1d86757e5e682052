// --- File: quoridor-project/quoridor-core/src/board.rs ---

//! Board graph: a grid of cells with labelled adjacencies encoding walls
//! and open edges.

use crate::color::Color;
use crate::error::QuoridorError;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashSet;

/// A cell index in `[0, size * size)`. Row `i / size`, column `i % size`.
pub type Cell = usize;

/// One of the four compass directions a pawn can step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Which of the two edges a wall blocks: the smaller-indexed ("upper"/"left")
/// edge is primary, the other secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Primary,
    Secondary,
}

/// Wall orientation: vertical walls block east-west edges, horizontal walls
/// block north-south edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The label carried by an edge between two geometrically adjacent cells.
///
/// `Open` edges are traversable; `Wall*` edges are geometrically adjacent
/// but blocked. The `Direction` on `Open` is the compass direction from the
/// smaller-indexed endpoint to the larger-indexed one (an `Open` edge is
/// otherwise symmetric — both endpoints agree that the cell is passable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLabel {
    Open(Direction),
    WallV(Segment),
    WallH(Segment),
}

impl EdgeLabel {
    pub fn is_open(&self) -> bool {
        matches!(self, EdgeLabel::Open(_))
    }
}

/// An (unordered at storage time, canonicalised on the way in) pair of
/// cells forming one edge of a wall.
pub type EdgePair = (Cell, Cell);

fn canonical_pair(pair: EdgePair) -> EdgePair {
    if pair.0 <= pair.1 {
        pair
    } else {
        (pair.1, pair.0)
    }
}

/// The board: a grid graph of cells, plus which row each color starts on
/// (equivalently, the other color's target row).
#[derive(Clone)]
pub struct Board {
    size: usize,
    graph: UnGraph<Cell, EdgeLabel>,
    black_row: HashSet<Cell>,
    white_row: HashSet<Cell>,
}

impl Board {
    /// Builds a fresh `size x size` board with every edge open, Black
    /// starting on the top row (row 0) and White on the bottom row.
    pub fn new(size: usize) -> Self {
        let mut graph = UnGraph::with_capacity(size * size, 2 * size * (size - 1));
        for cell in 0..size * size {
            let idx = graph.add_node(cell);
            debug_assert_eq!(idx, NodeIndex::new(cell));
        }

        for row in 0..size {
            for col in 0..size {
                let cell = row * size + col;
                if col + 1 < size {
                    let east = cell + 1;
                    graph.add_edge(
                        NodeIndex::new(cell),
                        NodeIndex::new(east),
                        EdgeLabel::Open(Direction::East),
                    );
                }
                if row + 1 < size {
                    let south = cell + size;
                    graph.add_edge(
                        NodeIndex::new(cell),
                        NodeIndex::new(south),
                        EdgeLabel::Open(Direction::South),
                    );
                }
            }
        }

        let black_row = (0..size).collect();
        let white_row = ((size - 1) * size..size * size).collect();

        Board {
            size,
            graph,
            black_row,
            white_row,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row_of(&self, cell: Cell) -> usize {
        cell / self.size
    }

    pub fn col_of(&self, cell: Cell) -> usize {
        cell % self.size
    }

    pub fn is_valid_cell(&self, cell: Cell) -> bool {
        cell < self.size * self.size
    }

    /// The row of cells a color starts on (equivalently, the opposing
    /// color's target row).
    pub fn start_row(&self, color: Color) -> &HashSet<Cell> {
        match color {
            Color::Black => &self.black_row,
            Color::White => &self.white_row,
        }
    }

    /// The row of cells a color must reach to win.
    pub fn target_row(&self, color: Color) -> &HashSet<Cell> {
        self.start_row(color.opponent())
    }

    /// The geometric neighbor of `cell` in direction `d`, ignoring walls;
    /// `None` if that would fall off the board.
    fn geometric_neighbor(&self, cell: Cell, d: Direction) -> Option<Cell> {
        let row = self.row_of(cell);
        let col = self.col_of(cell);
        match d {
            Direction::North if row > 0 => Some(cell - self.size),
            Direction::South if row + 1 < self.size => Some(cell + self.size),
            Direction::West if col > 0 => Some(cell - 1),
            Direction::East if col + 1 < self.size => Some(cell + 1),
            _ => None,
        }
    }

    fn edge_label(&self, u: Cell, v: Cell) -> Option<EdgeLabel> {
        let edge = self
            .graph
            .find_edge(NodeIndex::new(u), NodeIndex::new(v))?;
        self.graph.edge_weight(edge).copied()
    }

    /// The adjacent cell in direction `d` if the edge between `cell` and
    /// that neighbor is open; `None` if off-board or walled off.
    pub fn neighbour(&self, cell: Cell, d: Direction) -> Option<Cell> {
        let target = self.geometric_neighbor(cell, d)?;
        match self.edge_label(cell, target) {
            Some(label) if label.is_open() => Some(target),
            _ => None,
        }
    }

    /// True iff `u` and `v` are adjacent and the edge between them is open.
    pub fn is_open(&self, u: Cell, v: Cell) -> bool {
        matches!(self.edge_label(u, v), Some(label) if label.is_open())
    }

    /// All passable neighbors of `cell`, in compass order N, S, E, W.
    pub fn neighbours(&self, cell: Cell) -> Vec<Cell> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.neighbour(cell, d))
            .collect()
    }

    /// The compass direction from `u` to `v`, if they are geometrically
    /// adjacent (regardless of whether the edge between them is open).
    pub fn direction_between(&self, u: Cell, v: Cell) -> Option<Direction> {
        Direction::ALL
            .iter()
            .find(|&&d| self.geometric_neighbor(u, d) == Some(v))
            .copied()
    }

    fn axis_of(&self, a: Cell, b: Cell) -> Orientation {
        // East-west edges (column differs by 1) are cut by vertical walls;
        // north-south edges (row differs by 1) are cut by horizontal walls.
        if (a as isize - b as isize).abs() == 1 {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Sorts the wall's edge pairs into canonical (primary, secondary)
    /// order: each pair's own endpoints ascending, then primary = the pair
    /// with the smaller first cell (the top edge for horizontal walls, the
    /// left edge for vertical walls).
    pub fn canonicalise_wall(&self, a: EdgePair, b: EdgePair) -> (EdgePair, EdgePair) {
        let a = canonical_pair(a);
        let b = canonical_pair(b);
        if a.0 <= b.0 {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Whether both edges of a proposed wall are currently open and the
    /// pair forms a valid wall geometry.
    pub fn wall_edges_open(&self, primary: EdgePair, secondary: EdgePair) -> bool {
        self.is_open(primary.0, primary.1) && self.is_open(secondary.0, secondary.1)
    }

    /// The orientation implied by the edges' own axis.
    pub fn wall_orientation(&self, primary: EdgePair) -> Orientation {
        self.axis_of(primary.0, primary.1)
    }

    /// True if a perpendicular wall already crosses this wall's
    /// intersection. `primary` must already be canonicalised.
    ///
    /// A vertical wall's primary edge `(a, a+1)` crosses a horizontal wall
    /// whose primary edge is `(a, a+size)`, and vice versa.
    pub fn crosses_existing_wall(&self, primary: EdgePair, orientation: Orientation) -> bool {
        let a = primary.0;
        match orientation {
            Orientation::Vertical => {
                if a + self.size >= self.size * self.size {
                    return false;
                }
                matches!(
                    self.edge_label(a, a + self.size),
                    Some(EdgeLabel::WallH(Segment::Primary))
                )
            }
            Orientation::Horizontal => {
                if a % self.size + 1 >= self.size {
                    return false;
                }
                matches!(
                    self.edge_label(a, a + 1),
                    Some(EdgeLabel::WallV(Segment::Primary))
                )
            }
        }
    }

    /// Atomically relabels the four directed edges implicated by a wall.
    /// Preconditions: both edges are currently `Open*`.
    pub fn place_wall(
        &mut self,
        primary: EdgePair,
        secondary: EdgePair,
        orientation: Orientation,
    ) -> Result<(), QuoridorError> {
        if !self.wall_edges_open(primary, secondary) {
            return Err(QuoridorError::IllegalWall(
                "wall edges are not both open".into(),
            ));
        }
        self.relabel(primary, orientation, Segment::Primary);
        self.relabel(secondary, orientation, Segment::Secondary);
        Ok(())
    }

    /// Reverses `place_wall`, restoring direction-tagged `Open*` labels.
    pub fn remove_wall(&mut self, primary: EdgePair, secondary: EdgePair) {
        self.reopen(primary);
        self.reopen(secondary);
    }

    fn relabel(&mut self, pair: EdgePair, orientation: Orientation, segment: Segment) {
        let edge = self
            .graph
            .find_edge(NodeIndex::new(pair.0), NodeIndex::new(pair.1))
            .expect("edge must exist between geometrically adjacent cells");
        let label = match orientation {
            Orientation::Vertical => EdgeLabel::WallV(segment),
            Orientation::Horizontal => EdgeLabel::WallH(segment),
        };
        *self.graph.edge_weight_mut(edge).unwrap() = label;
    }

    fn reopen(&mut self, pair: EdgePair) {
        let edge = self
            .graph
            .find_edge(NodeIndex::new(pair.0), NodeIndex::new(pair.1))
            .expect("edge must exist between geometrically adjacent cells");
        let canonical = canonical_pair(pair);
        let direction = if canonical.1 - canonical.0 == 1 {
            Direction::East
        } else {
            Direction::South
        };
        *self.graph.edge_weight_mut(edge).unwrap() = EdgeLabel::Open(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_cells_have_two_neighbours() {
        let board = Board::new(9);
        assert_eq!(board.neighbours(0).len(), 2); // top-left
        assert_eq!(board.neighbours(8).len(), 2); // top-right
        assert_eq!(board.neighbours(72).len(), 2); // bottom-left
        assert_eq!(board.neighbours(80).len(), 2); // bottom-right
    }

    #[test]
    fn edge_cells_have_three_neighbours() {
        let board = Board::new(9);
        assert_eq!(board.neighbours(1).len(), 3); // top edge, not corner
        assert_eq!(board.neighbours(9).len(), 3); // left edge, not corner
    }

    #[test]
    fn interior_cells_have_four_neighbours() {
        let board = Board::new(9);
        assert_eq!(board.neighbours(40).len(), 4); // dead center
    }

    #[test]
    fn wall_blocks_exactly_the_two_implied_edges() {
        let mut board = Board::new(9);
        // Horizontal wall whose top-left corner is cell 9 (row 1, col 0):
        // blocks (0,9) and (1,10).
        let primary = (0usize, 9usize);
        let secondary = (1usize, 10usize);
        assert!(board.is_open(0, 9));
        assert!(board.is_open(1, 10));
        board
            .place_wall(primary, secondary, Orientation::Horizontal)
            .unwrap();
        assert!(!board.is_open(0, 9));
        assert!(!board.is_open(1, 10));
        // Unrelated edges untouched.
        assert!(board.is_open(0, 1));
        assert!(board.is_open(9, 10));
    }

    #[test]
    fn remove_wall_restores_open_edges() {
        let mut board = Board::new(9);
        let primary = (0usize, 9usize);
        let secondary = (1usize, 10usize);
        board
            .place_wall(primary, secondary, Orientation::Horizontal)
            .unwrap();
        board.remove_wall(primary, secondary);
        assert!(board.is_open(0, 9));
        assert!(board.is_open(1, 10));
    }

    #[test]
    fn placing_wall_on_blocked_edge_is_rejected() {
        let mut board = Board::new(9);
        let primary = (0usize, 9usize);
        let secondary = (1usize, 10usize);
        board
            .place_wall(primary, secondary, Orientation::Horizontal)
            .unwrap();
        assert!(board.place_wall(primary, secondary, Orientation::Horizontal).is_err());
    }

    #[test]
    fn canonicalise_sorts_pairs_and_picks_smaller_first() {
        let board = Board::new(9);
        let (p, s) = board.canonicalise_wall((10, 1), (9, 0));
        assert_eq!(p, (0, 9));
        assert_eq!(s, (1, 10));
    }

    #[test]
    fn crossing_walls_detected_at_shared_corner() {
        let mut board = Board::new(9);
        // Vertical wall with primary edge (0,1), secondary (9,10): blocks the
        // column boundary between col0 and col1 across rows 0 and 1.
        board
            .place_wall((0, 1), (9, 10), Orientation::Vertical)
            .unwrap();
        assert!(board.crosses_existing_wall((0, 9), Orientation::Horizontal));
    }
}
