use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::MazeError;
use crate::grid::{Grid, Pos};

/// Player spawn; always opened after carving.
pub const START: Pos = Pos::new(0, 0);

const CARVE_OFFSETS: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

struct Frame {
    pos: Pos,
    offsets: [(isize, isize); 4],
    next: usize,
}

impl Frame {
    fn enter(grid: &mut Grid, pos: Pos, rng: &mut (impl Rng + ?Sized)) -> Self {
        grid.set_open(pos);
        let mut offsets = CARVE_OFFSETS;
        offsets.shuffle(rng);
        Self {
            pos,
            offsets,
            next: 0,
        }
    }
}

/// Midpoint of the grid, rounded down. Carving starts here.
pub fn seed_cell(grid: &Grid) -> Pos {
    Pos::new(grid.width() / 2, grid.height() / 2)
}

/// Randomized depth-first carving from `seed`.
///
/// Runs on an explicit stack. Each cell shuffles its four distance-2 offsets
/// once, when it is entered, and the first unvisited neighbour is descended
/// into before the remaining offsets are tried, so the RNG is consumed in the
/// same order a recursive carve would consume it.
pub fn carve(grid: &mut Grid, seed: Pos, rng: &mut (impl Rng + ?Sized)) {
    let mut stack = vec![Frame::enter(grid, seed, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.offsets.len() {
            stack.pop();
            continue;
        }
        let (dx, dy) = frame.offsets[frame.next];
        frame.next += 1;
        let here = frame.pos;

        let Some(next) = here.offset(dx, dy) else {
            continue;
        };
        if !grid.contains(next) || grid.is_open(next) {
            continue;
        }
        if let Some(between) = here.offset(dx / 2, dy / 2) {
            grid.set_open(between);
        }
        let child = Frame::enter(grid, next, rng);
        stack.push(child);
    }
}

/// Builds a perfect maze of the given size.
///
/// The spawn cell (0,0) is always open and always joined to the carved tree.
pub fn generate(
    width: usize,
    height: usize,
    rng: &mut (impl Rng + ?Sized),
) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(width, height)?;
    let seed = seed_cell(&grid);
    carve(&mut grid, seed, rng);

    grid.set_open(START);
    // Odd/odd seed parity leaves (0,0) diagonal to the lattice room (1,1).
    // (1,0) touches only those two open cells, so the tree stays a tree.
    if seed.x % 2 == 1 && seed.y % 2 == 1 {
        grid.set_open(Pos::new(1, 0));
    }

    tracing::debug!(
        width,
        height,
        seed = ?seed,
        open = grid.open_count(),
        "carved maze"
    );
    Ok(grid)
}
