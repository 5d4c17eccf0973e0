//! Breadth-first searches over the open cells of a [`Grid`].
//!
//! Every search expands neighbours in the order +x, -x, +y, -y, which makes
//! the goal choice reproducible for a given maze.

use std::collections::VecDeque;

use crate::grid::{Direction, Grid, Pos};

/// Picks the goal: the last cell dequeued by a BFS from `start`.
///
/// This is a maximal-depth cell, with ties broken by traversal order. If
/// `start` is walled off the result is `start` itself.
pub fn find_goal(grid: &Grid, start: Pos) -> Pos {
    let mut visited = vec![false; grid.width() * grid.height()];
    let mut frontier = VecDeque::new();
    if let Some(idx) = index(grid, start) {
        visited[idx] = true;
    }
    frontier.push_back(start);

    let mut farthest = start;
    while let Some(pos) = frontier.pop_front() {
        farthest = pos;
        for next in grid.open_neighbors(pos) {
            let idx = next.y * grid.width() + next.x;
            if !visited[idx] {
                visited[idx] = true;
                frontier.push_back(next);
            }
        }
    }

    tracing::debug!(start = ?start, goal = ?farthest, "placed goal");
    farthest
}

/// BFS depth of every cell from `start`, row-major. `None` marks walls and
/// open cells that cannot be reached.
pub fn distances(grid: &Grid, start: Pos) -> Vec<Option<usize>> {
    let mut dist = vec![None; grid.width() * grid.height()];
    let Some(idx) = index(grid, start).filter(|_| grid.is_open(start)) else {
        return dist;
    };
    dist[idx] = Some(0);
    let mut frontier = VecDeque::from([start]);

    while let Some(pos) = frontier.pop_front() {
        let base = dist[pos.y * grid.width() + pos.x].unwrap_or(0);
        for next in grid.open_neighbors(pos) {
            let slot = &mut dist[next.y * grid.width() + next.x];
            if slot.is_none() {
                *slot = Some(base + 1);
                frontier.push_back(next);
            }
        }
    }
    dist
}

pub fn shortest_path(grid: &Grid, from: Pos, to: Pos) -> Option<Vec<Direction>> {
    if !grid.is_open(from) || !grid.is_open(to) {
        return None;
    }
    // Search backwards so each cell knows its next step toward `to`.
    let dist = distances(grid, to);
    let mut path = Vec::new();
    let mut here = from;
    let mut remaining = dist[here.y * grid.width() + here.x]?;

    while remaining > 0 {
        let (dir, next) = Direction::ALL.iter().find_map(|&dir| {
            let next = here.step(dir).filter(|next| grid.contains(*next))?;
            (dist[next.y * grid.width() + next.x] == Some(remaining - 1)).then_some((dir, next))
        })?;
        path.push(dir);
        here = next;
        remaining -= 1;
    }
    Some(path)
}

fn index(grid: &Grid, pos: Pos) -> Option<usize> {
    grid.contains(pos).then(|| pos.y * grid.width() + pos.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{generate, START};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn corridor(cells: &[(usize, usize)], width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(x, y) in cells {
            grid.set_open(Pos::new(x, y));
        }
        grid
    }

    #[test]
    fn goal_is_end_of_corridor() {
        let grid = corridor(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)], 3, 3);
        assert_eq!(find_goal(&grid, START), Pos::new(2, 2));
    }

    #[test]
    fn ties_resolve_by_neighbor_order() {
        // Two branches of depth 2 from the middle: +x is enqueued first, so
        // the -x branch is dequeued last.
        let grid = corridor(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)], 5, 1);
        assert_eq!(find_goal(&grid, Pos::new(2, 0)), Pos::new(0, 0));

        // Same for +y versus -y.
        let grid = corridor(&[(0, 0), (0, 1), (0, 2)], 1, 3);
        assert_eq!(find_goal(&grid, Pos::new(0, 1)), Pos::new(0, 0));
    }

    #[test]
    fn isolated_start_is_its_own_goal() {
        let grid = corridor(&[(0, 0), (2, 2)], 3, 3);
        assert_eq!(find_goal(&grid, START), START);
    }

    #[test]
    fn goal_has_maximal_depth() {
        for seed in 0..10 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let grid = generate(26, 20, &mut rng).unwrap();
            let goal = find_goal(&grid, START);
            assert!(grid.is_open(goal));

            let dist = distances(&grid, START);
            let deepest = dist.iter().flatten().max().copied();
            assert_eq!(dist[goal.y * grid.width() + goal.x], deepest);
        }
    }

    #[test]
    fn distances_mark_walls_as_none() {
        let grid = corridor(&[(0, 0), (1, 0)], 2, 2);
        assert_eq!(distances(&grid, START), vec![Some(0), Some(1), None, None]);
        assert!(distances(&grid, Pos::new(1, 1)).iter().all(Option::is_none));
    }

    #[test]
    fn shortest_path_walks_to_target() {
        let grid = corridor(&[(0, 0), (1, 0), (1, 1), (1, 2), (0, 2)], 2, 3);
        let path = shortest_path(&grid, START, Pos::new(0, 2)).unwrap();
        assert_eq!(
            path,
            vec![
                Direction::Right,
                Direction::Down,
                Direction::Down,
                Direction::Left
            ]
        );
        assert_eq!(shortest_path(&grid, START, START), Some(Vec::new()));
        assert_eq!(shortest_path(&grid, START, Pos::new(0, 1)), None);
    }
}
