//! Word search over a character grid.
//!
//! Independent of the codec: a word exists if it can be spelled by a path
//! of horizontally or vertically adjacent cells, using each cell at most
//! once per path.

/// Return true if `word` can be traced through `grid`.
///
/// An empty grid or empty word never matches. Rows may differ in length.
pub fn word_exists(grid: &[Vec<char>], word: &str) -> bool {
    let word: Vec<char> = word.chars().collect();
    if grid.is_empty() || word.is_empty() {
        return false;
    }

    let mut visited: Vec<Vec<bool>> = grid.iter().map(|row| vec![false; row.len()]).collect();

    for (i, row) in grid.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            if cell == word[0] && search(grid, &word, i, j, 0, &mut visited) {
                return true;
            }
        }
    }

    false
}

/// Depth-first search from `(i, j)` matching `word[k..]`, backtracking on
/// dead ends.
fn search(
    grid: &[Vec<char>],
    word: &[char],
    i: usize,
    j: usize,
    k: usize,
    visited: &mut [Vec<bool>],
) -> bool {
    if visited[i][j] || grid[i][j] != word[k] {
        return false;
    }
    if k + 1 == word.len() {
        return true;
    }

    visited[i][j] = true;

    let mut neighbors = Vec::with_capacity(4);
    if i > 0 && j < grid[i - 1].len() {
        neighbors.push((i - 1, j));
    }
    if i + 1 < grid.len() && j < grid[i + 1].len() {
        neighbors.push((i + 1, j));
    }
    if j > 0 {
        neighbors.push((i, j - 1));
    }
    if j + 1 < grid[i].len() {
        neighbors.push((i, j + 1));
    }

    let found = neighbors
        .into_iter()
        .any(|(ni, nj)| search(grid, word, ni, nj, k + 1, visited));

    visited[i][j] = false;
    found
}
