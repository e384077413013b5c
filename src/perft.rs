use crate::board::Board;

/// Leaf count of the legal move tree, cloning the board per child.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut root = *board;
    let moves = root.moves();
    if depth == 1 {
        return moves.values().map(|t| t.len() as u64).sum();
    }
    let mut nodes = 0u64;
    for (from, targets) in moves {
        for to in targets {
            let mut child = *board;
            if child.move_piece(from, to).is_ok() {
                nodes += perft(&child, depth - 1);
            }
        }
    }
    nodes
}

/// Per-root-move node counts, sorted by origin then destination.
pub fn divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut root = *board;
    let mut out = Vec::new();
    if depth == 0 { return out; }
    for (from, targets) in root.moves() {
        for to in targets {
            let mut child = *board;
            if child.move_piece(from, to).is_ok() {
                out.push((format!("{from}{to}"), perft(&child, depth - 1)));
            }
        }
    }
    out
}
