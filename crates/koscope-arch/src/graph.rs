//! Cycle detection over the layer dependency graph.

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Finds the first dependency cycle, if any.
///
/// Depth-first search in node order, neighbors in edge insertion order.
/// On the first back edge `u -> v` the returned chain starts at `u`, walks
/// the gray stack from `v` up to (excluding) `u`, and closes by repeating
/// `u`, so every adjacent pair in the chain is a declared edge.
pub(crate) fn find_cycle(node_count: usize, adjacency: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut color = vec![Color::White; node_count];
    let mut stack = Vec::new();
    for node in 0..node_count {
        if color[node] == Color::White {
            if let Some(chain) = visit(node, adjacency, &mut color, &mut stack) {
                return Some(chain);
            }
        }
    }
    None
}

fn visit(
    node: usize,
    adjacency: &[Vec<usize>],
    color: &mut [Color],
    stack: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    color[node] = Color::Gray;
    stack.push(node);
    for &next in &adjacency[node] {
        match color[next] {
            Color::Gray => {
                let start = stack.iter().position(|&n| n == next)?;
                let mut chain = vec![node];
                chain.extend_from_slice(&stack[start..stack.len() - 1]);
                chain.push(node);
                return Some(chain);
            }
            Color::White => {
                if let Some(chain) = visit(next, adjacency, color, stack) {
                    return Some(chain);
                }
            }
            Color::Black => {}
        }
    }
    stack.pop();
    color[node] = Color::Black;
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acyclic_graph_has_no_cycle() {
        // 0 -> 1 -> 2, 0 -> 2
        let adjacency = vec![vec![1, 2], vec![2], vec![]];
        assert!(find_cycle(3, &adjacency).is_none());
    }

    #[test]
    fn two_node_cycle_starts_at_the_back_edge_source() {
        // 0 -> 1, 1 -> 0; back edge is 1 -> 0
        let adjacency = vec![vec![1], vec![0]];
        assert_eq!(find_cycle(2, &adjacency), Some(vec![1, 0, 1]));
    }

    #[test]
    fn three_node_cycle_walks_the_gray_stack() {
        // 0 -> 1 -> 2 -> 0; back edge is 2 -> 0
        let adjacency = vec![vec![1], vec![2], vec![0]];
        assert_eq!(find_cycle(3, &adjacency), Some(vec![2, 0, 1, 2]));
    }

    #[test]
    fn diamond_sharing_is_not_a_cycle() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let adjacency = vec![vec![1, 2], vec![3], vec![3], vec![]];
        assert!(find_cycle(4, &adjacency).is_none());
    }

    #[test]
    fn cycle_reachable_only_from_a_later_root() {
        // 0 -> 1; 2 -> 3, 3 -> 2
        let adjacency = vec![vec![1], vec![], vec![3], vec![2]];
        assert_eq!(find_cycle(4, &adjacency), Some(vec![3, 2, 3]));
    }
}
