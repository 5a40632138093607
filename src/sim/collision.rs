//! Pairwise merge resolution for arena balls
//!
//! Pairs are tested in index order over the arena as it stands when resolution
//! starts. A ball merges at most once per tick: consumed balls are marked, then
//! the arena is compacted and the merged balls are appended in creation order.

use super::ball::Ball;

/// Record of one merge, for logging and callers that care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeEvent {
    pub first: u32,
    pub second: u32,
    pub merged: u32,
}

/// Merge every colliding pair in `balls`, first match wins.
///
/// `next_id` allocates ids for the merged balls.
pub fn resolve_merges(balls: &mut Vec<Ball>, mut next_id: impl FnMut() -> u32) -> Vec<MergeEvent> {
    let n = balls.len();
    let mut consumed = vec![false; n];
    let mut merged = Vec::new();
    let mut events = Vec::new();

    for i in 0..n {
        if consumed[i] {
            continue;
        }
        for j in (i + 1)..n {
            if consumed[j] {
                continue;
            }
            if balls[i].collides_with(&balls[j]) {
                let ball = balls[i].merge_with(&balls[j], next_id());
                events.push(MergeEvent {
                    first: balls[i].id,
                    second: balls[j].id,
                    merged: ball.id,
                });
                merged.push(ball);
                consumed[i] = true;
                consumed[j] = true;
                break;
            }
        }
    }

    if !merged.is_empty() {
        let mut index = 0;
        balls.retain(|_| {
            let keep = !consumed[index];
            index += 1;
            keep
        });
        balls.extend(merged);
    }

    events
}
