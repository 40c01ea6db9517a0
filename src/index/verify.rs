//! Structural checks over an on-disk AVL tree.

use crate::common::{Error, Result, SlotId};

use super::AvlIndex;

/// What a checked subtree reports to its parent.
struct Checked {
    height: i32,
    count: usize,
}

impl AvlIndex {
    /// Walk every reachable node and check the tree invariants.
    ///
    /// For each node:
    /// - its key lies strictly between the bounds inherited from ancestors
    /// - its stored height is `1 + max(height(left), height(right))`
    /// - `|height(left) - height(right)| <= 1`
    ///
    /// Returns the number of reachable nodes.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` for the first offending node, or
    /// a `CorruptRecord`/`DepthExceeded` error if links are broken.
    pub fn verify(&self) -> Result<usize> {
        let root = self.store.read_header()?;
        let checked = self.check_subtree(root, None, None, 0)?;
        Ok(checked.count)
    }

    fn check_subtree(
        &self,
        slot: SlotId,
        lower: Option<i32>,
        upper: Option<i32>,
        depth: usize,
    ) -> Result<Checked> {
        if !slot.is_valid() {
            return Ok(Checked {
                height: -1,
                count: 0,
            });
        }
        self.check_depth(depth)?;

        let node = self.node(slot)?;
        let violation = |reason: String| Error::InvariantViolation {
            slot: slot.0,
            reason,
        };

        if lower.is_some_and(|lo| node.key <= lo) || upper.is_some_and(|hi| node.key >= hi) {
            return Err(violation(format!(
                "key {} outside ({:?}, {:?})",
                node.key, lower, upper
            )));
        }

        let left = self.check_subtree(node.left, lower, Some(node.key), depth + 1)?;
        let right = self.check_subtree(node.right, Some(node.key), upper, depth + 1)?;

        let expected = 1 + left.height.max(right.height);
        if node.height != expected {
            return Err(violation(format!(
                "stored height {} but children give {}",
                node.height, expected
            )));
        }

        let balance = left.height - right.height;
        if balance.abs() > 1 {
            return Err(violation(format!("balance factor {}", balance)));
        }

        Ok(Checked {
            height: expected,
            count: 1 + left.count + right.count,
        })
    }
}
