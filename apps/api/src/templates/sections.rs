//! Per-instance section ordering and the drag gesture that mutates it.

use tracing::debug;

use crate::document::SectionKind;
use crate::templates::selector;

/// The template's default order, used on every mount.
pub fn initial_order(template_id: &str) -> Vec<SectionKind> {
    selector::resolve(Some(template_id)).default_section_order()
}

/// Moves the section at `from` so it ends up at index `to`.
///
/// Returns an unchanged copy when `from == to` or either index is out of
/// bounds; the length and the set of sections never change.
pub fn move_section(order: &[SectionKind], from: usize, to: usize) -> Vec<SectionKind> {
    let mut next = order.to_vec();
    if from == to || from >= order.len() || to >= order.len() {
        return next;
    }
    let moved = next.remove(from);
    next.insert(to, moved);
    next
}

/// True when `candidate` holds exactly the sections of `reference`, in any order.
pub fn is_permutation(candidate: &[SectionKind], reference: &[SectionKind]) -> bool {
    let mut a = candidate.to_vec();
    let mut b = reference.to_vec();
    a.sort_by_key(|k| k.as_str());
    b.sort_by_key(|k| k.as_str());
    a == b
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragSession {
    from: usize,
    over: Option<usize>,
}

/// A section order plus at most one in-progress drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOrder {
    order: Vec<SectionKind>,
    drag: Option<DragSession>,
}

impl SectionOrder {
    pub fn new(order: Vec<SectionKind>) -> Self {
        Self { order, drag: None }
    }

    pub fn as_slice(&self) -> &[SectionKind] {
        &self.order
    }

    #[allow(dead_code)]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drop target currently under the pointer, if any.
    #[allow(dead_code)]
    pub fn hovered(&self) -> Option<usize> {
        self.drag.and_then(|d| d.over)
    }

    /// Starts dragging the section at `index`. Ignored while another drag is
    /// active or when the index is out of bounds.
    pub fn drag_start(&mut self, index: usize) -> bool {
        if self.drag.is_some() {
            debug!(index, "drag already in progress; ignoring drag start");
            return false;
        }
        if index >= self.order.len() {
            return false;
        }
        self.drag = Some(DragSession {
            from: index,
            over: None,
        });
        true
    }

    /// Records the hovered drop target and returns the order the drop would
    /// produce. The committed order is not touched.
    pub fn drag_over(&mut self, index: usize) -> Option<Vec<SectionKind>> {
        let session = self.drag.as_mut()?;
        session.over = Some(index);
        Some(move_section(&self.order, session.from, index))
    }

    /// Commits the drag at `index`. Returns whether the order changed.
    pub fn drop(&mut self, index: usize) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        let next = move_section(&self.order, session.from, index);
        let changed = next != self.order;
        self.order = next;
        changed
    }

    #[allow(dead_code)]
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionKind::*;

    #[test]
    fn test_move_first_to_last() {
        let order = vec![Summary, Experience, Skills];
        assert_eq!(move_section(&order, 0, 2), vec![Experience, Skills, Summary]);
    }

    #[test]
    fn test_move_round_trip_restores_order() {
        let order = initial_order("08");
        let moved = move_section(&order, 2, 0);
        assert_ne!(moved, order);
        assert_eq!(move_section(&moved, 0, 2), order);
    }

    #[test]
    fn test_move_noop_cases() {
        let order = vec![Summary, Experience, Skills];
        assert_eq!(move_section(&order, 1, 1), order);
        assert_eq!(move_section(&order, 5, 0), order);
        assert_eq!(move_section(&order, 0, 3), order);
        assert!(move_section(&[], 0, 0).is_empty());
    }

    #[test]
    fn test_move_preserves_length_and_members() {
        let order = initial_order("05");
        for from in 0..order.len() {
            for to in 0..order.len() {
                let moved = move_section(&order, from, to);
                assert!(is_permutation(&moved, &order));
                assert_eq!(moved[to], order[from]);
            }
        }
    }

    #[test]
    fn test_initial_order_unknown_template_uses_default() {
        assert_eq!(initial_order("nope"), initial_order("01"));
    }

    #[test]
    fn test_drag_session_preview_then_drop() {
        let mut order = SectionOrder::new(vec![Summary, Experience, Skills]);
        assert!(order.drag_start(0));
        assert_eq!(order.drag_over(2), Some(vec![Experience, Skills, Summary]));
        assert_eq!(order.hovered(), Some(2));
        // Preview does not commit.
        assert_eq!(order.as_slice(), &[Summary, Experience, Skills]);
        assert!(order.drop(2));
        assert_eq!(order.as_slice(), &[Experience, Skills, Summary]);
        assert!(!order.is_dragging());
    }

    #[test]
    fn test_second_drag_start_is_ignored() {
        let mut order = SectionOrder::new(vec![Summary, Experience, Skills]);
        assert!(order.drag_start(0));
        assert!(!order.drag_start(1));
        order.drop(1);
        assert_eq!(order.as_slice(), &[Experience, Summary, Skills]);
    }

    #[test]
    fn test_cancel_and_drop_without_drag() {
        let mut order = SectionOrder::new(vec![Summary, Experience]);
        assert!(!order.drop(1));
        assert_eq!(order.drag_over(1), None);
        order.drag_start(1);
        order.cancel();
        assert!(!order.drop(0));
        assert_eq!(order.as_slice(), &[Summary, Experience]);
    }

    #[test]
    fn test_drop_on_same_index_is_unchanged() {
        let mut order = SectionOrder::new(vec![Summary, Experience]);
        order.drag_start(1);
        assert!(!order.drop(1));
        assert!(!order.is_dragging());
    }
}
