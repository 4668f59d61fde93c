// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena backed, index linked style range list.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{Error, StylePayload};

/// Handle to a range stored in a [`StyleRanges`] list.
///
/// Handles are only meaningful for the list that produced them, and only until the next
/// mutation that may remove ranges ([`StyleRanges::combine`], [`StyleRanges::remove`], ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node<T> {
    start: usize,
    /// Inclusive.
    end: usize,
    next: Option<NodeId>,
    payload: T,
}

/// The sub-chain affected by a [`StyleRanges::cut`].
///
/// After a cut, every range between `first` and `last` (following `next` links) lies entirely
/// inside the cut interval. Both are `None` when no range intersects the interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cut {
    /// The range immediately preceding the affected sub-chain, if any.
    pub prev: Option<NodeId>,
    /// The first range inside the interval.
    pub first: Option<NodeId>,
    /// The last range inside the interval.
    pub last: Option<NodeId>,
}

/// A borrowed view of one range in a [`StyleRanges`] list.
#[derive(Debug)]
pub struct StyleSpan<'a, T> {
    /// First character index covered by the range.
    pub start: usize,
    /// Last character index covered by the range (inclusive).
    pub end: usize,
    /// The style override carried by the range.
    pub payload: &'a T,
}

impl<T> Clone for StyleSpan<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StyleSpan<'_, T> {}

impl<T> StyleSpan<'_, T> {
    /// Returns `true` if `index` lies inside this range.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// A sparse, sorted, non-overlapping list of style overrides.
///
/// Invariants maintained by every mutating method:
///
/// - ranges are in ascending order and never overlap,
/// - no range carries the default payload,
/// - no two contiguous ranges carry equal payloads.
#[derive(Clone, Debug)]
pub struct StyleRanges<T: StylePayload> {
    nodes: Vec<Node<T>>,
    head: Option<NodeId>,
    free: Vec<NodeId>,
    count: usize,
}

impl<T: StylePayload> Default for StyleRanges<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            free: Vec::new(),
            count: 0,
        }
    }
}

impl<T: StylePayload> PartialEq for StyleRanges<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| {
                a.start == b.start && a.end == b.end && a.payload == b.payload
            })
    }
}

impl<T: StylePayload> StyleRanges<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of ranges in the list.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the list holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Removes every range.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.count = 0;
    }

    /// Iterates over the ranges in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ranges: self,
            cur: self.head,
        }
    }

    /// Returns the payload covering `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.span_at(index).map(|span| span.payload)
    }

    /// Returns the range covering `index`, if any.
    pub fn span_at(&self, index: usize) -> Option<StyleSpan<'_, T>> {
        self.iter()
            .take_while(|span| span.start <= index)
            .find(|span| span.contains(index))
    }

    /// The first character index covered by `id`.
    pub fn start(&self, id: NodeId) -> usize {
        self.node(id).start
    }

    /// The last character index (inclusive) covered by `id`.
    pub fn end(&self, id: NodeId) -> usize {
        self.node(id).end
    }

    /// The range following `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    /// The payload of `id`.
    pub fn payload(&self, id: NodeId) -> &T {
        &self.node(id).payload
    }

    /// Mutable access to the payload of `id`.
    ///
    /// Call [`combine`](Self::combine) over the touched interval afterwards to restore the
    /// list invariants.
    pub fn payload_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.0].payload
    }

    /// Splits ranges so that clean boundaries exist at `start` and `end + 1`.
    ///
    /// Nothing is removed or restyled; the returned [`Cut`] describes the sub-chain lying
    /// inside `start..=end` so that the caller can overwrite just the fields it wants.
    pub fn cut(&mut self, start: usize, end: usize) -> Cut {
        debug_assert!(start <= end, "cut requires start <= end");
        self.split_at(start);
        if let Some(after) = end.checked_add(1) {
            self.split_at(after);
        }

        let mut prev = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            if self.node(id).end >= start {
                break;
            }
            prev = cur;
            cur = self.node(id).next;
        }

        let first = cur.filter(|id| self.node(*id).start <= end);
        let mut last = first;
        if let Some(mut id) = first {
            while let Some(next) = self.node(id).next {
                if self.node(next).start > end {
                    break;
                }
                id = next;
            }
            last = Some(id);
        }
        Cut { prev, first, last }
    }

    /// Assigns `properties` to every character in `start..=end`.
    ///
    /// Only the fields named by `properties` are overwritten; other fields of existing ranges
    /// keep their values. Uncovered characters get a fresh range when the properties carry
    /// a non-default value. Does nothing when `start > end`.
    pub fn set(&mut self, start: usize, end: usize, properties: &[T::Property]) {
        if start > end || properties.is_empty() {
            return;
        }
        let cut = self.cut(start, end);

        let mut filled = T::default();
        for property in properties {
            filled.apply(property);
        }
        if !filled.is_default() {
            self.fill_gaps(cut.prev, start, end);
        }

        let mut cur = match cut.prev {
            Some(prev) => self.node(prev).next,
            None => self.head,
        };
        while let Some(id) = cur {
            let node = &mut self.nodes[id.0];
            if node.start > end {
                break;
            }
            for property in properties {
                node.payload.apply(property);
            }
            cur = node.next;
        }

        self.combine(start, end);
    }

    /// Checked variant of [`set`](Self::set) for a half-open range over text of length `len`.
    ///
    /// Empty ranges are accepted and change nothing.
    pub fn apply(
        &mut self,
        range: Range<usize>,
        len: usize,
        properties: &[T::Property],
    ) -> Result<(), Error> {
        if range.start > range.end {
            return Err(Error::invalid_range(range.start, range.end, len));
        }
        if range.end > len {
            return Err(Error::invalid_bounds(range.start, range.end, len));
        }
        if !range.is_empty() {
            self.set(range.start, range.end - 1, properties);
        }
        Ok(())
    }

    /// Merges contiguous equal ranges and drops default ranges around `start..=end`.
    pub fn combine(&mut self, start: usize, end: usize) {
        let lo = start.saturating_sub(1);
        let hi = end.saturating_add(1);

        let mut prev = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            if self.node(id).end >= lo {
                break;
            }
            prev = cur;
            cur = self.node(id).next;
        }

        while let Some(id) = cur {
            let node = self.node(id);
            if node.start > hi {
                break;
            }
            let next = node.next;
            if node.payload.is_default() {
                self.unlink(prev, id);
                cur = next;
                continue;
            }
            if let Some(p) = prev {
                let prev_node = self.node(p);
                if prev_node.end.saturating_add(1) == node.start
                    && prev_node.payload == node.payload
                {
                    let end = node.end;
                    self.nodes[p.0].end = end;
                    self.unlink(prev, id);
                    cur = next;
                    continue;
                }
            }
            prev = cur;
            cur = next;
        }
    }

    /// Opens a gap of `count` characters at `at`, as for a text insertion.
    ///
    /// Ranges after the gap move right; a range strictly containing `at` grows, so inserted
    /// characters inherit the style they land in.
    pub fn insert_gap(&mut self, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = &mut self.nodes[id.0];
            if node.start >= at {
                node.start += count;
                node.end += count;
            } else if node.end >= at {
                node.end += count;
            }
            cur = node.next;
        }
    }

    /// Removes the characters `start..=end`, shifting later ranges left.
    pub fn remove(&mut self, start: usize, end: usize) {
        if start > end {
            return;
        }
        let count = end - start + 1;
        let cut = self.cut(start, end);

        let mut cur = match cut.prev {
            Some(prev) => self.node(prev).next,
            None => self.head,
        };
        while let Some(id) = cur {
            if self.node(id).start > end {
                break;
            }
            cur = self.node(id).next;
            self.unlink(cut.prev, id);
        }
        while let Some(id) = cur {
            let node = &mut self.nodes[id.0];
            node.start -= count;
            node.end -= count;
            cur = node.next;
        }
        self.combine(start, start);
    }

    /// Splits the list at character `at`, returning the ranges from `at` onwards rebased to 0.
    pub fn split_off(&mut self, at: usize) -> Self {
        self.split_at(at);

        let mut prev = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            if self.node(id).start >= at {
                break;
            }
            prev = cur;
            cur = self.node(id).next;
        }
        match prev {
            Some(p) => self.nodes[p.0].next = None,
            None => self.head = None,
        }

        let mut tail = Self::new();
        let mut tail_prev = None;
        while let Some(id) = cur {
            let node = &mut self.nodes[id.0];
            let (start, end, next) = (node.start, node.end, node.next);
            let payload = core::mem::take(&mut node.payload);
            self.release(id);
            let moved = tail.alloc(Node {
                start: start - at,
                end: end - at,
                next: None,
                payload,
            });
            tail.link_after(tail_prev, moved);
            tail_prev = Some(moved);
            cur = next;
        }
        tail
    }

    /// Appends the ranges of `other`, shifted right by `offset`.
    ///
    /// Every range of `self` must end before `offset`. Equal ranges meeting at the seam are
    /// merged.
    pub fn append(&mut self, other: &Self, offset: usize) {
        let mut tail = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            debug_assert!(
                self.node(id).end < offset,
                "appended ranges must follow existing ones"
            );
            tail = cur;
            cur = self.node(id).next;
        }
        for span in other.iter() {
            let id = self.alloc(Node {
                start: span.start + offset,
                end: span.end + offset,
                next: None,
                payload: span.payload.clone(),
            });
            self.link_after(tail, id);
            tail = Some(id);
        }
        if offset > 0 {
            self.combine(offset - 1, offset);
        }
    }

    /// Returns `true` if the list satisfies its ordering, sparseness and merge invariants.
    pub fn is_normalized(&self) -> bool {
        let mut prev: Option<StyleSpan<'_, T>> = None;
        for span in self.iter() {
            if span.start > span.end || span.payload.is_default() {
                return false;
            }
            if let Some(p) = prev {
                if p.end >= span.start {
                    return false;
                }
                if p.end + 1 == span.start && p.payload == span.payload {
                    return false;
                }
            }
            prev = Some(span);
        }
        true
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        self.count += 1;
        if let Some(id) = self.free.pop() {
            self.nodes[id.0] = node;
            id
        } else {
            self.nodes.push(node);
            NodeId(self.nodes.len() - 1)
        }
    }

    fn release(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        node.payload = T::default();
        node.next = None;
        self.free.push(id);
        self.count -= 1;
    }

    /// Links `id` directly after `prev`, or at the head of the list.
    fn link_after(&mut self, prev: Option<NodeId>, id: NodeId) {
        match prev {
            Some(p) => {
                self.nodes[id.0].next = self.nodes[p.0].next;
                self.nodes[p.0].next = Some(id);
            }
            None => {
                self.nodes[id.0].next = self.head;
                self.head = Some(id);
            }
        }
    }

    /// Unlinks `id`, which must directly follow `prev`, and releases it.
    fn unlink(&mut self, prev: Option<NodeId>, id: NodeId) {
        let next = self.node(id).next;
        match prev {
            Some(p) => self.nodes[p.0].next = next,
            None => self.head = next,
        }
        self.release(id);
    }

    /// Splits the range strictly containing the boundary `pos`, if any.
    fn split_at(&mut self, pos: usize) {
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = self.node(id);
            if node.start >= pos {
                return;
            }
            if pos <= node.end {
                let tail = Node {
                    start: pos,
                    end: node.end,
                    next: None,
                    payload: node.payload.clone(),
                };
                self.nodes[id.0].end = pos - 1;
                let tail_id = self.alloc(tail);
                self.link_after(Some(id), tail_id);
                return;
            }
            cur = node.next;
        }
    }

    fn fill_gaps(&mut self, mut prev: Option<NodeId>, start: usize, end: usize) {
        let mut pos = start;
        let mut cur = match prev {
            Some(p) => self.node(p).next,
            None => self.head,
        };
        while let Some(id) = cur {
            let node = self.node(id);
            if node.start > end {
                break;
            }
            let (node_start, node_end, next) = (node.start, node.end, node.next);
            if node_start > pos {
                let gap = self.alloc(Node {
                    start: pos,
                    end: node_start - 1,
                    next: None,
                    payload: T::default(),
                });
                self.link_after(prev, gap);
            }
            prev = Some(id);
            pos = node_end.saturating_add(1);
            cur = next;
        }
        if pos <= end {
            let gap = self.alloc(Node {
                start: pos,
                end,
                next: None,
                payload: T::default(),
            });
            self.link_after(prev, gap);
        }
    }
}

/// Iterator over the ranges of a [`StyleRanges`] list.
#[derive(Debug)]
pub struct Iter<'a, T: StylePayload> {
    ranges: &'a StyleRanges<T>,
    cur: Option<NodeId>,
}

impl<'a, T: StylePayload> Iterator for Iter<'a, T> {
    type Item = StyleSpan<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        let node = self.ranges.node(id);
        self.cur = node.next;
        Some(StyleSpan {
            start: node.start,
            end: node.end,
            payload: &node.payload,
        })
    }
}

impl<'a, T: StylePayload> IntoIterator for &'a StyleRanges<T> {
    type Item = StyleSpan<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::StyleRanges;
    use crate::{ErrorKind, StylePayload};
    use alloc::vec::Vec;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestStyle {
        size: Option<u32>,
        bold: bool,
    }

    #[derive(Clone, Debug)]
    enum TestProperty {
        Size(Option<u32>),
        Bold(bool),
    }

    impl StylePayload for TestStyle {
        type Property = TestProperty;

        fn apply(&mut self, property: &TestProperty) {
            match property {
                TestProperty::Size(size) => self.size = *size,
                TestProperty::Bold(bold) => self.bold = *bold,
            }
        }
    }

    fn spans(ranges: &StyleRanges<TestStyle>) -> Vec<(usize, usize, TestStyle)> {
        ranges
            .iter()
            .map(|span| (span.start, span.end, span.payload.clone()))
            .collect()
    }

    fn sized(size: u32) -> TestStyle {
        TestStyle {
            size: Some(size),
            bold: false,
        }
    }

    #[test]
    fn set_into_empty_list() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(3, 6, &[TestProperty::Size(Some(12))]);
        assert_eq!(spans(&ranges), [(3, 6, sized(12))]);
        assert!(ranges.is_normalized());
    }

    #[test]
    fn set_default_into_empty_list_is_pruned() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(0, 10, &[TestProperty::Bold(false)]);
        assert!(ranges.is_empty());
    }

    #[test]
    fn set_only_overwrites_named_fields() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(0, 9, &[TestProperty::Size(Some(10))]);
        ranges.set(4, 12, &[TestProperty::Bold(true)]);
        assert_eq!(
            spans(&ranges),
            [
                (0, 3, sized(10)),
                (
                    4,
                    9,
                    TestStyle {
                        size: Some(10),
                        bold: true
                    }
                ),
                (
                    10,
                    12,
                    TestStyle {
                        size: None,
                        bold: true
                    }
                ),
            ]
        );
        assert!(ranges.is_normalized());
    }

    #[test]
    fn equal_neighbours_merge() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(0, 2, &[TestProperty::Size(Some(8))]);
        ranges.set(6, 8, &[TestProperty::Size(Some(8))]);
        assert_eq!(ranges.len(), 2);
        ranges.set(3, 5, &[TestProperty::Size(Some(8))]);
        assert_eq!(spans(&ranges), [(0, 8, sized(8))]);
    }

    #[test]
    fn clearing_middle_splits_range() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(0, 9, &[TestProperty::Size(Some(8))]);
        ranges.set(3, 5, &[TestProperty::Size(None)]);
        assert_eq!(spans(&ranges), [(0, 2, sized(8)), (6, 9, sized(8))]);
        assert!(ranges.is_normalized());
    }

    #[test]
    fn cut_exposes_clean_sub_chain() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(0, 9, &[TestProperty::Size(Some(8))]);
        let cut = ranges.cut(3, 5);
        let first = cut.first.expect("range inside cut");
        assert_eq!(cut.first, cut.last);
        assert_eq!((ranges.start(first), ranges.end(first)), (3, 5));
        assert_eq!(cut.prev.map(|p| ranges.end(p)), Some(2));
        // Cutting alone leaves equal neighbours until the caller combines.
        assert_eq!(ranges.len(), 3);
        ranges.payload_mut(first).bold = true;
        ranges.combine(3, 5);
        assert_eq!(ranges.len(), 3);
        assert!(ranges.is_normalized());
    }

    #[test]
    fn cut_outside_ranges_is_empty() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(0, 2, &[TestProperty::Size(Some(8))]);
        let cut = ranges.cut(5, 7);
        assert_eq!(cut.first, None);
        assert_eq!(cut.last, None);
    }

    #[test]
    fn insert_gap_extends_containing_range() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(2, 4, &[TestProperty::Size(Some(8))]);
        ranges.set(8, 9, &[TestProperty::Bold(true)]);
        ranges.insert_gap(3, 2);
        let got: Vec<_> = ranges.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(got, [(2, 6), (10, 11)]);
    }

    #[test]
    fn remove_shifts_and_merges() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(0, 2, &[TestProperty::Size(Some(8))]);
        ranges.set(3, 5, &[TestProperty::Bold(true)]);
        ranges.set(6, 8, &[TestProperty::Size(Some(8))]);
        ranges.remove(3, 5);
        assert_eq!(spans(&ranges), [(0, 5, sized(8))]);
    }

    #[test]
    fn split_off_and_append_round_trip() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(1, 7, &[TestProperty::Size(Some(8))]);
        ranges.set(5, 9, &[TestProperty::Bold(true)]);
        let original = ranges.clone();

        let tail = ranges.split_off(4);
        assert_eq!(spans(&ranges), [(1, 3, sized(8))]);
        assert_eq!(tail.iter().next().map(|s| (s.start, s.end)), Some((0, 0)));

        ranges.append(&tail, 4);
        assert_eq!(ranges, original);
        assert!(ranges.is_normalized());
    }

    #[test]
    fn get_reports_covering_payload() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        ranges.set(2, 3, &[TestProperty::Size(Some(8))]);
        assert_eq!(ranges.get(1), None);
        assert_eq!(ranges.get(2), Some(&sized(8)));
        assert_eq!(ranges.get(3), Some(&sized(8)));
        assert_eq!(ranges.get(4), None);
    }

    #[test]
    fn freed_nodes_are_reused() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        for i in 0..8 {
            ranges.set(i * 2, i * 2, &[TestProperty::Size(Some(8))]);
        }
        ranges.set(0, 15, &[TestProperty::Size(None)]);
        assert!(ranges.is_empty());
        ranges.set(0, 3, &[TestProperty::Bold(true)]);
        assert_eq!(ranges.len(), 1);
        assert!(ranges.nodes.len() <= 16);
    }

    #[expect(
        clippy::reversed_empty_ranges,
        reason = "We want an invalid range for testing."
    )]
    #[test]
    fn apply_checks_bounds() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        let err = ranges
            .apply(4..3, 6, &[TestProperty::Bold(true)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        let err = ranges
            .apply(0..7, 6, &[TestProperty::Bold(true)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(err.len(), 6);
        assert!(ranges.apply(2..2, 6, &[TestProperty::Bold(true)]).is_ok());
        assert!(ranges.is_empty());
        assert!(ranges.apply(0..6, 6, &[TestProperty::Bold(true)]).is_ok());
        assert_eq!(ranges.len(), 1);
    }

    #[test]
    fn mutation_sequence_stays_normalized() {
        let mut ranges = StyleRanges::<TestStyle>::new();
        // A deterministic pseudo random walk over mutations.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..400 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let start = (seed % 40) as usize;
            let len = ((seed >> 8) % 8) as usize;
            let end = start + len;
            match (seed >> 16) % 5 {
                0 => ranges.set(start, end, &[TestProperty::Size(Some(seed % 3))]),
                1 => ranges.set(start, end, &[TestProperty::Size(None)]),
                2 => ranges.set(start, end, &[TestProperty::Bold(seed & 1 == 0)]),
                3 => ranges.insert_gap(start, len),
                _ => ranges.remove(start, end),
            }
            assert!(ranges.is_normalized(), "{:?}", spans(&ranges));
        }
    }
}
