// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use log::debug;

use crate::common::{Error, ErrorCode, ErrorKind, Ident, Result};
use crate::datamodel::{ArrowPoints, Link, LinkId, Point, VisualState};

/// How far past the pointer the preview head sits, on each axis, so
/// the arrow tip stays visible under the cursor.
pub const POINTER_OFFSET: f64 = 10.0;

/// Offset from the source entity's top-left for the initial head of a
/// freshly started link, before the first move event arrives.
pub const INITIAL_HEAD_OFFSET: f64 = 5.0;

/// The single renderable collection of links.  Pending and committed
/// links live in the same `Vec`, in creation order; at most one link
/// is pending at any instant.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LinkStore {
    links: Vec<Link>,
    pending: Option<LinkId>,
    next_id: u32,
}

impl LinkStore {
    pub fn new() -> Self {
        LinkStore::default()
    }

    /// Open a pending link anchored at the source entity.  Returns
    /// `None` if a pending link is already open; a second gesture
    /// cannot start until the first resolves.
    pub fn begin_pending(&mut self, source: &str, points: ArrowPoints) -> Option<LinkId> {
        if self.pending.is_some() {
            return None;
        }
        let id = LinkId(self.next_id);
        self.next_id += 1;
        self.links.push(Link {
            id,
            start: source.to_string(),
            end: None,
            points,
            visual: VisualState::Neutral,
        });
        self.pending = Some(id);
        debug!("opened pending {id} from {source}");
        Some(id)
    }

    /// Move the pending head to track the pointer.  Only the head pair
    /// changes; the tail stays pinned to the source center.
    pub fn update_preview(&mut self, pointer: Point) -> Option<&Link> {
        let id = self.pending?;
        let link = self.get_mut(id)?;
        link.points.head = pointer.offset(POINTER_OFFSET, POINTER_OFFSET);
        self.get(id)
    }

    /// Commit the pending link to the target entity, snapping both
    /// endpoints to current centers.  The caller has already excluded
    /// self-loops and releases over empty space.
    pub fn commit_pending(
        &mut self,
        target: &str,
        source_center: Point,
        target_center: Point,
    ) -> Result<LinkId> {
        let id = self.pending.take().ok_or_else(|| {
            Error::new(ErrorKind::Interaction, ErrorCode::NoPendingLink, None)
        })?;
        let link = self.get_mut(id).ok_or_else(|| {
            Error::new(
                ErrorKind::Model,
                ErrorCode::DoesNotExist,
                Some(id.to_string()),
            )
        })?;
        link.end = Some(target.to_string());
        link.points = ArrowPoints::new(source_center, target_center);
        debug!("committed {id} to {target}");
        Ok(id)
    }

    /// Destroy the pending link outright.
    pub fn cancel_pending(&mut self) -> Option<LinkId> {
        let id = self.pending.take()?;
        if let Some(pos) = self.links.iter().position(|l| l.id == id) {
            self.links.remove(pos);
        }
        debug!("cancelled pending {id}");
        Some(id)
    }

    /// Remove the first committed link (creation order) with exactly
    /// these endpoints.  Duplicates are deleted one at a time.
    pub fn delete_first_matching(&mut self, start: &str, end: &str) -> Option<LinkId> {
        let pos = self
            .links
            .iter()
            .position(|l| l.start == start && l.end.as_deref() == Some(end))?;
        let link = self.links.remove(pos);
        Some(link.id)
    }

    /// Synchronously retarget every link touching a moved entity: the
    /// tail pair if the link starts there, else the head pair if a
    /// committed link ends there.  Pending heads keep tracking the
    /// pointer, not the entity.  Returns the ids that changed.
    pub fn entity_moved(&mut self, id: &str, new_center: Point) -> Vec<LinkId> {
        let mut touched = Vec::new();
        for link in self.links.iter_mut() {
            if link.start == id {
                link.points.tail = new_center;
                touched.push(link.id);
            } else if link.end.as_deref() == Some(id) {
                link.points.head = new_center;
                touched.push(link.id);
            }
        }
        touched
    }

    pub fn get(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == id)
    }

    pub fn pending_id(&self) -> Option<LinkId> {
        self.pending
    }

    pub fn committed(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.is_committed())
    }

    pub fn committed_mut(&mut self) -> impl Iterator<Item = &mut Link> {
        self.links.iter_mut().filter(|l| l.is_committed())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn initial_points() -> ArrowPoints {
        ArrowPoints::new(Point::new(50.0, 50.0), Point::new(5.0, 5.0))
    }

    #[test]
    fn test_single_pending_slot() {
        let mut store = LinkStore::new();
        let first = store.begin_pending("grass", initial_points());
        assert!(first.is_some());
        // a second pending link is refused while the first is open
        assert!(store.begin_pending("rabbit", initial_points()).is_none());

        store.cancel_pending();
        assert!(store.begin_pending("rabbit", initial_points()).is_some());
    }

    #[test]
    fn test_preview_tracks_pointer_with_offset() {
        let mut store = LinkStore::new();
        store.begin_pending("grass", initial_points());

        let link = store.update_preview(Point::new(200.0, 300.0)).unwrap();
        assert!(approx_eq!(f64, link.points.head.x, 210.0));
        assert!(approx_eq!(f64, link.points.head.y, 310.0));
        // tail stays pinned
        assert!(approx_eq!(f64, link.points.tail.x, 50.0));
        assert!(approx_eq!(f64, link.points.tail.y, 50.0));
    }

    #[test]
    fn test_preview_without_pending_is_noop() {
        let mut store = LinkStore::new();
        assert!(store.update_preview(Point::new(1.0, 2.0)).is_none());
    }

    #[test]
    fn test_commit_snaps_to_centers() {
        let mut store = LinkStore::new();
        let id = store.begin_pending("grass", initial_points()).unwrap();
        store.update_preview(Point::new(400.0, 400.0));

        let committed = store
            .commit_pending("rabbit", Point::new(55.0, 60.0), Point::new(300.0, 120.0))
            .unwrap();
        assert_eq!(committed, id);
        assert!(store.pending_id().is_none());

        let link = store.get(id).unwrap();
        assert_eq!(link.end.as_deref(), Some("rabbit"));
        assert!(approx_eq!(f64, link.points.tail.x, 55.0));
        assert!(approx_eq!(f64, link.points.head.x, 300.0));
        assert!(approx_eq!(f64, link.points.head.y, 120.0));
    }

    #[test]
    fn test_commit_without_pending_fails() {
        let mut store = LinkStore::new();
        let err = store
            .commit_pending("rabbit", Point::default(), Point::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoPendingLink);
    }

    #[test]
    fn test_cancel_destroys_link() {
        let mut store = LinkStore::new();
        let id = store.begin_pending("grass", initial_points()).unwrap();
        assert_eq!(store.cancel_pending(), Some(id));
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
        assert!(store.cancel_pending().is_none());
    }

    #[test]
    fn test_delete_first_matching_removes_one_duplicate() {
        let mut store = LinkStore::new();
        for _ in 0..2 {
            store.begin_pending("grass", initial_points()).unwrap();
            store
                .commit_pending("rabbit", Point::new(0.0, 0.0), Point::new(1.0, 1.0))
                .unwrap();
        }
        assert_eq!(store.committed().count(), 2);

        let removed = store.delete_first_matching("grass", "rabbit").unwrap();
        assert_eq!(removed, LinkId(0));
        assert_eq!(store.committed().count(), 1);
        assert!(store.get(LinkId(1)).is_some());

        // and the second one goes on the next delete
        assert_eq!(
            store.delete_first_matching("grass", "rabbit"),
            Some(LinkId(1))
        );
        assert!(store.delete_first_matching("grass", "rabbit").is_none());
    }

    #[test]
    fn test_entity_moved_rewrites_tail_then_head() {
        let mut store = LinkStore::new();
        store.begin_pending("grass", initial_points()).unwrap();
        store
            .commit_pending("rabbit", Point::new(10.0, 10.0), Point::new(20.0, 20.0))
            .unwrap();
        store.begin_pending("rabbit", initial_points()).unwrap();
        store
            .commit_pending("fox", Point::new(20.0, 20.0), Point::new(30.0, 30.0))
            .unwrap();

        // rabbit is the head of one link and the tail of another
        let touched = store.entity_moved("rabbit", Point::new(99.0, 88.0));
        assert_eq!(touched.len(), 2);

        let first = store.get(LinkId(0)).unwrap();
        assert!(approx_eq!(f64, first.points.head.x, 99.0));
        assert!(approx_eq!(f64, first.points.tail.x, 10.0));

        let second = store.get(LinkId(1)).unwrap();
        assert!(approx_eq!(f64, second.points.tail.x, 99.0));
        assert!(approx_eq!(f64, second.points.head.x, 30.0));
    }

    #[test]
    fn test_entity_moved_drags_pending_tail() {
        let mut store = LinkStore::new();
        let id = store.begin_pending("grass", initial_points()).unwrap();
        store.update_preview(Point::new(200.0, 200.0));

        let touched = store.entity_moved("grass", Point::new(77.0, 66.0));
        assert_eq!(touched, vec![id]);

        let link = store.get(id).unwrap();
        assert!(approx_eq!(f64, link.points.tail.x, 77.0));
        // the preview head still tracks the pointer
        assert!(approx_eq!(f64, link.points.head.x, 210.0));
    }

    #[test]
    fn test_creation_order_preserved() {
        let mut store = LinkStore::new();
        store.begin_pending("grass", initial_points()).unwrap();
        store
            .commit_pending("cricket", Point::default(), Point::default())
            .unwrap();
        store.begin_pending("cricket", initial_points()).unwrap();
        store
            .commit_pending("sparrow", Point::default(), Point::default())
            .unwrap();

        let starts: Vec<_> = store.committed().map(|l| l.start.as_str()).collect();
        assert_eq!(starts, vec!["grass", "cricket"]);
    }
}
