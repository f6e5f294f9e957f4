// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::{BTreeMap, HashSet};

use crate::common::{Error, ErrorCode, ErrorKind, Ident, Result};
use crate::datamodel::{LinkId, Point};
use crate::surface::{ArrowStyle, Hit, NodeSpec, Surface};

/// How close to an arrow's line a point has to be to hit it.
const ARROW_HIT_SLOP: f64 = 6.0;

/// A recording stand-in for the rendering surface.  Hit tests check
/// node rectangles first (topmost, i.e. last created, wins) and then
/// arrow segments, so tests can poke at a visible stretch of an arrow
/// by aiming between its endpoints.
#[derive(Default)]
pub struct FakeSurface {
    pub nodes: Vec<NodeSpec>,
    pub arrows: BTreeMap<LinkId, ([f64; 4], ArrowStyle)>,
    pub listening: bool,
    pub redraws: usize,
    pub fail_nodes: HashSet<Ident>,
}

impl FakeSurface {
    pub fn new() -> Self {
        FakeSurface {
            listening: true,
            ..FakeSurface::default()
        }
    }
}

fn rect_contains(node: &NodeSpec, at: Point) -> bool {
    at.x >= node.pos.x
        && at.x <= node.pos.x + node.size
        && at.y >= node.pos.y
        && at.y <= node.pos.y + node.size
}

fn segment_distance(points: [f64; 4], at: Point) -> f64 {
    let (x1, y1, x2, y2) = (points[0], points[1], points[2], points[3]);
    let (dx, dy) = (x2 - x1, y2 - y1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((at.x - x1) * dx + (at.y - y1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (px, py) = (x1 + t * dx, y1 + t * dy);
    ((at.x - px).powi(2) + (at.y - py).powi(2)).sqrt()
}

impl Surface for FakeSurface {
    fn create_node(&mut self, spec: &NodeSpec) -> Result<()> {
        if self.fail_nodes.contains(&spec.id) {
            return Err(Error::new(
                ErrorKind::Model,
                ErrorCode::Generic,
                Some(format!("image '{}' failed to load", spec.src)),
            ));
        }
        self.nodes.push(spec.clone());
        Ok(())
    }

    fn upsert_arrow(&mut self, id: LinkId, points: [f64; 4], style: ArrowStyle) {
        self.arrows.insert(id, (points, style));
    }

    fn remove_arrow(&mut self, id: LinkId) {
        self.arrows.remove(&id);
    }

    fn hit_test(&self, at: Point) -> Option<Hit> {
        if let Some(node) = self.nodes.iter().rev().find(|n| rect_contains(n, at)) {
            return Some(Hit::Entity(node.id.clone()));
        }
        for (id, (points, _)) in self.arrows.iter().rev() {
            if segment_distance(*points, at) <= ARROW_HIT_SLOP {
                return Some(Hit::Arrow(*id));
            }
        }
        None
    }

    fn set_listening(&mut self, on: bool) {
        self.listening = on;
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }
}
