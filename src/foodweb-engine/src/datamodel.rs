// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::Ident;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An organism icon placed on the stage.  Entities are created once at
/// layout time and are never destroyed or duplicated afterwards; only
/// their position changes (the embedder drags them around).
#[derive(Clone, PartialEq, Debug)]
pub struct Entity {
    pub id: Ident,
    pub pos: Point,
    pub size: f64,
}

impl Entity {
    pub fn center(&self) -> Point {
        Point {
            x: self.pos.x + self.size / 2.0,
            y: self.pos.y + self.size / 2.0,
        }
    }
}

/// The two endpoints of a rendered arrow, tail first.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ArrowPoints {
    pub tail: Point,
    pub head: Point,
}

impl ArrowPoints {
    pub fn new(tail: Point, head: Point) -> Self {
        ArrowPoints { tail, head }
    }

    /// Flat `[tail.x, tail.y, head.x, head.y]` form for the surface.
    pub fn as_array(&self) -> [f64; 4] {
        [self.tail.x, self.tail.y, self.head.x, self.head.y]
    }
}

/// Scoring recolors incorrect links and leaves everything else alone,
/// so there is deliberately no `Correct` variant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VisualState {
    Neutral,
    Incorrect,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LinkId(pub u32);

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "link{}", self.0)
    }
}

/// A predator-prey arrow.  While the student is still dragging, `end`
/// is `None` and the head follows the pointer; committing fills in
/// `end` and snaps both endpoints to entity centers.
#[derive(Clone, PartialEq, Debug)]
pub struct Link {
    pub id: LinkId,
    pub start: Ident,
    pub end: Option<Ident>,
    pub points: ArrowPoints,
    pub visual: VisualState,
}

impl Link {
    pub fn is_committed(&self) -> bool {
        self.end.is_some()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct AnswerEntry {
    pub id: i64,
    pub start: Ident,
    pub end: Ident,
}

/// The ordered answer key, immutable after load.  Entry ids only serve
/// to de-duplicate the matched set during scoring.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct AnswerKey {
    entries: Vec<AnswerEntry>,
}

impl AnswerKey {
    pub fn new(entries: Vec<AnswerEntry>) -> Self {
        AnswerKey { entries }
    }

    /// The id of the first entry with the given endpoints, if any.
    pub fn find(&self, start: &str, end: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|a| a.start == start && a.end == end)
            .map(|a| a.id)
    }

    pub fn entries(&self) -> &[AnswerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
