// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::{Ident, Result};
use crate::datamodel::{LinkId, Point, VisualState};

/// Arrowhead length and width, in stage pixels.
pub const ARROWHEAD_SIZE: f64 = 10.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Black,
    Red,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ArrowStyle {
    pub stroke: Color,
}

impl ArrowStyle {
    pub const NEUTRAL: ArrowStyle = ArrowStyle {
        stroke: Color::Black,
    };
    pub const ALERT: ArrowStyle = ArrowStyle { stroke: Color::Red };
}

impl From<VisualState> for ArrowStyle {
    fn from(visual: VisualState) -> Self {
        match visual {
            VisualState::Neutral => ArrowStyle::NEUTRAL,
            VisualState::Incorrect => ArrowStyle::ALERT,
        }
    }
}

/// Everything the surface needs to materialize one entity node.
#[derive(Clone, PartialEq, Debug)]
pub struct NodeSpec {
    pub id: Ident,
    pub src: String,
    pub pos: Point,
    pub size: f64,
    pub draggable: bool,
}

/// The topmost stage object under a point.
#[derive(Clone, PartialEq, Debug)]
pub enum Hit {
    Entity(Ident),
    Arrow(LinkId),
}

/// The rendering collaborator, owned by the embedder.  The engine
/// holds the authoritative model; the surface only draws what it is
/// told and answers hit tests.
pub trait Surface {
    /// Materialize an entity node.  Failure (a missing image, say) is
    /// reported back so the session can skip the entity.
    fn create_node(&mut self, spec: &NodeSpec) -> Result<()>;

    /// Create or reposition/restyle the arrow primitive for a link.
    fn upsert_arrow(&mut self, id: LinkId, points: [f64; 4], style: ArrowStyle);

    fn remove_arrow(&mut self, id: LinkId);

    fn hit_test(&self, at: Point) -> Option<Hit>;

    /// Turn all input delivery off.  Called once, after scoring.
    fn set_listening(&mut self, on: bool);

    fn redraw(&mut self);
}
