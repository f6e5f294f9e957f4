// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use log::{debug, warn};

use crate::common::{Error, ErrorCode, ErrorKind, Ident, Result};
use crate::config::Config;
use crate::datamodel::{AnswerKey, ArrowPoints, Entity, LinkId, Point, VisualState};
use crate::gesture::GestureState;
use crate::layout;
use crate::links::{INITIAL_HEAD_OFFSET, LinkStore};
use crate::scoring::{self, ScoreReport};
use crate::surface::{ArrowStyle, Hit, NodeSpec, Surface};

/// Pointer and drag input, as forwarded by the embedder.
#[derive(Clone, PartialEq, Debug)]
pub enum Event {
    /// Double click or double tap.
    DoubleActivate { at: Point },
    PointerMove { at: Point },
    PointerUp { at: Point },
    /// An entity node was dragged; `to` is its new top-left.
    EntityMoved { id: Ident, to: Point },
}

/// One student's food-web session.  Owns the entities, the link model
/// and the gesture state; the surface stays with the embedder.  No
/// globals anywhere, so sessions can coexist.
pub struct Session {
    entities: Vec<Entity>,
    links: LinkStore,
    gesture: GestureState,
    answers: AnswerKey,
    scored: bool,
}

impl Session {
    /// Validate the config, lay the entities out for the given stage
    /// width and materialize their nodes.  An entity whose node the
    /// surface fails to create is skipped (with a loud warning) and
    /// never becomes interactive; the session still comes up.
    pub fn new(config: &Config, stage_width: f64, surface: &mut dyn Surface) -> Result<Session> {
        config.validate()?;

        let positions = layout::grid_positions(stage_width, config.entities.len());
        let mut entities = Vec::with_capacity(config.entities.len());
        for (spec, &(pos, size)) in config.entities.iter().zip(positions.iter()) {
            let node = NodeSpec {
                id: spec.id.clone(),
                src: spec.src.clone(),
                pos,
                size,
                draggable: true,
            };
            match surface.create_node(&node) {
                Ok(()) => entities.push(Entity {
                    id: spec.id.clone(),
                    pos,
                    size,
                }),
                Err(err) => {
                    warn!("failed to create node for '{}': {err}", spec.id);
                }
            }
        }
        surface.redraw();

        Ok(Session {
            entities,
            links: LinkStore::new(),
            gesture: GestureState::Idle,
            answers: config.answer_key(),
            scored: false,
        })
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn links(&self) -> &LinkStore {
        &self.links
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Feed one input event through the state machine.  Everything is
    /// ignored once the session has been scored; the surface has its
    /// listening turned off by then, but a misbehaving embedder cannot
    /// resurrect interaction either way.
    pub fn handle_event(&mut self, event: Event, surface: &mut dyn Surface) {
        if self.scored {
            return;
        }

        match event {
            Event::DoubleActivate { at } => match surface.hit_test(at) {
                Some(Hit::Entity(id)) => self.begin_drawing(&id, surface),
                Some(Hit::Arrow(link)) => self.delete_matching(link, surface),
                None => {}
            },
            Event::PointerMove { at } => {
                if !self.gesture.is_drawing() {
                    return;
                }
                if let Some(link) = self.links.update_preview(at) {
                    surface.upsert_arrow(link.id, link.points.as_array(), ArrowStyle::NEUTRAL);
                    surface.redraw();
                }
            }
            Event::PointerUp { at } => {
                let Some((source, link)) = self.gesture.finish() else {
                    return;
                };
                self.resolve_drawing(&source, link, at, surface);
            }
            Event::EntityMoved { id, to } => self.entity_moved(&id, to, surface),
        }
    }

    fn begin_drawing(&mut self, id: &str, surface: &mut dyn Surface) {
        // a second gesture cannot start until the first resolves
        if self.gesture.is_drawing() {
            return;
        }
        let Some(entity) = self.entity(id) else {
            return;
        };
        let points = ArrowPoints::new(
            entity.center(),
            entity
                .pos
                .offset(INITIAL_HEAD_OFFSET, INITIAL_HEAD_OFFSET),
        );
        if let Some(link) = self.links.begin_pending(id, points) {
            surface.upsert_arrow(link, points.as_array(), ArrowStyle::NEUTRAL);
            surface.redraw();
            self.gesture = GestureState::Drawing {
                source: id.to_string(),
                link,
            };
            debug!("drawing from '{id}' as {link}");
        }
    }

    /// Double activation on a committed arrow deletes the first link
    /// (creation order) with the same endpoints, which under duplicates
    /// is not necessarily the one that was clicked.
    fn delete_matching(&mut self, link: LinkId, surface: &mut dyn Surface) {
        let Some((start, end)) = self.links.get(link).and_then(|l| {
            let end = l.end.clone()?;
            Some((l.start.clone(), end))
        }) else {
            // pending arrows are not deletable
            return;
        };
        if let Some(removed) = self.links.delete_first_matching(&start, &end) {
            surface.remove_arrow(removed);
            surface.redraw();
            debug!("deleted {removed} ('{start}' -> '{end}')");
        }
    }

    fn resolve_drawing(&mut self, source: &str, link: LinkId, at: Point, surface: &mut dyn Surface) {
        let target = match surface.hit_test(at) {
            // releasing over the source would make a self-loop
            Some(Hit::Entity(id)) if id != source => self.entity(&id).cloned(),
            _ => None,
        };

        let source_center = self.entity(source).map(|e| e.center());
        if let (Some(target), Some(source_center)) = (target, source_center) {
            if let Ok(id) = self
                .links
                .commit_pending(&target.id, source_center, target.center())
            {
                if let Some(l) = self.links.get(id) {
                    surface.upsert_arrow(id, l.points.as_array(), ArrowStyle::NEUTRAL);
                }
                surface.redraw();
                return;
            }
        }

        if let Some(id) = self.links.cancel_pending() {
            surface.remove_arrow(id);
        } else {
            surface.remove_arrow(link);
        }
        surface.redraw();
    }

    fn entity_moved(&mut self, id: &str, to: Point, surface: &mut dyn Surface) {
        let center = {
            let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
                return;
            };
            entity.pos = to;
            entity.center()
        };

        let touched = self.links.entity_moved(id, center);
        for link_id in touched.iter() {
            if let Some(l) = self.links.get(*link_id) {
                surface.upsert_arrow(*link_id, l.points.as_array(), ArrowStyle::from(l.visual));
            }
        }
        if !touched.is_empty() {
            surface.redraw();
        }
    }

    /// Check the drawn web against the answer key.  Single-shot: the
    /// session stops listening and a second call fails.  An unresolved
    /// pending link is cancelled first; it could never be committed
    /// afterwards.  Incorrect links are recolored red; correct links
    /// keep their neutral style.
    pub fn evaluate(&mut self, surface: &mut dyn Surface) -> Result<ScoreReport> {
        if self.scored {
            return Err(Error::new(
                ErrorKind::Interaction,
                ErrorCode::AlreadyScored,
                None,
            ));
        }

        self.gesture.finish();
        if let Some(id) = self.links.cancel_pending() {
            surface.remove_arrow(id);
        }

        let report = scoring::score(self.links.committed(), &self.answers);

        let answers = &self.answers;
        for link in self.links.committed_mut() {
            let Some(end) = link.end.as_deref() else {
                continue;
            };
            if answers.find(&link.start, end).is_none() {
                link.visual = VisualState::Incorrect;
                surface.upsert_arrow(link.id, link.points.as_array(), ArrowStyle::ALERT);
            }
        }

        self.scored = true;
        surface.set_listening(false);
        surface.redraw();
        debug!("scored: {}", report.summary().replace('\n', ", "));

        Ok(report)
    }
}
