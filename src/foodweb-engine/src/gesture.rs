// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::Ident;
use crate::datamodel::LinkId;

/// The per-gesture drawing state.  Move and release events are only
/// consumed while `Drawing`; entering `Idle` tears the listeners down.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing {
        source: Ident,
        link: LinkId,
    },
}

impl GestureState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, GestureState::Drawing { .. })
    }

    /// Leave `Drawing`, yielding the gesture's source and link.
    pub fn finish(&mut self) -> Option<(Ident, LinkId)> {
        match std::mem::take(self) {
            GestureState::Idle => None,
            GestureState::Drawing { source, link } => Some((source, link)),
        }
    }
}
