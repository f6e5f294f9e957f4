// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
pub mod config;
pub mod datamodel;
pub mod gesture;
pub mod layout;
pub mod links;
pub mod scoring;
pub mod session;
pub mod surface;

#[cfg(test)]
mod testutils;

pub use self::common::{Error, ErrorCode, ErrorKind, Ident, Result};
pub use self::config::Config;
pub use self::datamodel::{AnswerKey, Entity, Link, LinkId, Point, VisualState};
pub use self::scoring::ScoreReport;
pub use self::session::{Event, Session};
pub use self::surface::{ArrowStyle, Color, Hit, NodeSpec, Surface};
