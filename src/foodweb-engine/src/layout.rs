// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::datamodel::Point;

/// Below this stage width we fall back to the 2-column phone layout.
pub const NARROW_BREAKPOINT: f64 = 640.0;

/// Grid positions for `count` square icons on a stage of the given
/// width.  Returns one `(top_left, size)` per icon, in input order.
/// The stage width is sampled once at session creation; there is no
/// re-layout on resize.
pub fn grid_positions(stage_width: f64, count: usize) -> Vec<(Point, f64)> {
    let padding = 0.05 * stage_width;
    let (columns, size, left_margin) = if stage_width < NARROW_BREAKPOINT {
        (2, 0.3 * stage_width, 0.1 * stage_width)
    } else {
        (3, 0.1 * stage_width, 0.2 * stage_width)
    };

    (0..count)
        .map(|index| {
            let col = (index % columns) as f64;
            let row = (index / columns) as f64;
            let x = left_margin + col * (size + padding) + padding;
            let y = row * (size + padding) + padding;
            (Point::new(x, y), size)
        })
        .collect()
}
