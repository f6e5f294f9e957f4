// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeSet;

use crate::datamodel::{AnswerKey, Link};

/// The outcome of checking the drawn web against the answer key.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ScoreReport {
    /// Answer-key ids matched at least once; duplicates of the same
    /// correct link count once.
    pub matched: BTreeSet<i64>,
    /// Committed links with no counterpart in the key.  Every one
    /// counts, including duplicates.
    pub incorrect: usize,
}

impl ScoreReport {
    pub fn correct(&self) -> usize {
        self.matched.len()
    }

    /// Correct minus incorrect; may be negative.
    pub fn final_score(&self) -> i64 {
        self.matched.len() as i64 - self.incorrect as i64
    }

    pub fn summary(&self) -> String {
        format!(
            "Correct: {}\nIncorrect: {}\nFinal Score: {}",
            self.correct(),
            self.incorrect,
            self.final_score()
        )
    }
}

/// Score a set of committed links against the answer key.  Pending
/// links never reach this function.  The result is independent of the
/// order the links were drawn in.
pub fn score<'a>(links: impl IntoIterator<Item = &'a Link>, key: &AnswerKey) -> ScoreReport {
    let mut report = ScoreReport::default();
    for link in links {
        let Some(ref end) = link.end else {
            continue;
        };
        match key.find(&link.start, end) {
            Some(answer_id) => {
                report.matched.insert(answer_id);
            }
            None => {
                report.incorrect += 1;
            }
        }
    }
    report
}
