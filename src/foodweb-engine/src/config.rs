// Copyright 2026 The Foodweb Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::common::{Error, ErrorCode, ErrorKind, Ident, Result};
use crate::datamodel::{AnswerEntry, AnswerKey};

/// One organism icon to place on the stage.  `src` is opaque to the
/// engine; the rendering surface resolves it to an actual image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: Ident,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSpec {
    pub id: i64,
    pub start: Ident,
    pub end: Ident,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub entities: Vec<EntitySpec>,
    pub answers: Vec<AnswerSpec>,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(json).map_err(|err| {
            Error::new(
                ErrorKind::Config,
                ErrorCode::BadConfig,
                Some(err.to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.entities.is_empty() {
            return Err(Error::new(
                ErrorKind::Config,
                ErrorCode::BadConfig,
                Some("no entities".to_string()),
            ));
        }

        let mut entity_ids: HashSet<&str> = HashSet::new();
        for entity in self.entities.iter() {
            if !entity_ids.insert(&entity.id) {
                return Err(Error::new(
                    ErrorKind::Config,
                    ErrorCode::DuplicateEntity,
                    Some(entity.id.clone()),
                ));
            }
        }

        let mut answer_ids: HashSet<i64> = HashSet::new();
        for answer in self.answers.iter() {
            if !answer_ids.insert(answer.id) {
                return Err(Error::new(
                    ErrorKind::Config,
                    ErrorCode::DuplicateAnswer,
                    Some(answer.id.to_string()),
                ));
            }
            for id in [&answer.start, &answer.end] {
                if !entity_ids.contains(id.as_str()) {
                    return Err(Error::new(
                        ErrorKind::Config,
                        ErrorCode::UnknownEntity,
                        Some(id.clone()),
                    ));
                }
            }
            // a self-loop can never be drawn, so it is a key bug
            if answer.start == answer.end {
                return Err(Error::new(
                    ErrorKind::Config,
                    ErrorCode::SelfLoop,
                    Some(answer.start.clone()),
                ));
            }
        }

        Ok(())
    }

    pub fn answer_key(&self) -> AnswerKey {
        AnswerKey::new(
            self.answers
                .iter()
                .map(|a| AnswerEntry {
                    id: a.id,
                    start: a.start.clone(),
                    end: a.end.clone(),
                })
                .collect(),
        )
    }
}
