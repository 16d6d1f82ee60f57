// SPDX-License-Identifier: GPL-3.0-only

//! Label binding keyed by tracking identity
//!
//! A label is drawn from the pool the first time an identity is seen and kept
//! for as long as the sensor keeps reporting that identity as tracked,
//! whichever roster slot it occupies. Identities that stop being reported are
//! forgotten, so a returning body gets a fresh label.

use std::collections::{HashMap, HashSet};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::constants::BODY_COUNT;
use crate::errors::OverlayError;
use crate::source::Body;

pub struct LabelBinder<R = StdRng> {
    pool: Vec<String>,
    bound: HashMap<u64, String>,
    rng: R,
}

impl LabelBinder<StdRng> {
    pub fn new(pool: Vec<String>) -> Result<Self, OverlayError> {
        Self::with_rng(pool, StdRng::from_entropy())
    }
}

impl<R: rand::Rng> LabelBinder<R> {
    /// Create a binder drawing labels with a caller-supplied generator
    pub fn with_rng(pool: Vec<String>, rng: R) -> Result<Self, OverlayError> {
        if pool.is_empty() {
            return Err(OverlayError::EmptyLabelPool);
        }
        Ok(Self {
            pool,
            bound: HashMap::new(),
            rng,
        })
    }

    /// Update bindings from one body frame
    ///
    /// Only the first `BODY_COUNT` roster entries are considered.
    pub fn refresh(&mut self, bodies: &[Body]) {
        if bodies.len() > BODY_COUNT {
            debug!(
                reported = bodies.len(),
                max = BODY_COUNT,
                "Ignoring bodies past the roster size"
            );
        }

        let tracked = || bodies.iter().take(BODY_COUNT).filter(|b| b.is_tracked);
        let present: HashSet<u64> = tracked().map(|b| b.tracking_id).collect();

        self.bound.retain(|id, label| {
            let keep = present.contains(id);
            if !keep {
                debug!(tracking_id = id, label = %label, "Body lost, releasing label");
            }
            keep
        });

        // Draw in roster order
        for id in tracked().map(|b| b.tracking_id) {
            if self.bound.contains_key(&id) {
                continue;
            }
            let Some(label) = self.pool.choose(&mut self.rng).cloned() else {
                continue;
            };
            debug!(tracking_id = id, label = %label, "New body, binding label");
            self.bound.insert(id, label);
        }
    }

    /// Label bound to a tracking identity
    pub fn label_for(&self, tracking_id: u64) -> Option<&str> {
        self.bound.get(&tracking_id).map(String::as_str)
    }

    /// Number of identities currently holding a label
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }
}
