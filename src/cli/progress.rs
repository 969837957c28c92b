// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Terminal progress bar fed by assembly batches

use crate::assembly::{Progress, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress sink drawing an `indicatif` bar over the tile count.
///
/// The bar is sized from the first batch report, so callers need not plan the
/// layout up front.
pub struct BarProgress {
    bar: ProgressBar,
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tiles ({eta})")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    /// A bar that never draws, for quiet runs
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BarProgress {
    fn batch_completed(&mut self, progress: Progress) {
        self.bar.set_length(progress.total as u64);
        self.bar.set_position(progress.completed as u64);
    }
}
