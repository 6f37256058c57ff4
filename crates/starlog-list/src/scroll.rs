// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scroll-proximity trigger for incremental loading.

use starlog_core::ScrollMetrics;

/// True when at most `threshold_px` of the document remains below the viewport.
pub fn near_bottom(metrics: &ScrollMetrics, threshold_px: u32) -> bool {
    metrics.remaining() <= f64::from(threshold_px)
}
