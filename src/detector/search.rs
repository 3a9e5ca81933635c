//! Exhaustive translation search of every target over every scan position
//!
//! Trial order is fixed: rows `0..=H`, then columns `0..=W`, then targets in
//! catalog order, where `(W, H)` is the scan size. Both bounds are inclusive,
//! so one column and one row past the last on-pixel are tried as well.

use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::similarity::match_ratio;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::{MatchRecord, Point, SparseImage, Target, TargetCatalog};
use crate::utils::color::{ColorSource, RandomColors};

/// Shared flag for cooperative cancellation, checked once per scan row
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    #[cfg(test)]
    trip_after: Option<Arc<AtomicUsize>>,
}

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that cancels itself on the check after `checks` successful ones
    #[cfg(test)]
    fn tripping_after(checks: usize) -> Self {
        Self {
            flag: Arc::default(),
            trip_after: Some(Arc::new(AtomicUsize::new(checks))),
        }
    }

    /// Request cancellation; rows already in progress finish
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.count_check();
        self.flag.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    fn count_check(&self) {
        if let Some(remaining) = &self.trip_after {
            let counted = remaining.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
            if counted.is_err() {
                self.cancel();
            }
        }
    }

    #[cfg(not(test))]
    fn count_check(&self) {}
}

/// Result of one search run
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    /// Qualifying trials in emission order
    pub matches: Vec<MatchRecord<'a>>,
    /// Wall-clock time of the whole search
    pub elapsed: Duration,
    /// True if the run stopped early; `matches` then covers completed rows only
    pub cancelled: bool,
    /// Anchors examined (each tried against every target)
    pub positions_tried: u64,
}

impl<'a> SearchOutcome<'a> {
    fn empty(elapsed: Duration) -> Self {
        Self {
            matches: Vec::new(),
            elapsed,
            cancelled: false,
            positions_tried: 0,
        }
    }

    /// Number of matches
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True when nothing matched
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord<'a>> {
        self.matches.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    target: usize,
    position: Point,
    ratio: f64,
}

/// Runs searches with a fixed configuration and color source
#[derive(Debug)]
pub struct SearchEngine<C: ColorSource = RandomColors> {
    config: SearchConfig,
    colors: C,
    cancel: Option<CancelToken>,
}

impl SearchEngine<RandomColors> {
    /// Engine with entropy-seeded random colors
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_colors(config, RandomColors::new())
    }
}

impl<C: ColorSource> SearchEngine<C> {
    /// Engine with an explicit color source
    pub fn with_colors(config: SearchConfig, colors: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            colors,
            cancel: None,
        })
    }

    /// Attach a cancellation token
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Try every target at every anchor of `scan` without mutating the catalog.
    ///
    /// Each trial places the pattern with a [`PositionedView`](crate::models::PositionedView),
    /// so rows can run in parallel when the configuration asks for it.
    pub fn find_targets<'a>(
        &mut self,
        scan: &SparseImage,
        catalog: &'a TargetCatalog,
    ) -> SearchOutcome<'a> {
        let start = Instant::now();
        let targets = catalog.all();
        if scan.is_empty() || targets.is_empty() {
            log::debug!(
                "search skipped: scan pixels={}, targets={}",
                scan.len(),
                targets.len()
            );
            return SearchOutcome::empty(start.elapsed());
        }

        let (width, height) = scan.size();
        let threshold = self.config.threshold;
        log::debug!(
            "search start: bounds={}x{} targets={} threshold={} parallel={}",
            width,
            height,
            targets.len(),
            threshold,
            self.config.parallel
        );

        let rows: Vec<Option<Vec<Hit>>> = if self.config.parallel {
            let cancel = self.cancel.clone();
            (0..=height)
                .into_par_iter()
                .map(|y| {
                    if cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                        return None;
                    }
                    Some(scan_row(scan, targets, y, width, threshold))
                })
                .collect()
        } else {
            let mut rows = Vec::with_capacity(height as usize + 1);
            for y in 0..=height {
                if self.is_cancelled() {
                    rows.push(None);
                    break;
                }
                rows.push(Some(scan_row(scan, targets, y, width, threshold)));
            }
            rows
        };

        let completed: Vec<Vec<Hit>> = rows.into_iter().map_while(|row| row).collect();
        let cancelled = completed.len() as u64 != height as u64 + 1;
        let positions_tried = completed.len() as u64 * (width as u64 + 1);
        let hits = completed.into_iter().flatten();

        self.finish(targets, hits, start, cancelled, positions_tried)
    }

    /// Same trial sequence as [`find_targets`](Self::find_targets), but each
    /// target's own pattern is translated in place and its index rebuilt per
    /// trial. Patterns are returned to their decoded position afterwards.
    pub fn find_targets_in_place<'a>(
        &mut self,
        scan: &SparseImage,
        catalog: &'a mut TargetCatalog,
    ) -> Result<SearchOutcome<'a>> {
        let start = Instant::now();
        if scan.is_empty() || catalog.is_empty() {
            return Ok(SearchOutcome::empty(start.elapsed()));
        }

        let (width, height) = scan.size();
        let threshold = self.config.threshold;
        let trials = trial_in_place(scan, catalog, width, height, threshold, self.cancel.as_ref());

        // Restore every pattern even when a trial failed part-way.
        let reset = catalog
            .all_mut()
            .iter_mut()
            .try_for_each(|target| target.pattern_mut().translate_to(0, 0));
        let (hits, rows_done) = trials?;
        reset?;

        let cancelled = rows_done != height as u64 + 1;
        let positions_tried = rows_done * (width as u64 + 1);
        let catalog: &'a TargetCatalog = catalog;
        Ok(self.finish(
            catalog.all(),
            hits.into_iter(),
            start,
            cancelled,
            positions_tried,
        ))
    }

    fn finish<'a>(
        &mut self,
        targets: &'a [Target],
        hits: impl Iterator<Item = Hit>,
        start: Instant,
        cancelled: bool,
        positions_tried: u64,
    ) -> SearchOutcome<'a> {
        let matches: Vec<MatchRecord<'a>> = hits
            .map(|hit| {
                let target = &targets[hit.target];
                log::trace!(
                    "hit: {} @ {}.{} ratio={:.4}",
                    target.name(),
                    hit.position.x,
                    hit.position.y,
                    hit.ratio
                );
                MatchRecord {
                    target,
                    position: hit.position,
                    ratio: hit.ratio,
                    color: self.colors.next_color(),
                }
            })
            .collect();

        let elapsed = start.elapsed();
        if cancelled {
            log::warn!(
                "search cancelled after {} positions, {} matches kept",
                positions_tried,
                matches.len()
            );
        }
        log::debug!(
            "search done: {} matches, {} positions in {:?}",
            matches.len(),
            positions_tried,
            elapsed
        );

        SearchOutcome {
            matches,
            elapsed,
            cancelled,
            positions_tried,
        }
    }
}

fn trial_in_place(
    scan: &SparseImage,
    catalog: &mut TargetCatalog,
    width: u32,
    height: u32,
    threshold: f64,
    cancel: Option<&CancelToken>,
) -> Result<(Vec<Hit>, u64)> {
    let mut hits = Vec::new();
    let mut rows_done = 0u64;

    for y in 0..=height {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            break;
        }
        for x in 0..=width {
            for (i, target) in catalog.all_mut().iter_mut().enumerate() {
                let pattern = target.pattern_mut();
                pattern.translate_to(x, y)?;
                let ratio = match_ratio(scan, &*pattern);
                if ratio >= threshold {
                    hits.push(Hit {
                        target: i,
                        position: Point::new(x, y),
                        ratio,
                    });
                }
            }
        }
        rows_done += 1;
    }
    Ok((hits, rows_done))
}

fn scan_row(scan: &SparseImage, targets: &[Target], y: u32, width: u32, threshold: f64) -> Vec<Hit> {
    let mut hits = Vec::new();
    for x in 0..=width {
        for (i, target) in targets.iter().enumerate() {
            let ratio = match_ratio(scan, &target.pattern().positioned(x, y));
            if ratio >= threshold {
                hits.push(Hit {
                    target: i,
                    position: Point::new(x, y),
                    ratio,
                });
            }
        }
    }
    hits
}
