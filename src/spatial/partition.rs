//! Row partitioning for one generation advance.
//!
//! A partition is a half-open row range `[start, end)`. A valid plan covers
//! `[0, height)` exactly once, in order, with no empty ranges.

use std::ops::Range;

use crate::core::{LifeError, LifeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    pub start: u32,
    pub end: u32,
}

impl Partition {
    #[inline]
    pub fn rows(&self) -> Range<u32> {
        self.start..self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Split `[0, height)` into `min(parts, height)` near-equal ranges; the first
/// `height % n` ranges take one extra row.
pub fn partition_rows(height: u32, parts: usize) -> Vec<Partition> {
    if height == 0 {
        return Vec::new();
    }
    let n = parts.clamp(1, height as usize) as u32;
    let base = height / n;
    let extra = height % n;

    let mut start = 0u32;
    (0..n)
        .map(|i| {
            let len = base + u32::from(i < extra);
            let partition = Partition {
                index: i as usize,
                start,
                end: start + len,
            };
            start += len;
            partition
        })
        .collect()
}

/// Check that `partitions` tile `[0, height)` exactly once.
pub fn verify_coverage(partitions: &[Partition], height: u32) -> LifeResult<()> {
    let mut expected = 0u32;
    for p in partitions {
        if p.is_empty() {
            return Err(LifeError::CoverageViolation(format!(
                "partition {} is empty ({}..{})",
                p.index, p.start, p.end
            )));
        }
        if p.start > expected {
            return Err(LifeError::CoverageViolation(format!(
                "rows {}..{} are not covered",
                expected, p.start
            )));
        }
        if p.start < expected {
            return Err(LifeError::CoverageViolation(format!(
                "partition {} overlaps rows {}..{}",
                p.index, p.start, expected
            )));
        }
        expected = p.end;
    }
    if expected != height {
        return Err(LifeError::CoverageViolation(format!(
            "rows {}..{} are not covered",
            expected, height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_is_covered_exactly_once() {
        for height in 1..=40u32 {
            for parts in 1..=48usize {
                let plan = partition_rows(height, parts);
                assert_eq!(plan.len(), parts.min(height as usize));
                verify_coverage(&plan, height)
                    .unwrap_or_else(|e| panic!("height {height}, parts {parts}: {e}"));

                let mut hits = vec![0u8; height as usize];
                for p in &plan {
                    for row in p.rows() {
                        hits[row as usize] += 1;
                    }
                }
                assert!(hits.iter().all(|&h| h == 1));
            }
        }
    }

    #[test]
    fn sizes_differ_by_at_most_one() {
        let plan = partition_rows(10, 4);
        let sizes: Vec<usize> = plan.iter().map(Partition::len).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
    }

    #[test]
    fn zero_parts_means_one() {
        let plan = partition_rows(5, 0);
        assert_eq!(plan, vec![Partition { index: 0, start: 0, end: 5 }]);
    }

    #[test]
    fn detects_gaps() {
        let plan = [
            Partition { index: 0, start: 0, end: 2 },
            Partition { index: 1, start: 3, end: 5 },
        ];
        assert!(matches!(verify_coverage(&plan, 5), Err(LifeError::CoverageViolation(_))));
    }

    #[test]
    fn detects_overlaps() {
        let plan = [
            Partition { index: 0, start: 0, end: 3 },
            Partition { index: 1, start: 2, end: 5 },
        ];
        assert!(matches!(verify_coverage(&plan, 5), Err(LifeError::CoverageViolation(_))));
    }

    #[test]
    fn detects_short_and_long_plans() {
        let short = [Partition { index: 0, start: 0, end: 4 }];
        assert!(verify_coverage(&short, 5).is_err());
        let long = [Partition { index: 0, start: 0, end: 6 }];
        assert!(verify_coverage(&long, 5).is_err());
        assert!(verify_coverage(&[], 1).is_err());
    }
}
