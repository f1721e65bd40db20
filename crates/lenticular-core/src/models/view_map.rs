//! Pixel-column → (lens, view) assignment.
//!
//! Each (optionally upsampled) pixel column sits under exactly one lenslet.
//! Its position inside that lenslet decides which of the `angular_res` views
//! the column has to show so that the lens refracts it towards the matching
//! viewing angle. An interlacing shader consumes this table (or recomputes it
//! from the same parameters) to weave N view images into one framebuffer.

use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{LenticularSheet, LightfieldResolution, ScreenGeometry};
use crate::{ConfigurationError, Real};

/// How a raw view index outside `[1, angular_res]` is brought back into range.
///
/// The raw index can only leave the range at the trailing edge of a lens,
/// where it evaluates to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewIndexPolicy {
    /// Clamp into `[1, angular_res]`.
    #[default]
    Clamp,
    /// Wrap cyclically into `[1, angular_res]`.
    Wrap,
}

impl ViewIndexPolicy {
    /// Apply the policy to a raw view index.
    ///
    /// With `angular_res == 0` no view is addressable and `0` is returned.
    pub fn apply(self, raw: i64, angular_res: u32) -> i64 {
        let n = i64::from(angular_res);
        if n == 0 {
            return 0;
        }
        match self {
            ViewIndexPolicy::Clamp => raw.clamp(1, n),
            ViewIndexPolicy::Wrap => (raw - 1).rem_euclid(n) + 1,
        }
    }
}

/// Lens and view assignment of one pixel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewMapEntry {
    /// Column index in the upsampled pixel grid.
    pub column: usize,
    /// 1-based index of the lens above the column.
    pub lens: i64,
    /// View index the column displays.
    pub view: i64,
    /// `true` iff `lens` is one of the `spatial_res` lenses on the screen.
    pub valid: bool,
}

/// Stateless generator of [`ViewMapEntry`] values.
///
/// Entries are derived independently per column, so the mapper can be
/// iterated any number of times or queried at random positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMapper {
    /// Distance between upsampled column centres in millimeters.
    column_pitch: Real,
    lens_width: Real,
    offset: Real,
    spatial_res: u32,
    angular_res: u32,
    upscale: u32,
    columns: usize,
    policy: ViewIndexPolicy,
}

impl ViewMapper {
    /// Prepare a mapper over `upscale * h_res` columns with the default policy.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ZeroUpscale`] when `upscale == 0`.
    pub fn new(
        screen: &ScreenGeometry,
        sheet: &LenticularSheet,
        lightfield: &LightfieldResolution,
        upscale: u32,
    ) -> Result<Self, ConfigurationError> {
        if upscale == 0 {
            return Err(ConfigurationError::ZeroUpscale(upscale));
        }

        Ok(Self {
            column_pitch: 1.0 / (Real::from(upscale) * screen.dots_per_mm),
            lens_width: sheet.lens_width,
            offset: sheet.offset,
            spatial_res: lightfield.spatial_res,
            angular_res: lightfield.angular_res,
            upscale,
            columns: upscale as usize * screen.h_res as usize,
            policy: ViewIndexPolicy::default(),
        })
    }

    /// Replace the policy used for out-of-range view indices.
    pub fn with_policy(mut self, policy: ViewIndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ViewIndexPolicy {
        self.policy
    }

    pub fn upscale(&self) -> u32 {
        self.upscale
    }

    /// Number of entries, `upscale * h_res`.
    pub fn len(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0
    }

    /// Centre of an upsampled column along the screen width, in millimeters.
    pub fn pixel_center(&self, column: usize) -> Real {
        column as Real * self.column_pitch + 0.5 * self.column_pitch
    }

    /// Compute the entry for a single column.
    ///
    /// The lens is `floor(1 + pos / w)` for the column centre `pos` shifted by
    /// the sheet offset. The view falls linearly from `angular_res` at the
    /// leading edge of the lens to `1` at its trailing edge, centred on
    /// `(angular_res + 1) / 2` in real arithmetic so even view counts stay
    /// symmetric.
    pub fn entry(&self, column: usize) -> ViewMapEntry {
        let w = self.lens_width;
        let pos = self.pixel_center(column) - w * self.offset;

        let lens = (1.0 + pos / w).floor();
        let residual = pos - w * lens + 0.5 * w;

        let a = Real::from(self.angular_res);
        let raw_view = (-a / w * residual + 0.5 * (a + 1.0)).trunc() as i64;

        let lens = lens as i64;
        ViewMapEntry {
            column,
            lens,
            view: self.policy.apply(raw_view, self.angular_res),
            valid: lens_in_range(lens, self.spatial_res),
        }
    }

    pub fn iter(&self) -> ViewMapIter<'_> {
        ViewMapIter {
            mapper: self,
            columns: 0..self.columns,
        }
    }

    /// Collect every entry into an owned table.
    pub fn build(&self) -> ViewMap {
        let entries: Vec<ViewMapEntry> = self.iter().collect();
        debug!(
            "view map: {} columns (upscale {}), {} valid, policy {:?}",
            entries.len(),
            self.upscale,
            entries.iter().filter(|e| e.valid).count(),
            self.policy
        );
        ViewMap {
            upscale: self.upscale,
            policy: self.policy,
            entries,
        }
    }
}

/// `true` iff the 1-based lens index addresses one of the screen's lenses.
pub fn lens_in_range(lens: i64, spatial_res: u32) -> bool {
    lens >= 1 && lens <= i64::from(spatial_res)
}

/// Iterator over the entries of a [`ViewMapper`].
#[derive(Debug, Clone)]
pub struct ViewMapIter<'a> {
    mapper: &'a ViewMapper,
    columns: Range<usize>,
}

impl Iterator for ViewMapIter<'_> {
    type Item = ViewMapEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.columns.next().map(|c| self.mapper.entry(c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.columns.size_hint()
    }
}

impl DoubleEndedIterator for ViewMapIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.columns.next_back().map(|c| self.mapper.entry(c))
    }
}

impl ExactSizeIterator for ViewMapIter<'_> {}

/// Eagerly computed view-assignment table, ordered by column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewMap {
    pub upscale: u32,
    pub policy: ViewIndexPolicy,
    pub entries: Vec<ViewMapEntry>,
}

impl ViewMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<&ViewMapEntry> {
        self.entries.get(column)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViewMapEntry> {
        self.entries.iter()
    }

    /// Number of columns that sit under an addressable lens.
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }
}

impl<'a> IntoIterator for &'a ViewMap {
    type Item = &'a ViewMapEntry;
    type IntoIter = std::slice::Iter<'a, ViewMapEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(offset: Real, upscale: u32) -> ViewMapper {
        let screen = ScreenGeometry::compute(1024, 768, 15.4).unwrap();
        let sheet = LenticularSheet::compute(30.0, offset, 5.0).unwrap();
        let lf = LightfieldResolution::compute(&screen, &sheet);
        ViewMapper::new(&screen, &sheet, &lf, upscale).unwrap()
    }

    #[test]
    fn one_entry_per_upsampled_column() {
        assert_eq!(mapper(0.5, 1).build().len(), 1024);
        assert_eq!(mapper(0.5, 4).iter().len(), 4096);
    }

    #[test]
    fn first_columns_of_reference_display() {
        let m = mapper(0.5, 1);
        // Centre 0.1528mm, shifted by half a lens → still left of lens 1.
        let e = m.entry(0);
        assert_eq!(e.lens, 0);
        assert_eq!(e.view, 1);
        assert!(!e.valid);

        let e = m.entry(2);
        assert_eq!(e.lens, 1);
        assert!(e.valid);
    }

    #[test]
    fn validity_boundaries() {
        let m = mapper(0.5, 1);
        assert!(m.iter().any(|e| e.lens == 0));
        assert!(m.iter().filter(|e| e.lens == 0).all(|e| !e.valid));

        // Without offset the last columns run past the final lens.
        let m = mapper(0.0, 1);
        let spatial = 369;
        let past_end: Vec<_> = m.iter().filter(|e| e.lens == spatial + 1).collect();
        assert!(!past_end.is_empty());
        assert!(past_end.iter().all(|e| !e.valid));
        assert!(m.iter().filter(|e| e.lens == spatial).all(|e| e.valid));
    }

    #[test]
    fn lens_in_range_is_inclusive() {
        assert!(!lens_in_range(0, 10));
        assert!(lens_in_range(1, 10));
        assert!(lens_in_range(10, 10));
        assert!(!lens_in_range(11, 10));
        assert!(!lens_in_range(1, 0));
    }

    #[test]
    fn view_indices_stay_in_range_for_both_policies() {
        for policy in [ViewIndexPolicy::Clamp, ViewIndexPolicy::Wrap] {
            let m = mapper(0.3, 3).with_policy(policy);
            assert!(m.iter().all(|e| (1..=3).contains(&e.view)), "{policy:?}");
        }
    }

    #[test]
    fn policy_handles_trailing_edge() {
        assert_eq!(ViewIndexPolicy::Clamp.apply(0, 3), 1);
        assert_eq!(ViewIndexPolicy::Wrap.apply(0, 3), 3);
        assert_eq!(ViewIndexPolicy::Clamp.apply(2, 3), 2);
        assert_eq!(ViewIndexPolicy::Wrap.apply(4, 3), 1);
        assert_eq!(ViewIndexPolicy::Clamp.apply(1, 0), 0);
    }

    #[test]
    fn iteration_is_restartable() {
        let m = mapper(0.5, 2);
        let a: Vec<_> = m.iter().collect();
        let b: Vec<_> = m.iter().collect();
        assert_eq!(a, b);

        let back: Vec<_> = m.iter().rev().take(3).collect();
        assert_eq!(back[0], m.entry(m.len() - 1));
    }

    #[test]
    fn zero_upscale_is_rejected() {
        let screen = ScreenGeometry::compute(1024, 768, 15.4).unwrap();
        let sheet = LenticularSheet::compute(30.0, 0.5, 5.0).unwrap();
        let lf = LightfieldResolution::compute(&screen, &sheet);
        assert_eq!(
            ViewMapper::new(&screen, &sheet, &lf, 0),
            Err(ConfigurationError::ZeroUpscale(0))
        );
    }

    #[test]
    fn even_view_count_reaches_every_view() {
        let screen = ScreenGeometry::compute(1024, 768, 15.4).unwrap();
        let sheet = LenticularSheet::compute(20.0, 0.0, 5.0).unwrap();
        let lf = LightfieldResolution::compute(&screen, &sheet);
        assert_eq!(lf.angular_res, 4);

        let m = ViewMapper::new(&screen, &sheet, &lf, 1).unwrap();
        // Column 0 sits 0.48mm before its lens centre: raw view 4.02 → 4.
        // A centre of (4 + 1) / 2 rounded down to 2 would give 3 here.
        assert_eq!(m.entry(0).view, 4);

        let mut seen: Vec<i64> = m.iter().filter(|e| e.valid).map(|e| e.view).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }
}
