use super::constants::*;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RangeError {
    #[error("breakpoints must be finite and within [0, 1]: {0:?}")]
    OutOfBounds([f32; 4]),
    #[error("breakpoints must be non-decreasing: {0:?}")]
    Unordered([f32; 4]),
    #[error("range table has no sections")]
    Empty,
    #[error("section {index} starts before the section preceding it")]
    StartsOutOfOrder { index: usize },
    #[error("hold window of section {index} overlaps the previous section's hold window")]
    OverlappingHold { index: usize },
    #[error("keyframes need matching, non-empty stops and values ({stops} stops, {values} values)")]
    KeyframeShape { stops: usize, values: usize },
    #[error("keyframe stops must be finite and strictly increasing")]
    KeyframesUnordered,
}

/// Normalized scroll position of a container relative to the viewport.
///
/// `viewport_top - container_top` is how far the container has scrolled past
/// the top of the viewport; the result is that distance over the scrollable
/// span, clamped to \[0, 1\]. A container no taller than the viewport reads 0
/// until its top passes the viewport top and 1 afterwards.
pub fn scroll_progress(
    viewport_top: f64,
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
) -> f32 {
    let scrolled = viewport_top - container_top;
    let span = container_height - viewport_height;
    if !scrolled.is_finite() || !span.is_finite() {
        return 0.0;
    }
    if span <= 0.0 {
        return if scrolled > 0.0 { 1.0 } else { 0.0 };
    }
    (scrolled / span).clamp(0.0, 1.0) as f32
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

// Position of x between a and b as a fraction; a collapsed span counts as fully traversed.
#[inline]
fn fraction(x: f32, a: f32, b: f32) -> f32 {
    if b <= a {
        1.0
    } else {
        ((x - a) / (b - a)).clamp(0.0, 1.0)
    }
}

/// Breakpoints for one showcased item: it fades in over `[start, peak_start)`,
/// holds over `[peak_start, peak_end]` and fades out over `(peak_end, end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionRange {
    start: f32,
    peak_start: f32,
    peak_end: f32,
    end: f32,
}

impl SectionRange {
    pub fn new(start: f32, peak_start: f32, peak_end: f32, end: f32) -> Result<Self, RangeError> {
        let bp = [start, peak_start, peak_end, end];
        if bp.iter().any(|v| !v.is_finite() || *v < 0.0 || *v > 1.0) {
            return Err(RangeError::OutOfBounds(bp));
        }
        if bp.windows(2).any(|w| w[0] > w[1]) {
            return Err(RangeError::Unordered(bp));
        }
        Ok(Self {
            start,
            peak_start,
            peak_end,
            end,
        })
    }

    pub fn from_breakpoints(bp: [f32; 4]) -> Result<Self, RangeError> {
        Self::new(bp[0], bp[1], bp[2], bp[3])
    }

    pub fn start(&self) -> f32 {
        self.start
    }
    pub fn peak_start(&self) -> f32 {
        self.peak_start
    }
    pub fn peak_end(&self) -> f32 {
        self.peak_end
    }
    pub fn end(&self) -> f32 {
        self.end
    }

    /// True while any part of the section may be visible.
    pub fn contains(&self, progress: f32) -> bool {
        progress >= self.start && progress <= self.end
    }

    /// True inside the hold window, where the section is fully visible.
    pub fn holds(&self, progress: f32) -> bool {
        progress >= self.peak_start && progress <= self.peak_end
    }

    /// Half-open `[enter, exit)` window in which the section counts as active.
    ///
    /// The hold window is trimmed by `margin` on both sides; the margin is
    /// capped at half the hold width so the window never inverts.
    pub fn active_window(&self, margin: f32) -> (f32, f32) {
        let half = (self.peak_end - self.peak_start) * 0.5;
        let m = margin.clamp(0.0, half);
        (self.peak_start + m, self.peak_end - m)
    }
}

/// Interpolation rule shared by every section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Vertical travel while fading in (+travel → 0) and out (0 → -travel).
    pub travel: f32,
    /// Scale outside the hold window.
    pub rest_scale: f32,
    /// Fraction of the hold window across which scale eases from `rest_scale` to 1.
    pub scale_window: f32,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            travel: SECTION_TRAVEL,
            rest_scale: SECTION_REST_SCALE,
            scale_window: SECTION_SCALE_WINDOW,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionVisualState {
    pub offset_y: f32,
    pub opacity: f32,
    pub scale: f32,
}

/// Piecewise-linear visual state of one section at `progress`.
pub fn visual_state(range: &SectionRange, progress: f32, rule: &Transition) -> SectionVisualState {
    let p = progress;
    if p < range.start {
        return SectionVisualState {
            offset_y: rule.travel,
            opacity: 0.0,
            scale: rule.rest_scale,
        };
    }
    if p > range.end {
        return SectionVisualState {
            offset_y: -rule.travel,
            opacity: 0.0,
            scale: rule.rest_scale,
        };
    }
    if p < range.peak_start {
        let t = fraction(p, range.start, range.peak_start);
        return SectionVisualState {
            offset_y: rule.travel * (1.0 - t),
            opacity: t,
            scale: rule.rest_scale,
        };
    }
    if p <= range.peak_end {
        let window = (range.peak_end - range.peak_start) * rule.scale_window.clamp(0.0, 1.0);
        let t = fraction(p, range.peak_start, range.peak_start + window);
        return SectionVisualState {
            offset_y: 0.0,
            opacity: 1.0,
            scale: rule.rest_scale + (1.0 - rule.rest_scale) * smoothstep(t),
        };
    }
    let t = fraction(p, range.peak_end, range.end);
    SectionVisualState {
        offset_y: -rule.travel * t,
        opacity: 1.0 - t,
        scale: 1.0,
    }
}

/// Ordered, validated list of section ranges.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeTable {
    ranges: SmallVec<[SectionRange; 4]>,
}

impl RangeTable {
    pub fn new(ranges: impl IntoIterator<Item = SectionRange>) -> Result<Self, RangeError> {
        let ranges: SmallVec<[SectionRange; 4]> = ranges.into_iter().collect();
        if ranges.is_empty() {
            return Err(RangeError::Empty);
        }
        for (i, pair) in ranges.windows(2).enumerate() {
            let index = i + 1;
            if pair[1].start < pair[0].start {
                return Err(RangeError::StartsOutOfOrder { index });
            }
            if pair[1].peak_start < pair[0].peak_end {
                return Err(RangeError::OverlappingHold { index });
            }
        }
        Ok(Self { ranges })
    }

    pub fn from_breakpoints(breakpoints: &[[f32; 4]]) -> Result<Self, RangeError> {
        let ranges = breakpoints
            .iter()
            .map(|bp| SectionRange::from_breakpoints(*bp))
            .collect::<Result<SmallVec<[SectionRange; 4]>, _>>()?;
        Self::new(ranges)
    }

    /// Breakpoints used by the Projects showcase.
    pub fn showcase() -> Result<Self, RangeError> {
        Self::from_breakpoints(&SHOWCASE_BREAKPOINTS)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SectionRange> {
        self.ranges.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionRange> {
        self.ranges.iter()
    }

    /// Section whose active window contains `progress`, if any.
    pub fn section_at(&self, progress: f32, margin: f32) -> Option<usize> {
        self.ranges.iter().position(|r| {
            let (enter, exit) = r.active_window(margin);
            progress >= enter && progress < exit
        })
    }
}

/// Stateful active-section selection with hand-off hysteresis.
///
/// Between two active windows the previously selected index is kept, so
/// sub-pixel jitter around a boundary cannot make the selection flicker.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSectionSelector {
    margin: f32,
    current: usize,
}

impl ActiveSectionSelector {
    pub fn new(margin: f32) -> Self {
        Self {
            margin: margin.max(0.0),
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn select(&mut self, table: &RangeTable, progress: f32) -> usize {
        let last = table.len().saturating_sub(1);
        if let Some(i) = table.section_at(progress, self.margin) {
            self.current = i;
        } else if let (Some(first), Some(final_range)) = (table.get(0), table.get(last)) {
            let (first_enter, _) = first.active_window(self.margin);
            let (_, last_exit) = final_range.active_window(self.margin);
            if progress < first_enter {
                self.current = 0;
            } else if progress >= last_exit {
                self.current = last;
            }
        }
        self.current = self.current.min(last);
        self.current
    }
}

impl Default for ActiveSectionSelector {
    fn default() -> Self {
        Self::new(ACTIVE_HANDOFF_MARGIN)
    }
}

/// Piecewise-linear mapping from increasing input stops to output values.
///
/// Inputs below the first stop or above the last clamp to the end values.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes {
    stops: SmallVec<[(f32, f32); 4]>,
}

impl Keyframes {
    pub fn new(stops: &[f32], values: &[f32]) -> Result<Self, RangeError> {
        if stops.is_empty() || stops.len() != values.len() {
            return Err(RangeError::KeyframeShape {
                stops: stops.len(),
                values: values.len(),
            });
        }
        if stops.iter().chain(values).any(|v| !v.is_finite())
            || stops.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(RangeError::KeyframesUnordered);
        }
        Ok(Self {
            stops: stops.iter().copied().zip(values.iter().copied()).collect(),
        })
    }

    pub fn sample(&self, x: f32) -> f32 {
        let (first_x, first_y) = self.stops[0];
        if x <= first_x {
            return first_y;
        }
        for pair in self.stops.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                return y0 + (y1 - y0) * fraction(x, x0, x1);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackdropState {
    pub offset_y: f32,
    pub opacity: f32,
}

/// Everything the view needs to paint one scroll position.
#[derive(Clone, Debug, PartialEq)]
pub struct SequencerFrame {
    pub progress: f32,
    pub active: usize,
    pub active_changed: bool,
    pub sections: SmallVec<[SectionVisualState; 4]>,
    pub backdrop: BackdropState,
}

/// Owns the progress value and derives per-section visuals and the active index.
pub struct ScrollSequencer {
    table: RangeTable,
    rule: Transition,
    selector: ActiveSectionSelector,
    backdrop_offset: Keyframes,
    backdrop_opacity: Keyframes,
    progress: f32,
}

impl ScrollSequencer {
    pub fn new(
        table: RangeTable,
        rule: Transition,
        handoff_margin: f32,
    ) -> Result<Self, RangeError> {
        Ok(Self {
            table,
            rule,
            selector: ActiveSectionSelector::new(handoff_margin),
            backdrop_offset: Keyframes::new(&BACKDROP_OFFSET_STOPS, &BACKDROP_OFFSET_VALUES)?,
            backdrop_opacity: Keyframes::new(&BACKDROP_OPACITY_STOPS, &BACKDROP_OPACITY_VALUES)?,
            progress: 0.0,
        })
    }

    /// Sequencer for the Projects showcase with default tuning.
    pub fn showcase() -> Result<Self, RangeError> {
        Self::new(RangeTable::showcase()?, Transition::default(), ACTIVE_HANDOFF_MARGIN)
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn active(&self) -> usize {
        self.selector.current()
    }

    pub fn table(&self) -> &RangeTable {
        &self.table
    }

    pub fn update(&mut self, progress: f32) -> SequencerFrame {
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.progress = p;
        let before = self.selector.current();
        let active = self.selector.select(&self.table, p);
        if active != before {
            log::debug!("[scroll] active section {} -> {} at {:.3}", before, active, p);
        }
        SequencerFrame {
            progress: p,
            active,
            active_changed: active != before,
            sections: self
                .table
                .iter()
                .map(|r| visual_state(r, p, &self.rule))
                .collect(),
            backdrop: BackdropState {
                offset_y: self.backdrop_offset.sample(p),
                opacity: self.backdrop_opacity.sample(p),
            },
        }
    }
}
