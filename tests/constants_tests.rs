// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn section_tuning_is_within_reasonable_bounds() {
    assert!(SECTION_TRAVEL > 0.0);
    assert!(SECTION_REST_SCALE > 0.0 && SECTION_REST_SCALE < 1.0);
    assert!(SECTION_SCALE_WINDOW > 0.0 && SECTION_SCALE_WINDOW <= 1.0);
    assert!(ACTIVE_HANDOFF_MARGIN >= 0.0 && ACTIVE_HANDOFF_MARGIN < 0.1);
}

#[test]
fn showcase_breakpoints_are_ordered() {
    for bp in SHOWCASE_BREAKPOINTS {
        assert!(bp.iter().all(|v| (0.0..=1.0).contains(v)), "{bp:?}");
        assert!(bp.windows(2).all(|w| w[0] <= w[1]), "{bp:?}");
    }
    for pair in SHOWCASE_BREAKPOINTS.windows(2) {
        // neighbours may cross-fade but never hold at the same time
        assert!(pair[1][1] >= pair[0][2]);
        assert!(pair[1][0] >= pair[0][0]);
    }
    assert_eq!(SHOWCASE_BREAKPOINTS[0][0], 0.0);
    assert_eq!(SHOWCASE_BREAKPOINTS[SHOWCASE_BREAKPOINTS.len() - 1][3], 1.0);
}

#[test]
fn backdrop_keyframes_are_well_formed() {
    assert_eq!(BACKDROP_OFFSET_STOPS.len(), BACKDROP_OFFSET_VALUES.len());
    assert_eq!(BACKDROP_OPACITY_STOPS.len(), BACKDROP_OPACITY_VALUES.len());
    assert!(BACKDROP_OFFSET_STOPS.windows(2).all(|w| w[0] < w[1]));
    assert!(BACKDROP_OPACITY_STOPS.windows(2).all(|w| w[0] < w[1]));
    assert!(BACKDROP_OPACITY_VALUES.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cursor_constants_have_logical_relationships() {
    // the dot reacts faster than the trailing ring
    assert!(
        CURSOR_DOT_STIFFNESS / CURSOR_DOT_MASS > CURSOR_TRAIL_STIFFNESS / CURSOR_TRAIL_MASS
    );
    assert!(CURSOR_TRAIL_OFFSET > CURSOR_DOT_OFFSET);

    // text hover is the bigger lens
    assert!(CURSOR_DOT_SCALE_TEXT > CURSOR_DOT_SCALE_INTERACTIVE);
    assert!(CURSOR_TRAIL_SCALE_TEXT > CURSOR_TRAIL_SCALE_INTERACTIVE);
    assert!(CURSOR_DOT_SCALE_INTERACTIVE > 1.0 && CURSOR_TRAIL_SCALE_INTERACTIVE > 1.0);

    assert!(CURSOR_TRAIL_OPACITY_TEXT > CURSOR_TRAIL_OPACITY_IDLE);
    assert!(CURSOR_TRAIL_OPACITY_TEXT <= 1.0 && CURSOR_TRAIL_OPACITY_IDLE > 0.0);
    assert!(CURSOR_MAX_STEP_SEC > 0.0 && CURSOR_MAX_STEP_SEC < 0.1);
}

#[test]
fn contact_constants() {
    assert_eq!(STATUS_DISMISS_AFTER.as_secs(), 5);
    assert!(CONTACT_RECIPIENT.contains('@'));
    assert_eq!(CONTACT_FIELD_NAMES, ["name", "email", "message"]);
    assert_ne!(SUBMIT_LABEL_IDLE, SUBMIT_LABEL_BUSY);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn dom_contract_is_consistent() {
    for id in [
        PROJECTS_ID,
        PROJECTS_BACKDROP_ID,
        CURSOR_DOT_ID,
        CURSOR_TRAIL_ID,
        CONTACT_FORM_ID,
        CONTACT_SUBMIT_ID,
        CONTACT_STATUS_ID,
    ] {
        assert!(!id.is_empty() && !id.contains(' '), "bad id {id:?}");
    }
    for attr in [SECTION_INDEX_ATTR, SECTION_DETAIL_ATTR, NODE_ID_ATTR, PARTICLES_ATTR] {
        assert!(attr.starts_with("data-"), "{attr}");
    }
    assert!(REVEAL_THRESHOLD > 0.0 && REVEAL_THRESHOLD < 1.0);
    assert!(INTERACTIVE_SELECTOR.contains("button"));
    assert!(TEXT_SELECTOR.contains('p'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn particle_constants() {
    assert_eq!(PARTICLE_COUNT, 15);
    assert!(SCATTER_DURATION_MIN_SEC > 0.0 && SCATTER_DURATION_SPAN_SEC > 0.0);
    assert!(SCATTER_DELAY_MAX_SEC >= 0.0);
    assert!((GOLDEN_ANGLE_DEG - 137.508).abs() < 1e-3);
}

#[test]
fn perf_entry_types_cover_page_vitals() {
    assert_eq!(PERF_ENTRY_TYPES.len(), 3);
    assert!(PERF_ENTRY_TYPES.contains(&"largest-contentful-paint"));
    assert!(PERF_ENTRY_TYPES.contains(&"first-input"));
    assert!(PERF_ENTRY_TYPES.contains(&"layout-shift"));
}
