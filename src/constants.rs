// DOM contract shared with the static markup.

// Projects showcase
pub const PROJECTS_ID: &str = "projects";
pub const PROJECTS_BACKDROP_ID: &str = "projects-backdrop";
pub const SECTION_INDEX_ATTR: &str = "data-section-index";
pub const SECTION_DETAIL_ATTR: &str = "data-section-detail";
pub const ACTIVE_CLASS: &str = "is-active";

// Cursor
pub const CURSOR_DOT_ID: &str = "cursor-dot";
pub const CURSOR_TRAIL_ID: &str = "cursor-trail";
pub const INTERACTIVE_SELECTOR: &str =
    "a, button, input, textarea, [role='button'], .cursor-pointer";
pub const TEXT_SELECTOR: &str =
    "h1, h2, h3, h4, h5, h6, p, span, label, div[class*='text-'], li, td, th";
pub const NODE_ID_ATTR: &str = "data-cursor-node"; // stamped on tracked elements

// Contact form
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_SUBMIT_ID: &str = "contact-submit";
pub const CONTACT_STATUS_ID: &str = "contact-status";
pub const CONTACT_FIELD_NAMES: [&str; 3] = ["name", "email", "message"];
pub const SUBMIT_LABEL_IDLE: &str = "Send Message";
pub const SUBMIT_LABEL_BUSY: &str = "Sending...";

// Media and reveal
pub const IMAGE_FALLBACK_SELECTOR: &str = "img[data-fallback]";
pub const IMAGE_LOADING_CLASS: &str = "is-loading";
pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const REVEAL_VISIBLE_CLASS: &str = "visible";
pub const REVEAL_THRESHOLD: f64 = 0.1;

// Page vitals observed in release builds
pub const PERF_ENTRY_TYPES: [&str; 3] = ["largest-contentful-paint", "first-input", "layout-shift"];

// Particle fields
pub const PARTICLES_ATTR: &str = "data-particles";
