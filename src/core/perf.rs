use std::fmt;

/// One page-vitals reading, rounded to whole milliseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerfSample {
    pub name: String,
    pub millis: i64,
}

impl PerfSample {
    /// Build a sample from a performance entry.
    ///
    /// Entries carrying a `value` (layout shifts) report it; the rest report
    /// their duration. Entries without a name fall back to their type.
    /// Non-finite readings are dropped.
    pub fn from_entry(
        name: &str,
        entry_type: &str,
        value: Option<f64>,
        duration: f64,
    ) -> Option<Self> {
        let reading = value.unwrap_or(duration);
        if !reading.is_finite() {
            return None;
        }
        let name = if name.is_empty() { entry_type } else { name };
        Some(Self {
            name: name.to_string(),
            // halves round up
            millis: (reading + 0.5).floor() as i64,
        })
    }
}

impl fmt::Display for PerfSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}ms", self.name, self.millis)
    }
}
