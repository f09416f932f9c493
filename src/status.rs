use std::fmt;

use serde::Serialize;

/// One status label with the scalar it plots as.
#[derive(Debug, Clone, Serialize)]
pub struct ScaleEntry {
    pub label: String,
    pub value: f64,
}

/// Ordered label → scalar table. The concrete numbers are configuration,
/// not domain law; the constructor only enforces that values strictly
/// increase so every value maps back to exactly one label.
#[derive(Debug, Clone)]
pub struct StatusScale {
    entries: Vec<ScaleEntry>,
}

#[derive(Debug, PartialEq)]
pub enum ScaleError {
    Empty,
    NotIncreasing { label: String },
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleError::Empty => write!(f, "status scale needs at least one entry"),
            ScaleError::NotIncreasing { label } => {
                write!(f, "status scale values must strictly increase at '{label}'")
            }
        }
    }
}

impl std::error::Error for ScaleError {}

impl StatusScale {
    pub fn new<L: Into<String>>(entries: Vec<(L, f64)>) -> Result<StatusScale, ScaleError> {
        if entries.is_empty() {
            return Err(ScaleError::Empty);
        }

        let entries: Vec<ScaleEntry> = entries
            .into_iter()
            .map(|(label, value)| ScaleEntry {
                label: label.into(),
                value,
            })
            .collect();

        for pair in entries.windows(2) {
            if pair[1].value <= pair[0].value {
                return Err(ScaleError::NotIncreasing {
                    label: pair[1].label.clone(),
                });
            }
        }

        Ok(StatusScale { entries })
    }

    /// The table the heatmap legend ships with.
    pub fn default_scale() -> StatusScale {
        StatusScale {
            entries: [
                ("suck", 0.001),
                ("failed", 0.2),
                ("regular", 0.5),
                ("accomplished", 1.0),
                ("excellence", 1.2),
            ]
            .into_iter()
            .map(|(label, value)| ScaleEntry {
                label: label.to_string(),
                value,
            })
            .collect(),
        }
    }

    /// Scalar for a label, matched case-insensitively. Unknown labels are
    /// "no status", not an error.
    pub fn value(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.label.eq_ignore_ascii_case(label))
            .map(|entry| entry.value)
    }

    /// Snap a continuous value to the closest label. Ties go to the first
    /// minimal-distance entry in table order, which is what the slider
    /// editor expects.
    pub fn nearest(&self, value: f64) -> &str {
        let mut best = &self.entries[0];
        let mut best_distance = (best.value - value).abs();
        for entry in &self.entries[1..] {
            let distance = (entry.value - value).abs();
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }
        &best.label
    }

    /// Lowest value in the table, used by the floor fill policy.
    pub fn floor(&self) -> f64 {
        self.entries[0].value
    }

    pub fn entries(&self) -> &[ScaleEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_then_nearest_round_trips_every_label() {
        let scale = StatusScale::default_scale();
        for entry in scale.entries() {
            let value = scale.value(&entry.label).unwrap();
            assert_eq!(scale.nearest(value), entry.label);
        }
    }

    #[test]
    fn value_is_case_insensitive_and_none_for_unknown() {
        let scale = StatusScale::default_scale();
        assert_eq!(scale.value("Accomplished"), Some(1.0));
        assert_eq!(scale.value("FAILED"), Some(0.2));
        assert_eq!(scale.value("meh"), None);
        assert_eq!(scale.value(""), None);
    }

    #[test]
    fn nearest_breaks_ties_in_table_order() {
        let scale = StatusScale::new(vec![("low", 0.0), ("high", 1.0)]).unwrap();
        // 0.5 is equidistant; "low" is declared first
        assert_eq!(scale.nearest(0.5), "low");
        assert_eq!(scale.nearest(0.8), "high");
        assert_eq!(scale.nearest(-2.0), "low");
    }

    #[test]
    fn construction_rejects_reused_or_decreasing_values() {
        let reused = StatusScale::new(vec![("suck", 0.2), ("failed", 0.2)]);
        assert_eq!(
            reused.unwrap_err(),
            ScaleError::NotIncreasing {
                label: "failed".to_string()
            }
        );
        assert!(StatusScale::new(vec![("a", 1.0), ("b", 0.5)]).is_err());
        assert_eq!(
            StatusScale::new(Vec::<(&str, f64)>::new()).unwrap_err(),
            ScaleError::Empty
        );
    }

    #[test]
    fn floor_is_the_first_value() {
        assert_eq!(StatusScale::default_scale().floor(), 0.001);
    }
}
