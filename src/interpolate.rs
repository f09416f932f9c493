use serde::{Deserialize, Serialize};

/// What to emit for targets outside the measured range: hold the nearest
/// endpoint's value, or `null` to mark "out of measured range".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    #[default]
    Clamp,
    Null,
}

/// A measured point on the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownPoint {
    pub t: i64,
    pub value: f64,
}

impl KnownPoint {
    pub fn new(t: i64, value: f64) -> KnownPoint {
        KnownPoint { t, value }
    }
}

/// Fill an ordered target axis by linear interpolation between the
/// bracketing known points. Both inputs must be sorted ascending and
/// `known` deduplicated by `t`; the cursor only ever advances, so the
/// scan is linear over both sequences.
pub fn fill(targets: &[i64], known: &[KnownPoint], bounds: BoundsPolicy) -> Vec<(i64, Option<f64>)> {
    let mut out = Vec::with_capacity(targets.len());

    let (Some(first), Some(last)) = (known.first(), known.last()) else {
        return targets.iter().map(|&t| (t, None)).collect();
    };

    let mut cursor = 0usize;
    for &t in targets {
        if t < first.t || t > last.t {
            let y = match bounds {
                BoundsPolicy::Clamp => Some(if t < first.t { first.value } else { last.value }),
                BoundsPolicy::Null => None,
            };
            out.push((t, y));
            continue;
        }

        while cursor + 1 < known.len() && known[cursor + 1].t <= t {
            cursor += 1;
        }

        let prev = known[cursor];
        if prev.t == t {
            out.push((t, Some(prev.value)));
            continue;
        }

        let next = known[cursor + 1];
        let frac = (t - prev.t) as f64 / (next.t - prev.t) as f64;
        out.push((t, Some(prev.value + frac * (next.value - prev.value))));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<KnownPoint> {
        vec![
            KnownPoint::new(0, 10.0),
            KnownPoint::new(10, 20.0),
            KnownPoint::new(20, 10.0),
        ]
    }

    #[test]
    fn interpolates_between_bracketing_points() {
        let filled = fill(&[5], &known(), BoundsPolicy::Clamp);
        assert_eq!(filled, vec![(5, Some(15.0))]);

        let filled = fill(&[15], &known(), BoundsPolicy::Clamp);
        assert_eq!(filled, vec![(15, Some(15.0))]);
    }

    #[test]
    fn exact_hits_return_the_measured_value() {
        let filled = fill(&[0, 10, 20], &known(), BoundsPolicy::Null);
        assert_eq!(
            filled,
            vec![(0, Some(10.0)), (10, Some(20.0)), (20, Some(10.0))]
        );
    }

    #[test]
    fn out_of_range_clamps_or_nulls_by_policy() {
        let filled = fill(&[-5, 25], &known(), BoundsPolicy::Clamp);
        assert_eq!(filled, vec![(-5, Some(10.0)), (25, Some(10.0))]);

        let filled = fill(&[-5, 25], &known(), BoundsPolicy::Null);
        assert_eq!(filled, vec![(-5, None), (25, None)]);
    }

    #[test]
    fn empty_known_points_yield_all_nulls() {
        let filled = fill(&[1, 2], &[], BoundsPolicy::Clamp);
        assert_eq!(filled, vec![(1, None), (2, None)]);
    }

    #[test]
    fn long_target_axis_stays_consistent_with_pairwise_lookup() {
        let known = known();
        let targets: Vec<i64> = (0..=20).collect();
        let filled = fill(&targets, &known, BoundsPolicy::Clamp);
        for (t, y) in filled {
            let expected = if t <= 10 {
                10.0 + (t as f64)
            } else {
                20.0 - (t as f64 - 10.0)
            };
            assert_eq!(y, Some(expected), "target {t}");
        }
    }
}
