use serde::{Deserialize, Serialize};

use crate::bucket::Bucket;
use crate::status::StatusScale;

/// What to plot for an activity/date cell with no record. `Null` leaves a
/// gap the chart renders as "no status"; `Floor` backfills with the
/// scale's lowest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    #[default]
    Null,
    Floor,
}

/// Which axis becomes the series set. `Activity` yields one series per
/// activity over the date axis; `Date` is the transpose, one series per
/// date over the activity axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Activity,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: String,
    pub y: Option<f64>,
}

/// One named, ordered sequence of plotted points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<Point>,
}

/// Cross-join the activity list with a bucket's date axis into dense
/// series, one point per cell in axis order. Unknown status labels plot
/// the same as absent cells.
pub fn build_series(
    bucket: &Bucket,
    activities: &[String],
    scale: &StatusScale,
    fill: FillPolicy,
    orientation: Orientation,
) -> Vec<Series> {
    let axis = bucket.date_axis();

    let cell = |date, activity: &str| -> Option<f64> {
        let value = bucket.status(date, activity).and_then(|label| scale.value(label));
        match (value, fill) {
            (None, FillPolicy::Floor) => Some(scale.floor()),
            (value, _) => value,
        }
    };

    match orientation {
        Orientation::Activity => activities
            .iter()
            .map(|activity| Series {
                name: activity.clone(),
                data: axis
                    .iter()
                    .map(|&date| Point {
                        x: date.to_string(),
                        y: cell(date, activity),
                    })
                    .collect(),
            })
            .collect(),
        Orientation::Date => axis
            .iter()
            .map(|&date| Series {
                name: date.to_string(),
                data: activities
                    .iter()
                    .map(|activity| Point {
                        x: activity.clone(),
                        y: cell(date, activity),
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{BucketIndex, Granularity, Record};
    use crate::datekey::SourceFormat;

    fn february_bucket() -> BucketIndex {
        let records = vec![
            Record {
                activity: "run",
                date: "01-02-2025",
                status: "accomplished",
            },
            Record {
                activity: "run",
                date: "15-02-2025",
                status: "failed",
            },
            Record {
                activity: "read",
                date: "15-02-2025",
                status: "mystery",
            },
        ];
        BucketIndex::group(records, Granularity::Month, SourceFormat::DayMonthYear)
    }

    fn activities() -> Vec<String> {
        vec!["run".to_string(), "read".to_string()]
    }

    #[test]
    fn dense_matrix_with_null_fill() {
        let index = february_bucket();
        let series = build_series(
            &index.buckets["2025-02"],
            &activities(),
            &StatusScale::default_scale(),
            FillPolicy::Null,
            Orientation::Activity,
        );

        assert_eq!(series.len(), 2);
        let run = &series[0];
        assert_eq!(run.name, "run");
        assert_eq!(
            run.data,
            vec![
                Point {
                    x: "2025-02-01".to_string(),
                    y: Some(1.0)
                },
                Point {
                    x: "2025-02-15".to_string(),
                    y: Some(0.2)
                },
            ]
        );

        // absent cell and unknown label both plot as null
        let read = &series[1];
        assert_eq!(read.data[0].y, None);
        assert_eq!(read.data[1].y, None);
    }

    #[test]
    fn floor_fill_backfills_gaps_with_lowest_value() {
        let index = february_bucket();
        let scale = StatusScale::default_scale();
        let series = build_series(
            &index.buckets["2025-02"],
            &activities(),
            &scale,
            FillPolicy::Floor,
            Orientation::Activity,
        );

        let read = &series[1];
        assert_eq!(read.data[0].y, Some(scale.floor()));
        assert_eq!(read.data[1].y, Some(scale.floor()));
    }

    #[test]
    fn transpose_puts_dates_in_series_and_activities_on_x() {
        let index = february_bucket();
        let series = build_series(
            &index.buckets["2025-02"],
            &activities(),
            &StatusScale::default_scale(),
            FillPolicy::Null,
            Orientation::Date,
        );

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "2025-02-01");
        assert_eq!(series[0].data[0].x, "run");
        assert_eq!(series[0].data[0].y, Some(1.0));
        assert_eq!(series[0].data[1].x, "read");
        assert_eq!(series[0].data[1].y, None);
    }
}
