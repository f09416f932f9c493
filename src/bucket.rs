use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::datekey::{DateKey, SourceFormat};

/// How wide one bucket is on the date axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    #[default]
    Month,
    Quarter,
}

impl Granularity {
    /// Key of the bucket a date falls into: the full key for `Day`,
    /// `YYYY-MM` for `Month`, `YYYY-Qn` for `Quarter`.
    pub fn bucket_key(&self, key: DateKey) -> String {
        match self {
            Granularity::Day => key.to_string(),
            Granularity::Month => format!("{:04}-{:02}", key.year(), key.month()),
            Granularity::Quarter => format!("{:04}-Q{}", key.year(), (key.month() + 2) / 3),
        }
    }
}

/// One flat record as the grouping stage sees it.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub activity: &'a str,
    pub date: &'a str,
    pub status: &'a str,
}

/// One bucket: date → activity → status label. `BTreeMap` keeps the date
/// axis sorted and deduplicated for free.
#[derive(Debug, Default)]
pub struct Bucket {
    cells: BTreeMap<DateKey, BTreeMap<String, String>>,
}

impl Bucket {
    pub fn date_axis(&self) -> Vec<DateKey> {
        self.cells.keys().copied().collect()
    }

    pub fn status(&self, date: DateKey, activity: &str) -> Option<&str> {
        self.cells
            .get(&date)
            .and_then(|row| row.get(activity))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct BucketIndex {
    pub buckets: BTreeMap<String, Bucket>,
}

impl BucketIndex {
    /// Group records into buckets of the requested granularity. A record
    /// whose date fails to normalize is skipped and logged; everything
    /// else is kept.
    pub fn group<'a, I>(records: I, granularity: Granularity, format: SourceFormat) -> BucketIndex
    where
        I: IntoIterator<Item = Record<'a>>,
    {
        let mut index = BucketIndex::default();

        for record in records {
            let Some(key) = DateKey::normalize(record.date, format) else {
                warn!(
                    activity = record.activity,
                    date = record.date,
                    "skipping record with malformed date"
                );
                continue;
            };

            index
                .buckets
                .entry(granularity.bucket_key(key))
                .or_default()
                .cells
                .entry(key)
                .or_default()
                .insert(record.activity.to_string(), record.status.to_string());
        }

        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(activity: &'a str, date: &'a str, status: &'a str) -> Record<'a> {
        Record {
            activity,
            date,
            status,
        }
    }

    #[test]
    fn groups_by_month_with_sorted_date_axis() {
        let records = vec![
            record("run", "15-02-2025", "failed"),
            record("run", "01-02-2025", "accomplished"),
            record("read", "03-03-2025", "regular"),
        ];

        let index =
            BucketIndex::group(records, Granularity::Month, SourceFormat::DayMonthYear);

        assert_eq!(index.buckets.len(), 2);
        let february = &index.buckets["2025-02"];
        let axis: Vec<String> = february.date_axis().iter().map(ToString::to_string).collect();
        assert_eq!(axis, ["2025-02-01", "2025-02-15"]);

        let first = DateKey::normalize("2025-02-01", SourceFormat::Canonical).unwrap();
        assert_eq!(february.status(first, "run"), Some("accomplished"));
        assert_eq!(february.status(first, "read"), None);
    }

    #[test]
    fn month_bucket_only_holds_its_own_month() {
        let records = vec![
            record("run", "28-02-2025", "regular"),
            record("run", "01-03-2025", "regular"),
        ];

        let index =
            BucketIndex::group(records, Granularity::Month, SourceFormat::DayMonthYear);

        for (bucket_key, bucket) in &index.buckets {
            for date in bucket.date_axis() {
                assert_eq!(&Granularity::Month.bucket_key(date), bucket_key);
            }
        }
    }

    #[test]
    fn quarter_keys_follow_ceil_of_month_over_three() {
        let january = DateKey::normalize("2025-01-31", SourceFormat::Canonical).unwrap();
        let march = DateKey::normalize("2025-03-01", SourceFormat::Canonical).unwrap();
        let april = DateKey::normalize("2025-04-01", SourceFormat::Canonical).unwrap();
        let december = DateKey::normalize("2025-12-31", SourceFormat::Canonical).unwrap();

        assert_eq!(Granularity::Quarter.bucket_key(january), "2025-Q1");
        assert_eq!(Granularity::Quarter.bucket_key(march), "2025-Q1");
        assert_eq!(Granularity::Quarter.bucket_key(april), "2025-Q2");
        assert_eq!(Granularity::Quarter.bucket_key(december), "2025-Q4");
    }

    #[test]
    fn day_granularity_gives_one_bucket_per_date() {
        let records = vec![
            record("run", "01-02-2025", "failed"),
            record("read", "01-02-2025", "regular"),
            record("run", "02-02-2025", "failed"),
        ];

        let index = BucketIndex::group(records, Granularity::Day, SourceFormat::DayMonthYear);
        assert_eq!(index.buckets.len(), 2);
        assert!(index.buckets.contains_key("2025-02-01"));
    }

    #[test]
    fn malformed_dates_are_skipped_not_fatal() {
        let records = vec![
            record("run", "not-a-date", "failed"),
            record("run", "01-02-2025", "regular"),
        ];

        let index =
            BucketIndex::group(records, Granularity::Month, SourceFormat::DayMonthYear);

        assert_eq!(index.buckets.len(), 1);
        let bucket = &index.buckets["2025-02"];
        assert_eq!(bucket.date_axis().len(), 1);
    }
}
