//! Axis labels for chart buckets.

use crate::{aggregate::window::ChartWindow, errors::AggregateError, models::filter::FilterKind};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Title of the x-axis for a filter.
pub fn axis_title(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Day => "Hours",
        FilterKind::Week => "Day",
        FilterKind::Month => "Days in a Month",
    }
}

/// Human label for `bucket` in `window`.
///
/// Hours render on a 12-hour clock (`12 am`, `8 am`, `12 pm`), weekdays as
/// `Mon`..`Sun`, days of month as plain numbers. Buckets outside the
/// window's domain are rejected.
pub fn bucket_label(window: &ChartWindow, bucket: u32) -> Result<String, AggregateError> {
    if !window.bucket_domain().contains(&bucket) {
        return Err(AggregateError::InvalidArgument(format!(
            "bucket {bucket} is outside the {} axis",
            window.kind()
        )));
    }
    Ok(match window.kind() {
        FilterKind::Day => {
            let period = if bucket >= 12 { "pm" } else { "am" };
            let hour = match bucket % 12 {
                0 => 12,
                h => h,
            };
            format!("{hour} {period}")
        }
        FilterKind::Week => WEEKDAYS[(bucket - 1) as usize].to_string(),
        FilterKind::Month => bucket.to_string(),
    })
}
