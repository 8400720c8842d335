//! Plain-text views of a reading log.
//!
//! Output has no trailing newline; callers print with `println!`.

use reading_aggregator::{
    AggregateError, FilterKind, Reading, ReadingLog,
    aggregate::{
        ChartSeries,
        labels::{axis_title, bucket_label},
    },
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One block per reading, in log order, separated by blank lines.
///
/// Pass a log that went through
/// [`sort_descending`](reading_aggregator::sort_descending) to get the
/// newest-first history listing.
pub fn render_history(log: &ReadingLog) -> String {
    if log.is_empty() {
        return "No readings logged yet".to_string();
    }
    log.iter().map(render_reading).collect::<Vec<_>>().join("\n\n")
}

fn render_reading(r: &Reading) -> String {
    let meal = if r.has_eaten {
        "Consumed food"
    } else {
        "Did not consume food"
    };
    let insulin = match (r.has_insulin, r.effective_insulin_units()) {
        (true, Some(units)) => format!("Injected Insulin: {units} units"),
        (true, None) => "Injected Insulin: unknown units".to_string(),
        (false, _) => "Did not inject insulin".to_string(),
    };
    format!(
        "Blood Glucose Level: {}\nTime: {}\n{meal}\n{insulin}",
        r.glucose_level,
        r.timestamp.format(TIME_FORMAT),
    )
}

/// Header with the window, an axis line, then `<label>\t<value>` per point.
pub fn render_chart(series: &ChartSeries) -> Result<String, AggregateError> {
    let window = &series.window;
    let kind = window.kind();
    let span = match kind {
        FilterKind::Day => window.first_day().to_string(),
        FilterKind::Week | FilterKind::Month => {
            format!("{} to {}", window.first_day(), window.last_day())
        }
    };

    let mut lines = vec![format!("{}: {span}", kind.caption())];
    if series.points.is_empty() {
        lines.push("No readings in this window".to_string());
        return Ok(lines.join("\n"));
    }
    lines.push(format!("{}\tBlood Glucose Level", axis_title(kind)));
    for point in &series.points {
        lines.push(format!("{}\t{}", bucket_label(window, point.bucket)?, point.value));
    }
    Ok(lines.join("\n"))
}
