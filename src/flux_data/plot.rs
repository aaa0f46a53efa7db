//! Time-series rendering of a flux frame with `plotlars`.

use crate::flux_data::reader::TIME_COLUMN;
use crate::types::channel::FluxChannel;
use plotlars::{Legend, Plot, Text, TimeSeriesPlot};
use polars::prelude::DataFrame;
use std::path::Path;

fn build_plot(data: &DataFrame, title: &str) -> TimeSeriesPlot {
    let channels = FluxChannel::column_names();
    TimeSeriesPlot::builder()
        .data(data)
        .x(TIME_COLUMN)
        .y(channels[0])
        .additional_series(channels[1..].to_vec())
        .plot_title(Text::from(title).size(18))
        .legend(&Legend::new().x(0.02).y(0.98))
        .x_title("Time (UTC)")
        .y_title("Flux (SFU)")
        .build()
}

/// Opens the plot in the browser.
pub fn show(data: &DataFrame, title: &str) {
    build_plot(data, title).plot();
}

/// Writes the plot as a standalone HTML page.
pub fn write_html(data: &DataFrame, title: &str, path: &Path) {
    build_plot(data, title).write_html(path.to_string_lossy().to_string());
}
