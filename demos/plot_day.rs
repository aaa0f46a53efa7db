//! demos/plot_day.rs
//!
//! Fetches one day of Sagamore Hill data and shows it in the browser, once as
//! measured and once with each channel's daily mean removed.
//!
//! To run this example:
//! cargo run --example plot_day --features plotting

use std::error::Error;

use plotlars::{Plot, Text, TimeSeriesPlot};
use rstn::{FluxChannel, Rstn, Transport, TIME_COLUMN};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut rstn = Rstn::builder()
        .year(2002)
        .month(4)
        .day(9)
        .station("Sagamore Hill")
        .build()?;

    println!("Fetching {}...", rstn.locator().filename());
    rstn.fetch(Transport::Https).await?;
    rstn.plot()?;

    let centered = rstn.baseline_subtracted()?;
    let title = format!("{} (mean removed)", rstn.station());
    let channels: Vec<&str> = FluxChannel::ALL.iter().map(|c| c.column_name()).collect();
    TimeSeriesPlot::builder()
        .data(&centered)
        .x(TIME_COLUMN)
        .y(channels[0])
        .additional_series(channels[1..].to_vec())
        .plot_title(Text::from(title.as_str()).size(18))
        .x_title("Time (UTC)")
        .y_title("Flux - mean (SFU)")
        .build()
        .plot();

    Ok(())
}
