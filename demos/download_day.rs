//! demos/download_day.rs
//!
//! Walks through the manual workflow for one San Vito day over FTP:
//! download, decompress, load.
//!
//! To run this example:
//! cargo run --example download_day

use std::error::Error;

use polars::prelude::*;
use rstn::{FluxFrameFilterExt, Rstn, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut rstn = Rstn::builder()
        .year(2014)
        .month(10)
        .day(16)
        .station("San Vito")
        .path("rstn_data")
        .build()?;

    let artifact = rstn.download(Transport::Ftp).await?;
    println!("Downloaded {:?}", artifact.path());

    let path = rstn.decompress().await?;
    println!("Decompressed to {:?}", path);

    let date = rstn.date().naive();
    let df = rstn.create_dataframe().await?;
    println!("{} records", df.height());

    let noon: DataFrame = df
        .clone()
        .lazy()
        .filter_time(
            date.and_hms_opt(12, 0, 0).ok_or("bad time")?,
            date.and_hms_opt(12, 0, 59).ok_or("bad time")?,
        )
        .collect()?;
    println!("{}", noon);

    Ok(())
}
