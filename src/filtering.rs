use crate::flux_data::reader::TIME_COLUMN;
use crate::types::channel::FluxChannel;
use chrono::NaiveDateTime;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame, TimeUnit};

pub trait FluxFrameFilterExt {
    /// Keeps the records whose `time` lies in `start..=end` (UTC).
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Errors surface on `collect`.
    fn filter_time(self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame;

    /// Replaces every channel by its deviation from the channel's mean over
    /// the frame, as Float64. Channels with no values stay null.
    fn baseline_subtracted(self) -> LazyFrame;
}

impl FluxFrameFilterExt for LazyFrame {
    fn filter_time(self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame {
        let time = || col(TIME_COLUMN).cast(DataType::Datetime(TimeUnit::Milliseconds, None));
        self.filter(time().gt_eq(lit(start)).and(time().lt_eq(lit(end))))
    }

    fn baseline_subtracted(self) -> LazyFrame {
        let deviations: Vec<Expr> = FluxChannel::ALL
            .iter()
            .map(|channel| {
                let name = channel.column_name();
                let values = col(name).cast(DataType::Float64);
                (values.clone() - values.mean()).alias(name)
            })
            .collect();
        self.with_columns(deviations)
    }
}
