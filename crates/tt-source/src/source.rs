use std::future::Future;

use tt_core::DaySchedule;

use crate::SourceError;

pub trait ScheduleSource {
    /// Fetches the lessons for `day_index` (Monday = 0) of the current week.
    ///
    /// `Ok(None)` means the source answered but has nothing for that day.
    fn fetch_today(
        &self,
        day_index: usize,
        offset: u32,
    ) -> impl Future<Output = Result<Option<DaySchedule>, SourceError>> + Send;
}
