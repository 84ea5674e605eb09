use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use tt_core::DaySchedule;

use crate::wire::parse_week;
use crate::{ScheduleSource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://timetable-api.vloapp.pl";

/// Fetches the week from the timetable API and picks one day out of it.
#[derive(Clone, Debug)]
pub struct HttpScheduleSource {
    client: Client,
    base_url: String,
}

impl HttpScheduleSource {
    /// `timeout` of `None` keeps the client's default behaviour.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn week_url(&self, offset: u32) -> String {
        format!("{}/?offset={}", self.base_url.trim_end_matches('/'), offset)
    }
}

impl ScheduleSource for HttpScheduleSource {
    async fn fetch_today(&self, day_index: usize, offset: u32) -> Result<Option<DaySchedule>, SourceError> {
        let url = self.week_url(offset);
        debug!("fetching timetable week from {url}");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await?;
        parse_week(&body)?.into_day(day_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_url_keeps_single_slash() {
        let a = HttpScheduleSource::new("https://example.test/", None).unwrap();
        let b = HttpScheduleSource::new("https://example.test", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(a.week_url(2), "https://example.test/?offset=2");
        assert_eq!(b.week_url(0), "https://example.test/?offset=0");
    }
}
