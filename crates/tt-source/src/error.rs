use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}")]
    Status { status: u16 },

    #[error("response is not a timetable week: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("lesson {index} of day {day} is malformed: {message}")]
    MalformedLesson {
        day: usize,
        index: usize,
        message: String,
    },
}
