use tt_core::{ChangeInfo, DisplayEntry, DisplayMode, Selection};

use crate::Origin;

pub const NO_LESSONS: &str = "There are no lessons";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub room_pipe: bool,
    pub pipe_text: String,
    pub reversed_order: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            room_pipe: false,
            pipe_text: " | ".to_string(),
            reversed_order: false,
        }
    }
}

/// "JAN KOWALSKI" -> "Jan Kowalski".
pub fn title_case(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn change_marker(change: &ChangeInfo) -> &'static str {
    match change {
        ChangeInfo::Substituted { .. } => "⇄ ",
        ChangeInfo::Cancelled => "× ",
        ChangeInfo::Unchanged => "",
    }
}

fn featured_panel(entry: &DisplayEntry, out: &mut Vec<String>) {
    let lesson = &entry.lesson;
    out.push(lesson.time.to_string());
    out.push(format!("{}{}", change_marker(&lesson.change), entry.display_name));
    if let Some(teacher) = &lesson.teacher {
        out.push(title_case(teacher));
    }
    if let Some(room) = &lesson.room {
        out.push(format!("[{room}]"));
    }
    out.push("View all →".to_string());
}

fn row(entry: &DisplayEntry, opts: &RenderOptions, out: &mut Vec<String>) {
    let lesson = &entry.lesson;
    let time_line = match (&lesson.room, opts.room_pipe) {
        (Some(room), true) => format!("{}{}{}", lesson.time, opts.pipe_text, room),
        _ => lesson.time.to_string(),
    };
    let mut name_line = format!("{}{}", change_marker(&lesson.change), entry.display_name);
    if let (Some(room), false) = (&lesson.room, opts.room_pipe) {
        name_line.push_str(&format!("  {room}"));
    }

    let (first, second) = if opts.reversed_order {
        (name_line, time_line)
    } else {
        (time_line, name_line)
    };
    let lead = if entry.is_current { "▶ " } else { "  " };
    out.push(format!("{lead}{first}"));
    out.push(format!("  {second}"));
}

/// Lays the selection out as plain text, one line per `String`.
pub fn render_lines(selection: &Selection, origin: Origin, mode: DisplayMode, opts: &RenderOptions) -> Vec<String> {
    let mut out = Vec::new();

    if selection.is_empty() {
        out.push(NO_LESSONS.to_string());
    } else {
        let mut entries = selection.entries.iter();
        if mode.has_featured_panel() {
            if let Some(first) = entries.next() {
                featured_panel(first, &mut out);
                out.push(String::new());
            }
        }
        for entry in entries {
            row(entry, opts, &mut out);
        }
    }

    match origin {
        Origin::Fetched => {}
        Origin::Snapshot => out.push("(offline: showing cached timetable)".to_string()),
        Origin::Unavailable => out.push("(offline: no cached timetable)".to_string()),
    }
    out
}

pub fn render(selection: &Selection, origin: Origin, mode: DisplayMode, opts: &RenderOptions) -> String {
    let mut s = render_lines(selection, origin, mode, opts).join("\n");
    s.push('\n');
    s
}
