use crate::core::config::layout::TIME_COLUMN_WIDTH;
use crate::gateway::ScheduleItem;

/// Pads `s` with spaces to `width` characters, truncating longer input.
/// Counts chars, not bytes.
pub fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.chars().take(width).collect()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Two-line display record for one lesson:
///
/// ```text
/// 08:30   | Физика
/// 10:00   | ЛК | 301 | Подгруппа 1
/// ```
///
/// The second line is omitted when there is neither an end time nor any
/// detail.
pub fn format_item(item: &ScheduleItem) -> String {
    let kind = item.lesson_kind();
    let note = if item.note.is_empty() { &item.undergroup } else { &item.note };

    let details: Vec<&str> = [kind.abbreviation(), item.room.as_str(), note.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();

    let first = format!("{} | {}", pad_right(&item.start, TIME_COLUMN_WIDTH), item.title);
    if item.end.is_empty() && details.is_empty() {
        return first;
    }
    format!(
        "{}\n{} | {}",
        first,
        pad_right(&item.end, TIME_COLUMN_WIDTH),
        details.join(" | ")
    )
}

/// Formats lessons in backend order.
pub fn render(items: &[ScheduleItem]) -> Vec<String> {
    items.iter().map(format_item).collect()
}
