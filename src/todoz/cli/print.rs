use colored::Colorize;
use todoz::api::{CmdMessage, MessageLevel};
use todoz::filter::ViewCounts;
use todoz::index::DisplayTodo;
use todoz::model::FilterMode;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 8;
const DONE_MARKER: &str = "✓";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_todos(todos: &[DisplayTodo], filter: FilterMode) {
    if todos.is_empty() {
        match filter {
            FilterMode::All => println!("No todos yet."),
            other => println!("No {} todos.", other),
        }
        return;
    }

    let idx_width = todos
        .iter()
        .map(|dt| format!("{}. ", dt.position).width())
        .max()
        .unwrap_or(0);

    for dt in todos {
        let idx_str = format!("{:>width$}", format!("{}. ", dt.position), width = idx_width);
        let marker = if dt.todo.completed {
            format!("[{}] ", DONE_MARKER)
        } else {
            "[ ] ".to_string()
        };

        let short_id: String = dt.todo.id.chars().take(ID_WIDTH).collect();
        let suffix = format!("  {:<width$}", short_id, width = ID_WIDTH);

        let title_desc = if dt.todo.description.is_empty() {
            dt.todo.title.clone()
        } else {
            let desc: String = dt
                .todo
                .description
                .chars()
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect();
            format!("{} {}", dt.todo.title, desc)
        };

        let fixed_width = idx_str.width() + marker.width() + suffix.width();
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let display = truncate_to_width(&title_desc, available);
        let padding = available.saturating_sub(display.width());

        let body = if dt.todo.completed {
            display.dimmed().strikethrough()
        } else {
            split_title(&display, &dt.todo.title)
        };

        println!(
            "{}{}{}{}{}",
            idx_str.normal(),
            if dt.todo.completed {
                marker.green()
            } else {
                marker.normal()
            },
            body,
            " ".repeat(padding),
            suffix.dimmed()
        );
    }
}

pub(super) fn print_counts(counts: ViewCounts) {
    let noun = if counts.active == 1 { "item" } else { "items" };
    println!(
        "{}",
        format!(
            "{} {} left, {} completed",
            counts.active, noun, counts.completed
        )
        .dimmed()
    );
}

/// Bold title followed by a dimmed description, as far as `display` reaches.
fn split_title(display: &str, title: &str) -> colored::ColoredString {
    match display.strip_prefix(title) {
        Some(rest) if !rest.is_empty() => format!("{}{}", title.bold(), rest.dimmed()).normal(),
        _ => display.bold(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
