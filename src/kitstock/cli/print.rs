use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use kitstock::api::{CmdMessage, MessageLevel};
use kitstock::config::{KitStockConfig, KEYS};
use kitstock::fragment::Component;
use kitstock::model::Kit;
use kitstock::transaction::{Operation, TransactionRecord, TIMESTAMP_FORMAT};
use std::path::PathBuf;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const QTY_WIDTH: usize = 7;
const KIND_WIDTH: usize = 12;
const COST_WIDTH: usize = 10;
const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_components(components: &[(u64, Component)]) {
    if components.is_empty() {
        println!("No components in stock.");
        return;
    }

    for (qty, component) in components {
        let attributes = component.fields();
        let (price, details) = attributes
            .split_last()
            .map(|(price, rest)| (price.clone(), rest.join(", ")))
            .unwrap_or_default();

        let available = LINE_WIDTH.saturating_sub(QTY_WIDTH + KIND_WIDTH + COST_WIDTH + 4);
        let details = truncate_to_width(&details, available);

        println!(
            "{}  {}{}{}{:>cw$}",
            qty_colored(*qty),
            pad_to_width(component.kind().label(), KIND_WIDTH).bold(),
            details,
            " ".repeat(available.saturating_sub(details.width())),
            price,
            cw = COST_WIDTH,
        );
    }
}

pub(super) fn print_kits(kits: &[(u64, Kit)]) {
    if kits.is_empty() {
        println!("No kits in stock.");
        return;
    }

    let name_width = kits
        .iter()
        .map(|(_, kit)| kit.name.width())
        .max()
        .unwrap_or(0)
        .min(LINE_WIDTH / 3);

    for (qty, kit) in kits {
        let summary = kit
            .items
            .iter()
            .map(|item| format!("{} {}", item.quantity, item.component.kind().label()))
            .collect::<Vec<_>>()
            .join(", ");
        let available = LINE_WIDTH.saturating_sub(QTY_WIDTH + name_width + COST_WIDTH + 6);
        let summary = truncate_to_width(&summary, available);

        println!(
            "{}  {}  {}{}{:>cw$}",
            qty_colored(*qty),
            pad_to_width(&truncate_to_width(&kit.name, name_width), name_width).bold(),
            summary.dimmed(),
            " ".repeat(available.saturating_sub(summary.width())),
            kit.unit_cost().to_string(),
            cw = COST_WIDTH,
        );
    }
}

pub(super) fn print_history(records: &[TransactionRecord]) {
    if records.is_empty() {
        println!("No transactions recorded.");
        return;
    }

    let now = Local::now().naive_local();
    for record in records {
        let op = pad_to_width(record.operation.label(), 15);
        let op = match record.operation {
            Operation::PurchaseOrder => op.green(),
            Operation::CustomerSale => op.yellow(),
            Operation::Pack | Operation::Unpack => op.cyan(),
        };
        let label = record.payload.label();
        let fixed = 19 + 2 + 15 + QTY_WIDTH + 2 + TIME_WIDTH;
        let label = truncate_to_width(&label, LINE_WIDTH.saturating_sub(fixed));
        let padding = LINE_WIDTH.saturating_sub(fixed + label.width());

        println!(
            "{}  {}{:>qw$}  {}{}{}",
            record.timestamp.format(TIMESTAMP_FORMAT).to_string().dimmed(),
            op,
            record.quantity,
            label,
            " ".repeat(padding),
            format_time_ago(record.timestamp, now).dimmed(),
            qw = QTY_WIDTH,
        );
    }
}

pub(super) fn print_config(config: &KitStockConfig) {
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", pad_to_width(key, 18).bold(), value);
    }
}

pub(super) fn print_paths(paths: &[(String, PathBuf)]) {
    for (label, path) in paths {
        println!("{} {}", pad_to_width(label, 14).dimmed(), path.display());
    }
}

fn qty_colored(qty: u64) -> colored::ColoredString {
    let text = format!("{:>width$}", qty, width = QTY_WIDTH);
    if qty == 0 {
        text.red()
    } else {
        text.normal()
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
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

fn format_time_ago(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("Light Circuit", 6), "Light…");
        assert_eq!(truncate_to_width("日本語テキスト", 5).width(), 5);
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_to_width("Wire", 6), "Wire  ");
        assert_eq!(pad_to_width("日本", 6).width(), 6);
        assert_eq!(pad_to_width("Solar Panel", 4), "Solar Panel");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let then = now - Duration::hours(3);
        let formatted = format_time_ago(then, now);
        assert_eq!(formatted.width(), TIME_WIDTH);
        assert!(formatted.trim_start().starts_with("3 hours"));
    }
}
