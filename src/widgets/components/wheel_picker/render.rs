use unicode_width::UnicodeWidthStr;

use crate::core::config::PickerConfig;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

use super::column::PickerColumn;

pub(super) const COLUMN_GAP: usize = 2;

pub(super) fn column_label_width(column: &PickerColumn) -> usize {
    column
        .items()
        .iter()
        .map(|item| item.label.width())
        .max()
        .unwrap_or(2)
}

/// Horizontal cell range of each column: (start, width), marker gutter
/// included, assuming the picker is drawn at x = 0.
pub(super) fn column_extents(columns: &[PickerColumn], config: &PickerConfig) -> Vec<(u16, u16)> {
    let marker_width = config.selected_marker.width();
    let mut extents = Vec::with_capacity(columns.len());
    let mut x = 0usize;
    for (index, column) in columns.iter().enumerate() {
        if index > 0 {
            x += COLUMN_GAP;
        }
        let width = marker_width + 1 + column_label_width(column);
        extents.push((x as u16, width as u16));
        x += width;
    }
    extents
}

/// One span line per viewport row; the middle row is the indicator.
pub(super) fn draw_picker(
    columns: &[PickerColumn],
    config: &PickerConfig,
    label: &str,
    focused: bool,
) -> Vec<SpanLine> {
    let rows = config.visible_range.max(1);
    let mid = rows / 2;
    let marker_width = config.selected_marker.width();

    let mut lines = Vec::with_capacity(rows + 1);
    if !label.is_empty() {
        lines.push(vec![Span::new(label)]);
    }

    for row in 0..rows {
        let indicator = row == mid;
        let mut line: SpanLine = Vec::new();
        for (index, column) in columns.iter().enumerate() {
            if index > 0 {
                line.push(Span::new(" ".repeat(COLUMN_GAP)));
            }
            if indicator {
                line.push(Span::styled(
                    config.selected_marker.clone(),
                    Style::new().color(Color::Yellow),
                ));
            } else {
                line.push(Span::new(" ".repeat(marker_width)));
            }
            line.push(Span::new(" "));

            let width = column_label_width(column);
            let text = label_at(column, row as i32 - mid as i32).unwrap_or_default();
            let style = if indicator {
                if focused {
                    Style::new().color(Color::Cyan).bold()
                } else {
                    Style::new().bold()
                }
            } else {
                Style::new().color(Color::DarkGrey)
            };
            line.push(Span::styled(format!("{text:<width$}"), style));
        }
        lines.push(line);
    }
    lines
}

/// The item whose band covers the center of the given viewport row,
/// `row_delta` rows from the indicator.
fn label_at(column: &PickerColumn, row_delta: i32) -> Option<&str> {
    if column.is_empty() {
        return None;
    }
    let height = column.item_height() as f32;
    let center = row_delta as f32 * height + height / 2.0;
    let index = ((center - column.offset()) / height).floor();
    if index < 0.0 || index >= column.len() as f32 {
        return None;
    }
    column.items().get(index as usize).map(|item| item.label.as_str())
}

#[cfg(test)]
mod tests {
    use super::{column_extents, draw_picker};
    use crate::core::config::{ColumnSpec, PickerConfig};
    use crate::ui::span::line_width;
    use crate::widgets::components::wheel_picker::column::{PickerColumn, ShortDateLabeler};
    use crate::widgets::shared::calendar::Date;

    fn hour_column() -> PickerColumn {
        let mut column = PickerColumn::build(
            &ColumnSpec::hour(12),
            &PickerConfig::default(),
            &ShortDateLabeler,
            Date::from_parts(2024, 5, 1).expect("anchor"),
        )
        .expect("column");
        column.select_by_value("9");
        column.set_offset(column.resting_offset(8));
        column
    }

    fn row_text(line: &crate::ui::span::SpanLine) -> String {
        line.iter().map(|span| span.text.as_str()).collect()
    }

    #[test]
    fn indicator_row_shows_the_selected_item() {
        let columns = vec![hour_column()];
        let config = PickerConfig::default();
        let lines = draw_picker(&columns, &config, "", true);
        assert_eq!(lines.len(), config.visible_range);

        let mid = config.visible_range / 2;
        assert!(row_text(&lines[mid]).contains("❯ 9"));
        assert!(row_text(&lines[mid - 1]).contains('8'));
        assert!(row_text(&lines[mid + 1]).contains("10"));
    }

    #[test]
    fn rows_beyond_the_strip_are_blank() {
        let mut column = hour_column();
        column.set_offset(column.resting_offset(0));
        let config = PickerConfig::default();
        let lines = draw_picker(&[column], &config, "", false);
        let mid = config.visible_range / 2;
        // Items start at the indicator; the rows above are empty padding.
        assert_eq!(row_text(&lines[mid - 1]).trim(), "");
        assert!(row_text(&lines[mid]).contains('1'));
    }

    #[test]
    fn extents_line_up_with_rendered_rows() {
        let config = PickerConfig::default();
        let columns = vec![hour_column(), hour_column()];
        let extents = column_extents(&columns, &config);
        assert_eq!(extents.len(), 2);
        let (second_start, second_width) = extents[1];

        let lines = draw_picker(&columns, &config, "", false);
        let total = line_width(&lines[0]);
        assert_eq!(total, (second_start + second_width) as usize);
    }
}
