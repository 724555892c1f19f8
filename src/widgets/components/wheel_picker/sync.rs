use tracing::debug;

use crate::core::config::ColumnKind;

use super::column::PickerColumn;
use super::model::DateTimeModel;

/// Re-aligns every column with the model.
///
/// Runs minute first, since its rounding can carry into the hour the
/// other columns then read. A column whose value is out of window is left
/// untouched; the next expansion brings it in.
pub(super) fn sync_columns(model: &mut DateTimeModel, columns: &mut [PickerColumn]) {
    for kind in [
        ColumnKind::Minute,
        ColumnKind::Hour,
        ColumnKind::Meridiem,
        ColumnKind::Date,
    ] {
        for column in columns.iter_mut().filter(|column| column.kind() == kind) {
            sync_column(model, column);
        }
    }
}

fn sync_column(model: &mut DateTimeModel, column: &mut PickerColumn) {
    let value = match column.kind() {
        ColumnKind::Minute => {
            let increment = column.spec().minute_increment();
            let rounded = round_minute(model.minute(), increment);
            if rounded >= 60 {
                // Nearing the end of the hour: wrap and advance.
                model.set_minute_raw(0);
                model.advance_hours(1);
            } else {
                model.set_minute_raw(rounded as u8);
            }
            format!("{:02}", model.minute())
        }
        ColumnKind::Hour => {
            if column.spec().hour_mode() == 24 {
                model.hour().to_string()
            } else {
                model.display_hour().to_string()
            }
        }
        ColumnKind::Meridiem => model.meridiem().as_str().to_string(),
        ColumnKind::Date => model.date().to_iso(),
    };
    align(column, &value);
}

fn align(column: &mut PickerColumn, value: &str) {
    if column.select_by_value(value) {
        if let Some(index) = column.selected_index() {
            column.set_offset(column.resting_offset(index));
        }
    } else {
        debug!(
            kind = column.kind().as_str(),
            value, "no item for value, leaving column in place"
        );
    }
}

fn round_minute(minute: u8, increment: u32) -> u32 {
    ((minute as u32 + increment / 2) / increment) * increment
}

#[cfg(test)]
mod tests {
    use super::sync_columns;
    use crate::core::config::{ColumnSpec, PickerConfig};
    use crate::widgets::components::wheel_picker::column::{PickerColumn, ShortDateLabeler};
    use crate::widgets::components::wheel_picker::model::DateTimeModel;

    fn build(model: &DateTimeModel, specs: &[ColumnSpec]) -> Vec<PickerColumn> {
        let config = PickerConfig::default();
        specs
            .iter()
            .map(|spec| {
                PickerColumn::build(spec, &config, &ShortDateLabeler, model.date())
                    .expect("column should build")
            })
            .collect()
    }

    fn standard_specs() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::date(),
            ColumnSpec::hour(12),
            ColumnSpec::minute(5),
            ColumnSpec::meridiem(),
        ]
    }

    fn selected_values(columns: &[PickerColumn]) -> Vec<Option<String>> {
        columns
            .iter()
            .map(|column| column.selected_value().map(str::to_string))
            .collect()
    }

    #[test]
    fn aligns_every_column_with_the_model() {
        let mut model = DateTimeModel::parse("2024-05-01 09:05:00").expect("model");
        let mut columns = build(&model, &standard_specs());
        sync_columns(&mut model, &mut columns);

        assert_eq!(
            selected_values(&columns),
            [
                Some("2024-05-01".to_string()),
                Some("9".to_string()),
                Some("05".to_string()),
                Some("AM".to_string()),
            ]
        );
        for column in &columns {
            let index = column.selected_index().expect("selected");
            assert_eq!(column.offset(), column.resting_offset(index));
        }
    }

    #[test]
    fn sync_is_idempotent() {
        let mut model = DateTimeModel::parse("2024-05-01 14:37:00").expect("model");
        let mut columns = build(&model, &standard_specs());
        sync_columns(&mut model, &mut columns);
        let first_offsets: Vec<f32> = columns.iter().map(|c| c.offset()).collect();
        let first_model = model;

        sync_columns(&mut model, &mut columns);
        let second_offsets: Vec<f32> = columns.iter().map(|c| c.offset()).collect();
        assert_eq!(first_offsets, second_offsets);
        assert_eq!(first_model, model);
    }

    #[test]
    fn minute_rounding_writes_back_to_the_model() {
        let mut model = DateTimeModel::parse("2024-05-01 09:07:00").expect("model");
        let mut columns = build(&model, &standard_specs());
        sync_columns(&mut model, &mut columns);
        assert_eq!(model.minute(), 5);
        assert_eq!(columns[2].selected_value(), Some("05"));
    }

    #[test]
    fn minute_carry_advances_the_hour() {
        let mut model = DateTimeModel::parse("2024-05-01 10:58:00").expect("model");
        let mut columns = build(
            &model,
            &[ColumnSpec::date(), ColumnSpec::hour(24), ColumnSpec::minute(15)],
        );
        sync_columns(&mut model, &mut columns);
        assert_eq!(model.serialize(), "2024-05-01 11:00:00");
        assert_eq!(columns[1].selected_value(), Some("11"));
        assert_eq!(columns[2].selected_value(), Some("00"));
    }

    #[test]
    fn minute_carry_can_roll_into_the_next_day() {
        let mut model = DateTimeModel::parse("2024-05-01 23:58:00").expect("model");
        let mut columns = build(
            &model,
            &[ColumnSpec::date(), ColumnSpec::minute(15)],
        );
        sync_columns(&mut model, &mut columns);
        assert_eq!(model.serialize(), "2024-05-02 00:00:00");
        assert_eq!(columns[0].selected_value(), Some("2024-05-02"));
    }

    #[test]
    fn afternoon_maps_to_twelve_hour_items() {
        let mut model = DateTimeModel::parse("2024-05-01 14:00:00").expect("model");
        let mut columns = build(&model, &standard_specs());
        sync_columns(&mut model, &mut columns);
        assert_eq!(columns[1].selected_value(), Some("2"));
        assert_eq!(columns[3].selected_value(), Some("PM"));
    }

    #[test]
    fn midnight_has_no_twelve_hour_item_and_stays_put() {
        let mut model = DateTimeModel::parse("2024-05-01 00:20:00").expect("model");
        let mut columns = build(&model, &standard_specs());
        sync_columns(&mut model, &mut columns);
        // Hour zero has no item in a 1-based column; the silent fallback
        // leaves the hour wheel unselected rather than failing.
        assert_eq!(columns[1].selected_value(), None);
        assert_eq!(columns[3].selected_value(), Some("AM"));
    }
}
