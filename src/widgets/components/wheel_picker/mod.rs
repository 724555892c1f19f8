pub mod column;
pub mod gesture;
pub mod model;
mod render;
mod sync;

use tracing::{debug, warn};

use crate::core::NodeId;
use crate::core::config::{ColumnKind, PickerConfig, PickerSetup};
use crate::core::error::PickerError;
use crate::core::value::Value;
use crate::terminal::pointer::{PointerEvent, PointerPhase};
use crate::widgets::base::ComponentBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, ValueChange, WidgetAction,
};

pub use column::{DateLabeler, Item, PickerColumn, ShortDateLabeler};
pub use gesture::{GestureEngine, GesturePhase, SETTLE_TICKS, StartOutcome};
pub use model::{ColumnCommit, DateTimeModel, Meridiem};

/// A set of snap-to-item wheels (date, hour, minute, meridiem) over one
/// shared date-time value, mirrored into a bound host field.
///
/// The widget owns the model exclusively; columns only ever see it through
/// the sync pass. A commit is fully applied (model updated, window
/// expanded, every column re-synced) before the next event is looked at.
pub struct WheelPicker {
    base: ComponentBase,
    config: PickerConfig,
    labeler: Box<dyn DateLabeler>,
    columns: Vec<PickerColumn>,
    gestures: Vec<GestureEngine>,
    model: DateTimeModel,
    field_target: Option<NodeId>,
    field_text: String,
    /// Column currently owning the pointer, while a drag is in flight.
    active: Option<usize>,
}

impl WheelPicker {
    /// Builds a picker starting at the current moment.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        setup: &PickerSetup,
    ) -> Result<Self, PickerError> {
        Self::with_model(id, label, setup, DateTimeModel::now())
    }

    /// Builds a picker from the host field's current text. Unreadable
    /// text falls back to the current moment.
    pub fn from_field(
        id: impl Into<String>,
        label: impl Into<String>,
        setup: &PickerSetup,
        field_text: &str,
    ) -> Result<Self, PickerError> {
        let model = match DateTimeModel::parse(field_text) {
            Ok(model) => model,
            Err(err) => {
                debug!(%err, "host field unreadable, defaulting to now");
                DateTimeModel::now()
            }
        };
        Self::with_model(id, label, setup, model)
    }

    pub fn with_model(
        id: impl Into<String>,
        label: impl Into<String>,
        setup: &PickerSetup,
        model: DateTimeModel,
    ) -> Result<Self, PickerError> {
        setup.validate()?;
        let labeler: Box<dyn DateLabeler> = Box::new(ShortDateLabeler);
        let mut columns = Vec::with_capacity(setup.columns.len());
        for spec in &setup.columns {
            columns.push(PickerColumn::build(
                spec,
                &setup.config,
                labeler.as_ref(),
                model.date(),
            )?);
        }
        let gestures = vec![GestureEngine::new(); columns.len()];
        let mut picker = Self {
            base: ComponentBase::new(id, label),
            config: setup.config.clone(),
            labeler,
            columns,
            gestures,
            model,
            field_target: None,
            field_text: String::new(),
            active: None,
        };
        picker.sync_all();
        Ok(picker)
    }

    /// Binds the picker to the host field it serializes into.
    pub fn with_field_target(mut self, target: impl Into<NodeId>) -> Self {
        self.field_target = Some(target.into());
        self
    }

    /// Swaps the date formatting collaborator and rebuilds the window
    /// with it.
    pub fn with_labeler(mut self, labeler: Box<dyn DateLabeler>) -> Result<Self, PickerError> {
        self.labeler = labeler;
        self.rebuild_date_window()?;
        self.sync_all();
        Ok(self)
    }

    pub fn model(&self) -> DateTimeModel {
        self.model
    }

    pub fn field_text(&self) -> &str {
        &self.field_text
    }

    pub fn column(&self, kind: ColumnKind) -> Option<&PickerColumn> {
        self.columns.iter().find(|column| column.kind() == kind)
    }

    /// Leftmost cell of a column when the picker is drawn at x = 0; hosts
    /// drawing elsewhere translate pointer coordinates before routing.
    pub fn column_origin(&self, kind: ColumnKind) -> Option<u16> {
        let extents = render::column_extents(&self.columns, &self.config);
        self.columns
            .iter()
            .position(|column| column.kind() == kind)
            .and_then(|index| extents.get(index))
            .map(|(start, _)| *start)
    }

    /// Re-reads the host field after an external change: parse (keeping
    /// the previous value on failure), re-center the date window, re-sync
    /// every column.
    pub fn refresh_from_field(&mut self, text: &str) -> Result<(), PickerError> {
        match DateTimeModel::parse(text) {
            Ok(model) => self.model = model,
            Err(err) => debug!(%err, "host field unreadable, keeping previous value"),
        }
        self.rebuild_date_window()?;
        self.sync_all();
        Ok(())
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Result<InteractionResult, PickerError> {
        match event.phase {
            PointerPhase::Start => {
                let Some(index) = self.hit_column(event.origin_column) else {
                    return Ok(InteractionResult::ignored());
                };
                match self.gestures[index].start(&self.columns[index], event.dist_x, event.dist_y)
                {
                    StartOutcome::Started => {
                        self.active = Some(index);
                        // The first start event already carries movement.
                        self.drag_active(event.dist_y);
                        Ok(InteractionResult::handled())
                    }
                    StartOutcome::RejectedHorizontal => Ok(InteractionResult::ignored()),
                }
            }
            PointerPhase::Move => {
                if self.active.is_none() {
                    return Ok(InteractionResult::ignored());
                }
                let changed = self.drag_active(event.dist_y);
                Ok(if changed {
                    InteractionResult::handled()
                } else {
                    InteractionResult::consumed()
                })
            }
            PointerPhase::End => {
                let Some(index) = self.active.take() else {
                    return Ok(InteractionResult::ignored());
                };
                self.drag_active_at(index, event.dist_y);
                self.gestures[index].release(&self.columns[index])?;
                Ok(InteractionResult::consumed())
            }
        }
    }

    /// Advances settle animations one step; a finished animation commits
    /// its snapped item and re-syncs the whole widget before returning.
    pub fn handle_tick(&mut self) -> Result<InteractionResult, PickerError> {
        let mut result = InteractionResult::ignored();
        for index in 0..self.columns.len() {
            if !self.gestures[index].is_settling() {
                continue;
            }
            match self.gestures[index].tick(&mut self.columns[index]) {
                Some(snapped) => result.merge(self.finish_snap(index, snapped)?),
                None => result.merge(InteractionResult::handled()),
            }
        }
        Ok(result)
    }

    fn drag_active(&mut self, dist_y: f32) -> bool {
        match self.active {
            Some(index) => self.drag_active_at(index, dist_y),
            None => false,
        }
    }

    fn drag_active_at(&mut self, index: usize, dist_y: f32) -> bool {
        // Pointer distances arrive in cells; one cell of travel moves the
        // strip by one item height.
        let delta = dist_y * self.columns[index].item_height() as f32;
        self.gestures[index].drag(&mut self.columns[index], delta)
    }

    fn hit_column(&self, x: u16) -> Option<usize> {
        render::column_extents(&self.columns, &self.config)
            .iter()
            .position(|(start, width)| x >= *start && x < start + width)
    }

    fn finish_snap(&mut self, index: usize, snapped: usize) -> Result<InteractionResult, PickerError> {
        let commit = {
            let column = &mut self.columns[index];
            column.select_index(snapped);
            let value = column
                .value_of(snapped)
                .ok_or_else(|| PickerError::Inconsistency {
                    detail: format!("snapped index {snapped} out of bounds"),
                })?
                .to_string();
            ColumnCommit::new(column.kind(), value).with_hour_mode(column.spec().hour_mode())
        };
        self.model.apply_commit(&commit);

        if commit.kind == ColumnKind::Date
            && self.columns[index].near_edge(snapped, self.config.visible_range)
        {
            debug!(value = commit.value.as_str(), "snap near window edge, re-centering");
            self.columns[index].expand_around(snapped, &self.config, self.labeler.as_ref())?;
        }

        self.sync_all();

        let mut result = InteractionResult::handled();
        if let Some(target) = &self.field_target {
            result = InteractionResult::with_action(WidgetAction::ValueChanged {
                change: ValueChange::new(
                    target.as_str(),
                    Value::Text(self.field_text.clone()),
                ),
            });
        }
        Ok(result)
    }

    fn rebuild_date_window(&mut self) -> Result<(), PickerError> {
        let anchor = self.model.date();
        for column in &mut self.columns {
            if column.kind() == ColumnKind::Date {
                let spec = column.spec().clone();
                *column = PickerColumn::build(&spec, &self.config, self.labeler.as_ref(), anchor)?;
            }
        }
        Ok(())
    }

    fn sync_all(&mut self) {
        sync::sync_columns(&mut self.model, &mut self.columns);
        self.field_text = self.model.serialize();
    }
}

impl Drawable for WheelPicker {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        DrawOutput {
            lines: render::draw_picker(
                &self.columns,
                &self.config,
                self.base.label(),
                ctx.is_focused(self.base.id()),
            ),
        }
    }
}

impl Interactive for WheelPicker {
    fn on_pointer(&mut self, event: &PointerEvent) -> Result<InteractionResult, PickerError> {
        self.handle_pointer(event)
    }

    fn on_tick(&mut self) -> Result<InteractionResult, PickerError> {
        self.handle_tick()
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.field_text.clone()))
    }

    fn set_value(&mut self, value: Value) {
        let Some(text) = value.as_text() else {
            return;
        };
        if let Err(err) = self.refresh_from_field(text) {
            warn!(%err, "field refresh failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> WheelPicker {
        WheelPicker::from_field(
            "when",
            "Pick-up time",
            &PickerSetup::standard(),
            "2024-05-01 09:05:00",
        )
        .expect("picker should build")
        .with_field_target("datetime")
    }

    fn pointer(phase: PointerPhase, x: u16, dist_x: f32, dist_y: f32) -> PointerEvent {
        PointerEvent {
            phase,
            origin_column: x,
            origin_row: 3,
            dist_x,
            dist_y,
        }
    }

    fn settle(picker: &mut WheelPicker) -> InteractionResult {
        let mut result = InteractionResult::ignored();
        for _ in 0..SETTLE_TICKS {
            result.merge(picker.handle_tick().expect("tick should not fail"));
        }
        result
    }

    fn selected(picker: &WheelPicker, kind: ColumnKind) -> Option<String> {
        picker
            .column(kind)
            .and_then(PickerColumn::selected_value)
            .map(str::to_string)
    }

    #[test]
    fn initial_sync_matches_the_field() {
        let p = picker();
        assert_eq!(selected(&p, ColumnKind::Date), Some("2024-05-01".into()));
        assert_eq!(selected(&p, ColumnKind::Hour), Some("9".into()));
        assert_eq!(selected(&p, ColumnKind::Minute), Some("05".into()));
        assert_eq!(selected(&p, ColumnKind::Meridiem), Some("AM".into()));
        assert_eq!(
            p.value(),
            Some(Value::Text("2024-05-01 09:05:00".into()))
        );
    }

    #[test]
    fn dragging_the_hour_wheel_commits_and_serializes() {
        let mut p = picker();
        let x = p.column_origin(ColumnKind::Hour).expect("hour origin");

        p.handle_pointer(&pointer(PointerPhase::Start, x, 0.0, -0.2))
            .expect("start");
        p.handle_pointer(&pointer(PointerPhase::Move, x, 0.0, -1.0))
            .expect("move");
        p.handle_pointer(&pointer(PointerPhase::End, x, 0.0, -1.0))
            .expect("end");
        let result = settle(&mut p);

        assert_eq!(p.field_text(), "2024-05-01 10:05:00");
        assert_eq!(selected(&p, ColumnKind::Hour), Some("10".into()));
        assert_eq!(selected(&p, ColumnKind::Meridiem), Some("AM".into()));

        let action = result.actions.first().expect("a value change action");
        let WidgetAction::ValueChanged { change } = action;
        assert_eq!(change.target.as_str(), "datetime");
        assert_eq!(change.value, Value::Text("2024-05-01 10:05:00".into()));
    }

    #[test]
    fn horizontal_swipes_are_left_to_the_page() {
        let mut p = picker();
        let x = p.column_origin(ColumnKind::Hour).expect("hour origin");
        let result = p
            .handle_pointer(&pointer(PointerPhase::Start, x, 40.0, 10.0))
            .expect("start");
        assert!(!result.handled);

        let end = p
            .handle_pointer(&pointer(PointerPhase::End, x, 40.0, 10.0))
            .expect("end");
        assert!(!end.handled);
        assert_eq!(p.field_text(), "2024-05-01 09:05:00");
    }

    #[test]
    fn releasing_on_the_same_item_still_commits() {
        let mut p = picker();
        let x = p.column_origin(ColumnKind::Meridiem).expect("meridiem origin");
        p.handle_pointer(&pointer(PointerPhase::Start, x, 0.0, 0.1))
            .expect("start");
        p.handle_pointer(&pointer(PointerPhase::End, x, 0.0, 0.1))
            .expect("end");
        let result = settle(&mut p);

        // Same-side meridiem commit: the model is untouched, but the
        // commit pipeline still runs and re-emits the field value.
        assert_eq!(p.field_text(), "2024-05-01 09:05:00");
        assert_eq!(result.actions.len(), 1);
    }

    #[test]
    fn snapping_near_the_window_edge_recenters_it() {
        let mut p = picker();
        let x = p.column_origin(ColumnKind::Date).expect("date origin");
        let before_len = p.column(ColumnKind::Date).expect("date column").len();

        p.handle_pointer(&pointer(PointerPhase::Start, x, 0.0, -0.5))
            .expect("start");
        p.handle_pointer(&pointer(PointerPhase::Move, x, 0.0, -41.0))
            .expect("move");
        p.handle_pointer(&pointer(PointerPhase::End, x, 0.0, -41.0))
            .expect("end");
        settle(&mut p);

        assert_eq!(p.field_text(), "2024-06-11 09:05:00");
        let date_column = p.column(ColumnKind::Date).expect("date column");
        assert_eq!(date_column.selected_value(), Some("2024-06-11"));
        assert!(date_column.len() as i32 >= p.config.full_range);
        assert!(date_column.len() >= before_len);
        let index = date_column.selected_index().expect("selected");
        assert!(!date_column.near_edge(index, p.config.visible_range));
    }

    #[test]
    fn set_value_with_unreadable_text_keeps_the_previous_value() {
        let mut p = picker();
        p.set_value(Value::Text("yesterday-ish".into()));
        assert_eq!(p.field_text(), "2024-05-01 09:05:00");

        p.set_value(Value::Text("2024-05-01 14:00:00".into()));
        assert_eq!(selected(&p, ColumnKind::Hour), Some("2".into()));
        assert_eq!(selected(&p, ColumnKind::Meridiem), Some("PM".into()));
    }

    #[test]
    fn refreshing_from_the_field_recenters_the_date_window() {
        let mut p = picker();
        p.refresh_from_field("2024-12-25 08:30:00").expect("refresh");
        assert_eq!(selected(&p, ColumnKind::Date), Some("2024-12-25".into()));
        let date_column = p.column(ColumnKind::Date).expect("date column");
        let index = date_column.selected_index().expect("selected");
        // A rebuilt window is centered: the anchor sits in the middle.
        assert_eq!(index, date_column.len() / 2);
    }
}
