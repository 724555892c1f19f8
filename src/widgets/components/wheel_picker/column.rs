use crate::core::config::{ColumnKind, ColumnSpec, PickerConfig};
use crate::core::error::PickerError;
use crate::widgets::shared::calendar::{
    Date, DateRange, add_days, month_short_name, weekday_of,
};

/// One entry of a column. Identity is the value; the label is what the
/// user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub value: String,
    pub label: String,
}

impl Item {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Value doubles as label, the common case for clock columns.
    pub fn keyed(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Injected formatting collaborator for date items.
pub trait DateLabeler: Send {
    /// Display string, e.g. "Fri May 3".
    fn label(&self, date: Date) -> String;

    /// Machine value string; the default ISO form is what the date commit
    /// parses back.
    fn value(&self, date: Date) -> String {
        date.to_iso()
    }
}

/// `ddd MMM D` rendering, e.g. "Fri May 3".
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortDateLabeler;

impl DateLabeler for ShortDateLabeler {
    fn label(&self, date: Date) -> String {
        format!(
            "{} {} {}",
            weekday_of(date).short_name(),
            month_short_name(date.month),
            date.day
        )
    }
}

/// Half of the materialized window, rounded up for odd spans.
fn half_span(full_range: i32) -> i32 {
    (full_range + 1) / 2
}

/// One wheel: the item list, its vertical offset against the selection
/// indicator, and the selected index.
///
/// The offset is the top edge of the first item relative to the top of the
/// indicator; an item rests under the indicator when the offset equals
/// `-index * item_height`.
pub struct PickerColumn {
    kind: ColumnKind,
    spec: ColumnSpec,
    item_height: i32,
    items: Vec<Item>,
    offset: f32,
    selected: Option<usize>,
    /// Date of the first item; tracked so re-windowing never has to parse
    /// labeler-controlled values back into dates.
    window_start: Option<Date>,
}

impl PickerColumn {
    /// Materializes the item set: fixed lists for clock columns, the
    /// initial anchor-centered window for the date column.
    pub fn build(
        spec: &ColumnSpec,
        config: &PickerConfig,
        labeler: &dyn DateLabeler,
        anchor: Date,
    ) -> Result<Self, PickerError> {
        spec.validate()?;
        let mut window_start = None;
        let items = match spec.kind {
            ColumnKind::Hour => hour_items(spec.hour_mode()),
            ColumnKind::Minute => minute_items(spec.minute_increment()),
            ColumnKind::Meridiem => meridiem_items(),
            ColumnKind::Date => {
                let half = half_span(config.full_range);
                let start = add_days(anchor, -half);
                let range = DateRange::daily(start, add_days(anchor, half))?;
                window_start = Some(start);
                date_items(&range, labeler)
            }
        };
        Ok(Self {
            kind: spec.kind,
            spec: spec.clone(),
            item_height: config.item_height,
            items,
            offset: 0.0,
            selected: None,
            window_start,
        })
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_height(&self) -> i32 {
        self.item_height
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub(super) fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.items.get(idx))
            .map(|item| item.value.as_str())
    }

    pub fn value_of(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.value.as_str())
    }

    /// Offset at which `index` rests exactly under the indicator.
    pub fn resting_offset(&self, index: usize) -> f32 {
        -(index as f32) * self.item_height as f32
    }

    /// Lowest offset the column may take: the last item still covers the
    /// indicator.
    pub fn min_offset(&self) -> f32 {
        match self.items.len() {
            0 => 0.0,
            len => -((len - 1) as f32) * self.item_height as f32,
        }
    }

    pub(super) fn select_index(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = Some(index);
        }
    }

    /// Moves the selection to the item with this value. A missing value is
    /// a silent no-op; out-of-window dates stay unreachable until the next
    /// expansion brings them in.
    pub fn select_by_value(&mut self, value: &str) -> bool {
        match self.items.iter().position(|item| item.value == value) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    /// True when `index` sits within `margin` items of either end.
    pub fn near_edge(&self, index: usize, margin: usize) -> bool {
        index < margin || index + margin >= self.items.len()
    }

    pub fn window_start(&self) -> Option<Date> {
        self.window_start
    }

    /// Re-centers the sliding window on the item at `anchor_index`.
    ///
    /// Keeps `visible_range` old items on each side of the anchor, then
    /// wraps them with fresh ranges of `full_range/2 + visible_range` days
    /// each. The anchor's visual position is preserved exactly: every trim
    /// and prepend shifts the offset by the height it removed or added, so
    /// the user never sees a jump.
    pub(super) fn expand_around(
        &mut self,
        anchor_index: usize,
        config: &PickerConfig,
        labeler: &dyn DateLabeler,
    ) -> Result<(), PickerError> {
        if self.kind != ColumnKind::Date || self.items.is_empty() {
            return Ok(());
        }
        let Some(old_start) = self.window_start else {
            return Ok(());
        };
        let anchor_index = anchor_index.min(self.items.len() - 1);
        let height = self.item_height as f32;
        let margin = config.visible_range;

        let lo = anchor_index.saturating_sub(margin);
        let hi = (anchor_index + margin).min(self.items.len() - 1);
        self.items.truncate(hi + 1);
        self.items.drain(..lo);
        self.offset += lo as f32 * height;
        let mut anchor = anchor_index - lo;

        let kept_first = add_days(old_start, lo as i32);
        let kept_last = add_days(old_start, hi as i32);
        let side = half_span(config.full_range) + margin as i32;

        let new_start = add_days(kept_first, -side);
        let before = DateRange::daily(new_start, add_days(kept_first, -1))?;
        let prepended = date_items(&before, labeler);
        self.offset -= prepended.len() as f32 * height;
        anchor += prepended.len();
        self.items.splice(0..0, prepended);

        let after = DateRange::daily(add_days(kept_last, 1), add_days(kept_last, side))?;
        self.items.extend(date_items(&after, labeler));

        self.window_start = Some(new_start);
        self.selected = Some(anchor);
        Ok(())
    }
}

fn hour_items(mode: u8) -> Vec<Item> {
    (1..=mode as u32).map(|h| Item::keyed(h.to_string())).collect()
}

fn minute_items(increment: u32) -> Vec<Item> {
    (0..60 / increment)
        .map(|i| Item::keyed(format!("{:02}", i * increment)))
        .collect()
}

fn meridiem_items() -> Vec<Item> {
    vec![Item::keyed("AM"), Item::keyed("PM")]
}

fn date_items(range: &DateRange, labeler: &dyn DateLabeler) -> Vec<Item> {
    range
        .iter()
        .map(|date| Item::new(labeler.value(date), labeler.label(date)))
        .collect()
}
