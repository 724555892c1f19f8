use serde::Deserialize;

use crate::core::error::PickerError;

/// Which date-time component a column represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Date,
    Hour,
    Minute,
    Meridiem,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Meridiem => "meridiem",
        }
    }
}

/// Instance-wide picker geometry.
///
/// `item_height` is the height of one item in gesture units; the terminal
/// renderer draws one row per item and scales pointer distances to match.
/// `visible_range` doubles as the viewport row count and the edge-expansion
/// margin of the date window; `full_range` is the number of days kept
/// materialized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub item_height: i32,
    pub visible_range: usize,
    pub full_range: i32,
    pub selected_marker: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            item_height: 50,
            visible_range: 5,
            full_range: 90,
            selected_marker: "❯".to_string(),
        }
    }
}

/// Declaration of a single column.
///
/// `mode` applies to hour columns (12 or 24, default 24); `increment`
/// applies to minute columns (must divide 60, default 1).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSpec {
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    #[serde(default)]
    pub mode: Option<u8>,
    #[serde(default)]
    pub increment: Option<u32>,
}

impl ColumnSpec {
    pub fn date() -> Self {
        Self::plain(ColumnKind::Date)
    }

    pub fn hour(mode: u8) -> Self {
        Self {
            mode: Some(mode),
            ..Self::plain(ColumnKind::Hour)
        }
    }

    pub fn minute(increment: u32) -> Self {
        Self {
            increment: Some(increment),
            ..Self::plain(ColumnKind::Minute)
        }
    }

    pub fn meridiem() -> Self {
        Self::plain(ColumnKind::Meridiem)
    }

    fn plain(kind: ColumnKind) -> Self {
        Self {
            kind,
            mode: None,
            increment: None,
        }
    }

    pub fn hour_mode(&self) -> u8 {
        self.mode.unwrap_or(24)
    }

    pub fn minute_increment(&self) -> u32 {
        self.increment.unwrap_or(1)
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        match self.kind {
            ColumnKind::Hour => {
                let mode = self.hour_mode();
                if mode != 12 && mode != 24 {
                    return Err(PickerError::InvalidConfig {
                        reason: format!("hour mode must be 12 or 24, got {mode}"),
                    });
                }
            }
            ColumnKind::Minute => {
                let increment = self.minute_increment();
                if increment == 0 || 60 % increment != 0 {
                    return Err(PickerError::InvalidConfig {
                        reason: format!("minute increment must divide 60, got {increment}"),
                    });
                }
            }
            ColumnKind::Date | ColumnKind::Meridiem => {}
        }
        Ok(())
    }
}

/// A complete picker declaration: geometry plus the ordered column list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PickerSetup {
    #[serde(default)]
    pub config: PickerConfig,
    pub columns: Vec<ColumnSpec>,
}

impl PickerSetup {
    /// The classic wheel layout: date, 12-hour clock, minutes of five,
    /// AM/PM.
    pub fn standard() -> Self {
        Self {
            config: PickerConfig::default(),
            columns: vec![
                ColumnSpec::date(),
                ColumnSpec::hour(12),
                ColumnSpec::minute(5),
                ColumnSpec::meridiem(),
            ],
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, PickerError> {
        serde_yaml::from_str(text).map_err(|err| PickerError::InvalidConfig {
            reason: err.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        for spec in &self.columns {
            spec.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnKind, ColumnSpec, PickerSetup};

    #[test]
    fn yaml_setup_fills_defaults() {
        let setup = PickerSetup::from_yaml(
            "columns:\n  - type: date\n  - type: hour\n    mode: 12\n  - type: minute\n    increment: 5\n  - type: meridiem\n",
        )
        .expect("setup should parse");

        assert_eq!(setup.config.visible_range, 5);
        assert_eq!(setup.config.full_range, 90);
        assert_eq!(setup.config.item_height, 50);
        assert_eq!(setup.columns.len(), 4);
        assert_eq!(setup.columns[0].kind, ColumnKind::Date);
        assert_eq!(setup.columns[1].hour_mode(), 12);
        assert_eq!(setup.columns[2].minute_increment(), 5);
        setup.validate().expect("standard layout should validate");
    }

    #[test]
    fn hour_mode_defaults_to_24() {
        let spec = ColumnSpec {
            kind: ColumnKind::Hour,
            mode: None,
            increment: None,
        };
        assert_eq!(spec.hour_mode(), 24);
        spec.validate().expect("default mode should validate");
    }

    #[test]
    fn bad_minute_increment_is_rejected() {
        assert!(ColumnSpec::minute(7).validate().is_err());
        assert!(ColumnSpec::minute(0).validate().is_err());
        ColumnSpec::minute(15)
            .validate()
            .expect("divisor of 60 should validate");
    }

    #[test]
    fn bad_hour_mode_is_rejected() {
        assert!(ColumnSpec::hour(10).validate().is_err());
    }
}
