use chrono::{Datelike, NaiveDate};

use crate::date::{days_of_month, first_weekday_offset};

pub const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

pub const MONTH_NAMES: [&str; 12] = [
    "一月",
    "二月",
    "三月",
    "四月",
    "五月",
    "六月",
    "七月",
    "八月",
    "九月",
    "十月",
    "十一月",
    "十二月",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Alignment filler before the 1st of the month.
    Blank,
    Day { day: u32, selected: bool },
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Blank => None,
            GridCell::Day { day, .. } => Some(*day),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, GridCell::Day { selected: true, .. })
    }
}

/// Header label, e.g. `2024年三月`.
pub fn title(date: NaiveDate) -> String {
    format!("{}年{}", date.year(), MONTH_NAMES[date.month0() as usize])
}

/// Cells of `date`'s month: leading blanks, then one cell per day with the
/// day of `date` marked as selected.
pub fn month_grid(date: NaiveDate) -> Vec<GridCell> {
    let (year, month) = (date.year(), date.month());
    let offset = first_weekday_offset(year, month) as usize;

    std::iter::repeat(GridCell::Blank)
        .take(offset)
        .chain((1..=days_of_month(year, month)).map(|day| GridCell::Day {
            day,
            selected: day == date.day(),
        }))
        .collect()
}
