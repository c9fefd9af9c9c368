use chrono::NaiveDate;
use std::fmt::{Display, Write};
use unicode_width::UnicodeWidthStr;
use unsegen::base::*;
use unsegen::widget::*;

use super::Theme;
use crate::calendar::{Calendar, Target};
use crate::grid::{self, GridCell, WEEKDAY_LABELS};

const CELL_WIDTH: usize = 4;
const COLUMNS: usize = 7;
const NAV_WIDTH: usize = 3;
const WEEK_ROWS: usize = 6;

const HEADER_ROW: usize = 0;
const FIRST_WEEK_ROW: usize = 2;

pub const PANE_WIDTH: usize = COLUMNS * CELL_WIDTH;
pub const PANE_HEIGHT: usize = FIRST_WEEK_ROW + WEEK_ROWS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Nav,
    Title,
    Weekday,
    Padding,
    Day,
    SelectedDay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    role: Role,
}

impl Segment {
    fn new(text: impl Into<String>, role: Role) -> Self {
        Segment {
            text: text.into(),
            role,
        }
    }
}

struct DayCell {
    day_num: u32,
    focus_char: Option<char>,
    selected: bool,
}

impl Display for DayCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arg_focus = if self.selected {
            self.focus_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, " {}{:>2}", arg_focus, self.day_num)
    }
}

fn header_line(title: &str) -> Vec<Segment> {
    let inner = PANE_WIDTH - 2 * NAV_WIDTH;
    let title_width = UnicodeWidthStr::width(title);
    let left = inner.saturating_sub(title_width) / 2;
    let right = inner.saturating_sub(title_width + left);

    vec![
        Segment::new(" < ", Role::Nav),
        Segment::new(" ".repeat(left), Role::Padding),
        Segment::new(title, Role::Title),
        Segment::new(" ".repeat(right), Role::Padding),
        Segment::new(" > ", Role::Nav),
    ]
}

fn weekday_line() -> Vec<Segment> {
    WEEKDAY_LABELS
        .iter()
        .map(|label| {
            let pad = " ".repeat(CELL_WIDTH - UnicodeWidthStr::width(*label));
            Segment::new(format!("{}{}", pad, label), Role::Weekday)
        })
        .collect()
}

fn week_lines(cells: &[GridCell], focus_char: Option<char>) -> Vec<Vec<Segment>> {
    cells
        .chunks(COLUMNS)
        .map(|week| {
            week.iter()
                .map(|cell| match *cell {
                    GridCell::Blank => Segment::new(" ".repeat(CELL_WIDTH), Role::Padding),
                    GridCell::Day { day, selected } => Segment::new(
                        DayCell {
                            day_num: day,
                            focus_char,
                            selected,
                        }
                        .to_string(),
                        if selected { Role::SelectedDay } else { Role::Day },
                    ),
                })
                .collect()
        })
        .collect()
}

fn lines(date: NaiveDate, focus_char: Option<char>) -> Vec<Vec<Segment>> {
    let mut lines = vec![header_line(&grid::title(date)), weekday_line()];
    lines.extend(week_lines(&grid::month_grid(date), focus_char));
    lines
}

/// Resolves a click at `col`/`row`, relative to the pane's top left corner.
pub fn hit_test(date: NaiveDate, col: usize, row: usize) -> Option<Target> {
    if col >= PANE_WIDTH {
        return None;
    }

    if row == HEADER_ROW {
        return if col < NAV_WIDTH {
            Some(Target::PrevMonth)
        } else if col >= PANE_WIDTH - NAV_WIDTH {
            Some(Target::NextMonth)
        } else {
            None
        };
    }

    if row < FIRST_WEEK_ROW || row >= PANE_HEIGHT {
        return None;
    }

    let idx = (row - FIRST_WEEK_ROW) * COLUMNS + col / CELL_WIDTH;
    grid::month_grid(date)
        .get(idx)
        .and_then(GridCell::day)
        .map(Target::Day)
}

/// The pane as plain text, one line per row, without styling.
pub fn render_plain(calendar: &Calendar, theme: &Theme) -> String {
    lines(calendar.date(), theme.focus_day_char)
        .iter()
        .map(|line| {
            line.iter()
                .map(|seg| seg.text.as_str())
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct MonthPane<'a> {
    calendar: &'a Calendar,
    theme: &'a Theme,
}

impl<'a> MonthPane<'a> {
    pub fn new(calendar: &'a Calendar, theme: &'a Theme) -> Self {
        MonthPane { calendar, theme }
    }

    fn style_of(&self, role: Role) -> StyleModifier {
        match role {
            Role::Nav => self.theme.nav_style,
            Role::Title => self.theme.title_style,
            Role::Weekday => self.theme.weekday_style,
            Role::Padding | Role::Day => self.theme.day_style,
            Role::SelectedDay => self.theme.focus_day_style,
        }
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(PANE_WIDTH),
            height: RowDemand::exact(PANE_HEIGHT),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window);

        for (row, line) in lines(self.calendar.date(), self.theme.focus_day_char)
            .iter()
            .enumerate()
        {
            cursor.move_to(ColIndex::new(0), RowIndex::new(row as i32));
            for seg in line {
                cursor.set_style_modifier(self.style_of(seg.role));
                write!(&mut cursor, "{}", seg.text).unwrap();
            }
        }
    }
}
