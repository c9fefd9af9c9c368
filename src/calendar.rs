use chrono::NaiveDate;

use crate::binding::{CalendarProps, DateState};
use crate::date;
use crate::grid::{self, GridCell};
use crate::handle::CalendarHandle;

/// Something the user can click on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    PrevMonth,
    NextMonth,
    Day(u32),
}

/// A single-month date picker.
pub struct Calendar {
    state: DateState,
}

impl Calendar {
    pub fn new(props: CalendarProps) -> Self {
        log::debug!("mounting calendar with {:?}", props);
        Calendar {
            state: DateState::new(props),
        }
    }

    /// Mounts a calendar and hands out an accessor bound to it.
    pub fn mount(props: CalendarProps) -> (Self, CalendarHandle) {
        let calendar = Calendar::new(props);
        let handle = calendar.handle();
        (calendar, handle)
    }

    pub fn handle(&self) -> CalendarHandle {
        CalendarHandle::new(self.state.clone())
    }

    pub fn date(&self) -> NaiveDate {
        self.state.get()
    }

    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    /// Re-render with a new `value` from the owner of a controlled calendar.
    pub fn set_value(&self, value: NaiveDate) {
        self.state.receive_value(value)
    }

    pub fn prev_month(&self) {
        self.state.set(date::prev_month_start(self.date()))
    }

    pub fn next_month(&self) {
        self.state.set(date::next_month_start(self.date()))
    }

    pub fn select_day(&self, day: u32) {
        match date::with_day(self.date(), day) {
            Some(picked) => self.state.set(picked),
            None => log::warn!("day {} is not part of {}", day, self.title()),
        }
    }

    pub fn activate(&self, target: Target) {
        match target {
            Target::PrevMonth => self.prev_month(),
            Target::NextMonth => self.next_month(),
            Target::Day(day) => self.select_day(day),
        }
    }

    pub fn title(&self) -> String {
        grid::title(self.date())
    }

    pub fn cells(&self) -> Vec<GridCell> {
        grid::month_grid(self.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn selected_day(calendar: &Calendar) -> Option<u32> {
        calendar
            .cells()
            .into_iter()
            .find(GridCell::is_selected)
            .and_then(|c| c.day())
    }

    #[test]
    fn controlled_click_notifies_but_keeps_showing_value() {
        let changes = Rc::new(Cell::new(None));
        let sink = changes.clone();
        let calendar = Calendar::new(
            CalendarProps::new()
                .value(ymd(2024, 3, 15))
                .on_change(move |d| sink.set(Some(d))),
        );

        calendar.activate(Target::Day(20));

        assert_eq!(changes.get(), Some(ymd(2024, 3, 20)));
        assert_eq!(selected_day(&calendar), Some(15));
    }

    #[test]
    fn controlled_follows_owner_state() {
        let owner = Rc::new(Cell::new(ymd(2024, 3, 15)));
        let mirror = owner.clone();
        let calendar = Calendar::new(
            CalendarProps::new()
                .value(owner.get())
                .on_change(move |d| mirror.set(d)),
        );

        calendar.next_month();
        calendar.set_value(owner.get());

        assert_eq!(calendar.date(), ymd(2024, 4, 1));
        assert_eq!(calendar.title(), "2024年四月");
    }

    #[test]
    fn uncontrolled_starts_today() {
        let before = date::today();
        let calendar = Calendar::new(CalendarProps::new());
        let after = date::today();
        let day = selected_day(&calendar);
        assert!(day == Some(before.day()) || day == Some(after.day()));
    }

    #[test]
    fn uncontrolled_handle_round_trip() {
        let (calendar, handle) = Calendar::mount(CalendarProps::new());
        handle.set_date(ymd(2025, 1, 1));
        assert_eq!(handle.get_date(), ymd(2025, 1, 1));
        assert_eq!(calendar.date(), ymd(2025, 1, 1));
        assert_eq!(selected_day(&calendar), Some(1));
    }

    #[test]
    fn handle_sees_clicks() {
        let (calendar, handle) =
            Calendar::mount(CalendarProps::new().default_value(ymd(2024, 3, 15)));
        calendar.activate(Target::Day(9));
        assert_eq!(handle.get_date(), ymd(2024, 3, 9));
    }

    #[test]
    fn handle_on_controlled_calendar_notifies_owner() {
        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        let (calendar, handle) = Calendar::mount(
            CalendarProps::new()
                .value(ymd(2024, 3, 15))
                .on_change(move |_| counter.set(counter.get() + 1)),
        );
        handle.set_date(ymd(2030, 1, 1));
        assert_eq!(changes.get(), 1);
        assert_eq!(calendar.date(), ymd(2024, 3, 15));
    }

    #[test]
    fn navigation_round_trip() {
        let calendar = Calendar::new(CalendarProps::new().default_value(ymd(2024, 1, 31)));
        calendar.next_month();
        assert_eq!(calendar.date(), ymd(2024, 2, 1));
        calendar.prev_month();
        assert_eq!(calendar.date(), ymd(2024, 1, 1));
        calendar.prev_month();
        assert_eq!(calendar.date(), ymd(2023, 12, 1));
    }

    #[test]
    fn selecting_missing_day_is_ignored() {
        let calendar = Calendar::new(CalendarProps::new().default_value(ymd(2023, 2, 10)));
        calendar.select_day(30);
        assert_eq!(calendar.date(), ymd(2023, 2, 10));
    }
}
