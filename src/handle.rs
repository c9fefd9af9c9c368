use chrono::NaiveDate;

use crate::binding::DateState;

/// Imperative access to a mounted [`Calendar`](crate::calendar::Calendar).
///
/// Mostly useful for uncontrolled pickers, where the caller has no copy of
/// the date of its own.
#[derive(Clone)]
pub struct CalendarHandle {
    state: DateState,
}

impl CalendarHandle {
    pub(crate) fn new(state: DateState) -> Self {
        CalendarHandle { state }
    }

    pub fn get_date(&self) -> NaiveDate {
        self.state.get()
    }

    /// Goes through the same setter as clicks, so a controlled picker only
    /// notifies its owner.
    pub fn set_date(&self, date: NaiveDate) {
        self.state.set(date)
    }
}
