//! Controlled / uncontrolled ownership of the picker's current date.
//!
//! A [`Calendar`](crate::calendar::Calendar) never cares who owns its date.
//! It reads and writes through a [`DateState`], which was fixed to one of two
//! modes when the component was mounted:
//!
//! * **controlled**: the caller passed a `value`. Reads return that value,
//!   writes are forwarded to the caller's `on_change` and nothing is stored.
//!   The displayed date only changes once the caller feeds a new value back
//!   with [`DateState::receive_value`].
//! * **uncontrolled**: the component seeds its own date from `default_value`
//!   (or today) and writes replace it directly. `on_change` is not called.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::date;

pub type OnChange = Rc<dyn Fn(NaiveDate)>;

#[derive(Clone, Default)]
pub struct CalendarProps {
    pub value: Option<NaiveDate>,
    pub default_value: Option<NaiveDate>,
    pub on_change: Option<OnChange>,
}

impl CalendarProps {
    pub fn new() -> Self {
        CalendarProps::default()
    }

    pub fn value(mut self, value: NaiveDate) -> Self {
        self.value = Some(value);
        self
    }

    pub fn value_opt(mut self, value: Option<NaiveDate>) -> Self {
        self.value = value;
        self
    }

    pub fn default_value(mut self, value: NaiveDate) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn default_value_opt(mut self, value: Option<NaiveDate>) -> Self {
        self.default_value = value;
        self
    }

    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(NaiveDate) + 'static,
    {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl fmt::Debug for CalendarProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarProps")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

pub enum DateBinding {
    ExternallyOwned {
        value: NaiveDate,
        on_change: Option<OnChange>,
    },
    LocallyOwned {
        value: NaiveDate,
    },
}

impl DateBinding {
    pub fn from_props(props: CalendarProps) -> Self {
        match props.value {
            Some(value) => DateBinding::ExternallyOwned {
                value,
                on_change: props.on_change,
            },
            None => DateBinding::LocallyOwned {
                value: props.default_value.unwrap_or_else(date::today),
            },
        }
    }

    pub fn get(&self) -> NaiveDate {
        match self {
            DateBinding::ExternallyOwned { value, .. } => *value,
            DateBinding::LocallyOwned { value } => *value,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, DateBinding::ExternallyOwned { .. })
    }
}

/// Shared handle on a [`DateBinding`].
///
/// Cloning is cheap; all clones observe and mutate the same date.
#[derive(Clone)]
pub struct DateState {
    inner: Rc<RefCell<DateBinding>>,
}

impl DateState {
    pub fn new(props: CalendarProps) -> Self {
        DateState {
            inner: Rc::new(RefCell::new(DateBinding::from_props(props))),
        }
    }

    pub fn get(&self) -> NaiveDate {
        self.inner.borrow().get()
    }

    pub fn is_controlled(&self) -> bool {
        self.inner.borrow().is_controlled()
    }

    /// The unified setter.
    pub fn set(&self, new: NaiveDate) {
        // The callback runs after the borrow ends so it may touch the state.
        let notify = {
            let mut binding = self.inner.borrow_mut();
            match &mut *binding {
                DateBinding::ExternallyOwned { on_change, .. } => on_change.clone(),
                DateBinding::LocallyOwned { value } => {
                    log::debug!("date {} -> {}", value, new);
                    *value = new;
                    None
                }
            }
        };

        if let Some(on_change) = notify {
            log::debug!("requesting change to {}", new);
            on_change(new);
        }
    }

    /// A new `value` handed down by the owner of a controlled picker.
    pub fn receive_value(&self, new: NaiveDate) {
        match &mut *self.inner.borrow_mut() {
            DateBinding::ExternallyOwned { value, .. } => *value = new,
            DateBinding::LocallyOwned { .. } => {
                log::warn!("ignoring value {} for uncontrolled calendar", new)
            }
        }
    }
}
