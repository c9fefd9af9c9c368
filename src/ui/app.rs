use std::cell::{Cell, RefCell};
use std::fmt::Write;
use std::rc::Rc;

use chrono::NaiveDate;
use termion::event::{Event, Key, MouseButton, MouseEvent};
use unsegen::base::*;
use unsegen::input::Input;
use unsegen::widget::*;

use super::month_pane::{self, MonthPane};
use crate::binding::CalendarProps;
use crate::calendar::Calendar;
use crate::config::Config;
use crate::events::{Dispatcher, Event as AppEvent};
use crate::handle::CalendarHandle;

const DATE_FORMAT: &str = "%Y-%m-%d";

struct StatusLine {
    text: String,
    style: StyleModifier,
}

impl Widget for StatusLine {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(month_pane::PANE_WIDTH),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window).style_modifier(self.style);
        write!(&mut cursor, "{}", self.text).unwrap();
    }
}

/// Hosts a single [`Calendar`] in the terminal.
///
/// In controlled mode the app plays the role of the owning parent: it keeps
/// its own copy of the date, updates it from `on_change` and hands it back to
/// the calendar before every frame.
pub struct App<'a> {
    config: &'a Config,
    calendar: Calendar,
    handle: CalendarHandle,
    owner: Option<Rc<Cell<NaiveDate>>>,
    last_change: Rc<RefCell<Option<NaiveDate>>>,
}

impl<'a> App<'a> {
    pub fn uncontrolled(config: &'a Config, default_value: Option<NaiveDate>) -> App<'a> {
        let (calendar, handle) =
            Calendar::mount(CalendarProps::new().default_value_opt(default_value));

        App {
            config,
            calendar,
            handle,
            owner: None,
            last_change: Rc::new(RefCell::new(None)),
        }
    }

    pub fn controlled(config: &'a Config, value: NaiveDate) -> App<'a> {
        let owner = Rc::new(Cell::new(value));
        let last_change = Rc::new(RefCell::new(None));

        let props = {
            let owner = owner.clone();
            let last_change = last_change.clone();
            CalendarProps::new().value(value).on_change(move |date| {
                log::info!("date changed to {}", date.format(DATE_FORMAT));
                owner.set(date);
                *last_change.borrow_mut() = Some(date);
            })
        };
        let (calendar, handle) = Calendar::mount(props);

        App {
            config,
            calendar,
            handle,
            owner: Some(owner),
            last_change,
        }
    }

    pub fn handle(&self) -> &CalendarHandle {
        &self.handle
    }

    /// Feeds the owner's copy back in, like a parent re-rendering.
    fn sync(&self) {
        if let Some(owner) = &self.owner {
            self.calendar.set_value(owner.get());
        }
    }

    /// Mouse press at 1-based terminal coordinates.
    fn click(&self, x: u16, y: u16) {
        let (col, row) = (x.saturating_sub(1) as usize, y.saturating_sub(1) as usize);
        match month_pane::hit_test(self.calendar.date(), col, row) {
            Some(target) => {
                log::debug!("click at {}:{} -> {:?}", col, row, target);
                self.calendar.activate(target);
            }
            None => log::trace!("click at {}:{} hit nothing", col, row),
        }
    }

    /// Returns `false` once the user asked to leave.
    fn handle_input(&self, input: Input) -> bool {
        match input.event {
            Event::Key(Key::Char('q')) | Event::Key(Key::Esc) | Event::Key(Key::Char('\n')) => {
                return false
            }
            Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) => self.click(x, y),
            _ => {}
        }
        true
    }

    fn status_text(&self) -> String {
        let selected = self.handle.get_date().format(DATE_FORMAT);
        match *self.last_change.borrow() {
            Some(changed) => format!(
                "{}  (on_change: {})",
                selected,
                changed.format(DATE_FORMAT)
            ),
            None if self.calendar.is_controlled() => format!("{}  (controlled)", selected),
            None => selected.to_string(),
        }
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(MonthPane::new(&self.calendar, &self.config.theme))
            .widget(StatusLine {
                text: self.status_text(),
                style: self.config.theme.status_style,
            })
    }

    pub fn run(
        &self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        while run {
            if let Ok(event) = dispatcher.next() {
                match event {
                    AppEvent::Update => {}
                    AppEvent::Input(input) => run = self.handle_input(input),
                }
            } else {
                log::warn!("event channel closed");
                run = false;
            }

            self.sync();

            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn controlled_click_goes_through_owner() {
        let config = Config::default();
        let app = App::controlled(&config, ymd(2024, 3, 15));

        // 2024-03-20 is the Wednesday of the fourth week row
        app.click(13, 6);
        assert_eq!(app.calendar.date(), ymd(2024, 3, 15));
        assert_eq!(app.owner.as_ref().map(|o| o.get()), Some(ymd(2024, 3, 20)));

        app.sync();
        assert_eq!(app.calendar.date(), ymd(2024, 3, 20));
        assert_eq!(app.status_text(), "2024-03-20  (on_change: 2024-03-20)");
    }

    #[test]
    fn uncontrolled_click_updates_directly() {
        let config = Config::default();
        let app = App::uncontrolled(&config, Some(ymd(2024, 3, 15)));

        app.click(1, 1);
        assert_eq!(app.handle().get_date(), ymd(2024, 2, 1));
        assert_eq!(app.status_text(), "2024-02-01");
        assert!(app.last_change.borrow().is_none());
    }

    #[test]
    fn clicks_outside_the_pane_are_ignored() {
        let config = Config::default();
        let app = App::uncontrolled(&config, Some(ymd(2024, 3, 15)));

        app.click(80, 1);
        app.click(1, 3);
        assert_eq!(app.handle().get_date(), ymd(2024, 3, 15));
    }

    fn input(event: Event) -> Input {
        Input {
            event,
            raw: Vec::new(),
        }
    }

    #[test]
    fn input_is_handled_through_a_shared_app() {
        let config = Config::default();
        let app = App::uncontrolled(&config, Some(ymd(2024, 3, 15)));
        let shared: &App = &app;

        let press = Event::Mouse(MouseEvent::Press(MouseButton::Left, 28, 1));
        assert!(shared.handle_input(input(press)));
        assert_eq!(shared.handle().get_date(), ymd(2024, 4, 1));

        assert!(shared.handle_input(input(Event::Key(Key::Char('x')))));
        assert!(!shared.handle_input(input(Event::Key(Key::Char('q')))));
        assert!(!shared.handle_input(input(Event::Key(Key::Esc))));
        assert!(!shared.handle_input(input(Event::Key(Key::Char('\n')))));
    }

    #[test]
    fn controlled_status_before_any_change() {
        let config = Config::default();
        let app = App::controlled(&config, ymd(2024, 3, 15));
        assert_eq!(app.status_text(), "2024-03-15  (controlled)");
    }
}
