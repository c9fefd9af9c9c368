use serde::Deserialize;
use unsegen::base::style::*;

use crate::error::{Error, ErrorKind, Result};

/// The `[theme]` table of the configuration file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub header: Option<String>,
    pub weekday: Option<String>,
    pub selected_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub focus_char: Option<char>,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub nav_style: StyleModifier,
    pub title_style: StyleModifier,
    pub weekday_style: StyleModifier,
    pub day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub focus_day_char: Option<char>,
    pub status_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            nav_style: StyleModifier::default().fg_color(Color::Yellow),
            title_style: StyleModifier::default()
                .fg_color(Color::Yellow)
                .format(TextFormatModifier::default().bold(true)),
            weekday_style: StyleModifier::default().fg_color(Color::Yellow),
            day_style: StyleModifier::default(),
            focus_day_style: StyleModifier::default().bg_color(Color::Blue),
            focus_day_char: None,
            status_style: StyleModifier::default()
                .format(TextFormatModifier::default().italic(true)),
        }
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let mut theme = Theme::default();

        if let Some(name) = &config.header {
            let color = parse_color(name)?;
            theme.nav_style = theme.nav_style.fg_color(color);
            theme.title_style = theme.title_style.fg_color(color);
        }
        if let Some(name) = &config.weekday {
            theme.weekday_style = theme.weekday_style.fg_color(parse_color(name)?);
        }
        if let Some(name) = &config.selected_bg {
            theme.focus_day_style = theme.focus_day_style.bg_color(parse_color(name)?);
        }
        if let Some(name) = &config.selected_fg {
            theme.focus_day_style = theme.focus_day_style.fg_color(parse_color(name)?);
        }
        theme.focus_day_char = config.focus_char;

        Ok(theme)
    }
}

pub fn parse_color(name: &str) -> Result<Color> {
    match name.trim().to_lowercase().as_str() {
        "default" => Ok(Color::Default),
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "white" => Ok(Color::White),
        _ => Err(Error::new(
            ErrorKind::InvalidColor,
            &format!("'{}' is not a known color", name),
        )),
    }
}
