//! The "last update / next update" status line.

use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};
use handlebars::Handlebars;
use serde::Serialize;

use crate::model::Interval;

/// Template used when none is configured.
pub const DEFAULT_STATUS_TEMPLATE: &str = "last update: {{last}}, next update: {{next}}";

/// Times shown after every update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStatus {
    /// When the cycle ran.
    pub last: SystemTime,
    /// When the next cycle is due (`last + interval`).
    pub next: SystemTime,
    /// The timer's interval.
    pub interval: Interval,
}

impl UpdateStatus {
    /// Computes the status for a cycle that ran at `now`.
    #[must_use]
    pub fn new(now: SystemTime, interval: Interval) -> Self {
        Self {
            last: now,
            next: now + interval.period(),
            interval,
        }
    }
}

/// Destination for the status line.
pub trait StatusSink: Send + Sync {
    /// Shows the status of the cycle that just ran.
    fn show(&self, status: &UpdateStatus);
}

/// Data available to the status template.
#[derive(Debug, Serialize)]
struct StatusData {
    last: String,
    next: String,
    interval: u32,
}

/// Renders [`UpdateStatus`] through a Handlebars template.
///
/// Available variables:
/// - `{{last}}`: time of the cycle, `HH:MM:SS`
/// - `{{next}}`: time of the next cycle, `HH:MM:SS`
/// - `{{interval}}`: interval in minutes
#[derive(Debug, Clone)]
pub struct StatusFormatter {
    template: String,
}

impl StatusFormatter {
    /// Creates a formatter, checking the template syntax.
    ///
    /// # Errors
    ///
    /// Returns the Handlebars error if the template does not compile.
    pub fn new(template: impl Into<String>) -> Result<Self, handlebars::RenderError> {
        let formatter = Self {
            template: template.into(),
        };
        let epoch = UpdateStatus::new(SystemTime::UNIX_EPOCH, Interval::DEFAULT);
        formatter.render_in(&epoch, &chrono::Utc)?;
        Ok(formatter)
    }

    /// Returns the template source.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders the status in the local time zone.
    ///
    /// # Errors
    ///
    /// Returns the Handlebars error if rendering fails.
    pub fn render(&self, status: &UpdateStatus) -> Result<String, handlebars::RenderError> {
        self.render_in(status, &Local)
    }

    /// Renders the status with times shown in `tz`.
    ///
    /// # Errors
    ///
    /// Returns the Handlebars error if rendering fails.
    pub fn render_in<Tz: TimeZone>(
        &self,
        status: &UpdateStatus,
        tz: &Tz,
    ) -> Result<String, handlebars::RenderError>
    where
        Tz::Offset: std::fmt::Display,
    {
        let data = StatusData {
            last: clock_time(status.last, tz),
            next: clock_time(status.next, tz),
            interval: status.interval.minutes(),
        };

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.render_template(&self.template, &data)
    }
}

impl Default for StatusFormatter {
    fn default() -> Self {
        Self {
            template: DEFAULT_STATUS_TEMPLATE.to_string(),
        }
    }
}

fn clock_time<Tz: TimeZone>(time: SystemTime, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::<chrono::Utc>::from(time)
        .with_timezone(tz)
        .format("%H:%M:%S")
        .to_string()
}

/// Writes the status line to the log.
#[derive(Debug, Clone, Default)]
pub struct LogStatusSink {
    formatter: StatusFormatter,
}

impl LogStatusSink {
    /// Creates a sink rendering through `formatter`.
    #[must_use]
    pub const fn new(formatter: StatusFormatter) -> Self {
        Self { formatter }
    }
}

impl StatusSink for LogStatusSink {
    fn show(&self, status: &UpdateStatus) {
        match self.formatter.render(status) {
            Ok(line) => tracing::info!("{line}"),
            Err(e) => tracing::warn!("Failed to render status line: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn next_is_last_plus_interval() {
        let status = UpdateStatus::new(at(1_000), Interval::new(7).unwrap());

        assert_eq!(status.next, at(1_000 + 7 * 60));
    }

    #[test]
    fn default_template_shows_both_times() {
        let status = UpdateStatus::new(at(3_600 + 2 * 60 + 3), Interval::new(5).unwrap());

        let line = StatusFormatter::default()
            .render_in(&status, &chrono::Utc)
            .unwrap();

        assert_eq!(line, "last update: 01:02:03, next update: 01:07:03");
    }

    #[test]
    fn next_wraps_past_midnight() {
        let status = UpdateStatus::new(at(23 * 3_600 + 58 * 60), Interval::new(5).unwrap());

        let line = StatusFormatter::new("{{next}}")
            .unwrap()
            .render_in(&status, &chrono::Utc)
            .unwrap();

        assert_eq!(line, "00:03:00");
    }

    #[test]
    fn custom_template_can_use_interval() {
        let formatter = StatusFormatter::new("every {{interval}} min <until {{next}}>").unwrap();
        let status = UpdateStatus::new(at(0), Interval::new(60).unwrap());

        let line = formatter.render_in(&status, &chrono::Utc).unwrap();

        assert_eq!(line, "every 60 min <until 01:00:00>");
    }

    #[test]
    fn invalid_template_is_rejected() {
        assert!(StatusFormatter::new("{{#if}}").is_err());
    }

    #[test]
    fn local_render_uses_clock_format() {
        let line = StatusFormatter::new("{{last}}")
            .unwrap()
            .render(&UpdateStatus::new(SystemTime::now(), Interval::DEFAULT))
            .unwrap();

        let parts: Vec<&str> = line.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2));
    }
}
