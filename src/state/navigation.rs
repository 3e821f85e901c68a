//! Keyboard navigation over the calendar grid.
//!
//! Focus moves by day, row, section and page. Every move clamps the focused
//! date into the bounds and reconciles the visible range, so focus can never
//! leave the window the caller renders.

use crate::models::date::CalendarDate;
use crate::models::duration::DateDuration;
use crate::state::align::{align_start, constrain_start, constrain_value};
use crate::state::CalendarState;
use crate::utils::date::{end_of_month, end_of_week, start_of_month, start_of_week};

impl CalendarState {
    /// Focus a specific cell. The date is converted into the display
    /// calendar and clamped into the bounds, and marks the grid focused.
    pub fn set_focused_date(&mut self, date: CalendarDate) {
        self.focus_cell(date.to_calendar(self.calendar()));
        self.focused = true;
    }

    pub fn focus_next_day(&mut self) {
        self.focus_cell(self.focused_date().add(DateDuration::days(1)));
    }

    pub fn focus_previous_day(&mut self) {
        self.focus_cell(self.focused_date().subtract(DateDuration::days(1)));
    }

    /// Move focus one row down. In day-sized views a row is a whole page.
    pub fn focus_next_row(&mut self) {
        let duration = self.visible_duration();
        if duration.days != 0 {
            self.focus_next_page();
        } else {
            self.focus_cell(self.focused_date().add(DateDuration::weeks(1)));
        }
    }

    pub fn focus_previous_row(&mut self) {
        let duration = self.visible_duration();
        if duration.days != 0 {
            self.focus_previous_page();
        } else {
            self.focus_cell(self.focused_date().subtract(DateDuration::weeks(1)));
        }
    }

    /// Move focus and the visible range forward by one page.
    pub fn focus_next_page(&mut self) {
        self.page(false);
    }

    /// Move focus and the visible range backward by one page.
    pub fn focus_previous_page(&mut self) {
        self.page(true);
    }

    /// Focus the first day of the current section: the range start for
    /// day-sized views, otherwise the start of the focused week or month.
    pub fn focus_section_start(&mut self) {
        let duration = self.visible_duration();
        if duration.days != 0 {
            self.focus_cell(self.start_date());
        } else if duration.weeks != 0 {
            self.focus_cell(start_of_week(&self.focused_date(), self.first_day_of_week()));
        } else {
            self.focus_cell(start_of_month(&self.focused_date()));
        }
    }

    /// Focus the last day of the current section.
    pub fn focus_section_end(&mut self) {
        let duration = self.visible_duration();
        if duration.days != 0 {
            self.focus_cell(self.end_date());
        } else if duration.weeks != 0 {
            self.focus_cell(end_of_week(&self.focused_date(), self.first_day_of_week()));
        } else {
            self.focus_cell(end_of_month(&self.focused_date()));
        }
    }

    /// Move focus to the next section. Small steps move by one unit of the
    /// visible duration; `larger` steps move by the next unit up (a month
    /// for week views, a year for month views).
    pub fn focus_next_section(&mut self, larger: bool) {
        if let Some(step) = self.section_step(larger) {
            self.focus_cell(self.focused_date().add(step));
        } else if self.visible_duration().days != 0 {
            self.focus_next_page();
        }
    }

    pub fn focus_previous_section(&mut self, larger: bool) {
        if let Some(step) = self.section_step(larger) {
            self.focus_cell(self.focused_date().subtract(step));
        } else if self.visible_duration().days != 0 {
            self.focus_previous_page();
        }
    }

    fn section_step(&self, larger: bool) -> Option<DateDuration> {
        let duration = self.visible_duration();
        if duration.days != 0 {
            // Day-sized views only ever page.
            return None;
        }
        if !larger {
            return Some(duration.unit());
        }
        if duration.weeks != 0 {
            Some(DateDuration::months(1))
        } else {
            Some(DateDuration::years(1))
        }
    }

    pub(crate) fn focus_cell(&mut self, date: CalendarDate) {
        let date = constrain_value(date, self.min_value, self.max_value);
        self.focused_date.set(date);
        self.reconcile();
    }

    fn page_duration(&self) -> DateDuration {
        match self.page_behavior {
            super::PageBehavior::Visible => self.visible_duration,
            super::PageBehavior::Single => self.visible_duration.unit(),
        }
    }

    fn page(&mut self, backward: bool) {
        let page = if backward {
            self.page_duration().negated()
        } else {
            self.page_duration()
        };
        let first_day = self.first_day_of_week();

        let start = self.start_date.add(page);
        let focus = constrain_value(
            self.focused_date().add(page),
            self.min_value,
            self.max_value,
        );
        self.focused_date.set(focus);
        self.start_date = align_start(
            constrain_start(
                focus,
                start,
                self.page_duration(),
                first_day,
                self.min_value,
                self.max_value,
            ),
            self.page_duration(),
            first_day,
            None,
            None,
        );
        self.reconcile();
    }
}
