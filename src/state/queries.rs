//! Cell-level queries for rendering a calendar grid.

use crate::models::date::CalendarDate;
use crate::models::duration::DateDuration;
use crate::state::align::out_of_bounds;
use crate::state::CalendarState;
use crate::utils::date::{day_of_week, is_same_day, start_of_week};

impl CalendarState {
    /// Whether a date lies outside the minimum and maximum bounds.
    pub fn is_invalid(&self, date: &CalendarDate) -> bool {
        out_of_bounds(*date, self.min_value, self.max_value)
    }

    /// Whether the selected value as a whole is invalid: flagged by the
    /// caller, out of bounds, or unavailable.
    pub fn is_value_invalid(&self) -> bool {
        if self.invalid {
            return true;
        }
        match self.selected_date() {
            Some(date) => self.is_invalid(&date) || self.is_cell_unavailable(&date),
            None => false,
        }
    }

    /// Whether the given day is the selected one. Disabled and unavailable
    /// cells never show as selected.
    pub fn is_selected(&self, date: &CalendarDate) -> bool {
        self.selected_date()
            .is_some_and(|selected| is_same_day(date, &selected))
            && !self.is_cell_disabled(date)
            && !self.is_cell_unavailable(date)
    }

    /// Whether the cell currently has keyboard focus.
    pub fn is_cell_focused(&self, date: &CalendarDate) -> bool {
        self.is_focused() && is_same_day(date, &self.focused_date())
    }

    /// Whether the cell cannot be interacted with: the calendar is disabled,
    /// the day is outside the visible range, or it is out of bounds.
    pub fn is_cell_disabled(&self, date: &CalendarDate) -> bool {
        self.is_disabled()
            || *date < self.start_date()
            || *date > self.end_date()
            || self.is_invalid(date)
    }

    pub fn is_cell_unavailable(&self, date: &CalendarDate) -> bool {
        self.unavailable.as_ref().is_some_and(|predicate| predicate(date))
    }

    /// Whether paging backward is pointless: the previous day is out of
    /// bounds or the range already starts at the first representable day.
    pub fn is_previous_visible_range_invalid(&self) -> bool {
        let start = self.start_date();
        let prev = start.subtract(DateDuration::days(1));
        is_same_day(&prev, &start) || self.is_invalid(&prev)
    }

    pub fn is_next_visible_range_invalid(&self) -> bool {
        let end = self.end_date();
        let next = end.add(DateDuration::days(1));
        is_same_day(&next, &end) || self.is_invalid(&next)
    }

    /// The days of a week row, counted from the range start (or `from`).
    /// Rows hold seven entries, except at the edges of the representable
    /// range: slots before the first representable day are `None`, and a
    /// row reaching past the last representable day is cut short there.
    pub fn dates_in_week(
        &self,
        week_index: i32,
        from: Option<CalendarDate>,
    ) -> Vec<Option<CalendarDate>> {
        let first_day = self.first_day_of_week();
        let from = from.unwrap_or_else(|| self.start_date());
        let anchor = from.add(DateDuration::weeks(week_index));
        let mut date = start_of_week(&anchor, first_day);

        let mut dates: Vec<Option<CalendarDate>> = Vec::with_capacity(7);
        // Clamping at the first representable day can start the week midway;
        // pad the leading slots.
        for _ in 0..day_of_week(&date, first_day) {
            dates.push(None);
        }
        while dates.len() < 7 {
            dates.push(Some(date));
            let next = date.add(DateDuration::days(1));
            if is_same_day(&date, &next) {
                break;
            }
            date = next;
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::value::DateValue;
    use crate::services::calendar::CalendarKind;
    use crate::state::SelectionAlignment;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn greg(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::gregorian(y, m, d).unwrap()
    }

    fn june_state() -> CalendarState {
        CalendarState::builder()
            .default_focused_value(greg(2024, 6, 15))
            .build()
    }

    #[test]
    fn test_is_selected_matches_same_day_across_calendars() {
        let mut state = june_state();
        state.select_date(greg(2024, 6, 20));
        assert!(state.is_selected(&greg(2024, 6, 20)));
        assert!(state.is_selected(&greg(2024, 6, 20).to_calendar(CalendarKind::Indian)));
        assert!(!state.is_selected(&greg(2024, 6, 21)));
    }

    #[test]
    fn test_selection_outside_window_not_shown_selected() {
        let mut state = june_state();
        state.select_date(greg(2024, 6, 20));
        state.focus_next_page();
        // July is visible now, so the June cell is disabled and not selected.
        assert!(state.is_cell_disabled(&greg(2024, 6, 20)));
        assert!(!state.is_selected(&greg(2024, 6, 20)));
    }

    #[test]
    fn test_unavailable_date_not_shown_selected() {
        let mut state = CalendarState::builder()
            .default_value(DateValue::from(greg(2024, 6, 20)))
            .unavailable(|date: &CalendarDate| date.day() == 20)
            .build();
        assert!(state.is_cell_unavailable(&greg(2024, 6, 20)));
        assert!(!state.is_selected(&greg(2024, 6, 20)));
        state.set_unavailable(None);
        assert!(state.is_selected(&greg(2024, 6, 20)));
    }

    #[test]
    fn test_is_value_invalid() {
        let mut state = CalendarState::builder()
            .default_value(DateValue::from(greg(2024, 6, 20)))
            .build();
        assert!(!state.is_value_invalid());
        state.set_max_value(Some(greg(2024, 6, 10)));
        assert!(state.is_value_invalid());
        state.set_max_value(None);
        state.set_invalid(true);
        assert!(state.is_value_invalid());
    }

    #[test]
    fn test_is_cell_focused_requires_focus() {
        let mut state = june_state();
        assert!(!state.is_cell_focused(&greg(2024, 6, 15)));
        state.set_focused(true);
        assert!(state.is_cell_focused(&greg(2024, 6, 15)));
        assert!(!state.is_cell_focused(&greg(2024, 6, 16)));
    }

    #[test]
    fn test_cell_disabled_outside_bounds() {
        let mut state = CalendarState::builder()
            .default_focused_value(greg(2024, 6, 15))
            .min_value(greg(2024, 6, 10))
            .build();
        assert!(state.is_cell_disabled(&greg(2024, 6, 5)));
        assert!(!state.is_cell_disabled(&greg(2024, 6, 10)));
        state.set_disabled(true);
        assert!(state.is_cell_disabled(&greg(2024, 6, 15)));
    }

    #[test]
    fn test_range_paging_validity_with_bounds() {
        let state = CalendarState::builder()
            .default_focused_value(greg(2024, 6, 15))
            .min_value(greg(2024, 6, 1))
            .max_value(greg(2024, 6, 30))
            .build();
        assert!(state.is_previous_visible_range_invalid());
        assert!(state.is_next_visible_range_invalid());

        let open = june_state();
        assert!(!open.is_previous_visible_range_invalid());
        assert!(!open.is_next_visible_range_invalid());
    }

    #[test]
    fn test_range_paging_validity_at_representable_edge() {
        let min = CalendarDate::from_iso(CalendarKind::Gregorian, NaiveDate::MIN);
        let state = CalendarState::builder()
            .default_focused_value(min)
            .selection_alignment(SelectionAlignment::Start)
            .build();
        assert!(state.is_previous_visible_range_invalid());
    }

    #[test]
    fn test_dates_in_week_rows() {
        // June 2024 starts on a Saturday; with en-US weeks the first row
        // begins on Sunday May 26.
        let state = june_state();
        let week = state.dates_in_week(0, None);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], Some(greg(2024, 5, 26)));
        assert_eq!(week[6], Some(greg(2024, 6, 1)));

        let week = state.dates_in_week(1, None);
        assert_eq!(week[0], Some(greg(2024, 6, 2)));
        assert_eq!(week[6], Some(greg(2024, 6, 8)));
    }

    #[test]
    fn test_dates_in_week_from_anchor() {
        let state = june_state();
        let week = state.dates_in_week(0, Some(greg(2024, 7, 1)));
        // July 1 2024 is a Monday; its Sunday-first week starts June 30.
        assert_eq!(week[0], Some(greg(2024, 6, 30)));
    }

    #[test]
    fn test_dates_in_week_pads_before_first_representable_day() {
        let min = CalendarDate::from_iso(CalendarKind::Gregorian, NaiveDate::MIN);
        let state = CalendarState::builder()
            .default_focused_value(min)
            .selection_alignment(SelectionAlignment::Start)
            .build();
        let week = state.dates_in_week(0, None);
        assert_eq!(week.len(), 7);
        let leading = week.iter().take_while(|slot| slot.is_none()).count();
        assert_eq!(week[leading], Some(min));
        for slot in &week[leading..] {
            assert!(slot.is_some());
        }
    }

    #[test]
    fn test_dates_in_week_stops_at_last_representable_day() {
        let max = CalendarDate::from_iso(CalendarKind::Gregorian, NaiveDate::MAX);
        let state = june_state();
        let week = state.dates_in_week(0, Some(max));
        // The row ends on the last representable day instead of repeating it.
        assert_eq!(week.last(), Some(&Some(max)));
        let days: Vec<CalendarDate> = week.iter().flatten().copied().collect();
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
