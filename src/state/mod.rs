//! Calendar state management.
//!
//! [`CalendarState`] owns everything a calendar view needs: the focused
//! date, the selected value, the visible range and the rules that constrain
//! them. It is a plain synchronous state machine. Every operation leaves
//! the state reconciled, and [`CalendarState::reconcile`] itself is
//! idempotent, so callers can re-render from the state at any point.
//!
//! Dates are displayed in one calendar system but selections are emitted in
//! the calendar system of the value that was handed in (Gregorian when
//! there was none), so the display calendar never leaks into the data a
//! caller gets back.

use std::fmt;

use chrono::Weekday;
use chrono_tz::Tz;

use crate::models::date::CalendarDate;
use crate::models::duration::DateDuration;
use crate::models::range::VisibleRange;
use crate::models::value::DateValue;
use crate::services::calendar::CalendarKind;
use crate::services::locale::Locale;
use crate::utils::date::today;

mod align;
mod controlled;
mod navigation;
mod queries;

use align::{align_center, align_end, align_start, constrain_value, out_of_bounds};
use controlled::Controlled;

/// Where the initial visible range places the focused date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionAlignment {
    /// Focused date in the first unit of the range.
    Start,
    /// Focused date in the middle of the range.
    #[default]
    Center,
    /// Focused date in the last unit of the range.
    End,
}

/// How far one page of navigation moves the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageBehavior {
    /// Page by the whole visible duration.
    #[default]
    Visible,
    /// Page by a single unit of the visible duration.
    Single,
}

/// Caller-provided test for days that cannot be selected.
pub type DatePredicate = Box<dyn Fn(&CalendarDate) -> bool>;

/// State manager for a calendar view.
pub struct CalendarState {
    locale: Locale,
    calendar_override: Option<CalendarKind>,
    first_day_override: Option<Weekday>,
    visible_duration: DateDuration,
    page_behavior: PageBehavior,
    min_value: Option<CalendarDate>,
    max_value: Option<CalendarDate>,
    disabled: bool,
    read_only: bool,
    invalid: bool,
    unavailable: Option<DatePredicate>,
    value: Controlled<Option<DateValue>>,
    focused_date: Controlled<CalendarDate>,
    start_date: CalendarDate,
    focused: bool,
    last_calendar: CalendarKind,
    pending_value_change: Option<Option<DateValue>>,
}

impl CalendarState {
    pub fn builder() -> CalendarStateBuilder {
        CalendarStateBuilder::new()
    }

    /// The calendar system dates are displayed in.
    pub fn calendar(&self) -> CalendarKind {
        self.calendar_override
            .unwrap_or_else(|| self.locale.calendar())
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// First day of the week for the current locale, unless overridden.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_override
            .unwrap_or_else(|| self.locale.first_day_of_week())
    }

    pub fn visible_duration(&self) -> DateDuration {
        self.visible_duration
    }

    pub fn page_behavior(&self) -> PageBehavior {
        self.page_behavior
    }

    pub fn min_value(&self) -> Option<CalendarDate> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<CalendarDate> {
        self.max_value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether a calendar cell currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// The date keyboard navigation is on, in the display calendar.
    pub fn focused_date(&self) -> CalendarDate {
        *self.focused_date.get()
    }

    /// First day of the visible range.
    pub fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    /// Last day of the visible range, inclusive.
    pub fn end_date(&self) -> CalendarDate {
        self.start_date.add(self.visible_duration.end_offset())
    }

    pub fn visible_range(&self) -> VisibleRange {
        VisibleRange::new(self.start_date, self.end_date())
    }

    /// The selected value exactly as it is stored.
    pub fn value(&self) -> Option<DateValue> {
        *self.value.get()
    }

    /// The selected day converted into the display calendar.
    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.value
            .get()
            .map(|value| value.date().to_calendar(self.calendar()))
    }

    /// Time zone of the selected value, when it carries one.
    pub fn time_zone(&self) -> Option<Tz> {
        match self.value.get() {
            Some(DateValue::Zoned { zone, .. }) => Some(*zone),
            _ => None,
        }
    }

    /// Re-establish the state invariants after inputs changed.
    ///
    /// Runs three repairs in order: adopt a changed display calendar,
    /// clamp the focused date into the bounds, then realign the visible
    /// range so it contains the focused date. Operations call this on
    /// their own; calling it again is a no-op.
    pub fn reconcile(&mut self) {
        let kind = self.calendar();
        if kind != self.last_calendar {
            log::debug!("display calendar changed from {} to {}", self.last_calendar, kind);
            let focus = self.focused_date.get().to_calendar(kind);
            self.start_date = align_center(
                focus,
                self.visible_duration,
                self.first_day_of_week(),
                self.min_value,
                self.max_value,
            );
            self.focused_date.set(focus);
            self.last_calendar = kind;
        }

        let focus = *self.focused_date.get();
        if out_of_bounds(focus, self.min_value, self.max_value) {
            self.focused_date
                .set(constrain_value(focus, self.min_value, self.max_value));
        }

        let focus = *self.focused_date.get();
        if focus < self.start_date {
            self.start_date = align_end(
                focus,
                self.visible_duration,
                self.first_day_of_week(),
                self.min_value,
                self.max_value,
            );
        } else if focus > self.end_date() {
            self.start_date = align_start(
                focus,
                self.visible_duration,
                self.first_day_of_week(),
                self.min_value,
                self.max_value,
            );
        }
    }

    /// Select a specific date.
    pub fn select_date(&mut self, date: CalendarDate) {
        self.set_value_internal(date);
    }

    /// Select the date keyboard navigation is on.
    pub fn select_focused_date(&mut self) {
        self.set_value_internal(*self.focused_date.get());
    }

    /// Drop the selection. Ignored while disabled or read only.
    pub fn clear_selection(&mut self) {
        if self.disabled || self.read_only {
            return;
        }
        if self.value.set(None) {
            self.pending_value_change = Some(None);
        }
    }

    /// The value change produced by operations since the last call, if any.
    /// The inner `None` means the selection was cleared.
    pub fn take_value_change(&mut self) -> Option<Option<DateValue>> {
        self.pending_value_change.take()
    }

    /// Owner-side update of a controlled value.
    pub fn sync_value(&mut self, value: Option<DateValue>) {
        self.value.sync(value);
    }

    /// Owner-side update of a controlled focused date. The date is converted
    /// into the display calendar and clamped into the bounds.
    pub fn sync_focused_date(&mut self, date: CalendarDate) {
        let date = constrain_value(
            date.to_calendar(self.calendar()),
            self.min_value,
            self.max_value,
        );
        self.focused_date.sync(date);
        self.reconcile();
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.reconcile();
    }

    /// Switch the display calendar. The focused date keeps naming the same
    /// absolute day and the visible range re-centers around it.
    pub fn set_calendar(&mut self, kind: CalendarKind) {
        self.calendar_override = Some(kind);
        self.reconcile();
    }

    pub fn set_visible_duration(&mut self, duration: DateDuration) {
        self.visible_duration = sanitize_duration(duration);
        self.reconcile();
    }

    pub fn set_page_behavior(&mut self, behavior: PageBehavior) {
        self.page_behavior = behavior;
    }

    pub fn set_first_day_of_week(&mut self, first_day: Option<Weekday>) {
        self.first_day_override = first_day;
    }

    pub fn set_min_value(&mut self, min: Option<CalendarDate>) {
        self.min_value = min;
        warn_on_crossed_bounds(self.min_value, self.max_value);
        self.reconcile();
    }

    pub fn set_max_value(&mut self, max: Option<CalendarDate>) {
        self.max_value = max;
        warn_on_crossed_bounds(self.min_value, self.max_value);
        self.reconcile();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Mark the whole value invalid regardless of bounds, for external
    /// validation.
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn set_unavailable(&mut self, predicate: Option<DatePredicate>) {
        self.unavailable = predicate;
    }

    fn set_value_internal(&mut self, date: CalendarDate) {
        if self.disabled || self.read_only {
            return;
        }

        let date = constrain_value(date, self.min_value, self.max_value);
        let Some(date) = self.previous_available_date(date) else {
            return;
        };

        // The display calendar must not leak into the emitted value: convert
        // into the calendar of the original value, or Gregorian without one.
        let target = self
            .value
            .get()
            .map(|value| value.calendar())
            .unwrap_or(CalendarKind::Gregorian);
        let date = date.to_calendar(target);
        let new_value = match self.value.get() {
            Some(value) => value.with_date(date),
            None => DateValue::Date(date),
        };

        self.value.set(Some(new_value));
        // Every accepted selection records a change, even re-selecting the
        // same day.
        self.pending_value_change = Some(Some(new_value));
    }

    // Walk back from an unavailable date to the closest available one, not
    // leaving the visible range. None when every day back to the range start
    // is unavailable.
    fn previous_available_date(&self, mut date: CalendarDate) -> Option<CalendarDate> {
        let Some(unavailable) = &self.unavailable else {
            return Some(date);
        };
        let floor = self.start_date;
        while date >= floor && unavailable(&date) {
            let prev = date.subtract(DateDuration::days(1));
            if prev == date {
                return None;
            }
            date = prev;
        }
        (date >= floor).then_some(date)
    }
}

impl fmt::Debug for CalendarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarState")
            .field("calendar", &self.calendar())
            .field("focused_date", self.focused_date.get())
            .field("start_date", &self.start_date)
            .field("visible_duration", &self.visible_duration)
            .field("value", self.value.get())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CalendarState`].
///
/// Every input is optional. Out-of-range inputs are clamped or replaced
/// with defaults rather than rejected, so building never fails.
#[derive(Default)]
pub struct CalendarStateBuilder {
    locale: Option<Locale>,
    calendar: Option<CalendarKind>,
    visible_duration: Option<DateDuration>,
    selection_alignment: SelectionAlignment,
    page_behavior: PageBehavior,
    first_day_of_week: Option<Weekday>,
    min_value: Option<CalendarDate>,
    max_value: Option<CalendarDate>,
    value: Option<Option<DateValue>>,
    default_value: Option<DateValue>,
    focused_value: Option<CalendarDate>,
    default_focused_value: Option<CalendarDate>,
    disabled: bool,
    read_only: bool,
    invalid: bool,
    unavailable: Option<DatePredicate>,
    auto_focus: bool,
}

impl CalendarStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Display calendar, overriding the one the locale selects.
    pub fn calendar(mut self, kind: CalendarKind) -> Self {
        self.calendar = Some(kind);
        self
    }

    pub fn visible_duration(mut self, duration: DateDuration) -> Self {
        self.visible_duration = Some(duration);
        self
    }

    pub fn selection_alignment(mut self, alignment: SelectionAlignment) -> Self {
        self.selection_alignment = alignment;
        self
    }

    pub fn page_behavior(mut self, behavior: PageBehavior) -> Self {
        self.page_behavior = behavior;
        self
    }

    /// Override the locale's first day of the week.
    pub fn first_day_of_week(mut self, first_day: Weekday) -> Self {
        self.first_day_of_week = Some(first_day);
        self
    }

    pub fn min_value(mut self, min: CalendarDate) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn max_value(mut self, max: CalendarDate) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Hand ownership of the value to the caller. The state still updates
    /// it on selection but [`CalendarState::sync_value`] is the source of
    /// truth. `None` means controlled with no initial selection.
    pub fn value(mut self, value: Option<DateValue>) -> Self {
        self.value = Some(value);
        self
    }

    /// Initial selection for an uncontrolled value.
    pub fn default_value(mut self, value: DateValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Hand ownership of the focused date to the caller.
    pub fn focused_value(mut self, date: CalendarDate) -> Self {
        self.focused_value = Some(date);
        self
    }

    /// Initial focused date for uncontrolled focus. Falls back to the
    /// selected date, then to today.
    pub fn default_focused_value(mut self, date: CalendarDate) -> Self {
        self.default_focused_value = Some(date);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Mark days that cannot be selected.
    pub fn unavailable(mut self, predicate: impl Fn(&CalendarDate) -> bool + 'static) -> Self {
        self.unavailable = Some(Box::new(predicate));
        self
    }

    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn build(self) -> CalendarState {
        let locale = self.locale.unwrap_or_default();
        let calendar_override = self.calendar;
        let calendar = calendar_override.unwrap_or_else(|| locale.calendar());
        let first_day = self
            .first_day_of_week
            .unwrap_or_else(|| locale.first_day_of_week());

        let visible_duration =
            sanitize_duration(self.visible_duration.unwrap_or(DateDuration::months(1)));
        warn_on_crossed_bounds(self.min_value, self.max_value);

        let value = Controlled::new(self.value, self.default_value);
        let time_zone = match value.get() {
            Some(DateValue::Zoned { zone, .. }) => Some(*zone),
            _ => None,
        };
        let selected = value.get().map(|v| v.date().to_calendar(calendar));

        let default_focus = constrain_value(
            self.default_focused_value
                .map(|date| date.to_calendar(calendar))
                .or(selected)
                .unwrap_or_else(|| today(calendar, time_zone)),
            self.min_value,
            self.max_value,
        );
        let focused_date = Controlled::new(
            self.focused_value
                .map(|date| {
                    constrain_value(date.to_calendar(calendar), self.min_value, self.max_value)
                }),
            default_focus,
        );

        let focus = *focused_date.get();
        let start_date = match self.selection_alignment {
            SelectionAlignment::Start => align_start(
                focus,
                visible_duration,
                first_day,
                self.min_value,
                self.max_value,
            ),
            SelectionAlignment::Center => align_center(
                focus,
                visible_duration,
                first_day,
                self.min_value,
                self.max_value,
            ),
            SelectionAlignment::End => align_end(
                focus,
                visible_duration,
                first_day,
                self.min_value,
                self.max_value,
            ),
        };

        log::debug!(
            "calendar state created: calendar={calendar}, visible={visible_duration:?}, start={start_date:?}"
        );

        CalendarState {
            locale,
            calendar_override,
            first_day_override: self.first_day_of_week,
            visible_duration,
            page_behavior: self.page_behavior,
            min_value: self.min_value,
            max_value: self.max_value,
            disabled: self.disabled,
            read_only: self.read_only,
            invalid: self.invalid,
            unavailable: self.unavailable,
            value,
            focused_date,
            start_date,
            focused: self.auto_focus,
            last_calendar: calendar,
            pending_value_change: None,
        }
    }
}

fn sanitize_duration(mut duration: DateDuration) -> DateDuration {
    for field in [
        &mut duration.years,
        &mut duration.months,
        &mut duration.weeks,
        &mut duration.days,
    ] {
        if *field < 0 {
            log::warn!("negative visible duration field clamped to zero");
            *field = 0;
        }
    }
    if duration.is_zero() {
        log::warn!("empty visible duration, falling back to one month");
        duration = DateDuration::months(1);
    }
    duration
}

fn warn_on_crossed_bounds(min: Option<CalendarDate>, max: Option<CalendarDate>) {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            log::warn!("minimum value {min:?} is after maximum value {max:?}");
        }
    }
}
