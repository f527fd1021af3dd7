use std::fmt;

use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::{
    BoundsError, DateBounds, DateFormatter, DatePickerConfig, DateSnapshot, DisplayMode, IsoDateFormatter,
    MonthGraph, MonthItem, MonthSnapshot, RenderStyle, SelectedDate, SelectionMode, SnapshotError,
};

/// Listener fired with `(old, new)` whenever the selected date changes.
pub type OnDateChanged = Box<dyn FnMut(NaiveDate, NaiveDate)>;
/// Receives the viewed month, the selected date and whether the change came from typed input.
pub type RenderHeaders = Box<dyn FnMut(MonthSnapshot, DateSnapshot, bool)>;
pub type RenderMonthItems = Box<dyn FnMut(Vec<MonthItem>)>;
pub type NowProvider = Box<dyn Fn() -> NaiveDate>;

/// Tactile feedback on selection and navigation.
pub trait Haptics {
    fn vibrate_for_selection(&self);
}

/// Session state of one date picker.
///
/// Owns the viewed month and the selection, recomputes the [`MonthGraph`]
/// whenever either changes and hands the result to the render callbacks.
/// Listeners hear about selection changes only; navigating between months
/// never notifies them.
///
/// All calls are expected to come from a single thread, one at a time. A
/// listener or render callback must not call back into the controller.
pub struct DatePickerController {
    display_mode:       DisplayMode,
    first_day_of_week:  Weekday,
    show_week_numbers:  bool,
    bounds:             DateBounds,
    style:              RenderStyle,
    formatter:          Box<dyn DateFormatter>,
    haptics:            Option<Box<dyn Haptics>>,
    render_headers:     RenderHeaders,
    render_month_items: RenderMonthItems,
    get_now:            NowProvider,
    listeners:          Vec<OnDateChanged>,
    did_init:           bool,
    viewing_month:      Option<MonthSnapshot>,
    month_graph:        Option<MonthGraph>,
    selected_date:      Option<DateSnapshot>,
    selection:          SelectedDate,
}

impl DatePickerController {
    /// Creates a controller that renders through the given callbacks.
    ///
    /// "Now" defaults to the local date and typed input is parsed with
    /// [`IsoDateFormatter`]; see [`Self::with_now`] and [`Self::with_formatter`].
    ///
    /// # Errors
    /// Returns `BoundsError::InvalidRange` if the configured min date is after the max date.
    pub fn new(
        config: DatePickerConfig,
        render_headers: impl FnMut(MonthSnapshot, DateSnapshot, bool) + 'static,
        render_month_items: impl FnMut(Vec<MonthItem>) + 'static,
    ) -> Result<Self, BoundsError> {
        let bounds = config.bounds()?;
        Ok(Self {
            display_mode: config.display_mode,
            first_day_of_week: config.first_day_of_week,
            show_week_numbers: config.show_week_numbers,
            bounds,
            style: config.style,
            formatter: Box::new(IsoDateFormatter),
            haptics: None,
            render_headers: Box::new(render_headers),
            render_month_items: Box::new(render_month_items),
            get_now: Box::new(|| Local::now().date_naive()),
            listeners: Vec::new(),
            did_init: false,
            viewing_month: None,
            month_graph: None,
            selected_date: None,
            selection: SelectedDate::new(config.selection_mode),
        })
    }

    #[must_use]
    pub fn with_now(mut self, get_now: impl Fn() -> NaiveDate + 'static) -> Self {
        self.get_now = Box::new(get_now);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl DateFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    #[must_use]
    pub fn with_haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Some(Box::new(haptics));
        self
    }

    /// Selects "now" without notifying listeners, once per session.
    pub fn maybe_init(&mut self) {
        if !self.did_init {
            let now = self.now();
            self.set_full_date(now, false);
        }
    }

    pub fn previous_month(&mut self) {
        self.display_mode = DisplayMode::Calendar;
        let Some(viewing) = self.viewing_month else {
            tracing::warn!("previous_month called before a date was set");
            return;
        };
        if !self.bounds.can_go_back(viewing) {
            tracing::debug!(month = %viewing, "already viewing the earliest allowed month");
            return;
        }
        if let Some(month) = viewing.previous() {
            self.update_month_and_render(month);
        }
    }

    pub fn next_month(&mut self) {
        self.display_mode = DisplayMode::Calendar;
        let Some(viewing) = self.viewing_month else {
            tracing::warn!("next_month called before a date was set");
            return;
        };
        if !self.bounds.can_go_forward(viewing) {
            tracing::debug!(month = %viewing, "already viewing the latest allowed month");
            return;
        }
        if let Some(month) = viewing.next() {
            self.update_month_and_render(month);
        }
    }

    /// Views another month (0-based) of the currently viewed year.
    ///
    /// # Errors
    /// Returns `SnapshotError::InvalidMonth` for a month index above 11.
    pub fn set_month(&mut self, month: u32) -> Result<(), SnapshotError> {
        self.display_mode = DisplayMode::Calendar;
        let Some(viewing) = self.viewing_month else {
            tracing::warn!(month, "set_month called before a date was set");
            return Ok(());
        };
        let month = viewing.with_month(month)?;
        self.update_month_and_render(month);
        Ok(())
    }

    /// Selects `date` and moves the view to its month.
    ///
    /// Selecting the date that is already selected does nothing, so
    /// listeners hear about each change once.
    pub fn set_full_date(&mut self, date: NaiveDate, notify_listeners: bool) {
        self.apply_full_date(date, notify_listeners, false);
    }

    /// [`Self::set_full_date`] starting from "now" with the given overrides.
    /// Without a `day`, today's day of month is kept, clamped to the target month.
    ///
    /// # Errors
    /// Returns `SnapshotError` if the month index or the day is invalid for the target month.
    pub fn set_full_date_parts(
        &mut self,
        year: Option<i32>,
        month: u32,
        day: Option<u32>,
        notify_listeners: bool,
    ) -> Result<(), SnapshotError> {
        let now = self.now();
        let target = MonthSnapshot::new(year.unwrap_or_else(|| now.year()), month)?;
        let day = day.unwrap_or_else(|| now.day().min(target.days_in_month()));
        let date = target.with_day(day).ok_or(SnapshotError::InvalidDate {
            year: target.year(),
            month,
            day,
        })?;
        self.set_full_date(date.to_date(), notify_listeners);
        Ok(())
    }

    /// Selects a date typed by the user. Unparsable or out-of-bounds input is ignored.
    pub fn maybe_set_date_from_input(&mut self, input: &str) {
        if input.trim().is_empty() {
            return;
        }
        match self.formatter.parse_input(input) {
            Ok(date) if self.bounds.is_out_of_range(&DateSnapshot::from(date)) => {
                tracing::debug!(%date, "ignoring typed date outside the allowed range");
            },
            Ok(date) => self.apply_full_date(date, true, true),
            Err(err) => tracing::debug!(input, %err, "ignoring unparsable date input"),
        }
    }

    pub fn get_full_date(&self) -> Option<NaiveDate> {
        self.selected_date.map(DateSnapshot::to_date)
    }

    /// Both endpoints of a completed range selection
    pub fn get_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.selection
            .get_range()
            .map(|(low, high)| (low.to_date(), high.to_date()))
    }

    /// Selects a day of the viewed month, as when the user taps a day cell.
    ///
    /// Before any date was set this selects that day of the current month
    /// instead. Days the month does not have and days outside the bounds are
    /// ignored.
    pub fn set_day_of_month(&mut self, day: u32) {
        if !self.did_init {
            let current = MonthSnapshot::from(self.now());
            match current.with_day(day) {
                Some(date) if self.bounds.is_out_of_range(&date) => {
                    tracing::debug!(%date, "ignoring day outside the allowed range");
                },
                Some(date) => self.set_full_date(date.to_date(), true),
                None => tracing::warn!(day, month = %current, "day does not exist in month"),
            }
            return;
        }

        let Some(viewing) = self.viewing_month else {
            return;
        };
        let Some(date) = viewing.with_day(day) else {
            tracing::warn!(day, month = %viewing, "day does not exist in month");
            return;
        };
        if self.bounds.is_out_of_range(&date) {
            tracing::debug!(%date, "ignoring day outside the allowed range");
            return;
        }

        let old = self.current_selected_or_now();
        self.selected_date = Some(date);
        self.selection.set(date);
        tracing::debug!(%date, "day selected");
        self.vibrate();
        self.notify_listeners(old, date.to_date());
        self.render(false);
    }

    /// Selects the same month and day in another year, keeping the viewed
    /// month and the selected day. The day is clamped when the month is
    /// shorter in that year.
    ///
    /// In range mode the new date is recorded as the next endpoint, like any
    /// other pick; the other endpoint stays in its original year.
    ///
    /// # Errors
    /// Returns `SnapshotError` if the year is outside the calendar's range.
    pub fn set_year(&mut self, year: i32) -> Result<(), SnapshotError> {
        let month = self
            .viewing_month
            .or_else(|| self.selected_date.map(DateSnapshot::month_snapshot))
            .map_or_else(|| self.now().month0(), MonthSnapshot::month);
        let target = MonthSnapshot::new(year, month)?;
        let day = self
            .selected_date
            .map(|selected| selected.day().min(target.days_in_month()));
        self.set_full_date_parts(Some(year), month, day, true)?;
        self.display_mode = DisplayMode::Calendar;
        Ok(())
    }

    /// Switches between single and range selection and re-renders.
    /// Going back to single mode keeps the most recently picked date.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
        if mode == SelectionMode::Single {
            if let Some(selected) = self.selected_date {
                self.selection.set(selected);
            }
        }
        self.render(false);
    }

    pub fn add_date_changed_listener(&mut self, listener: impl FnMut(NaiveDate, NaiveDate) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear_date_changed_listeners(&mut self) {
        self.listeners.clear();
    }

    pub const fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub const fn viewing_month(&self) -> Option<MonthSnapshot> {
        self.viewing_month
    }

    pub const fn selected_date(&self) -> Option<DateSnapshot> {
        self.selected_date
    }

    pub const fn selection(&self) -> &SelectedDate {
        &self.selection
    }

    pub const fn month_graph(&self) -> Option<&MonthGraph> {
        self.month_graph.as_ref()
    }

    pub const fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub const fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn formatter(&self) -> &dyn DateFormatter {
        self.formatter.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        self.viewing_month
            .is_some_and(|month| self.bounds.can_go_back(month))
    }

    pub fn can_go_forward(&self) -> bool {
        self.viewing_month
            .is_some_and(|month| self.bounds.can_go_forward(month))
    }

    fn apply_full_date(&mut self, date: NaiveDate, notify_listeners: bool, from_user_input: bool) {
        let snapshot = DateSnapshot::from(date);
        if self.selected_date == Some(snapshot) {
            return;
        }

        let old = self.current_selected_or_now();
        self.did_init = true;
        self.selected_date = Some(snapshot);
        self.selection.set(snapshot);
        tracing::debug!(date = %snapshot, notify_listeners, from_user_input, "full date set");

        if notify_listeners {
            self.notify_listeners(old, date);
        }
        self.update_current_month(snapshot.month_snapshot());
        self.render(from_user_input);
    }

    fn update_month_and_render(&mut self, month: MonthSnapshot) {
        tracing::debug!(%month, "viewing month changed");
        self.update_current_month(month);
        self.render(false);
        self.vibrate();
    }

    fn update_current_month(&mut self, month: MonthSnapshot) {
        self.viewing_month = Some(month);
        self.month_graph = Some(MonthGraph::new(month, self.first_day_of_week, self.show_week_numbers));
    }

    fn render(&mut self, from_user_input: bool) {
        let (Some(viewing), Some(selected)) = (self.viewing_month, self.selected_date) else {
            return;
        };
        (self.render_headers)(viewing, selected, from_user_input);

        if let Some(graph) = self.month_graph {
            let today = DateSnapshot::from(self.now());
            let items = graph.month_items(&self.selection, today);
            (self.render_month_items)(items);
        }
    }

    fn notify_listeners(&mut self, old: NaiveDate, new: NaiveDate) {
        for listener in &mut self.listeners {
            listener(old, new);
        }
    }

    fn vibrate(&self) {
        if let Some(haptics) = &self.haptics {
            haptics.vibrate_for_selection();
        }
    }

    fn now(&self) -> NaiveDate {
        (self.get_now)()
    }

    fn current_selected_or_now(&self) -> NaiveDate {
        self.selected_date
            .map_or_else(|| self.now(), DateSnapshot::to_date)
    }
}

impl fmt::Debug for DatePickerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePickerController")
            .field("display_mode", &self.display_mode)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("show_week_numbers", &self.show_week_numbers)
            .field("bounds", &self.bounds)
            .field("did_init", &self.did_init)
            .field("viewing_month", &self.viewing_month)
            .field("selected_date", &self.selected_date)
            .field("selection", &self.selection)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
