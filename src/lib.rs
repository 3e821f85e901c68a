// Calendar State Library
// Exports all modules for embedding and testing

pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use models::date::CalendarDate;
pub use models::duration::DateDuration;
pub use models::range::VisibleRange;
pub use models::value::DateValue;
pub use services::calendar::{CalendarKind, DateError, Era};
pub use services::locale::Locale;
pub use state::{CalendarState, CalendarStateBuilder, DatePredicate, PageBehavior, SelectionAlignment};
