// Service module exports

pub mod calendar;
pub mod locale;
