//! Conversion engine: feed decoding, datetimes, recurrence, iCalendar assembly
//!
//! Turns the XML schedule export of a learning-management calendar into an
//! RFC 5545 document. The pipeline is a single synchronous pass with no shared
//! state; the only non-deterministic input is the [`Clock`].

pub mod calendar;
pub mod error;
pub mod event;
pub mod feed;
pub mod recurrence;
pub mod text;
pub mod time;
pub mod tracing;

pub use calendar::{
    CalendarDocument, PRODUCT_ID, build_document, convert, convert_with_clock,
};
pub use error::{ConvertError, ConvertResult};
pub use event::EventRecord;
pub use feed::{Element, decode_event, decode_feed, decode_recurrence, parse_document};
pub use recurrence::{RecurrenceSpec, translate};
pub use text::{MAX_LINE_LENGTH, escape_text, fold_line};
pub use time::{
    Clock, FixedClock, SystemClock, format_date_basic, format_utc_basic, parse_feed_datetime,
};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
