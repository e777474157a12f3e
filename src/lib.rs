//! Deterministic page interactivity runtime for the Trilha Futuro site.
//!
//! The site's client-side behaviors — staggered entrance animations,
//! scroll-triggered reveals, required-field form validation, toast
//! notifications, the stats doughnut chart, and quiz profile scoring — run
//! here against an in-crate document model with a virtual clock. A [`Page`]
//! is constructed from markup, configured, and explicitly booted; tests then
//! drive it (scroll, submit, advance time) and assert on the resulting
//! document state. Nothing touches a real browser, real time, or the
//! network: geometry, the clock, and the stats endpoint are all injected.

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

mod dom;
mod html;
mod page;
mod quiz;
mod reveal;
mod schedule;
mod stats;
mod style;
mod toast;
mod trace;
mod validate;

#[cfg(test)]
mod tests;

pub use dom::NodeId;
pub use page::{FormSubmission, Page, PageConfig};
pub use quiz::Profile;
pub use schedule::PendingTimer;
pub use stats::{ChartKind, ChartSpec, LegendPosition, StatsPayload};
pub use toast::ToastSeverity;

pub(crate) use dom::Dom;
pub(crate) use quiz::classify;
pub(crate) use schedule::{ScheduledTask, SchedulerState, TaskKind};
pub(crate) use stats::FetchMock;
pub(crate) use style::*;
pub(crate) use trace::TraceState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Runtime(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    FetchFailed {
        url: String,
        status: Option<u16>,
    },
    StatsPayload(String),
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::FetchFailed { url, status } => match status {
                Some(code) => write!(f, "fetch failed for {url}: http status {code}"),
                None => write!(f, "fetch failed for {url}: network error"),
            },
            Self::StatsPayload(msg) => write!(f, "stats payload error: {msg}"),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}"
            ),
        }
    }
}

impl StdError for Error {}
