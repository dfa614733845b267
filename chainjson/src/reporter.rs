// SPDX-License-Identifier: Apache-2.0

//! Observation hook for behind-the-scenes table activity.
//!
//! A [`Reporter`] never influences results; it only receives messages such as
//! `Expanding to 27 elements.` when a table grows. Any `Fn(&str)` closure is a
//! reporter, and [`LogReporter`] forwards messages to the `log` facade.

use log::debug;

/// Receives human-readable descriptions of table activity.
pub trait Reporter: Send + Sync {
    /// Report one message.
    fn report(&self, message: &str);
}

impl<F> Reporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// A [`Reporter`] that emits every message at `debug` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, message: &str) {
        debug!("{message}");
    }
}
