// Copyright © racesim 2026-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::convert::Infallible;
use std::error;
use std::fmt::Display;

use color_eyre::eyre::{ContextCompat, WrapErr};

use crate::outcome::{StopCondition, Value};

/// Equivalent function to color_eyre::bail.
///
/// Immediately returns with a [StopCondition::Developer] condition.
#[macro_export]
macro_rules! fail {
    ($msg:literal $(,)?) => {
        return std::result::Result::Err($crate::outcome::StopCondition::Developer(color_eyre::eyre::eyre!($msg)));
    };
    ($err:expr $(,)?) => {
        return std::result::Result::Err($crate::outcome::StopCondition::Developer(color_eyre::eyre::eyre!($err)));
    };
    ($fmt:expr, $($arg:tt)*) => {
        return std::result::Result::Err($crate::outcome::StopCondition::Developer(color_eyre::eyre::eyre!($fmt, $($arg)*)));
    };
}

/// Equivalent function to color_eyre::ensure.
///
/// Returns a [StopCondition::Developer] if the provided predicate evaluates
/// to false. Reserved for invariant violations, never for expected
/// control-flow (cycle/stale/veto/inactive, which return their own
/// dedicated outcome or a silent no-op per spec.md §7).
#[macro_export]
macro_rules! verify {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::verify!($cond, concat!("Condition failed: `", stringify!($cond), "`"))
        }
    };
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return std::result::Result::Err($crate::outcome::StopCondition::Developer(color_eyre::eyre::eyre!($msg)));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return std::result::Result::Err($crate::outcome::StopCondition::Developer(color_eyre::eyre::eyre!($err)));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return std::result::Result::Err($crate::outcome::StopCondition::Developer(color_eyre::eyre::eyre!($fmt, $($arg)*)));
        }
    };
}

pub trait WithError<T, E> {
    /// Wraps the error value with additional context that is evaluated
    /// lazily only once an error does occur.
    fn with_error<C, F>(self, f: F) -> Value<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> WithError<T, Infallible> for Option<T> {
    fn with_error<C, F>(self, context: F) -> Value<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.with_context(context).map_err(StopCondition::Developer)
    }
}

impl<T, E> WithError<T, E> for Result<T, E>
where
    E: error::Error + Send + Sync + 'static,
{
    fn with_error<C, F>(self, context: F) -> Value<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.with_context(context).map_err(StopCondition::Developer)
    }
}
