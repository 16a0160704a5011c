/// Macros for timestamped console logging.
///
/// In the browser these write through gloo_console with a `js_sys::Date`
/// timestamp. On native targets (tests, tooling) the browser console does not
/// exist, so the same calls are forwarded to `tracing`.
///
/// Use the `_with_dispatch` variants to also push the message into the
/// extraction state's console log.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Debug,
    Log,
    Info,
    Warn,
    Error,
}

impl ConsoleLevel {
    pub fn tag(&self) -> &'static str {
        match self {
            ConsoleLevel::Debug => "DEBUG",
            ConsoleLevel::Log => "LOG",
            ConsoleLevel::Info => "INFO",
            ConsoleLevel::Warn => "WARN",
            ConsoleLevel::Error => "ERROR",
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn write(level: ConsoleLevel, message: String) {
    let line = format!("[{}] {}", js_sys::Date::now(), message);
    match level {
        ConsoleLevel::Debug => gloo_console::debug!(line),
        ConsoleLevel::Log => gloo_console::log!(line),
        ConsoleLevel::Info => gloo_console::info!(line),
        ConsoleLevel::Warn => gloo_console::warn!(line),
        ConsoleLevel::Error => gloo_console::error!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(level: ConsoleLevel, message: String) {
    match level {
        ConsoleLevel::Debug => tracing::debug!("{}", message),
        ConsoleLevel::Log | ConsoleLevel::Info => tracing::info!("{}", message),
        ConsoleLevel::Warn => tracing::warn!("{}", message),
        ConsoleLevel::Error => tracing::error!("{}", message),
    }
}

/// Format `[TAG] message` as stored in the state's console log
pub fn tagged(level: ConsoleLevel, message: &str) -> String {
    format!("[{}] {}", level.tag(), message)
}

#[macro_export]
macro_rules! console_info {
    ($fmt:expr) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Info, format!("{}", $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Info, format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! console_log {
    ($fmt:expr) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Log, format!("{}", $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Log, format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! console_warn {
    ($fmt:expr) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Warn, format!("{}", $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Warn, format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! console_error {
    ($fmt:expr) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Error, format!("{}", $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Error, format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! console_debug {
    ($fmt:expr) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Debug, format!("{}", $fmt))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::console_macros::write($crate::utils::console_macros::ConsoleLevel::Debug, format!($fmt, $($arg)*))
    };
}

/// Console macros with dispatch support for capturing messages in application state.
/// `$dispatch` is anything callable with an `ExtractionAction`.
#[macro_export]
macro_rules! console_info_with_dispatch {
    ($dispatch:expr, $fmt:expr) => {
        $crate::__console_with_dispatch!($dispatch, Info, format!("{}", $fmt))
    };
    ($dispatch:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::__console_with_dispatch!($dispatch, Info, format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! console_warn_with_dispatch {
    ($dispatch:expr, $fmt:expr) => {
        $crate::__console_with_dispatch!($dispatch, Warn, format!("{}", $fmt))
    };
    ($dispatch:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::__console_with_dispatch!($dispatch, Warn, format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! console_error_with_dispatch {
    ($dispatch:expr, $fmt:expr) => {
        $crate::__console_with_dispatch!($dispatch, Error, format!("{}", $fmt))
    };
    ($dispatch:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::__console_with_dispatch!($dispatch, Error, format!($fmt, $($arg)*))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __console_with_dispatch {
    ($dispatch:expr, $level:ident, $message:expr) => {{
        let level = $crate::utils::console_macros::ConsoleLevel::$level;
        let message: String = $message;
        $dispatch($crate::features::extraction::ExtractionAction::AddConsoleMessage(
            $crate::utils::console_macros::tagged(level, &message),
        ));
        $crate::utils::console_macros::write(level, message);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extraction::ExtractionAction;

    #[test]
    fn test_tagged_message() {
        assert_eq!(tagged(ConsoleLevel::Warn, "slow"), "[WARN] slow");
    }

    #[test]
    fn test_dispatch_variant_records_message() {
        let mut actions = Vec::new();
        let mut dispatch = |action: ExtractionAction| actions.push(action);

        crate::console_info_with_dispatch!(dispatch, "Extracting {}", "org/repo");

        assert_eq!(
            actions,
            vec![ExtractionAction::AddConsoleMessage(
                "[INFO] Extracting org/repo".to_string()
            )]
        );
    }
}
