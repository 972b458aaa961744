//! Logging macros that record the calling module, function and line.
//!
//! The facade methods only know the caller's file and line. These macros
//! fill in the enclosing function name as well, which shows up in
//! `error.log` as `module:function:line`.
//!
//! ```ignore
//! use agentlog_core::{log_error, log_info, Logger};
//!
//! fn run_tool(logger: &Logger) {
//!     log_info!(logger, "starting tool");
//!     log_error!(logger, "Tool failed", "exit code 2");
//! }
//! ```

/// Location of the macro call site.
#[macro_export]
macro_rules! source_location {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let mut path = __type_name_of(__here);
        path = path.strip_suffix("::__here").unwrap_or(path);
        while let Some(outer) = path.strip_suffix("::{{closure}}") {
            path = outer;
        }
        let function = path.rsplit("::").next().unwrap_or(path);
        let module = module_path!().rsplit("::").next().unwrap_or(module_path!());
        $crate::SourceLocation::new(module, function, line!())
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $message:expr) => {
        $crate::log_debug!($logger, "", $message)
    };
    ($logger:expr, $title:expr, $message:expr) => {
        $logger.log_at(
            $crate::LogLevel::Debug,
            $title,
            "",
            $message,
            $crate::source_location!(),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $message:expr) => {
        $crate::log_info!($logger, "", $message)
    };
    ($logger:expr, $title:expr, $message:expr) => {
        $logger.log_at(
            $crate::LogLevel::Info,
            $title,
            "",
            $message,
            $crate::source_location!(),
        )
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $message:expr) => {
        $crate::log_warn!($logger, "", $message)
    };
    ($logger:expr, $title:expr, $message:expr) => {
        $logger.log_at(
            $crate::LogLevel::Warn,
            $title,
            "",
            $message,
            $crate::source_location!(),
        )
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $title:expr) => {
        $crate::log_error!($logger, $title, "")
    };
    ($logger:expr, $title:expr, $message:expr) => {
        $logger.error_at($title, $message, $crate::source_location!())
    };
}
