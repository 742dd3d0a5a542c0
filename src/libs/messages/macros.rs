//! Console output macros for [`Message`](super::Message) values.
//!
//! In debug mode (`CANETRACK_DEBUG` or `RUST_LOG` set) output goes through
//! `tracing` so it interleaves with diagnostic events; otherwise it is
//! printed directly. `msg_print!` accepts `true` as a second argument to
//! surround a section header with blank lines.

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("CANETRACK_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Shared body of the `msg_*` macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $print:ident, $text:expr) => {{
        let text = $text;
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}", text);
        } else {
            $print!("{}", text);
        }
    }};
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, format!("\n{}\n", $msg))
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, format!("✅ {}", $msg))
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, format!("❌ {}", $msg))
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, format!("⚠️ {}", $msg))
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, format!("ℹ️ {}", $msg))
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
