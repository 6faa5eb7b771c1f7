//! Locale routing.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, Cookie, Accept-Language)
//!     → matcher.rs (is this path localized at all?)
//!     → detect.rs (cookie / Accept-Language → preferred locale)
//!     → router.rs (path + preference → RoutingDecision)
//!     → server: redirect to canonical path, or rewrite to stripped path
//! ```
//!
//! The router and its locale set are built once at startup and never
//! change, so one instance is shared by every request without locking.

pub mod detect;
pub mod matcher;
pub mod router;

pub use detect::{preferred_signal, LocaleDetection};
pub use matcher::is_localized;
pub use router::{LocaleRouter, LocaleSource, RoutingDecision};
