//! Request middleware.
//!
//! - [`ip_allow::require_allowed_ip`] -- Rejects clients outside the IP allow-list.

pub mod ip_allow;
