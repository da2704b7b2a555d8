//! Common functionality for the Flipp bidder.
//!
//! This crate translates OpenRTB bid requests into Flipp campaign requests and
//! maps campaign responses back into OpenRTB bids. Network I/O is left to an
//! injected [`pipeline::HttpTransport`].
//!
//! # Modules
//!
//! - [`bidder`]: The `Bidder` trait and request/response descriptors
//! - [`constants`]: Application-wide constants
//! - [`error`]: Error types and classification
//! - [`integrations`]: Vendor bidders and their registration
//! - [`openrtb`]: The subset of OpenRTB 2.x the bidders read
//! - [`pipeline`]: Single-pass translate, forward and map driver
//! - [`settings`]: Configuration loading and validation
//! - [`test_support`]: Testing utilities and fixtures

pub mod bidder;
pub mod constants;
pub mod error;
pub mod integrations;
pub mod openrtb;
pub mod pipeline;
pub mod settings;
pub mod test_support;
