//! Document model, host configuration and diagnostics shared by WaterCard
//! renderers.
//!
//! Nothing here renders anything. This crate describes what a card says
//! ([`element`], [`action`]), how the host wants it to look ([`host_config`]),
//! how JSON becomes a [`Document`] ([`parse`]) and how problems are reported
//! back to the caller ([`diagnostic`]).

#[macro_use]
mod macros;
pub mod action;
pub mod diagnostic;
pub mod element;
pub mod host_config;
pub mod parse;

#[doc(inline)]
pub use action::{Action, ActionKind, ActionStyle};
#[doc(inline)]
pub use diagnostic::{Diagnostic, ErrorSink, Severity, StatusCode};
#[doc(inline)]
pub use element::{AdaptiveCard, BUILTIN_TYPES, Document, Element, ElementCommon};
#[doc(inline)]
pub use host_config::{ConfigError, HostConfig};
#[doc(inline)]
pub use parse::{CardParser, JsonCardParser, ParseResult};
pub use watercard_color::Color;
