//! Client-side behavior layer for a static portfolio site.
//!
//! This crate is compiled to WebAssembly and loaded by an otherwise static
//! HTML page. It wires a handful of independent feature controllers onto the
//! document at page-ready time: theme switching, navigation highlighting,
//! scroll-triggered reveals, the contact form, and two progressive
//! enhancement polyfills. The HTML and CSS are owned by the site; this crate
//! only toggles attributes and classes the stylesheet already knows about.
//!
//! Every controller keeps its decision logic in a plain-Rust core that is
//! unit tested natively. Browser bindings live behind the `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Page-ready boot and the page-lifetime controller registry |
//! | [`config`] | Selectors, class names and timings, overridable from the page |
//! | [`consts`] | Default values for [`config::SiteConfig`] |
//! | [`error`] | Shared DOM error type |
//! | [`reveal`] | One-shot trigger guard shared by the reveal controllers |
//! | [`theme`] | Light/dark preference resolution, persistence and toggle |
//! | [`navigation`] | Active-link probe, header scroll class, mobile menu |
//! | [`skills`] | Staggered skill-bar fill on first view |
//! | [`sections`] | One-shot slide-up reveal per section |
//! | [`form`] | Contact form validation and submission lifecycle |
//! | [`smooth_scroll`] | Anchor smooth-scroll fallback |
//! | [`lazy_load`] | Image lazy-load fallback |
//! | [`visibility`] | Pause/resume CSS animations with page visibility |

pub mod app;
pub mod config;
pub mod consts;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod error;
pub mod form;
pub mod lazy_load;
pub mod navigation;
pub mod reveal;
pub mod sections;
pub mod skills;
pub mod smooth_scroll;
pub mod theme;
pub mod visibility;
