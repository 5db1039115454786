//! Widget state machines.
//!
//! DESIGN
//! ======
//! State is split by widget (`consent`, `form`, `chat`, `carousel`) so each
//! component depends on one small model. Every model is plain data with a
//! `handle`-style transition method; none of them touch the browser.

pub mod carousel;
pub mod chat;
pub mod consent;
pub mod form;
