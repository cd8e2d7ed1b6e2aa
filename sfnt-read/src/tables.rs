//! The tables this crate can parse.
//!
//! Each submodule exposes the table's `TAG`, an owned model of its contents
//! and a `parse_*_table(data, start, ..)` function.

pub mod fvar;
pub mod head;
pub mod language;
pub mod ltag;
pub mod name;
pub mod os2;
pub mod post;
