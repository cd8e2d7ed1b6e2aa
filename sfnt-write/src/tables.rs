//! A directory of the tables this crate can build.

pub mod fvar;
pub mod head;
pub mod name;
pub mod os2;
pub mod post;
