#[macro_use]
mod util;

mod structure;
mod mathml;
