mod bands;
mod machine;

pub use machine::{eval_source, Machine};
