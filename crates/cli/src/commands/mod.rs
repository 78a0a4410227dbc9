pub mod matrix;

pub use matrix::matrix_command;
