//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Out of bounds: ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::OutOfBounds {
            x: -1,
            y: 3,
            width: 10,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "Out of bounds: (-1, 3) is outside a 10x5 grid"
        );
    }
}
