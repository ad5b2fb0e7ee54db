use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid B-tree order {0}: order must be at least 2")]
    InvalidOrder(usize),
}
