use displaydoc::Display;

/// A specialized result type for lumicast operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while preparing an animation run.
///
/// Everything here is detected once, before the first packet leaves the
/// machine. Transmission itself has no error class: the protocol is lossy by
/// design and a dropped datagram is simply a missed frame.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// light {light} is assigned to row {row}, but the sequence has only {height} row(s)
    RowOutOfBounds {
        /// Position of the light in the configured light list.
        light: usize,
        /// Sequence row the light is mapped to.
        row: usize,
        /// Number of rows the sequence actually has.
        height: usize,
    },
    /// the sequence contains no frames
    EmptySequence,
    /// the frame rate must be greater than zero
    ZeroFrameRate,
}

impl std::error::Error for Error {}
