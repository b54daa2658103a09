//! Minimal abstraction for an asynchronous text line source (UART reader,
//! file replay, network socket). Serial configuration stays with the implementor.
use futures_util::Future;

/// Contract to deliver complete, newline-delimited lines.
pub trait LineSource {
    type Error: core::fmt::Debug;
    /// Copy the next complete line (terminator optional) into `buffer` and return
    /// its length. Asynchronously waits until a full line is available.
    ///
    /// A line longer than `buffer` fills it and reports its full length, so
    /// callers detect truncation with `len > buffer.len()`.
    fn next_line<'a>(
        &'a mut self,
        buffer: &'a mut [u8],
    ) -> impl Future<Output = Result<usize, Self::Error>> + 'a;
}
