//! Write destinations of the transfers.

use tokio::io::AsyncWrite;

/// Destination of a transfer's bytes.
///
/// Chunks are written sequentially; a sink is never seeked or rewritten.
pub trait Sink: AsyncWrite + Unpin + Send {
    /// Returns false if the sink cannot accept writes.
    fn is_writable(&self) -> bool {
        true
    }
}

impl Sink for tokio::fs::File {}

impl Sink for Vec<u8> {}

impl Sink for tokio::io::Sink {}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn is_writable(&self) -> bool {
        (**self).is_writable()
    }
}
