use std::io::Write;

/// Capability to transmit one complete wire buffer.
///
/// The abstracted send shape: the dispatcher hands over the length header
/// and marshalled payload as a single buffer, already framed, in one call.
pub trait MessageSender {
    fn send(&mut self, buf: &[u8]) -> std::io::Result<()>;
}

impl<S: MessageSender + ?Sized> MessageSender for &mut S {
    fn send(&mut self, buf: &[u8]) -> std::io::Result<()> {
        (**self).send(buf)
    }
}

/// Adapts any `Write` into a [`MessageSender`].
pub struct WriteSender<W> {
    inner: W,
}

impl<W: Write> WriteSender<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consume the sender and return the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> MessageSender for WriteSender<W> {
    fn send(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(buf)?;
        self.inner.flush()
    }
}
