use crate::bounded::{BoxError, BoxStream};

use std::error::Error as StdError;
use std::future::poll_fn;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::{fmt, mem};

use bytes::{Bytes, BytesMut};
use futures_core::Stream;

/// Respresents the body of an HTTP request.
#[derive(Default)]
pub struct Body {
    kind: BodyKind,
}

#[derive(Default)]
enum BodyKind {
    Stream(BoxStream<'static, Result<Bytes, BoxError>>),
    Once(Bytes),
    #[default]
    Empty,
}

pin_project_lite::pin_project! {
    struct MapErr<S> {
        #[pin]
        stream: S,
    }
}

pin_project_lite::pin_project! {
    struct Prefixed {
        prefix: Option<Bytes>,
        #[pin]
        rest: Body,
    }
}

impl Stream for Prefixed {
    type Item = Result<Bytes, BoxError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        match this.prefix.take() {
            Some(prefix) => Poll::Ready(Some(Ok(prefix))),
            None => this.rest.poll_next(cx),
        }
    }
}

impl<T, E, S> Stream for MapErr<S>
where
    E: StdError + Send + Sync + 'static,
    S: Stream<Item = Result<T, E>>,
{
    type Item = Result<T, BoxError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .stream
            .poll_next(cx)
            .map(|item| item.map(|res| res.map_err(|err| Box::new(err) as BoxError)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

impl Body {
    /// Create a `Body` from a stream of bytes.
    pub fn stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Body {
            kind: BodyKind::Stream(Box::pin(MapErr { stream })),
        }
    }

    /// Create a body directly from bytes.
    pub fn once(bytes: impl Into<Bytes>) -> Self {
        Body {
            kind: BodyKind::Once(bytes.into()),
        }
    }

    /// Create an empty `Body`.
    pub fn empty() -> Self {
        Body::default()
    }

    /// Attempt to clone the body.
    ///
    /// Returns `None` if the body is a stream, which cannot be cloned.
    pub fn try_clone(&self) -> Option<Body> {
        let kind = match &self.kind {
            BodyKind::Stream(_) => return None,
            BodyKind::Once(bytes) => BodyKind::Once(bytes.clone()),
            BodyKind::Empty => BodyKind::Empty,
        };

        Some(Body { kind })
    }

    /// Put `prefix` back in front of whatever is left of the body.
    pub(crate) fn prepend(self, prefix: Bytes) -> Body {
        if prefix.is_empty() {
            return self;
        }

        let kind = match self.kind {
            BodyKind::Empty => BodyKind::Once(prefix),
            BodyKind::Once(rest) => {
                let mut joined = BytesMut::with_capacity(prefix.len() + rest.len());
                joined.extend_from_slice(&prefix);
                joined.extend_from_slice(&rest);
                BodyKind::Once(joined.freeze())
            }
            kind @ BodyKind::Stream(_) => BodyKind::Stream(Box::pin(Prefixed {
                prefix: Some(prefix),
                rest: Body { kind },
            })),
        };

        Body { kind }
    }

    /// Returns the next chunk of the body, or `None` once it is exhausted.
    pub async fn chunk(&mut self) -> Option<Result<Bytes, BoxError>> {
        poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }
}

impl Stream for Body {
    type Item = Result<Bytes, BoxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match &mut self.kind {
            BodyKind::Stream(stream) => stream.as_mut().poll_next(cx),
            BodyKind::Once(bytes) => {
                let bytes = mem::take(bytes);
                self.kind = BodyKind::Empty;
                Some(Ok(bytes)).into()
            }
            BodyKind::Empty => None.into(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.kind {
            BodyKind::Stream(stream) => stream.size_hint(),
            BodyKind::Once(bytes) => (bytes.len(), Some(bytes.len())),
            BodyKind::Empty => (0, Some(0)),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::once(bytes)
    }
}

impl From<String> for Body {
    fn from(string: String) -> Self {
        Body::once(string)
    }
}

impl From<&'static str> for Body {
    fn from(str: &'static str) -> Self {
        Body::once(str)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            BodyKind::Stream(_) => "Stream",
            BodyKind::Once(_) => "Once",
            BodyKind::Empty => "Empty",
        };

        f.debug_struct("Body").field("kind", &kind).finish()
    }
}
