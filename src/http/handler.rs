use crate::http::request::Request;

/// The single callback that decides what every request means.
///
/// It is shared by all connections and may run on several threads at
/// once. The request is only borrowed: once `handle` returns the
/// connection closes. Calls run on tokio's blocking pool, so a handler may
/// block; the pool's thread cap (512 by default) bounds how many run at
/// the same time.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: &mut Request);
}

impl<F> Handler for F
where
    F: Fn(&mut Request) + Send + Sync + 'static,
{
    fn handle(&self, request: &mut Request) {
        self(request)
    }
}
