//! gui/update/helpers.rs
use iced::futures::channel::oneshot;

/// Run a blocking function on a background thread and await the result.
///
/// Keeps the oneshot + thread boilerplate out of every
/// "do work off-thread, then send Message::Finished(Result<...>)" case.
/// A worker that dies without answering becomes an `Err`.
pub(crate) async fn spawn_blocking<T>(
    f: impl FnOnce() -> Result<T, String> + Send + 'static,
) -> Result<T, String>
where
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel::<Result<T, String>>();

    std::thread::spawn(move || {
        let _ = tx.send(f());
    });

    rx.await
        .unwrap_or_else(|_| Err("background task ended without a result".to_string()))
}
