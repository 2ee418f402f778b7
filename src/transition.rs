//! Fade-out / swap / fade-in sequencing around each image change.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::placeholder::PlaceholderTemplates;
use crate::render::RenderSink;
use crate::source::ImageSource;

/// What a call to [`TransitionPresenter::present`] ended up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presented {
    /// The requested image.
    Image,
    /// The generated error placeholder, because the image failed to load.
    ErrorPlaceholder,
    /// The generated "no images" placeholder (empty selection).
    EmptyPlaceholder,
    /// Nothing; the session ended while the transition was in flight.
    Cancelled,
}

/// Executes the visual transition for one target image.
///
/// The target is always loaded fresh, even when preloaded, so a file that
/// went bad since warming still surfaces as an error placeholder.
pub struct TransitionPresenter<S, R> {
    source: Arc<S>,
    sink: Arc<R>,
    fade: Duration,
    bg_color: String,
    templates: PlaceholderTemplates,
}

impl<S: ImageSource, R: RenderSink> TransitionPresenter<S, R> {
    pub fn new(
        source: Arc<S>,
        sink: Arc<R>,
        fade: Duration,
        bg_color: impl Into<String>,
        templates: PlaceholderTemplates,
    ) -> Self {
        Self {
            source,
            sink,
            fade,
            bg_color: bg_color.into(),
            templates,
        }
    }

    /// Fade out, load, swap, fade back in.
    ///
    /// `target` is the image's `(url, label)`, or `None` to present the
    /// empty-selection placeholder. The visible source is never swapped
    /// before the fade-out completes, and once `cancel` fires nothing is
    /// swapped at all — a transition from a just-exited session must leave
    /// the sink alone.
    pub async fn present(
        &self,
        target: Option<(&str, &str)>,
        cancel: &CancellationToken,
    ) -> Presented {
        self.sink.set_fading(true);

        let Some((url, label)) = target else {
            tokio::select! {
                _ = cancel.cancelled() => return Presented::Cancelled,
                _ = sleep(self.fade) => {}
            }
            self.sink
                .show(&self.templates.empty_url(&self.bg_color), "No images available");
            self.sink.set_fading(false);
            return Presented::EmptyPlaceholder;
        };

        // Load concurrently with the fade-out; both must finish before the swap.
        let loaded = tokio::select! {
            _ = cancel.cancelled() => return Presented::Cancelled,
            (res, ()) = async { tokio::join!(self.source.fetch(url), sleep(self.fade)) } => res,
        };

        match loaded {
            Ok(()) => {
                self.sink.show(url, label);
                self.sink.set_fading(false);
                Presented::Image
            }
            Err(err) => {
                warn!(label, error = %err, "image failed to load; showing placeholder");
                self.sink
                    .show(&self.templates.error_url(&self.bg_color), label);
                self.sink.set_fading(false);
                Presented::ErrorPlaceholder
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SinkCall {
        Show(String, String),
        Fading(bool),
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<SinkCall>>,
    }

    impl RecordingSink {
        fn calls(&self) -> Vec<SinkCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RenderSink for RecordingSink {
        fn show(&self, url: &str, label: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(SinkCall::Show(url.to_string(), label.to_string()));
        }

        fn set_fading(&self, fading: bool) {
            self.calls.lock().unwrap().push(SinkCall::Fading(fading));
        }

        fn enter_fullscreen(&self) -> bool {
            true
        }

        fn exit_fullscreen(&self) {}
    }

    struct FlakySource;

    impl ImageSource for FlakySource {
        fn fetch(&self, url: &str) -> impl Future<Output = anyhow::Result<()>> + Send {
            let fail = url.contains("bad");
            async move {
                if fail {
                    anyhow::bail!("synthetic load failure");
                }
                Ok(())
            }
        }
    }

    fn presenter(sink: Arc<RecordingSink>) -> TransitionPresenter<FlakySource, RecordingSink> {
        TransitionPresenter::new(
            Arc::new(FlakySource),
            sink,
            Duration::from_millis(250),
            "101010",
            PlaceholderTemplates::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn swap_happens_between_fade_out_and_fade_in() {
        let sink = Arc::new(RecordingSink::default());
        let presented = presenter(Arc::clone(&sink))
            .present(Some(("images/a.jpg", "a.jpg")), &CancellationToken::new())
            .await;

        assert_eq!(presented, Presented::Image);
        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::Fading(true),
                SinkCall::Show("images/a.jpg".to_string(), "a.jpg".to_string()),
                SinkCall::Fading(false),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failed_load_swaps_to_error_placeholder_with_image_name() {
        let sink = Arc::new(RecordingSink::default());
        let presented = presenter(Arc::clone(&sink))
            .present(Some(("images/bad.jpg", "bad.jpg")), &CancellationToken::new())
            .await;

        assert_eq!(presented, Presented::ErrorPlaceholder);
        let calls = sink.calls();
        match &calls[1] {
            SinkCall::Show(url, label) => {
                assert!(url.contains("101010"), "placeholder carries bg color");
                assert_eq!(label, "bad.jpg");
            }
            other => panic!("expected a swap, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_selection_presents_its_placeholder() {
        let sink = Arc::new(RecordingSink::default());
        let presented = presenter(Arc::clone(&sink))
            .present(None, &CancellationToken::new())
            .await;

        assert_eq!(presented, Presented::EmptyPlaceholder);
        let calls = sink.calls();
        match &calls[1] {
            SinkCall::Show(url, label) => {
                assert!(url.contains("No%20images") || url.contains("No images"));
                assert_eq!(label, "No images available");
            }
            other => panic!("expected a swap, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_session_never_swaps() {
        let sink = Arc::new(RecordingSink::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let presented = presenter(Arc::clone(&sink))
            .present(Some(("images/a.jpg", "a.jpg")), &cancel)
            .await;

        assert_eq!(presented, Presented::Cancelled);
        assert_eq!(sink.calls(), vec![SinkCall::Fading(true)]);
    }
}
