//! Custom tracing layers

use tracing::{Subscriber, span};
use tracing_subscriber::{
    layer::{Context, Layer},
    registry::LookupSpan,
};

use crate::context::{SessionContextData, SessionContextGuard};

/// Layer that attaches the active session context to new spans
///
/// While a [`SessionContextGuard`] is alive, every span created on that
/// thread carries a [`SessionContextExtension`].
#[derive(Debug, Default)]
pub struct SessionContextLayer;

impl SessionContextLayer {
    pub fn new() -> Self {
        Self
    }
}

/// Extension data stored on spans
#[derive(Debug, Clone)]
pub struct SessionContextExtension {
    pub data: SessionContextData,
}

impl<S> Layer<S> for SessionContextLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, _attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(session) = SessionContextGuard::current() {
                span.extensions_mut()
                    .insert(SessionContextExtension { data: session });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::Registry;
    use uuid::Uuid;

    use crate::context::SessionRole;

    /// Records the session extension seen on each new span
    struct ContextRecorder(Arc<Mutex<Vec<Option<Uuid>>>>);

    impl<S> Layer<S> for ContextRecorder
    where
        S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    {
        fn on_new_span(&self, _attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
            let seen = ctx.span(id).and_then(|span| {
                span.extensions()
                    .get::<SessionContextExtension>()
                    .map(|ext| ext.data.session_id)
            });
            self.0.lock().unwrap().push(seen);
        }
    }

    #[test]
    fn test_spans_tagged_inside_guard() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let subscriber = Registry::default()
            .with(SessionContextLayer::new())
            .with(ContextRecorder(seen.clone()));

        let id = Uuid::new_v4();
        tracing::subscriber::with_default(subscriber, || {
            let _outside = tracing::info_span!("outside").entered();
            let _guard = SessionContextGuard::new(id, SessionRole::Sender);
            let _inside = tracing::info_span!("inside").entered();
        });

        assert_eq!(*seen.lock().unwrap(), vec![None, Some(id)]);
    }
}
