//! Module router
//!
//! Directs request envelopes to the handler registered for their kind.
//! The kind→handler table is built once at startup and held by reference;
//! adding a new top-level kind means registering one handler, without
//! touching existing ones.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rmp_common::EntityStore;
use tracing::debug;

use crate::envelope::{ModuleKind, ModuleRequest, ModuleResponse, RequestEnvelope, ResponseEnvelope};
use crate::error::DispatchError;
use crate::fetch::FetchModule;
use crate::profile::ProfileModule;
use crate::project::ProjectModule;

/// A top-level module handler, selected by request kind
#[async_trait]
pub trait ModuleHandler: Send + Sync {
    /// The request kind this handler is registered for
    fn kind(&self) -> ModuleKind;

    /// Handle the inner request. The router guarantees the request's kind
    /// matches [`Self::kind`].
    async fn handle(
        &self,
        caller_email: Option<&str>,
        request: ModuleRequest,
    ) -> Result<ModuleResponse, DispatchError>;
}

/// Kind→handler registry plus the dispatch entry point
pub struct ModuleRouter {
    handlers: HashMap<ModuleKind, Arc<dyn ModuleHandler>>,
}

impl ModuleRouter {
    /// Build a router over an explicit handler set
    pub fn new(handlers: impl IntoIterator<Item = Arc<dyn ModuleHandler>>) -> Self {
        let handlers = handlers
            .into_iter()
            .map(|handler| (handler.kind(), handler))
            .collect();
        Self { handlers }
    }

    /// Build a router with the standard Fetch / Profile / Project modules
    /// over the given store
    pub fn for_store<S: EntityStore + 'static>(store: Arc<S>) -> Self {
        Self::new([
            Arc::new(FetchModule::new(store.clone())) as Arc<dyn ModuleHandler>,
            Arc::new(ProfileModule::new(store.clone())),
            Arc::new(ProjectModule::new(store)),
        ])
    }

    /// Validate the envelope, dispatch by kind, and wrap the handler's
    /// typed result back into a response envelope.
    pub async fn dispatch(
        &self,
        envelope: RequestEnvelope,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let request = envelope.request.ok_or(DispatchError::MissingRequest)?;
        let kind = request.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(DispatchError::UnsupportedKind(kind))?;
        debug!(%kind, "dispatching request");
        let response = handler
            .handle(envelope.caller_email.as_deref(), request)
            .await?;
        Ok(ResponseEnvelope { response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{FetchRequest, FetchResponse, ProfileRequest, ProfileResponse};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        kind: ModuleKind,
        calls: AtomicUsize,
    }

    impl CountingHandler {
        fn new(kind: ModuleKind) -> Arc<Self> {
            Arc::new(Self {
                kind,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ModuleHandler for CountingHandler {
        fn kind(&self) -> ModuleKind {
            self.kind
        }

        async fn handle(
            &self,
            _caller_email: Option<&str>,
            _request: ModuleRequest,
        ) -> Result<ModuleResponse, DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(match self.kind {
                ModuleKind::Fetch => ModuleResponse::Fetch(FetchResponse::Departments {
                    departments: vec![],
                }),
                _ => ModuleResponse::Profile(ProfileResponse::ok()),
            })
        }
    }

    fn fetch_envelope() -> RequestEnvelope {
        RequestEnvelope {
            caller_email: None,
            request: Some(ModuleRequest::Fetch(FetchRequest { query: None })),
        }
    }

    #[tokio::test]
    async fn dispatch_invokes_only_the_registered_handler() {
        let fetch = CountingHandler::new(ModuleKind::Fetch);
        let profile = CountingHandler::new(ModuleKind::Profile);
        let router = ModuleRouter::new([
            fetch.clone() as Arc<dyn ModuleHandler>,
            profile.clone() as Arc<dyn ModuleHandler>,
        ]);

        let response = router.dispatch(fetch_envelope()).await.unwrap();
        assert!(matches!(response.response, ModuleResponse::Fetch(_)));
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
        assert_eq!(profile.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unset_request_fails_before_any_handler_runs() {
        let fetch = CountingHandler::new(ModuleKind::Fetch);
        let router = ModuleRouter::new([fetch.clone() as Arc<dyn ModuleHandler>]);

        let err = router
            .dispatch(RequestEnvelope {
                caller_email: None,
                request: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::MissingRequest));
        assert!(err.to_string().contains("not set"));
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unregistered_kind_is_unsupported() {
        // Only a Profile handler registered; Fetch requests have no entry
        let profile = CountingHandler::new(ModuleKind::Profile);
        let router = ModuleRouter::new([profile as Arc<dyn ModuleHandler>]);

        let err = router.dispatch(fetch_envelope()).await.unwrap_err();
        assert!(matches!(err, DispatchError::UnsupportedKind(ModuleKind::Fetch)));
    }

    #[tokio::test]
    async fn response_envelope_mirrors_request_kind() {
        let profile = CountingHandler::new(ModuleKind::Profile);
        let router = ModuleRouter::new([profile as Arc<dyn ModuleHandler>]);

        let response = router
            .dispatch(RequestEnvelope {
                caller_email: Some("ada@school.edu".into()),
                request: Some(ModuleRequest::Profile(ProfileRequest { op: None })),
            })
            .await
            .unwrap();
        assert!(matches!(response.response, ModuleResponse::Profile(_)));
    }
}
