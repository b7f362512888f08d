//! First-run onboarding
//!
//! Requests camera, microphone, and media library permissions in order.
//! Only a full grant marks the app as opened; any denial halts the flow
//! with a blocking alert and leaves the first-run flag unset.

use crate::capture::{PermissionGateway, PermissionKind};
use crate::shell::{Route, Tab};
use crate::store::{FlagStore, HAS_OPENED_KEY};
use crate::utils::{AppError, AppResult};
use std::sync::Arc;

/// Blocking user-facing alerts
pub trait AlertSink: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

/// The onboarding permission flow
pub struct OnboardingFlow {
    permissions: Arc<dyn PermissionGateway>,
    alerts: Arc<dyn AlertSink>,
    store: Arc<dyn FlagStore>,
}

impl OnboardingFlow {
    pub fn new(
        permissions: Arc<dyn PermissionGateway>,
        alerts: Arc<dyn AlertSink>,
        store: Arc<dyn FlagStore>,
    ) -> Self {
        Self {
            permissions,
            alerts,
            store,
        }
    }

    /// Request all required permissions in order
    ///
    /// Stops at the first denial with an alert naming the permission, and
    /// does not mark the app as opened. Sets the first-run flag only once
    /// every permission is granted.
    pub async fn request_all_permissions(&self) -> AppResult<()> {
        for kind in PermissionKind::ALL {
            if !self.permissions.request(kind).await {
                tracing::warn!("{} permission denied", kind);
                self.alerts
                    .alert("Error", &format!("{} permission is required", kind));
                return Err(AppError::PermissionDenied(kind.to_string()));
            }
        }

        self.store.set(HAS_OPENED_KEY, "true")?;
        tracing::info!("onboarding complete, all permissions granted");
        Ok(())
    }

    /// Grant-permissions button handler
    ///
    /// Routes to the tab shell on success; stays on onboarding otherwise.
    pub async fn handle_grant_permissions(&self) -> Route {
        match self.request_all_permissions().await {
            Ok(()) => Route::Tabs(Tab::Record),
            Err(e) => {
                tracing::warn!("onboarding halted: {}", e);
                self.alerts
                    .alert("Error", "To continue, please grant all permissions");
                Route::Onboarding
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{is_first_time_open, MemoryFlagStore};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Gateway that grants everything except the listed kinds, recording
    /// the order of requests
    struct FakeGateway {
        deny: Vec<PermissionKind>,
        asked: Mutex<Vec<PermissionKind>>,
    }

    impl FakeGateway {
        fn granting_all() -> Self {
            Self::denying(vec![])
        }

        fn denying(deny: Vec<PermissionKind>) -> Self {
            Self {
                deny,
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PermissionGateway for FakeGateway {
        async fn request(&self, kind: PermissionKind) -> bool {
            self.asked.lock().push(kind);
            !self.deny.contains(&kind)
        }
    }

    #[derive(Default)]
    struct RecordedAlerts {
        messages: Mutex<Vec<(String, String)>>,
    }

    impl AlertSink for RecordedAlerts {
        fn alert(&self, title: &str, message: &str) {
            self.messages.lock().push((title.into(), message.into()));
        }
    }

    fn flow(
        gateway: FakeGateway,
    ) -> (OnboardingFlow, Arc<RecordedAlerts>, Arc<MemoryFlagStore>) {
        let alerts = Arc::new(RecordedAlerts::default());
        let store = Arc::new(MemoryFlagStore::new());
        let flow = OnboardingFlow::new(Arc::new(gateway), alerts.clone(), store.clone());
        (flow, alerts, store)
    }

    #[tokio::test]
    async fn full_grant_sets_flag_and_routes_to_tabs() {
        let (flow, alerts, store) = flow(FakeGateway::granting_all());

        let route = flow.handle_grant_permissions().await;
        assert_eq!(route, Route::Tabs(Tab::Record));
        assert!(!is_first_time_open(store.as_ref()));
        assert!(alerts.messages.lock().is_empty());
    }

    #[tokio::test]
    async fn microphone_denial_halts_before_media_library() {
        let gateway = FakeGateway::denying(vec![PermissionKind::Microphone]);
        let (flow, alerts, store) = flow(gateway);

        let route = flow.handle_grant_permissions().await;
        assert_eq!(route, Route::Onboarding);

        // Flag must stay unset after a denial
        assert!(is_first_time_open(store.as_ref()));

        let messages = alerts.messages.lock();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].1.contains("Microphone"));
        assert_eq!(messages[1].1, "To continue, please grant all permissions");
    }

    #[tokio::test]
    async fn permissions_are_requested_in_order() {
        let gateway = Arc::new(FakeGateway::granting_all());
        let flow = OnboardingFlow::new(
            gateway.clone(),
            Arc::new(RecordedAlerts::default()),
            Arc::new(MemoryFlagStore::new()),
        );

        flow.request_all_permissions().await.unwrap();
        assert_eq!(gateway.asked.lock().as_slice(), &PermissionKind::ALL);
    }

    #[tokio::test]
    async fn camera_denial_asks_nothing_else() {
        let gateway = FakeGateway::denying(vec![PermissionKind::Camera]);
        let asked_handle;
        let flow = {
            let alerts = Arc::new(RecordedAlerts::default());
            let store = Arc::new(MemoryFlagStore::new());
            let gateway = Arc::new(gateway);
            asked_handle = gateway.clone();
            OnboardingFlow::new(gateway, alerts, store)
        };

        assert!(flow.request_all_permissions().await.is_err());
        assert_eq!(asked_handle.asked.lock().as_slice(), &[PermissionKind::Camera]);
    }
}
