//! Application shell
//!
//! The tab layout and launch routing: first-time users land on
//! onboarding, everyone else on the record tab.

use crate::capture::{CameraCapture, PermissionGateway};
use crate::feed::ShortsFeed;
use crate::onboarding::{AlertSink, OnboardingFlow};
use crate::recorder::RecorderService;
use crate::store::{is_first_time_open, FlagStore};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Bottom tab bar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Record,
    Shorts,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Record => "Record",
            Tab::Shorts => "Shorts",
        }
    }

    /// Icon name in the host icon set
    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Record => "videocamera",
            Tab::Shorts => "play-circle",
        }
    }
}

/// Top-level routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Onboarding,
    Tabs(Tab),
}

/// The assembled application
///
/// All platform capabilities arrive injected; the shell owns the screens'
/// state and decides the launch route.
pub struct App {
    store: Arc<dyn FlagStore>,
    onboarding: OnboardingFlow,
    recorder: RecorderService,
    feed: Mutex<ShortsFeed>,
}

impl App {
    pub fn new(
        capture: Arc<dyn CameraCapture>,
        permissions: Arc<dyn PermissionGateway>,
        alerts: Arc<dyn AlertSink>,
        store: Arc<dyn FlagStore>,
    ) -> Self {
        Self {
            onboarding: OnboardingFlow::new(permissions, alerts, store.clone()),
            recorder: RecorderService::new(capture),
            feed: Mutex::new(ShortsFeed::default()),
            store,
        }
    }

    /// Where the app opens on launch
    pub fn initial_route(&self) -> Route {
        if is_first_time_open(self.store.as_ref()) {
            tracing::info!("first launch, routing to onboarding");
            Route::Onboarding
        } else {
            Route::Tabs(Tab::Record)
        }
    }

    pub fn onboarding(&self) -> &OnboardingFlow {
        &self.onboarding
    }

    pub fn recorder(&self) -> &RecorderService {
        &self.recorder
    }

    pub fn feed(&self) -> &Mutex<ShortsFeed> {
        &self.feed
    }
}
