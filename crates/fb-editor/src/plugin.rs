//! Host integration: wiring the builder into an embedding application.
//!
//! The builder needs two things from its host: a UI framework instance and
//! a state container. `install` provides both, reusing whatever the host
//! already has, so installing twice changes nothing.

/// The embedding application, as seen by the installer.
pub trait HostApp {
    /// Handle to a state container instance.
    type Store: Clone;

    fn has_ui_framework(&self) -> bool;

    fn install_ui_framework(&mut self, theme: &str);

    /// A state container the host already provides, if any.
    fn provided_store(&self) -> Option<Self::Store>;

    fn create_store(&mut self) -> Self::Store;

    /// Register `store` with the host so later lookups find it.
    fn install_store(&mut self, store: Self::Store);
}

#[derive(Debug, Clone)]
pub struct PluginOptions<S> {
    /// Use this state container instead of looking one up.
    pub store: Option<S>,
    /// Theme for a freshly installed UI framework.
    pub theme: String,
}

impl<S> Default for PluginOptions<S> {
    fn default() -> Self {
        Self {
            store: None,
            theme: "light".to_string(),
        }
    }
}

/// Where the active store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSource {
    Supplied,
    Host,
    Created,
}

/// Outcome of `install`.
#[derive(Debug, Clone)]
pub struct Installation<S> {
    /// The store the builder should use.
    pub store: S,
    pub store_source: StoreSource,
    pub installed_ui_framework: bool,
}

pub fn install<H: HostApp>(host: &mut H, options: PluginOptions<H::Store>) -> Installation<H::Store> {
    let installed_ui_framework = !host.has_ui_framework();
    if installed_ui_framework {
        log::debug!("installing UI framework with theme `{}`", options.theme);
        host.install_ui_framework(&options.theme);
    }

    let (store, store_source) = match (options.store, host.provided_store()) {
        (Some(store), _) => (store, StoreSource::Supplied),
        (None, Some(store)) => (store, StoreSource::Host),
        (None, None) => {
            let store = host.create_store();
            host.install_store(store.clone());
            log::debug!("installed a new state container");
            (store, StoreSource::Created)
        }
    };

    Installation {
        store,
        store_source,
        installed_ui_framework,
    }
}
