// Headless rendering for component tests: session signals live in the root scope
// and are provided as context, the same way `AppShell` provides them.
use crate::api::{Catalog, CatalogStatus};
use crate::components::audio_manager::{new_player_engine, PlayerEngine, PlayerSignal};
use crate::components::release_modal::ModalState;
use crate::config::AppConfig;
use dioxus::core::{ScopeId, VirtualDom};
use dioxus::prelude::*;

#[derive(Clone, Copy)]
pub struct Session {
    pub catalog: Signal<Catalog>,
    pub status: Signal<CatalogStatus>,
    pub modal: Signal<ModalState>,
    pub engine: Signal<PlayerEngine>,
}

pub struct TestDom {
    dom: VirtualDom,
    pub session: Session,
}

impl TestDom {
    pub fn mount(app: fn() -> Element, catalog: Catalog, status: CatalogStatus) -> Self {
        let dom = VirtualDom::new(app);
        let config = AppConfig::default();
        let session = dom.in_scope(ScopeId::ROOT, || Session {
            catalog: Signal::new(catalog),
            status: Signal::new(status),
            modal: Signal::new(ModalState::default()),
            engine: Signal::new(new_player_engine(&config)),
        });
        let mut dom = dom
            .with_root_context(config)
            .with_root_context(session.catalog)
            .with_root_context(session.status)
            .with_root_context(session.modal)
            .with_root_context(PlayerSignal(session.engine));
        dom.rebuild_in_place();
        Self { dom, session }
    }

    /// Runs `f` inside the root scope, then lets every dirty scope and memo re-render.
    pub fn act<T>(&mut self, f: impl FnOnce(Session) -> T) -> T {
        let session = self.session;
        let out = self.dom.in_scope(ScopeId::ROOT, || f(session));
        for _ in 0..4 {
            self.dom.process_events();
            self.dom.render_immediate_to_vec();
        }
        out
    }

    pub fn html(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

/// Number of non-overlapping occurrences of `needle` in `html`.
pub fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}
