use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Align, Context, Layout, Pos2};
use tracing::debug;

use crate::data::{DatasetKind, SUI_COIN_TYPE, TokenDataset, TokenSource, fetch_dataset};
use crate::engine::{
    CollisionConfig, ConnectionConfig, Entity, LayoutConfig, SelectionConfig,
    SelectionController, ViewportConfig, ViewportController,
};
use crate::util::shorten_address;

mod map;
mod render_utils;
mod ui;

pub struct BubbleMapApp {
    source: Arc<dyn TokenSource>,
    seed: u64,
    generation: u64,
    pending: Option<PendingFetch>,
    state: AppState,
}

struct PendingFetch {
    generation: u64,
    query: String,
    kind: DatasetKind,
    rx: Receiver<Result<TokenDataset, String>>,
}

enum AppState {
    Loading {
        query: String,
    },
    Ready(Box<ViewModel>),
    Error {
        query: String,
        kind: DatasetKind,
        message: String,
    },
}

struct SearchRequest {
    query: String,
    kind: DatasetKind,
}

struct ViewModel {
    dataset: TokenDataset,
    entities: Vec<Entity>,
    layout: LayoutConfig,
    collision: CollisionConfig,
    connection: ConnectionConfig,
    viewport: ViewportController,
    selection: SelectionController,
    resolver_passes: usize,
    seed: u64,
    layout_dirty: bool,
    query_input: String,
    query_error: Option<String>,
    kind_input: DatasetKind,
    highlight_filter: String,
    touch_points: HashMap<u64, Pos2>,
}

impl ViewModel {
    fn new(dataset: TokenDataset, seed: u64) -> Self {
        let mut model = Self {
            query_input: dataset.query.clone(),
            kind_input: dataset.kind,
            dataset,
            entities: Vec::new(),
            layout: LayoutConfig::default(),
            collision: CollisionConfig::default(),
            connection: ConnectionConfig::default(),
            viewport: ViewportController::new(ViewportConfig::default()),
            selection: SelectionController::new(SelectionConfig::default()),
            resolver_passes: 0,
            seed,
            layout_dirty: false,
            query_error: None,
            highlight_filter: String::new(),
            touch_points: HashMap::new(),
        };
        model.rebuild_layout();
        model
    }

    fn show(&mut self, ctx: &Context, is_loading: bool, request: &mut Option<SearchRequest>) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("bubblemap");
                    ui.separator();
                    ui.label(format!(
                        "{} ({})",
                        self.dataset.token.symbol, self.dataset.token.name
                    ));
                    ui.label(shorten_address(&self.dataset.query));
                    ui.label(format!(
                        "{} {}",
                        self.entities.len(),
                        self.dataset.kind.label()
                    ));
                    if ui.button("Reset view").clicked() {
                        self.viewport.reset();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_loading {
                            ui.spinner();
                            ui.label("fetching...");
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui, request));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_map(ui));
    }
}

impl BubbleMapApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: Arc<dyn TokenSource>,
        seed: u64,
        initial_query: String,
    ) -> Self {
        let mut app = Self {
            source,
            seed,
            generation: 0,
            pending: None,
            state: AppState::Loading {
                query: initial_query.clone(),
            },
        };
        app.start_fetch(initial_query, DatasetKind::Holders);
        app
    }

    fn start_fetch(&mut self, query: String, kind: DatasetKind) {
        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let (tx, rx) = mpsc::channel();

        let fetch_query = query.clone();
        thread::spawn(move || {
            let result = fetch_dataset(source.as_ref(), &fetch_query, kind)
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        self.pending = Some(PendingFetch {
            generation,
            query,
            kind,
            rx,
        });
    }

    fn poll_pending(&mut self) -> Option<AppState> {
        let pending = self.pending.take()?;

        match pending.rx.try_recv() {
            Ok(result) => {
                // A newer search supersedes this response; stale datasets
                // are discarded, never merged.
                if pending.generation != self.generation {
                    debug!(
                        generation = pending.generation,
                        current = self.generation,
                        "discarding stale fetch result"
                    );
                    return None;
                }

                Some(match result {
                    Ok(dataset) => {
                        AppState::Ready(Box::new(ViewModel::new(dataset, self.seed)))
                    }
                    Err(message) => AppState::Error {
                        query: pending.query,
                        kind: pending.kind,
                        message,
                    },
                })
            }
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
                None
            }
            Err(TryRecvError::Disconnected) => {
                if pending.generation != self.generation {
                    return None;
                }
                Some(AppState::Error {
                    query: pending.query,
                    kind: pending.kind,
                    message: "background fetch worker disconnected".to_owned(),
                })
            }
        }
    }
}

impl eframe::App for BubbleMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let transition = self.poll_pending();
        let mut request = None;

        match &mut self.state {
            AppState::Loading { query } => {
                let query = query.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Scanning the chain for token holders...");
                        ui.add_space(8.0);
                        ui.label(shorten_address(&query));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error {
                query,
                kind,
                message,
            } => {
                let retry = (query.clone(), *kind);
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(100.0);
                        ui.heading("Failed to fetch token data");
                        ui.add_space(6.0);
                        ui.label(message.as_str());
                        ui.add_space(10.0);
                        ui.horizontal(|ui| {
                            if ui.button("Retry").clicked() {
                                request = Some(SearchRequest {
                                    query: retry.0.clone(),
                                    kind: retry.1,
                                });
                            }
                            if ui.button("Try SUI native token").clicked() {
                                request = Some(SearchRequest {
                                    query: SUI_COIN_TYPE.to_owned(),
                                    kind: DatasetKind::Holders,
                                });
                            }
                        });
                    });
                });
            }
            AppState::Ready(model) => {
                let is_loading = self.pending.is_some();
                model.show(ctx, is_loading, &mut request);
            }
        }

        if let Some(search) = request {
            match &mut self.state {
                AppState::Loading { query } => *query = search.query.clone(),
                AppState::Error { .. } => {
                    self.state = AppState::Loading {
                        query: search.query.clone(),
                    };
                }
                AppState::Ready(_) => {}
            }
            self.start_fetch(search.query, search.kind);
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
