/*!
 * Desktop viewer for chartdash dashboards
 *
 * Shows one dashboard in two resizable panes:
 * - Left: every chart, drawn with the same renderer as the CLI
 * - Right: key metrics, executive summary, the data table and recommendations
 *
 * The payload is fetched from `API_BASE_URL` on a background thread; when the
 * fetch fails the built-in dashboard is shown with an "offline data" notice.
 */

use anyhow::Result;
use chartdash::dashboard::{
    DashboardPayload, DashboardSession, DataOrigin, LoadOutcome, LoadState, TableData, Trend,
};
use chartdash::panel::{ChartCache, SplitPane};
use chartdash::render::{ChartBody, render};
use chartdash::{Client, storage, viz};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

const HANDLE_W: f32 = 6.0;
const UP_GREEN: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
const DOWN_RED: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("chartdash"),
        ..Default::default()
    };

    eframe::run_native(
        "chartdash",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new()))),
    )
}

type LoadMessage = (u64, anyhow::Result<LoadOutcome>);

/// A drawn chart, or why it could not be drawn.
enum ChartImage {
    Texture(egui::TextureHandle),
    Failed(String),
}

struct DashboardApp {
    session: DashboardSession,
    split: SplitPane,

    // Every load thread reports here, tagged with its ticket.
    sender: mpsc::Sender<LoadMessage>,
    receiver: mpsc::Receiver<LoadMessage>,

    // One texture per chart, redrawn when the pane width changes.
    images: ChartCache<ChartImage>,

    status_message: String,
    error_message: String,
}

impl DashboardApp {
    fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        let mut app = Self {
            session: DashboardSession::new(),
            split: SplitPane::new(),
            sender,
            receiver,
            images: ChartCache::new(),
            status_message: String::new(),
            error_message: String::new(),
        };
        app.refresh();
        app
    }

    fn refresh(&mut self) {
        let ticket = self.session.begin_refresh();
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = Client::from_env().and_then(|client| client.load());
            let _ = sender.send((ticket, result));
        });
    }

    fn check_load_results(&mut self) {
        while let Ok((ticket, result)) = self.receiver.try_recv() {
            if self.session.complete(ticket, result) {
                self.images.clear();
                if let LoadState::Failed(msg) = self.session.state() {
                    self.error_message = format!("Failed to load dashboard: {}", msg);
                } else {
                    self.error_message.clear();
                }
            }
        }
    }

    fn export_table(&mut self, table: &TableData) {
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start_dir)
            .set_file_name("table.csv")
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        match storage::save_table_csv(table, &path) {
            Ok(()) => {
                self.status_message = format!("Saved table to {}", path.display());
                self.error_message.clear();
            }
            Err(err) => self.error_message = format!("Failed to save CSV: {:#}", err),
        }
    }

    fn chart_image(
        &mut self,
        ctx: &egui::Context,
        payload: &DashboardPayload,
        idx: usize,
        pane_px: u32,
    ) -> &ChartImage {
        self.images.get_or_draw(idx, pane_px, || {
            let view = render(&payload.charts[idx]);
            match viz::render_rgb(&view, pane_px) {
                Ok((rgb, (w, h))) => {
                    let image =
                        egui::ColorImage::from_rgb([w as usize, h as usize], rgb.as_slice());
                    let name = format!("chart-{}-{}", idx, pane_px);
                    ChartImage::Texture(ctx.load_texture(name, image, egui::TextureOptions::LINEAR))
                }
                Err(err) => ChartImage::Failed(format!("{:#}", err)),
            }
        })
    }

    fn charts_pane(&mut self, ui: &mut egui::Ui, payload: &DashboardPayload) {
        // round so a small resize does not redraw every chart
        let pane_px = ((ui.available_width() / 10.0).floor() * 10.0).max(120.0) as u32;
        egui::ScrollArea::vertical()
            .id_salt("charts")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (idx, chart) in payload.charts.iter().enumerate() {
                        let placeholder = match render(chart).container.body {
                            ChartBody::Unsupported(text) => Some(text),
                            _ => None,
                        };
                        let ctx = ui.ctx().clone();
                        ui.group(|ui| {
                            ui.vertical(|ui| {
                                ui.strong(&chart.title);
                                if let Some(text) = placeholder {
                                    ui.colored_label(egui::Color32::GRAY, text);
                                    return;
                                }
                                match self.chart_image(&ctx, payload, idx, pane_px - 24) {
                                    ChartImage::Texture(tex) => {
                                        ui.add(egui::Image::new(tex));
                                    }
                                    ChartImage::Failed(msg) => {
                                        ui.colored_label(DOWN_RED, msg);
                                    }
                                }
                            });
                        });
                    }
                });
            });
    }

    fn insights_pane(&mut self, ui: &mut egui::Ui, payload: &DashboardPayload) {
        egui::ScrollArea::vertical()
            .id_salt("insights")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Data Insights");
                ui.add_space(8.0);

                ui.label(egui::RichText::new("Key Metrics").strong());
                egui::Grid::new("metrics")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for (i, metric) in payload.insights.key_metrics.iter().enumerate() {
                            ui.group(|ui| {
                                ui.vertical(|ui| {
                                    ui.small(&metric.label);
                                    ui.label(egui::RichText::new(&metric.value).size(18.0).strong());
                                    ui.colored_label(trend_color(metric.trend()), &metric.change);
                                });
                            });
                            if i % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
                ui.add_space(12.0);

                ui.label(egui::RichText::new("Executive Summary").strong());
                ui.group(|ui| {
                    ui.label(&payload.insights.summary);
                });
                ui.add_space(12.0);

                let table = &payload.table_data;
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&table.title).strong());
                    if ui.small_button("Export CSV").clicked() {
                        self.export_table(table);
                    }
                });
                egui::Grid::new("table").striped(true).show(ui, |ui| {
                    for header in &table.headers {
                        ui.strong(header);
                    }
                    ui.end_row();
                    for row in &table.rows {
                        for (ci, cell) in row.iter().enumerate() {
                            let text = cell.label();
                            match TableData::row_trend(row) {
                                Some(trend) if ci + 1 == row.len() => {
                                    ui.colored_label(trend_color(trend), text);
                                }
                                _ => {
                                    ui.label(text);
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
                ui.add_space(12.0);

                ui.label(egui::RichText::new("Recommendations").strong());
                for (i, rec) in payload.insights.recommendations.iter().enumerate() {
                    ui.horizontal_wrapped(|ui| {
                        ui.strong(format!("{}.", i + 1));
                        ui.label(rec);
                    });
                }
            });
    }
}

fn trend_color(trend: Trend) -> egui::Color32 {
    match trend {
        Trend::Up => UP_GREEN,
        Trend::Down => DOWN_RED,
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Keep polling while a load is in flight (and for the spinner)
        if self.session.is_loading() {
            ctx.request_repaint();
        }

        let current = self.session.current().cloned();
        let current = current.as_deref();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = current
                    .as_ref()
                    .map(|o| o.payload.title().to_string())
                    .unwrap_or_else(|| "Dashboard".to_string());
                ui.heading(title);
                if ui
                    .add_enabled(!self.session.is_loading(), egui::Button::new("Refresh"))
                    .clicked()
                {
                    self.refresh();
                }
                if self.session.is_loading() {
                    ui.spinner();
                    ui.label("Loading dashboard...");
                }
                if let Some(LoadOutcome {
                    origin: DataOrigin::Fallback { reason },
                    ..
                }) = current
                {
                    ui.colored_label(egui::Color32::from_rgb(202, 138, 4), "offline data")
                        .on_hover_text(reason);
                }
            });
            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(outcome) = current else {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            };
            let payload = &outcome.payload;

            let full = ui.available_rect_before_wrap();
            let left_w = (self.split.left_width(full.width()) - HANDLE_W / 2.0).max(0.0);
            let right_w = (full.width() - left_w - HANDLE_W).max(0.0);
            let height = full.height();

            ui.horizontal_top(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                ui.allocate_ui_with_layout(
                    egui::vec2(left_w, height),
                    egui::Layout::top_down(egui::Align::Min),
                    |ui| self.charts_pane(ui, payload),
                );

                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(HANDLE_W, height), egui::Sense::drag());
                if response.drag_started() {
                    self.split.begin_drag();
                }
                if let Some(pos) = response.interact_pointer_pos() {
                    self.split.drag_to(pos.x, full.left(), full.width());
                }
                if response.drag_stopped() {
                    self.split.end_drag();
                }
                let shade = if self.split.is_dragging() || response.hovered() {
                    egui::Color32::from_gray(150)
                } else {
                    egui::Color32::from_gray(210)
                };
                ui.painter().rect_filled(rect.shrink2(egui::vec2(2.0, 0.0)), 1.0, shade);
                response.on_hover_cursor(egui::CursorIcon::ResizeHorizontal);

                ui.allocate_ui_with_layout(
                    egui::vec2(right_w, height),
                    egui::Layout::top_down(egui::Align::Min),
                    |ui| {
                        ui.add_space(4.0);
                        ui.indent("insights", |ui| self.insights_pane(ui, payload));
                    },
                );
            });
        });
    }
}
