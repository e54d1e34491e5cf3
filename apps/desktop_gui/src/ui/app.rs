//! The listing page: fetch-cycle driven views and per-card fault
//! containment.
//!
//! The UI thread owns all listing state. Each frame drains the worker event
//! queue, applies the events to the reducer, and renders whichever view the
//! resulting phase calls for: spinner, error, empty state, or the card list
//! with its pager.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{ListingPhase, ListingState};
use crate::ui::fault_boundary::FaultBoundary;
use shared::{domain::PostId, protocol::PostSummary};

const SUMMARY_EXCERPT_MAX_CHARS: usize = 220;
const PAGER_ROW_HEIGHT: f32 = 56.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8780".to_string(),
        }
    }
}

pub struct ReaderApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    listing: ListingState,
    // One boundary per visible card, keyed by post identity. Rebuilt at the
    // start of each fetch cycle, which is also the remount path that clears
    // tripped boundaries.
    card_boundaries: HashMap<PostId, FaultBoundary>,

    status: String,
    tick: u64,
}

impl ReaderApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            listing: ListingState::new(),
            card_boundaries: HashMap::new(),
            status: format!("Reading from {}", startup.server_url),
            tick: 0,
        };
        // The first fetch cycle starts with the app itself; the listing is
        // already in Loading for page 1.
        let first_page = app.listing.current_page();
        app.dispatch_load(first_page);
        app
    }

    fn dispatch_load(&mut self, page: u32) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadPage { page },
            &mut self.status,
        );
    }

    /// Page-change entry point used by the pager. Accepts any positive page
    /// number; the pager disables out-of-range controls.
    fn request_page(&mut self, page: u32) {
        self.listing.begin_fetch(page);
        self.card_boundaries.clear();
        self.dispatch_load(page);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::PageLoaded {
                    page,
                    posts,
                    total_pages,
                } => {
                    tracing::debug!(page, posts = posts.len(), total_pages, "fetch cycle settled");
                    self.listing.finish_fetch_ok(posts, total_pages);
                    self.status =
                        format!("Page {} of {}", self.listing.current_page(), total_pages.max(1));
                }
                UiEvent::PageLoadFailed { page } => {
                    tracing::debug!(page, "fetch cycle settled with a fault");
                    self.listing.finish_fetch_err();
                    self.status = "Listing unavailable".to_string();
                }
                UiEvent::WorkerFailed { detail } => {
                    self.listing.finish_fetch_err();
                    self.status = format!("Backend worker unavailable: {detail}");
                }
            }
        }
    }

    fn show_page_body(&mut self, ui: &mut egui::Ui) {
        let mut requested_page: Option<u32> = None;
        {
            let Self {
                listing,
                card_boundaries,
                ..
            } = self;
            // The order of these arms is the render contract: a fetch in
            // flight always shows the spinner, a settled fault always wins
            // over stale content, and only a Ready listing gets cards.
            match listing.phase() {
                ListingPhase::Loading => show_loading_view(ui),
                ListingPhase::Failed { message } => show_error_view(ui, message),
                ListingPhase::Ready { posts, total_pages } => {
                    if posts.is_empty() {
                        show_empty_view(ui);
                    } else {
                        let pager_visible = listing.pager_visible();
                        show_post_list(ui, posts, card_boundaries, pager_visible);
                        if pager_visible {
                            requested_page =
                                show_pager(ui, listing.current_page(), *total_pages);
                        }
                    }
                }
            }
        }
        if let Some(page) = requested_page {
            self.request_page(page);
        }
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick = self.tick.wrapping_add(1);
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_line")
            .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(10, 4)))
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(&self.status).size(12.0).weak());
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(18, 14)))
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Latest posts").size(22.0).strong());
                ui.add_space(10.0);
                self.show_page_body(ui);
            });

        // Worker events arrive between frames; keep polling, faster while a
        // fetch cycle is in flight so the spinner stays live.
        if matches!(self.listing.phase(), ListingPhase::Loading) {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

fn show_loading_view(ui: &mut egui::Ui) {
    ui.add_space(48.0);
    ui.vertical_centered(|ui| {
        ui.spinner();
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Loading posts…").size(15.0).weak());
    });
}

fn show_error_view(ui: &mut egui::Ui, message: &str) {
    ui.add_space(48.0);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new("Something went wrong")
                .size(20.0)
                .strong(),
        );
        ui.add_space(6.0);
        ui.label(egui::RichText::new(message).size(14.0));
    });
}

fn show_empty_view(ui: &mut egui::Ui) {
    ui.add_space(48.0);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("Nothing here yet").size(20.0).strong());
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("No posts have been published so far. Check back soon.")
                .size(14.0)
                .weak(),
        );
    });
}

fn show_post_list(
    ui: &mut egui::Ui,
    posts: &[PostSummary],
    boundaries: &mut HashMap<PostId, FaultBoundary>,
    pager_visible: bool,
) {
    let reserved = if pager_visible { PAGER_ROW_HEIGHT } else { 0.0 };
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height((ui.available_height() - reserved).max(0.0))
        .show(ui, |ui| {
            for post in posts {
                let boundary = boundaries
                    .entry(post.post_id)
                    .or_insert_with(FaultBoundary::new);
                let label = format!("post_card:{}", post.post_id.0);
                boundary.show(
                    &label,
                    ui,
                    |ui| show_post_card(ui, post),
                    |ui| show_card_fallback(ui),
                );
                ui.add_space(10.0);
            }
        });
}

fn show_post_card(ui: &mut egui::Ui, post: &PostSummary) {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&post.title).size(17.0).strong());
            ui.horizontal_wrapped(|ui| {
                if let Some(author) = &post.author {
                    ui.label(egui::RichText::new(author).size(12.0).weak());
                    ui.separator();
                }
                ui.label(
                    egui::RichText::new(format_published_date(&post.published_at))
                        .size(12.0)
                        .weak(),
                );
            });
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(summary_excerpt(&post.summary, SUMMARY_EXCERPT_MAX_CHARS))
                    .size(13.5),
            );
        });
}

fn show_card_fallback(ui: &mut egui::Ui) {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(1.0, ui.visuals().warn_fg_color))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new("This post can't be displayed")
                    .size(15.0)
                    .strong(),
            );
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(
                    "Something went wrong while rendering it. The rest of the page is unaffected.",
                )
                .size(12.5)
                .weak(),
            );
        });
}

/// Pager row: numbered buttons plus bounded prev/next. Returns the page the
/// user asked for, if any. Out-of-range moves are impossible here, which is
/// what lets the listing state accept page numbers unchecked.
fn show_pager(ui: &mut egui::Ui, current_page: u32, total_pages: u32) -> Option<u32> {
    let mut requested = None;
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        let can_back = current_page > 1;
        if ui
            .add_enabled(can_back, egui::Button::new("Previous"))
            .clicked()
        {
            requested = Some(current_page - 1);
        }

        for page in 1..=total_pages {
            let selected = page == current_page;
            if ui.selectable_label(selected, page.to_string()).clicked() && !selected {
                requested = Some(page);
            }
        }

        let can_forward = current_page < total_pages;
        if ui
            .add_enabled(can_forward, egui::Button::new("Next"))
            .clicked()
        {
            requested = Some(current_page + 1);
        }

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(format!("Page {current_page} of {total_pages}"))
                .size(12.0)
                .weak(),
        );
    });
    requested
}

fn format_published_date(published_at: &DateTime<Utc>) -> String {
    published_at.format("%B %-d, %Y").to_string()
}

fn summary_excerpt(summary: &str, max_chars: usize) -> String {
    let trimmed = summary.trim();
    match trimmed.char_indices().nth(max_chars) {
        None => trimmed.to_string(),
        Some((cut, _)) => format!("{}…", trimmed[..cut].trim_end()),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_published_date, summary_excerpt};

    #[test]
    fn short_summaries_pass_through_untouched() {
        assert_eq!(summary_excerpt("  a short one  ", 220), "a short one");
    }

    #[test]
    fn long_summaries_are_cut_on_character_boundaries() {
        let summary = "é".repeat(300);
        let excerpt = summary_excerpt(&summary, 220);
        assert_eq!(excerpt.chars().count(), 221); // 220 kept + ellipsis
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn excerpts_drop_trailing_whitespace_before_the_ellipsis() {
        let summary = format!("{} {}", "word".repeat(10), "x".repeat(300));
        let excerpt = summary_excerpt(&summary, 41);
        assert!(!excerpt.contains(" …"));
    }

    #[test]
    fn publication_dates_format_for_cards() {
        let date = "2024-03-05T09:30:00Z".parse().expect("timestamp");
        assert_eq!(format_published_date(&date), "March 5, 2024");
    }
}
