use bevy::prelude::*;
use bevy_egui::{
    egui::{self, Align2, Color32, FontId, RichText},
    EguiContexts, EguiPlugin,
};

use crate::config::DeskConfig;
use crate::content::{self, typed_prefix};
use crate::input::PointerOverUi;
use crate::view::{View, ViewRequest};

/// Monitor desktop state that lives only while the monitor view is open.
#[derive(Resource, Default)]
struct MonitorDesktop {
    typed_for: f32,
    syllabus_open: bool,
}

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<MonitorDesktop>()
            .add_systems(OnEnter(View::Monitor), reset_desktop)
            .add_systems(
                Update,
                (
                    track_pointer_over_ui,
                    export_snapshot,
                    title_card.run_if(in_state(View::Default)),
                    back_button.run_if(not(in_state(View::Default))),
                    monitor_overlay.run_if(in_state(View::Monitor)),
                    phone_overlay.run_if(in_state(View::Phone)),
                    notepad_overlay.run_if(in_state(View::Notepad)),
                    reading_overlay.run_if(in_state(View::Reading)),
                    papers_overlay.run_if(in_state(View::Papers)),
                ),
            );
    }
}

/// Centered closable window; closing it is the same as going back.
fn overlay<R>(
    ctx: &egui::Context,
    title: &str,
    size: egui::Vec2,
    requests: &mut EventWriter<ViewRequest>,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) {
    let mut open = true;
    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_size(size)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, add_contents);
    if !open {
        requests.send(ViewRequest::Back);
    }
}

/// Dimmed full-screen layer under the overlay window; clicking it goes back.
fn backdrop(ctx: &egui::Context) -> bool {
    let screen = ctx.screen_rect();
    egui::Area::new("backdrop".into())
        .order(egui::Order::Background)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let response = ui.allocate_response(screen.size(), egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(200));
            response.clicked()
        })
        .inner
}

fn track_pointer_over_ui(mut contexts: EguiContexts, mut over_ui: ResMut<PointerOverUi>) {
    let over = contexts.ctx_mut().is_pointer_over_area();
    over_ui.set_if_neq(PointerOverUi(over));
}

fn export_snapshot(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<DeskConfig>,
    mut contexts: EguiContexts,
) {
    if !keys.just_pressed(KeyCode::F2) {
        return;
    }
    match config.snapshot() {
        Ok(json) => {
            info!("tuning snapshot copied to clipboard:\n{json}");
            contexts.ctx_mut().output_mut(|o| o.copied_text = json);
        }
        Err(err) => warn!("could not export tuning snapshot: {err}"),
    }
}

fn reset_desktop(mut desktop: ResMut<MonitorDesktop>) {
    *desktop = MonitorDesktop::default();
}

fn title_card(mut contexts: EguiContexts) {
    egui::Area::new("title_card".into())
        .anchor(Align2::LEFT_TOP, egui::vec2(32.0, 32.0))
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(
                RichText::new(content::TITLE.to_uppercase())
                    .font(FontId::proportional(48.0))
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.label(
                RichText::new(content::SUBTITLE.to_uppercase())
                    .font(FontId::monospace(14.0))
                    .color(Color32::from_white_alpha(100)),
            );
        });
}

fn back_button(mut contexts: EguiContexts, mut requests: EventWriter<ViewRequest>) {
    egui::Area::new("back_button".into())
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
        .show(contexts.ctx_mut(), |ui| {
            let button = egui::Button::new(
                RichText::new("BACK TO DESKTOP")
                    .strong()
                    .color(Color32::BLACK),
            )
            .fill(Color32::WHITE)
            .rounding(24.0)
            .min_size(egui::vec2(220.0, 44.0));
            if ui.add(button).clicked() {
                requests.send(ViewRequest::Back);
            }
        });
}

fn monitor_overlay(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut desktop: ResMut<MonitorDesktop>,
    mut requests: EventWriter<ViewRequest>,
) {
    desktop.typed_for += time.delta_seconds();
    let typed = typed_prefix(
        content::TERMINAL_BOOT,
        desktop.typed_for,
        content::TERMINAL_CHAR_INTERVAL,
    );
    let ctx = contexts.ctx_mut();

    let mut open_syllabus = false;
    overlay(ctx, "Desktop", egui::vec2(1024.0, 640.0), &mut requests, |ui| {
        ui.horizontal(|ui| {
            let icon = ui.add(egui::Button::new(
                RichText::new(format!("🗋\n{}", content::SYLLABUS_FILE)).color(Color32::LIGHT_BLUE),
            ));
            if icon.clicked() {
                open_syllabus = true;
            }
        });
        ui.add_space(12.0);

        egui::Frame::none()
            .fill(Color32::from_black_alpha(230))
            .inner_margin(16.0)
            .rounding(6.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(content::TERMINAL_TITLE.to_uppercase())
                        .monospace()
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.separator();
                ui.set_min_size(egui::vec2(600.0, 300.0));
                ui.label(
                    RichText::new(typed)
                        .monospace()
                        .color(Color32::from_rgb(0x00, 0xff, 0x41)),
                );
            });

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(RichText::new("V").strong().italics());
            ui.separator();
            ui.label(RichText::new(content::TASKBAR_CLOCK.to_uppercase()).small().weak());
        });
    });
    if open_syllabus {
        desktop.syllabus_open = true;
    }

    egui::Window::new(format!("{} - Text Viewer", content::SYLLABUS_FILE))
        .open(&mut desktop.syllabus_open)
        .collapsible(false)
        .default_size(egui::vec2(700.0, 500.0))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(
                    RichText::new(content::TITLE)
                        .font(FontId::proportional(32.0))
                        .italics()
                        .strong(),
                );
                ui.label(content::SYLLABUS_TERM);
                ui.label(RichText::new(content::SYLLABUS_INSTRUCTOR).strong());
                for section in content::SYLLABUS {
                    ui.add_space(16.0);
                    ui.heading(section.heading.to_uppercase());
                    for bullet in section.bullets {
                        ui.label(format!("• {bullet}"));
                    }
                    if !section.body.is_empty() {
                        ui.label(RichText::new(section.body).weak());
                    }
                }
                ui.add_space(16.0);
                ui.label(
                    RichText::new(content::SYLLABUS_QUOTE)
                        .italics()
                        .background_color(Color32::from_rgb(0xfe, 0xf3, 0xc7))
                        .color(Color32::BLACK),
                );
            });
        });
}

fn phone_overlay(mut contexts: EguiContexts, mut requests: EventWriter<ViewRequest>) {
    overlay(
        contexts.ctx_mut(),
        "Feed",
        egui::vec2(320.0, 640.0),
        &mut requests,
        |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for reel in content::REELS {
                    egui::Frame::none()
                        .fill(Color32::from_gray(12))
                        .inner_margin(16.0)
                        .rounding(12.0)
                        .show(ui, |ui| {
                            ui.set_min_size(egui::vec2(288.0, 560.0));
                            ui.vertical_centered(|ui| {
                                ui.add_space(160.0);
                                ui.label(RichText::new(reel.emoji).font(FontId::proportional(96.0)));
                            });
                            ui.add_space(120.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(reel.initials()).small().strong());
                                ui.label(RichText::new(reel.author).strong());
                            });
                            ui.label(RichText::new(reel.title).size(18.0));
                            ui.horizontal(|ui| {
                                for tag in content::REEL_TAGS {
                                    ui.label(RichText::new(*tag).monospace().weak());
                                }
                            });
                            ui.horizontal(|ui| {
                                ui.label(format!("❤ {}", reel.likes));
                                ui.label(format!("💬 {}", reel.comments));
                            });
                        });
                    ui.add_space(8.0);
                }
            });
        },
    );
}

fn notepad_overlay(mut contexts: EguiContexts, mut requests: EventWriter<ViewRequest>) {
    overlay(
        contexts.ctx_mut(),
        "Notepad",
        egui::vec2(400.0, 500.0),
        &mut requests,
        |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(content::NOTES_HEADER.to_uppercase()).monospace().weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(content::NOTES_DATE).monospace().weak());
                });
            });
            ui.add_space(16.0);
            ui.label(
                RichText::new(content::NOTES_TITLE)
                    .font(FontId::proportional(30.0))
                    .italics(),
            );
            ui.label(content::NOTES_QUOTE);
            ui.separator();
            for item in content::NOTES_CHECKLIST {
                let mark = if item.done { "●" } else { "○" };
                ui.horizontal(|ui| {
                    ui.label(RichText::new(mark).color(Color32::from_rgb(0x00, 0xff, 0x41)));
                    ui.label(RichText::new(item.label.to_uppercase()).monospace());
                });
            }
            ui.separator();
            ui.label(RichText::new(content::NOTES_FOOTER.to_uppercase()).small().weak());
        },
    );
}

fn reading_overlay(mut contexts: EguiContexts, mut requests: EventWriter<ViewRequest>) {
    let ctx = contexts.ctx_mut();
    if backdrop(ctx) {
        requests.send(ViewRequest::Back);
    }
    overlay(
        ctx,
        "Reading",
        egui::vec2(900.0, 640.0),
        &mut requests,
        |ui| {
            ui.label(
                RichText::new(content::READING_TITLE)
                    .font(FontId::proportional(40.0))
                    .strong(),
            );
            ui.label(RichText::new(content::READING_AUTHORS).italics().size(20.0));
            ui.add_space(24.0);
            ui.columns(2, |cols| {
                for paragraph in content::READING_BODY {
                    cols[0].label(*paragraph);
                    cols[0].add_space(8.0);
                }
                cols[0].heading("Core VAP Heuristics");
                for (name, text) in content::READING_HEURISTICS {
                    cols[0].label(format!("• {name}: {text}"));
                }

                cols[1].group(|ui| {
                    ui.label(RichText::new("SUGGESTED READING").strong());
                    for link in content::READING_LINKS {
                        ui.label(RichText::new(*link).underline().color(Color32::LIGHT_BLUE));
                    }
                });
                cols[1].add_space(16.0);
                cols[1].group(|ui| {
                    ui.label(
                        RichText::new("PUBLIC INTEREST TECH")
                            .strong()
                            .color(Color32::YELLOW),
                    );
                    ui.label(content::PITECH_BLURB);
                    ui.hyperlink_to("VISIT PITECH ETHICS", content::PITECH_URL);
                });
            });
        },
    );
}

fn papers_overlay(mut contexts: EguiContexts, mut requests: EventWriter<ViewRequest>) {
    let ctx = contexts.ctx_mut();
    if backdrop(ctx) {
        requests.send(ViewRequest::Back);
    }
    overlay(
        ctx,
        "Suggested Readings",
        egui::vec2(1000.0, 680.0),
        &mut requests,
        |ui| {
            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    for paper in content::SUGGESTED_READINGS {
                        ui.group(|ui| {
                            ui.set_width(400.0);
                            ui.set_min_height(560.0);
                            ui.vertical(|ui| {
                                ui.label(RichText::new("PDF").monospace().weak());
                                ui.label(RichText::new(paper.title).size(20.0).strong());
                                ui.label(RichText::new(paper.authors).italics().weak());
                                ui.add_space(12.0);
                                ui.label(RichText::new(paper.abstract_text).small());
                            });
                        });
                    }
                    ui.group(|ui| {
                        ui.set_width(400.0);
                        ui.set_min_height(560.0);
                        ui.vertical_centered(|ui| {
                            ui.add_space(240.0);
                            ui.label(RichText::new(content::MORE_RESOURCES.0).strong());
                            ui.label(RichText::new(content::MORE_RESOURCES.1).weak());
                        });
                    });
                });
            });
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Scroll horizontally to view papers").small().weak());
            });
        },
    );
}
