//! Desktop window.
//!
//! Draws the controller's rows each frame and feeds clicks back as
//! [`Command`]s. All state lives in the controller; the window only keeps
//! the commands collected during the current frame.

use crate::config::WindowConfig;
use crate::display::{Command, Controller, Notice, RowView};
use crate::types::MoveDirection;
use eframe::egui::{self, Align, Align2, Key, Layout, RichText, ScrollArea};
use tracing::info;

pub struct TodoWindow {
    controller: Controller,
}

impl TodoWindow {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    fn modal_open(&self) -> bool {
        self.controller.notice().is_some() || self.controller.pending_delete().is_some()
    }

    fn input_bar(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            let width = ui.available_width() - 90.0;
            let response = ui.add(
                egui::TextEdit::singleline(self.controller.input_mut())
                    .hint_text("New task")
                    .desired_width(width),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Add").clicked() || submitted {
                commands.push(Command::Add(self.controller.input().to_string()));
            }
        });
    }

    fn task_row(&mut self, ui: &mut egui::Ui, row: &RowView, commands: &mut Vec<Command>) {
        let task = &row.task;
        let controls = row.controls;

        ui.push_id(task.id, |ui| {
            ui.horizontal(|ui| {
                let mut completed = task.completed;
                if controls.toggle && ui.checkbox(&mut completed, "").changed() {
                    commands.push(Command::Toggle {
                        id: task.id,
                        completed,
                    });
                }

                if row.is_editing() {
                    if let Some(draft) = self.controller.draft_mut() {
                        let response = ui.text_edit_singleline(&mut draft.text);
                        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Escape)) {
                            commands.push(Command::CancelEdit);
                        }
                        if controls.save && ui.button("Save").clicked() {
                            commands.push(Command::SaveEdit {
                                id: task.id,
                                title: draft.text.clone(),
                            });
                        }
                    }
                } else {
                    let text = RichText::new(&task.title);
                    ui.label(if task.completed { text.strikethrough().weak() } else { text });
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if controls.delete && ui.button("Remove").clicked() {
                        commands.push(Command::Delete(task.id));
                    }
                    if controls.edit && ui.button("Edit").clicked() {
                        commands.push(Command::Edit(task.id));
                    }
                    if controls.move_down && ui.small_button("▼").clicked() {
                        commands.push(Command::Move {
                            direction: MoveDirection::Down,
                            id: task.id,
                            order: task.list_order,
                        });
                    }
                    if controls.move_up && ui.small_button("▲").clicked() {
                        commands.push(Command::Move {
                            direction: MoveDirection::Up,
                            id: task.id,
                            order: task.list_order,
                        });
                    }
                });
            });
        });
    }

    fn dialogs(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        if let Some(notice) = self.controller.notice() {
            let (title, message) = match notice {
                Notice::Warning(m) => ("Warning", m.as_str()),
                Notice::Fault(m) => ("Error", m.as_str()),
            };
            modal(title).show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    commands.push(Command::DismissNotice);
                }
            });
        } else if let Some(id) = self.controller.pending_delete() {
            let label = match self.controller.pending_delete_task() {
                Some(task) => format!("\"{}\"", task.title),
                None => format!("task {id}"),
            };
            modal("Remove Task").show(ctx, |ui| {
                ui.label(format!("Are you sure you want to remove {label}?"));
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        commands.push(Command::ConfirmDelete);
                    }
                    if ui.button("No").clicked() {
                        commands.push(Command::CancelDelete);
                    }
                });
            });
        }
    }
}

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

impl eframe::App for TodoWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands = Vec::new();
        let enabled = !self.modal_open();

        egui::TopBottomPanel::top("add_task").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.add_enabled_ui(enabled, |ui| self.input_bar(ui, &mut commands));
            ui.add_space(6.0);
        });

        // Rows are cloned so the open editor can borrow the controller mutably.
        let rows = self.controller.rows().to_vec();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                    for row in &rows {
                        self.task_row(ui, row, &mut commands);
                        ui.separator();
                    }
                });
            });
        });

        self.dialogs(ctx, &mut commands);

        for command in commands {
            self.controller.handle(command);
        }
    }
}

/// Open the window and block until it is closed.
pub fn run(config: &WindowConfig, controller: Controller) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([360.0, 240.0]),
        ..Default::default()
    };

    info!(title = %config.title, "opening window");
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(TodoWindow::new(controller)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
