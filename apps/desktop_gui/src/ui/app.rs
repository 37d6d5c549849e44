use client_core::CollectionView;
use crossbeam_channel::{Receiver, Sender};
use shared::domain::UserId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

/// Row action picked while the table is being drawn; applied after the
/// table borrow ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowAction {
    Edit(UserId),
    Delete(UserId),
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_url: String,
    view: CollectionView,
    status: String,
}

impl DesktopGuiApp {
    /// Builds the app and queues the initial load.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_url: String,
    ) -> Self {
        let mut app = Self::new(cmd_tx, ui_rx, api_url);
        app.request_load();
        app
    }

    fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, api_url: String) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            api_url,
            view: CollectionView::new(),
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Remote(outcome) => self.view.apply(outcome),
                UiEvent::WorkerFailed(message) => {
                    self.status = message;
                }
            }
        }
    }

    fn request_load(&mut self) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadUsers, &mut self.status);
    }

    fn open_create_form(&mut self) {
        self.view.begin_create();
    }

    fn open_edit_form(&mut self, id: UserId) {
        if let Some(user) = self.view.users().get(id).cloned() {
            self.view.begin_edit(&user);
        }
    }

    fn submit_form(&mut self) {
        let cmd = BackendCommand::from(self.view.submit_request());
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn request_delete(&mut self, id: UserId) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::DeleteUser(id), &mut self.status);
    }

    fn apply_row_action(&mut self, action: RowAction) {
        match action {
            RowAction::Edit(id) => self.open_edit_form(id),
            RowAction::Delete(id) => self.request_delete(id),
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Users");
                ui.label(egui::RichText::new(&self.api_url).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Add User").clicked() {
                        self.open_create_form();
                    }
                });
            });
        });
    }

    fn show_status_line(&mut self, ctx: &egui::Context) {
        if self.status.is_empty() {
            return;
        }
        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 120, 120), &self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        self.status.clear();
                    }
                });
            });
        });
    }

    fn show_users_table(&mut self, ctx: &egui::Context) {
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("users_table")
                    .num_columns(4)
                    .striped(true)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        ui.strong("ID");
                        ui.strong("Name");
                        ui.strong("Email");
                        ui.strong("Action");
                        ui.end_row();

                        for user in self.view.users().iter() {
                            ui.label(user.id.to_string());
                            ui.label(&user.name);
                            ui.label(&user.email);
                            ui.horizontal(|ui| {
                                if ui.button("Edit").clicked() {
                                    action = Some(RowAction::Edit(user.id));
                                }
                                if ui.button("Delete").clicked() {
                                    action = Some(RowAction::Delete(user.id));
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        });
        if let Some(action) = action {
            self.apply_row_action(action);
        }
    }

    fn show_user_form(&mut self, ctx: &egui::Context) {
        if !self.view.is_form_open() {
            return;
        }

        let title = self.view.draft().title();
        let submit_label = self.view.draft().submit_label();
        let mut submit = false;
        let mut close = false;

        egui::Window::new(title)
            .id(egui::Id::new("user_form"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let draft = self.view.draft_mut();
                egui::Grid::new("user_form_fields")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut draft.name);
                        ui.end_row();
                        ui.label("Email");
                        ui.text_edit_singleline(&mut draft.email);
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    close = ui.button("Close").clicked();
                    submit = ui.button(submit_label).clicked();
                });
            });

        if close {
            self.view.cancel();
        } else if submit {
            self.submit_form();
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_status_line(ctx);
        self.show_users_table(ctx);
        self.show_user_form(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
