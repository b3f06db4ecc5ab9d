use eframe::egui::{self, Align, Color32, Layout, Order, Rect, RichText, Ui};

use crate::util::{format_balance, format_share, shorten_address};

use super::super::ViewModel;

const ACCENT: Color32 = Color32::from_rgb(6, 182, 212);

impl ViewModel {
    pub(in crate::app) fn draw_popup(&mut self, ui: &Ui, rect: Rect) {
        let Some(selection) = self.selection.selected() else {
            return;
        };
        let Some(entity) = self.entities.get(selection.entity) else {
            self.selection.clear();
            return;
        };

        let address = entity.address.clone();
        let tag = entity.tag.clone();
        let share = entity.percentage_share;
        let balance = entity.balance.clone();
        let transaction_count = entity.transaction_count;
        let symbol = self.dataset.token.symbol.clone();
        let decimals = self.dataset.token.decimals;
        let popup_width = self.selection.config.popup_size.x;

        let mut close_requested = false;
        let anchor = rect.min + selection.anchor.to_vec2();

        egui::Area::new(egui::Id::new("selection_popup"))
            .order(Order::Foreground)
            .fixed_pos(anchor)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_width(popup_width - 24.0);

                    ui.horizontal(|ui| {
                        if let Some(tag) = &tag {
                            ui.label(RichText::new(tag).color(ACCENT).strong());
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("x").clicked() {
                                close_requested = true;
                            }
                        });
                    });

                    ui.small("Wallet Address");
                    ui.label(
                        RichText::new(shorten_address(&address)).monospace(),
                    )
                    .on_hover_text(address.as_str());
                    ui.add_space(4.0);

                    ui.small("Token Holdings");
                    ui.label(
                        RichText::new(format_share(share))
                            .color(ACCENT)
                            .strong()
                            .size(18.0),
                    );

                    if let Some(balance) = &balance {
                        ui.label(format!(
                            "Balance: {} {symbol}",
                            format_balance(balance, decimals)
                        ));
                    }
                    if let Some(count) = transaction_count {
                        ui.label(format!("Transactions: {count}"));
                    }

                    ui.add_space(6.0);
                    ui.hyperlink_to(
                        "View on Sui Explorer",
                        format!("https://suiexplorer.com/address/{address}"),
                    );
                });
            });

        if close_requested {
            self.selection.close();
        }
    }
}
